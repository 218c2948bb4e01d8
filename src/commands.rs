use crate::swizzle::Job;
use std::io;

pub enum Pass {
    Declarations,
    Definitions,
    Both,
}

pub struct GenerateCmd {
    pub jobs: Vec<Job>,
    pub pass: Pass,
    pub output: Box<dyn io::Write>,
    pub count: bool,
}
