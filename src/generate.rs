use crate::commands::{GenerateCmd, Pass};
use crate::swizzle::{self, GenError};
use log::debug;
use std::io::Write;

pub fn generate(mut cmd: GenerateCmd) -> Result<(), GenError> {
    if cmd.count {
        let mut num_lines = 0;
        for job in &cmd.jobs {
            let per_pass = swizzle::line_count(&job.alphabet)?;
            num_lines += match cmd.pass {
                Pass::Both => per_pass * 2,
                _ => per_pass,
            };
        }

        writeln!(&mut *cmd.output, "lines: {}", num_lines)?;
        return Ok(());
    }

    debug!("{} generation job(s)", cmd.jobs.len());

    match cmd.pass {
        Pass::Declarations => {
            for job in &cmd.jobs {
                swizzle::declarations(job, &mut *cmd.output)?;
            }
        }
        Pass::Definitions => {
            for job in &cmd.jobs {
                swizzle::definitions(job, &mut *cmd.output)?;
            }
        }
        Pass::Both => {
            swizzle::generate_all(&cmd.jobs, &mut *cmd.output)?;
        }
    }

    Ok(())
}
