mod commands;
mod generate;
mod swizzle;

use clap::*;
use commands::{GenerateCmd, Pass};
use swizzle::{fixed_jobs, Job};

use std::fs::File;
use std::io::{stderr, stdout, Write};

fn main() {
    env_logger::init();

    let matches = App::new("Swizzle generator")
        .version("0.1")
        .about("Generates C++ swizzle accessor declarations and inline definitions for vector types")
        .subcommand(
            SubCommand::with_name("declarations")
                .about("Prints the accessor declarations")
                .arg(alphabet_arg())
                .arg(scalar_arg())
                .arg(family_arg())
                .arg(count_arg()),
        )
        .subcommand(
            SubCommand::with_name("definitions")
                .about("Prints the inline accessor definitions")
                .arg(alphabet_arg())
                .arg(scalar_arg())
                .arg(family_arg())
                .arg(count_arg()),
        )
        .arg(
            Arg::with_name("OUTPUT")
                .help("Sets the output file to use")
                .value_name("FILE")
                .short("o")
                .long("output")
                .takes_value(true)
                .required(false),
        )
        .get_matches();

    let mut output: Box<dyn Write> = Box::new(stdout());

    if let Some(output_file) = matches.value_of("OUTPUT") {
        if let Ok(file) = File::create(output_file) {
            output = Box::new(file);
        } else {
            writeln!(&mut stderr(), "Cannot create file {}", output_file).unwrap();
            std::process::exit(1);
        }
    }

    let cmd = if let Some(decl_matches) = matches.subcommand_matches("declarations") {
        GenerateCmd {
            jobs: get_jobs(decl_matches),
            pass: Pass::Declarations,
            output,
            count: decl_matches.is_present("COUNT"),
        }
    } else if let Some(def_matches) = matches.subcommand_matches("definitions") {
        GenerateCmd {
            jobs: get_jobs(def_matches),
            pass: Pass::Definitions,
            output,
            count: def_matches.is_present("COUNT"),
        }
    } else {
        // No subcommand: the full fixed run, all declarations followed by
        // all definitions.
        GenerateCmd {
            jobs: fixed_jobs(),
            pass: Pass::Both,
            output,
            count: false,
        }
    };

    if let Err(e) = generate::generate(cmd) {
        writeln!(&mut stderr(), "Error: {:?}", e).unwrap();
        std::process::exit(1);
    }
}

fn get_jobs(matches: &ArgMatches) -> Vec<Job> {
    if let Some(alphabet) = matches.value_of("ALPHABET") {
        vec![Job::new(
            alphabet,
            matches.value_of("SCALAR").unwrap_or("float"),
            matches.value_of("FAMILY").unwrap_or("Vector"),
        )]
    } else {
        fixed_jobs()
    }
}

fn alphabet_arg() -> Arg<'static, 'static> {
    Arg::with_name("ALPHABET")
        .short("a")
        .long("alphabet")
        .help("Generates for a single component alphabet (e.g. \"xyz\") instead of the fixed set")
        .value_name("LETTERS")
        .takes_value(true)
}

fn scalar_arg() -> Arg<'static, 'static> {
    Arg::with_name("SCALAR")
        .short("s")
        .long("scalar")
        .help("Sets the scalar type name used with --alphabet (\"float\" by default)")
        .value_name("TYPE")
        .takes_value(true)
}

fn family_arg() -> Arg<'static, 'static> {
    Arg::with_name("FAMILY")
        .short("f")
        .long("family")
        .help("Sets the vector family name used with --alphabet (\"Vector\" by default)")
        .value_name("NAME")
        .takes_value(true)
}

fn count_arg() -> Arg<'static, 'static> {
    Arg::with_name("COUNT")
        .short("c")
        .long("count")
        .help("Prints the number of generated lines")
}
