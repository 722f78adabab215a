//! Validate molecule specifications and write the contents of the system they define.
//!
//! # Usage
//! ```bash
//! USAGE:
//!     molspec [FLAGS] [OPTIONS] <INPUT>
//!
//! FLAGS:
//!     -h, --help       Prints help information
//!     -V, --version    Prints version information
//!     -v, --verbose    Print more information (repeat for debug output)
//!
//! OPTIONS:
//!     -o, --output <PATH>    Output JSON file (the extension will be set to .json)
//!
//! ARGS:
//!     <INPUT>    JSON file with a list of molecule specifications
//! ```
//!
//! # Input
//! A list of molecule specifications, eg.
//!
//! ```json
//! [
//!     {"identity": "O", "count": 500, "force_field": "tip3p"},
//!     {"identity": "[Na+]", "count": 5},
//!     {"identity": "[Cl-]", "count": 5}
//! ]
//! ```
//!
//! All specifications are validated and aggregated. The set contents are written
//! to the output file or to stdout, while a summary is printed to stderr.

extern crate colored;
extern crate env_logger;
#[macro_use]
extern crate log;
extern crate molspec;
extern crate structopt;

mod error;
use error::Result;

use molspec::contents::aggregate;
use molspec::describe::{describe_list, Describe};
use molspec::io::{read_input_specs, to_writer, write_set_contents};
use molspec::spec::SpecValidator;

use env_logger::Env;
use structopt::StructOpt;

use std::io;
use std::path::PathBuf;
use std::process;

#[derive(Debug, StructOpt)]
#[structopt(name = "molspec")]
/// Validate molecule specifications and write the contents of the system they define.
struct Args {
    #[structopt(parse(from_os_str), value_name = "INPUT")]
    /// JSON file with a list of molecule specifications
    input: PathBuf,
    #[structopt(short, long, parse(from_os_str), value_name = "PATH")]
    /// Output JSON file (the extension will be set to .json)
    output: Option<PathBuf>,
    #[structopt(short, long, parse(from_occurrences))]
    /// Print more information (repeat for debug output)
    verbose: u8,
}

fn main() {
    let args = Args::from_args();

    let level = match args.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    if let Err(err) = run(args) {
        eprintln!("{}", err);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let inputs = read_input_specs(&args.input)?;
    if inputs.is_empty() {
        warn!("No molecule specifications in '{}'", args.input.display());
    }

    let validator: SpecValidator = SpecValidator::default();
    let contents = aggregate(validator.validate_all(&inputs)?);

    eprint!("{}", describe_list("Molecules", contents.molecule_specs()));
    eprintln!("{}", contents.describe());

    match args.output {
        Some(path) => {
            let path = write_set_contents(&contents, &path)?;
            eprintln!("Wrote set contents to '{}'", path.display());
        },
        None => {
            let stdout = io::stdout();
            to_writer(&contents, &mut stdout.lock())?;
        },
    }

    Ok(())
}
