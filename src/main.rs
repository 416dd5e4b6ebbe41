use std::{
    panic::{self, AssertUnwindSafe},
    path::PathBuf,
    process::ExitCode,
    time::Instant,
};

use checker::{check_file, errors::errors::{Error, ErrorTip}, CheckOptions, Verdict};
use clap::Parser;
use log::{info, LevelFilter};

/// Statically checks a program given in its JSON AST form.
#[derive(Parser, Debug)]
#[command(name = "checker", version)]
struct Args {
    /// Path to the `.astj` file to check
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Check every struct and function and report the first error of each
    #[arg(long)]
    all: bool,

    /// Raise the log level (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

const EXIT_VALID: u8 = 0;
const EXIT_INVALID: u8 = 1;
const EXIT_INPUT: u8 = 2;
const EXIT_INTERNAL: u8 = 3;

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let options = CheckOptions { report_all: args.all };
    let start = Instant::now();

    let result = panic::catch_unwind(AssertUnwindSafe(|| check_file(&args.input, &options)));

    let code = match result {
        Ok(Ok(verdict)) => {
            println!("{}", verdict);
            for error in verdict.errors() {
                display_error(error);
            }
            match verdict {
                Verdict::Valid => EXIT_VALID,
                Verdict::Invalid(_) => EXIT_INVALID,
            }
        }
        Ok(Err(error)) => {
            eprintln!("error: {}", error);
            EXIT_INPUT
        }
        Err(_) => {
            eprintln!("internal error while checking {}", args.input.display());
            EXIT_INTERNAL
        }
    };

    info!("Total time: {:?}", start.elapsed());
    ExitCode::from(code)
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    // RUST_LOG, when set, takes precedence over the flag.
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn display_error(error: &Error) {
    /*
        Error: MayNotReturn (every path must end in `return`; ...)
        -> function f
    */

    if let ErrorTip::None = error.get_tip() {
        eprintln!("Error: {}", error.get_error_name());
    } else {
        eprintln!("Error: {} ({})", error.get_error_name(), error.get_tip());
    }
    eprintln!("-> {}", error.get_location());
}
