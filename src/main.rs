mod cli;
mod error;
mod generate;

use clap::Parser;
use cli::{Arguments, Command};
use error::AppError;
use log::{LevelFilter, error};
use settings::Settings;
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Arguments::parse();
    init_logging(args.verbose);

    match run(args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<(), AppError> {
    match command {
        Command::Generate(args) => {
            let settings = Settings::load()?;
            generate::run_generate(&args, &settings, &mut io::stdout().lock())?;
        }
        Command::Hosts { path } => {
            let path = match path {
                Some(path) => path,
                None => Settings::load()?.output_path()?,
            };
            print_hosts(&path, &mut io::stdout().lock())?;
        }
        Command::Init => {
            let path = Settings::ensure_config_exists()?;
            println!("{}", path.display());
        }
    }
    Ok(())
}

fn print_hosts<W: Write>(path: &Path, out: &mut W) -> Result<(), AppError> {
    for name in ssh::list_hosts(path)? {
        writeln!(out, "{name}").map_err(AppError::Stdout)?;
    }
    Ok(())
}

/// Maps `-v` occurrences to a level; `RUST_LOG` wins when set.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .parse_default_env()
        .init();
}
