use clap::Parser;
use std::process::ExitCode;

use penscript::cli::{self, Cli};

fn main() -> ExitCode {
    if let Err(e) = cli::dispatch(Cli::parse()) {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
