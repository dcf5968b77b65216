//! `route360` command line entry point.
//!
//! # Responsibility
//! - Parse flags and environment into a command.
//! - Open the journal database and run the command for the signed-in user.

mod cli;
mod commands;

use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    match commands::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("route360 error: {err}");
            ExitCode::FAILURE
        }
    }
}
