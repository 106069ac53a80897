//! restcheck - Entry Point
//!
//! Exit codes: `0` every document passed, `1` at least one failed, `2` the
//! run itself failed (unreadable file, bad configuration).

use clap::Parser;
use restcheck::cli::Cli;
use restcheck::{Outcome, logging, run};
use std::process::ExitCode;

const EXIT_FAILED: u8 = 1;
const EXIT_ERROR: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init_logging(&cli.log_level, cli.json_logs) {
        eprintln!("error: {e:#}");
        return ExitCode::from(EXIT_ERROR);
    }

    let stdout = std::io::stdout();
    match run(&cli, &mut stdout.lock()) {
        Ok(Outcome::Passed) => ExitCode::SUCCESS,
        Ok(Outcome::Failed) => ExitCode::from(EXIT_FAILED),
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}
