use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use visz2ovpn::exit_status::{status_for_error, ExitStatus};

mod cli;
mod convert;
mod path_guard;

use cli::Cli;
use convert::Outcome;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match convert::run_convert(cli) {
        Ok(Outcome::Written(_)) => ExitStatus::Success.into(),
        Ok(Outcome::Unsupported) => ExitStatus::UnsupportedInput.into(),
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            status_for_error(&err).into()
        }
    }
}
