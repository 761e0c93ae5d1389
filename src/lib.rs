//! Core library entry for the `taskdeck` CLI and board engine.

pub mod adapters;
pub mod board;
pub mod cli;
pub mod columns;
pub mod commands;
pub mod config;
pub mod confirm;
pub mod drag;
pub mod form;
pub mod mutation;
pub mod ports;
pub mod role;
pub mod store;
pub mod task;

use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command
/// execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args).map_err(|err| err.to_string())?;
    commands::dispatch(&cli.command)
}

#[cfg(test)]
mod tests {
    use super::run;

    #[test]
    fn run_errors_on_unknown_subcommand() {
        let result = run(["taskdeck", "unknown"]);
        assert!(result.is_err());
    }

    #[test]
    fn run_errors_without_arguments() {
        let result = run(["taskdeck"]);
        assert!(result.is_err());
    }
}
