#[macro_use]
mod cli;
pub mod codegen;
pub mod project;
pub mod resources;
pub mod utilities;

use std::process::ExitCode;

use clap::Parser;

// Entry point for the CLI application
fn main() -> ExitCode {
    let cli_result = cli::Cli::parse();

    cli::logger::setup_logging(cli_result.debug);

    match cli::top_command_handler(&cli_result.command) {
        Ok(success) => {
            show_message!(success.message_type, success.message);
            ExitCode::from(0)
        }
        Err(failure) => {
            show_message!(failure.message_type, failure.message);
            if let Some(error) = failure.error {
                eprintln!("{error:?}");
            }
            ExitCode::from(1)
        }
    }
}
