#[macro_use]
pub(crate) mod display;

pub mod commands;
pub mod logger;
pub mod routines;

use clap::Parser;

use crate::cli::commands::Commands;
use crate::cli::routines::generate::{check, generate};
use crate::cli::routines::{RoutineFailure, RoutineSuccess};
use crate::utilities::constants::CLI_VERSION;

#[derive(Parser)]
#[command(author, version = CLI_VERSION, about, long_about = None, arg_required_else_help(true))]
pub struct Cli {
    /// Turn debugging information on
    #[arg(short, long)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

pub fn top_command_handler(command: &Commands) -> Result<RoutineSuccess, RoutineFailure> {
    match command {
        Commands::Generate(args) => generate(args),
        Commands::Check(args) => check(args),
    }
}
