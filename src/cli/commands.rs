//! # CLI Commands
//! A module for all the commands that can be run from the CLI

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::codegen::templates::Framework;

#[derive(Subcommand)]
pub enum Commands {
    /// Generate the resource accessor file for a project
    Generate(GenerateArgs),
    /// Verify that the generated file is up to date without writing it
    Check(GenerateArgs),
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Directory containing the project's resources
    pub project_dir: PathBuf,

    /// Path of the Swift file to generate
    pub output_path: PathBuf,

    /// The top level enum name
    #[arg(long)]
    pub name: Option<String>,

    /// The generated declarations' visibility keyword
    #[arg(long)]
    pub visibility: Option<String>,

    /// Separator character used to split localization keys
    #[arg(long)]
    pub separator: Option<char>,

    /// Localization code used to select the source-language tables, e.g. en, de, es
    #[arg(long)]
    pub locale: Option<String>,

    /// Target framework for the generated accessors (uikit, appkit, swiftui)
    #[arg(long)]
    pub framework: Option<Framework>,

    /// Declare resource enums at the top level instead of nesting them
    #[arg(long)]
    pub top_level_scope: bool,

    /// Treat symbols differing only in case as colliding
    #[arg(long)]
    pub case_insensitive: bool,

    /// Exclude paths matching a glob, relative to the project directory
    #[arg(long, value_name = "GLOB")]
    pub exclude: Vec<String>,
}
