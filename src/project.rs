//! Project-level configuration: an optional `reef.toml` next to the
//! resources, layered under the command-line flags.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, File};
use serde::Deserialize;

use crate::codegen::templates::Framework;
use crate::utilities::constants::{CONFIG_FILE_STEM, DEFAULT_TOP_LEVEL_NAME, DEFAULT_VISIBILITY};

/// Settings a project can pin in `reef.toml`. Every field is optional;
/// command-line flags win over the file.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub name: Option<String>,
    pub visibility: Option<String>,
    pub separator: Option<char>,
    pub locale: Option<String>,
    pub framework: Option<Framework>,
    pub top_level_scope: Option<bool>,
    pub case_insensitive: Option<bool>,
    pub exclude: Vec<String>,
}

impl ProjectConfig {
    /// Loads `reef.toml` from the project directory; a missing file is an
    /// empty configuration.
    pub fn load(project_dir: &Path) -> Result<ProjectConfig, ConfigError> {
        let path = project_dir.join(format!("{CONFIG_FILE_STEM}.toml"));
        Config::builder()
            .add_source(File::from(path).required(false))
            .build()?
            .try_deserialize()
    }
}

/// Fully-resolved options one generation run works with.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub project_dir: PathBuf,
    pub output_path: PathBuf,
    pub top_level_name: String,
    pub visibility: String,
    pub separator: char,
    pub locale: String,
    pub framework: Framework,
    pub top_level_scope: bool,
    pub case_insensitive: bool,
    pub exclude: Vec<String>,
}

impl GenerateOptions {
    /// Merges command-line flags over the project file, filling defaults for
    /// whatever neither provides.
    pub fn merge(
        project_dir: PathBuf,
        output_path: PathBuf,
        file: ProjectConfig,
        cli: CliOverrides,
    ) -> GenerateOptions {
        let mut exclude = file.exclude;
        exclude.extend(cli.exclude);

        GenerateOptions {
            project_dir,
            output_path,
            top_level_name: cli
                .name
                .or(file.name)
                .unwrap_or_else(|| DEFAULT_TOP_LEVEL_NAME.to_string()),
            visibility: cli
                .visibility
                .or(file.visibility)
                .unwrap_or_else(|| DEFAULT_VISIBILITY.to_string()),
            separator: cli.separator.or(file.separator).unwrap_or('.'),
            locale: cli.locale.or(file.locale).unwrap_or_else(|| "en".to_string()),
            framework: cli.framework.or(file.framework).unwrap_or(Framework::UiKit),
            top_level_scope: cli.top_level_scope || file.top_level_scope.unwrap_or(false),
            case_insensitive: cli.case_insensitive || file.case_insensitive.unwrap_or(false),
            exclude,
        }
    }

    /// File name echoed in the generated header.
    pub fn output_file_name(&self) -> String {
        self.output_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// The generate/check flags as they arrive from clap, before merging.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub name: Option<String>,
    pub visibility: Option<String>,
    pub separator: Option<char>,
    pub locale: Option<String>,
    pub framework: Option<Framework>,
    pub top_level_scope: bool,
    pub case_insensitive: bool,
    pub exclude: Vec<String>,
}
