//! The generate and check routines: discovery, per-category building, file
//! assembly, and the idempotent write.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::cli::commands::GenerateArgs;
use crate::cli::display::Message;
use crate::cli::routines::{RoutineFailure, RoutineSuccess};
use crate::codegen::file::{file_contents, resource_declarations, FileLayout};
use crate::codegen::render::RenderContext;
use crate::codegen::resolve::ResolveError;
use crate::codegen::sanitize::SanitizePolicy;
use crate::project::{CliOverrides, GenerateOptions, ProjectConfig};
use crate::resources::assets::{
    asset_enum_string, AssetError, ColorCategory, DataAssetCategory, ImageCategory,
};
use crate::resources::discovery::{build_exclude_set, discover, DiscoveryError};
use crate::resources::fonts::font_enum_string;
use crate::resources::localizations::{localization_enum_string, LocalizationError};
use crate::resources::storyboards::storyboard_enum_string;
use crate::utilities::constants::{
    COLORS_ENUM_NAME, DATA_ASSETS_ENUM_NAME, FONTS_ENUM_NAME, IMAGES_ENUM_NAME,
    LOCALIZATIONS_ENUM_NAME, STORYBOARDS_ENUM_NAME,
};

#[derive(Debug, thiserror::Error)]
#[error("Failed to generate resource accessors")]
#[non_exhaustive]
pub enum GenerateError {
    Discovery(#[from] DiscoveryError),
    Pattern(#[from] globset::Error),
    Asset(#[from] AssetError),
    Localization(#[from] LocalizationError),
    Resolve(#[from] ResolveError),
    Config(#[from] config::ConfigError),
    Io(#[from] std::io::Error),
}

impl From<&GenerateArgs> for CliOverrides {
    fn from(args: &GenerateArgs) -> CliOverrides {
        CliOverrides {
            name: args.name.clone(),
            visibility: args.visibility.clone(),
            separator: args.separator,
            locale: args.locale.clone(),
            framework: args.framework,
            top_level_scope: args.top_level_scope,
            case_insensitive: args.case_insensitive,
            exclude: args.exclude.clone(),
        }
    }
}

fn resolve_options(args: &GenerateArgs) -> Result<GenerateOptions, GenerateError> {
    let file_config = ProjectConfig::load(&args.project_dir)?;
    Ok(GenerateOptions::merge(
        args.project_dir.clone(),
        args.output_path.clone(),
        file_config,
        CliOverrides::from(args),
    ))
}

/// Runs the whole pipeline and returns the complete output file content.
pub fn generate_file_contents(options: &GenerateOptions) -> Result<String, GenerateError> {
    let exclude = build_exclude_set(&options.exclude)?;
    let paths = discover(&options.project_dir, &options.locale, &exclude)?;
    let policy = SanitizePolicy {
        case_insensitive: options.case_insensitive,
    };
    let ctx = RenderContext {
        visibility: options.visibility.clone(),
        framework: options.framework,
    };

    // Each category pipeline runs on its own tree; order here is the
    // emission order of the blocks.
    let blocks = vec![
        asset_enum_string::<ImageCategory>(&paths.asset_catalogs, IMAGES_ENUM_NAME, &policy, &ctx)?,
        asset_enum_string::<ColorCategory>(&paths.asset_catalogs, COLORS_ENUM_NAME, &policy, &ctx)?,
        font_enum_string(&paths.fonts, FONTS_ENUM_NAME, &policy, &ctx)?,
        localization_enum_string(
            &paths.localizations,
            LOCALIZATIONS_ENUM_NAME,
            options.separator,
            &policy,
            &ctx,
        )?,
        storyboard_enum_string(&paths.storyboards, STORYBOARDS_ENUM_NAME, &policy, &ctx)?,
        asset_enum_string::<DataAssetCategory>(
            &paths.asset_catalogs,
            DATA_ASSETS_ENUM_NAME,
            &policy,
            &ctx,
        )?,
    ];

    let layout = FileLayout {
        output_file_name: options.output_file_name(),
        top_level_name: options.top_level_name.clone(),
        visibility: options.visibility.clone(),
        top_level_scope: options.top_level_scope,
        framework: options.framework,
    };
    let declarations = resource_declarations(&blocks, &layout);
    Ok(file_contents(&declarations, &layout))
}

fn current_contents(path: &Path) -> Option<String> {
    fs::read_to_string(path).ok()
}

fn failure(action: &str, error: GenerateError) -> RoutineFailure {
    let error = anyhow::Error::from(error);
    RoutineFailure::new(
        Message::new(action.to_string(), format!("{error:#}")),
        error,
    )
}

/// `reef generate`: writes the output file, but only when its content
/// actually changed, so build systems don't see spurious modifications.
pub fn generate(args: &GenerateArgs) -> Result<RoutineSuccess, RoutineFailure> {
    let options = resolve_options(args).map_err(|e| failure("Generate", e))?;
    let contents = generate_file_contents(&options).map_err(|e| failure("Generate", e))?;

    if current_contents(&options.output_path).as_deref() == Some(contents.as_str()) {
        info!("Output file {} unchanged", options.output_path.display());
        return Ok(RoutineSuccess::info(Message::new(
            "Generate".to_string(),
            format!("{} is already up to date", options.output_file_name()),
        )));
    }

    fs::write(&options.output_path, contents).map_err(|error| {
        RoutineFailure::new(
            Message::new(
                "Generate".to_string(),
                format!("Failed to write {}", options.output_path.display()),
            ),
            error,
        )
    })?;

    Ok(RoutineSuccess::success(Message::new(
        "Generate".to_string(),
        format!("wrote {}", options.output_path.display()),
    )))
}

/// `reef check`: reports whether the output file matches what generation
/// would produce, without touching it.
pub fn check(args: &GenerateArgs) -> Result<RoutineSuccess, RoutineFailure> {
    let options = resolve_options(args).map_err(|e| failure("Check", e))?;
    let contents = generate_file_contents(&options).map_err(|e| failure("Check", e))?;

    if current_contents(&options.output_path).as_deref() == Some(contents.as_str()) {
        Ok(RoutineSuccess::success(Message::new(
            "Check".to_string(),
            format!("{} is up to date", options.output_file_name()),
        )))
    } else {
        Err(RoutineFailure::error(Message::new(
            "Check".to_string(),
            format!(
                "{} is out of date, run `reef generate` to refresh it",
                options.output_file_name()
            ),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scaffold(root: &Path) {
        let catalog = root.join("Assets.xcassets");
        fs::create_dir_all(catalog.join("logo.imageset")).unwrap();
        fs::create_dir_all(catalog.join("tint.colorset")).unwrap();
        fs::create_dir_all(root.join("en.lproj")).unwrap();
        fs::write(
            root.join("en.lproj/Localizable.strings"),
            "\"menu.title\" = \"Menu\";\n",
        )
        .unwrap();
    }

    fn args(root: &Path, output: &Path) -> GenerateArgs {
        GenerateArgs {
            project_dir: root.to_path_buf(),
            output_path: output.to_path_buf(),
            name: None,
            visibility: None,
            separator: None,
            locale: None,
            framework: None,
            top_level_scope: false,
            case_insensitive: false,
            exclude: vec![],
        }
    }

    #[test]
    fn test_generate_writes_expected_blocks() {
        let dir = tempfile::tempdir().unwrap();
        scaffold(dir.path());
        let output = dir.path().join("Reef.swift");

        let result = generate(&args(dir.path(), &output)).unwrap();
        assert!(result.message.details.contains("wrote"));

        let written = fs::read_to_string(&output).unwrap();
        assert!(written.contains("public enum Reef {"));
        assert!(written.contains("public enum I {"));
        assert!(written.contains("public enum C {"));
        assert!(written.contains("public enum L {"));
        // No fonts, storyboards, or data assets in the scaffold.
        assert!(!written.contains("enum F {"));
        assert!(!written.contains("enum S {"));
        assert!(!written.contains("enum D {"));
    }

    #[test]
    fn test_second_generate_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        scaffold(dir.path());
        let output = dir.path().join("Reef.swift");
        let generate_args = args(dir.path(), &output);

        generate(&generate_args).unwrap();
        let second = generate(&generate_args).unwrap();
        assert!(second.message.details.contains("already up to date"));
    }

    #[test]
    fn test_check_flags_stale_output() {
        let dir = tempfile::tempdir().unwrap();
        scaffold(dir.path());
        let output = dir.path().join("Reef.swift");
        let generate_args = args(dir.path(), &output);

        assert!(check(&generate_args).is_err());
        generate(&generate_args).unwrap();
        assert!(check(&generate_args).is_ok());
    }

    #[test]
    fn test_malformed_strings_table_aborts_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        scaffold(dir.path());
        fs::write(dir.path().join("en.lproj/Broken.strings"), "not a table").unwrap();
        let output = dir.path().join("Reef.swift");

        let error = generate(&args(dir.path(), &output)).unwrap_err();
        assert!(error.error.is_some());
        assert!(!output.exists(), "no partial file may be written");
    }

    #[test]
    fn test_output_path_outside_project() {
        let dir = tempfile::tempdir().unwrap();
        scaffold(dir.path());
        let out_dir = tempfile::tempdir().unwrap();
        let output: PathBuf = out_dir.path().join("R.swift");

        generate(&args(dir.path(), &output)).unwrap();
        assert!(output.exists());
    }
}
