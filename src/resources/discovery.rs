//! Walks the project directory and classifies resource files per category.
//!
//! This is the external collaborator of the codegen core: by the time the
//! builders run, discovery has completed and handed over plain path lists.

use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use tracing::debug;
use walkdir::WalkDir;

pub const ASSET_CATALOG_EXTENSION: &str = "xcassets";

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DiscoveryError {
    #[error("Failed to walk the project directory")]
    Walk(#[from] walkdir::Error),
    #[error("Invalid exclude pattern")]
    Pattern(#[from] globset::Error),
}

/// Discovered resource locations, one list per category.
#[derive(Debug, Default)]
pub struct ResourcePaths {
    pub asset_catalogs: Vec<PathBuf>,
    pub fonts: Vec<PathBuf>,
    pub localizations: Vec<PathBuf>,
    pub storyboards: Vec<PathBuf>,
}

/// Compiles the `--exclude` globs into one matcher.
pub fn build_exclude_set(patterns: &[String]) -> Result<GlobSet, globset::Error> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    builder.build()
}

/// Scans `root`, classifying by extension. Localization tables inside a
/// `.lproj` container are kept only for the requested locale. Asset catalogs
/// are collected as whole directories; their contents are walked later by
/// the asset builders.
pub fn discover(root: &Path, locale: &str, exclude: &GlobSet) -> Result<ResourcePaths, DiscoveryError> {
    let mut paths = ResourcePaths::default();
    let locale_container = format!("{locale}.lproj");

    let mut walker = WalkDir::new(root).into_iter();
    while let Some(entry) = walker.next() {
        let entry = entry?;
        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(path);

        if !relative.as_os_str().is_empty() && exclude.is_match(relative) {
            debug!("Excluding {}", path.display());
            if entry.file_type().is_dir() {
                walker.skip_current_dir();
            }
            continue;
        }

        if entry.file_type().is_dir() {
            if has_extension(path, ASSET_CATALOG_EXTENSION) {
                paths.asset_catalogs.push(path.to_path_buf());
                walker.skip_current_dir();
            }
            continue;
        }

        match path.extension().and_then(|e| e.to_str()) {
            Some("ttf") | Some("otf") => paths.fonts.push(path.to_path_buf()),
            Some("storyboard") => paths.storyboards.push(path.to_path_buf()),
            Some("strings") | Some("xcstrings") => {
                if matches_locale(relative, &locale_container) {
                    paths.localizations.push(path.to_path_buf());
                } else {
                    debug!("Skipping localization table for other locale: {}", path.display());
                }
            }
            _ => {}
        }
    }

    paths.asset_catalogs.sort();
    paths.fonts.sort();
    paths.localizations.sort();
    paths.storyboards.sort();
    Ok(paths)
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(extension)
}

/// A table outside any `.lproj` container always matches; inside one, the
/// container must belong to the requested locale.
fn matches_locale(relative: &Path, locale_container: &str) -> bool {
    let mut in_lproj = false;
    for component in relative.components() {
        let name = component.as_os_str().to_string_lossy();
        if name.ends_with(".lproj") {
            in_lproj = true;
            if name == locale_container {
                return true;
            }
        }
    }
    !in_lproj
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn test_discover_classifies_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("Assets.xcassets/logo.imageset")).unwrap();
        touch(&root.join("Fonts/Custom.ttf"));
        touch(&root.join("Base.lproj/Main.storyboard"));
        touch(&root.join("en.lproj/Localizable.strings"));
        touch(&root.join("de.lproj/Localizable.strings"));
        touch(&root.join("Catalog.xcstrings"));
        touch(&root.join("notes.txt"));

        let exclude = build_exclude_set(&[]).unwrap();
        let paths = discover(root, "en", &exclude).unwrap();

        assert_eq!(paths.asset_catalogs, vec![root.join("Assets.xcassets")]);
        assert_eq!(paths.fonts, vec![root.join("Fonts/Custom.ttf")]);
        assert_eq!(paths.storyboards, vec![root.join("Base.lproj/Main.storyboard")]);
        assert_eq!(
            paths.localizations,
            vec![root.join("Catalog.xcstrings"), root.join("en.lproj/Localizable.strings")]
        );
    }

    #[test]
    fn test_discover_does_not_descend_into_catalogs() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        // A .strings file inside a catalog belongs to the catalog, not to
        // the localization category.
        touch(&root.join("Assets.xcassets/stray.strings"));

        let exclude = build_exclude_set(&[]).unwrap();
        let paths = discover(root, "en", &exclude).unwrap();
        assert_eq!(paths.asset_catalogs.len(), 1);
        assert!(paths.localizations.is_empty());
    }

    #[test]
    fn test_exclude_globs_filter_paths() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("Fonts/Keep.ttf"));
        touch(&root.join("Vendor/Drop.ttf"));

        let exclude = build_exclude_set(&["Vendor/**".to_string()]).unwrap();
        let paths = discover(root, "en", &exclude).unwrap();
        assert_eq!(paths.fonts, vec![root.join("Fonts/Keep.ttf")]);
    }
}
