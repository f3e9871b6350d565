//! Splits raw identifiers into the component sequences the tree builder
//! consumes.
//!
//! Two shapes exist: dotted keys (localizations, configurable separator) and
//! file paths (everything else). Path tokenization strips the leaf's file
//! extension and consults a per-directory predicate to decide whether an
//! intermediate directory contributes a namespace level or is transparent —
//! asset catalogs mark this with a `provides-namespace` flag in the
//! directory's side file.

use std::path::{Component, Path};

/// Per-directory predicate: does this intermediate directory provide a
/// namespace level? Receives the absolute path of the directory in question.
pub type NamespaceDecider<'a> = &'a dyn Fn(&Path) -> bool;

/// Always-namespacing decider for categories without side files.
pub fn always_namespace(_dir: &Path) -> bool {
    true
}

/// Splits a dotted key on `separator`, dropping empty components.
///
/// A key that yields no components is malformed but must not crash
/// generation; callers skip the record when this returns an empty vector.
pub fn split_key(raw: &str, separator: char) -> Vec<String> {
    raw.split(separator)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// Tokenizes the path of one asset relative to its catalog root.
///
/// Returns the namespace components (intermediate directories the decider
/// accepts) and the leaf name with its extension stripped. `None` when the
/// asset sits nowhere below the root or has no usable final component.
pub fn split_resource_path(
    catalog_root: &Path,
    resource_path: &Path,
    decider: NamespaceDecider<'_>,
) -> Option<(Vec<String>, String)> {
    let relative = resource_path.strip_prefix(catalog_root).ok()?;

    let mut components: Vec<String> = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => components.push(part.to_string_lossy().into_owned()),
            _ => return None,
        }
    }

    let last = components.pop()?;
    let leaf = file_stem(&last);
    if leaf.is_empty() {
        return None;
    }

    let mut namespaces = Vec::new();
    let mut current = catalog_root.to_path_buf();
    for part in components {
        current.push(&part);
        if decider(&current) {
            namespaces.push(file_stem(&part));
        }
    }

    Some((namespaces, leaf))
}

/// The final path component without its extension. Leading dots are kept, so
/// a dotfile's stem is the whole name.
pub fn file_stem(name: &str) -> String {
    Path::new(name)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_split_key_drops_empty_components() {
        assert_eq!(split_key("menu.items.title", '.'), vec!["menu", "items", "title"]);
        assert_eq!(split_key(".menu..title.", '.'), vec!["menu", "title"]);
        assert_eq!(split_key("...", '.'), Vec::<String>::new());
        assert_eq!(split_key("", '.'), Vec::<String>::new());
    }

    #[test]
    fn test_split_key_custom_separator() {
        assert_eq!(split_key("a/b/c", '/'), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_split_resource_path_strips_extension() {
        let root = PathBuf::from("/proj/Assets.xcassets");
        let asset = root.join("Buttons/primary.imageset");
        let (namespaces, leaf) =
            split_resource_path(&root, &asset, &always_namespace).unwrap();
        assert_eq!(namespaces, vec!["Buttons"]);
        assert_eq!(leaf, "primary");
    }

    #[test]
    fn test_split_resource_path_elides_transparent_directories() {
        let root = PathBuf::from("/proj/Assets.xcassets");
        let asset = root.join("Grouping/Icons/ok.imageset");
        let only_icons = |dir: &Path| dir.file_name().is_some_and(|n| n == "Icons");
        let (namespaces, leaf) = split_resource_path(&root, &asset, &only_icons).unwrap();
        assert_eq!(namespaces, vec!["Icons"]);
        assert_eq!(leaf, "ok");
    }

    #[test]
    fn test_split_resource_path_outside_root_is_rejected() {
        let root = PathBuf::from("/proj/Assets.xcassets");
        let stray = PathBuf::from("/elsewhere/ok.imageset");
        assert!(split_resource_path(&root, &stray, &always_namespace).is_none());
    }

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem("primary.imageset"), "primary");
        assert_eq!(file_stem("archive.tar.gz"), "archive.tar");
        assert_eq!(file_stem("noext"), "noext");
    }
}
