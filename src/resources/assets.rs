//! Asset-catalog categories: images, colors, and opaque data blobs.
//!
//! One generic builder walks the discovered catalogs for directories with
//! the category's extension, tokenizes their paths against the catalog
//! root, and runs the shared tree pipeline. Whether an intermediate folder
//! contributes a namespace is decided by the `provides-namespace` flag in
//! its `Contents.json` side file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;
use walkdir::WalkDir;

use crate::codegen::render::{render_tree, LeafTemplate, RenderContext};
use crate::codegen::resolve::{resolve_collisions, ResolveError};
use crate::codegen::sanitize::SanitizePolicy;
use crate::codegen::templates::{ColorData, DataAssetData, ImageData};
use crate::codegen::tokenize::split_resource_path;
use crate::codegen::tree::{Node, Payload};

#[derive(Debug, thiserror::Error)]
#[error("Failed to build asset declarations")]
#[non_exhaustive]
pub enum AssetError {
    #[error("Failed to walk asset catalog")]
    Walk(#[from] walkdir::Error),
    Resolve(#[from] ResolveError),
}

/// One asset-catalog-backed category: the directory extension that marks a
/// resource of this kind, and the leaf payload it carries.
pub trait AssetCategory {
    type Data: LeafTemplate;
    const EXTENSION: &'static str;

    fn data() -> Self::Data;
}

pub struct ImageCategory;

impl AssetCategory for ImageCategory {
    type Data = ImageData;
    const EXTENSION: &'static str = "imageset";

    fn data() -> ImageData {
        ImageData
    }
}

pub struct ColorCategory;

impl AssetCategory for ColorCategory {
    type Data = ColorData;
    const EXTENSION: &'static str = "colorset";

    fn data() -> ColorData {
        ColorData
    }
}

pub struct DataAssetCategory;

impl AssetCategory for DataAssetCategory {
    type Data = DataAssetData;
    const EXTENSION: &'static str = "dataset";

    fn data() -> DataAssetData {
        DataAssetData
    }
}

#[derive(Deserialize, Default)]
struct ContentsFile {
    #[serde(default)]
    properties: ContentsProperties,
}

#[derive(Deserialize, Default)]
struct ContentsProperties {
    #[serde(rename = "provides-namespace", default)]
    provides_namespace: bool,
}

/// True when the folder's `Contents.json` opts into namespacing. Missing or
/// malformed side files mean the folder is transparent, matching Xcode.
pub fn provides_namespace(dir: &Path) -> bool {
    let side_file = dir.join("Contents.json");
    let Ok(raw) = fs::read_to_string(&side_file) else {
        return false;
    };
    match serde_json::from_str::<ContentsFile>(&raw) {
        Ok(contents) => contents.properties.provides_namespace,
        Err(error) => {
            debug!("Ignoring malformed {}: {error}", side_file.display());
            false
        }
    }
}

/// Builds the declaration block for one category across all discovered
/// catalogs. `None` when no resource of this kind exists.
pub fn asset_enum_string<C: AssetCategory>(
    catalogs: &[PathBuf],
    top_level_name: &str,
    policy: &SanitizePolicy,
    ctx: &RenderContext,
) -> Result<Option<String>, AssetError> {
    let mut root: Node<C::Data> = Node::namespace(top_level_name);

    for catalog in catalogs {
        for entry in WalkDir::new(catalog).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_dir() {
                continue;
            }
            let is_asset = entry
                .path()
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e == C::EXTENSION)
                .unwrap_or(false);
            if !is_asset {
                continue;
            }

            let Some((namespaces, leaf_name)) =
                split_resource_path(catalog, entry.path(), &provides_namespace)
            else {
                debug!("Skipping degenerate asset path {}", entry.path().display());
                continue;
            };
            // Namespacing folders become part of the runtime lookup key.
            let source_key = namespaces
                .iter()
                .map(String::as_str)
                .chain([leaf_name.as_str()])
                .collect::<Vec<_>>()
                .join("/");
            root.add_relative(
                &namespaces,
                Payload::Leaf {
                    source_key,
                    name: leaf_name,
                    data: C::data(),
                },
            );
        }
    }

    if root.is_empty() {
        return Ok(None);
    }

    resolve_collisions(&mut root, policy)?;
    root.sort();
    Ok(Some(render_tree(&root, ctx, false)))
}
