//! Storyboard category: one accessor per storyboard file name. Storyboards
//! do not nest, and SwiftUI targets have none at all.

use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::codegen::render::{render_tree, RenderContext};
use crate::codegen::resolve::{resolve_collisions, ResolveError};
use crate::codegen::sanitize::SanitizePolicy;
use crate::codegen::templates::{Framework, StoryboardData};
use crate::codegen::tokenize::file_stem;
use crate::codegen::tree::{Node, Payload};

/// Builds the storyboard declaration block, or `None` for SwiftUI targets
/// and projects without storyboards.
pub fn storyboard_enum_string(
    paths: &[PathBuf],
    top_level_name: &str,
    policy: &SanitizePolicy,
    ctx: &RenderContext,
) -> Result<Option<String>, ResolveError> {
    if ctx.framework == Framework::SwiftUi {
        return Ok(None);
    }

    // The same storyboard shows up once per localized variant; dedupe by
    // file name.
    let names: BTreeSet<String> = paths
        .iter()
        .filter_map(|path| path.file_name().map(|n| n.to_string_lossy().into_owned()))
        .map(|name| file_stem(&name))
        .filter(|stem| !stem.is_empty())
        .collect();

    if names.is_empty() {
        return Ok(None);
    }

    let mut root: Node<StoryboardData> = Node::namespace(top_level_name);
    for name in names {
        root.add_relative(
            &[],
            Payload::Leaf {
                source_key: name.clone(),
                name,
                data: StoryboardData,
            },
        );
    }

    resolve_collisions(&mut root, policy)?;
    root.sort();
    Ok(Some(render_tree(&root, ctx, false)))
}
