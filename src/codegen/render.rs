//! Declaration rendering: depth-first pre-order walk of a sorted,
//! collision-free tree. Namespaces all share one template; leaves defer to
//! the category's [`LeafTemplate`] implementation.

use std::fmt::Write;

use crate::codegen::templates::Framework;
use crate::codegen::tree::{Node, Payload};

/// Spaces per indentation level in the generated file.
pub const INDENT_WIDTH: usize = 4;

/// Everything a leaf template needs besides the leaf itself.
#[derive(Debug, Clone)]
pub struct RenderContext {
    /// Access-level keyword prepended to generated declarations.
    pub visibility: String,
    pub framework: Framework,
}

/// Per-category declaration text for one leaf.
pub trait LeafTemplate {
    fn declaration(
        &self,
        symbol: &str,
        source_key: &str,
        indent_level: usize,
        ctx: &RenderContext,
    ) -> String;
}

pub fn indent(level: usize) -> String {
    " ".repeat(level * INDENT_WIDTH)
}

/// Prefixes every line of `text` with `level` indentation levels.
pub fn indented(text: &str, level: usize) -> String {
    let prefix = indent(level);
    text.lines()
        .map(|line| {
            if line.is_empty() {
                line.to_string()
            } else {
                format!("{prefix}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders the tree rooted at `root`.
///
/// With `flatten_top_level` the synthetic root namespace is omitted and its
/// children render at indent level 0; otherwise the root renders as a
/// namespace like any other.
pub fn render_tree<T: LeafTemplate>(
    root: &Node<T>,
    ctx: &RenderContext,
    flatten_top_level: bool,
) -> String {
    if flatten_top_level {
        root.children
            .iter()
            .map(|child| render_node(child, 0, ctx))
            .collect::<Vec<_>>()
            .join("\n")
    } else {
        render_node(root, 0, ctx)
    }
}

fn render_node<T: LeafTemplate>(node: &Node<T>, level: usize, ctx: &RenderContext) -> String {
    match &node.payload {
        Payload::Namespace { .. } => {
            let body = node
                .children
                .iter()
                .map(|child| render_node(child, level + 1, ctx))
                .collect::<Vec<_>>()
                .join("\n");
            let mut out = String::new();
            let pad = indent(level);
            let _ = write!(
                out,
                "{pad}{vis} enum {sym} {{\n{body}\n{pad}}}",
                vis = ctx.visibility,
                sym = node.symbol()
            );
            out
        }
        Payload::Leaf {
            source_key, data, ..
        } => data.declaration(&node.symbol(), source_key, level, ctx),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::tree::Payload;

    struct Stub;

    impl LeafTemplate for Stub {
        fn declaration(
            &self,
            symbol: &str,
            source_key: &str,
            indent_level: usize,
            ctx: &RenderContext,
        ) -> String {
            format!(
                "{}{} leaf {symbol} -> {source_key}",
                indent(indent_level),
                ctx.visibility
            )
        }
    }

    fn ctx() -> RenderContext {
        RenderContext {
            visibility: "public".to_string(),
            framework: Framework::UiKit,
        }
    }

    fn sample_tree() -> Node<Stub> {
        let mut root = Node::namespace("R");
        root.add_relative(
            &["Buttons".to_string()],
            Payload::Leaf {
                name: "primary".into(),
                source_key: "primary".into(),
                data: Stub,
            },
        );
        root.add_relative(
            &[],
            Payload::Leaf {
                name: "logo".into(),
                source_key: "logo".into(),
                data: Stub,
            },
        );
        root.sort();
        root
    }

    #[test]
    fn test_nested_rendering_indents_by_depth() {
        let rendered = render_tree(&sample_tree(), &ctx(), false);
        let expected = "\
public enum R {
    public enum Buttons {
        public leaf primary -> primary
    }
    public leaf logo -> logo
}";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_flatten_top_level_renders_children_at_zero() {
        let rendered = render_tree(&sample_tree(), &ctx(), true);
        let expected = "\
public enum Buttons {
    public leaf primary -> primary
}
public leaf logo -> logo";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_indented_skips_blank_lines() {
        assert_eq!(indented("a\n\nb", 1), "    a\n\n    b");
    }
}
