//! Assembles the final generated file: header, framework import, bundle
//! accessor, and the per-category declaration blocks wrapped in (or freed
//! from) the top-level namespace.

use itertools::Itertools;

use crate::codegen::render::indented;
use crate::codegen::templates::Framework;

const BUNDLE_ACCESSOR: &str = "\
private let bundle: Bundle = {
    class Custom {}
    return Bundle(for: Custom.self)
}()";

/// Textual layout decisions for the emitted file.
#[derive(Debug, Clone)]
pub struct FileLayout {
    /// File name echoed in the header comment.
    pub output_file_name: String,
    pub top_level_name: String,
    pub visibility: String,
    /// Declare category enums at the top level instead of nesting them.
    pub top_level_scope: bool,
    pub framework: Framework,
}

/// Joins the non-empty category blocks, nesting them inside the top-level
/// enum unless the layout asks for top-level scope.
pub fn resource_declarations(category_strings: &[Option<String>], layout: &FileLayout) -> String {
    let level = usize::from(!layout.top_level_scope);
    let joined = category_strings
        .iter()
        .flatten()
        .map(|block| indented(block, level))
        .join("\n\n");

    if layout.top_level_scope {
        joined
    } else {
        format!(
            "{vis} enum {name} {{\n{joined}\n}}",
            vis = layout.visibility,
            name = layout.top_level_name
        )
    }
}

/// The complete output file for the given declaration body.
pub fn file_contents(declarations: &str, layout: &FileLayout) -> String {
    format!(
        "\
// {file_name}
// Generated by reef

{import}

// swiftlint:disable all
// swiftformat:disable all
{BUNDLE_ACCESSOR}

{declarations}
",
        file_name = layout.output_file_name,
        import = layout.framework.import_statement(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(top_level_scope: bool) -> FileLayout {
        FileLayout {
            output_file_name: "Reef.swift".to_string(),
            top_level_name: "Reef".to_string(),
            visibility: "public".to_string(),
            top_level_scope,
            framework: Framework::UiKit,
        }
    }

    #[test]
    fn test_nested_declarations_are_wrapped_and_indented() {
        let blocks = vec![
            Some("public enum I {\n}".to_string()),
            None,
            Some("public enum L {\n}".to_string()),
        ];
        let declarations = resource_declarations(&blocks, &layout(false));
        assert_eq!(
            declarations,
            "public enum Reef {\n    public enum I {\n    }\n\n    public enum L {\n    }\n}"
        );
    }

    #[test]
    fn test_top_level_scope_omits_wrapper() {
        let blocks = vec![Some("public enum I {\n}".to_string())];
        let declarations = resource_declarations(&blocks, &layout(true));
        assert_eq!(declarations, "public enum I {\n}");
    }

    #[test]
    fn test_file_contents_carries_header_import_and_bundle() {
        let contents = file_contents("public enum Reef {\n}", &layout(false));
        assert!(contents.starts_with("// Reef.swift\n// Generated by reef\n"));
        assert!(contents.contains("import UIKit"));
        assert!(contents.contains("// swiftlint:disable all"));
        assert!(contents.contains("private let bundle: Bundle"));
        assert!(contents.ends_with("public enum Reef {\n}\n"));
    }
}
