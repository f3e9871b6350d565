//! The closed set of resource categories and their leaf declaration
//! templates, in every supported target framework flavor.

use lazy_static::lazy_static;
use regex::Regex;

use crate::codegen::render::{indent, LeafTemplate, RenderContext};

/// UI framework the generated accessors target. Affects only the textual
/// shape of leaf declarations, never the tree algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    UiKit,
    AppKit,
    SwiftUi,
}

impl Framework {
    pub fn import_statement(&self) -> &'static str {
        match self {
            Framework::UiKit => "import UIKit",
            Framework::AppKit => "import AppKit",
            Framework::SwiftUi => "import SwiftUI",
        }
    }
}

impl std::str::FromStr for Framework {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "uikit" => Ok(Framework::UiKit),
            "appkit" => Ok(Framework::AppKit),
            "swiftui" => Ok(Framework::SwiftUi),
            other => Err(format!(
                "Invalid framework name '{other}'. Valid frameworks are 'uikit', 'appkit', and 'swiftui'"
            )),
        }
    }
}

/// Escapes a value for inclusion in a generated Swift string literal.
fn quoted(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Image leaves render to framework-native image lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData;

impl LeafTemplate for ImageData {
    fn declaration(&self, symbol: &str, source_key: &str, level: usize, ctx: &RenderContext) -> String {
        let pad = indent(level);
        let vis = &ctx.visibility;
        let name = quoted(source_key);
        match ctx.framework {
            Framework::UiKit => format!(
                r#"{pad}{vis} static var {symbol}: UIImage {{ return UIImage(named: "{name}", in: bundle, compatibleWith: nil)! }}"#
            ),
            Framework::AppKit => format!(
                r#"{pad}{vis} static var {symbol}: NSImage {{ return NSImage(named: "{name}")! }}"#
            ),
            Framework::SwiftUi => format!(
                r#"{pad}{vis} static var {symbol}: Image {{ return Image("{name}", bundle: bundle) }}"#
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorData;

impl LeafTemplate for ColorData {
    fn declaration(&self, symbol: &str, source_key: &str, level: usize, ctx: &RenderContext) -> String {
        let pad = indent(level);
        let vis = &ctx.visibility;
        let name = quoted(source_key);
        match ctx.framework {
            Framework::UiKit => format!(
                r#"{pad}{vis} static var {symbol}: UIColor {{ return UIColor(named: "{name}", in: bundle, compatibleWith: nil)! }}"#
            ),
            Framework::AppKit => format!(
                r#"{pad}{vis} static var {symbol}: NSColor {{ return NSColor(named: "{name}", bundle: bundle)! }}"#
            ),
            Framework::SwiftUi => format!(
                r#"{pad}{vis} static var {symbol}: Color {{ return Color("{name}", bundle: bundle) }}"#
            ),
        }
    }
}

/// Opaque data blobs from asset catalogs; identical across frameworks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataAssetData;

impl LeafTemplate for DataAssetData {
    fn declaration(&self, symbol: &str, source_key: &str, level: usize, ctx: &RenderContext) -> String {
        let pad = indent(level);
        let vis = &ctx.visibility;
        let name = quoted(source_key);
        format!(
            r#"{pad}{vis} static var {symbol}: Data {{ return NSDataAsset(name: "{name}", bundle: bundle)!.data }}"#
        )
    }
}

/// Font leaves carry the PostScript name parsed from the font binary; the
/// leaf's own name is the camel-cased method name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontData {
    pub postscript_name: String,
}

impl LeafTemplate for FontData {
    fn declaration(&self, symbol: &str, _source_key: &str, level: usize, ctx: &RenderContext) -> String {
        let pad = indent(level);
        let vis = &ctx.visibility;
        let name = quoted(&self.postscript_name);
        match ctx.framework {
            Framework::UiKit => format!(
                r#"{pad}{vis} static func {symbol}(ofSize size: CGFloat) -> UIFont {{ return UIFont(name: "{name}", size: size)! }}"#
            ),
            Framework::AppKit => format!(
                r#"{pad}{vis} static func {symbol}(ofSize size: CGFloat) -> NSFont {{ return NSFont(name: "{name}", size: size)! }}"#
            ),
            Framework::SwiftUi => format!(
                r#"{pad}{vis} static func {symbol}(ofSize size: CGFloat) -> Font {{ return Font.custom("{name}", size: size) }}"#
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryboardData;

impl LeafTemplate for StoryboardData {
    fn declaration(&self, symbol: &str, source_key: &str, level: usize, ctx: &RenderContext) -> String {
        let pad = indent(level);
        let vis = &ctx.visibility;
        let name = quoted(source_key);
        match ctx.framework {
            Framework::UiKit => format!(
                r#"{pad}{vis} static var {symbol}: UIStoryboard {{ return UIStoryboard(name: "{name}", bundle: bundle) }}"#
            ),
            Framework::AppKit => format!(
                r#"{pad}{vis} static var {symbol}: NSStoryboard {{ return NSStoryboard(name: "{name}", bundle: bundle) }}"#
            ),
            // There are no storyboards in the land of SwiftUI; the category
            // is skipped upstream.
            Framework::SwiftUi => String::new(),
        }
    }
}

/// Swift argument type for one localization format specifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpolationType {
    UInt,
    Int,
    Int64,
    Double,
    String,
}

impl InterpolationType {
    fn from_specifier(specifier: &str) -> Self {
        if specifier.contains("ld") {
            InterpolationType::Int64
        } else if specifier.contains('d') || specifier.contains('i') {
            InterpolationType::Int
        } else if specifier.contains('u') {
            InterpolationType::UInt
        } else if specifier.contains('f') {
            InterpolationType::Double
        } else {
            InterpolationType::String
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            InterpolationType::UInt => "UInt",
            InterpolationType::Int => "Int",
            InterpolationType::Int64 => "Int64",
            InterpolationType::Double => "Double",
            InterpolationType::String => "String",
        }
    }
}

lazy_static! {
    // %d, %i, %u, %f, %ld, %@, positional %1$@, width/precision %05.2f forms.
    static ref FORMAT_SPECIFIER: Regex =
        Regex::new(r"%(?:[0-9]+\$)?[0-9]*(?:\.[0-9]+)?(?:ld|d|i|u|f|@)").unwrap();
}

/// Extracts the typed interpolation sequence from a translation value, in
/// order of appearance.
pub fn interpolation_types(value: &str) -> Vec<InterpolationType> {
    FORMAT_SPECIFIER
        .find_iter(value)
        .map(|m| InterpolationType::from_specifier(m.as_str()))
        .collect()
}

/// Localization leaves carry the source-language translation; the key they
/// were built from is the leaf's `source_key`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizationData {
    pub value: String,
}

impl LeafTemplate for LocalizationData {
    fn declaration(&self, symbol: &str, source_key: &str, level: usize, ctx: &RenderContext) -> String {
        let pad = indent(level);
        let vis = &ctx.visibility;
        let key = quoted(source_key);

        let mut out = String::new();
        for line in self.value.lines() {
            out.push_str(&format!("{pad}/// {line}\n"));
        }

        let interpolations = interpolation_types(&self.value);
        if interpolations.is_empty() {
            out.push_str(&format!(
                r#"{pad}{vis} static var {symbol}: String {{ return NSLocalizedString("{key}", bundle: bundle, comment: "") }}"#
            ));
        } else {
            let arguments = interpolations
                .iter()
                .enumerate()
                .map(|(index, kind)| format!("_ value{}: {}", index + 1, kind.type_name()))
                .collect::<Vec<_>>()
                .join(", ");
            let format_values = (1..=interpolations.len())
                .map(|index| format!("value{index}"))
                .collect::<Vec<_>>()
                .join(", ");
            let inner = indent(level + 1);
            out.push_str(&format!(
                "{pad}{vis} static func {symbol}({arguments}) -> String {{\n\
                 {inner}return String(format: NSLocalizedString(\"{key}\", bundle: bundle, comment: \"\"), {format_values})\n\
                 {pad}}}"
            ));
        }
        out
    }
}
