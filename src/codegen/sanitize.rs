//! Symbol sanitization for generated Swift declarations.
//!
//! `sanitize` is pure and idempotent: feeding its output back in returns the
//! same string. Collision detection elsewhere compares symbols through
//! [`SanitizePolicy::collision_key`], so case sensitivity is a single
//! configuration decision instead of varying per category.

use lazy_static::lazy_static;
use std::collections::HashSet;

lazy_static! {
    static ref SWIFT_KEYWORDS: HashSet<&'static str> = HashSet::from_iter([
        "associatedtype", "class", "deinit", "enum", "extension", "fileprivate", "func",
        "import", "init", "inout", "internal", "let", "open", "operator", "private",
        "protocol", "public", "static", "struct", "subscript", "typealias", "var", "break",
        "case", "continue", "default", "defer", "do", "else", "fallthrough", "for", "guard",
        "if", "in", "repeat", "return", "switch", "where", "while", "Any", "catch", "false",
        "is", "nil", "rethrows", "super", "self", "Self", "throw", "throws", "true", "try",
        "associativity", "convenience", "dynamic", "didSet", "final", "get", "infix",
        "indirect", "lazy", "left", "mutating", "none", "nonmutating", "optional",
        "override", "postfix", "precedence", "prefix", "Protocol", "required", "right",
        "set", "Type", "unowned", "weak", "willSet", "some", "__COLUMN__", "__FILE__",
        "__FUNCTION__", "__LINE__",
    ]);
}

/// How symbols are compared when looking for sibling collisions.
#[derive(Debug, Clone, Copy, Default)]
pub struct SanitizePolicy {
    /// Treat `Icons` and `icons` as the same symbol for collision purposes.
    pub case_insensitive: bool,
}

impl SanitizePolicy {
    pub fn collision_key(&self, symbol: &str) -> String {
        if self.case_insensitive {
            symbol.to_lowercase()
        } else {
            symbol.to_string()
        }
    }
}

/// Rewrites a raw component into a valid Swift identifier.
///
/// Hyphens become underscores, characters that are not alphanumeric or an
/// underscore are stripped, and a leading digit or a reserved keyword gets an
/// underscore prefix. Empty input maps to empty output; the collision
/// resolver pads degenerate empty symbols against their siblings.
pub fn sanitize(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let stripped: String = raw
        .chars()
        .map(|c| if c == '-' { '_' } else { c })
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect();

    let first_forbidden = match stripped.chars().next() {
        Some(c) => !(c.is_alphabetic() || c == '_'),
        None => false,
    };

    if first_forbidden || SWIFT_KEYWORDS.contains(stripped.as_str()) {
        format!("_{stripped}")
    } else {
        stripped
    }
}
