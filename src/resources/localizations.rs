//! Localization category: `.strings` tables and `.xcstrings` string
//! catalogs become a tree of namespaced accessors keyed by the configured
//! separator.
//!
//! Unlike the per-leaf recovery elsewhere, a malformed table aborts the
//! whole run: a half-interpreted catalog would silently drop translations.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::codegen::render::{render_tree, RenderContext};
use crate::codegen::resolve::{resolve_collisions, ResolveError};
use crate::codegen::sanitize::SanitizePolicy;
use crate::codegen::templates::LocalizationData;
use crate::codegen::tokenize::split_key;
use crate::codegen::tree::{Node, Payload};

#[derive(Debug, thiserror::Error)]
#[error("Failed to build localization declarations")]
#[non_exhaustive]
pub enum LocalizationError {
    #[error("Invalid .strings file at {path}: {source}")]
    InvalidStringsFile {
        path: PathBuf,
        source: StringsSyntaxError,
    },
    #[error("Invalid string catalog at {path}: {source}")]
    InvalidStringCatalog {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Failed to read localization table at {path}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Resolve(#[from] ResolveError),
}

#[derive(Debug, thiserror::Error)]
#[error("{message} at byte {offset}")]
pub struct StringsSyntaxError {
    message: String,
    offset: usize,
}

/// Parses old-style `.strings` content: `"key" = "value";` entries with
/// `//` and `/* */` comments and backslash escapes. Pairs come back in file
/// order.
pub fn parse_strings(content: &str) -> Result<Vec<(String, String)>, StringsSyntaxError> {
    let mut parser = StringsParser {
        chars: content.char_indices().peekable(),
        len: content.len(),
    };
    parser.parse()
}

struct StringsParser<'a> {
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    len: usize,
}

impl StringsParser<'_> {
    fn parse(&mut self) -> Result<Vec<(String, String)>, StringsSyntaxError> {
        let mut pairs = Vec::new();
        loop {
            self.skip_trivia()?;
            if self.chars.peek().is_none() {
                return Ok(pairs);
            }
            let key = self.quoted_string()?;
            self.skip_trivia()?;
            self.expect('=')?;
            self.skip_trivia()?;
            let value = self.quoted_string()?;
            self.skip_trivia()?;
            self.expect(';')?;
            pairs.push((key, value));
        }
    }

    fn error(&mut self, message: impl Into<String>) -> StringsSyntaxError {
        let offset = self.chars.peek().map(|(i, _)| *i).unwrap_or(self.len);
        StringsSyntaxError {
            message: message.into(),
            offset,
        }
    }

    fn skip_trivia(&mut self) -> Result<(), StringsSyntaxError> {
        loop {
            match self.chars.peek() {
                Some((_, c)) if c.is_whitespace() => {
                    self.chars.next();
                }
                Some((_, '/')) => {
                    let mut lookahead = self.chars.clone();
                    lookahead.next();
                    match lookahead.peek() {
                        Some((_, '/')) => {
                            while let Some((_, c)) = self.chars.next() {
                                if c == '\n' {
                                    break;
                                }
                            }
                        }
                        Some((_, '*')) => {
                            self.chars.next();
                            self.chars.next();
                            let mut previous = '\0';
                            loop {
                                match self.chars.next() {
                                    Some((_, c)) => {
                                        if previous == '*' && c == '/' {
                                            break;
                                        }
                                        previous = c;
                                    }
                                    None => return Err(self.error("Unterminated comment")),
                                }
                            }
                        }
                        _ => return Ok(()),
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), StringsSyntaxError> {
        match self.chars.next() {
            Some((_, c)) if c == expected => Ok(()),
            Some((offset, c)) => Err(StringsSyntaxError {
                message: format!("Expected '{expected}', found '{c}'"),
                offset,
            }),
            None => Err(self.error(format!("Expected '{expected}', found end of file"))),
        }
    }

    fn quoted_string(&mut self) -> Result<String, StringsSyntaxError> {
        self.expect('"')?;
        let mut out = String::new();
        loop {
            match self.chars.next() {
                Some((_, '"')) => return Ok(out),
                Some((_, '\\')) => match self.chars.next() {
                    Some((_, 'n')) => out.push('\n'),
                    Some((_, 't')) => out.push('\t'),
                    Some((_, 'r')) => out.push('\r'),
                    Some((_, c)) => out.push(c),
                    None => return Err(self.error("Unterminated escape sequence")),
                },
                Some((_, c)) => out.push(c),
                None => return Err(self.error("Unterminated string literal")),
            }
        }
    }
}

/// `.xcstrings` string-catalog model, the subset generation needs. BTreeMap
/// keys keep duplicate-key resolution order deterministic.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StringCatalog {
    source_language: String,
    strings: BTreeMap<String, StringCatalogEntry>,
}

#[derive(Debug, Deserialize)]
struct StringCatalogEntry {
    localizations: Option<BTreeMap<String, Localization>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Localization {
    string_unit: Option<StringUnit>,
}

#[derive(Debug, Deserialize)]
struct StringUnit {
    value: String,
}

/// Key/value terms from one table, in deterministic order. Keys missing a
/// source-language value fall back to the key itself.
fn read_terms(path: &Path) -> Result<Vec<(String, String)>, LocalizationError> {
    let raw = fs::read_to_string(path).map_err(|source| LocalizationError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if path.extension().and_then(|e| e.to_str()) == Some("xcstrings") {
        let catalog: StringCatalog =
            serde_json::from_str(&raw).map_err(|source| LocalizationError::InvalidStringCatalog {
                path: path.to_path_buf(),
                source,
            })?;
        let terms = catalog
            .strings
            .into_iter()
            .map(|(key, entry)| {
                let value = entry
                    .localizations
                    .and_then(|mut locales| locales.remove(&catalog.source_language))
                    .and_then(|localization| localization.string_unit)
                    .map(|unit| unit.value)
                    .unwrap_or_else(|| key.clone());
                (key, value)
            })
            .collect();
        Ok(terms)
    } else {
        parse_strings(&raw).map_err(|source| LocalizationError::InvalidStringsFile {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Builds the localization declaration block across all discovered tables.
/// `None` when no table contributes a term.
pub fn localization_enum_string(
    paths: &[PathBuf],
    top_level_name: &str,
    separator: char,
    policy: &SanitizePolicy,
    ctx: &RenderContext,
) -> Result<Option<String>, LocalizationError> {
    let mut root: Node<LocalizationData> = Node::namespace(top_level_name);

    for path in paths {
        for (key, value) in read_terms(path)? {
            let mut parts = split_key(&key, separator);
            let Some(leaf_name) = parts.pop() else {
                debug!("Skipping empty localization key {key:?} in {}", path.display());
                continue;
            };
            root.add_relative(
                &parts,
                Payload::Leaf {
                    name: leaf_name,
                    source_key: key,
                    data: LocalizationData { value },
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
