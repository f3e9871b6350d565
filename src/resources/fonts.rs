//! Font category: reads the full and PostScript names out of font binaries
//! and generates sized-font factory methods.
//!
//! Name extraction is a minimal SFNT `name`-table reader covering TrueType,
//! CFF (`OTTO`) and TrueType-collection containers. A file that cannot be
//! parsed drops only itself from the output.

use std::fs;
use std::path::PathBuf;

use convert_case::{Case, Casing};
use tracing::warn;

use crate::codegen::render::{render_tree, RenderContext};
use crate::codegen::resolve::{resolve_collisions, ResolveError};
use crate::codegen::sanitize::SanitizePolicy;
use crate::codegen::templates::FontData;
use crate::codegen::tree::{Node, Payload};

const NAME_ID_FULL_NAME: u16 = 4;
const NAME_ID_POSTSCRIPT: u16 = 6;

#[derive(Debug, PartialEq, Eq)]
pub struct FontNames {
    pub full_name: String,
    pub postscript_name: String,
}

fn read_u16(data: &[u8], offset: usize) -> Option<u16> {
    let bytes = data.get(offset..offset + 2)?;
    Some(u16::from_be_bytes([bytes[0], bytes[1]]))
}

fn read_u32(data: &[u8], offset: usize) -> Option<u32> {
    let bytes = data.get(offset..offset + 4)?;
    Some(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

/// Decodes one name record's bytes: UTF-16BE for Windows/Unicode platforms,
/// byte-per-char for the legacy Macintosh platform.
fn decode_name(platform_id: u16, bytes: &[u8]) -> Option<String> {
    match platform_id {
        0 | 3 => {
            let units: Vec<u16> = bytes
                .chunks_exact(2)
                .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                .collect();
            String::from_utf16(&units).ok()
        }
        1 => Some(bytes.iter().map(|&b| b as char).collect()),
        _ => None,
    }
}

fn name_table_entry(data: &[u8], name_table: usize, name_id: u16) -> Option<String> {
    let count = read_u16(data, name_table + 2)? as usize;
    let string_data = name_table + read_u16(data, name_table + 4)? as usize;

    let mut best: Option<(u16, String)> = None;
    for index in 0..count {
        let record = name_table + 6 + index * 12;
        let platform_id = read_u16(data, record)?;
        let record_name_id = read_u16(data, record + 6)?;
        if record_name_id != name_id {
            continue;
        }
        let length = read_u16(data, record + 8)? as usize;
        let offset = read_u16(data, record + 10)? as usize;
        let bytes = data.get(string_data + offset..string_data + offset + length)?;
        let Some(decoded) = decode_name(platform_id, bytes) else {
            continue;
        };
        if decoded.is_empty() {
            continue;
        }
        // Prefer the Windows table when both are present.
        let rank = match platform_id {
            3 => 0,
            0 => 1,
            _ => 2,
        };
        match &best {
            Some((best_rank, _)) if *best_rank <= rank => {}
            _ => best = Some((rank, decoded)),
        }
    }
    best.map(|(_, name)| name)
}

fn parse_font_at(data: &[u8], base: usize) -> Option<FontNames> {
    let num_tables = read_u16(data, base + 4)? as usize;
    for index in 0..num_tables {
        let record = base + 12 + index * 16;
        let tag = data.get(record..record + 4)?;
        if tag != b"name" {
            continue;
        }
        let table_offset = read_u32(data, record + 8)? as usize;
        let full_name = name_table_entry(data, table_offset, NAME_ID_FULL_NAME)?;
        let postscript_name = name_table_entry(data, table_offset, NAME_ID_POSTSCRIPT)?;
        return Some(FontNames {
            full_name,
            postscript_name,
        });
    }
    None
}

/// Extracts the full and PostScript names from a font binary, or `None` when
/// the file is not a parseable font.
pub fn parse_font_names(data: &[u8]) -> Option<FontNames> {
    match read_u32(data, 0)? {
        0x0001_0000 | 0x4F54_544F | 0x7472_7565 => parse_font_at(data, 0),
        // 'ttcf': a collection; take the first font.
        0x7474_6366 => {
            let first = read_u32(data, 12)? as usize;
            parse_font_at(data, first)
        }
        _ => None,
    }
}

/// Camel-cased accessor method name derived from the font's full name.
fn method_name(full_name: &str) -> String {
    full_name.replace(['-', '_'], " ").to_case(Case::Camel)
}

/// Builds the font declaration block. Unparseable font files are skipped
/// with a warning; `None` when nothing parseable was found.
pub fn font_enum_string(
    paths: &[PathBuf],
    top_level_name: &str,
    policy: &SanitizePolicy,
    ctx: &RenderContext,
) -> Result<Option<String>, ResolveError> {
    let mut root: Node<FontData> = Node::namespace(top_level_name);

    for path in paths {
        let names = match fs::read(path) {
            Ok(data) => parse_font_names(&data),
            Err(error) => {
                warn!("Failed to read font file {}: {error}", path.display());
                continue;
            }
        };
        let Some(names) = names else {
            warn!("Skipping unparseable font file {}", path.display());
            continue;
        };

        root.add_relative(
            &[],
            Payload::Leaf {
                name: method_name(&names.full_name),
                source_key: names.postscript_name.clone(),
                data: FontData {
                    postscript_name: names.postscript_name,
                },
            },
        );
    }

    if root.is_empty() {
        return Ok(None);
    }

    resolve_collisions(&mut root, policy)?;
    root.sort();
    Ok(Some(render_tree(&root, ctx, false)))
}
