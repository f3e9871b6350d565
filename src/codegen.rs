//! # Codegen
//! The shared accessor-generation core: every resource category feeds raw
//! identifiers (file paths or dotted localization keys) through the same
//! pipeline of tokenize → build trie → resolve collisions → sort → render.
//! The per-category differences are confined to the leaf payloads and their
//! declaration templates.

pub mod file;
pub mod render;
pub mod resolve;
pub mod sanitize;
pub mod templates;
pub mod tokenize;
pub mod tree;
