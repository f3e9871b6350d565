//! # Resources
//! Discovery of resource files inside the project directory and the
//! per-category builders that turn them into declaration blocks. Each
//! builder owns its parsing quirks; the tree pipeline they feed is shared
//! (see [`crate::codegen`]).

pub mod assets;
pub mod discovery;
pub mod fonts;
pub mod localizations;
pub mod storyboards;
