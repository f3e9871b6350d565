pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const CONFIG_FILE_STEM: &str = "reef";

pub const DEFAULT_TOP_LEVEL_NAME: &str = "Reef";
pub const DEFAULT_VISIBILITY: &str = "public";

/// Top-level symbols of the per-category enums, in emission order.
pub const IMAGES_ENUM_NAME: &str = "I";
pub const COLORS_ENUM_NAME: &str = "C";
pub const FONTS_ENUM_NAME: &str = "F";
pub const LOCALIZATIONS_ENUM_NAME: &str = "L";
pub const STORYBOARDS_ENUM_NAME: &str = "S";
pub const DATA_ASSETS_ENUM_NAME: &str = "D";
