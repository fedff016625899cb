//! Common constants used throughout presetter.

/// Default name of the template folder under the base directory
pub const TEMPLATES_DIR: &str = "templates";

/// Name of the generated preset folder under the base directory
pub const PRESETS_DIR: &str = "presets";

/// Default name of the config document inside the template folder
pub const CONFIG_FILE: &str = "template_cfg.json";

/// Suffix format appended to an archived preset folder
pub const ARCHIVE_TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

/// Placeholder syntax: `[$identifier]`
pub const TOKEN_PATTERN: &str = r"(?i)\[\$([a-z0-9_-]+)\]";

/// Line terminators recognised in template files
pub const LINE_BREAK_PATTERN: &str = "\r\n|\n|\r";

/// Newline written after every rendered line
#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";
