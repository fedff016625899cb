//! presetter renders a server configuration preset from a tree of templates.
//! Tokens of the form `[$name]` are replaced with values from a config
//! document or, optionally, environment variables. A previously generated
//! preset is archived before the new one is written.

/// Archival of an existing preset folder
pub mod archive;

/// Command-line interface module for the presetter binary
pub mod cli;

/// Config document loading
/// Supports JSON and YAML formats (chosen by file extension)
pub mod config;

/// Common constants
pub mod constants;

/// Error types and handling
pub mod error;

/// Preset loading orchestration
pub mod loader;

/// Logger initialization for the binary
pub mod logger;

/// Token resolution against config and environment
pub mod resolver;

/// Template tree rendering
pub mod renderer;
