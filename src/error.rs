//! Error handling for presetter.
//! Defines the fatal error type and result alias used throughout the crate.

use std::io;
use thiserror::Error;

/// Fatal errors raised while rendering a preset.
///
/// Conditions the caller is expected to recover from (missing template folder,
/// missing or malformed config document, unresolved tokens) are not errors;
/// they are reported through [`crate::loader::LoadOutcome`] and the render summary.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// Represents errors raised while walking the template tree
    #[error("Failed to walk template tree: {0}.")]
    WalkError(#[from] walkdir::Error),

    /// A walked entry could not be mapped back onto the template root
    #[error("Path '{path}' is outside of template root '{root}'.")]
    PathError { path: String, root: String },
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Logs the error, prints it to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    log::error!("{err}");
    eprintln!("{err}");
    std::process::exit(1);
}
