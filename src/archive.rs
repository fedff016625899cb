//! Archival of previously generated presets.
//! An existing preset folder is renamed aside before a new one is rendered.

use crate::constants::ARCHIVE_TIMESTAMP_FORMAT;
use crate::error::Result;
use chrono::{DateTime, Local, TimeZone};
use log::info;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Builds the archive path for `path` at `timestamp`: `<path><YYYYMMDD-HHmmss>`.
///
/// When that name is already taken a `-1`, `-2`, ... suffix is appended.
pub fn archive_path<Tz: TimeZone>(path: &Path, timestamp: &DateTime<Tz>) -> PathBuf
where
    Tz::Offset: std::fmt::Display,
{
    let stamp = timestamp.format(ARCHIVE_TIMESTAMP_FORMAT).to_string();
    let with_suffix = |suffix: &str| {
        let mut name = OsString::from(path.as_os_str());
        name.push(&stamp);
        name.push(suffix);
        PathBuf::from(name)
    };

    let mut candidate = with_suffix("");
    let mut counter = 0;
    while candidate.exists() {
        counter += 1;
        candidate = with_suffix(&format!("-{counter}"));
    }
    candidate
}

/// Renames `path` aside if it exists.
///
/// # Returns
/// * `Ok(Some(archive))` - Where the previous tree now lives
/// * `Ok(None)` - Nothing existed at `path`
///
/// # Errors
/// * `Error::IoError` if the rename fails
pub fn archive_existing<P: AsRef<Path>>(path: P) -> Result<Option<PathBuf>> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(None);
    }

    let archive = archive_path(path, &Local::now());
    fs::rename(path, &archive)?;
    info!("Archived '{}' to '{}'.", path.display(), archive.display());
    Ok(Some(archive))
}
