//! Config document handling for preset templates.
//! Loads the flat key/value document that provides token values.

use indexmap::IndexMap;
use log::{debug, warn};
use serde::Deserialize;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Parser failure for a config document.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Reasons a config document could not be turned into a [`ConfigMap`].
///
/// Every variant aborts the render without being fatal.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The document does not exist
    #[error("config document '{}' not found", path.display())]
    Missing { path: PathBuf },

    /// The document exists but could not be read
    #[error("config document '{}' could not be read: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The document is not a flat mapping of strings
    #[error("config document '{}' is malformed: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
}

/// Shape accepted on disk: a flat mapping of strings to strings or null.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
struct RawConfig(IndexMap<String, Option<String>>);

/// Token values loaded from the config document.
///
/// Keys are stored lowercase so lookups ignore case. A `null` value is kept
/// as an empty string: the key is present but carries no value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigMap {
    values: IndexMap<String, String>,
}

impl ConfigMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up `name` ignoring case. `Some("")` means present but empty.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(&name.to_lowercase()).map(String::as_str)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.values.contains_key(&name.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for ConfigMap
where
    K: AsRef<str>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = IndexMap::new();
        for (key, value) in iter {
            let key = key.as_ref().to_lowercase();
            if values.insert(key.clone(), value.into()).is_some() {
                warn!("Config variable '{key}' is defined more than once, using the last value.");
            }
        }
        Self { values }
    }
}

/// Document formats understood by [`parse_config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
}

impl ConfigFormat {
    /// Picks the format from the file extension. Anything that is not
    /// `.yml` or `.yaml` is read as JSON.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        match path.as_ref().extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yml") || ext.eq_ignore_ascii_case("yaml") => {
                ConfigFormat::Yaml
            }
            _ => ConfigFormat::Json,
        }
    }
}

/// Parses config document content.
///
/// # Errors
/// * `ParseError` if the content is not a flat mapping of string keys to
///   string or null values
pub fn parse_config(content: &str, format: ConfigFormat) -> Result<ConfigMap, ParseError> {
    let raw: RawConfig = match format {
        ConfigFormat::Json => serde_json::from_str(content)?,
        ConfigFormat::Yaml => serde_yaml::from_str(content)?,
    };

    Ok(raw
        .0
        .into_iter()
        .map(|(key, value)| (key, value.unwrap_or_default()))
        .collect())
}

/// Loads the config document at `path`.
///
/// # Errors
/// * `ConfigError::Missing` if the document does not exist
/// * `ConfigError::Unreadable` if it cannot be read
/// * `ConfigError::Malformed` if it cannot be parsed
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ConfigMap, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ConfigError::Missing { path: path.to_path_buf() });
    }

    debug!("Loading configuration from {}", path.display());
    let content = std::fs::read_to_string(path)
        .map_err(|source| ConfigError::Unreadable { path: path.to_path_buf(), source })?;

    let config = parse_config(&content, ConfigFormat::from_path(path))
        .map_err(|source| ConfigError::Malformed { path: path.to_path_buf(), source })?;
    debug!("Loaded {} config variables", config.len());
    Ok(config)
}
