//! Token value resolution.
//! Looks a token up in the config map first and, when enabled, falls back to
//! environment variables.

use crate::config::ConfigMap;
use std::collections::HashMap;
use std::fmt;

/// Source of environment variables.
pub trait EnvSource {
    /// Returns the variable named `name`, if set and valid unicode.
    fn var(&self, name: &str) -> Option<String>;
}

/// Reads variables from the process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl<S: std::hash::BuildHasher> EnvSource for HashMap<String, String, S> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// Where the last lookup for a token took place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupSource {
    Config,
    Environment,
}

impl fmt::Display for LookupSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupSource::Config => write!(f, "Config variable"),
            LookupSource::Environment => write!(f, "Environment variable"),
        }
    }
}

/// Result of resolving a single token name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(String),
    Unresolved(LookupSource),
}

/// Resolves token names against a [`ConfigMap`] with optional environment fallback.
///
/// A key present in the config map with an empty value stays unresolved: the
/// environment is only consulted when the key is absent from the map.
pub struct TokenResolver<'a> {
    config: &'a ConfigMap,
    env: Option<&'a dyn EnvSource>,
}

impl<'a> TokenResolver<'a> {
    /// Resolver that only consults the config map.
    pub fn new(config: &'a ConfigMap) -> Self {
        Self { config, env: None }
    }

    /// Resolver that falls back to `env` for names missing from the config map.
    pub fn with_env_fallback(config: &'a ConfigMap, env: &'a dyn EnvSource) -> Self {
        Self { config, env: Some(env) }
    }

    pub fn env_fallback_enabled(&self) -> bool {
        self.env.is_some()
    }

    pub fn resolve(&self, name: &str) -> Resolution {
        match (self.config.get(name), self.env) {
            (Some(value), _) if !value.is_empty() => Resolution::Resolved(value.to_string()),
            (Some(_), _) | (None, None) => Resolution::Unresolved(LookupSource::Config),
            (None, Some(env)) => match env.var(name) {
                Some(value) if !value.is_empty() => Resolution::Resolved(value),
                _ => Resolution::Unresolved(LookupSource::Environment),
            },
        }
    }
}
