//! Runtime configuration for the store and logging.
//!
//! Values come from `LATTES_*` environment variables; blank values fall back
//! to defaults. `CoreConfig::from_lookup` takes any key lookup so parsing can
//! be exercised without touching the process environment.

use crate::logging::{default_log_level, normalize_level};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Default backing document location, relative to the working directory.
pub const DEFAULT_DB_PATH: &str = "db/db.json";

pub const ENV_DB_PATH: &str = "LATTES_DB_PATH";
pub const ENV_ATOMIC_FLUSH: &str = "LATTES_ATOMIC_FLUSH";
pub const ENV_LOG_LEVEL: &str = "LATTES_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "LATTES_LOG_DIR";

/// Durable store settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Backing JSON document.
    pub path: PathBuf,
    /// Write through a temp file + rename instead of truncating in place.
    pub atomic_flush: bool,
}

impl StoreConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            atomic_flush: true,
        }
    }

    pub fn with_atomic_flush(mut self, atomic_flush: bool) -> Self {
        self.atomic_flush = atomic_flush;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DB_PATH)
    }
}

/// Full core configuration resolved at the composition root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub store: StoreConfig,
    /// Normalized level (`trace|debug|info|warn|error`).
    pub log_level: &'static str,
    /// File logging is disabled when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

impl CoreConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, applying defaults for missing
    /// or blank values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let value = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|raw| !raw.is_empty())
        };

        let mut config = Self::default();

        if let Some(path) = value(ENV_DB_PATH) {
            config.store.path = PathBuf::from(path);
        }
        if let Some(raw) = value(ENV_ATOMIC_FLUSH) {
            config.store.atomic_flush = parse_flag(ENV_ATOMIC_FLUSH, &raw)?;
        }
        if let Some(raw) = value(ENV_LOG_LEVEL) {
            config = config.with_log_level(&raw)?;
        }
        config.log_dir = value(ENV_LOG_DIR).map(PathBuf::from);

        Ok(config)
    }

    /// Replaces the log level, normalizing it first.
    pub fn with_log_level(mut self, level: &str) -> Result<Self, ConfigError> {
        self.log_level =
            normalize_level(level).map_err(|_| ConfigError::InvalidLogLevel(level.to_string()))?;
        Ok(self)
    }
}

fn parse_flag(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            key,
            value: raw.to_string(),
        }),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidLogLevel(String),
    InvalidFlag { key: &'static str, value: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLogLevel(value) => write!(
                f,
                "unsupported log level `{value}`; expected trace|debug|info|warn|error"
            ),
            Self::InvalidFlag { key, value } => {
                write!(f, "invalid boolean `{value}` for {key}")
            }
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::{
        ConfigError, CoreConfig, DEFAULT_DB_PATH, ENV_ATOMIC_FLUSH, ENV_DB_PATH, ENV_LOG_DIR,
        ENV_LOG_LEVEL,
    };
    use crate::logging::default_log_level;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let config = CoreConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.store.path, PathBuf::from(DEFAULT_DB_PATH));
        assert!(config.store.atomic_flush);
        assert_eq!(config.log_level, default_log_level());
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn values_are_trimmed_and_blank_values_ignored() {
        let config = CoreConfig::from_lookup(lookup(&[
            (ENV_DB_PATH, "  /srv/lattes/db.json "),
            (ENV_ATOMIC_FLUSH, "off"),
            (ENV_LOG_LEVEL, "WARNING"),
            (ENV_LOG_DIR, "   "),
        ]))
        .unwrap();
        assert_eq!(config.store.path, PathBuf::from("/srv/lattes/db.json"));
        assert!(!config.store.atomic_flush);
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = CoreConfig::from_lookup(lookup(&[(ENV_LOG_LEVEL, "verbose")])).unwrap_err();
        assert_eq!(err, ConfigError::InvalidLogLevel("verbose".to_string()));

        let err = CoreConfig::from_lookup(lookup(&[(ENV_ATOMIC_FLUSH, "maybe")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidFlag { key, .. } if key == ENV_ATOMIC_FLUSH));
    }
}
