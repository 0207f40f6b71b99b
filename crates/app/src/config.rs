//! Runtime configuration, loaded from environment variables at startup.

use std::path::PathBuf;
use tracing::Level;

pub const DEFAULT_STORE_PATH: &str = ".vida-cidada/session.json";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Where the two session entries live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    Memory,
    File(PathBuf),
}

impl StoreLocation {
    /// `memory` selects the in-process store; anything else is a file path.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "memory" => Self::Memory,
            path => Self::File(PathBuf::from(path)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub store: StoreLocation,
    pub log_level: Level,
    pub questions_path: Option<PathBuf>,
}

impl AppConfig {
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for an empty store path or an
    /// unknown log level.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let store = match lookup("VIDA_STORE_PATH") {
            Some(raw) if raw.trim().is_empty() => {
                return Err(ConfigError::InvalidValue(
                    "VIDA_STORE_PATH".into(),
                    "path cannot be empty".into(),
                ));
            }
            Some(raw) => StoreLocation::parse(&raw),
            None => StoreLocation::File(PathBuf::from(DEFAULT_STORE_PATH)),
        };

        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "WARN".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{log_level_str}' is not a valid log level"),
            )
        })?;

        let questions_path = lookup("VIDA_QUESTIONS_PATH")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            store,
            log_level,
            questions_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_with(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_without_env() {
        let config = config_with(&[]).unwrap();
        assert_eq!(
            config.store,
            StoreLocation::File(PathBuf::from(DEFAULT_STORE_PATH))
        );
        assert_eq!(config.log_level, Level::WARN);
        assert_eq!(config.questions_path, None);
    }

    #[test]
    fn memory_store_and_level_are_read() {
        let config = config_with(&[("VIDA_STORE_PATH", "memory"), ("RUST_LOG", "debug")]).unwrap();
        assert_eq!(config.store, StoreLocation::Memory);
        assert_eq!(config.log_level, Level::DEBUG);
    }

    #[test]
    fn bad_values_are_rejected() {
        assert!(matches!(
            config_with(&[("RUST_LOG", "loud")]),
            Err(ConfigError::InvalidValue(var, _)) if var == "RUST_LOG"
        ));
        assert!(config_with(&[("VIDA_STORE_PATH", " ")]).is_err());
    }
}
