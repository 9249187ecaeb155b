//! Configuration module for the revision board.
//!
//! All configuration is loaded from environment variables (optionally via a
//! `.env` file) with defaults that need no setup at all.

use std::env;
use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Where the datastore lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// The JSON data file
    File,
    /// Process memory only; lost on exit
    Memory,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Storage backend
    pub storage: StorageBackend,
    /// Path to the JSON data file
    pub data_file: PathBuf,
    /// Directory served as static files at `/`
    pub static_dir: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Log line format
    pub log_format: LogFormat,
}

/// Invalid configuration value.
#[derive(Debug)]
pub enum ConfigError {
    InvalidBindAddr {
        value: String,
        source: AddrParseError,
    },
    InvalidLogFormat(String),
    InvalidStorage(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidBindAddr { value, source } => {
                write!(f, "invalid REVBOARD_BIND_ADDR '{}': {}", value, source)
            }
            ConfigError::InvalidLogFormat(value) => {
                write!(f, "invalid REVBOARD_LOG_FORMAT '{}' (expected text or json)", value)
            }
            ConfigError::InvalidStorage(value) => {
                write!(f, "invalid REVBOARD_STORAGE '{}' (expected file or memory)", value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let storage = match lookup("REVBOARD_STORAGE").as_deref() {
            None | Some("file") => StorageBackend::File,
            Some("memory") => StorageBackend::Memory,
            Some(other) => return Err(ConfigError::InvalidStorage(other.to_string())),
        };

        let data_file = lookup("REVBOARD_DATA_FILE")
            .unwrap_or_else(|| "./data.json".to_string())
            .into();

        let static_dir = lookup("REVBOARD_STATIC_DIR")
            .unwrap_or_else(|| ".".to_string())
            .into();

        let bind_value =
            lookup("REVBOARD_BIND_ADDR").unwrap_or_else(|| "0.0.0.0:3000".to_string());
        let bind_addr = bind_value
            .parse::<SocketAddr>()
            .map_err(|source| ConfigError::InvalidBindAddr {
                value: bind_value.clone(),
                source,
            })?;

        let log_level = lookup("REVBOARD_LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        let log_format = match lookup("REVBOARD_LOG_FORMAT").as_deref() {
            None | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => return Err(ConfigError::InvalidLogFormat(other.to_string())),
        };

        Ok(Self {
            storage,
            data_file,
            static_dir,
            bind_addr,
            log_level,
            log_format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = Config::from_lookup(|_| None).unwrap();

        assert_eq!(config.storage, StorageBackend::File);
        assert_eq!(config.data_file, PathBuf::from("./data.json"));
        assert_eq!(config.static_dir, PathBuf::from("."));
        assert_eq!(config.bind_addr.to_string(), "0.0.0.0:3000");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("REVBOARD_STORAGE", "memory"),
            ("REVBOARD_DATA_FILE", "/var/lib/board/data.json"),
            ("REVBOARD_STATIC_DIR", "/srv/board"),
            ("REVBOARD_BIND_ADDR", "127.0.0.1:8080"),
            ("REVBOARD_LOG_LEVEL", "debug"),
            ("REVBOARD_LOG_FORMAT", "json"),
        ]))
        .unwrap();

        assert_eq!(config.storage, StorageBackend::Memory);
        assert_eq!(config.data_file, PathBuf::from("/var/lib/board/data.json"));
        assert_eq!(config.static_dir, PathBuf::from("/srv/board"));
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_bind_addr() {
        let err = Config::from_lookup(lookup_from(&[("REVBOARD_BIND_ADDR", "port 3000")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBindAddr { .. }));
    }

    #[test]
    fn test_invalid_storage() {
        let err = Config::from_lookup(lookup_from(&[("REVBOARD_STORAGE", "sqlite")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidStorage(_)));
    }

    #[test]
    fn test_invalid_log_format() {
        let err = Config::from_lookup(lookup_from(&[("REVBOARD_LOG_FORMAT", "xml")])).unwrap_err();
        assert!(err.to_string().contains("xml"));
    }
}
