//! Server configuration from environment variables.
//!
//! Recognized variables (a `.env` file is loaded first when present):
//! - HOST: bind address (default `127.0.0.1`)
//! - PORT: bind port (default `3000`)
//! - FLASHY_DATA_FILE: saved deck location
//!   (default `<local data dir>/flashy/flashcards.json`)
//! - FLASHY_SESSION_IDLE_SECS: idle seconds before a test session is
//!   dropped (default `3600`)
//! - RUST_LOG: tracing filter (default `info`)

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::services::sessions::DEFAULT_IDLE_TIMEOUT;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid PORT value: {0}")]
    InvalidPort(String),

    #[error("invalid FLASHY_SESSION_IDLE_SECS value: {0}")]
    InvalidSessionTimeout(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub data_file: PathBuf,
    pub session_idle_timeout: Duration,
    pub log_filter: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => 3000,
        };

        let data_file = lookup("FLASHY_DATA_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(default_data_file);

        let session_idle_timeout = match lookup("FLASHY_SESSION_IDLE_SECS") {
            Some(raw) => raw
                .trim()
                .parse()
                .map(Duration::from_secs)
                .map_err(|_| ConfigError::InvalidSessionTimeout(raw))?,
            None => DEFAULT_IDLE_TIMEOUT,
        };

        let log_filter = lookup("RUST_LOG").unwrap_or_else(|| "info".to_string());

        Ok(Self {
            host,
            port,
            data_file,
            session_idle_timeout,
            log_filter,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_data_file() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("flashy")
        .join("flashcards.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 3000);
        assert_eq!(config.log_filter, "info");
        assert_eq!(config.session_idle_timeout, Duration::from_secs(3600));
        assert!(config.data_file.ends_with("flashy/flashcards.json"));
        assert_eq!(config.addr(), "127.0.0.1:3000");
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "8080"),
            ("FLASHY_DATA_FILE", "/tmp/cards.json"),
            ("FLASHY_SESSION_IDLE_SECS", "120"),
            ("RUST_LOG", "debug"),
        ]))
        .unwrap();
        assert_eq!(config.session_idle_timeout, Duration::from_secs(120));
        assert_eq!(config.addr(), "0.0.0.0:8080");
        assert_eq!(config.data_file, PathBuf::from("/tmp/cards.json"));
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn test_invalid_port() {
        let err = Config::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert_eq!(err, ConfigError::InvalidPort("eighty".to_string()));
    }

    #[test]
    fn test_invalid_session_timeout() {
        let err = Config::from_lookup(lookup(&[("FLASHY_SESSION_IDLE_SECS", "-5")])).unwrap_err();
        assert_eq!(err, ConfigError::InvalidSessionTimeout("-5".to_string()));
    }
}
