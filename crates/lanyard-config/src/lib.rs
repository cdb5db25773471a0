//! Lanyard configuration system.
//!
//! TOML-based configuration with serde defaults for every section, so a
//! file that only sets `[subject] id` is a complete config. Loaded configs
//! are range-checked by [`validation::validate`].
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use lanyard_config::load_config;
//!
//! let config = load_config(None).expect("failed to load config");
//! println!("tracking {}", config.subject.id);
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{
    GatewayConfig, LanyardConfig, LogLevel, LoggingConfig, RetryConfig, RetryStrategy,
    SubjectConfig, CONFIG_SCHEMA_VERSION, DEFAULT_GATEWAY_URL,
};

use std::path::Path;

use lanyard_common::ConfigError;

/// Load config from an explicit path, or from the platform default path
/// (creating a commented default file there if none exists).
pub fn load_config(path: Option<&Path>) -> Result<LanyardConfig, ConfigError> {
    match path {
        Some(path) => toml_loader::load_from_path(path),
        None => toml_loader::load_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_schema_version_is_1() {
        assert_eq!(CONFIG_SCHEMA_VERSION, 1);
    }

    #[test]
    fn load_config_with_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[subject]\nid = \"871084043838566400\"\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.subject.id, "871084043838566400");
        assert_eq!(config.gateway.url, "wss://api.lanyard.rest/socket");
    }
}
