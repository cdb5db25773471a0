//! Configuration validation.
//!
//! Each section has its own validator; this orchestrator calls them all
//! and collects errors into a single `ConfigError`.

mod gateway;
mod helpers;
mod retry;

#[cfg(test)]
mod tests;

use crate::schema::LanyardConfig;
use lanyard_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &LanyardConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    gateway::validate_gateway(&mut errors, config);
    retry::validate_retry(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
