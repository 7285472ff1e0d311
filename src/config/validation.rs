//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{ClassbookError, Result};
use super::Settings;

/// Minimum length of the master secret accepted for cookie key derivation
pub const MIN_SECRET_KEY_LEN: usize = 32;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_server_config(&settings.server)?;
    validate_database_config(&settings.database)?;
    validate_auth_config(&settings.auth)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate server configuration
fn validate_server_config(config: &super::ServerConfig) -> Result<()> {
    if config.host.is_empty() {
        return Err(ClassbookError::Config(
            "Server host is required".to_string()
        ));
    }

    if config.port == 0 {
        return Err(ClassbookError::Config(
            "Server port must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(ClassbookError::Config(
            "Database URL is required".to_string()
        ));
    }

    if config.max_connections == 0 {
        return Err(ClassbookError::Config(
            "Max connections must be greater than 0".to_string()
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(ClassbookError::Config(
            "Min connections cannot be greater than max connections".to_string()
        ));
    }

    Ok(())
}

/// Validate session configuration
fn validate_auth_config(config: &super::AuthConfig) -> Result<()> {
    if config.secret_key.is_empty() {
        return Err(ClassbookError::Config(
            "Secret key is required (set SECRET_KEY)".to_string()
        ));
    }

    if config.secret_key.len() < MIN_SECRET_KEY_LEN {
        return Err(ClassbookError::Config(
            format!("Secret key must be at least {} bytes long", MIN_SECRET_KEY_LEN)
        ));
    }

    if config.session_cookie.is_empty() || config.flash_cookie.is_empty() {
        return Err(ClassbookError::Config(
            "Cookie names must not be empty".to_string()
        ));
    }

    if config.session_cookie == config.flash_cookie {
        return Err(ClassbookError::Config(
            "Session and flash cookies must have different names".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(ClassbookError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(ClassbookError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn valid_settings() -> Settings {
        let mut settings = Settings::default();
        settings.auth.secret_key = "0123456789abcdef0123456789abcdef".to_string();
        settings
    }

    #[test]
    fn test_valid_settings_pass() {
        assert!(validate_settings(&valid_settings()).is_ok());
    }

    #[test]
    fn test_missing_secret_key_is_fatal() {
        let settings = Settings::default();
        assert_matches!(validate_settings(&settings), Err(ClassbookError::Config(msg)) if msg.contains("Secret key"));
    }

    #[test]
    fn test_short_secret_key_is_rejected() {
        let mut settings = valid_settings();
        settings.auth.secret_key = "too-short".to_string();
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_connection_bounds() {
        let mut settings = valid_settings();
        settings.database.min_connections = 10;
        settings.database.max_connections = 2;
        assert!(validate_settings(&settings).is_err());

        settings.database.max_connections = 0;
        settings.database.min_connections = 0;
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_log_level() {
        let mut settings = valid_settings();
        settings.logging.level = "verbose".to_string();
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_cookie_names_must_differ() {
        let mut settings = valid_settings();
        settings.auth.flash_cookie = settings.auth.session_cookie.clone();
        assert!(validate_settings(&settings).is_err());
    }
}
