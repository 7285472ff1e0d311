//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use std::net::{IpAddr, SocketAddr};
use serde::{Deserialize, Serialize};
use crate::utils::errors::{ClassbookError, Result};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub classes: ClassesConfig,
    pub grades: GradesConfig,
    pub logging: LoggingConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Session and cookie configuration
#[derive(Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Master secret the cookie signing key is derived from. At least 32 bytes.
    pub secret_key: String,
    pub session_cookie: String,
    pub flash_cookie: String,
}

// The secret must not end up in the startup log.
impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("secret_key", &"<redacted>")
            .field("session_cookie", &self.session_cookie)
            .field("flash_cookie", &self.flash_cookie)
            .finish()
    }
}

/// Class membership behavior
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClassesConfig {
    /// Reject joins of class ids that do not exist instead of only logging them.
    pub strict_join: bool,
}

/// Which grade rows a teacher may list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TeacherGradeScope {
    All,
    OwnClasses,
}

/// Grade listing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GradesConfig {
    pub teacher_scope: TeacherGradeScope,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for daily rolling log files; stdout only when unset.
    pub file_path: Option<String>,
}

impl Settings {
    /// Load settings from defaults, configuration file and environment variables
    pub fn new() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_vars(std::env::vars().collect())
    }

    /// Layer the given environment over the defaults and the optional `config` file
    ///
    /// `CLASSBOOK_SECTION__KEY` sets `section.key`; the bare `SECRET_KEY`,
    /// `DATABASE_URI` and `PORT` variables win over everything else.
    pub fn from_vars(vars: config::Map<String, String>) -> Result<Self> {
        let port = vars
            .get("PORT")
            .and_then(|p| p.parse::<u16>().ok())
            .map(i64::from);

        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&Settings::default())?)
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("CLASSBOOK")
                    .prefix_separator("_")
                    .separator("__")
                    .source(Some(vars.clone())),
            )
            .set_override_option("auth.secret_key", vars.get("SECRET_KEY").cloned())?
            .set_override_option("database.url", vars.get("DATABASE_URI").cloned())?
            .set_override_option("server.port", port)?
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<()> {
        super::validation::validate_settings(self)
    }

    /// Socket address the HTTP server binds to
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self.server.host.parse().map_err(|e| {
            ClassbookError::Config(format!("Error parsing {:?} as IP address: {}", self.server.host, e))
        })?;
        Ok(SocketAddr::new(ip, self.server.port))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
            },
            database: DatabaseConfig {
                url: "sqlite://school.db".to_string(),
                max_connections: 5,
                min_connections: 1,
            },
            auth: AuthConfig {
                secret_key: String::new(),
                session_cookie: "classbook_session".to_string(),
                flash_cookie: "classbook_flash".to_string(),
            },
            classes: ClassesConfig {
                strict_join: false,
            },
            grades: GradesConfig {
                teacher_scope: TeacherGradeScope::All,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: None,
            },
        }
    }
}
