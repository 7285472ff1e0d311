//! Classbook
//!
//! A small school-management web service. Teachers register, create classes,
//! manage the subjects of their classes and record grades; students register,
//! join a class and view their own grades.

pub mod config;
pub mod handlers;
pub mod services;
pub mod models;
pub mod database;
pub mod state;
pub mod utils;
pub mod middleware;
pub mod views;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{ClassbookError, Result};

// Re-export main components for easy access
pub use database::DatabaseService;
pub use services::ServiceFactory;
pub use state::AppState;
pub use handlers::create_router;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
