//! Services module
//!
//! This module contains business logic services

pub mod auth;
pub mod classroom;
pub mod grades;

// Re-export commonly used services
pub use auth::{AuthService, hash_password, verify_password, require_role};
pub use classroom::ClassService;
pub use grades::GradeService;

use crate::config::settings::Settings;
use crate::database::DatabaseService;

/// Service factory for creating and managing all services
#[derive(Clone, Debug)]
pub struct ServiceFactory {
    pub auth_service: AuthService,
    pub class_service: ClassService,
    pub grade_service: GradeService,
    db: DatabaseService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(db: DatabaseService, settings: &Settings) -> Self {
        let auth_service = AuthService::new(db.accounts.clone(), db.sessions.clone());
        let class_service = ClassService::new(db.clone(), settings.classes.clone());
        let grade_service = GradeService::new(db.clone(), settings.grades.clone());

        Self {
            auth_service,
            class_service,
            grade_service,
            db,
        }
    }

    /// Health check for all services
    pub async fn health_check(&self) -> ServiceHealthStatus {
        let database_healthy = match self.db.health_check().await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(error = %e, "Database health check failed");
                false
            }
        };

        ServiceHealthStatus { database_healthy }
    }
}

/// Health status for all services
#[derive(Debug, Clone)]
pub struct ServiceHealthStatus {
    pub database_healthy: bool,
}

impl ServiceHealthStatus {
    /// Check if all critical services are healthy
    pub fn is_healthy(&self) -> bool {
        self.database_healthy
    }

    /// Get list of unhealthy services
    pub fn get_issues(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if !self.database_healthy {
            issues.push("Database connection failed".to_string());
        }

        issues
    }
}
