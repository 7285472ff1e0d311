//! Database module
//!
//! This module handles database connections and operations

pub mod connection;
pub mod repositories;
pub mod service;

// Re-export commonly used database components
pub use connection::{DatabasePool, PoolConfig, create_pool, run_migrations, health_check};
pub use repositories::{
    AccountRepository, ClassRepository, SubjectRepository, GradeRepository, SessionRepository,
};
pub use service::DatabaseService;

/// Fresh migrated database in a temporary directory; keep the dir alive with the pool.
#[cfg(test)]
pub(crate) async fn test_pool() -> (tempfile::TempDir, DatabasePool) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = PoolConfig {
        url: format!("sqlite://{}", dir.path().join("test.db").display()),
        ..PoolConfig::default()
    };
    let pool = create_pool(&config).await.expect("Failed to create pool");
    run_migrations(&pool).await.expect("Failed to run migrations");
    (dir, pool)
}
