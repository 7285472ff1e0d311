//! Test database helper utilities
//!
//! Every test gets its own SQLite file in a temporary directory, migrated
//! from scratch and removed when the helper is dropped.

use std::sync::Once;
use tempfile::TempDir;
use classbook::database::{create_pool, run_migrations, DatabasePool, PoolConfig};
use classbook::utils::errors::ClassbookError;

static INIT: Once = Once::new();

/// Test database helper that manages SQLite test database setup
pub struct TestDatabase {
    pub pool: DatabasePool,
    pub database_url: String,
    _dir: TempDir,
}

impl TestDatabase {
    /// Create a new migrated test database
    pub async fn new() -> Result<Self, ClassbookError> {
        // Initialize logging once
        INIT.call_once(|| {
            let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        });

        let dir = tempfile::tempdir()?;
        let database_url = format!("sqlite://{}", dir.path().join("classbook-test.db").display());
        let config = PoolConfig {
            url: database_url.clone(),
            ..PoolConfig::default()
        };

        let pool = create_pool(&config).await?;
        run_migrations(&pool).await?;

        Ok(Self {
            pool,
            database_url,
            _dir: dir,
        })
    }

    /// Count rows in a table
    pub async fn count_records(&self, table: &str) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(&self.pool)
            .await
    }

    /// Id of the account registered with an email
    pub async fn account_id(&self, email: &str) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT id FROM accounts WHERE email = $1")
            .bind(email)
            .fetch_one(&self.pool)
            .await
    }

    /// Id of the most recently created class with a name
    pub async fn class_id(&self, name: &str) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT id FROM classes WHERE name = $1 ORDER BY id DESC LIMIT 1")
            .bind(name)
            .fetch_one(&self.pool)
            .await
    }

    /// Id of the most recently created subject with a name
    pub async fn subject_id(&self, name: &str) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT id FROM subjects WHERE name = $1 ORDER BY id DESC LIMIT 1")
            .bind(name)
            .fetch_one(&self.pool)
            .await
    }

    /// Class membership of an account
    pub async fn membership(&self, account_id: i64) -> Result<Option<i64>, sqlx::Error> {
        sqlx::query_scalar::<_, Option<i64>>("SELECT class_id FROM accounts WHERE id = $1")
            .bind(account_id)
            .fetch_one(&self.pool)
            .await
    }
}
