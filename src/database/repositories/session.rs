//! Session repository implementation

use sqlx::SqlitePool;
use chrono::Utc;
use crate::models::{Role, Session};
use crate::utils::errors::ClassbookError;

#[derive(Clone, Debug)]
pub struct SessionRepository {
    pool: SqlitePool,
}

impl SessionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Store a new session token
    pub async fn create(&self, token: &str, account_id: i64, role: Role) -> Result<Session, ClassbookError> {
        let session = sqlx::query_as::<_, Session>(
            r#"
            INSERT INTO sessions (token, account_id, role, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING token, account_id, role, created_at
            "#
        )
        .bind(token)
        .bind(account_id)
        .bind(role)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(session)
    }

    /// Find session by token
    pub async fn find(&self, token: &str) -> Result<Option<Session>, ClassbookError> {
        let session = sqlx::query_as::<_, Session>(
            "SELECT token, account_id, role, created_at FROM sessions WHERE token = $1"
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(session)
    }

    /// Delete a session; returns whether a row was removed
    pub async fn delete(&self, token: &str) -> Result<bool, ClassbookError> {
        let result = sqlx::query("DELETE FROM sessions WHERE token = $1")
            .bind(token)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Number of live sessions of an account
    pub async fn count_for_account(&self, account_id: i64) -> Result<i64, ClassbookError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM sessions WHERE account_id = $1")
            .bind(account_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
