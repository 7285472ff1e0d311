//! Account repository implementation

use sqlx::SqlitePool;
use chrono::Utc;
use crate::models::account::{Account, CreateAccountRequest, Role};
use crate::utils::errors::ClassbookError;

const ACCOUNT_COLUMNS: &str = "id, username, email, password_hash, role, class_id, created_at";

#[derive(Clone)]
#[derive(Debug)]
pub struct AccountRepository {
    pool: SqlitePool,
}

impl AccountRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new account
    ///
    /// Unique constraint violations come back as `DuplicateEmail` / `DuplicateUsername`.
    pub async fn create(&self, request: CreateAccountRequest) -> Result<Account, ClassbookError> {
        let result = sqlx::query_as::<_, Account>(&format!(
            r#"
            INSERT INTO accounts (username, email, password_hash, role, class_id, created_at)
            VALUES ($1, $2, $3, $4, NULL, $5)
            RETURNING {ACCOUNT_COLUMNS}
            "#
        ))
        .bind(&request.username)
        .bind(&request.email)
        .bind(&request.password_hash)
        .bind(request.role)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(account) => Ok(account),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                if db_err.message().contains("accounts.username") {
                    Err(ClassbookError::DuplicateUsername { username: request.username })
                } else {
                    Err(ClassbookError::DuplicateEmail { email: request.email })
                }
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Find account by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Account>, ClassbookError> {
        let account = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    /// Find account by email
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Account>, ClassbookError> {
        let account = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    /// Find account by username
    pub async fn find_by_username(&self, username: &str) -> Result<Option<Account>, ClassbookError> {
        let account = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    /// Set the class membership of an account, replacing any previous one
    pub async fn set_class(&self, id: i64, class_id: i64) -> Result<Account, ClassbookError> {
        let account = sqlx::query_as::<_, Account>(&format!(
            r#"
            UPDATE accounts
            SET class_id = $2
            WHERE id = $1
            RETURNING {ACCOUNT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(class_id)
        .fetch_optional(&self.pool)
        .await?;

        account.ok_or(ClassbookError::AccountNotFound { account_id: id })
    }

    /// Students whose membership points at the given class
    pub async fn list_students_in_class(&self, class_id: i64) -> Result<Vec<Account>, ClassbookError> {
        let accounts = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE class_id = $1 AND role = $2 ORDER BY username ASC"
        ))
        .bind(class_id)
        .bind(Role::Student)
        .fetch_all(&self.pool)
        .await?;

        Ok(accounts)
    }

    /// Count total accounts
    pub async fn count(&self) -> Result<i64, ClassbookError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM accounts")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
