//! Class repository implementation

use sqlx::SqlitePool;
use chrono::Utc;
use crate::models::class::{Class, CreateClassRequest};
use crate::utils::errors::ClassbookError;

#[derive(Clone, Debug)]
pub struct ClassRepository {
    pool: SqlitePool,
}

impl ClassRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new class
    pub async fn create(&self, request: CreateClassRequest) -> Result<Class, ClassbookError> {
        let class = sqlx::query_as::<_, Class>(
            r#"
            INSERT INTO classes (name, teacher_id, created_at)
            VALUES ($1, $2, $3)
            RETURNING id, name, teacher_id, created_at
            "#
        )
        .bind(request.name)
        .bind(request.teacher_id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(class)
    }

    /// Find class by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Class>, ClassbookError> {
        let class = sqlx::query_as::<_, Class>(
            "SELECT id, name, teacher_id, created_at FROM classes WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(class)
    }

    /// Classes owned by a teacher
    pub async fn list_by_teacher(&self, teacher_id: i64) -> Result<Vec<Class>, ClassbookError> {
        let classes = sqlx::query_as::<_, Class>(
            "SELECT id, name, teacher_id, created_at FROM classes WHERE teacher_id = $1 ORDER BY id ASC"
        )
        .bind(teacher_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(classes)
    }

    /// List all classes
    pub async fn list(&self) -> Result<Vec<Class>, ClassbookError> {
        let classes = sqlx::query_as::<_, Class>(
            "SELECT id, name, teacher_id, created_at FROM classes ORDER BY id ASC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(classes)
    }

    /// Count total classes
    pub async fn count(&self) -> Result<i64, ClassbookError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM classes")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
