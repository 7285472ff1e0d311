//! Subject repository implementation

use sqlx::SqlitePool;
use chrono::Utc;
use crate::models::subject::{Subject, CreateSubjectRequest};
use crate::utils::errors::ClassbookError;

#[derive(Clone, Debug)]
pub struct SubjectRepository {
    pool: SqlitePool,
}

impl SubjectRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new subject under a class
    pub async fn create(&self, request: CreateSubjectRequest) -> Result<Subject, ClassbookError> {
        let subject = sqlx::query_as::<_, Subject>(
            r#"
            INSERT INTO subjects (name, class_id, created_at)
            VALUES ($1, $2, $3)
            RETURNING id, name, class_id, created_at
            "#
        )
        .bind(request.name)
        .bind(request.class_id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(subject)
    }

    /// Find subject by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Subject>, ClassbookError> {
        let subject = sqlx::query_as::<_, Subject>(
            "SELECT id, name, class_id, created_at FROM subjects WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(subject)
    }

    /// Subjects of a class
    pub async fn list_by_class(&self, class_id: i64) -> Result<Vec<Subject>, ClassbookError> {
        let subjects = sqlx::query_as::<_, Subject>(
            "SELECT id, name, class_id, created_at FROM subjects WHERE class_id = $1 ORDER BY id ASC"
        )
        .bind(class_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(subjects)
    }
}
