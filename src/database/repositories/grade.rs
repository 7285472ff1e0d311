//! Grade repository implementation

use sqlx::SqlitePool;
use chrono::Utc;
use crate::models::grade::{Grade, GradeRecord, RecordGradeRequest};
use crate::utils::errors::ClassbookError;

const RECORD_SELECT: &str = r#"
    SELECT g.id, g.student_id, a.username AS student_name,
           g.subject_id, s.name AS subject_name,
           c.id AS class_id, c.name AS class_name,
           g.period, g.score, g.recorded_at
    FROM grades g
    INNER JOIN accounts a ON a.id = g.student_id
    INNER JOIN subjects s ON s.id = g.subject_id
    INNER JOIN classes c ON c.id = s.class_id
"#;

#[derive(Clone, Debug)]
pub struct GradeRepository {
    pool: SqlitePool,
}

impl GradeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Append a grade
    pub async fn create(&self, request: RecordGradeRequest) -> Result<Grade, ClassbookError> {
        let grade = sqlx::query_as::<_, Grade>(
            r#"
            INSERT INTO grades (student_id, subject_id, period, score, recorded_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, student_id, subject_id, period, score, recorded_at
            "#
        )
        .bind(request.student_id)
        .bind(request.subject_id)
        .bind(request.period)
        .bind(request.score)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(grade)
    }

    /// Every grade row
    pub async fn list_all(&self) -> Result<Vec<GradeRecord>, ClassbookError> {
        let records = sqlx::query_as::<_, GradeRecord>(&format!("{RECORD_SELECT} ORDER BY g.id ASC"))
            .fetch_all(&self.pool)
            .await?;

        Ok(records)
    }

    /// Grade rows of a single student
    pub async fn list_by_student(&self, student_id: i64) -> Result<Vec<GradeRecord>, ClassbookError> {
        let records = sqlx::query_as::<_, GradeRecord>(&format!(
            "{RECORD_SELECT} WHERE g.student_id = $1 ORDER BY g.id ASC"
        ))
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Grade rows in classes owned by a teacher
    pub async fn list_by_teacher(&self, teacher_id: i64) -> Result<Vec<GradeRecord>, ClassbookError> {
        let records = sqlx::query_as::<_, GradeRecord>(&format!(
            "{RECORD_SELECT} WHERE c.teacher_id = $1 ORDER BY g.id ASC"
        ))
        .bind(teacher_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }
}
