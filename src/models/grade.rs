//! Grade model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Grade {
    pub id: i64,
    pub student_id: i64,
    pub subject_id: i64,
    pub period: String,
    pub score: f64,
    pub recorded_at: DateTime<Utc>,
}

/// Grade row joined with the names needed for display
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GradeRecord {
    pub id: i64,
    pub student_id: i64,
    pub student_name: String,
    pub subject_id: i64,
    pub subject_name: String,
    pub class_id: i64,
    pub class_name: String,
    pub period: String,
    pub score: f64,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordGradeRequest {
    pub student_id: i64,
    pub subject_id: i64,
    pub period: String,
    pub score: f64,
}
