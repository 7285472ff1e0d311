//! Class model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use super::account::Account;
use super::subject::Subject;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Class {
    pub id: i64,
    pub name: String,
    pub teacher_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateClassRequest {
    pub name: String,
    pub teacher_id: i64,
}

/// Everything the owning teacher sees on the class management page
#[derive(Debug, Clone, Serialize)]
pub struct ClassOverview {
    pub class: Class,
    pub subjects: Vec<Subject>,
    pub students: Vec<Account>,
}
