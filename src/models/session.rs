//! Session and principal models

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use super::account::Role;

/// Stored login session, looked up by its token
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Session {
    pub token: String,
    pub account_id: i64,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// The authenticated identity a request acts as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Principal {
    pub account_id: i64,
    pub role: Role,
}

impl Principal {
    pub fn is_teacher(&self) -> bool {
        self.role == Role::Teacher
    }
}

impl From<&Session> for Principal {
    fn from(session: &Session) -> Self {
        Self {
            account_id: session.account_id,
            role: session.role,
        }
    }
}
