//! Database service layer
//!
//! This module bundles the repositories behind a single cloneable handle

use crate::database::{
    DatabasePool, AccountRepository, ClassRepository, SubjectRepository, GradeRepository,
    SessionRepository,
};
use crate::utils::errors::ClassbookError;

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pub accounts: AccountRepository,
    pub classes: ClassRepository,
    pub subjects: SubjectRepository,
    pub grades: GradeRepository,
    pub sessions: SessionRepository,
    pool: DatabasePool,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            accounts: AccountRepository::new(pool.clone()),
            classes: ClassRepository::new(pool.clone()),
            subjects: SubjectRepository::new(pool.clone()),
            grades: GradeRepository::new(pool.clone()),
            sessions: SessionRepository::new(pool.clone()),
            pool,
        }
    }

    /// Check that the underlying database answers
    pub async fn health_check(&self) -> Result<(), ClassbookError> {
        super::connection::health_check(&self.pool).await
    }
}
