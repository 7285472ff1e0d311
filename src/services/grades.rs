//! Grade service
//!
//! Teachers append grades for subjects of their own classes; listings are
//! filtered by the caller's role.

use tracing::{debug, warn};
use crate::config::{GradesConfig, TeacherGradeScope};
use crate::database::DatabaseService;
use crate::models::{Grade, GradeRecord, Principal, RecordGradeRequest, Role};
use crate::services::auth::require_role;
use crate::utils::errors::{ClassbookError, Result};
use crate::utils::{helpers, logging};

#[derive(Clone, Debug)]
pub struct GradeService {
    db: DatabaseService,
    config: GradesConfig,
}

impl GradeService {
    pub fn new(db: DatabaseService, config: GradesConfig) -> Self {
        Self { db, config }
    }

    /// Record a score for a student in a subject of one of the caller's classes
    pub async fn record_grade(&self, principal: &Principal, request: RecordGradeRequest) -> Result<Grade> {
        require_role(principal, Role::Teacher)?;

        let period = helpers::required_field(&request.period, "Period")?;
        if !request.score.is_finite() {
            return Err(ClassbookError::InvalidInput("Score must be a number".to_string()));
        }

        let subject = self.db.subjects
            .find_by_id(request.subject_id)
            .await?
            .ok_or(ClassbookError::SubjectNotFound { subject_id: request.subject_id })?;

        let class = self.db.classes
            .find_by_id(subject.class_id)
            .await?
            .ok_or(ClassbookError::ClassNotFound { class_id: subject.class_id })?;
        if class.teacher_id != principal.account_id {
            return Err(ClassbookError::Forbidden("This subject belongs to another teacher's class".to_string()));
        }

        let student = self.db.accounts
            .find_by_id(request.student_id)
            .await?
            .filter(|account| account.role == Role::Student)
            .ok_or(ClassbookError::AccountNotFound { account_id: request.student_id })?;

        if student.class_id != Some(class.id) {
            warn!(
                student_id = student.id,
                student_class_id = ?student.class_id,
                subject_class_id = class.id,
                "Grade recorded for a student outside the subject's class"
            );
        }

        let grade = self.db.grades.create(RecordGradeRequest {
            student_id: student.id,
            subject_id: subject.id,
            period,
            score: request.score,
        }).await?;

        logging::log_grade_event(grade.id, grade.student_id, grade.subject_id, principal.account_id);
        Ok(grade)
    }

    /// Grades visible to the caller
    ///
    /// Students see their own rows. Teachers see every row unless the
    /// teacher scope is restricted to their own classes.
    pub async fn list_grades(&self, principal: &Principal) -> Result<Vec<GradeRecord>> {
        let records = match (principal.role, self.config.teacher_scope) {
            (Role::Student, _) => self.db.grades.list_by_student(principal.account_id).await?,
            (Role::Teacher, TeacherGradeScope::All) => self.db.grades.list_all().await?,
            (Role::Teacher, TeacherGradeScope::OwnClasses) => {
                self.db.grades.list_by_teacher(principal.account_id).await?
            }
        };

        debug!(account_id = principal.account_id, role = %principal.role, rows = records.len(), "Grades listed");
        Ok(records)
    }
}
