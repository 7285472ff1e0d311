//! Class management service
//!
//! Class creation, class membership and subject management. Teachers own
//! classes; students hold at most one class membership at a time.

use tracing::{debug, info, warn};
use crate::config::ClassesConfig;
use crate::database::DatabaseService;
use crate::models::{
    Account, Class, ClassOverview, CreateClassRequest, CreateSubjectRequest, Principal, Role,
    Subject,
};
use crate::services::auth::require_role;
use crate::utils::errors::{ClassbookError, Result};
use crate::utils::{helpers, logging};

#[derive(Clone, Debug)]
pub struct ClassService {
    db: DatabaseService,
    config: ClassesConfig,
}

impl ClassService {
    pub fn new(db: DatabaseService, config: ClassesConfig) -> Self {
        Self { db, config }
    }

    /// Create a class owned by the calling teacher
    pub async fn create_class(&self, principal: &Principal, name: &str) -> Result<Class> {
        require_role(principal, Role::Teacher)?;
        let name = helpers::required_field(name, "Class name")?;

        let class = self.db.classes.create(CreateClassRequest {
            name,
            teacher_id: principal.account_id,
        }).await?;

        logging::log_class_event(class.id, "created", principal.account_id, Some(&class.name));
        Ok(class)
    }

    /// Set the calling student's class membership
    ///
    /// A missing class is only logged unless `strict_join` is configured.
    pub async fn join_class(&self, principal: &Principal, class_id: i64) -> Result<Account> {
        require_role(principal, Role::Student)?;

        if self.db.classes.find_by_id(class_id).await?.is_none() {
            if self.config.strict_join {
                return Err(ClassbookError::ClassNotFound { class_id });
            }
            warn!(
                account_id = principal.account_id,
                class_id = class_id,
                "Student joined a class id that does not exist"
            );
        }

        let account = self.db.accounts.set_class(principal.account_id, class_id).await?;
        logging::log_class_event(class_id, "joined", principal.account_id, None);
        Ok(account)
    }

    /// Class page for its owning teacher: subjects and enrolled students
    pub async fn manage_class(&self, principal: &Principal, class_id: i64) -> Result<ClassOverview> {
        let class = self.owned_class(principal, class_id).await?;
        let subjects = self.db.subjects.list_by_class(class.id).await?;
        let students = self.db.accounts.list_students_in_class(class.id).await?;

        debug!(class_id = class.id, subjects = subjects.len(), students = students.len(), "Class overview loaded");
        Ok(ClassOverview { class, subjects, students })
    }

    /// Add a subject to a class owned by the calling teacher
    pub async fn create_subject(&self, principal: &Principal, class_id: i64, name: &str) -> Result<Subject> {
        let class = self.owned_class(principal, class_id).await?;
        let name = helpers::required_field(name, "Subject name")?;

        let subject = self.db.subjects.create(CreateSubjectRequest {
            name,
            class_id: class.id,
        }).await?;

        info!(subject_id = subject.id, class_id = class.id, "Subject created");
        Ok(subject)
    }

    /// Classes owned by the calling teacher
    pub async fn classes_for_teacher(&self, principal: &Principal) -> Result<Vec<Class>> {
        require_role(principal, Role::Teacher)?;
        self.db.classes.list_by_teacher(principal.account_id).await
    }

    /// Every class, for the join form
    pub async fn list_classes(&self) -> Result<Vec<Class>> {
        self.db.classes.list().await
    }

    /// Look up a class, if it exists
    pub async fn find_class(&self, class_id: i64) -> Result<Option<Class>> {
        self.db.classes.find_by_id(class_id).await
    }

    async fn owned_class(&self, principal: &Principal, class_id: i64) -> Result<Class> {
        require_role(principal, Role::Teacher)?;

        let class = self.db.classes
            .find_by_id(class_id)
            .await?
            .ok_or(ClassbookError::ClassNotFound { class_id })?;

        if class.teacher_id != principal.account_id {
            warn!(
                account_id = principal.account_id,
                class_id = class_id,
                owner_id = class.teacher_id,
                "Teacher tried to manage a class they do not own"
            );
            return Err(ClassbookError::Forbidden("This class belongs to another teacher".to_string()));
        }

        Ok(class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use crate::database::test_pool;
    use crate::models::CreateAccountRequest;

    async fn setup(strict_join: bool) -> (tempfile::TempDir, DatabaseService, ClassService) {
        let (dir, pool) = test_pool().await;
        let db = DatabaseService::new(pool);
        let service = ClassService::new(db.clone(), ClassesConfig { strict_join });
        (dir, db, service)
    }

    async fn principal(db: &DatabaseService, name: &str, role: Role) -> Principal {
        let account = db.accounts.create(CreateAccountRequest {
            username: name.to_string(),
            email: format!("{}@example.com", name),
            password_hash: "hash".to_string(),
            role,
        }).await.unwrap();
        Principal { account_id: account.id, role }
    }

    #[tokio::test]
    async fn test_only_teachers_create_classes() {
        let (_dir, db, service) = setup(false).await;
        let teacher = principal(&db, "t1", Role::Teacher).await;
        let student = principal(&db, "s1", Role::Student).await;

        assert_matches!(service.create_class(&student, "Math-9").await, Err(ClassbookError::Forbidden(_)));
        assert_eq!(db.classes.count().await.unwrap(), 0);

        let class = service.create_class(&teacher, " Math-9 ").await.unwrap();
        assert_eq!(class.name, "Math-9");
        assert_eq!(class.teacher_id, teacher.account_id);

        assert_matches!(service.create_class(&teacher, "").await, Err(ClassbookError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_only_students_join_classes() {
        let (_dir, db, service) = setup(false).await;
        let teacher = principal(&db, "t1", Role::Teacher).await;
        let class = service.create_class(&teacher, "Math-9").await.unwrap();

        assert_matches!(service.join_class(&teacher, class.id).await, Err(ClassbookError::Forbidden(_)));
        let stored = db.accounts.find_by_id(teacher.account_id).await.unwrap().unwrap();
        assert!(stored.class_id.is_none());

        let student = principal(&db, "s1", Role::Student).await;
        let joined = service.join_class(&student, class.id).await.unwrap();
        assert_eq!(joined.class_id, Some(class.id));
    }

    #[tokio::test]
    async fn test_join_of_missing_class_is_lax_by_default() {
        let (_dir, db, service) = setup(false).await;
        let student = principal(&db, "s1", Role::Student).await;

        let joined = service.join_class(&student, 999).await.unwrap();
        assert_eq!(joined.class_id, Some(999));
    }

    #[tokio::test]
    async fn test_join_of_missing_class_is_rejected_when_strict() {
        let (_dir, db, service) = setup(true).await;
        let student = principal(&db, "s1", Role::Student).await;

        assert_matches!(service.join_class(&student, 999).await, Err(ClassbookError::ClassNotFound { class_id: 999 }));
        let stored = db.accounts.find_by_id(student.account_id).await.unwrap().unwrap();
        assert!(stored.class_id.is_none());
    }

    #[tokio::test]
    async fn test_manage_class_checks_existence_and_ownership() {
        let (_dir, db, service) = setup(false).await;
        let owner = principal(&db, "t1", Role::Teacher).await;
        let other = principal(&db, "t2", Role::Teacher).await;
        let student = principal(&db, "s1", Role::Student).await;
        let class = service.create_class(&owner, "Math-9").await.unwrap();

        assert_matches!(service.manage_class(&owner, class.id + 1).await, Err(ClassbookError::ClassNotFound { .. }));
        assert_matches!(service.manage_class(&other, class.id).await, Err(ClassbookError::Forbidden(_)));
        assert_matches!(service.manage_class(&student, class.id).await, Err(ClassbookError::Forbidden(_)));
        assert_matches!(service.create_subject(&other, class.id, "Algebra").await, Err(ClassbookError::Forbidden(_)));

        service.join_class(&student, class.id).await.unwrap();
        let subject = service.create_subject(&owner, class.id, "Algebra").await.unwrap();

        let overview = service.manage_class(&owner, class.id).await.unwrap();
        assert_eq!(overview.class.id, class.id);
        assert_eq!(overview.subjects.len(), 1);
        assert_eq!(overview.subjects[0].id, subject.id);
        assert_eq!(overview.students.len(), 1);
        assert_eq!(overview.students[0].id, student.account_id);
    }
}
