//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod account;
pub mod class;
pub mod subject;
pub mod grade;
pub mod session;

// Re-export commonly used models
pub use account::{Account, Role, RegisterRequest, CreateAccountRequest};
pub use class::{Class, CreateClassRequest, ClassOverview};
pub use subject::{Subject, CreateSubjectRequest};
pub use grade::{Grade, GradeRecord, RecordGradeRequest};
pub use session::{Session, Principal};
