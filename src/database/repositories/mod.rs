//! Database repositories module
//!
//! This module contains all repository implementations for data access

pub mod account;
pub mod class;
pub mod subject;
pub mod grade;
pub mod session;

// Re-export repositories
pub use account::AccountRepository;
pub use class::ClassRepository;
pub use subject::SubjectRepository;
pub use grade::GradeRepository;
pub use session::SessionRepository;
