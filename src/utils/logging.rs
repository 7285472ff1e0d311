//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the Classbook application.

use tracing::{info, warn, debug};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use crate::config::LoggingConfig;
use crate::utils::errors::{ClassbookError, Result};

/// Initialize logging based on configuration
///
/// When a log file is configured the returned guard must be kept alive for the
/// lifetime of the process, otherwise buffered lines are lost.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_new(&config.level)
        .map_err(|e| ClassbookError::Config(format!("Invalid log filter {:?}: {}", config.level, e)))?;

    let stdout_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stdout);

    let (file_layer, guard) = match config.file_path.as_deref() {
        Some(path) if !path.is_empty() => {
            let file_appender = tracing_appender::rolling::daily(path, "classbook.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking);
            (Some(layer), Some(guard))
        }
        _ => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| ClassbookError::Config(format!("Logging already initialized: {}", e)))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log account lifecycle actions with structured data
pub fn log_account_action(account_id: i64, action: &str, details: Option<&str>) {
    info!(
        account_id = account_id,
        action = action,
        details = details,
        "Account action performed"
    );
}

/// Log authentication attempts
pub fn log_auth_event(email: &str, action: &str, success: bool, details: Option<&str>) {
    if success {
        info!(
            email = email,
            action = action,
            details = details,
            "Authentication event: success"
        );
    } else {
        warn!(
            email = email,
            action = action,
            details = details,
            "Authentication event: failure"
        );
    }
}

/// Log class events
pub fn log_class_event(class_id: i64, event: &str, account_id: i64, details: Option<&str>) {
    info!(
        class_id = class_id,
        event = event,
        account_id = account_id,
        details = details,
        "Class event occurred"
    );
}

/// Log grade bookkeeping
pub fn log_grade_event(grade_id: i64, student_id: i64, subject_id: i64, teacher_id: i64) {
    info!(
        grade_id = grade_id,
        student_id = student_id,
        subject_id = subject_id,
        teacher_id = teacher_id,
        "Grade recorded"
    );
}

/// Log database operations
pub fn log_database_operation(operation: &str, table: &str, duration_ms: u64) {
    debug!(
        operation = operation,
        table = table,
        duration_ms = duration_ms,
        "Database operation completed"
    );
}
