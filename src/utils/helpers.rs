//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

use std::sync::OnceLock;
use regex::Regex;
use crate::utils::errors::{ClassbookError, Result};

static EMAIL_RE: OnceLock<Option<Regex>> = OnceLock::new();

fn email_regex() -> Option<&'static Regex> {
    EMAIL_RE
        .get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").ok())
        .as_ref()
}

/// Validate email format
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_some_and(|re| re.is_match(email))
}

/// Normalize whitespace in text
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Return the normalized value of a required form field, or `InvalidInput` naming it
pub fn required_field(value: &str, field: &str) -> Result<String> {
    let value = normalize_whitespace(value);
    if value.is_empty() {
        return Err(ClassbookError::InvalidInput(format!("{} is required", field)));
    }
    Ok(value)
}

/// Parse a numeric identifier coming from a form field
pub fn parse_id(value: &str, field: &str) -> Result<i64> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| ClassbookError::InvalidInput(format!("{} must be a number", field)))
}

/// Generate a random alphanumeric string
pub fn generate_random_string(length: usize) -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ\
                            abcdefghijklmnopqrstuvwxyz\
                            0123456789";
    let mut rng = rand::thread_rng();

    (0..length)
        .map(|_| {
            let idx = rng.gen_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}
