//! Test helpers module
//!
//! This module provides utilities and helpers for testing the Classbook application.
//! It includes database helpers, an in-process HTTP client and test data builders.

#![allow(dead_code)]

pub mod database_helper;
pub mod test_app;
pub mod test_data;

pub use database_helper::*;
pub use test_app::*;
pub use test_data::*;
