//! Shared test utilities for examdocs integration tests.
//!
//! This module provides:
//! - Builders for exam configurations, records and sample images
//! - Test doubles for the classifier and the conversion engine

pub mod builders;
pub mod doubles;

pub use builders::*;
pub use doubles::*;
