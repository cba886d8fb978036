//! Shared utilities, configuration, and error handling for Laminas
//!
//! This crate provides common functionality used across the Laminas application:
//! - Configuration management following 12-factor principles
//! - Error types and handling
//! - Database error classification
//! - Request extractors

pub mod config;
pub mod db;
pub mod error;
pub mod extractors;

pub use config::{Config, StorageBackend};
pub use error::{Error, Result};
pub use extractors::{ApiPath, ApiQuery, ValidatedJson};
