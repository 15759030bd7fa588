//! Shared types, errors, and configuration for Tourdesk.
//!
//! This crate provides common types used across all other crates:
//! - Money and currency codes with decimal precision
//! - Typed IDs for catalog references
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
