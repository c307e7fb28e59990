//! Shared types, errors, and configuration for Autonomo.
//!
//! This crate provides common types used across all other crates:
//! - Money, rate and percentage types with decimal precision
//! - Calendar period keys (`YYYY-MM`, `YYYY-QN`)
//! - Typed string IDs for workspaces and records
//! - Validation and application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult, ValidationError};
