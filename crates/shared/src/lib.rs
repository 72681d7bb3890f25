//! Shared types, errors, and configuration for Kasbon.
//!
//! This crate provides common types used across all other crates:
//! - Tenant scope identifying which admin/branch owns a record
//! - Typed IDs for type-safe entity references
//! - The error-kind taxonomy shared by all domain errors
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::ErrorKind;
pub use types::{AccountId, TenantScope, TransactionId};
