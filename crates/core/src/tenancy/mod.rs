//! Ownership filtering and scope stamping.
//!
//! Every persisted record optionally carries the `{admin, branch}` pair of
//! the caller that created it. This module decides which records a caller
//! may see and stamps new records with the caller's identity.

pub mod error;
pub mod filter;

pub use error::TenancyError;
pub use filter::{OwnershipFilter, ScopePolicy, Scoped};
