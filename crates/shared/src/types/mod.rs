//! Shared value types.

pub mod id;
pub mod scope;

pub use id::{AccountId, TransactionId};
pub use scope::TenantScope;
