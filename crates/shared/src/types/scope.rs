//! Tenant scope identifying the calling admin and branch.
//!
//! Every public ledger operation takes the caller's scope as an explicit
//! parameter rather than reading ambient session state, so batch jobs,
//! tests, and multiple simultaneous sessions cannot cross-talk.

use serde::{Deserialize, Serialize};

/// The `{admin, branch}` pair identifying which business and branch a
/// caller acts for.
///
/// `None` in an `Option<&TenantScope>` parameter means "no session" and is
/// never treated as a wildcard.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TenantScope {
    /// The business owner (admin) identifier.
    pub admin_id: String,
    /// The branch identifier within that business.
    pub branch_id: String,
}

impl TenantScope {
    /// Creates a new tenant scope.
    #[must_use]
    pub fn new(admin_id: impl Into<String>, branch_id: impl Into<String>) -> Self {
        Self {
            admin_id: admin_id.into(),
            branch_id: branch_id.into(),
        }
    }
}

impl std::fmt::Display for TenantScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.admin_id, self.branch_id)
    }
}
