//! Visibility rules for tenant-scoped collections.

use kasbon_shared::TenantScope;
use uuid::Uuid;

use super::error::TenancyError;

/// A record that can carry a tenant scope.
///
/// Implemented by every persisted entity. Records with neither an admin
/// nor a branch are legacy/unscoped and treated as globally visible.
pub trait Scoped {
    /// Stable identifier of the record, used for removal by id.
    fn record_id(&self) -> Uuid;

    /// The admin this record belongs to, if any.
    fn owner_admin(&self) -> Option<&str>;

    /// The branch this record belongs to, if any.
    fn owner_branch(&self) -> Option<&str>;

    /// Overwrites the record's scope with the given caller scope.
    fn assign_scope(&mut self, scope: &TenantScope);
}

/// How strictly the branch component of a scope is matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScopePolicy {
    /// Record must match the caller's admin, and its branch must match or
    /// be absent.
    #[default]
    AdminAndBranch,
    /// Record must match the caller's admin only; branch is ignored.
    ///
    /// Used for resources shared across all of one admin's branches, such
    /// as the master product catalog.
    AdminOnly,
}

/// Pure, read-only visibility filter over heterogeneous scoped records.
#[derive(Debug, Clone, Copy, Default)]
pub struct OwnershipFilter {
    policy: ScopePolicy,
}

impl OwnershipFilter {
    /// Creates a filter matching both admin and branch.
    #[must_use]
    pub const fn branch_scoped() -> Self {
        Self {
            policy: ScopePolicy::AdminAndBranch,
        }
    }

    /// Creates a filter matching the admin only.
    #[must_use]
    pub const fn admin_only() -> Self {
        Self {
            policy: ScopePolicy::AdminOnly,
        }
    }

    /// Decides whether a single record is visible to the caller.
    ///
    /// A record is visible if its admin matches the caller's admin and its
    /// branch matches or is absent (or, under `AdminOnly`, regardless of
    /// branch), or if the record is fully unscoped. A caller with no
    /// session sees nothing.
    #[must_use]
    pub fn is_visible<T: Scoped>(&self, caller: Option<&TenantScope>, record: &T) -> bool {
        let Some(scope) = caller else {
            return false;
        };

        // Fully unscoped legacy records are visible to every session.
        if record.owner_admin().is_none() && record.owner_branch().is_none() {
            return true;
        }

        let admin_matches = record.owner_admin() == Some(scope.admin_id.as_str());
        if !admin_matches {
            return false;
        }

        match self.policy {
            ScopePolicy::AdminOnly => true,
            ScopePolicy::AdminAndBranch => match record.owner_branch() {
                None => true,
                Some(branch) => branch == scope.branch_id,
            },
        }
    }

    /// Returns the subset of `records` visible to the caller.
    #[must_use]
    pub fn visible<T: Scoped>(&self, caller: Option<&TenantScope>, records: Vec<T>) -> Vec<T> {
        records
            .into_iter()
            .filter(|record| self.is_visible(caller, record))
            .collect()
    }

    /// Stamps the record with the caller's scope, overwriting any prior
    /// scope. Applied on create and on update so a record always carries
    /// the identity of its latest writer's tenant.
    pub fn tag<T: Scoped>(record: &mut T, scope: &TenantScope) {
        record.assign_scope(scope);
    }

    /// Removes the record with `id` from `records` if the caller's scope
    /// owns it exactly (admin and branch both match) or the record is
    /// fully unscoped.
    ///
    /// Returns the removed record.
    ///
    /// # Errors
    ///
    /// Returns `TenancyError::NotFound` if no record has the id, and
    /// `TenancyError::PermissionDenied` if the record exists but belongs
    /// to a different scope. Ownership mismatches are surfaced, never
    /// silently ignored.
    pub fn remove_owned<T: Scoped>(
        records: &mut Vec<T>,
        id: Uuid,
        scope: &TenantScope,
    ) -> Result<T, TenancyError> {
        let position = records
            .iter()
            .position(|record| record.record_id() == id)
            .ok_or(TenancyError::NotFound(id))?;

        let record = &records[position];
        let unscoped = record.owner_admin().is_none() && record.owner_branch().is_none();
        let owned = record.owner_admin() == Some(scope.admin_id.as_str())
            && record.owner_branch() == Some(scope.branch_id.as_str());

        if !owned && !unscoped {
            return Err(TenancyError::PermissionDenied(id));
        }

        Ok(records.swap_remove(position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Record {
        id: Uuid,
        admin_id: Option<String>,
        branch_id: Option<String>,
    }

    impl Record {
        fn new(admin_id: Option<&str>, branch_id: Option<&str>) -> Self {
            Self {
                id: Uuid::new_v4(),
                admin_id: admin_id.map(ToString::to_string),
                branch_id: branch_id.map(ToString::to_string),
            }
        }
    }

    impl Scoped for Record {
        fn record_id(&self) -> Uuid {
            self.id
        }

        fn owner_admin(&self) -> Option<&str> {
            self.admin_id.as_deref()
        }

        fn owner_branch(&self) -> Option<&str> {
            self.branch_id.as_deref()
        }

        fn assign_scope(&mut self, scope: &TenantScope) {
            self.admin_id = Some(scope.admin_id.clone());
            self.branch_id = Some(scope.branch_id.clone());
        }
    }

    fn scope(admin: &str, branch: &str) -> TenantScope {
        TenantScope::new(admin, branch)
    }

    #[test]
    fn test_matching_scope_is_visible() {
        let filter = OwnershipFilter::branch_scoped();
        let record = Record::new(Some("A"), Some("1"));

        assert!(filter.is_visible(Some(&scope("A", "1")), &record));
    }

    #[test]
    fn test_other_admin_is_invisible() {
        let filter = OwnershipFilter::branch_scoped();
        let record = Record::new(Some("A"), Some("1"));

        assert!(!filter.is_visible(Some(&scope("B", "1")), &record));
    }

    #[test]
    fn test_other_branch_is_invisible() {
        let filter = OwnershipFilter::branch_scoped();
        let record = Record::new(Some("A"), Some("1"));

        assert!(!filter.is_visible(Some(&scope("A", "2")), &record));
    }

    #[test]
    fn test_branchless_record_visible_across_branches() {
        let filter = OwnershipFilter::branch_scoped();
        let record = Record::new(Some("A"), None);

        assert!(filter.is_visible(Some(&scope("A", "1")), &record));
        assert!(filter.is_visible(Some(&scope("A", "2")), &record));
        assert!(!filter.is_visible(Some(&scope("B", "1")), &record));
    }

    #[test]
    fn test_unscoped_record_visible_to_any_session() {
        let filter = OwnershipFilter::branch_scoped();
        let record = Record::new(None, None);

        assert!(filter.is_visible(Some(&scope("A", "1")), &record));
        assert!(filter.is_visible(Some(&scope("B", "9")), &record));
    }

    #[test]
    fn test_no_session_sees_nothing() {
        let filter = OwnershipFilter::branch_scoped();

        assert!(!filter.is_visible(None, &Record::new(None, None)));
        assert!(!filter.is_visible(None, &Record::new(Some("A"), Some("1"))));
    }

    #[test]
    fn test_admin_only_ignores_branch() {
        let filter = OwnershipFilter::admin_only();
        let record = Record::new(Some("A"), Some("1"));

        assert!(filter.is_visible(Some(&scope("A", "2")), &record));
        assert!(!filter.is_visible(Some(&scope("B", "2")), &record));
    }

    #[test]
    fn test_visible_filters_collection() {
        let filter = OwnershipFilter::branch_scoped();
        let records = vec![
            Record::new(Some("A"), Some("1")),
            Record::new(Some("A"), Some("2")),
            Record::new(Some("B"), Some("1")),
            Record::new(None, None),
        ];

        let caller = scope("A", "1");
        let visible = filter.visible(Some(&caller), records);

        assert_eq!(visible.len(), 2);
        assert!(visible.iter().all(|r| filter.is_visible(Some(&caller), r)));
    }

    #[test]
    fn test_tag_overwrites_prior_scope() {
        let mut record = Record::new(Some("A"), Some("1"));
        OwnershipFilter::tag(&mut record, &scope("B", "3"));

        assert_eq!(record.owner_admin(), Some("B"));
        assert_eq!(record.owner_branch(), Some("3"));
    }

    #[test]
    fn test_remove_owned_by_exact_scope() {
        let record = Record::new(Some("A"), Some("1"));
        let id = record.record_id();
        let mut records = vec![record];

        let removed = OwnershipFilter::remove_owned(&mut records, id, &scope("A", "1")).unwrap();
        assert_eq!(removed.record_id(), id);
        assert!(records.is_empty());
    }

    #[test]
    fn test_remove_unscoped_record_allowed() {
        let record = Record::new(None, None);
        let id = record.record_id();
        let mut records = vec![record];

        assert!(OwnershipFilter::remove_owned(&mut records, id, &scope("A", "1")).is_ok());
    }

    #[test]
    fn test_remove_foreign_record_is_denied() {
        let record = Record::new(Some("A"), Some("1"));
        let id = record.record_id();
        let mut records = vec![record];

        let result = OwnershipFilter::remove_owned(&mut records, id, &scope("B", "1"));
        assert!(matches!(result, Err(TenancyError::PermissionDenied(_))));
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_remove_branch_mismatch_is_denied() {
        // Removal requires an exact branch match even though branchless
        // visibility is looser.
        let record = Record::new(Some("A"), Some("1"));
        let id = record.record_id();
        let mut records = vec![record];

        let result = OwnershipFilter::remove_owned(&mut records, id, &scope("A", "2"));
        assert!(matches!(result, Err(TenancyError::PermissionDenied(_))));
    }

    #[test]
    fn test_remove_missing_record_is_not_found() {
        let mut records: Vec<Record> = vec![Record::new(Some("A"), Some("1"))];

        let result = OwnershipFilter::remove_owned(&mut records, Uuid::new_v4(), &scope("A", "1"));
        assert!(matches!(result, Err(TenancyError::NotFound(_))));
        assert_eq!(records.len(), 1);
    }

    fn tenant_id_strategy() -> impl Strategy<Value = String> {
        "[a-z]{1,6}"
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// A record stamped with a caller's scope is always visible to
        /// that caller and never to a caller under a different admin.
        #[test]
        fn prop_tagged_record_visible_to_tagger(
            admin in tenant_id_strategy(),
            branch in tenant_id_strategy(),
            other_admin in tenant_id_strategy(),
        ) {
            prop_assume!(admin != other_admin);

            let caller = TenantScope::new(admin, branch.clone());
            let stranger = TenantScope::new(other_admin, branch);

            let mut record = Record::new(None, None);
            OwnershipFilter::tag(&mut record, &caller);

            let filter = OwnershipFilter::branch_scoped();
            prop_assert!(filter.is_visible(Some(&caller), &record));
            prop_assert!(!filter.is_visible(Some(&stranger), &record));
        }

        /// Visibility under `AdminAndBranch` is never broader than under
        /// `AdminOnly` for the same caller and record.
        #[test]
        fn prop_branch_policy_is_stricter(
            caller_admin in tenant_id_strategy(),
            caller_branch in tenant_id_strategy(),
            record_admin in proptest::option::of(tenant_id_strategy()),
            record_branch in proptest::option::of(tenant_id_strategy()),
        ) {
            let caller = TenantScope::new(caller_admin, caller_branch);
            let record = Record {
                id: Uuid::new_v4(),
                admin_id: record_admin,
                branch_id: record_branch,
            };

            let strict = OwnershipFilter::branch_scoped();
            let loose = OwnershipFilter::admin_only();

            if strict.is_visible(Some(&caller), &record) {
                prop_assert!(loose.is_visible(Some(&caller), &record));
            }
        }
    }
}
