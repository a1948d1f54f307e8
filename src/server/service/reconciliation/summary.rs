//! Per-tenant and per-tick counters emitted as structured log fields.

use crate::server::model::reconciliation::{Eligibility, HolderOutcome, RoleChange, TenantSkip};

/// Result of reconciling one tenant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TenantReport {
    /// Discord guild ID.
    pub tenant_id: u64,
    /// Set when a guard stopped the tenant before any holder was processed.
    pub skipped: Option<TenantSkip>,
    /// Tenant processing panicked outside the per-holder guard.
    pub panicked: bool,
    /// Holders processed, failed ones included.
    pub holders_checked: usize,
    /// Holders no longer in the guild, marked inactive.
    pub holders_left: usize,
    /// Holders whose eligibility could not be determined.
    pub holders_unknown: usize,
    /// Successful role grants.
    pub roles_granted: usize,
    /// Successful role revocations.
    pub roles_revoked: usize,
    /// Grants or revocations Discord rejected.
    pub role_failures: usize,
    /// Holder rows actually changed in the store.
    pub store_writes: usize,
    /// Holders that panicked or whose store write failed.
    pub holder_errors: usize,
}

impl TenantReport {
    pub fn new(tenant_id: u64) -> Self {
        Self {
            tenant_id,
            ..Default::default()
        }
    }

    pub fn panicked(tenant_id: u64) -> Self {
        Self {
            tenant_id,
            panicked: true,
            ..Default::default()
        }
    }

    /// Folds one holder's outcome into the counters.
    pub fn record(&mut self, outcome: &HolderOutcome) {
        self.holders_checked += 1;

        if outcome.left_guild {
            self.holders_left += 1;
        }
        if outcome.eligibility == Some(Eligibility::Unknown) {
            self.holders_unknown += 1;
        }

        match outcome.role_change {
            Some(RoleChange::Granted) => self.roles_granted += 1,
            Some(RoleChange::Revoked) => self.roles_revoked += 1,
            Some(RoleChange::GrantFailed | RoleChange::RevokeFailed) => self.role_failures += 1,
            None => {}
        }

        if outcome.persisted {
            self.store_writes += 1;
        }
        if outcome.write_failed {
            self.holder_errors += 1;
        }
    }
}

/// Aggregate counters for one tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickSummary {
    pub tenants_checked: usize,
    pub tenants_skipped: usize,
    pub tenants_failed: usize,
    pub holders_checked: usize,
    pub roles_granted: usize,
    pub roles_revoked: usize,
    pub role_failures: usize,
    pub store_writes: usize,
    pub holder_errors: usize,
}

impl TickSummary {
    pub fn record(&mut self, report: &TenantReport) {
        self.tenants_checked += 1;

        if report.skipped.is_some() {
            self.tenants_skipped += 1;
        }
        if report.panicked {
            self.tenants_failed += 1;
        }

        self.holders_checked += report.holders_checked;
        self.roles_granted += report.roles_granted;
        self.roles_revoked += report.roles_revoked;
        self.role_failures += report.role_failures;
        self.store_writes += report.store_writes;
        self.holder_errors += report.holder_errors;
    }

    /// Total role mutations performed, failed attempts excluded.
    pub fn role_mutations(&self) -> usize {
        self.roles_granted + self.roles_revoked
    }

    pub fn log(&self) {
        tracing::info!(
            tenants_checked = self.tenants_checked,
            tenants_skipped = self.tenants_skipped,
            tenants_failed = self.tenants_failed,
            holders_checked = self.holders_checked,
            roles_granted = self.roles_granted,
            roles_revoked = self.roles_revoked,
            role_failures = self.role_failures,
            store_writes = self.store_writes,
            holder_errors = self.holder_errors,
            "Reconciliation tick complete"
        );
    }
}
