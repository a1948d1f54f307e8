//! Periodic convergence of Discord roles and holder records with on-chain balances.
//!
//! A tick lists every tenant with a completed configuration, validates each one and walks
//! its holders sequentially: membership is resolved live, eligibility is computed from
//! the linked wallets, the gated role is granted or revoked to match, and the stored
//! `active` flag and username are refreshed when they changed.
//!
//! Tenants run through a bounded worker pool. A panic or error inside one holder or one
//! tenant is logged and counted without affecting the rest of the tick.

pub mod eligibility;
pub mod holder;
pub mod summary;
pub mod tenant;
pub mod traits;

#[cfg(test)]
pub(crate) mod test;

use futures::{stream, FutureExt, StreamExt};
use std::{panic::AssertUnwindSafe, sync::Arc};

use crate::server::{
    error::AppError,
    model::{balance::UnknownBalancePolicy, reconciliation::Eligibility},
};

use self::{
    summary::{TenantReport, TickSummary},
    tenant::TenantTarget,
    traits::{BalanceOracle, GuildGateway, HolderStore, TenantConfigStore},
};

/// Audit log reasons attached to role mutations.
#[derive(Debug, Clone, Copy)]
pub struct RoleReasons {
    pub grant: &'static str,
    pub revoke: &'static str,
}

/// Reasons used by the scheduled tick.
pub const PERIODIC_REASONS: RoleReasons = RoleReasons {
    grant: "Verified token holder (periodic check)",
    revoke: "Token balance below threshold (periodic check)",
};

/// Reasons used when a user links a wallet.
pub const LINK_REASONS: RoleReasons = RoleReasons {
    grant: "Verified token holder via bot",
    revoke: "Token balance below threshold",
};

/// Tunables of the reconciliation loop.
#[derive(Debug, Clone, Copy)]
pub struct ReconcileSettings {
    /// Number of tenants processed at the same time. 1 processes them sequentially.
    pub max_concurrent_tenants: usize,
    pub unknown_balance_policy: UnknownBalancePolicy,
}

impl Default for ReconcileSettings {
    fn default() -> Self {
        Self {
            max_concurrent_tenants: 1,
            unknown_balance_policy: UnknownBalancePolicy::Skip,
        }
    }
}

/// Drives convergence across all tenants through the four collaborator seams.
#[derive(Clone)]
pub struct Reconciler {
    tenants: Arc<dyn TenantConfigStore>,
    holders: Arc<dyn HolderStore>,
    oracle: Arc<dyn BalanceOracle>,
    guilds: Arc<dyn GuildGateway>,
    settings: ReconcileSettings,
}

impl Reconciler {
    pub fn new(
        tenants: Arc<dyn TenantConfigStore>,
        holders: Arc<dyn HolderStore>,
        oracle: Arc<dyn BalanceOracle>,
        guilds: Arc<dyn GuildGateway>,
        settings: ReconcileSettings,
    ) -> Self {
        Self {
            tenants,
            holders,
            oracle,
            guilds,
            settings,
        }
    }

    pub fn guilds(&self) -> &Arc<dyn GuildGateway> {
        &self.guilds
    }

    pub fn oracle(&self) -> &Arc<dyn BalanceOracle> {
        &self.oracle
    }

    /// Runs one full reconciliation pass over every configured tenant.
    ///
    /// An empty tenant list ends the tick early. Per-tenant skips, holder errors and
    /// panics are folded into the returned summary, which is also logged.
    ///
    /// # Returns
    /// - `Ok(TickSummary)` - Counters for the pass
    /// - `Err(AppError)` - Tenant list could not be read, nothing was processed
    pub async fn run_tick(&self) -> Result<TickSummary, AppError> {
        let tenants = self.tenants.list_tenants().await?;

        if tenants.is_empty() {
            tracing::info!("No configured tenants, skipping reconciliation tick");
            return Ok(TickSummary::default());
        }

        let workers = self.settings.max_concurrent_tenants.max(1);

        let reports: Vec<TenantReport> = stream::iter(tenants)
            .map(|tenant| async move {
                let tenant_id = tenant.tenant_id;
                match AssertUnwindSafe(self.reconcile_tenant(&tenant))
                    .catch_unwind()
                    .await
                {
                    Ok(report) => report,
                    Err(_) => {
                        tracing::error!(tenant_id, "Tenant reconciliation panicked");
                        TenantReport::panicked(tenant_id)
                    }
                }
            })
            .buffer_unordered(workers)
            .collect()
            .await;

        let mut summary = TickSummary::default();
        for report in &reports {
            summary.record(report);
        }
        summary.log();

        Ok(summary)
    }

    /// Computes eligibility of a set of addresses against a tenant's threshold.
    pub async fn evaluate(&self, addresses: &[String], target: &TenantTarget) -> Eligibility {
        eligibility::evaluate(
            self.oracle.as_ref(),
            addresses,
            target,
            self.settings.unknown_balance_policy,
        )
        .await
    }
}
