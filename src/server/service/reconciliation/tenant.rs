use futures::FutureExt;
use num_bigint::BigUint;
use std::panic::AssertUnwindSafe;

use crate::server::model::{
    balance::parse_raw_amount, holder::Holder, reconciliation::TenantSkip,
    tenant_config::TenantConfig,
};

use super::{summary::TenantReport, Reconciler};

/// Validated tenant settings used while converging holders.
#[derive(Debug, Clone, PartialEq)]
pub struct TenantTarget {
    pub tenant_id: u64,
    pub role_id: u64,
    pub token_mint: String,
    pub rpc_url: String,
    /// Parsed raw threshold.
    pub required: BigUint,
}

impl TenantTarget {
    /// Parses the stored threshold.
    ///
    /// # Returns
    /// - `Ok(TenantTarget)` - Threshold is a non-negative integer
    /// - `Err(TenantSkip::InvalidRequiredBalance)` - Threshold is empty, negative or fractional
    pub fn from_config(config: &TenantConfig) -> Result<Self, TenantSkip> {
        let required = parse_raw_amount(&config.required_balance)
            .map_err(|e| TenantSkip::InvalidRequiredBalance(e.to_string()))?;

        Ok(Self {
            tenant_id: config.tenant_id,
            role_id: config.role_id,
            token_mint: config.token_mint.clone(),
            rpc_url: config.rpc_url.clone(),
            required,
        })
    }
}

impl Reconciler {
    /// Validates one tenant and converges each of its holders in turn.
    ///
    /// Never fails: skips and holder-level errors are recorded in the report.
    pub async fn reconcile_tenant(&self, config: &TenantConfig) -> TenantReport {
        let tenant_id = config.tenant_id;
        let mut report = TenantReport::new(tenant_id);

        let (target, holders) = match self.prepare_tenant(config).await {
            Ok(prepared) => prepared,
            Err(skip) => {
                match skip {
                    TenantSkip::NoHolders => {
                        tracing::debug!(tenant_id, "Skipping tenant: {}", skip)
                    }
                    TenantSkip::HolderFetchFailed => {
                        tracing::error!(tenant_id, "Skipping tenant: {}", skip)
                    }
                    _ => tracing::warn!(tenant_id, "Skipping tenant: {}", skip),
                }
                report.skipped = Some(skip);
                return report;
            }
        };

        for holder in &holders {
            let user_id = holder.user_id;
            match AssertUnwindSafe(self.converge_holder(&target, holder))
                .catch_unwind()
                .await
            {
                Ok(outcome) => report.record(&outcome),
                Err(_) => {
                    tracing::error!(tenant_id, user_id, "Holder reconciliation panicked");
                    report.holders_checked += 1;
                    report.holder_errors += 1;
                }
            }
        }

        report
    }

    /// Runs the tenant guards in order, stopping at the first failure.
    async fn prepare_tenant(
        &self,
        config: &TenantConfig,
    ) -> Result<(TenantTarget, Vec<Holder>), TenantSkip> {
        let target = TenantTarget::from_config(config)?;

        let hierarchy = self
            .guilds
            .resolve_tenant(target.tenant_id, target.role_id)
            .await?;
        hierarchy.check_manageable()?;

        let holders = self
            .holders
            .list_holders(target.tenant_id)
            .await
            .map_err(|e| {
                tracing::error!(tenant_id = target.tenant_id, "Failed to list holders: {}", e);
                TenantSkip::HolderFetchFailed
            })?;

        if holders.is_empty() {
            return Err(TenantSkip::NoHolders);
        }

        Ok((target, holders))
    }
}
