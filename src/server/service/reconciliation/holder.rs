use crate::server::model::{
    discord::GuildMember,
    holder::{Holder, HolderUpdate},
    reconciliation::{Eligibility, HolderOutcome, RoleChange},
};

use super::{tenant::TenantTarget, Reconciler, RoleReasons, PERIODIC_REASONS};

impl Reconciler {
    /// Converges one holder's role and stored record with their current eligibility.
    ///
    /// A holder whose membership no longer resolves is marked inactive once and gets no
    /// role call. Otherwise the role follows eligibility based on the live role list, and
    /// the store is written only when `active` or the username changed. An `Unknown`
    /// eligibility leaves both the role and the `active` flag alone.
    pub async fn converge_holder(&self, target: &TenantTarget, holder: &Holder) -> HolderOutcome {
        let tenant_id = target.tenant_id;
        let user_id = holder.user_id;

        let Some(member) = self.guilds.resolve_member(tenant_id, user_id).await else {
            let mut outcome = HolderOutcome {
                left_guild: true,
                ..Default::default()
            };

            if holder.active {
                tracing::info!(tenant_id, user_id, "Holder left guild, marking inactive");
                self.persist(
                    tenant_id,
                    user_id,
                    HolderUpdate {
                        active: Some(false),
                        username: None,
                    },
                    &mut outcome,
                )
                .await;
            }

            return outcome;
        };

        let eligibility = self.evaluate(&holder.addresses, target).await;
        let role_change = self
            .apply_role(target, &member, eligibility, PERIODIC_REASONS)
            .await;

        let mut outcome = HolderOutcome {
            left_guild: false,
            eligibility: Some(eligibility),
            role_change,
            ..Default::default()
        };

        let mut update = HolderUpdate::default();
        if let Some(active) = eligibility.as_active() {
            if active != holder.active {
                update.active = Some(active);
            }
        }
        if member.username != holder.username {
            update.username = Some(member.username.clone());
        }

        if !update.is_empty() {
            self.persist(tenant_id, user_id, update, &mut outcome).await;
        }

        outcome
    }

    /// Grants or revokes the gated role so possession matches eligibility.
    ///
    /// Compares against the member's live role list. Mutation failures are logged and
    /// reported, never propagated.
    pub async fn apply_role(
        &self,
        target: &TenantTarget,
        member: &GuildMember,
        eligibility: Eligibility,
        reasons: RoleReasons,
    ) -> Option<RoleChange> {
        let tenant_id = target.tenant_id;
        let user_id = member.user_id;
        let has_role = member.has_role(target.role_id);

        match (eligibility, has_role) {
            (Eligibility::Eligible, false) => {
                match self
                    .guilds
                    .grant_role(tenant_id, user_id, target.role_id, reasons.grant)
                    .await
                {
                    Ok(()) => {
                        tracing::info!(tenant_id, user_id, "Granted gated role");
                        Some(RoleChange::Granted)
                    }
                    Err(e) => {
                        tracing::warn!(tenant_id, user_id, "Failed to grant gated role: {}", e);
                        Some(RoleChange::GrantFailed)
                    }
                }
            }
            (Eligibility::Ineligible, true) => {
                match self
                    .guilds
                    .revoke_role(tenant_id, user_id, target.role_id, reasons.revoke)
                    .await
                {
                    Ok(()) => {
                        tracing::info!(tenant_id, user_id, "Revoked gated role");
                        Some(RoleChange::Revoked)
                    }
                    Err(e) => {
                        tracing::warn!(tenant_id, user_id, "Failed to revoke gated role: {}", e);
                        Some(RoleChange::RevokeFailed)
                    }
                }
            }
            _ => None,
        }
    }

    /// Writes a holder's changed fields and records the result on its outcome.
    ///
    /// A failed write is logged and flagged so the tick counts it as a holder error; the
    /// same change is retried on the next tick.
    ///
    /// # Arguments
    /// - `tenant_id` - Discord guild ID
    /// - `user_id` - Holder's Discord user ID
    /// - `update` - Fields to write, never empty
    /// - `outcome` - Outcome updated with `persisted` or `write_failed`
    async fn persist(
        &self,
        tenant_id: u64,
        user_id: u64,
        update: HolderUpdate,
        outcome: &mut HolderOutcome,
    ) {
        match self.holders.update_holder(user_id, tenant_id, update).await {
            Ok(written) => outcome.persisted = written,
            Err(e) => {
                tracing::error!(tenant_id, user_id, "Failed to update holder: {}", e);
                outcome.write_failed = true;
            }
        }
    }
}
