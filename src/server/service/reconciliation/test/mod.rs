use num_bigint::BigUint;
use std::sync::{atomic::Ordering, Arc};

use crate::server::{
    model::{
        balance::{BalanceReading, UnknownBalancePolicy},
        discord::{GuildMember, RoleHierarchy},
        holder::{Holder, HolderUpdate},
        reconciliation::{Eligibility, TenantSkip},
        tenant_config::TenantConfig,
    },
    service::reconciliation::{
        tenant::TenantTarget, ReconcileSettings, Reconciler, PERIODIC_REASONS,
    },
};

use self::fakes::{
    manageable, FakeGuildGateway, FakeHolderStore, FakeOracle, FakeTenantStore, FakeTransactions,
    RoleCallKind, StoreWrite,
};

pub mod fakes;
mod tick;

pub const MINT: &str = "M";
pub const RPC_URL: &str = "http://rpc.test";

/// Wires the four fakes into a reconciler and seeds them per test.
///
/// `transactions` backs memo proofs in wallet link tests and is not seen by the reconciler.
#[derive(Default)]
pub struct Harness {
    pub tenants: Arc<FakeTenantStore>,
    pub holders: Arc<FakeHolderStore>,
    pub oracle: Arc<FakeOracle>,
    pub guilds: Arc<FakeGuildGateway>,
    pub transactions: Arc<FakeTransactions>,
}

impl Harness {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reconciler(&self) -> Reconciler {
        self.reconciler_with(ReconcileSettings::default())
    }

    pub fn reconciler_with(&self, settings: ReconcileSettings) -> Reconciler {
        Reconciler::new(
            self.tenants.clone(),
            self.holders.clone(),
            self.oracle.clone(),
            self.guilds.clone(),
            settings,
        )
    }

    /// Adds a completed tenant whose role the bot can manage.
    pub fn add_tenant(&self, tenant_id: u64, role_id: u64, required_balance: &str) -> TenantConfig {
        let config = TenantConfig {
            tenant_id,
            server_name: format!("Guild {}", tenant_id),
            token_mint: MINT.to_string(),
            required_balance: required_balance.to_string(),
            role_id,
            rpc_url: RPC_URL.to_string(),
            setup_complete: true,
            token_symbol: None,
            token_decimals: None,
        };

        self.tenants.tenants.lock().unwrap().push(config.clone());
        self.set_hierarchy(tenant_id, Ok(manageable(tenant_id, role_id)));

        config
    }

    pub fn set_hierarchy(&self, tenant_id: u64, hierarchy: Result<RoleHierarchy, TenantSkip>) {
        self.guilds
            .tenants
            .lock()
            .unwrap()
            .insert(tenant_id, hierarchy);
    }

    /// Adds a holder whose cached username is `user{user_id}`.
    pub fn add_holder(&self, tenant_id: u64, user_id: u64, addresses: &[&str], active: bool) {
        self.holders.holders.lock().unwrap().push(Holder {
            user_id,
            tenant_id,
            username: format!("user{}", user_id),
            addresses: addresses.iter().map(|a| a.to_string()).collect(),
            active,
        });
    }

    /// Adds a live guild member named `user{user_id}`.
    pub fn add_member(&self, tenant_id: u64, user_id: u64, role_ids: &[u64]) {
        self.guilds.members.lock().unwrap().insert(
            (tenant_id, user_id),
            GuildMember {
                user_id,
                username: format!("user{}", user_id),
                role_ids: role_ids.to_vec(),
            },
        );
    }

    pub fn set_balance(&self, address: &str, raw: u64) {
        self.oracle
            .balances
            .lock()
            .unwrap()
            .insert(address.to_string(), BalanceReading::Known(BigUint::from(raw)));
    }

    pub fn set_unknown(&self, address: &str) {
        self.oracle
            .balances
            .lock()
            .unwrap()
            .insert(address.to_string(), BalanceReading::Unknown);
    }

    pub fn grants(&self) -> usize {
        self.count_calls(RoleCallKind::Grant)
    }

    pub fn revokes(&self) -> usize {
        self.count_calls(RoleCallKind::Revoke)
    }

    fn count_calls(&self, kind: RoleCallKind) -> usize {
        self.guilds
            .role_calls()
            .iter()
            .filter(|c| c.kind == kind)
            .count()
    }

    /// Forgets recorded calls so a follow-up run can be checked in isolation.
    pub fn clear_recordings(&self) {
        self.guilds.clear_role_calls();
        self.oracle.clear_queries();
        self.holders.writes.lock().unwrap().clear();
    }
}

pub fn target(config: &TenantConfig) -> TenantTarget {
    TenantTarget::from_config(config).unwrap()
}
