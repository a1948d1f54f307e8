//! In-memory collaborators that record every call made by the reconciler.

use async_trait::async_trait;
use num_bigint::BigUint;
use serenity::all::Permissions;
use std::{
    collections::{HashMap, HashSet},
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Mutex,
    },
    time::Duration,
};

use crate::server::{
    error::AppError,
    model::{
        balance::BalanceReading,
        discord::{GuildMember, RoleHierarchy},
        holder::{Holder, HolderUpdate},
        reconciliation::TenantSkip,
        tenant_config::TenantConfig,
        verification::ConfirmedTransaction,
    },
    service::{
        reconciliation::traits::{BalanceOracle, GuildGateway, HolderStore, TenantConfigStore},
        verification::memo::TransactionLookup,
    },
};

pub const BOT_USER_ID: u64 = 1;
pub const OWNER_ID: u64 = 2;

#[derive(Default)]
pub struct FakeTenantStore {
    pub tenants: Mutex<Vec<TenantConfig>>,
    pub fail: AtomicBool,
}

#[async_trait]
impl TenantConfigStore for FakeTenantStore {
    async fn list_tenants(&self) -> Result<Vec<TenantConfig>, AppError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::InternalError("tenant store unavailable".to_string()));
        }
        Ok(self.tenants.lock().unwrap().clone())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoreWrite {
    pub user_id: u64,
    pub tenant_id: u64,
    pub update: HolderUpdate,
}

#[derive(Default)]
pub struct FakeHolderStore {
    pub holders: Mutex<Vec<Holder>>,
    pub writes: Mutex<Vec<StoreWrite>>,
    pub failing_tenants: Mutex<HashSet<u64>>,
    pub fail_writes: AtomicBool,
}

impl FakeHolderStore {
    pub fn get(&self, tenant_id: u64, user_id: u64) -> Option<Holder> {
        self.holders
            .lock()
            .unwrap()
            .iter()
            .find(|h| h.tenant_id == tenant_id && h.user_id == user_id)
            .cloned()
    }

    pub fn writes(&self) -> Vec<StoreWrite> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait]
impl HolderStore for FakeHolderStore {
    async fn list_holders(&self, tenant_id: u64) -> Result<Vec<Holder>, AppError> {
        if self.failing_tenants.lock().unwrap().contains(&tenant_id) {
            return Err(AppError::InternalError("holder store unavailable".to_string()));
        }
        Ok(self
            .holders
            .lock()
            .unwrap()
            .iter()
            .filter(|h| h.tenant_id == tenant_id)
            .cloned()
            .collect())
    }

    async fn update_holder(
        &self,
        user_id: u64,
        tenant_id: u64,
        update: HolderUpdate,
    ) -> Result<bool, AppError> {
        self.writes.lock().unwrap().push(StoreWrite {
            user_id,
            tenant_id,
            update: update.clone(),
        });

        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::InternalError("write rejected".to_string()));
        }

        let mut holders = self.holders.lock().unwrap();
        let Some(holder) = holders
            .iter_mut()
            .find(|h| h.tenant_id == tenant_id && h.user_id == user_id)
        else {
            return Ok(false);
        };

        if let Some(active) = update.active {
            holder.active = active;
        }
        if let Some(username) = update.username {
            holder.username = username;
        }

        Ok(true)
    }
}

/// Oracle answering from a fixed table. Addresses without an entry hold zero.
#[derive(Default)]
pub struct FakeOracle {
    pub balances: Mutex<HashMap<String, BalanceReading>>,
    pub queries: Mutex<Vec<String>>,
    pub panic_on: Mutex<HashSet<String>>,
    pub delay: Mutex<Option<Duration>>,
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

impl FakeOracle {
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    pub fn clear_queries(&self) {
        self.queries.lock().unwrap().clear();
    }
}

#[async_trait]
impl BalanceOracle for FakeOracle {
    async fn get_balance(&self, address: &str, _token_mint: &str, _rpc_url: &str) -> BalanceReading {
        self.queries.lock().unwrap().push(address.to_string());

        if self.panic_on.lock().unwrap().contains(address) {
            panic!("oracle exploded for {}", address);
        }

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        self.balances
            .lock()
            .unwrap()
            .get(address)
            .cloned()
            .unwrap_or(BalanceReading::Known(BigUint::from(0u8)))
    }
}

/// Finalized transactions keyed by signature.
#[derive(Default)]
pub struct FakeTransactions {
    pub transactions: Mutex<HashMap<String, ConfirmedTransaction>>,
}

#[async_trait]
impl TransactionLookup for FakeTransactions {
    async fn find_transaction(
        &self,
        signature: &str,
        _rpc_url: &str,
    ) -> Option<ConfirmedTransaction> {
        self.transactions.lock().unwrap().get(signature).cloned()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleCallKind {
    Grant,
    Revoke,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleCall {
    pub kind: RoleCallKind,
    pub tenant_id: u64,
    pub user_id: u64,
    pub role_id: u64,
    pub reason: String,
}

#[derive(Default)]
pub struct FakeGuildGateway {
    pub tenants: Mutex<HashMap<u64, Result<RoleHierarchy, TenantSkip>>>,
    pub members: Mutex<HashMap<(u64, u64), GuildMember>>,
    pub role_calls: Mutex<Vec<RoleCall>>,
    pub fail_role_calls: AtomicBool,
}

impl FakeGuildGateway {
    pub fn role_calls(&self) -> Vec<RoleCall> {
        self.role_calls.lock().unwrap().clone()
    }

    pub fn clear_role_calls(&self) {
        self.role_calls.lock().unwrap().clear();
    }

    pub fn member(&self, tenant_id: u64, user_id: u64) -> Option<GuildMember> {
        self.members
            .lock()
            .unwrap()
            .get(&(tenant_id, user_id))
            .cloned()
    }

    fn mutate(&self, call: RoleCall) -> Result<(), AppError> {
        self.role_calls.lock().unwrap().push(call.clone());

        if self.fail_role_calls.load(Ordering::SeqCst) {
            return Err(AppError::InternalError("Missing Permissions".to_string()));
        }

        let mut members = self.members.lock().unwrap();
        if let Some(member) = members.get_mut(&(call.tenant_id, call.user_id)) {
            match call.kind {
                RoleCallKind::Grant => {
                    if !member.has_role(call.role_id) {
                        member.role_ids.push(call.role_id);
                    }
                }
                RoleCallKind::Revoke => member.role_ids.retain(|r| *r != call.role_id),
            }
        }

        Ok(())
    }
}

#[async_trait]
impl GuildGateway for FakeGuildGateway {
    async fn resolve_tenant(
        &self,
        tenant_id: u64,
        _role_id: u64,
    ) -> Result<RoleHierarchy, TenantSkip> {
        self.tenants
            .lock()
            .unwrap()
            .get(&tenant_id)
            .cloned()
            .unwrap_or(Err(TenantSkip::GuildNotFound))
    }

    async fn resolve_member(&self, tenant_id: u64, user_id: u64) -> Option<GuildMember> {
        self.member(tenant_id, user_id)
    }

    async fn grant_role(
        &self,
        tenant_id: u64,
        user_id: u64,
        role_id: u64,
        reason: &str,
    ) -> Result<(), AppError> {
        self.mutate(RoleCall {
            kind: RoleCallKind::Grant,
            tenant_id,
            user_id,
            role_id,
            reason: reason.to_string(),
        })
    }

    async fn revoke_role(
        &self,
        tenant_id: u64,
        user_id: u64,
        role_id: u64,
        reason: &str,
    ) -> Result<(), AppError> {
        self.mutate(RoleCall {
            kind: RoleCallKind::Revoke,
            tenant_id,
            user_id,
            role_id,
            reason: reason.to_string(),
        })
    }
}

/// Hierarchy in which the bot has Manage Roles and sits above the gated role.
pub fn manageable(tenant_id: u64, role_id: u64) -> RoleHierarchy {
    RoleHierarchy {
        tenant_id,
        role_id,
        bot_user_id: BOT_USER_ID,
        owner_id: OWNER_ID,
        bot_permissions: Permissions::MANAGE_ROLES,
        bot_highest_position: 10,
        role_position: 5,
    }
}
