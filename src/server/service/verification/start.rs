use num_bigint::BigUint;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{holder::HolderRepository, tenant_config::TenantConfigRepository},
    error::AppError,
    model::{
        balance::parse_raw_amount,
        tenant_config::TenantConfig,
        verification::{PendingVerification, VerificationAction},
    },
};

use super::code::VerificationCodeService;

/// A freshly issued verification code and what the user needs to know about it.
#[derive(Debug, Clone)]
pub struct VerificationInvite {
    pub code: String,
    pub action: VerificationAction,
    pub tenant: TenantConfig,
    /// Parsed threshold of the tenant.
    pub required: BigUint,
    /// Wallets the user already linked in this guild.
    pub linked_wallets: usize,
}

pub struct VerificationStartService<'a> {
    db: &'a DatabaseConnection,
    codes: &'a VerificationCodeService,
}

impl<'a> VerificationStartService<'a> {
    pub fn new(db: &'a DatabaseConnection, codes: &'a VerificationCodeService) -> Self {
        Self { db, codes }
    }

    /// Issues a verification code for a user running `/verify` in a guild.
    ///
    /// Users who already linked a wallet get an `Add` code so the new wallet is appended.
    ///
    /// # Returns
    /// - `Ok(Some(VerificationInvite))` - Code issued
    /// - `Ok(None)` - Guild has no completed configuration
    /// - `Err(AppError::BalanceErr)` - Stored threshold is not a raw integer amount
    /// - `Err(AppError)` - Database error
    pub async fn start(
        &self,
        tenant_id: u64,
        user_id: u64,
    ) -> Result<Option<VerificationInvite>, AppError> {
        let Some(tenant) = TenantConfigRepository::new(self.db)
            .find_setup_complete(tenant_id)
            .await?
        else {
            return Ok(None);
        };

        let required = parse_raw_amount(&tenant.required_balance)?;

        let linked_wallets = HolderRepository::new(self.db)
            .find(user_id, tenant_id)
            .await?
            .map(|holder| holder.addresses.len())
            .unwrap_or(0);

        let action = if linked_wallets > 0 {
            VerificationAction::Add
        } else {
            VerificationAction::New
        };

        let code = self
            .codes
            .issue(PendingVerification {
                user_id,
                tenant_id,
                action,
            })
            .await;

        tracing::debug!(tenant_id, user_id, ?action, "Issued verification code");

        Ok(Some(VerificationInvite {
            code,
            action,
            tenant,
            required,
            linked_wallets,
        }))
    }
}
