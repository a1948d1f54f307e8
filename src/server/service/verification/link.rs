use sea_orm::DatabaseConnection;

use crate::server::{
    data::{holder::HolderRepository, tenant_config::TenantConfigRepository},
    error::{wallet::WalletError, AppError},
    model::{
        balance::{format_token_amount, BalanceReading},
        holder::{normalize_addresses, UpsertHolderParam},
        reconciliation::{Eligibility, RoleChange, TenantSkip},
        tenant_config::TenantConfig,
        verification::{
            LinkOutcome, LinkWalletParam, OwnershipProof, VerificationAction, VerificationContext,
        },
    },
    service::reconciliation::{tenant::TenantTarget, Reconciler, LINK_REASONS},
    util::parse::parse_public_key,
};

use super::{
    code::VerificationCodeService,
    memo::{ensure_transaction_signature, verify_memo_proof, TransactionLookup},
    signature::{ensure_message_binds_code, verify_wallet_signature},
};

const INVALID_CODE: &str = "Invalid or expired verification code. Please try /verify again.";
const MEMBER_NOT_FOUND: &str =
    "Could not find you in the Discord server. Have you left since starting verification?";

/// Links a signed wallet to a Discord user and converges their role immediately.
///
/// Uses the same eligibility and role rules as the periodic reconciliation so a user's
/// state after linking matches what the next tick would compute.
pub struct WalletLinkService<'a> {
    db: &'a DatabaseConnection,
    codes: &'a VerificationCodeService,
    reconciler: &'a Reconciler,
    transactions: &'a dyn TransactionLookup,
}

impl<'a> WalletLinkService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        codes: &'a VerificationCodeService,
        reconciler: &'a Reconciler,
        transactions: &'a dyn TransactionLookup,
    ) -> Self {
        Self {
            db,
            codes,
            reconciler,
            transactions,
        }
    }

    /// Describes what a verification code is for without consuming it.
    ///
    /// # Returns
    /// - `Ok(VerificationContext)` - Pending verification and its tenant settings
    /// - `Err(AppError::NotFound)` - Code unknown or expired, or tenant no longer configured
    pub async fn context(&self, code: &str) -> Result<VerificationContext, AppError> {
        let pending = self
            .codes
            .peek(code)
            .await
            .ok_or_else(|| AppError::NotFound(INVALID_CODE.to_string()))?;

        let tenant = self.find_tenant(pending.tenant_id).await?;

        Ok(VerificationContext { pending, tenant })
    }

    /// Consumes a code, proves wallet ownership and stores the holder.
    ///
    /// The code is consumed before any other check so a failed attempt requires a new
    /// `/verify`. The role is only touched when the bot can manage it.
    ///
    /// # Returns
    /// - `Ok(LinkOutcome)` - Holder stored; `eligible` tells whether the threshold is met
    /// - `Err(AppError::NotFound)` - Unknown code, missing tenant, or member left the guild
    /// - `Err(AppError::WalletErr)` - Ownership proof rejected
    /// - `Err(AppError::InternalError)` - Stored threshold invalid or bot not in the guild
    pub async fn link_wallet(&self, param: LinkWalletParam) -> Result<LinkOutcome, AppError> {
        let pending = self
            .codes
            .consume(&param.code)
            .await
            .ok_or_else(|| AppError::NotFound(INVALID_CODE.to_string()))?;

        let tenant_id = pending.tenant_id;
        let user_id = pending.user_id;

        let tenant = self.find_tenant(tenant_id).await?;
        let target = TenantTarget::from_config(&tenant).map_err(|skip| {
            AppError::InternalError(format!(
                "Tenant {} has an invalid configuration: {}",
                tenant_id, skip
            ))
        })?;

        let wallet_address = param.wallet_address.trim().to_string();
        self.prove_ownership(&param, &wallet_address, &target.rpc_url).await?;

        let guilds = self.reconciler.guilds();
        let hierarchy = match guilds.resolve_tenant(tenant_id, target.role_id).await {
            Err(TenantSkip::GuildNotFound) => {
                return Err(AppError::InternalError(format!(
                    "Bot is not in guild {} linked to a verification code",
                    tenant_id
                )));
            }
            other => other,
        };

        let member = guilds
            .resolve_member(tenant_id, user_id)
            .await
            .ok_or_else(|| AppError::NotFound(MEMBER_NOT_FOUND.to_string()))?;

        let holder_repo = HolderRepository::new(self.db);
        let existing = holder_repo.find(user_id, tenant_id).await?;

        // Relinking a wallet that is already linked must not query its balance twice
        let addresses = match (pending.action, &existing) {
            (VerificationAction::Add, Some(holder)) => normalize_addresses(
                holder
                    .addresses
                    .iter()
                    .chain(std::iter::once(&wallet_address)),
            ),
            _ => vec![wallet_address.clone()],
        };

        let eligibility = self.reconciler.evaluate(&addresses, &target).await;
        let active = eligibility
            .as_active()
            .unwrap_or_else(|| existing.as_ref().is_some_and(|h| h.active));

        holder_repo
            .upsert(UpsertHolderParam {
                user_id,
                tenant_id,
                username: member.username.clone(),
                addresses,
                active,
            })
            .await?;

        tracing::info!(
            tenant_id,
            user_id,
            wallet = %wallet_address,
            ?eligibility,
            "Linked wallet"
        );

        let role_message = match hierarchy.and_then(|h| h.check_manageable()) {
            Ok(()) => {
                let change = self
                    .reconciler
                    .apply_role(&target, &member, eligibility, LINK_REASONS)
                    .await;
                role_message(eligibility, change)
            }
            Err(TenantSkip::RoleNotFound) => {
                tracing::warn!(tenant_id, "Configured role not found, role left untouched");
                "Configured role not found, cannot update roles."
            }
            Err(skip) => {
                tracing::warn!(tenant_id, "Cannot manage gated role: {}", skip);
                "Failed to update role due to a bot permission error."
            }
        };

        let wallet = short_address(&wallet_address);

        if eligibility == Eligibility::Eligible {
            return Ok(LinkOutcome {
                eligible: true,
                message: format!("Wallet {} verified successfully! {}", wallet, role_message),
            });
        }

        let wallet_balance = match self
            .reconciler
            .oracle()
            .get_balance(&wallet_address, &target.token_mint, &target.rpc_url)
            .await
        {
            BalanceReading::Known(balance) => display_amount(&balance, &tenant),
            BalanceReading::Unknown => "unavailable".to_string(),
        };

        Ok(LinkOutcome {
            eligible: false,
            message: format!(
                "Wallet {} linked, but it (or your combined wallets) currently holds insufficient \
                 balance. Required: {}. This wallet balance: {}. {}",
                wallet,
                display_amount(&target.required, &tenant),
                wallet_balance,
                role_message
            ),
        })
    }

    async fn prove_ownership(
        &self,
        param: &LinkWalletParam,
        wallet_address: &str,
        rpc_url: &str,
    ) -> Result<(), WalletError> {
        match &param.proof {
            OwnershipProof::SignedMessage { signature, message } => {
                ensure_message_binds_code(message, &param.code)?;
                verify_wallet_signature(message, signature, wallet_address)
            }
            OwnershipProof::MemoTransaction { signature } => {
                if parse_public_key(wallet_address).is_none() {
                    return Err(WalletError::InvalidAddress(wallet_address.to_string()));
                }
                ensure_transaction_signature(signature)?;

                let transaction = self
                    .transactions
                    .find_transaction(signature.trim(), rpc_url)
                    .await;
                verify_memo_proof(transaction.as_ref(), &param.code, wallet_address)
            }
        }
    }

    async fn find_tenant(&self, tenant_id: u64) -> Result<TenantConfig, AppError> {
        TenantConfigRepository::new(self.db)
            .find_setup_complete(tenant_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(
                    "Server configuration for this verification link was not found or is \
                     incomplete. Please contact an admin."
                        .to_string(),
                )
            })
    }
}

/// Describes the role outcome of a link for the user.
///
/// # Arguments
/// - `eligibility` - Combined eligibility of the holder's wallets
/// - `change` - Role mutation attempted by `apply_role`, `None` when the role already matched
///
/// # Returns
/// - `&'static str` - Sentence appended to the link response
fn role_message(eligibility: Eligibility, change: Option<RoleChange>) -> &'static str {
    match (change, eligibility) {
        (Some(RoleChange::Granted), _) => "Role granted or confirmed.",
        (Some(RoleChange::Revoked), _) => "Role removed due to insufficient balance.",
        (Some(RoleChange::GrantFailed | RoleChange::RevokeFailed), _) => {
            "Failed to update role due to a bot permission error."
        }
        (None, Eligibility::Eligible) => "Role confirmed.",
        (None, Eligibility::Ineligible) => "Role not granted (insufficient balance).",
        (None, Eligibility::Unknown) => "Role unchanged (balance could not be determined).",
    }
}

/// Shortens an address to `Abcd...wxyz` for display.
///
/// Addresses of 8 characters or fewer are returned unchanged.
///
/// # Arguments
/// - `address` - Wallet address as submitted
///
/// # Returns
/// - `String` - First and last four characters joined by `...`
fn short_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 8 {
        return address.to_string();
    }

    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

/// Formats a raw amount with the tenant's symbol and decimals.
///
/// # Arguments
/// - `raw` - Amount in the token's smallest unit
/// - `tenant` - Tenant whose display metadata is applied
///
/// # Returns
/// - `String` - Amount such as `1,000 GATE`, or `1000 tokens` without metadata
fn display_amount(raw: &num_bigint::BigUint, tenant: &TenantConfig) -> String {
    format_token_amount(raw, tenant.token_decimals, tenant.token_symbol.as_deref())
}
