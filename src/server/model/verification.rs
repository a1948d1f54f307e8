//! Pending wallet verification models.

use crate::{
    model::verification::{VerificationActionDto, VerificationContextDto},
    server::model::tenant_config::TenantConfig,
};

/// What a verification link does with the wallet it proves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationAction {
    /// Replace any linked wallets with the verified one.
    New,
    /// Append the verified wallet to the linked set.
    Add,
}

impl VerificationAction {
    pub fn into_dto(self) -> VerificationActionDto {
        match self {
            Self::New => VerificationActionDto::New,
            Self::Add => VerificationActionDto::Add,
        }
    }
}

/// A verification code's payload: who asked, in which guild, and for what.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingVerification {
    pub user_id: u64,
    pub tenant_id: u64,
    pub action: VerificationAction,
}

/// A pending verification joined with its tenant's configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct VerificationContext {
    pub pending: PendingVerification,
    pub tenant: TenantConfig,
}

impl VerificationContext {
    pub fn into_dto(self) -> VerificationContextDto {
        VerificationContextDto {
            user_id: self.pending.user_id.to_string(),
            action: self.pending.action.into_dto(),
            guild_id: self.pending.tenant_id.to_string(),
            token_address: self.tenant.token_mint,
            required_balance: self.tenant.required_balance,
            token_symbol: self.tenant.token_symbol,
            token_decimals: self.tenant.token_decimals,
            server_name: self.tenant.server_name,
        }
    }
}

/// Validated body of a wallet submission.
#[derive(Debug, Clone)]
pub struct LinkWalletParam {
    pub code: String,
    pub wallet_address: String,
    pub proof: OwnershipProof,
}

/// How the submitter proves control of the wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnershipProof {
    /// Detached signature over a message naming the code.
    SignedMessage {
        /// Base64 encoded ed25519 signature.
        signature: String,
        message: String,
    },
    /// Signature of a landed transaction carrying the code in a memo, for wallets such as
    /// Ledger that cannot sign arbitrary messages.
    MemoTransaction {
        /// Base58 transaction signature.
        signature: String,
    },
}

/// The parts of a confirmed transaction a memo proof looks at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfirmedTransaction {
    /// Accounts that signed the transaction.
    pub signers: Vec<String>,
    /// Text of every memo program instruction, in order.
    pub memos: Vec<String>,
    /// False when the transaction landed but its execution failed.
    pub succeeded: bool,
}

/// Result of linking a wallet, shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkOutcome {
    /// Whether the holder's linked wallets meet the tenant threshold.
    pub eligible: bool,
    pub message: String,
}
