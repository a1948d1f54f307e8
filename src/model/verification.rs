use serde::{Deserialize, Serialize};

/// Whether a verification link replaces the holder's wallets or adds to them.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VerificationActionDto {
    New,
    Add,
}

/// Query string of `GET /api/verification-context`.
#[derive(Deserialize, Debug, Default)]
pub struct VerificationContextQuery {
    pub code: Option<String>,
}

/// Tenant requirements shown to the user before they sign with their wallet.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VerificationContextDto {
    pub user_id: String,
    pub action: VerificationActionDto,
    pub guild_id: String,
    pub token_address: String,
    /// Raw amount in the token's smallest unit.
    pub required_balance: String,
    pub token_symbol: Option<String>,
    pub token_decimals: Option<u32>,
    pub server_name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VerificationContextResponseDto {
    pub success: bool,
    pub message: String,
    pub context: VerificationContextDto,
}

/// Body of `POST /api/verify-wallet`.
///
/// Fields are optional so a missing field produces a 400 with a readable message
/// rather than a deserialization rejection.
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct VerifyWalletRequestDto {
    pub verification_code: Option<String>,
    pub wallet_address: Option<String>,
    /// Base64 encoded ed25519 signature over `message`, or the base58 signature of the
    /// memo transaction when `is_ledger_flow` is set.
    pub signature: Option<String>,
    pub message: Option<String>,
    #[serde(default)]
    pub is_ledger_flow: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct VerifyWalletResponseDto {
    pub success: bool,
    pub message: String,
}
