//! Transaction memo proofs for wallets that cannot sign plain messages.
//!
//! Hardware wallets such as Ledger only sign transactions. The page has the wallet send a
//! transaction carrying a memo that names the verification code, then submits the
//! transaction signature. Ownership holds when that finalized transaction succeeded, was
//! signed by the wallet, and carries the expected memo.

use async_trait::async_trait;

use crate::server::{error::wallet::WalletError, model::verification::ConfirmedTransaction};

/// SPL Memo program v2.
pub const MEMO_PROGRAM_ID: &str = "MemoSq4gqABAXKb96qnH8TysNcWxMyWCqXgDLGmfcHr";

/// Looks up finalized transactions by signature.
#[async_trait]
pub trait TransactionLookup: Send + Sync {
    /// Returns `None` when the transaction is unknown, not yet finalized, or the lookup
    /// failed.
    async fn find_transaction(&self, signature: &str, rpc_url: &str)
        -> Option<ConfirmedTransaction>;
}

/// Memo text the verification transaction must carry for a code.
pub fn expected_memo(code: &str) -> String {
    format!("Verify wallet ownership for Discord role: {}", code)
}

/// Rejects a transaction signature that is not 64 base58 bytes.
pub fn ensure_transaction_signature(signature: &str) -> Result<(), WalletError> {
    let bytes = bs58::decode(signature.trim())
        .into_vec()
        .map_err(|e| WalletError::InvalidSignatureEncoding(e.to_string()))?;

    if bytes.len() != 64 {
        return Err(WalletError::InvalidSignatureEncoding(format!(
            "transaction signature must be 64 bytes, got {}",
            bytes.len()
        )));
    }

    Ok(())
}

/// Checks that a looked-up transaction proves the wallet's ownership for a code.
///
/// # Arguments
/// - `transaction` - Result of the lookup, `None` when nothing was found
/// - `code` - Verification code the memo must name in full
/// - `wallet_address` - Wallet that must have signed the transaction
///
/// # Returns
/// - `Ok(())` - Transaction succeeded, the wallet signed it and a memo matches
/// - `Err(WalletError::TransactionNotFound)` - No finalized transaction
/// - `Err(WalletError::TransactionFailed)` - Transaction execution failed
/// - `Err(WalletError::WalletNotSigner)` - Wallet is not among the signers
/// - `Err(WalletError::MemoMismatch)` - No memo equals the expected text
pub fn verify_memo_proof(
    transaction: Option<&ConfirmedTransaction>,
    code: &str,
    wallet_address: &str,
) -> Result<(), WalletError> {
    let transaction = transaction.ok_or(WalletError::TransactionNotFound)?;

    if !transaction.succeeded {
        return Err(WalletError::TransactionFailed);
    }

    if !transaction.signers.iter().any(|s| s == wallet_address) {
        return Err(WalletError::WalletNotSigner);
    }

    let expected = expected_memo(code);
    if !transaction.memos.iter().any(|m| m == &expected) {
        return Err(WalletError::MemoMismatch);
    }

    Ok(())
}
