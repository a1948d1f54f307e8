//! Wallet ownership proofs.
//!
//! The web page asks the wallet to sign a human-readable message containing the start of
//! the verification code. A valid ed25519 signature by the wallet's key over that message
//! proves the submitter controls the wallet.

use base64::{engine::general_purpose::STANDARD, Engine};
use ed25519_dalek::{Signature, Verifier, VerifyingKey};

use crate::server::{error::wallet::WalletError, util::parse::parse_public_key};

/// Number of leading code characters the signed message must contain.
pub const CODE_PREFIX_LEN: usize = 8;

/// Message the wallet is asked to sign for a code.
pub fn expected_message(code: &str) -> String {
    format!(
        "Sign this message to verify wallet ownership for Discord role verification. Code: {}...",
        code_prefix(code)
    )
}

fn code_prefix(code: &str) -> &str {
    code.get(..CODE_PREFIX_LEN).unwrap_or(code)
}

/// Rejects messages that were not produced for this code.
///
/// Binding the message to the code keeps a signature captured for one verification from
/// being replayed against another.
pub fn ensure_message_binds_code(message: &str, code: &str) -> Result<(), WalletError> {
    if code.is_empty() || !message.contains(code_prefix(code)) {
        return Err(WalletError::MessageMismatch);
    }

    Ok(())
}

/// Verifies a detached ed25519 signature by a Solana wallet.
///
/// # Arguments
/// - `message` - Exact UTF-8 text that was signed
/// - `signature` - Base64 encoded 64-byte signature
/// - `wallet_address` - Base58 encoded 32-byte public key
///
/// # Returns
/// - `Ok(())` - Signature is valid for the message and key
/// - `Err(WalletError::InvalidAddress)` - Address is not a valid ed25519 key
/// - `Err(WalletError::InvalidSignatureEncoding)` - Signature is not 64 base64 bytes
/// - `Err(WalletError::SignatureRejected)` - Signature does not verify
pub fn verify_wallet_signature(
    message: &str,
    signature: &str,
    wallet_address: &str,
) -> Result<(), WalletError> {
    let key_bytes = parse_public_key(wallet_address)
        .ok_or_else(|| WalletError::InvalidAddress(wallet_address.to_string()))?;
    let verifying_key = VerifyingKey::from_bytes(&key_bytes)
        .map_err(|_| WalletError::InvalidAddress(wallet_address.to_string()))?;

    let signature_bytes = STANDARD
        .decode(signature.trim())
        .map_err(|e| WalletError::InvalidSignatureEncoding(e.to_string()))?;
    let signature_bytes: [u8; 64] = signature_bytes.try_into().map_err(|bytes: Vec<u8>| {
        WalletError::InvalidSignatureEncoding(format!(
            "signature must be 64 bytes, got {}",
            bytes.len()
        ))
    })?;
    let signature = Signature::from_bytes(&signature_bytes);

    verifying_key
        .verify(message.as_bytes(), &signature)
        .map_err(|_| WalletError::SignatureRejected)
}
