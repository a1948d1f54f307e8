use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum WalletError {
    /// Submitted wallet address is not a base58 encoded ed25519 public key.
    #[error("Invalid wallet address '{0}'")]
    InvalidAddress(String),

    /// Signature is not valid base64 or does not decode to 64 bytes.
    #[error("Invalid signature encoding: {0}")]
    InvalidSignatureEncoding(String),

    /// Signed message does not reference the verification code it was issued for.
    #[error("Signed message does not match the verification code")]
    MessageMismatch,

    /// Signature is well formed but was not produced by the wallet's key.
    #[error("Wallet signature verification failed")]
    SignatureRejected,

    /// No finalized transaction exists for the submitted signature.
    #[error("Verification transaction not found or not yet finalized")]
    TransactionNotFound,

    /// The verification transaction landed but failed to execute.
    #[error("Verification transaction failed on chain")]
    TransactionFailed,

    /// The verification transaction has no memo naming the code.
    #[error("Verification transaction memo does not match the verification code")]
    MemoMismatch,

    /// The verification transaction was not signed by the submitted wallet.
    #[error("Verification transaction was not signed by the wallet")]
    WalletNotSigner,
}

/// Converts wallet errors into HTTP responses.
///
/// Malformed input maps to 400 Bad Request. A message or signature that fails to
/// prove ownership maps to 401 Unauthorized.
impl IntoResponse for WalletError {
    fn into_response(self) -> Response {
        tracing::debug!("Wallet verification rejected: {}", self);

        let status = match self {
            Self::InvalidAddress(_) | Self::InvalidSignatureEncoding(_) => StatusCode::BAD_REQUEST,
            Self::MessageMismatch
            | Self::SignatureRejected
            | Self::TransactionNotFound
            | Self::TransactionFailed
            | Self::MemoMismatch
            | Self::WalletNotSigner => StatusCode::UNAUTHORIZED,
        };

        (
            status,
            Json(ErrorDto {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
