use thiserror::Error;

/// Errors raised while parsing raw token amounts or querying Solana RPC.
///
/// Never surfaced to callers directly: the balance oracle folds request failures into an
/// unknown reading and the transaction lookup into a missing transaction.
#[derive(Error, Debug)]
pub enum BalanceError {
    /// Amount string is empty or only whitespace.
    #[error("Token amount is empty")]
    EmptyAmount,

    /// Amount is negative, fractional, or otherwise not a base-10 integer.
    #[error("'{0}' is not a non-negative integer token amount")]
    InvalidAmount(String),

    /// Wallet or mint is not a base58 encoded 32-byte key.
    #[error("'{0}' is not a valid public key")]
    InvalidPublicKey(String),

    /// The RPC node answered with a non-success HTTP status.
    #[error("RPC endpoint returned HTTP {0}")]
    HttpStatus(reqwest::StatusCode),

    /// The RPC node answered with a JSON-RPC error object.
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// The RPC response did not have the expected shape.
    #[error("Malformed RPC response: {0}")]
    MalformedResponse(String),

    #[error(transparent)]
    Request(#[from] reqwest::Error),
}
