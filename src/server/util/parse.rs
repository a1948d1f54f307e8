use crate::server::error::{internal::InternalError, AppError};

/// Parses a u64 value from String
///
/// # Arguments
/// - `value` - The String to attempt to parse into `u64`
///
/// # Returns
/// - `Ok(u64)` - Successfully parsed String to `u64`
/// - `Err(AppError::InternalErr(ParseStringId))` - Failed to parse
///   the string as a u64
pub fn parse_u64_from_string(value: String) -> Result<u64, AppError> {
    let result = value
        .parse::<u64>()
        .map_err(|e| InternalError::ParseStringId { value, source: e })?;

    Ok(result)
}

/// Decodes a base58 Solana public key into its 32 raw bytes.
///
/// Returns `None` when the value is not valid base58 or does not decode to exactly
/// 32 bytes. Callers attach their own error type.
pub fn parse_public_key(value: &str) -> Option<[u8; 32]> {
    let bytes = bs58::decode(value.trim()).into_vec().ok()?;

    bytes.try_into().ok()
}
