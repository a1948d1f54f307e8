use std::num::ParseIntError;
use thiserror::Error;

/// Internal issues with stored data indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// Failure to parse id from String
    ///
    /// Results a in 500 Internal Server Error with a generic message returned
    /// to client.
    #[error("Failed to parse ID from String '{value}': {source}")]
    ParseStringId {
        /// The string value that failed to parse
        value: String,
        /// The underlying parse error
        #[source]
        source: ParseIntError,
    },

    /// Stored holder addresses are not a JSON array of strings.
    #[error("Malformed address list for holder {user_id} in guild {tenant_id}: {reason}")]
    MalformedAddresses {
        user_id: String,
        tenant_id: String,
        reason: String,
    },
}
