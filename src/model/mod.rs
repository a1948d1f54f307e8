//! Data transfer objects shared with the wallet-connection front-end.

pub mod api;
pub mod verification;
