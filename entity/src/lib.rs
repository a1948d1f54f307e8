//! SeaORM entity models for the token-gate database.
//!
//! - `tenant_config` - per-guild verification settings (token mint, threshold, role, RPC)
//! - `holder` - wallets a Discord user linked in a guild and their last known status

pub mod prelude;

pub mod holder;
pub mod tenant_config;
