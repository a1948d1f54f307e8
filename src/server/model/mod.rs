//! Server-side domain models and parameter types.
//!
//! Domain models are converted from entity models at the repository boundary and
//! transformed to DTOs at the controller boundary. Discord snowflakes are `u64` here
//! and raw token amounts are arbitrary-precision integers.

pub mod balance;
pub mod discord;
pub mod holder;
pub mod reconciliation;
pub mod tenant_config;
pub mod verification;
