//! Service layer for business logic and orchestration.
//!
//! Services sit between the controller and bot layers and the data layer. They work with
//! domain models, coordinate repository calls with Discord and Solana, and own the rules
//! for who holds the gated role.

pub mod balance;
pub mod discord;
pub mod reconciliation;
pub mod tenant_setup;
pub mod transaction;
pub mod verification;
