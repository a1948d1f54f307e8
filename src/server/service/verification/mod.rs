//! Wallet verification: one-time codes, ownership proofs and the link flow.

pub mod code;
pub mod link;
pub mod memo;
pub mod signature;
pub mod start;
