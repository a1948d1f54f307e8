//! Application state shared across all request handlers.
//!
//! Initialized once during startup and cloned into each handler through Axum's state
//! extraction. Every field is cheap to clone:
//! - `DatabaseConnection` is a connection pool (clones share the pool)
//! - `Reconciler` sits behind an `Arc` shared with the scheduler
//! - `VerificationCodeService` shares its map with the Discord bot
//! - The transaction lookup sits behind an `Arc`

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use super::service::{
    reconciliation::Reconciler,
    verification::{code::VerificationCodeService, memo::TransactionLookup},
};

#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for tenant configs and holders.
    pub db: DatabaseConnection,

    /// Eligibility and role convergence shared with the periodic reconciliation, so a
    /// wallet link applies exactly the rules the next tick would.
    pub reconciler: Arc<Reconciler>,

    /// Pending verification codes issued by the bot's `/verify` command.
    pub codes: VerificationCodeService,

    /// Finalized transaction lookups for memo ownership proofs.
    pub transactions: Arc<dyn TransactionLookup>,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        reconciler: Arc<Reconciler>,
        codes: VerificationCodeService,
        transactions: Arc<dyn TransactionLookup>,
    ) -> Self {
        Self {
            db,
            reconciler,
            codes,
            transactions,
        }
    }
}
