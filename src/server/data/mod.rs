//! Database repository layer.
//!
//! Repositories use SeaORM entity models internally and return domain models so the
//! service layer never sees database-specific structures. `store` adapts them to the
//! traits the reconciliation core consumes.

pub mod holder;
pub mod store;
pub mod tenant_config;

#[cfg(test)]
mod test;
