//! Test fixtures providing reusable test data without database insertion.
//!
//! Fixtures build in-memory entity models for unit tests of domain conversions and for
//! seeding fake stores. Unlike factories, fixtures do NOT insert data into the database.
//!
//! # Example
//!
//! ```rust,ignore
//! use test_utils::fixture;
//!
//! let tenant = fixture::tenant_config::entity();
//!
//! let holder = fixture::holder::entity_builder()
//!     .addresses(["WalletA", "WalletB"])
//!     .active(true)
//!     .build();
//! ```

pub mod holder;
pub mod tenant_config;

pub use holder::{entity as holder_entity, entity_builder as holder_entity_builder};
pub use tenant_config::{
    entity as tenant_config_entity, entity_builder as tenant_config_entity_builder,
};
