//! Token-gate Test Utils
//!
//! Shared testing utilities for the token-gate bot. Provides a builder for test contexts
//! backed by in-memory SQLite databases, factories that insert entities with sensible
//! defaults, and fixtures that build entity models without touching the database.
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::{builder::TestBuilder, factory};
//!
//! #[tokio::test]
//! async fn lists_holders() -> Result<(), sea_orm::DbErr> {
//!     let test = TestBuilder::new().with_holder_tables().build().await.unwrap();
//!     let db = test.db.as_ref().unwrap();
//!
//!     let tenant = factory::create_tenant_config(db).await?;
//!     let holder = factory::create_holder(db, &tenant.server_id).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
pub mod fixture;
