//! Factory methods for creating test data.
//!
//! Each entity has its own factory module with both a `Factory` struct for customization
//! and a `create_*` convenience function for quick default creation. Factories insert
//! into the database, so the matching tables must exist (see `TestBuilder::with_holder_tables`).
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let tenant = factory::create_tenant_config(&db).await?;
//! let holder = factory::create_holder(&db, &tenant.server_id).await?;
//!
//! let (tenant, holders) = factory::helpers::create_tenant_with_holders(&db, 3).await?;
//! ```
//!
//! # Customization
//!
//! ```rust,ignore
//! let holder = factory::holder::HolderFactory::new(&db, &tenant.server_id)
//!     .discord_user_id("1001")
//!     .addresses(["WalletA", "WalletB"])
//!     .active(true)
//!     .build()
//!     .await?;
//! ```
//!
//! # Available Factories
//!
//! - `tenant_config` - Create tenant configuration entities
//! - `holder` - Create holder entities
//! - `helpers` - ID generation and convenience methods for entities with dependencies

pub mod helpers;
pub mod holder;
pub mod tenant_config;

pub use holder::create_holder;
pub use tenant_config::create_tenant_config;
