pub use super::holder::Entity as Holder;
pub use super::tenant_config::Entity as TenantConfig;
