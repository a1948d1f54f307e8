use crate::server::{
    data::tenant_config::TenantConfigRepository, error::AppError,
    model::tenant_config::UpsertTenantConfigParam,
};
use test_utils::{builder::TestBuilder, factory};

mod find;
mod find_setup_complete;
mod list_setup_complete;
mod update;
mod upsert;
