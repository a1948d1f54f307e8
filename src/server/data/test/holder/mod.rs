use crate::server::{
    data::holder::HolderRepository,
    error::AppError,
    model::holder::{HolderUpdate, UpsertHolderParam},
};
use sea_orm::EntityTrait;
use test_utils::{builder::TestBuilder, factory};

mod find;
mod list_by_tenant;
mod update;
mod upsert;
