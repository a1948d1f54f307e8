use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TenantConfig::Table)
                    .if_not_exists()
                    .col(string(TenantConfig::ServerId).primary_key())
                    .col(string(TenantConfig::ServerName))
                    .col(string(TenantConfig::TokenAddress))
                    .col(string(TenantConfig::RequiredBalance))
                    .col(string(TenantConfig::RoleId))
                    .col(string(TenantConfig::RpcUrl))
                    .col(boolean(TenantConfig::SetupComplete).default(false))
                    .col(string_null(TenantConfig::AdminUserId))
                    .col(string_null(TenantConfig::TokenSymbol))
                    .col(integer_null(TenantConfig::TokenDecimals))
                    .col(timestamp_with_time_zone(TenantConfig::CreatedAt))
                    .col(timestamp_with_time_zone(TenantConfig::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tenant_config_setup_complete")
                    .table(TenantConfig::Table)
                    .col(TenantConfig::SetupComplete)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TenantConfig::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum TenantConfig {
    Table,
    ServerId,
    ServerName,
    TokenAddress,
    RequiredBalance,
    RoleId,
    RpcUrl,
    SetupComplete,
    AdminUserId,
    TokenSymbol,
    TokenDecimals,
    CreatedAt,
    UpdatedAt,
}
