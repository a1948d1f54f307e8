use sea_orm_migration::{prelude::*, schema::*};

use super::m20260301_000001_create_tenant_config_table::TenantConfig;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Holder::Table)
                    .if_not_exists()
                    .col(string(Holder::DiscordUserId))
                    .col(string(Holder::ServerId))
                    .col(string(Holder::Username))
                    .col(json(Holder::Addresses))
                    .col(boolean(Holder::Active).default(false))
                    .col(timestamp_with_time_zone(Holder::CreatedAt))
                    .col(timestamp_with_time_zone(Holder::UpdatedAt))
                    .primary_key(
                        Index::create()
                            .name("pk_holder")
                            .col(Holder::DiscordUserId)
                            .col(Holder::ServerId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_holder_server_id")
                            .from(Holder::Table, Holder::ServerId)
                            .to(TenantConfig::Table, TenantConfig::ServerId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_holder_server_id")
                    .table(Holder::Table)
                    .col(Holder::ServerId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Holder::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Holder {
    Table,
    DiscordUserId,
    ServerId,
    Username,
    Addresses,
    Active,
    CreatedAt,
    UpdatedAt,
}
