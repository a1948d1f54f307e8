use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "holder")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub discord_user_id: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub server_id: String,
    pub username: String,
    /// JSON array of wallet address strings.
    pub addresses: Json,
    pub active: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::tenant_config::Entity",
        from = "Column::ServerId",
        to = "super::tenant_config::Column::ServerId",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    TenantConfig,
}

impl Related<super::tenant_config::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TenantConfig.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
