use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "tenant_config")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub server_id: String,
    pub server_name: String,
    pub token_address: String,
    /// Raw token amount (smallest unit) as a decimal string.
    pub required_balance: String,
    pub role_id: String,
    pub rpc_url: String,
    pub setup_complete: bool,
    pub admin_user_id: Option<String>,
    pub token_symbol: Option<String>,
    pub token_decimals: Option<i32>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::holder::Entity")]
    Holder,
}

impl Related<super::holder::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Holder.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
