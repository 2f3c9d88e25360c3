use sea_orm::entity::prelude::*;

/// A property listing.
///
/// Enum-like columns (`property_type`, `status`, `listing_type`) are stored
/// upper-case; `images` and `features` hold JSON array literals as text.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "listing")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub price: i64,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub latitude: f64,
    pub longitude: f64,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub square_footage: i32,
    pub property_type: String,
    pub year_built: Option<i32>,
    #[sea_orm(column_type = "Text")]
    pub images: String,
    #[sea_orm(column_type = "Text")]
    pub features: String,
    pub status: String,
    pub listing_type: String,
    pub is_pinned: bool,
    pub owner_id: Option<i32>,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::agent_user::Entity",
        from = "Column::OwnerId",
        to = "super::agent_user::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    AgentUser,
    #[sea_orm(has_many = "super::favorite::Entity")]
    Favorite,
    #[sea_orm(has_many = "super::inquiry::Entity")]
    Inquiry,
}

impl Related<super::agent_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AgentUser.def()
    }
}

impl Related<super::favorite::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Favorite.def()
    }
}

impl Related<super::inquiry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Inquiry.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
