use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Operational details, at most one row per hotel card.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "hotel_details")]
#[schema(as = HotelDetails)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub hotel_card_id: Uuid,
    /// "HH:MM"
    pub check_in_from: Option<String>,
    /// "HH:MM"
    pub check_out_until: Option<String>,
    pub total_rooms: Option<i32>,
    pub year_built: Option<i32>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::hotel_card::Entity",
        from = "Column::HotelCardId",
        to = "super::hotel_card::Column::Id"
    )]
    HotelCard,
}

impl Related<super::hotel_card::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::HotelCard.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
