use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "hotel_rooms")]
#[schema(as = HotelRoom)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub hotel_card_id: Uuid,
    pub name: String,
    pub capacity: i32,
    pub bed_type: Option<String>,
    pub price_per_night: f64,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
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
