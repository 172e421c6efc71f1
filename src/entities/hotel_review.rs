use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "hotel_reviews")]
#[schema(as = HotelReview)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub hotel_card_id: Uuid,
    pub author_name: String,
    /// Guest score on a 1-10 scale
    pub rating: i32,
    pub title: Option<String>,
    pub comment: Option<String>,
    pub stay_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
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
