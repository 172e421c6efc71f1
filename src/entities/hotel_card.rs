use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "hotel_cards")]
#[schema(as = HotelCard)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub slug: String,
    pub description: Option<String>,
    pub star_rating: i32,
    pub price_per_night: f64,
    pub currency: String,
    pub city_id: Uuid,
    pub destination_id: Option<Uuid>,
    pub accommodation_type_id: Option<Uuid>,
    pub hotel_group_id: Option<Uuid>,
    pub parking_option_id: Option<Uuid>,
    pub address_id: Option<Uuid>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::city::Entity",
        from = "Column::CityId",
        to = "super::city::Column::Id"
    )]
    City,
    #[sea_orm(has_many = "super::hotel_card_feature::Entity")]
    Features,
    #[sea_orm(has_many = "super::hotel_review::Entity")]
    Reviews,
    #[sea_orm(has_many = "super::hotel_policy::Entity")]
    Policies,
    #[sea_orm(has_many = "super::hotel_room::Entity")]
    Rooms,
    #[sea_orm(has_one = "super::hotel_details::Entity")]
    Details,
}

impl Related<super::city::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::City.def()
    }
}

impl Related<super::hotel_card_feature::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Features.def()
    }
}

impl Related<super::hotel_review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl Related<super::hotel_policy::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Policies.def()
    }
}

impl Related<super::hotel_room::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Rooms.def()
    }
}

impl Related<super::hotel_details::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Details.def()
    }
}

/// Many-to-many through `hotel_card_features`.
impl Related<super::hotel_feature::Entity> for Entity {
    fn to() -> RelationDef {
        super::hotel_card_feature::Relation::Feature.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::hotel_card_feature::Relation::HotelCard.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
