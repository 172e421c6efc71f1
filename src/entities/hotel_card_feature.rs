use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Link row between a hotel card and one of its features.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "hotel_card_features")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub hotel_card_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub feature_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::hotel_card::Entity",
        from = "Column::HotelCardId",
        to = "super::hotel_card::Column::Id"
    )]
    HotelCard,
    #[sea_orm(
        belongs_to = "super::hotel_feature::Entity",
        from = "Column::FeatureId",
        to = "super::hotel_feature::Column::Id"
    )]
    Feature,
}

impl Related<super::hotel_card::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::HotelCard.def()
    }
}

impl Related<super::hotel_feature::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Feature.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
