use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    ToSchema,
    strum::Display,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PolicyKind {
    #[sea_orm(string_value = "check_in")]
    CheckIn,
    #[sea_orm(string_value = "check_out")]
    CheckOut,
    #[sea_orm(string_value = "cancellation")]
    Cancellation,
    #[sea_orm(string_value = "pets")]
    Pets,
    #[sea_orm(string_value = "children")]
    Children,
    #[sea_orm(string_value = "payment")]
    Payment,
    #[sea_orm(string_value = "other")]
    Other,
}

impl PolicyKind {
    /// Only `other` may appear more than once per hotel.
    pub fn is_repeatable(self) -> bool {
        matches!(self, PolicyKind::Other)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "hotel_policies")]
#[schema(as = HotelPolicy)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub hotel_card_id: Uuid,
    pub kind: PolicyKind,
    #[sea_orm(column_type = "Text")]
    pub description: String,
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
