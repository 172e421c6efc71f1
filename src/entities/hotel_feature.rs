use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The four feature catalogs a hotel card can be tagged from.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
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
pub enum FeatureKind {
    #[sea_orm(string_value = "amenity")]
    Amenity,
    #[sea_orm(string_value = "label")]
    Label,
    #[sea_orm(string_value = "highlight")]
    Highlight,
    #[sea_orm(string_value = "accessibility")]
    Accessibility,
}

impl FeatureKind {
    /// Human name used in messages, e.g. "Amenity".
    pub fn label(self) -> &'static str {
        match self {
            FeatureKind::Amenity => "Amenity",
            FeatureKind::Label => "Label",
            FeatureKind::Highlight => "Highlight",
            FeatureKind::Accessibility => "Accessibility option",
        }
    }

    /// Collection segment the kind is mounted under.
    pub fn route_segment(self) -> &'static str {
        match self {
            FeatureKind::Amenity => "amenities",
            FeatureKind::Label => "labels",
            FeatureKind::Highlight => "highlights",
            FeatureKind::Accessibility => "accessibility-options",
        }
    }

    pub fn from_route_segment(segment: &str) -> Option<Self> {
        <Self as sea_orm::Iterable>::iter().find(|kind| kind.route_segment() == segment)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "hotel_features")]
#[schema(as = HotelFeature)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub kind: FeatureKind,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::hotel_card_feature::Entity")]
    HotelCardFeatures,
}

impl Related<super::hotel_card_feature::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::HotelCardFeatures.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
