use std::{collections::HashMap, sync::Arc};

use once_cell::sync::Lazy;
use regex::Regex;
use sea_orm::{
    sea_query::Query, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::{
    content::{rating_summaries, RatingSummary},
    contains_ci, double_option, fetch_page,
    features::FeatureService,
    find_or_404, find_reference, now, optional_text, order, required_text, resolve_sort,
    DeleteSummary,
};
use crate::{
    entities::{
        accommodation_type, address, city, country, destination, hotel_card, hotel_card_feature,
        hotel_details, hotel_feature, hotel_feature::FeatureKind, hotel_group, hotel_policy,
        hotel_review, hotel_room, neighborhood, parking_option,
    },
    errors::ServiceError,
    ListQuery, PageRequest, PaginatedResponse,
};

pub const DEFAULT_CURRENCY: &str = "USD";

static SLUG_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("slug pattern is a valid regex")
});

/// Lowercase ASCII alphanumerics joined by single dashes.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Use the caller's slug if given (it must already be canonical), otherwise derive one from `name`.
pub fn resolve_slug(name: &str, requested: Option<&str>) -> Result<String, ServiceError> {
    let slug = match requested.map(str::trim) {
        Some(requested) if !requested.is_empty() => {
            if !SLUG_PATTERN.is_match(requested) {
                return Err(ServiceError::ValidationError(format!(
                    "slug '{requested}' must be lowercase letters and digits separated by single dashes"
                )));
            }
            requested.to_string()
        }
        _ => slugify(name),
    };
    if slug.is_empty() {
        return Err(ServiceError::ValidationError(
            "name must contain at least one ASCII letter or digit to derive a slug".into(),
        ));
    }
    Ok(slug)
}

pub fn normalize_currency(raw: &str) -> Result<String, ServiceError> {
    let currency = raw.trim().to_ascii_uppercase();
    if currency.len() != 3 || !currency.bytes().all(|b| b.is_ascii_uppercase()) {
        return Err(ServiceError::ValidationError(format!(
            "currency must be a three-letter code, got '{}'",
            raw.trim()
        )));
    }
    Ok(currency)
}

/// "street, neighborhood, city, postal_code, country" with absent parts skipped.
pub fn format_address(
    street: Option<&str>,
    neighborhood: Option<&str>,
    city: &str,
    postal_code: Option<&str>,
    country: &str,
) -> String {
    [street, neighborhood, Some(city), postal_code, Some(country)]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateHotelRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    /// Derived from `name` when omitted
    pub slug: Option<String>,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    #[validate(range(min = 1, max = 5))]
    pub star_rating: i32,
    #[validate(range(min = 0.0))]
    pub price_per_night: f64,
    /// Three-letter code; defaults to USD
    pub currency: Option<String>,
    pub city_id: Uuid,
    pub destination_id: Option<Uuid>,
    pub accommodation_type_id: Option<Uuid>,
    pub hotel_group_id: Option<Uuid>,
    pub parking_option_id: Option<Uuid>,
    pub address_id: Option<Uuid>,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
    #[validate(url)]
    pub image_url: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub amenity_ids: Vec<Uuid>,
    #[serde(default)]
    pub label_ids: Vec<Uuid>,
    #[serde(default)]
    pub highlight_ids: Vec<Uuid>,
    #[serde(default)]
    pub accessibility_ids: Vec<Uuid>,
}

fn default_true() -> bool {
    true
}

/// Partial update. `null` clears an optional field; a present id list
/// replaces that kind's feature set.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateHotelRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[validate(range(min = 1, max = 5))]
    pub star_rating: Option<i32>,
    #[validate(range(min = 0.0))]
    pub price_per_night: Option<f64>,
    pub currency: Option<String>,
    pub city_id: Option<Uuid>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<Uuid>)]
    pub destination_id: Option<Option<Uuid>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<Uuid>)]
    pub accommodation_type_id: Option<Option<Uuid>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<Uuid>)]
    pub hotel_group_id: Option<Option<Uuid>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<Uuid>)]
    pub parking_option_id: Option<Option<Uuid>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<Uuid>)]
    pub address_id: Option<Option<Uuid>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<f64>)]
    pub latitude: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<f64>)]
    pub longitude: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub image_url: Option<Option<String>>,
    pub is_active: Option<bool>,
    pub amenity_ids: Option<Vec<Uuid>>,
    pub label_ids: Option<Vec<Uuid>>,
    pub highlight_ids: Option<Vec<Uuid>>,
    pub accessibility_ids: Option<Vec<Uuid>>,
}

impl UpdateHotelRequest {
    fn check_cleared_fields(&self) -> Result<(), ServiceError> {
        if let Some(Some(description)) = &self.description {
            if description.chars().count() > 5000 {
                return Err(ServiceError::ValidationError(
                    "description must be at most 5000 characters".into(),
                ));
            }
        }
        if let Some(Some(lat)) = self.latitude {
            if !(-90.0..=90.0).contains(&lat) {
                return Err(ServiceError::ValidationError(format!(
                    "latitude must be between -90 and 90, got {lat}"
                )));
            }
        }
        if let Some(Some(lng)) = self.longitude {
            if !(-180.0..=180.0).contains(&lng) {
                return Err(ServiceError::ValidationError(format!(
                    "longitude must be between -180 and 180, got {lng}"
                )));
            }
        }
        if let Some(Some(url)) = &self.image_url {
            if !validator::validate_url(url.trim()) {
                return Err(ServiceError::ValidationError(format!(
                    "image_url must be a valid URL, got '{url}'"
                )));
            }
        }
        Ok(())
    }

    fn feature_sets(&self) -> [(FeatureKind, Option<&Vec<Uuid>>); 4] {
        [
            (FeatureKind::Amenity, self.amenity_ids.as_ref()),
            (FeatureKind::Label, self.label_ids.as_ref()),
            (FeatureKind::Highlight, self.highlight_ids.as_ref()),
            (FeatureKind::Accessibility, self.accessibility_ids.as_ref()),
        ]
    }
}

/// Query-string filters for `GET /hotels`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HotelFilter {
    pub city_id: Option<Uuid>,
    pub country_id: Option<Uuid>,
    pub destination_id: Option<Uuid>,
    pub accommodation_type_id: Option<Uuid>,
    pub hotel_group_id: Option<Uuid>,
    pub min_stars: Option<i32>,
    pub max_stars: Option<i32>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    /// Only hotels offering this amenity
    pub amenity_id: Option<Uuid>,
    pub is_active: Option<bool>,
}

impl HotelFilter {
    pub fn check(&self) -> Result<(), ServiceError> {
        if let (Some(min), Some(max)) = (self.min_stars, self.max_stars) {
            if min > max {
                return Err(ServiceError::BadRequest(format!(
                    "min_stars ({min}) cannot exceed max_stars ({max})"
                )));
            }
        }
        if let (Some(min), Some(max)) = (self.min_price, self.max_price) {
            if min > max {
                return Err(ServiceError::BadRequest(format!(
                    "min_price ({min}) cannot exceed max_price ({max})"
                )));
            }
        }
        Ok(())
    }
}

/// List entry: the card plus its review aggregate.
#[derive(Debug, Serialize, ToSchema)]
pub struct HotelCardSummary {
    #[serde(flatten)]
    pub card: hotel_card::Model,
    pub average_rating: Option<f64>,
    pub review_count: u64,
}

/// Everything the hotel page needs in one payload.
#[derive(Debug, Serialize, ToSchema)]
pub struct HotelCardDetail {
    #[serde(flatten)]
    pub card: hotel_card::Model,
    pub city: city::Model,
    pub country: country::Model,
    pub destination: Option<destination::Model>,
    pub accommodation_type: Option<accommodation_type::Model>,
    pub hotel_group: Option<hotel_group::Model>,
    pub parking_option: Option<parking_option::Model>,
    pub address: Option<address::Model>,
    /// "street, neighborhood, city, postal_code, country"
    pub formatted_address: String,
    pub amenities: Vec<hotel_feature::Model>,
    pub labels: Vec<hotel_feature::Model>,
    pub highlights: Vec<hotel_feature::Model>,
    pub accessibility_options: Vec<hotel_feature::Model>,
    pub details: Option<hotel_details::Model>,
    pub policies: Vec<hotel_policy::Model>,
    pub rooms: Vec<hotel_room::Model>,
    /// Mean review rating rounded to one decimal
    pub average_rating: Option<f64>,
    pub review_count: u64,
}

struct CardReferences {
    city_id: Uuid,
    destination_id: Option<Uuid>,
    accommodation_type_id: Option<Uuid>,
    hotel_group_id: Option<Uuid>,
    parking_option_id: Option<Uuid>,
    address_id: Option<Uuid>,
}

impl CardReferences {
    /// Every referenced row must exist; destination and address must share the card's city.
    async fn check<C: ConnectionTrait>(&self, db: &C) -> Result<(), ServiceError> {
        find_reference::<city::Entity, _>(db, self.city_id, "city_id").await?;

        if let Some(id) = self.destination_id {
            let found = find_reference::<destination::Entity, _>(db, id, "destination_id").await?;
            if found.city_id != self.city_id {
                return Err(ServiceError::BadRequest(format!(
                    "Destination {id} is not in city {}",
                    self.city_id
                )));
            }
        }
        if let Some(id) = self.accommodation_type_id {
            find_reference::<accommodation_type::Entity, _>(db, id, "accommodation_type_id")
                .await?;
        }
        if let Some(id) = self.hotel_group_id {
            find_reference::<hotel_group::Entity, _>(db, id, "hotel_group_id").await?;
        }
        if let Some(id) = self.parking_option_id {
            find_reference::<parking_option::Entity, _>(db, id, "parking_option_id").await?;
        }
        if let Some(id) = self.address_id {
            let found = find_reference::<address::Entity, _>(db, id, "address_id").await?;
            if found.city_id != self.city_id {
                return Err(ServiceError::BadRequest(format!(
                    "Address {id} is not in city {}",
                    self.city_id
                )));
            }
        }
        Ok(())
    }
}

async fn ensure_slug_free<C: ConnectionTrait>(
    db: &C,
    slug: &str,
    exclude: Option<Uuid>,
) -> Result<(), ServiceError> {
    let mut select = hotel_card::Entity::find().filter(hotel_card::Column::Slug.eq(slug));
    if let Some(id) = exclude {
        select = select.filter(hotel_card::Column::Id.ne(id));
    }
    if select.one(db).await?.is_some() {
        return Err(ServiceError::Conflict(format!(
            "A hotel with slug '{slug}' already exists"
        )));
    }
    Ok(())
}

/// Replace the card's links of one kind with `feature_ids` (already resolved).
async fn replace_links<C: ConnectionTrait>(
    db: &C,
    hotel_id: Uuid,
    kind: FeatureKind,
    feature_ids: &[Uuid],
) -> Result<(), ServiceError> {
    let features_of_kind = Query::select()
        .column(hotel_feature::Column::Id)
        .from(hotel_feature::Entity)
        .and_where(hotel_feature::Column::Kind.eq(kind))
        .to_owned();

    hotel_card_feature::Entity::delete_many()
        .filter(hotel_card_feature::Column::HotelCardId.eq(hotel_id))
        .filter(hotel_card_feature::Column::FeatureId.in_subquery(features_of_kind))
        .exec(db)
        .await?;

    if !feature_ids.is_empty() {
        hotel_card_feature::Entity::insert_many(feature_ids.iter().map(|feature_id| {
            hotel_card_feature::ActiveModel {
                hotel_card_id: Set(hotel_id),
                feature_id: Set(*feature_id),
            }
        }))
        .exec(db)
        .await?;
    }
    Ok(())
}

async fn linked_features<C: ConnectionTrait>(
    db: &C,
    hotel_id: Uuid,
    kind: Option<FeatureKind>,
) -> Result<Vec<hotel_feature::Model>, ServiceError> {
    let links = Query::select()
        .column(hotel_card_feature::Column::FeatureId)
        .from(hotel_card_feature::Entity)
        .and_where(hotel_card_feature::Column::HotelCardId.eq(hotel_id))
        .to_owned();

    let mut select =
        hotel_feature::Entity::find().filter(hotel_feature::Column::Id.in_subquery(links));
    if let Some(kind) = kind {
        select = select.filter(hotel_feature::Column::Kind.eq(kind));
    }
    Ok(select
        .order_by_asc(hotel_feature::Column::Name)
        .all(db)
        .await?)
}

/// Hotel cards: listing, detail view, writes and feature links.
#[derive(Clone)]
pub struct HotelService {
    db: Arc<DatabaseConnection>,
}

impl HotelService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn list_hotels(
        &self,
        filter: &HotelFilter,
        query: &ListQuery,
        page: PageRequest,
    ) -> Result<PaginatedResponse<HotelCardSummary>, ServiceError> {
        filter.check()?;
        let (column, descending) = resolve_sort(
            query,
            &[
                ("name", hotel_card::Column::Name),
                ("price", hotel_card::Column::PricePerNight),
                ("stars", hotel_card::Column::StarRating),
                ("created_at", hotel_card::Column::CreatedAt),
            ],
            hotel_card::Column::Name,
        )?;

        let mut select = hotel_card::Entity::find();
        if let Some(city_id) = filter.city_id {
            select = select.filter(hotel_card::Column::CityId.eq(city_id));
        }
        if let Some(country_id) = filter.country_id {
            let cities = Query::select()
                .column(city::Column::Id)
                .from(city::Entity)
                .and_where(city::Column::CountryId.eq(country_id))
                .to_owned();
            select = select.filter(hotel_card::Column::CityId.in_subquery(cities));
        }
        if let Some(destination_id) = filter.destination_id {
            select = select.filter(hotel_card::Column::DestinationId.eq(destination_id));
        }
        if let Some(id) = filter.accommodation_type_id {
            select = select.filter(hotel_card::Column::AccommodationTypeId.eq(id));
        }
        if let Some(id) = filter.hotel_group_id {
            select = select.filter(hotel_card::Column::HotelGroupId.eq(id));
        }
        if let Some(min) = filter.min_stars {
            select = select.filter(hotel_card::Column::StarRating.gte(min));
        }
        if let Some(max) = filter.max_stars {
            select = select.filter(hotel_card::Column::StarRating.lte(max));
        }
        if let Some(min) = filter.min_price {
            select = select.filter(hotel_card::Column::PricePerNight.gte(min));
        }
        if let Some(max) = filter.max_price {
            select = select.filter(hotel_card::Column::PricePerNight.lte(max));
        }
        if let Some(amenity_id) = filter.amenity_id {
            let amenities = Query::select()
                .column(hotel_feature::Column::Id)
                .from(hotel_feature::Entity)
                .and_where(hotel_feature::Column::Kind.eq(FeatureKind::Amenity))
                .to_owned();
            let hotels = Query::select()
                .column(hotel_card_feature::Column::HotelCardId)
                .from(hotel_card_feature::Entity)
                .and_where(hotel_card_feature::Column::FeatureId.eq(amenity_id))
                .and_where(hotel_card_feature::Column::FeatureId.in_subquery(amenities))
                .to_owned();
            select = select.filter(hotel_card::Column::Id.in_subquery(hotels));
        }
        if let Some(is_active) = filter.is_active {
            select = select.filter(hotel_card::Column::IsActive.eq(is_active));
        }
        if let Some(term) = query.search_term() {
            select = select.filter(contains_ci(hotel_card::Column::Name, term));
        }

        let select = order(select, column, descending);
        let cards = fetch_page(&*self.db, order(select, hotel_card::Column::Id, false), page).await?;

        let ids: Vec<Uuid> = cards.items.iter().map(|card| card.id).collect();
        let mut ratings = rating_summaries(&*self.db, &ids).await?;
        let items = cards
            .items
            .into_iter()
            .map(|card| {
                let rating = ratings
                    .remove(&card.id)
                    .unwrap_or_else(|| RatingSummary::empty(card.id));
                HotelCardSummary {
                    card,
                    average_rating: rating.average_rating,
                    review_count: rating.review_count,
                }
            })
            .collect();

        Ok(PaginatedResponse {
            items,
            total: cards.total,
            page: cards.page,
            limit: cards.limit,
            total_pages: cards.total_pages,
        })
    }

    #[instrument(skip(self))]
    pub async fn get_card(&self, id: Uuid) -> Result<hotel_card::Model, ServiceError> {
        find_or_404::<hotel_card::Entity, _>(&*self.db, id, "Hotel").await
    }

    #[instrument(skip(self))]
    pub async fn get_hotel(&self, id: Uuid) -> Result<HotelCardDetail, ServiceError> {
        let card = self.get_card(id).await?;
        self.detail(card).await
    }

    #[instrument(skip(self))]
    pub async fn get_hotel_by_slug(&self, slug: &str) -> Result<HotelCardDetail, ServiceError> {
        let card = hotel_card::Entity::find()
            .filter(hotel_card::Column::Slug.eq(slug.trim().to_ascii_lowercase()))
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Hotel with slug '{slug}' not found")))?;
        self.detail(card).await
    }

    async fn detail(&self, card: hotel_card::Model) -> Result<HotelCardDetail, ServiceError> {
        let db = &*self.db;

        let city = city::Entity::find_by_id(card.city_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::InternalError(format!("hotel {} has no city", card.id)))?;
        let country = country::Entity::find_by_id(city.country_id)
            .one(db)
            .await?
            .ok_or_else(|| {
                ServiceError::InternalError(format!("city {} has no country", city.id))
            })?;

        let destination = match card.destination_id {
            Some(id) => destination::Entity::find_by_id(id).one(db).await?,
            None => None,
        };
        let accommodation_type = match card.accommodation_type_id {
            Some(id) => accommodation_type::Entity::find_by_id(id).one(db).await?,
            None => None,
        };
        let hotel_group = match card.hotel_group_id {
            Some(id) => hotel_group::Entity::find_by_id(id).one(db).await?,
            None => None,
        };
        let parking_option = match card.parking_option_id {
            Some(id) => parking_option::Entity::find_by_id(id).one(db).await?,
            None => None,
        };
        let address = match card.address_id {
            Some(id) => address::Entity::find_by_id(id).one(db).await?,
            None => None,
        };
        let neighborhood = match address.as_ref().and_then(|a| a.neighborhood_id) {
            Some(id) => neighborhood::Entity::find_by_id(id).one(db).await?,
            None => None,
        };

        let formatted_address = match &address {
            Some(address) => format_address(
                Some(&address.street),
                neighborhood.as_ref().map(|n| n.name.as_str()),
                &city.name,
                address.postal_code.as_deref(),
                &country.name,
            ),
            None => format_address(None, None, &city.name, None, &country.name),
        };

        let mut grouped: HashMap<FeatureKind, Vec<hotel_feature::Model>> = HashMap::new();
        for feature in linked_features(db, card.id, None).await? {
            grouped.entry(feature.kind).or_default().push(feature);
        }

        let details = hotel_details::Entity::find_by_id(card.id).one(db).await?;
        let policies = hotel_policy::Entity::find()
            .filter(hotel_policy::Column::HotelCardId.eq(card.id))
            .order_by_asc(hotel_policy::Column::Kind)
            .order_by_asc(hotel_policy::Column::CreatedAt)
            .all(db)
            .await?;
        let rooms = hotel_room::Entity::find()
            .filter(hotel_room::Column::HotelCardId.eq(card.id))
            .order_by_asc(hotel_room::Column::PricePerNight)
            .order_by_asc(hotel_room::Column::Name)
            .all(db)
            .await?;
        let rating = rating_summaries(db, &[card.id])
            .await?
            .remove(&card.id)
            .unwrap_or_else(|| RatingSummary::empty(card.id));

        Ok(HotelCardDetail {
            city,
            country,
            destination,
            accommodation_type,
            hotel_group,
            parking_option,
            address,
            formatted_address,
            amenities: grouped.remove(&FeatureKind::Amenity).unwrap_or_default(),
            labels: grouped.remove(&FeatureKind::Label).unwrap_or_default(),
            highlights: grouped.remove(&FeatureKind::Highlight).unwrap_or_default(),
            accessibility_options: grouped
                .remove(&FeatureKind::Accessibility)
                .unwrap_or_default(),
            details,
            policies,
            rooms,
            average_rating: rating.average_rating,
            review_count: rating.review_count,
            card,
        })
    }

    #[instrument(skip(self))]
    pub async fn create_hotel(
        &self,
        input: CreateHotelRequest,
    ) -> Result<HotelCardDetail, ServiceError> {
        let name = required_text("name", &input.name)?;
        let slug = resolve_slug(&name, input.slug.as_deref())?;
        let currency = match input.currency.as_deref() {
            Some(raw) => normalize_currency(raw)?,
            None => DEFAULT_CURRENCY.to_string(),
        };
        let references = CardReferences {
            city_id: input.city_id,
            destination_id: input.destination_id,
            accommodation_type_id: input.accommodation_type_id,
            hotel_group_id: input.hotel_group_id,
            parking_option_id: input.parking_option_id,
            address_id: input.address_id,
        };

        let txn = self.db.begin().await?;
        references.check(&txn).await?;
        ensure_slug_free(&txn, &slug, None).await?;

        let feature_sets = [
            (FeatureKind::Amenity, &input.amenity_ids),
            (FeatureKind::Label, &input.label_ids),
            (FeatureKind::Highlight, &input.highlight_ids),
            (FeatureKind::Accessibility, &input.accessibility_ids),
        ];
        let mut resolved = Vec::with_capacity(feature_sets.len());
        for (kind, ids) in feature_sets {
            resolved.push((kind, FeatureService::resolve_ids(&txn, kind, ids).await?));
        }

        let timestamp = now();
        let card = hotel_card::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name),
            slug: Set(slug),
            description: Set(optional_text(input.description)),
            star_rating: Set(input.star_rating),
            price_per_night: Set(input.price_per_night),
            currency: Set(currency),
            city_id: Set(references.city_id),
            destination_id: Set(references.destination_id),
            accommodation_type_id: Set(references.accommodation_type_id),
            hotel_group_id: Set(references.hotel_group_id),
            parking_option_id: Set(references.parking_option_id),
            address_id: Set(references.address_id),
            latitude: Set(input.latitude),
            longitude: Set(input.longitude),
            image_url: Set(optional_text(input.image_url)),
            is_active: Set(input.is_active),
            created_at: Set(timestamp),
            updated_at: Set(timestamp),
        }
        .insert(&txn)
        .await?;

        for (kind, ids) in &resolved {
            replace_links(&txn, card.id, *kind, ids).await?;
        }
        txn.commit().await?;

        info!(hotel_id = %card.id, slug = %card.slug, "Hotel created");
        self.detail(card).await
    }

    #[instrument(skip(self))]
    pub async fn update_hotel(
        &self,
        id: Uuid,
        input: UpdateHotelRequest,
    ) -> Result<HotelCardDetail, ServiceError> {
        input.check_cleared_fields()?;

        let txn = self.db.begin().await?;
        let existing = find_or_404::<hotel_card::Entity, _>(&txn, id, "Hotel").await?;

        let name = input
            .name
            .as_deref()
            .map(|n| required_text("name", n))
            .transpose()?;
        let slug = match input.slug.as_deref() {
            Some(requested) => {
                let slug = resolve_slug(name.as_deref().unwrap_or(&existing.name), Some(requested))?;
                ensure_slug_free(&txn, &slug, Some(id)).await?;
                Some(slug)
            }
            None => None,
        };
        let currency = input
            .currency
            .as_deref()
            .map(normalize_currency)
            .transpose()?;

        let references = CardReferences {
            city_id: input.city_id.unwrap_or(existing.city_id),
            destination_id: input.destination_id.unwrap_or(existing.destination_id),
            accommodation_type_id: input
                .accommodation_type_id
                .unwrap_or(existing.accommodation_type_id),
            hotel_group_id: input.hotel_group_id.unwrap_or(existing.hotel_group_id),
            parking_option_id: input.parking_option_id.unwrap_or(existing.parking_option_id),
            address_id: input.address_id.unwrap_or(existing.address_id),
        };
        references.check(&txn).await?;

        let mut resolved = Vec::new();
        for (kind, ids) in input.feature_sets() {
            if let Some(ids) = ids {
                resolved.push((kind, FeatureService::resolve_ids(&txn, kind, ids).await?));
            }
        }

        let mut active: hotel_card::ActiveModel = existing.into();
        if let Some(name) = name {
            active.name = Set(name);
        }
        if let Some(slug) = slug {
            active.slug = Set(slug);
        }
        if let Some(description) = input.description {
            active.description = Set(optional_text(description));
        }
        if let Some(stars) = input.star_rating {
            active.star_rating = Set(stars);
        }
        if let Some(price) = input.price_per_night {
            active.price_per_night = Set(price);
        }
        if let Some(currency) = currency {
            active.currency = Set(currency);
        }
        active.city_id = Set(references.city_id);
        active.destination_id = Set(references.destination_id);
        active.accommodation_type_id = Set(references.accommodation_type_id);
        active.hotel_group_id = Set(references.hotel_group_id);
        active.parking_option_id = Set(references.parking_option_id);
        active.address_id = Set(references.address_id);
        if let Some(latitude) = input.latitude {
            active.latitude = Set(latitude);
        }
        if let Some(longitude) = input.longitude {
            active.longitude = Set(longitude);
        }
        if let Some(image_url) = input.image_url {
            active.image_url = Set(optional_text(image_url));
        }
        if let Some(is_active) = input.is_active {
            active.is_active = Set(is_active);
        }
        active.updated_at = Set(now());
        let card = active.update(&txn).await?;

        for (kind, ids) in &resolved {
            replace_links(&txn, id, *kind, ids).await?;
        }
        txn.commit().await?;

        info!(hotel_id = %id, "Hotel updated");
        self.detail(card).await
    }

    /// Replace one kind's feature set and return the new set.
    #[instrument(skip(self))]
    pub async fn replace_features(
        &self,
        id: Uuid,
        kind: FeatureKind,
        feature_ids: Vec<Uuid>,
    ) -> Result<Vec<hotel_feature::Model>, ServiceError> {
        let txn = self.db.begin().await?;
        find_or_404::<hotel_card::Entity, _>(&txn, id, "Hotel").await?;

        let resolved = FeatureService::resolve_ids(&txn, kind, &feature_ids).await?;
        replace_links(&txn, id, kind, &resolved).await?;
        hotel_card::Entity::update_many()
            .col_expr(
                hotel_card::Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(now()),
            )
            .filter(hotel_card::Column::Id.eq(id))
            .exec(&txn)
            .await?;

        let features = linked_features(&txn, id, Some(kind)).await?;
        txn.commit().await?;

        info!(hotel_id = %id, %kind, count = features.len(), "Hotel features replaced");
        Ok(features)
    }

    /// Remove the card with its reviews, policies, rooms, details and feature links.
    #[instrument(skip(self))]
    pub async fn delete_hotel(&self, id: Uuid) -> Result<DeleteSummary, ServiceError> {
        let txn = self.db.begin().await?;
        find_or_404::<hotel_card::Entity, _>(&txn, id, "Hotel").await?;

        hotel_card_feature::Entity::delete_many()
            .filter(hotel_card_feature::Column::HotelCardId.eq(id))
            .exec(&txn)
            .await?;
        hotel_review::Entity::delete_many()
            .filter(hotel_review::Column::HotelCardId.eq(id))
            .exec(&txn)
            .await?;
        hotel_policy::Entity::delete_many()
            .filter(hotel_policy::Column::HotelCardId.eq(id))
            .exec(&txn)
            .await?;
        hotel_room::Entity::delete_many()
            .filter(hotel_room::Column::HotelCardId.eq(id))
            .exec(&txn)
            .await?;
        hotel_details::Entity::delete_by_id(id).exec(&txn).await?;
        hotel_card::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        info!(hotel_id = %id, "Hotel deleted");
        Ok(DeleteSummary::deleted(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Grand Hotel Paris", "grand-hotel-paris")]
    #[case("  Hôtel  du Louvre!! ", "h-tel-du-louvre")]
    #[case("B&B -- 42", "b-b-42")]
    #[case("***", "")]
    fn slugify_joins_alphanumerics_with_dashes(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(slugify(name), expected);
    }

    #[test]
    fn explicit_slug_must_be_canonical() {
        assert_eq!(resolve_slug("Ignored", Some("sea-view-2")).unwrap(), "sea-view-2");
        assert!(resolve_slug("Ignored", Some("Sea View")).is_err());
        assert!(resolve_slug("Ignored", Some("double--dash")).is_err());
        assert_eq!(resolve_slug("Sea View", Some("  ")).unwrap(), "sea-view");
        assert!(resolve_slug("!!!", None).is_err());
    }

    #[rstest]
    #[case("eur", Some("EUR"))]
    #[case(" usd ", Some("USD"))]
    #[case("EURO", None)]
    #[case("E1R", None)]
    fn currency_codes(#[case] raw: &str, #[case] expected: Option<&str>) {
        assert_eq!(normalize_currency(raw).ok().as_deref(), expected);
    }

    #[test]
    fn formatted_address_skips_missing_parts() {
        assert_eq!(
            format_address(
                Some("1 Rue de Rivoli"),
                Some("Louvre"),
                "Paris",
                Some("75001"),
                "France"
            ),
            "1 Rue de Rivoli, Louvre, Paris, 75001, France"
        );
        assert_eq!(
            format_address(Some("1 Rue de Rivoli"), None, "Paris", None, "France"),
            "1 Rue de Rivoli, Paris, France"
        );
        assert_eq!(format_address(None, None, "Paris", None, "France"), "Paris, France");
    }

    #[test]
    fn inverted_ranges_are_rejected() {
        let filter = HotelFilter {
            min_stars: Some(4),
            max_stars: Some(2),
            ..Default::default()
        };
        assert!(matches!(filter.check(), Err(ServiceError::BadRequest(_))));

        let filter = HotelFilter {
            min_price: Some(200.0),
            max_price: Some(100.0),
            ..Default::default()
        };
        assert!(matches!(filter.check(), Err(ServiceError::BadRequest(_))));

        let filter = HotelFilter {
            min_stars: Some(3),
            max_stars: Some(3),
            ..Default::default()
        };
        assert!(filter.check().is_ok());
    }

    #[test]
    fn star_rating_is_bounded() {
        let request: CreateHotelRequest = serde_json::from_value(serde_json::json!({
            "name": "Too Many Stars",
            "star_rating": 6,
            "price_per_night": 10.0,
            "city_id": Uuid::nil()
        }))
        .unwrap();
        assert!(request.validate().is_err());
        assert!(request.is_active);
        assert!(request.amenity_ids.is_empty());
    }
}
