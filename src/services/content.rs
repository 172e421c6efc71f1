use std::{collections::HashMap, sync::Arc};

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    FromQueryResult, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::{
    double_option, fetch_page, find_or_404, now, optional_text, order, required_text,
    resolve_sort, DeleteSummary,
};
use crate::{
    entities::{
        hotel_card, hotel_details,
        hotel_policy::{self, PolicyKind},
        hotel_review, hotel_room,
    },
    errors::ServiceError,
    ListQuery, PageRequest, PaginatedResponse,
};

pub const EARLIEST_YEAR_BUILT: i32 = 1800;

static TIME_OF_DAY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([01]\d|2[0-3]):[0-5]\d$").expect("time pattern is a valid regex"));

/// Review aggregate for one hotel.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RatingSummary {
    pub hotel_id: Uuid,
    /// Mean rating rounded to one decimal; absent without reviews
    pub average_rating: Option<f64>,
    pub review_count: u64,
}

impl RatingSummary {
    pub fn empty(hotel_id: Uuid) -> Self {
        Self {
            hotel_id,
            average_rating: None,
            review_count: 0,
        }
    }

    fn from_totals(hotel_id: Uuid, rating_sum: i64, review_count: i64) -> Self {
        if review_count <= 0 {
            return Self::empty(hotel_id);
        }
        let mean = rating_sum as f64 / review_count as f64;
        Self {
            hotel_id,
            average_rating: Some((mean * 10.0).round() / 10.0),
            review_count: review_count as u64,
        }
    }
}

#[derive(Debug, FromQueryResult)]
struct ReviewTotals {
    hotel_card_id: Uuid,
    rating_sum: Option<i64>,
    review_count: i64,
}

/// Aggregate reviews for several hotels in one grouped query.
/// Hotels without reviews are absent from the map.
pub(crate) async fn rating_summaries<C: ConnectionTrait>(
    db: &C,
    hotel_ids: &[Uuid],
) -> Result<HashMap<Uuid, RatingSummary>, ServiceError> {
    if hotel_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let totals = hotel_review::Entity::find()
        .select_only()
        .column(hotel_review::Column::HotelCardId)
        .column_as(hotel_review::Column::Rating.sum(), "rating_sum")
        .column_as(hotel_review::Column::Id.count(), "review_count")
        .filter(hotel_review::Column::HotelCardId.is_in(hotel_ids.iter().copied()))
        .group_by(hotel_review::Column::HotelCardId)
        .into_model::<ReviewTotals>()
        .all(db)
        .await?;

    Ok(totals
        .into_iter()
        .map(|row| {
            let summary = RatingSummary::from_totals(
                row.hotel_card_id,
                row.rating_sum.unwrap_or(0),
                row.review_count,
            );
            (row.hotel_card_id, summary)
        })
        .collect())
}

fn check_time_of_day(field: &str, value: Option<&str>) -> Result<(), ServiceError> {
    match value {
        Some(value) if !TIME_OF_DAY.is_match(value) => Err(ServiceError::ValidationError(
            format!("{field} must be a time formatted as HH:MM, got '{value}'"),
        )),
        _ => Ok(()),
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReviewRequest {
    #[validate(length(min = 1, max = 100))]
    pub author_name: String,
    /// 1 to 10
    #[validate(range(min = 1, max = 10))]
    pub rating: i32,
    #[validate(length(max = 200))]
    pub title: Option<String>,
    #[validate(length(max = 5000))]
    pub comment: Option<String>,
    pub stay_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePolicyRequest {
    pub kind: PolicyKind,
    #[validate(length(min = 1, max = 2000))]
    pub description: String,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdatePolicyRequest {
    pub kind: Option<PolicyKind>,
    #[validate(length(min = 1, max = 2000))]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRoomRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(range(min = 1, max = 20))]
    pub capacity: i32,
    #[validate(length(max = 50))]
    pub bed_type: Option<String>,
    #[validate(range(min = 0.0))]
    pub price_per_night: f64,
    #[serde(default = "default_quantity")]
    #[validate(range(min = 0))]
    pub quantity: i32,
}

fn default_quantity() -> i32 {
    1
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateRoomRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(range(min = 1, max = 20))]
    pub capacity: Option<i32>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub bed_type: Option<Option<String>>,
    #[validate(range(min = 0.0))]
    pub price_per_night: Option<f64>,
    #[validate(range(min = 0))]
    pub quantity: Option<i32>,
}

/// Full replacement of a hotel's operational details.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpsertDetailsRequest {
    /// "HH:MM"
    pub check_in_from: Option<String>,
    /// "HH:MM"
    pub check_out_until: Option<String>,
    #[validate(range(min = 0, max = 100000))]
    pub total_rooms: Option<i32>,
    pub year_built: Option<i32>,
    #[validate(length(min = 3, max = 32))]
    pub phone: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(url)]
    pub website: Option<String>,
}

impl UpsertDetailsRequest {
    fn check(&self) -> Result<(), ServiceError> {
        check_time_of_day("check_in_from", self.check_in_from.as_deref())?;
        check_time_of_day("check_out_until", self.check_out_until.as_deref())?;
        if let Some(year) = self.year_built {
            let current = now().year();
            if !(EARLIEST_YEAR_BUILT..=current).contains(&year) {
                return Err(ServiceError::ValidationError(format!(
                    "year_built must be between {EARLIEST_YEAR_BUILT} and {current}, got {year}"
                )));
            }
        }
        Ok(())
    }
}

/// Reviews, policies, rooms and details attached to a hotel card.
#[derive(Clone)]
pub struct HotelContentService {
    db: Arc<DatabaseConnection>,
}

impl HotelContentService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    async fn hotel<C: ConnectionTrait>(db: &C, hotel_id: Uuid) -> Result<hotel_card::Model, ServiceError> {
        find_or_404::<hotel_card::Entity, _>(db, hotel_id, "Hotel").await
    }

    // Reviews

    /// Newest first unless the query asks otherwise.
    #[instrument(skip(self))]
    pub async fn list_reviews(
        &self,
        hotel_id: Uuid,
        query: &ListQuery,
        page: PageRequest,
    ) -> Result<PaginatedResponse<hotel_review::Model>, ServiceError> {
        Self::hotel(&*self.db, hotel_id).await?;
        let (column, descending) = resolve_sort(
            query,
            &[
                ("created_at", hotel_review::Column::CreatedAt),
                ("rating", hotel_review::Column::Rating),
            ],
            hotel_review::Column::CreatedAt,
        )?;
        let descending = descending || (query.sort_by.is_none() && query.sort_order.is_none());

        let select =
            hotel_review::Entity::find().filter(hotel_review::Column::HotelCardId.eq(hotel_id));
        let select = order(select, column, descending);
        fetch_page(&*self.db, order(select, hotel_review::Column::Id, false), page).await
    }

    #[instrument(skip(self))]
    pub async fn rating_summary(&self, hotel_id: Uuid) -> Result<RatingSummary, ServiceError> {
        Self::hotel(&*self.db, hotel_id).await?;
        Ok(rating_summaries(&*self.db, &[hotel_id])
            .await?
            .remove(&hotel_id)
            .unwrap_or_else(|| RatingSummary::empty(hotel_id)))
    }

    #[instrument(skip(self, input))]
    pub async fn create_review(
        &self,
        hotel_id: Uuid,
        input: CreateReviewRequest,
    ) -> Result<hotel_review::Model, ServiceError> {
        Self::hotel(&*self.db, hotel_id).await?;
        let author_name = required_text("author_name", &input.author_name)?;
        let created_at = now();
        if let Some(stay_date) = input.stay_date {
            if stay_date > created_at.date_naive() {
                return Err(ServiceError::ValidationError(format!(
                    "stay_date {stay_date} is in the future"
                )));
            }
        }

        let review = hotel_review::ActiveModel {
            id: Set(Uuid::new_v4()),
            hotel_card_id: Set(hotel_id),
            author_name: Set(author_name),
            rating: Set(input.rating),
            title: Set(optional_text(input.title)),
            comment: Set(optional_text(input.comment)),
            stay_date: Set(input.stay_date),
            created_at: Set(created_at),
        }
        .insert(&*self.db)
        .await?;

        info!(hotel_id = %hotel_id, review_id = %review.id, rating = review.rating, "Review created");
        Ok(review)
    }

    #[instrument(skip(self))]
    pub async fn delete_review(&self, id: Uuid) -> Result<DeleteSummary, ServiceError> {
        let result = hotel_review::Entity::delete_by_id(id).exec(&*self.db).await?;
        if result.rows_affected == 0 {
            return Err(ServiceError::not_found("Review", id));
        }
        info!(review_id = %id, "Review deleted");
        Ok(DeleteSummary::deleted(id))
    }

    // Policies

    #[instrument(skip(self))]
    pub async fn list_policies(
        &self,
        hotel_id: Uuid,
    ) -> Result<Vec<hotel_policy::Model>, ServiceError> {
        Self::hotel(&*self.db, hotel_id).await?;
        Ok(hotel_policy::Entity::find()
            .filter(hotel_policy::Column::HotelCardId.eq(hotel_id))
            .order_by_asc(hotel_policy::Column::Kind)
            .order_by_asc(hotel_policy::Column::CreatedAt)
            .all(&*self.db)
            .await?)
    }

    async fn ensure_policy_kind_free<C: ConnectionTrait>(
        db: &C,
        hotel_id: Uuid,
        kind: PolicyKind,
        exclude: Option<Uuid>,
    ) -> Result<(), ServiceError> {
        if kind.is_repeatable() {
            return Ok(());
        }
        let mut select = hotel_policy::Entity::find()
            .filter(hotel_policy::Column::HotelCardId.eq(hotel_id))
            .filter(hotel_policy::Column::Kind.eq(kind));
        if let Some(id) = exclude {
            select = select.filter(hotel_policy::Column::Id.ne(id));
        }
        if select.one(db).await?.is_some() {
            return Err(ServiceError::Conflict(format!(
                "Hotel {hotel_id} already has a {kind} policy"
            )));
        }
        Ok(())
    }

    #[instrument(skip(self, input))]
    pub async fn create_policy(
        &self,
        hotel_id: Uuid,
        input: CreatePolicyRequest,
    ) -> Result<hotel_policy::Model, ServiceError> {
        let description = required_text("description", &input.description)?;

        let txn = self.db.begin().await?;
        Self::hotel(&txn, hotel_id).await?;
        Self::ensure_policy_kind_free(&txn, hotel_id, input.kind, None).await?;

        let timestamp = now();
        let policy = hotel_policy::ActiveModel {
            id: Set(Uuid::new_v4()),
            hotel_card_id: Set(hotel_id),
            kind: Set(input.kind),
            description: Set(description),
            created_at: Set(timestamp),
            updated_at: Set(timestamp),
        }
        .insert(&txn)
        .await?;
        txn.commit().await?;

        info!(hotel_id = %hotel_id, policy_id = %policy.id, kind = %policy.kind, "Policy created");
        Ok(policy)
    }

    #[instrument(skip(self, input))]
    pub async fn update_policy(
        &self,
        id: Uuid,
        input: UpdatePolicyRequest,
    ) -> Result<hotel_policy::Model, ServiceError> {
        let txn = self.db.begin().await?;
        let existing = find_or_404::<hotel_policy::Entity, _>(&txn, id, "Policy").await?;
        if let Some(kind) = input.kind {
            if kind != existing.kind {
                Self::ensure_policy_kind_free(&txn, existing.hotel_card_id, kind, Some(id)).await?;
            }
        }

        let mut active: hotel_policy::ActiveModel = existing.into();
        if let Some(kind) = input.kind {
            active.kind = Set(kind);
        }
        if let Some(description) = input.description {
            active.description = Set(required_text("description", &description)?);
        }
        active.updated_at = Set(now());
        let policy = active.update(&txn).await?;
        txn.commit().await?;

        info!(policy_id = %id, "Policy updated");
        Ok(policy)
    }

    #[instrument(skip(self))]
    pub async fn delete_policy(&self, id: Uuid) -> Result<DeleteSummary, ServiceError> {
        let result = hotel_policy::Entity::delete_by_id(id).exec(&*self.db).await?;
        if result.rows_affected == 0 {
            return Err(ServiceError::not_found("Policy", id));
        }
        info!(policy_id = %id, "Policy deleted");
        Ok(DeleteSummary::deleted(id))
    }

    // Rooms

    #[instrument(skip(self))]
    pub async fn list_rooms(&self, hotel_id: Uuid) -> Result<Vec<hotel_room::Model>, ServiceError> {
        Self::hotel(&*self.db, hotel_id).await?;
        Ok(hotel_room::Entity::find()
            .filter(hotel_room::Column::HotelCardId.eq(hotel_id))
            .order_by_asc(hotel_room::Column::PricePerNight)
            .order_by_asc(hotel_room::Column::Name)
            .all(&*self.db)
            .await?)
    }

    async fn ensure_room_name_free<C: ConnectionTrait>(
        db: &C,
        hotel_id: Uuid,
        name: &str,
        exclude: Option<Uuid>,
    ) -> Result<(), ServiceError> {
        let mut select = hotel_room::Entity::find()
            .filter(hotel_room::Column::HotelCardId.eq(hotel_id))
            .filter(hotel_room::Column::Name.eq(name));
        if let Some(id) = exclude {
            select = select.filter(hotel_room::Column::Id.ne(id));
        }
        if select.one(db).await?.is_some() {
            return Err(ServiceError::Conflict(format!(
                "Hotel {hotel_id} already has a room named '{name}'"
            )));
        }
        Ok(())
    }

    #[instrument(skip(self, input))]
    pub async fn create_room(
        &self,
        hotel_id: Uuid,
        input: CreateRoomRequest,
    ) -> Result<hotel_room::Model, ServiceError> {
        let name = required_text("name", &input.name)?;

        let txn = self.db.begin().await?;
        Self::hotel(&txn, hotel_id).await?;
        Self::ensure_room_name_free(&txn, hotel_id, &name, None).await?;

        let timestamp = now();
        let room = hotel_room::ActiveModel {
            id: Set(Uuid::new_v4()),
            hotel_card_id: Set(hotel_id),
            name: Set(name),
            capacity: Set(input.capacity),
            bed_type: Set(optional_text(input.bed_type)),
            price_per_night: Set(input.price_per_night),
            quantity: Set(input.quantity),
            created_at: Set(timestamp),
            updated_at: Set(timestamp),
        }
        .insert(&txn)
        .await?;
        txn.commit().await?;

        info!(hotel_id = %hotel_id, room_id = %room.id, "Room created");
        Ok(room)
    }

    #[instrument(skip(self, input))]
    pub async fn update_room(
        &self,
        id: Uuid,
        input: UpdateRoomRequest,
    ) -> Result<hotel_room::Model, ServiceError> {
        if let Some(Some(bed_type)) = &input.bed_type {
            if bed_type.chars().count() > 50 {
                return Err(ServiceError::ValidationError(
                    "bed_type must be at most 50 characters".into(),
                ));
            }
        }

        let txn = self.db.begin().await?;
        let existing = find_or_404::<hotel_room::Entity, _>(&txn, id, "Room").await?;
        let name = input
            .name
            .as_deref()
            .map(|n| required_text("name", n))
            .transpose()?;
        if let Some(name) = &name {
            Self::ensure_room_name_free(&txn, existing.hotel_card_id, name, Some(id)).await?;
        }

        let mut active: hotel_room::ActiveModel = existing.into();
        if let Some(name) = name {
            active.name = Set(name);
        }
        if let Some(capacity) = input.capacity {
            active.capacity = Set(capacity);
        }
        if let Some(bed_type) = input.bed_type {
            active.bed_type = Set(optional_text(bed_type));
        }
        if let Some(price) = input.price_per_night {
            active.price_per_night = Set(price);
        }
        if let Some(quantity) = input.quantity {
            active.quantity = Set(quantity);
        }
        active.updated_at = Set(now());
        let room = active.update(&txn).await?;
        txn.commit().await?;

        info!(room_id = %id, "Room updated");
        Ok(room)
    }

    #[instrument(skip(self))]
    pub async fn delete_room(&self, id: Uuid) -> Result<DeleteSummary, ServiceError> {
        let result = hotel_room::Entity::delete_by_id(id).exec(&*self.db).await?;
        if result.rows_affected == 0 {
            return Err(ServiceError::not_found("Room", id));
        }
        info!(room_id = %id, "Room deleted");
        Ok(DeleteSummary::deleted(id))
    }

    // Details

    #[instrument(skip(self))]
    pub async fn get_details(&self, hotel_id: Uuid) -> Result<hotel_details::Model, ServiceError> {
        Self::hotel(&*self.db, hotel_id).await?;
        hotel_details::Entity::find_by_id(hotel_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Hotel {hotel_id} has no details yet"))
            })
    }

    /// Create or replace the details row; returns the row and whether it was created.
    #[instrument(skip(self, input))]
    pub async fn upsert_details(
        &self,
        hotel_id: Uuid,
        input: UpsertDetailsRequest,
    ) -> Result<(hotel_details::Model, bool), ServiceError> {
        input.check()?;

        let txn = self.db.begin().await?;
        Self::hotel(&txn, hotel_id).await?;
        let existing = hotel_details::Entity::find_by_id(hotel_id).one(&txn).await?;
        let created = existing.is_none();

        let mut active: hotel_details::ActiveModel = match existing {
            Some(row) => row.into(),
            None => hotel_details::ActiveModel {
                hotel_card_id: Set(hotel_id),
                ..Default::default()
            },
        };
        active.check_in_from = Set(optional_text(input.check_in_from));
        active.check_out_until = Set(optional_text(input.check_out_until));
        active.total_rooms = Set(input.total_rooms);
        active.year_built = Set(input.year_built);
        active.phone = Set(optional_text(input.phone));
        active.email = Set(optional_text(input.email));
        active.website = Set(optional_text(input.website));
        active.updated_at = Set(now());

        let details = if created {
            active.insert(&txn).await?
        } else {
            active.update(&txn).await?
        };
        txn.commit().await?;

        info!(hotel_id = %hotel_id, created, "Hotel details saved");
        Ok((details, created))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn averages_round_to_one_decimal() {
        let id = Uuid::new_v4();
        let summary = RatingSummary::from_totals(id, 25, 3);
        assert_eq!(summary.average_rating, Some(8.3));
        assert_eq!(summary.review_count, 3);

        assert_eq!(RatingSummary::from_totals(id, 0, 0), RatingSummary::empty(id));
    }

    #[rstest]
    #[case("14:00", true)]
    #[case("09:30", true)]
    #[case("23:59", true)]
    #[case("24:00", false)]
    #[case("9:30", false)]
    #[case("12:60", false)]
    fn time_of_day_format(#[case] value: &str, #[case] ok: bool) {
        assert_eq!(check_time_of_day("check_in_from", Some(value)).is_ok(), ok);
    }

    #[test]
    fn year_built_is_bounded() {
        let request = UpsertDetailsRequest {
            year_built: Some(1799),
            ..Default::default()
        };
        assert!(request.check().is_err());

        let request = UpsertDetailsRequest {
            year_built: Some(now().year() + 1),
            ..Default::default()
        };
        assert!(request.check().is_err());

        let request = UpsertDetailsRequest {
            year_built: Some(1925),
            check_in_from: Some("15:00".into()),
            ..Default::default()
        };
        assert!(request.check().is_ok());
    }

    #[test]
    fn review_rating_is_one_to_ten() {
        let review = |rating: i32| CreateReviewRequest {
            author_name: "Ana".into(),
            rating,
            title: None,
            comment: None,
            stay_date: None,
        };
        assert!(review(0).validate().is_err());
        assert!(review(11).validate().is_err());
        assert!(review(10).validate().is_ok());
    }

    #[test]
    fn room_quantity_defaults_to_one() {
        let room: CreateRoomRequest = serde_json::from_value(serde_json::json!({
            "name": "Deluxe Double",
            "capacity": 2,
            "price_per_night": 180.0
        }))
        .unwrap();
        assert_eq!(room.quantity, 1);
        assert!(room.validate().is_ok());
    }
}
