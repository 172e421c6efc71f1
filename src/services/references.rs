use std::sync::Arc;

use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, Set, TransactionTrait,
};
use serde::Deserialize;
use tracing::{info, instrument, warn};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::{
    contains_ci, double_option, fetch_page, find_or_404, find_reference, now, optional_text,
    order, required_text, resolve_sort, DeleteSummary,
};
use crate::{
    entities::{
        accommodation_type, city, destination,
        destination::DestinationKind,
        hotel_card, hotel_group, parking_option,
        parking_option::ParkingLocation,
    },
    errors::ServiceError,
    ListQuery, PageRequest, PaginatedResponse,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateDestinationRequest {
    pub city_id: Uuid,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    pub kind: DestinationKind,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateDestinationRequest {
    pub city_id: Option<Uuid>,
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    pub kind: Option<DestinationKind>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DestinationFilter {
    pub city_id: Option<Uuid>,
    pub kind: Option<DestinationKind>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAccommodationTypeRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateAccommodationTypeRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateHotelGroupRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(url)]
    pub website: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateHotelGroupRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub website: Option<Option<String>>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateParkingOptionRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub location: ParkingLocation,
    #[validate(range(min = 0.0))]
    pub price_per_day: Option<f64>,
    #[serde(default)]
    pub reservation_required: bool,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateParkingOptionRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    pub location: Option<ParkingLocation>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<f64>)]
    pub price_per_day: Option<Option<f64>>,
    pub reservation_required: Option<bool>,
}

fn check_website(website: Option<&str>) -> Result<(), ServiceError> {
    match website {
        Some(url) if !validator::validate_url(url) => Err(ServiceError::ValidationError(
            format!("website must be a valid URL, got '{url}'"),
        )),
        _ => Ok(()),
    }
}

/// Which hotel card column points at a reference row.
#[derive(Debug, Clone, Copy)]
enum HotelReference {
    Destination,
    AccommodationType,
    HotelGroup,
    ParkingOption,
}

impl HotelReference {
    fn column(self) -> hotel_card::Column {
        match self {
            HotelReference::Destination => hotel_card::Column::DestinationId,
            HotelReference::AccommodationType => hotel_card::Column::AccommodationTypeId,
            HotelReference::HotelGroup => hotel_card::Column::HotelGroupId,
            HotelReference::ParkingOption => hotel_card::Column::ParkingOptionId,
        }
    }

    fn label(self) -> &'static str {
        match self {
            HotelReference::Destination => "Destination",
            HotelReference::AccommodationType => "Accommodation type",
            HotelReference::HotelGroup => "Hotel group",
            HotelReference::ParkingOption => "Parking option",
        }
    }
}

/// Destinations, accommodation types, hotel groups and parking options.
#[derive(Clone)]
pub struct ReferenceService {
    db: Arc<DatabaseConnection>,
}

impl ReferenceService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Delete a reference row. Attached hotels block the delete unless
    /// `force` is set, in which case their reference is cleared in the same
    /// transaction.
    async fn delete_referenced<E>(
        &self,
        reference: HotelReference,
        id: Uuid,
        force: bool,
    ) -> Result<DeleteSummary, ServiceError>
    where
        E: EntityTrait,
        E::PrimaryKey: sea_orm::PrimaryKeyTrait<ValueType = Uuid>,
    {
        let txn = self.db.begin().await?;
        find_or_404::<E, _>(&txn, id, reference.label()).await?;

        let column = reference.column();
        let attached = hotel_card::Entity::find()
            .filter(column.eq(id))
            .count(&txn)
            .await?;

        if attached > 0 && !force {
            return Err(ServiceError::Conflict(format!(
                "{} {id} is used by {attached} hotels; pass force=true to detach them",
                reference.label()
            )));
        }

        let detached = if attached > 0 {
            let result = hotel_card::Entity::update_many()
                .col_expr(column, Expr::value(Option::<Uuid>::None))
                .col_expr(hotel_card::Column::UpdatedAt, Expr::value(now()))
                .filter(column.eq(id))
                .exec(&txn)
                .await?;
            warn!(
                reference = reference.label(),
                %id,
                detached = result.rows_affected,
                "Detached hotels before forced delete"
            );
            result.rows_affected
        } else {
            0
        };

        E::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        info!(reference = reference.label(), %id, detached, "Reference deleted");
        Ok(DeleteSummary {
            deleted: id,
            detached_hotels: Some(detached),
            unlinked_hotels: None,
        })
    }

    // ----- destinations -----

    #[instrument(skip(self))]
    pub async fn list_destinations(
        &self,
        filter: &DestinationFilter,
        query: &ListQuery,
        page: PageRequest,
    ) -> Result<PaginatedResponse<destination::Model>, ServiceError> {
        let (column, descending) = resolve_sort(
            query,
            &[
                ("name", destination::Column::Name),
                ("kind", destination::Column::Kind),
                ("created_at", destination::Column::CreatedAt),
            ],
            destination::Column::Name,
        )?;

        let mut select = destination::Entity::find();
        if let Some(city_id) = filter.city_id {
            select = select.filter(destination::Column::CityId.eq(city_id));
        }
        if let Some(kind) = filter.kind {
            select = select.filter(destination::Column::Kind.eq(kind));
        }
        if let Some(term) = query.search_term() {
            select = select.filter(contains_ci(destination::Column::Name, term));
        }
        let select = order(select, column, descending);
        fetch_page(&*self.db, order(select, destination::Column::Id, false), page).await
    }

    #[instrument(skip(self))]
    pub async fn get_destination(&self, id: Uuid) -> Result<destination::Model, ServiceError> {
        find_or_404::<destination::Entity, _>(&*self.db, id, "Destination").await
    }

    async fn ensure_destination_name_free(
        &self,
        city_id: Uuid,
        name: &str,
        exclude: Option<Uuid>,
    ) -> Result<(), ServiceError> {
        let mut select = destination::Entity::find()
            .filter(destination::Column::CityId.eq(city_id))
            .filter(destination::Column::Name.eq(name));
        if let Some(id) = exclude {
            select = select.filter(destination::Column::Id.ne(id));
        }
        if select.one(&*self.db).await?.is_some() {
            return Err(ServiceError::Conflict(format!(
                "Destination '{name}' already exists in city {city_id}"
            )));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn create_destination(
        &self,
        input: CreateDestinationRequest,
    ) -> Result<destination::Model, ServiceError> {
        let name = required_text("name", &input.name)?;
        find_reference::<city::Entity, _>(&*self.db, input.city_id, "city_id").await?;
        self.ensure_destination_name_free(input.city_id, &name, None)
            .await?;

        let timestamp = now();
        let created = destination::ActiveModel {
            id: Set(Uuid::new_v4()),
            city_id: Set(input.city_id),
            name: Set(name),
            description: Set(optional_text(input.description)),
            kind: Set(input.kind),
            created_at: Set(timestamp),
            updated_at: Set(timestamp),
        }
        .insert(&*self.db)
        .await?;

        info!(destination_id = %created.id, kind = %created.kind, "Destination created");
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn update_destination(
        &self,
        id: Uuid,
        input: UpdateDestinationRequest,
    ) -> Result<destination::Model, ServiceError> {
        let db = &*self.db;
        let existing = self.get_destination(id).await?;
        let name = input
            .name
            .as_deref()
            .map(|n| required_text("name", n))
            .transpose()?;

        if let Some(city_id) = input.city_id {
            find_reference::<city::Entity, _>(db, city_id, "city_id").await?;
            if city_id != existing.city_id {
                let attached = hotel_card::Entity::find()
                    .filter(hotel_card::Column::DestinationId.eq(id))
                    .count(db)
                    .await?;
                if attached > 0 {
                    return Err(ServiceError::Conflict(format!(
                        "Destination {id} is used by {attached} hotels and cannot move to another city"
                    )));
                }
            }
        }
        let target_city = input.city_id.unwrap_or(existing.city_id);
        let target_name = name.clone().unwrap_or_else(|| existing.name.clone());
        if name.is_some() || input.city_id.is_some() {
            self.ensure_destination_name_free(target_city, &target_name, Some(id))
                .await?;
        }

        let mut active: destination::ActiveModel = existing.into();
        active.city_id = Set(target_city);
        active.name = Set(target_name);
        if let Some(description) = input.description {
            active.description = Set(optional_text(description));
        }
        if let Some(kind) = input.kind {
            active.kind = Set(kind);
        }
        active.updated_at = Set(now());
        let updated = active.update(db).await?;

        info!(destination_id = %id, "Destination updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete_destination(
        &self,
        id: Uuid,
        force: bool,
    ) -> Result<DeleteSummary, ServiceError> {
        self.delete_referenced::<destination::Entity>(HotelReference::Destination, id, force)
            .await
    }

    // ----- accommodation types -----

    #[instrument(skip(self))]
    pub async fn list_accommodation_types(
        &self,
        query: &ListQuery,
        page: PageRequest,
    ) -> Result<PaginatedResponse<accommodation_type::Model>, ServiceError> {
        let (column, descending) = resolve_sort(
            query,
            &[
                ("name", accommodation_type::Column::Name),
                ("created_at", accommodation_type::Column::CreatedAt),
            ],
            accommodation_type::Column::Name,
        )?;

        let mut select = accommodation_type::Entity::find();
        if let Some(term) = query.search_term() {
            select = select.filter(contains_ci(accommodation_type::Column::Name, term));
        }
        let select = order(select, column, descending);
        fetch_page(
            &*self.db,
            order(select, accommodation_type::Column::Id, false),
            page,
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn get_accommodation_type(
        &self,
        id: Uuid,
    ) -> Result<accommodation_type::Model, ServiceError> {
        find_or_404::<accommodation_type::Entity, _>(&*self.db, id, "Accommodation type").await
    }

    async fn ensure_accommodation_type_name_free(
        &self,
        name: &str,
        exclude: Option<Uuid>,
    ) -> Result<(), ServiceError> {
        let mut select =
            accommodation_type::Entity::find().filter(accommodation_type::Column::Name.eq(name));
        if let Some(id) = exclude {
            select = select.filter(accommodation_type::Column::Id.ne(id));
        }
        if select.one(&*self.db).await?.is_some() {
            return Err(ServiceError::Conflict(format!(
                "Accommodation type '{name}' already exists"
            )));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn create_accommodation_type(
        &self,
        input: CreateAccommodationTypeRequest,
    ) -> Result<accommodation_type::Model, ServiceError> {
        let name = required_text("name", &input.name)?;
        self.ensure_accommodation_type_name_free(&name, None)
            .await?;

        let timestamp = now();
        let created = accommodation_type::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name),
            description: Set(optional_text(input.description)),
            created_at: Set(timestamp),
            updated_at: Set(timestamp),
        }
        .insert(&*self.db)
        .await?;

        info!(accommodation_type_id = %created.id, "Accommodation type created");
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn update_accommodation_type(
        &self,
        id: Uuid,
        input: UpdateAccommodationTypeRequest,
    ) -> Result<accommodation_type::Model, ServiceError> {
        let existing = self.get_accommodation_type(id).await?;
        let mut active: accommodation_type::ActiveModel = existing.into();

        if let Some(name) = input.name.as_deref() {
            let name = required_text("name", name)?;
            self.ensure_accommodation_type_name_free(&name, Some(id))
                .await?;
            active.name = Set(name);
        }
        if let Some(description) = input.description {
            active.description = Set(optional_text(description));
        }
        active.updated_at = Set(now());
        let updated = active.update(&*self.db).await?;

        info!(accommodation_type_id = %id, "Accommodation type updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete_accommodation_type(
        &self,
        id: Uuid,
        force: bool,
    ) -> Result<DeleteSummary, ServiceError> {
        self.delete_referenced::<accommodation_type::Entity>(
            HotelReference::AccommodationType,
            id,
            force,
        )
        .await
    }

    // ----- hotel groups -----

    #[instrument(skip(self))]
    pub async fn list_hotel_groups(
        &self,
        query: &ListQuery,
        page: PageRequest,
    ) -> Result<PaginatedResponse<hotel_group::Model>, ServiceError> {
        let (column, descending) = resolve_sort(
            query,
            &[
                ("name", hotel_group::Column::Name),
                ("created_at", hotel_group::Column::CreatedAt),
            ],
            hotel_group::Column::Name,
        )?;

        let mut select = hotel_group::Entity::find();
        if let Some(term) = query.search_term() {
            select = select.filter(contains_ci(hotel_group::Column::Name, term));
        }
        let select = order(select, column, descending);
        fetch_page(&*self.db, order(select, hotel_group::Column::Id, false), page).await
    }

    #[instrument(skip(self))]
    pub async fn get_hotel_group(&self, id: Uuid) -> Result<hotel_group::Model, ServiceError> {
        find_or_404::<hotel_group::Entity, _>(&*self.db, id, "Hotel group").await
    }

    async fn ensure_hotel_group_name_free(
        &self,
        name: &str,
        exclude: Option<Uuid>,
    ) -> Result<(), ServiceError> {
        let mut select = hotel_group::Entity::find().filter(hotel_group::Column::Name.eq(name));
        if let Some(id) = exclude {
            select = select.filter(hotel_group::Column::Id.ne(id));
        }
        if select.one(&*self.db).await?.is_some() {
            return Err(ServiceError::Conflict(format!(
                "Hotel group '{name}' already exists"
            )));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn create_hotel_group(
        &self,
        input: CreateHotelGroupRequest,
    ) -> Result<hotel_group::Model, ServiceError> {
        let name = required_text("name", &input.name)?;
        self.ensure_hotel_group_name_free(&name, None).await?;

        let timestamp = now();
        let created = hotel_group::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name),
            website: Set(optional_text(input.website)),
            created_at: Set(timestamp),
            updated_at: Set(timestamp),
        }
        .insert(&*self.db)
        .await?;

        info!(hotel_group_id = %created.id, "Hotel group created");
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn update_hotel_group(
        &self,
        id: Uuid,
        input: UpdateHotelGroupRequest,
    ) -> Result<hotel_group::Model, ServiceError> {
        let existing = self.get_hotel_group(id).await?;
        let mut active: hotel_group::ActiveModel = existing.into();

        if let Some(name) = input.name.as_deref() {
            let name = required_text("name", name)?;
            self.ensure_hotel_group_name_free(&name, Some(id)).await?;
            active.name = Set(name);
        }
        if let Some(website) = input.website {
            let website = optional_text(website);
            check_website(website.as_deref())?;
            active.website = Set(website);
        }
        active.updated_at = Set(now());
        let updated = active.update(&*self.db).await?;

        info!(hotel_group_id = %id, "Hotel group updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete_hotel_group(
        &self,
        id: Uuid,
        force: bool,
    ) -> Result<DeleteSummary, ServiceError> {
        self.delete_referenced::<hotel_group::Entity>(HotelReference::HotelGroup, id, force)
            .await
    }

    // ----- parking options -----

    #[instrument(skip(self))]
    pub async fn list_parking_options(
        &self,
        query: &ListQuery,
        page: PageRequest,
    ) -> Result<PaginatedResponse<parking_option::Model>, ServiceError> {
        let (column, descending) = resolve_sort(
            query,
            &[
                ("name", parking_option::Column::Name),
                ("price_per_day", parking_option::Column::PricePerDay),
                ("created_at", parking_option::Column::CreatedAt),
            ],
            parking_option::Column::Name,
        )?;

        let mut select = parking_option::Entity::find();
        if let Some(term) = query.search_term() {
            select = select.filter(contains_ci(parking_option::Column::Name, term));
        }
        let select = order(select, column, descending);
        fetch_page(
            &*self.db,
            order(select, parking_option::Column::Id, false),
            page,
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn get_parking_option(
        &self,
        id: Uuid,
    ) -> Result<parking_option::Model, ServiceError> {
        find_or_404::<parking_option::Entity, _>(&*self.db, id, "Parking option").await
    }

    async fn ensure_parking_option_name_free(
        &self,
        name: &str,
        exclude: Option<Uuid>,
    ) -> Result<(), ServiceError> {
        let mut select =
            parking_option::Entity::find().filter(parking_option::Column::Name.eq(name));
        if let Some(id) = exclude {
            select = select.filter(parking_option::Column::Id.ne(id));
        }
        if select.one(&*self.db).await?.is_some() {
            return Err(ServiceError::Conflict(format!(
                "Parking option '{name}' already exists"
            )));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn create_parking_option(
        &self,
        input: CreateParkingOptionRequest,
    ) -> Result<parking_option::Model, ServiceError> {
        let name = required_text("name", &input.name)?;
        self.ensure_parking_option_name_free(&name, None).await?;

        let timestamp = now();
        let created = parking_option::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name),
            location: Set(input.location),
            price_per_day: Set(input.price_per_day),
            reservation_required: Set(input.reservation_required),
            created_at: Set(timestamp),
            updated_at: Set(timestamp),
        }
        .insert(&*self.db)
        .await?;

        info!(parking_option_id = %created.id, location = %created.location, "Parking option created");
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn update_parking_option(
        &self,
        id: Uuid,
        input: UpdateParkingOptionRequest,
    ) -> Result<parking_option::Model, ServiceError> {
        let existing = self.get_parking_option(id).await?;
        let mut active: parking_option::ActiveModel = existing.into();

        if let Some(name) = input.name.as_deref() {
            let name = required_text("name", name)?;
            self.ensure_parking_option_name_free(&name, Some(id))
                .await?;
            active.name = Set(name);
        }
        if let Some(location) = input.location {
            active.location = Set(location);
        }
        if let Some(price) = input.price_per_day {
            if matches!(price, Some(p) if p < 0.0) {
                return Err(ServiceError::ValidationError(
                    "price_per_day cannot be negative".into(),
                ));
            }
            active.price_per_day = Set(price);
        }
        if let Some(required) = input.reservation_required {
            active.reservation_required = Set(required);
        }
        active.updated_at = Set(now());
        let updated = active.update(&*self.db).await?;

        info!(parking_option_id = %id, "Parking option updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete_parking_option(
        &self,
        id: Uuid,
        force: bool,
    ) -> Result<DeleteSummary, ServiceError> {
        self.delete_referenced::<parking_option::Entity>(HotelReference::ParkingOption, id, force)
            .await
    }
}
