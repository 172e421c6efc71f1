use std::sync::Arc;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, Set,
};
use serde::Deserialize;
use tracing::{info, instrument};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::{
    contains_ci, double_option, fetch_page, find_or_404, find_reference, now, optional_text,
    order, required_text, resolve_sort, DeleteSummary,
};
use crate::{
    entities::{address, city, country, destination, hotel_card, neighborhood},
    errors::ServiceError,
    ListQuery, PageRequest, PaginatedResponse,
};

/// Trim and uppercase an ISO-3166 alpha-2 code.
pub fn normalize_country_code(raw: &str) -> Result<String, ServiceError> {
    let code = raw.trim().to_ascii_uppercase();
    if code.len() != 2 || !code.bytes().all(|b| b.is_ascii_uppercase()) {
        return Err(ServiceError::ValidationError(format!(
            "country code must be two ASCII letters, got '{}'",
            raw.trim()
        )));
    }
    Ok(code)
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCountryRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// ISO-3166 alpha-2 code, case-insensitive on input
    #[schema(example = "FR")]
    pub code: String,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCountryRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    pub code: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCityRequest {
    pub country_id: Uuid,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCityRequest {
    pub country_id: Option<Uuid>,
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateNeighborhoodRequest {
    pub city_id: Uuid,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateNeighborhoodRequest {
    pub city_id: Option<Uuid>,
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAddressRequest {
    #[validate(length(min = 1, max = 255))]
    pub street: String,
    #[validate(length(max = 20))]
    pub postal_code: Option<String>,
    pub city_id: Uuid,
    pub neighborhood_id: Option<Uuid>,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
}

/// Partial update; `null` clears an optional field.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateAddressRequest {
    #[validate(length(min = 1, max = 255))]
    pub street: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub postal_code: Option<Option<String>>,
    pub city_id: Option<Uuid>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<Uuid>)]
    pub neighborhood_id: Option<Option<Uuid>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<f64>)]
    pub latitude: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<f64>)]
    pub longitude: Option<Option<f64>>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CityFilter {
    pub country_id: Option<Uuid>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NeighborhoodFilter {
    pub city_id: Option<Uuid>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AddressFilter {
    pub city_id: Option<Uuid>,
    pub neighborhood_id: Option<Uuid>,
}

fn check_latitude(value: Option<f64>) -> Result<(), ServiceError> {
    match value {
        Some(lat) if !(-90.0..=90.0).contains(&lat) => Err(ServiceError::ValidationError(
            format!("latitude must be between -90 and 90, got {lat}"),
        )),
        _ => Ok(()),
    }
}

fn check_longitude(value: Option<f64>) -> Result<(), ServiceError> {
    match value {
        Some(lng) if !(-180.0..=180.0).contains(&lng) => Err(ServiceError::ValidationError(
            format!("longitude must be between -180 and 180, got {lng}"),
        )),
        _ => Ok(()),
    }
}

/// Countries, cities, neighborhoods and street addresses.
#[derive(Clone)]
pub struct GeographyService {
    db: Arc<DatabaseConnection>,
}

impl GeographyService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    // ----- countries -----

    #[instrument(skip(self))]
    pub async fn list_countries(
        &self,
        query: &ListQuery,
        page: PageRequest,
    ) -> Result<PaginatedResponse<country::Model>, ServiceError> {
        let (column, descending) = resolve_sort(
            query,
            &[
                ("name", country::Column::Name),
                ("code", country::Column::Code),
                ("created_at", country::Column::CreatedAt),
            ],
            country::Column::Name,
        )?;

        let mut select = country::Entity::find();
        if let Some(term) = query.search_term() {
            select = select.filter(
                Condition::any()
                    .add(contains_ci(country::Column::Name, term))
                    .add(contains_ci(country::Column::Code, term)),
            );
        }
        let select = order(select, column, descending);
        fetch_page(&*self.db, order(select, country::Column::Id, false), page).await
    }

    #[instrument(skip(self))]
    pub async fn get_country(&self, id: Uuid) -> Result<country::Model, ServiceError> {
        find_or_404::<country::Entity, _>(&*self.db, id, "Country").await
    }

    async fn ensure_country_unique(
        &self,
        name: Option<&str>,
        code: Option<&str>,
        exclude: Option<Uuid>,
    ) -> Result<(), ServiceError> {
        let db = &*self.db;
        if let Some(code) = code {
            let mut select = country::Entity::find().filter(country::Column::Code.eq(code));
            if let Some(id) = exclude {
                select = select.filter(country::Column::Id.ne(id));
            }
            if select.one(db).await?.is_some() {
                return Err(ServiceError::Conflict(format!(
                    "Country with code '{code}' already exists"
                )));
            }
        }
        if let Some(name) = name {
            let mut select = country::Entity::find().filter(country::Column::Name.eq(name));
            if let Some(id) = exclude {
                select = select.filter(country::Column::Id.ne(id));
            }
            if select.one(db).await?.is_some() {
                return Err(ServiceError::Conflict(format!(
                    "Country named '{name}' already exists"
                )));
            }
        }
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn create_country(
        &self,
        input: CreateCountryRequest,
    ) -> Result<country::Model, ServiceError> {
        let name = required_text("name", &input.name)?;
        let code = normalize_country_code(&input.code)?;
        self.ensure_country_unique(Some(&name), Some(&code), None)
            .await?;

        let timestamp = now();
        let created = country::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name),
            code: Set(code),
            created_at: Set(timestamp),
            updated_at: Set(timestamp),
        }
        .insert(&*self.db)
        .await?;

        info!(country_id = %created.id, code = %created.code, "Country created");
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn update_country(
        &self,
        id: Uuid,
        input: UpdateCountryRequest,
    ) -> Result<country::Model, ServiceError> {
        let existing = self.get_country(id).await?;
        let name = input
            .name
            .as_deref()
            .map(|n| required_text("name", n))
            .transpose()?;
        let code = input
            .code
            .as_deref()
            .map(normalize_country_code)
            .transpose()?;
        self.ensure_country_unique(name.as_deref(), code.as_deref(), Some(id))
            .await?;

        let mut active: country::ActiveModel = existing.into();
        if let Some(name) = name {
            active.name = Set(name);
        }
        if let Some(code) = code {
            active.code = Set(code);
        }
        active.updated_at = Set(now());
        let updated = active.update(&*self.db).await?;

        info!(country_id = %id, "Country updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete_country(&self, id: Uuid) -> Result<DeleteSummary, ServiceError> {
        let db = &*self.db;
        self.get_country(id).await?;

        let cities = city::Entity::find()
            .filter(city::Column::CountryId.eq(id))
            .count(db)
            .await?;
        if cities > 0 {
            return Err(ServiceError::Conflict(format!(
                "Country {id} still has {cities} cities"
            )));
        }

        country::Entity::delete_by_id(id).exec(db).await?;
        info!(country_id = %id, "Country deleted");
        Ok(DeleteSummary::deleted(id))
    }

    // ----- cities -----

    #[instrument(skip(self))]
    pub async fn list_cities(
        &self,
        filter: &CityFilter,
        query: &ListQuery,
        page: PageRequest,
    ) -> Result<PaginatedResponse<city::Model>, ServiceError> {
        let (column, descending) = resolve_sort(
            query,
            &[
                ("name", city::Column::Name),
                ("created_at", city::Column::CreatedAt),
            ],
            city::Column::Name,
        )?;

        let mut select = city::Entity::find();
        if let Some(country_id) = filter.country_id {
            select = select.filter(city::Column::CountryId.eq(country_id));
        }
        if let Some(term) = query.search_term() {
            select = select.filter(contains_ci(city::Column::Name, term));
        }
        let select = order(select, column, descending);
        fetch_page(&*self.db, order(select, city::Column::Id, false), page).await
    }

    /// Cities of one country; 404 when the country does not exist.
    #[instrument(skip(self))]
    pub async fn list_country_cities(
        &self,
        country_id: Uuid,
        query: &ListQuery,
        page: PageRequest,
    ) -> Result<PaginatedResponse<city::Model>, ServiceError> {
        self.get_country(country_id).await?;
        let filter = CityFilter {
            country_id: Some(country_id),
        };
        self.list_cities(&filter, query, page).await
    }

    #[instrument(skip(self))]
    pub async fn get_city(&self, id: Uuid) -> Result<city::Model, ServiceError> {
        find_or_404::<city::Entity, _>(&*self.db, id, "City").await
    }

    async fn ensure_city_name_free(
        &self,
        country_id: Uuid,
        name: &str,
        exclude: Option<Uuid>,
    ) -> Result<(), ServiceError> {
        let mut select = city::Entity::find()
            .filter(city::Column::CountryId.eq(country_id))
            .filter(city::Column::Name.eq(name));
        if let Some(id) = exclude {
            select = select.filter(city::Column::Id.ne(id));
        }
        if select.one(&*self.db).await?.is_some() {
            return Err(ServiceError::Conflict(format!(
                "City '{name}' already exists in country {country_id}"
            )));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn create_city(&self, input: CreateCityRequest) -> Result<city::Model, ServiceError> {
        let name = required_text("name", &input.name)?;
        find_reference::<country::Entity, _>(&*self.db, input.country_id, "country_id").await?;
        self.ensure_city_name_free(input.country_id, &name, None)
            .await?;

        let timestamp = now();
        let created = city::ActiveModel {
            id: Set(Uuid::new_v4()),
            country_id: Set(input.country_id),
            name: Set(name),
            latitude: Set(input.latitude),
            longitude: Set(input.longitude),
            created_at: Set(timestamp),
            updated_at: Set(timestamp),
        }
        .insert(&*self.db)
        .await?;

        info!(city_id = %created.id, country_id = %created.country_id, "City created");
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn update_city(
        &self,
        id: Uuid,
        input: UpdateCityRequest,
    ) -> Result<city::Model, ServiceError> {
        let existing = self.get_city(id).await?;
        let name = input
            .name
            .as_deref()
            .map(|n| required_text("name", n))
            .transpose()?;

        if let Some(country_id) = input.country_id {
            find_reference::<country::Entity, _>(&*self.db, country_id, "country_id").await?;
        }
        let target_country = input.country_id.unwrap_or(existing.country_id);
        let target_name = name.clone().unwrap_or_else(|| existing.name.clone());
        if name.is_some() || input.country_id.is_some() {
            self.ensure_city_name_free(target_country, &target_name, Some(id))
                .await?;
        }

        let mut active: city::ActiveModel = existing.into();
        active.country_id = Set(target_country);
        active.name = Set(target_name);
        if let Some(latitude) = input.latitude {
            active.latitude = Set(latitude);
        }
        if let Some(longitude) = input.longitude {
            active.longitude = Set(longitude);
        }
        active.updated_at = Set(now());
        let updated = active.update(&*self.db).await?;

        info!(city_id = %id, "City updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete_city(&self, id: Uuid) -> Result<DeleteSummary, ServiceError> {
        let db = &*self.db;
        self.get_city(id).await?;

        let dependents = [
            (
                "neighborhoods",
                neighborhood::Entity::find()
                    .filter(neighborhood::Column::CityId.eq(id))
                    .count(db)
                    .await?,
            ),
            (
                "addresses",
                address::Entity::find()
                    .filter(address::Column::CityId.eq(id))
                    .count(db)
                    .await?,
            ),
            (
                "destinations",
                destination::Entity::find()
                    .filter(destination::Column::CityId.eq(id))
                    .count(db)
                    .await?,
            ),
            (
                "hotels",
                hotel_card::Entity::find()
                    .filter(hotel_card::Column::CityId.eq(id))
                    .count(db)
                    .await?,
            ),
        ];
        if let Some((kind, count)) = dependents.iter().find(|(_, count)| *count > 0) {
            return Err(ServiceError::Conflict(format!(
                "City {id} still has {count} {kind}"
            )));
        }

        city::Entity::delete_by_id(id).exec(db).await?;
        info!(city_id = %id, "City deleted");
        Ok(DeleteSummary::deleted(id))
    }

    // ----- neighborhoods -----

    #[instrument(skip(self))]
    pub async fn list_neighborhoods(
        &self,
        filter: &NeighborhoodFilter,
        query: &ListQuery,
        page: PageRequest,
    ) -> Result<PaginatedResponse<neighborhood::Model>, ServiceError> {
        let (column, descending) = resolve_sort(
            query,
            &[
                ("name", neighborhood::Column::Name),
                ("created_at", neighborhood::Column::CreatedAt),
            ],
            neighborhood::Column::Name,
        )?;

        let mut select = neighborhood::Entity::find();
        if let Some(city_id) = filter.city_id {
            select = select.filter(neighborhood::Column::CityId.eq(city_id));
        }
        if let Some(term) = query.search_term() {
            select = select.filter(contains_ci(neighborhood::Column::Name, term));
        }
        let select = order(select, column, descending);
        fetch_page(&*self.db, order(select, neighborhood::Column::Id, false), page).await
    }

    /// Neighborhoods of one city; 404 when the city does not exist.
    #[instrument(skip(self))]
    pub async fn list_city_neighborhoods(
        &self,
        city_id: Uuid,
        query: &ListQuery,
        page: PageRequest,
    ) -> Result<PaginatedResponse<neighborhood::Model>, ServiceError> {
        self.get_city(city_id).await?;
        let filter = NeighborhoodFilter {
            city_id: Some(city_id),
        };
        self.list_neighborhoods(&filter, query, page).await
    }

    #[instrument(skip(self))]
    pub async fn get_neighborhood(&self, id: Uuid) -> Result<neighborhood::Model, ServiceError> {
        find_or_404::<neighborhood::Entity, _>(&*self.db, id, "Neighborhood").await
    }

    async fn ensure_neighborhood_name_free(
        &self,
        city_id: Uuid,
        name: &str,
        exclude: Option<Uuid>,
    ) -> Result<(), ServiceError> {
        let mut select = neighborhood::Entity::find()
            .filter(neighborhood::Column::CityId.eq(city_id))
            .filter(neighborhood::Column::Name.eq(name));
        if let Some(id) = exclude {
            select = select.filter(neighborhood::Column::Id.ne(id));
        }
        if select.one(&*self.db).await?.is_some() {
            return Err(ServiceError::Conflict(format!(
                "Neighborhood '{name}' already exists in city {city_id}"
            )));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn create_neighborhood(
        &self,
        input: CreateNeighborhoodRequest,
    ) -> Result<neighborhood::Model, ServiceError> {
        let name = required_text("name", &input.name)?;
        find_reference::<city::Entity, _>(&*self.db, input.city_id, "city_id").await?;
        self.ensure_neighborhood_name_free(input.city_id, &name, None)
            .await?;

        let timestamp = now();
        let created = neighborhood::ActiveModel {
            id: Set(Uuid::new_v4()),
            city_id: Set(input.city_id),
            name: Set(name),
            created_at: Set(timestamp),
            updated_at: Set(timestamp),
        }
        .insert(&*self.db)
        .await?;

        info!(neighborhood_id = %created.id, city_id = %created.city_id, "Neighborhood created");
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn update_neighborhood(
        &self,
        id: Uuid,
        input: UpdateNeighborhoodRequest,
    ) -> Result<neighborhood::Model, ServiceError> {
        let db = &*self.db;
        let existing = self.get_neighborhood(id).await?;
        let name = input
            .name
            .as_deref()
            .map(|n| required_text("name", n))
            .transpose()?;

        if let Some(city_id) = input.city_id {
            find_reference::<city::Entity, _>(db, city_id, "city_id").await?;
            if city_id != existing.city_id {
                // Moving would orphan addresses that point at both.
                let addresses = address::Entity::find()
                    .filter(address::Column::NeighborhoodId.eq(id))
                    .count(db)
                    .await?;
                if addresses > 0 {
                    return Err(ServiceError::Conflict(format!(
                        "Neighborhood {id} has {addresses} addresses and cannot move to another city"
                    )));
                }
            }
        }
        let target_city = input.city_id.unwrap_or(existing.city_id);
        let target_name = name.clone().unwrap_or_else(|| existing.name.clone());
        if name.is_some() || input.city_id.is_some() {
            self.ensure_neighborhood_name_free(target_city, &target_name, Some(id))
                .await?;
        }

        let mut active: neighborhood::ActiveModel = existing.into();
        active.city_id = Set(target_city);
        active.name = Set(target_name);
        active.updated_at = Set(now());
        let updated = active.update(db).await?;

        info!(neighborhood_id = %id, "Neighborhood updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete_neighborhood(&self, id: Uuid) -> Result<DeleteSummary, ServiceError> {
        let db = &*self.db;
        self.get_neighborhood(id).await?;

        let addresses = address::Entity::find()
            .filter(address::Column::NeighborhoodId.eq(id))
            .count(db)
            .await?;
        if addresses > 0 {
            return Err(ServiceError::Conflict(format!(
                "Neighborhood {id} is used by {addresses} addresses"
            )));
        }

        neighborhood::Entity::delete_by_id(id).exec(db).await?;
        info!(neighborhood_id = %id, "Neighborhood deleted");
        Ok(DeleteSummary::deleted(id))
    }

    // ----- addresses -----

    #[instrument(skip(self))]
    pub async fn list_addresses(
        &self,
        filter: &AddressFilter,
        query: &ListQuery,
        page: PageRequest,
    ) -> Result<PaginatedResponse<address::Model>, ServiceError> {
        let (column, descending) = resolve_sort(
            query,
            &[
                ("street", address::Column::Street),
                ("postal_code", address::Column::PostalCode),
                ("created_at", address::Column::CreatedAt),
            ],
            address::Column::Street,
        )?;

        let mut select = address::Entity::find();
        if let Some(city_id) = filter.city_id {
            select = select.filter(address::Column::CityId.eq(city_id));
        }
        if let Some(neighborhood_id) = filter.neighborhood_id {
            select = select.filter(address::Column::NeighborhoodId.eq(neighborhood_id));
        }
        if let Some(term) = query.search_term() {
            select = select.filter(
                Condition::any()
                    .add(contains_ci(address::Column::Street, term))
                    .add(contains_ci(address::Column::PostalCode, term)),
            );
        }
        let select = order(select, column, descending);
        fetch_page(&*self.db, order(select, address::Column::Id, false), page).await
    }

    #[instrument(skip(self))]
    pub async fn get_address(&self, id: Uuid) -> Result<address::Model, ServiceError> {
        find_or_404::<address::Entity, _>(&*self.db, id, "Address").await
    }

    /// A neighborhood attached to an address must lie in the address's city.
    async fn check_neighborhood_in_city(
        &self,
        neighborhood_id: Uuid,
        city_id: Uuid,
    ) -> Result<(), ServiceError> {
        let found = find_reference::<neighborhood::Entity, _>(
            &*self.db,
            neighborhood_id,
            "neighborhood_id",
        )
        .await?;
        if found.city_id != city_id {
            return Err(ServiceError::BadRequest(format!(
                "Neighborhood {neighborhood_id} does not belong to city {city_id}"
            )));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn create_address(
        &self,
        input: CreateAddressRequest,
    ) -> Result<address::Model, ServiceError> {
        let street = required_text("street", &input.street)?;
        find_reference::<city::Entity, _>(&*self.db, input.city_id, "city_id").await?;
        if let Some(neighborhood_id) = input.neighborhood_id {
            self.check_neighborhood_in_city(neighborhood_id, input.city_id)
                .await?;
        }

        let timestamp = now();
        let created = address::ActiveModel {
            id: Set(Uuid::new_v4()),
            street: Set(street),
            postal_code: Set(optional_text(input.postal_code)),
            city_id: Set(input.city_id),
            neighborhood_id: Set(input.neighborhood_id),
            latitude: Set(input.latitude),
            longitude: Set(input.longitude),
            created_at: Set(timestamp),
            updated_at: Set(timestamp),
        }
        .insert(&*self.db)
        .await?;

        info!(address_id = %created.id, city_id = %created.city_id, "Address created");
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn update_address(
        &self,
        id: Uuid,
        input: UpdateAddressRequest,
    ) -> Result<address::Model, ServiceError> {
        let db = &*self.db;
        let existing = self.get_address(id).await?;

        if let Some(Some(postal_code)) = &input.postal_code {
            if postal_code.trim().chars().count() > 20 {
                return Err(ServiceError::ValidationError(
                    "postal_code must be at most 20 characters".into(),
                ));
            }
        }
        check_latitude(input.latitude.flatten())?;
        check_longitude(input.longitude.flatten())?;

        let city_id = input.city_id.unwrap_or(existing.city_id);
        if input.city_id.is_some() {
            find_reference::<city::Entity, _>(db, city_id, "city_id").await?;
        }
        let neighborhood_id = match input.neighborhood_id {
            Some(value) => value,
            None => existing.neighborhood_id,
        };
        if let Some(neighborhood_id) = neighborhood_id {
            self.check_neighborhood_in_city(neighborhood_id, city_id)
                .await?;
        }

        if city_id != existing.city_id {
            let hotels_elsewhere = hotel_card::Entity::find()
                .filter(hotel_card::Column::AddressId.eq(id))
                .filter(hotel_card::Column::CityId.ne(city_id))
                .count(db)
                .await?;
            if hotels_elsewhere > 0 {
                return Err(ServiceError::Conflict(format!(
                    "Address {id} is used by {hotels_elsewhere} hotels in its current city"
                )));
            }
        }

        let mut active: address::ActiveModel = existing.into();
        if let Some(street) = input.street {
            active.street = Set(required_text("street", &street)?);
        }
        if let Some(postal_code) = input.postal_code {
            active.postal_code = Set(optional_text(postal_code));
        }
        if let Some(latitude) = input.latitude {
            active.latitude = Set(latitude);
        }
        if let Some(longitude) = input.longitude {
            active.longitude = Set(longitude);
        }
        active.city_id = Set(city_id);
        active.neighborhood_id = Set(neighborhood_id);
        active.updated_at = Set(now());
        let updated = active.update(db).await?;

        info!(address_id = %id, "Address updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete_address(&self, id: Uuid) -> Result<DeleteSummary, ServiceError> {
        let db = &*self.db;
        self.get_address(id).await?;

        let hotels = hotel_card::Entity::find()
            .filter(hotel_card::Column::AddressId.eq(id))
            .count(db)
            .await?;
        if hotels > 0 {
            return Err(ServiceError::Conflict(format!(
                "Address {id} is used by {hotels} hotels"
            )));
        }

        address::Entity::delete_by_id(id).exec(db).await?;
        info!(address_id = %id, "Address deleted");
        Ok(DeleteSummary::deleted(id))
    }
}
