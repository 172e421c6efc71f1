use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, Set, TransactionTrait,
};
use serde::Deserialize;
use tracing::{info, instrument, warn};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::{
    contains_ci, double_option, fetch_page, now, optional_text, order, required_text,
    resolve_sort, DeleteSummary,
};
use crate::{
    entities::{hotel_card_feature, hotel_feature, hotel_feature::FeatureKind},
    errors::ServiceError,
    ListQuery, PageRequest, PaginatedResponse,
};

/// Largest payload accepted by the bulk endpoints.
pub const MAX_BULK_ITEMS: usize = 100;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateFeatureRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    /// Icon identifier understood by the front-end, e.g. "wifi"
    #[validate(length(max = 64))]
    pub icon: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateFeatureRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub icon: Option<Option<String>>,
}

fn check_description(description: Option<&str>) -> Result<(), ServiceError> {
    match description {
        Some(text) if text.chars().count() > 1000 => Err(ServiceError::ValidationError(
            "description must be at most 1000 characters".into(),
        )),
        _ => Ok(()),
    }
}

fn check_icon(icon: Option<&str>) -> Result<(), ServiceError> {
    match icon {
        Some(icon) if icon.chars().count() > 64 => Err(ServiceError::ValidationError(
            "icon must be at most 64 characters".into(),
        )),
        _ => Ok(()),
    }
}

/// Validate a bulk payload and return the trimmed names in input order.
pub fn check_bulk_payload(items: &[CreateFeatureRequest]) -> Result<Vec<String>, ServiceError> {
    if items.is_empty() || items.len() > MAX_BULK_ITEMS {
        return Err(ServiceError::ValidationError(format!(
            "bulk payload must contain between 1 and {MAX_BULK_ITEMS} items, got {}",
            items.len()
        )));
    }

    let mut seen = HashSet::with_capacity(items.len());
    let mut names = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        item.validate().map_err(|e| {
            ServiceError::ValidationError(format!("item {index}: {e}"))
        })?;
        let name = required_text("name", &item.name)?;
        if !seen.insert(name.clone()) {
            return Err(ServiceError::Conflict(format!(
                "'{name}' appears more than once in the payload"
            )));
        }
        names.push(name);
    }
    Ok(names)
}

/// Amenities, labels, highlights and accessibility options. They share one
/// table and differ only by `kind`.
#[derive(Clone)]
pub struct FeatureService {
    db: Arc<DatabaseConnection>,
}

impl FeatureService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn list(
        &self,
        kind: FeatureKind,
        query: &ListQuery,
        page: PageRequest,
    ) -> Result<PaginatedResponse<hotel_feature::Model>, ServiceError> {
        let (column, descending) = resolve_sort(
            query,
            &[
                ("name", hotel_feature::Column::Name),
                ("created_at", hotel_feature::Column::CreatedAt),
            ],
            hotel_feature::Column::Name,
        )?;

        let mut select = hotel_feature::Entity::find().filter(hotel_feature::Column::Kind.eq(kind));
        if let Some(term) = query.search_term() {
            select = select.filter(contains_ci(hotel_feature::Column::Name, term));
        }
        let select = order(select, column, descending);
        fetch_page(&*self.db, order(select, hotel_feature::Column::Id, false), page).await
    }

    /// A feature of another kind is reported as missing.
    #[instrument(skip(self))]
    pub async fn get(&self, kind: FeatureKind, id: Uuid) -> Result<hotel_feature::Model, ServiceError> {
        self.find_of_kind(&*self.db, kind, id).await
    }

    async fn find_of_kind<C: ConnectionTrait>(
        &self,
        db: &C,
        kind: FeatureKind,
        id: Uuid,
    ) -> Result<hotel_feature::Model, ServiceError> {
        hotel_feature::Entity::find_by_id(id)
            .filter(hotel_feature::Column::Kind.eq(kind))
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found(kind.label(), id))
    }

    async fn ensure_name_free<C: ConnectionTrait>(
        &self,
        db: &C,
        kind: FeatureKind,
        names: &[String],
        exclude: Option<Uuid>,
    ) -> Result<(), ServiceError> {
        let mut select = hotel_feature::Entity::find()
            .filter(hotel_feature::Column::Kind.eq(kind))
            .filter(hotel_feature::Column::Name.is_in(names.iter().cloned()));
        if let Some(id) = exclude {
            select = select.filter(hotel_feature::Column::Id.ne(id));
        }
        if let Some(existing) = select.one(db).await? {
            return Err(ServiceError::Conflict(format!(
                "{} '{}' already exists",
                kind.label(),
                existing.name
            )));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn create(
        &self,
        kind: FeatureKind,
        input: CreateFeatureRequest,
    ) -> Result<hotel_feature::Model, ServiceError> {
        let name = required_text("name", &input.name)?;
        self.ensure_name_free(&*self.db, kind, std::slice::from_ref(&name), None)
            .await?;

        let timestamp = now();
        let created = hotel_feature::ActiveModel {
            id: Set(Uuid::new_v4()),
            kind: Set(kind),
            name: Set(name),
            description: Set(optional_text(input.description)),
            icon: Set(optional_text(input.icon)),
            created_at: Set(timestamp),
            updated_at: Set(timestamp),
        }
        .insert(&*self.db)
        .await?;

        info!(feature_id = %created.id, %kind, "Feature created");
        Ok(created)
    }

    /// Insert all items or none of them.
    #[instrument(skip(self, items), fields(count = items.len()))]
    pub async fn bulk_create(
        &self,
        kind: FeatureKind,
        items: Vec<CreateFeatureRequest>,
    ) -> Result<Vec<hotel_feature::Model>, ServiceError> {
        let names = check_bulk_payload(&items)?;

        let txn = self.db.begin().await?;
        self.ensure_name_free(&txn, kind, &names, None).await?;

        let timestamp = now();
        let models: Vec<hotel_feature::Model> = items
            .into_iter()
            .zip(names)
            .map(|(item, name)| hotel_feature::Model {
                id: Uuid::new_v4(),
                kind,
                name,
                description: optional_text(item.description),
                icon: optional_text(item.icon),
                created_at: timestamp,
                updated_at: timestamp,
            })
            .collect();

        hotel_feature::Entity::insert_many(
            models
                .iter()
                .cloned()
                .map(hotel_feature::ActiveModel::from),
        )
        .exec(&txn)
        .await?;
        txn.commit().await?;

        info!(%kind, count = models.len(), "Features bulk created");
        Ok(models)
    }

    #[instrument(skip(self))]
    pub async fn update(
        &self,
        kind: FeatureKind,
        id: Uuid,
        input: UpdateFeatureRequest,
    ) -> Result<hotel_feature::Model, ServiceError> {
        let existing = self.find_of_kind(&*self.db, kind, id).await?;
        let mut active: hotel_feature::ActiveModel = existing.into();

        if let Some(name) = input.name.as_deref() {
            let name = required_text("name", name)?;
            self.ensure_name_free(&*self.db, kind, std::slice::from_ref(&name), Some(id))
                .await?;
            active.name = Set(name);
        }
        if let Some(description) = input.description {
            let description = optional_text(description);
            check_description(description.as_deref())?;
            active.description = Set(description);
        }
        if let Some(icon) = input.icon {
            let icon = optional_text(icon);
            check_icon(icon.as_deref())?;
            active.icon = Set(icon);
        }
        active.updated_at = Set(now());
        let updated = active.update(&*self.db).await?;

        info!(feature_id = %id, %kind, "Feature updated");
        Ok(updated)
    }

    /// Linked hotels block the delete unless `force` is set; with `force`
    /// the links are removed in the same transaction.
    #[instrument(skip(self))]
    pub async fn delete(
        &self,
        kind: FeatureKind,
        id: Uuid,
        force: bool,
    ) -> Result<DeleteSummary, ServiceError> {
        let txn = self.db.begin().await?;
        self.find_of_kind(&txn, kind, id).await?;

        let links = hotel_card_feature::Entity::find()
            .filter(hotel_card_feature::Column::FeatureId.eq(id))
            .count(&txn)
            .await?;
        if links > 0 && !force {
            return Err(ServiceError::Conflict(format!(
                "{} {id} is linked to {links} hotels; pass force=true to unlink them",
                kind.label()
            )));
        }

        if links > 0 {
            hotel_card_feature::Entity::delete_many()
                .filter(hotel_card_feature::Column::FeatureId.eq(id))
                .exec(&txn)
                .await?;
            warn!(feature_id = %id, %kind, links, "Unlinked hotels before forced delete");
        }

        hotel_feature::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        info!(feature_id = %id, %kind, "Feature deleted");
        Ok(DeleteSummary {
            deleted: id,
            detached_hotels: None,
            unlinked_hotels: Some(links),
        })
    }

    /// Check that every id names an existing feature of `kind`.
    /// Duplicates are collapsed; order is preserved.
    pub async fn resolve_ids<C: ConnectionTrait>(
        db: &C,
        kind: FeatureKind,
        ids: &[Uuid],
    ) -> Result<Vec<Uuid>, ServiceError> {
        let mut unique = Vec::with_capacity(ids.len());
        let mut seen = HashSet::with_capacity(ids.len());
        for id in ids {
            if seen.insert(*id) {
                unique.push(*id);
            }
        }
        if unique.is_empty() {
            return Ok(unique);
        }

        let found: HashMap<Uuid, FeatureKind> = hotel_feature::Entity::find()
            .filter(hotel_feature::Column::Id.is_in(unique.iter().copied()))
            .all(db)
            .await?
            .into_iter()
            .map(|feature| (feature.id, feature.kind))
            .collect();

        for id in &unique {
            match found.get(id) {
                None => {
                    return Err(ServiceError::BadRequest(format!(
                        "{} {id} does not exist",
                        kind.label()
                    )))
                }
                Some(actual) if *actual != kind => {
                    return Err(ServiceError::BadRequest(format!(
                        "Feature {id} is a {actual}, not a {kind}"
                    )))
                }
                Some(_) => {}
            }
        }
        Ok(unique)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn item(name: &str) -> CreateFeatureRequest {
        CreateFeatureRequest {
            name: name.into(),
            description: None,
            icon: None,
        }
    }

    #[test]
    fn bulk_payload_rejects_duplicates_after_trimming() {
        let items = vec![item("Wi-Fi"), item("Pool"), item(" Wi-Fi ")];
        assert_matches!(check_bulk_payload(&items), Err(ServiceError::Conflict(_)));
    }

    #[test]
    fn long_descriptions_are_rejected() {
        assert_matches!(check_description(None), Ok(()));
        assert_matches!(check_description(Some(&"a".repeat(1000))), Ok(()));
        assert_matches!(
            check_description(Some(&"a".repeat(1001))),
            Err(ServiceError::ValidationError(_))
        );
    }

    #[test]
    fn bulk_payload_size_is_bounded() {
        assert_matches!(check_bulk_payload(&[]), Err(ServiceError::ValidationError(_)));

        let too_many: Vec<_> = (0..=MAX_BULK_ITEMS).map(|i| item(&format!("f{i}"))).collect();
        assert_matches!(
            check_bulk_payload(&too_many),
            Err(ServiceError::ValidationError(_))
        );

        let names = check_bulk_payload(&[item(" Spa "), item("Gym")]).unwrap();
        assert_eq!(names, vec!["Spa".to_string(), "Gym".to_string()]);
    }

    #[test]
    fn bulk_payload_validates_each_item() {
        let long = "x".repeat(101);
        assert_matches!(
            check_bulk_payload(&[item("ok"), item(&long)]),
            Err(ServiceError::ValidationError(msg)) if msg.starts_with("item 1")
        );
    }
}
