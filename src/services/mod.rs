//! Business logic for the catalog. Handlers stay thin and delegate here;
//! every method returns `ServiceError` so failures map onto HTTP statuses
//! in one place.

pub mod content;
pub mod features;
pub mod geography;
pub mod hotels;
pub mod references;

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::{Expr, Func, LikeExpr, SimpleExpr},
    ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, PrimaryKeyTrait, QueryOrder,
    Select,
};
use serde::{Deserialize, Deserializer};
use uuid::Uuid;

use crate::{errors::ServiceError, ListQuery, PageRequest, PaginatedResponse};

pub(crate) fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Trim `value` and reject it if nothing is left.
pub(crate) fn required_text(field: &str, value: &str) -> Result<String, ServiceError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::ValidationError(format!(
            "{field} cannot be blank"
        )));
    }
    Ok(trimmed.to_string())
}

/// Trim an optional value; blank becomes `None`.
pub(crate) fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Deserialize a field so that `null` and "absent" can be told apart:
/// absent => `None`, `null` => `Some(None)`, value => `Some(Some(v))`.
pub(crate) fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Case-insensitive substring match on `column`. `%`, `_` and `\` in the
/// term match literally.
pub(crate) fn contains_ci<C: ColumnTrait + 'static>(column: C, term: &str) -> SimpleExpr {
    let pattern = format!("%{}%", escape_like(&term.to_lowercase()));
    Expr::expr(Func::lower(Expr::col((column.entity_name(), column))))
        .like(LikeExpr::new(pattern).escape('\\'))
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Map the query's `sort_by` onto an allowlisted column.
pub(crate) fn resolve_sort<C: Copy>(
    query: &ListQuery,
    allowed: &[(&str, C)],
    default: C,
) -> Result<(C, bool), ServiceError> {
    let descending = query.descending()?;
    let column = match query.sort_by.as_deref().map(str::trim) {
        None | Some("") => default,
        Some(requested) => allowed
            .iter()
            .find(|(name, _)| *name == requested)
            .map(|(_, column)| *column)
            .ok_or_else(|| {
                let names: Vec<&str> = allowed.iter().map(|(name, _)| *name).collect();
                ServiceError::BadRequest(format!(
                    "sort_by must be one of: {}",
                    names.join(", ")
                ))
            })?,
    };
    Ok((column, descending))
}

pub(crate) fn order<E: EntityTrait>(
    select: Select<E>,
    column: E::Column,
    descending: bool,
) -> Select<E> {
    if descending {
        select.order_by_desc(column)
    } else {
        select.order_by_asc(column)
    }
}

/// Load a row addressed by the request path; missing rows are a 404.
pub(crate) async fn find_or_404<E, C>(db: &C, id: Uuid, entity: &str) -> Result<E::Model, ServiceError>
where
    E: EntityTrait,
    E::PrimaryKey: PrimaryKeyTrait<ValueType = Uuid>,
    C: ConnectionTrait,
{
    E::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found(entity, id))
}

/// Load a row referenced from a request body; missing rows are a 400.
pub(crate) async fn find_reference<E, C>(
    db: &C,
    id: Uuid,
    field: &str,
) -> Result<E::Model, ServiceError>
where
    E: EntityTrait,
    E::PrimaryKey: PrimaryKeyTrait<ValueType = Uuid>,
    C: ConnectionTrait,
{
    E::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::BadRequest(format!("{field} {id} does not exist")))
}

/// Count and fetch one page of `select`.
pub(crate) async fn fetch_page<E, C>(
    db: &C,
    select: Select<E>,
    page: PageRequest,
) -> Result<PaginatedResponse<E::Model>, ServiceError>
where
    E: EntityTrait,
    E::Model: Sync,
    C: ConnectionTrait,
{
    let paginator = select.paginate(db, page.limit);
    let total = paginator.num_items().await?;
    let items = paginator.fetch_page(page.page - 1).await?;
    Ok(PaginatedResponse::new(items, total, page))
}

/// Summary returned by delete endpoints.
#[derive(Debug, Clone, serde::Serialize, utoipa::ToSchema)]
pub struct DeleteSummary {
    pub deleted: Uuid,
    /// Hotels whose reference was cleared by a forced delete
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detached_hotels: Option<u64>,
    /// Hotel links removed by a forced delete
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unlinked_hotels: Option<u64>,
}

impl DeleteSummary {
    pub fn deleted(id: Uuid) -> Self {
        Self {
            deleted: id,
            detached_hotels: None,
            unlinked_hotels: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(escape_like("50%_off"), r"50\%\_off");
        assert_eq!(escape_like(r"a\b"), r"a\\b");
        assert_eq!(escape_like("plain"), "plain");
    }

    #[test]
    fn required_text_trims_and_rejects_blank() {
        assert_eq!(required_text("name", "  Paris ").unwrap(), "Paris");
        assert!(matches!(
            required_text("name", "   "),
            Err(ServiceError::ValidationError(_))
        ));
    }

    #[test]
    fn optional_text_drops_blank() {
        assert_eq!(optional_text(Some("  ".into())), None);
        assert_eq!(optional_text(Some(" x ".into())), Some("x".into()));
        assert_eq!(optional_text(None), None);
    }

    #[test]
    fn resolve_sort_rejects_unknown_column() {
        let allowed = [("name", 1u8), ("created_at", 2u8)];
        let query = ListQuery {
            sort_by: Some("created_at".into()),
            sort_order: Some("desc".into()),
            ..Default::default()
        };
        assert_eq!(resolve_sort(&query, &allowed, 1).unwrap(), (2, true));

        let query = ListQuery {
            sort_by: Some("password".into()),
            ..Default::default()
        };
        assert!(matches!(
            resolve_sort(&query, &allowed, 1),
            Err(ServiceError::BadRequest(_))
        ));
    }

    #[test]
    fn double_option_distinguishes_null_from_absent() {
        #[derive(serde::Deserialize)]
        struct Patch {
            #[serde(default, deserialize_with = "double_option")]
            value: Option<Option<String>>,
        }

        let absent: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.value, None);
        let null: Patch = serde_json::from_str(r#"{"value":null}"#).unwrap();
        assert_eq!(null.value, Some(None));
        let set: Patch = serde_json::from_str(r#"{"value":"x"}"#).unwrap();
        assert_eq!(set.value, Some(Some("x".into())));
    }
}
