use super::{ApiError, JsonBody};
use crate::app::AppState;
use axum::Json;
use axum::extract::{Path, RawQuery, State};
use partscout_inventory::models::{ComponentPatch, ElectronicComponent, NewComponent};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(super) struct SearchResponse {
    message: &'static str,
    queries: Vec<String>,
    parts: Vec<ElectronicComponent>,
}

#[derive(Debug, Serialize)]
pub(super) struct Changed {
    message: &'static str,
    data: ElectronicComponent,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct IdBody {
    id: Option<i64>,
}

/// Every non-blank `query` parameter, in order. `Query<T>` can't collect a
/// repeated key, hence the raw query string.
fn query_terms(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    url::form_urlencoded::parse(raw.as_bytes())
        .filter(|(key, _)| key == "query")
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.trim().is_empty())
        .collect()
}

pub(super) async fn search(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Result<Json<SearchResponse>, ApiError> {
    let queries = query_terms(raw.as_deref());
    let parts = state.inventory.search(queries.as_slice()).await?;
    Ok(Json(SearchResponse {
        message: "GET filtered parts",
        queries,
        parts,
    }))
}

pub(super) async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ElectronicComponent>, ApiError> {
    let id = id.trim().parse::<i64>().map_err(|_| ApiError::bad_request("Invalid id"))?;
    let component = state.inventory.get(id).await?.ok_or_else(|| ApiError::not_found("Component not found"))?;
    Ok(Json(component))
}

pub(super) async fn add(
    State(state): State<AppState>,
    JsonBody(new): JsonBody<NewComponent>,
) -> Result<Json<ElectronicComponent>, ApiError> {
    Ok(Json(state.inventory.add(new).await?))
}

pub(super) async fn update(
    State(state): State<AppState>,
    JsonBody(patch): JsonBody<ComponentPatch>,
) -> Result<Json<Changed>, ApiError> {
    let id = patch.id.ok_or_else(|| ApiError::bad_request("id is required"))?;
    let mut component = state.inventory.get(id).await?.ok_or_else(|| ApiError::not_found("Component not found"))?;
    patch.apply(&mut component);
    Ok(Json(Changed {
        message: "Part updated successfully",
        data: state.inventory.write(&component).await?,
    }))
}

pub(super) async fn delete(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<IdBody>,
) -> Result<Json<Changed>, ApiError> {
    let id = body.id.ok_or_else(|| ApiError::bad_request("id is required"))?;
    Ok(Json(Changed {
        message: "Part deleted successfully",
        data: state.inventory.delete(id).await?,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, vec![])]
    #[case(Some(""), vec![])]
    #[case(Some("query=lm&query=%20&other=x&query=to%2D220"), vec!["lm", "to-220"])]
    #[case(Some("query=drawer+1"), vec!["drawer 1"])]
    fn test_query_terms(#[case] raw: Option<&str>, #[case] expected: Vec<&str>) {
        assert_eq!(query_terms(raw), expected);
    }
}
