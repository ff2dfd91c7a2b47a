use super::ApiError;
use crate::app::AppState;
use axum::Json;
use axum::extract::{Query, State};
use partscout_resolve::{DatasheetResult, SubstitutionResult};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(super) struct DatasheetParams {
    word: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct SubstituteParams {
    search: Option<String>,
}

pub(super) async fn datasheet(
    State(state): State<AppState>,
    Query(params): Query<DatasheetParams>,
) -> Result<Json<DatasheetResult>, ApiError> {
    let word = params.word.unwrap_or_default();
    state
        .datasheets
        .resolve(&word)
        .await
        .map(Json)
        .map_err(|err| ApiError::from_datasheet(err, word.trim()))
}

pub(super) async fn substitutes(
    State(state): State<AppState>,
    Query(params): Query<SubstituteParams>,
) -> Result<Json<SubstitutionResult>, ApiError> {
    let search = params.search.unwrap_or_default();
    state.substitutes.resolve(&search).await.map(Json).map_err(ApiError::from_substitutes)
}
