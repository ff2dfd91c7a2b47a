use super::{ApiError, JsonBody};
use crate::app::AppState;
use axum::Json;
use axum::extract::State;
use partscout_inventory::error::ErrorKind;
use partscout_inventory::models::{NewProject, Project};

pub(super) async fn list(State(state): State<AppState>) -> Result<Json<Vec<Project>>, ApiError> {
    Ok(Json(state.inventory.projects().await?))
}

pub(super) async fn create(
    State(state): State<AppState>,
    JsonBody(project): JsonBody<NewProject>,
) -> Result<Json<Project>, ApiError> {
    match state.inventory.create_project(project).await {
        Ok(project) => Ok(Json(project)),
        // The request named the component, so here it's the request that's wrong.
        Err(err) => match &*err {
            ErrorKind::ComponentNotFound(id) => {
                Err(ApiError::bad_request(format!("Component ID {id} does not exist.")))
            },
            ErrorKind::InsufficientStock { mpn, needed, available } => Err(ApiError::bad_request(format!(
                "Not enough quantity of component {mpn}. Needed {needed}, available {available}."
            ))),
            _ => Err(err.into()),
        },
    }
}
