use std::sync::Arc;

use axum::{Json, extract::State};
use routeview_datasets::dataset_entry::DatasetEntry;

use crate::{error::ApiError, state::AppState};

pub async fn list_datasets_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<DatasetEntry>>, ApiError> {
    let datasets = state.registry.list_datasets().await?;

    Ok(Json(datasets))
}
