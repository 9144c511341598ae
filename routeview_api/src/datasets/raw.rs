use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use routeview_datasets::registry::DatasetQuery;
use serde_json::Value;

use crate::{datasets::dataset_query, error::ApiError, state::AppState};

/// Returns the resolved document exactly as it is on disk.
pub async fn raw_handler(
    State(state): State<Arc<AppState>>,
    query: Result<Query<DatasetQuery>, QueryRejection>,
) -> Result<Json<Arc<Value>>, ApiError> {
    let query = dataset_query(query)?;
    let document = state.load_document(&query).await?;

    Ok(Json(document))
}
