use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use routeview_datasets::registry::DatasetQuery;
use routeview_geometry::{
    optimizer_result::OptimizerResponse,
    summary::{Summary, summarize},
};

use crate::{datasets::dataset_query, error::ApiError, state::AppState};

pub async fn summary_handler(
    State(state): State<Arc<AppState>>,
    query: Result<Query<DatasetQuery>, QueryRejection>,
) -> Result<Json<Summary>, ApiError> {
    let query = dataset_query(query)?;
    let document = state.load_document(&query).await?;

    Ok(Json(summarize(&OptimizerResponse::from_document(&document))))
}
