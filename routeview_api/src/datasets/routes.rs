use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use geojson::FeatureCollection;
use routeview_datasets::registry::DatasetQuery;
use routeview_geometry::{
    feature_collection::to_feature_collection, optimizer_result::OptimizerResponse,
};

use crate::{datasets::dataset_query, error::ApiError, state::AppState};

pub async fn routes_handler(
    State(state): State<Arc<AppState>>,
    query: Result<Query<DatasetQuery>, QueryRejection>,
) -> Result<Json<FeatureCollection>, ApiError> {
    let query = dataset_query(query)?;
    let document = state.load_document(&query).await?;

    let response = OptimizerResponse::from_document(&document);

    Ok(Json(to_feature_collection(
        &response,
        &state.precision_policy,
    )))
}
