use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use geojson::FeatureCollection;
use routeview_geometry::{
    optimizer_request::OptimizerRequest, request_points::extract_request_points,
};

use crate::{error::ApiError, state::AppState};

/// Vehicle, job and shipment points of a mock set's request document.
pub async fn set_points_handler(
    State(state): State<Arc<AppState>>,
    Path(set): Path<u64>,
) -> Result<Json<FeatureCollection>, ApiError> {
    let path = state.registry.resolve_request(set).await?;
    let document = state.cache.load(&path).await?;

    Ok(Json(extract_request_points(
        &OptimizerRequest::from_document(&document),
    )))
}
