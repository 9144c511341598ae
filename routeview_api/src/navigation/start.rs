use std::sync::Arc;

use anyhow::Context;
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use routeview_live::event::LiveEvent;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::{error::ApiError, state::AppState};

#[derive(Debug, Default, Deserialize)]
pub struct StartNavigationRequest {
    pub route_index: Option<usize>,
    pub vehicle: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct StartNavigationResponse {
    pub delivered: usize,
}

pub async fn start_navigation_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<StartNavigationRequest>, JsonRejection>,
) -> Result<Json<StartNavigationResponse>, ApiError> {
    let Json(request) = body.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

    let event = LiveEvent::start_navigation(request.route_index, request.vehicle);
    let payload = event
        .to_payload()
        .context("failed to serialize navigation event")?;

    let delivered = state.hub.broadcast(&payload).await?;
    info!(delivered, route_index = ?request.route_index, "navigation started");

    Ok(Json(StartNavigationResponse { delivered }))
}
