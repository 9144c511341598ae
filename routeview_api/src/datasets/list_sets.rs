use std::sync::Arc;

use axum::{Json, extract::State};
use routeview_datasets::mock_set::MockSet;

use crate::{error::ApiError, state::AppState};

pub async fn list_sets_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<MockSet>>, ApiError> {
    let sets = state.registry.list_sets().await?;

    Ok(Json(sets))
}
