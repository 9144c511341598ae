use std::sync::Arc;

use axum::{
    Router,
    http::{Method, StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use crate::{
    datasets::{
        list_datasets::list_datasets_handler, list_sets::list_sets_handler, raw::raw_handler,
        routes::routes_handler, set_points::set_points_handler, summary::summary_handler,
    },
    navigation::{start::start_navigation_handler, ws::ws_handler},
    state::AppState,
};

async fn favicon_handler() -> impl IntoResponse {
    (StatusCode::NO_CONTENT, [(header::CONTENT_TYPE, "image/x-icon")])
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/datasets", get(list_datasets_handler))
        .route("/sets", get(list_sets_handler))
        .route("/sets/{set}/points", get(set_points_handler))
        .route("/summary", get(summary_handler))
        .route("/routes", get(routes_handler))
        .route("/raw", get(raw_handler))
        .route("/navigation/start", post(start_navigation_handler))
}

pub fn app(state: Arc<AppState>) -> Router {
    let cors_layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_origin(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api", api_routes())
        .route("/ws", get(ws_handler))
        .route("/favicon.ico", get(favicon_handler))
        .layer(ServiceBuilder::new().layer(cors_layer))
        .with_state(state)
}
