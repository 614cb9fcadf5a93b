pub mod error;
pub mod events;
pub mod scans;
pub mod sessions;

use crate::middleware::request_id::request_id_middleware;
use crate::{openapi, AppState};
use axum::middleware;
use axum::Router;
use tower_http::cors::CorsLayer;

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .merge(sessions::router(state.clone()))
        .merge(scans::router(state.clone()))
        .merge(events::router(state))
        .merge(openapi::router())
        .layer(CorsLayer::permissive())
        .route_layer(middleware::from_fn(request_id_middleware));

    Router::new().nest("/api", api)
}
