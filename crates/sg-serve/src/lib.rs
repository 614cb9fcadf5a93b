pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod sse;

use axum::http::Request;
use axum::Router;
use middleware::request_id::RequestId;
use sg_core::gate::GateTuning;
use sg_core::lookup::LookupService;
use sg_core::sessions::SessionRegistry;
use sg_events::EventBus;
use std::sync::Arc;
use tokio::net::TcpListener;

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<SessionRegistry>,
    pub event_bus: EventBus,
    pub lookup: Arc<dyn LookupService>,
    pub default_tuning: GateTuning,
}

pub fn request_id_from_request<B>(request: &Request<B>) -> Option<String> {
    request
        .extensions()
        .get::<RequestId>()
        .map(|value| value.0.clone())
}

pub fn app(state: AppState) -> Router {
    routes::router(state)
}

pub async fn serve(state: AppState, addr: std::net::SocketAddr) -> Result<(), std::io::Error> {
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app(state)).await
}
