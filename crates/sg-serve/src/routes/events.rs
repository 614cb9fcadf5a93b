use crate::{sse, AppState};
use axum::extract::{Query, State};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, serde::Deserialize, ToSchema, IntoParams)]
pub struct EventsQuery {
    /// Restrict the stream to one session's gate events.
    pub session: Option<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/events", get(stream))
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/api/events",
    params(EventsQuery),
    responses((status = 200, description = "SSE stream of gate event records"))
)]
pub(crate) async fn stream(
    State(state): State<AppState>,
    Query(query): Query<EventsQuery>,
) -> Response {
    sse::subscribe(state, query.session).await
}
