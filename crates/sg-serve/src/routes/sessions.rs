use crate::middleware::request_id::RequestId;
use crate::routes::error::map_error;
use crate::AppState;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use sg_core::error::{ScanError, SessionError};
use sg_core::gate::GateTuning;
use sg_core::types::io::{OpenSessionInput, SessionView};
use sg_core::types::SessionId;
use sg_events::{EventRecord, GateEventBody};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/sessions", post(open_session))
        .route(
            "/sessions/{id}",
            get(get_session).delete(close_session),
        )
        .route("/sessions/{id}/reset", post(reset_session))
        .with_state(state)
}

fn parse_session_id(raw: String) -> Result<SessionId, ScanError> {
    SessionId::new(raw).map_err(|err| {
        ScanError::Session(SessionError::InvalidId {
            message: err.to_string(),
        })
    })
}

#[utoipa::path(
    post,
    path = "/api/sessions",
    request_body = OpenSessionInput,
    responses((status = 200, body = SessionView))
)]
pub(crate) async fn open_session(
    State(state): State<AppState>,
    Json(input): Json<OpenSessionInput>,
) -> Response {
    let base = state.default_tuning;
    let tuning = GateTuning::from_millis(
        input
            .same_payload_cooldown_ms
            .unwrap_or_else(|| base.same_payload_cooldown.num_milliseconds()),
        input
            .min_interval_ms
            .unwrap_or_else(|| base.min_interval.num_milliseconds()),
    );
    let session = state.registry.open(tuning);
    let _ = state.event_bus.publish(EventRecord::new(
        Some(session.id().as_str().to_string()),
        GateEventBody::SessionOpened,
    ));
    Json(session.view()).into_response()
}

#[utoipa::path(
    get,
    path = "/api/sessions/{id}",
    params(("id" = String, Path, description = "Session ID")),
    responses((status = 200, body = SessionView))
)]
pub(crate) async fn get_session(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let session_id = match parse_session_id(id) {
        Ok(value) => value,
        Err(err) => return map_error(&err, None).into_response(),
    };
    match state.registry.get(&session_id) {
        Ok(session) => Json(session.view()).into_response(),
        Err(err) => map_error(&ScanError::Session(err), None).into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/api/sessions/{id}/reset",
    params(("id" = String, Path, description = "Session ID")),
    responses((status = 200))
)]
pub(crate) async fn reset_session(
    State(state): State<AppState>,
    Extension(request): Extension<RequestId>,
    Path(id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(id) {
        Ok(value) => value,
        Err(err) => return map_error(&err, Some(request.0)).into_response(),
    };
    match state.registry.get(&session_id) {
        Ok(session) => {
            session.gate().force_reset();
            let _ = state.event_bus.publish(EventRecord::new(
                Some(session.id().as_str().to_string()),
                GateEventBody::SessionReset,
            ));
            Json(serde_json::json!({ "ok": true })).into_response()
        }
        Err(err) => map_error(&ScanError::Session(err), Some(request.0)).into_response(),
    }
}

#[utoipa::path(
    delete,
    path = "/api/sessions/{id}",
    params(("id" = String, Path, description = "Session ID")),
    responses((status = 200))
)]
pub(crate) async fn close_session(
    State(state): State<AppState>,
    Extension(request): Extension<RequestId>,
    Path(id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(id) {
        Ok(value) => value,
        Err(err) => return map_error(&err, Some(request.0)).into_response(),
    };
    match state.registry.close(&session_id) {
        Ok(()) => {
            let _ = state.event_bus.publish(EventRecord::new(
                Some(session_id.as_str().to_string()),
                GateEventBody::SessionClosed,
            ));
            Json(serde_json::json!({ "ok": true })).into_response()
        }
        Err(err) => map_error(&ScanError::Session(err), Some(request.0)).into_response(),
    }
}
