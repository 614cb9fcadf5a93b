use crate::middleware::request_id::RequestId;
use crate::routes::error::map_error;
use crate::AppState;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Extension, Json, Router};
use chrono::Utc;
use sg_core::error::{ScanError, SessionError};
use sg_core::intake::process_scan;
use sg_core::types::io::OfferScanInput;
use sg_core::types::scan::ScanEvent;
use sg_core::types::SessionId;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/sessions/{id}/scans", post(offer_scan))
        .with_state(state)
}

#[utoipa::path(
    post,
    path = "/api/sessions/{id}/scans",
    params(("id" = String, Path, description = "Session ID")),
    request_body = OfferScanInput,
    responses((status = 200, body = sg_core::intake::ScanDisposition))
)]
pub(crate) async fn offer_scan(
    State(state): State<AppState>,
    Extension(request): Extension<RequestId>,
    Path(id): Path<String>,
    Json(input): Json<OfferScanInput>,
) -> Response {
    let session_id = match SessionId::new(id) {
        Ok(value) => value,
        Err(err) => {
            return map_error(
                &ScanError::Session(SessionError::InvalidId {
                    message: err.to_string(),
                }),
                Some(request.0),
            )
            .into_response();
        }
    };
    let session = match state.registry.get(&session_id) {
        Ok(session) => session,
        Err(err) => return map_error(&ScanError::Session(err), Some(request.0)).into_response(),
    };

    let event = ScanEvent {
        symbology: input.symbology,
        payload: input.payload,
        observed_at: input.observed_at.unwrap_or_else(Utc::now),
    };
    match process_scan(&session, state.lookup.as_ref(), Some(&state.event_bus), event).await {
        Ok(disposition) => Json(disposition).into_response(),
        Err(err) => map_error(&err, Some(request.0)).into_response(),
    }
}
