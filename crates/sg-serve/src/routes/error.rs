use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use sg_core::error::{LookupError, ScanError, SessionError, ValidationError};

#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub code: &'static str,
    pub message: String,
    pub request_id: Option<String>,
}

pub fn map_error(
    err: &ScanError,
    request_id: Option<String>,
) -> (StatusCode, Json<ErrorEnvelope>) {
    let (status, code, message) = match err {
        ScanError::Validation(validation) => map_validation_error(validation),
        ScanError::Lookup(lookup) => map_lookup_error(lookup),
        ScanError::Session(session) => map_session_error(session),
        ScanError::Internal { message } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal_error",
            message.clone(),
        ),
    };

    (
        status,
        Json(ErrorEnvelope {
            code,
            message,
            request_id,
        }),
    )
}

fn map_validation_error(err: &ValidationError) -> (StatusCode, &'static str, String) {
    // All shape failures are client errors; debounce rejections never reach
    // this mapping because suppression is not an error.
    (StatusCode::BAD_REQUEST, "invalid_payload", err.to_string())
}

fn map_lookup_error(err: &LookupError) -> (StatusCode, &'static str, String) {
    match err {
        LookupError::Unavailable => (
            StatusCode::SERVICE_UNAVAILABLE,
            "lookup_unavailable",
            err.to_string(),
        ),
        LookupError::Timeout => (StatusCode::GATEWAY_TIMEOUT, "timeout", err.to_string()),
        LookupError::Backend { .. } => {
            (StatusCode::BAD_GATEWAY, "lookup_failed", err.to_string())
        }
    }
}

fn map_session_error(err: &SessionError) -> (StatusCode, &'static str, String) {
    match err {
        SessionError::NotFound => (StatusCode::NOT_FOUND, "not_found", err.to_string()),
        SessionError::InvalidId { .. } => {
            (StatusCode::BAD_REQUEST, "invalid_input", err.to_string())
        }
    }
}
