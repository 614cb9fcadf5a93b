use utoipa::OpenApi;

use crate::routes::events::EventsQuery;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use sg_core::gate::Decision;
use sg_core::intake::ScanDisposition;
use sg_core::lookup::LookupOutcome;
use sg_core::types::enums::Symbology;
use sg_core::types::ids::SessionId;
use sg_core::types::io::{OfferScanInput, OpenSessionInput, SessionView};
use sg_core::types::scan::{Product, ProductDraft, ScanEvent};
use sg_core::validation::ScanPayload;
use sg_events::types::{EventRecord, GateEventBody, RejectCause, ScanResolution};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::sessions::open_session,
        crate::routes::sessions::get_session,
        crate::routes::sessions::reset_session,
        crate::routes::sessions::close_session,
        crate::routes::scans::offer_scan,
        crate::routes::events::stream
    ),
    components(schemas(
        OpenSessionInput,
        OfferScanInput,
        SessionView,
        ScanEvent,
        ScanDisposition,
        Decision,
        LookupOutcome,
        Product,
        ProductDraft,
        ScanPayload,
        Symbology,
        SessionId,
        EventRecord,
        GateEventBody,
        RejectCause,
        ScanResolution,
        EventsQuery
    ))
)]
struct ApiDoc;

pub fn generate_spec() -> String {
    ApiDoc::openapi()
        .to_json()
        .unwrap_or_else(|_| "{}".to_string())
}

pub fn router() -> Router {
    Router::new().route("/openapi.json", get(openapi_json))
}

async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
