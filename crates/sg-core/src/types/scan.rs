use crate::types::enums::Symbology;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One detection emitted by the camera decoder. Ephemeral; consumed by the
/// gate immediately and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ScanEvent {
    pub symbology: Symbology,
    pub payload: String,
    pub observed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub payload: String,
    pub name: String,
    pub brand: Option<String>,
    pub unit: Option<String>,
    pub price_cents: Option<i64>,
}

/// Pre-fill data for a payload the backend knows of but has no listing for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductDraft {
    pub payload: String,
    pub name: Option<String>,
    pub brand: Option<String>,
    pub unit: Option<String>,
}
