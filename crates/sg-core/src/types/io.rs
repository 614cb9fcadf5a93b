use crate::types::enums::Symbology;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Tuning overrides for a new session, in milliseconds. Absent fields fall
/// back to the configured defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OpenSessionInput {
    pub same_payload_cooldown_ms: Option<i64>,
    pub min_interval_ms: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OfferScanInput {
    pub symbology: Symbology,
    pub payload: String,
    /// Detector-side timestamp; server receive time when absent.
    pub observed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SessionView {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub locked: bool,
    pub last_accepted_at: Option<DateTime<Utc>>,
}
