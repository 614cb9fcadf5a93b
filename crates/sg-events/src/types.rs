use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;
use utoipa::ToSchema;

/// One gate lifecycle event, as published on the bus and streamed to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EventRecord {
    pub id: String,
    pub at: DateTime<Utc>,
    pub session_id: Option<String>,
    pub body: GateEventBody,
}

impl EventRecord {
    pub fn new(session_id: Option<String>, body: GateEventBody) -> Self {
        Self {
            id: format!("evt_{}", Ulid::new()),
            at: Utc::now(),
            session_id,
            body,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "PascalCase")]
pub enum GateEventBody {
    SessionOpened,
    SessionClosed,
    SessionReset,
    ScanAccepted { symbology: String, payload: String },
    ScanRejected { reason: RejectCause },
    ScanCompleted { resolution: ScanResolution },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub enum RejectCause {
    Locked,
    Duplicate,
    TooFrequent,
}

/// How an accepted scan settled. `Invalid` and `Failed` still release the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub enum ScanResolution {
    Found,
    Prefill,
    Unknown,
    Invalid,
    Failed,
}
