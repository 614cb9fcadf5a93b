use crate::error::LookupError;
use crate::types::scan::{Product, ProductDraft};
use crate::validation::ScanPayload;
use futures::future::BoxFuture;
use serde::Serialize;
use sg_events::ScanResolution;
use utoipa::ToSchema;

/// Result of resolving an accepted payload against the product backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "type", content = "data", rename_all = "PascalCase")]
pub enum LookupOutcome {
    /// Listed product.
    Found(Product),
    /// Not listed, but pre-fill data exists for intake.
    Prefill(ProductDraft),
    /// Nothing known about the payload.
    Unknown,
}

impl LookupOutcome {
    pub fn resolution(&self) -> ScanResolution {
        match self {
            Self::Found(_) => ScanResolution::Found,
            Self::Prefill(_) => ScanResolution::Prefill,
            Self::Unknown => ScanResolution::Unknown,
        }
    }
}

/// Seam to the remote lookup backend. Object-safe so callers can hold it as
/// `Arc<dyn LookupService>`; latency, timeouts, and failures are the
/// implementation's concern, never the gate's.
pub trait LookupService: Send + Sync {
    fn lookup<'a>(
        &'a self,
        payload: &'a ScanPayload,
    ) -> BoxFuture<'a, Result<LookupOutcome, LookupError>>;
}
