use crate::error::ScanError;
use crate::gate::Decision;
use crate::lookup::{LookupOutcome, LookupService};
use crate::sessions::ScanSession;
use crate::types::scan::ScanEvent;
use crate::validation::ScanPayload;
use serde::Serialize;
use sg_events::{EventBus, EventRecord, GateEventBody, RejectCause, ScanResolution};
use utoipa::ToSchema;

/// How one offered scan ended up. Suppression is not an error: the scan is
/// silently dropped and nothing is shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "decision", rename_all = "PascalCase")]
pub enum ScanDisposition {
    Suppressed { reason: Decision },
    Completed { outcome: LookupOutcome },
}

/// Run the full intake sequence for one event: offer to the gate, validate
/// the payload shape, resolve via lookup. The gate is released on every exit
/// path; the permit guarantees it even across panics in the lookup future.
pub async fn process_scan(
    session: &ScanSession,
    lookup: &dyn LookupService,
    bus: Option<&EventBus>,
    event: ScanEvent,
) -> Result<ScanDisposition, ScanError> {
    let permit = match session.gate().acquire(&event) {
        Ok(permit) => permit,
        Err(decision) => {
            if let Some(reason) = reject_cause(decision) {
                publish(bus, session, GateEventBody::ScanRejected { reason });
            }
            return Ok(ScanDisposition::Suppressed { reason: decision });
        }
    };
    publish(
        bus,
        session,
        GateEventBody::ScanAccepted {
            symbology: event.symbology.as_str().to_string(),
            payload: event.payload.clone(),
        },
    );

    let payload = match ScanPayload::new(event.payload) {
        Ok(payload) => payload,
        Err(err) => {
            // No handler ran; release immediately and surface the shape
            // error. The cooldown stays recorded so the same misread does
            // not retrigger.
            permit.complete();
            publish(bus, session, completed(ScanResolution::Invalid));
            return Err(err.into());
        }
    };

    match lookup.lookup(&payload).await {
        Ok(outcome) => {
            permit.complete();
            publish(bus, session, completed(outcome.resolution()));
            Ok(ScanDisposition::Completed { outcome })
        }
        Err(err) => {
            permit.complete();
            publish(bus, session, completed(ScanResolution::Failed));
            Err(err.into())
        }
    }
}

fn completed(resolution: ScanResolution) -> GateEventBody {
    GateEventBody::ScanCompleted { resolution }
}

fn reject_cause(decision: Decision) -> Option<RejectCause> {
    match decision {
        Decision::Accept => None,
        Decision::RejectLocked => Some(RejectCause::Locked),
        Decision::RejectDuplicate => Some(RejectCause::Duplicate),
        Decision::RejectTooFrequent => Some(RejectCause::TooFrequent),
    }
}

fn publish(bus: Option<&EventBus>, session: &ScanSession, body: GateEventBody) {
    if let Some(bus) = bus {
        let record = EventRecord::new(Some(session.id().as_str().to_string()), body);
        let _ = bus.publish(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{LookupError, ValidationError};
    use crate::gate::GateTuning;
    use crate::types::enums::Symbology;
    use crate::types::scan::Product;
    use chrono::{DateTime, TimeZone, Utc};
    use futures::future::BoxFuture;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn at(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(ms).unwrap()
    }

    fn event(payload: &str, ms: i64) -> ScanEvent {
        ScanEvent {
            symbology: Symbology::Ean13,
            payload: payload.to_string(),
            observed_at: at(ms),
        }
    }

    fn product(payload: &str) -> Product {
        Product {
            payload: payload.to_string(),
            name: "Oat Milk 1L".to_string(),
            brand: None,
            unit: Some("l".to_string()),
            price_cents: Some(349),
        }
    }

    struct StubLookup {
        outcome: Result<LookupOutcome, LookupError>,
        calls: AtomicUsize,
    }

    impl StubLookup {
        fn returning(outcome: Result<LookupOutcome, LookupError>) -> Self {
            Self {
                outcome,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl LookupService for StubLookup {
        fn lookup<'a>(
            &'a self,
            _payload: &'a ScanPayload,
        ) -> BoxFuture<'a, Result<LookupOutcome, LookupError>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Box::pin(futures::future::ready(self.outcome.clone()))
        }
    }

    #[tokio::test]
    async fn accepted_scan_resolves_and_releases() {
        let session = ScanSession::open(GateTuning::default());
        let lookup = StubLookup::returning(Ok(LookupOutcome::Found(product("40112002"))));

        let disposition = process_scan(&session, &lookup, None, event("40112002", 0))
            .await
            .unwrap();
        assert_eq!(
            disposition,
            ScanDisposition::Completed {
                outcome: LookupOutcome::Found(product("40112002")),
            }
        );
        assert!(!session.gate().snapshot().locked);
        assert_eq!(lookup.calls(), 1);
    }

    #[tokio::test]
    async fn lookup_failure_still_releases_the_gate() {
        let session = ScanSession::open(GateTuning::default());
        let lookup = StubLookup::returning(Err(LookupError::Unavailable));

        let err = process_scan(&session, &lookup, None, event("40112002", 0))
            .await
            .unwrap_err();
        assert_eq!(err, ScanError::Lookup(LookupError::Unavailable));
        assert!(!session.gate().snapshot().locked);
        // Gate is usable again once the windows pass.
        assert!(session.gate().offer(&event("99887766", 5000)).is_accept());
    }

    #[tokio::test]
    async fn invalid_payload_is_rejected_before_lookup() {
        let session = ScanSession::open(GateTuning::default());
        let lookup = StubLookup::returning(Ok(LookupOutcome::Unknown));

        let err = process_scan(&session, &lookup, None, event("123", 0))
            .await
            .unwrap_err();
        assert_eq!(err, ScanError::Validation(ValidationError::TooShort { len: 3 }));
        assert_eq!(lookup.calls(), 0);
        // Released, but the misread still burned the accept: the cooldown
        // suppresses an immediate retry.
        let snapshot = session.gate().snapshot();
        assert!(!snapshot.locked);
        assert_eq!(
            session.gate().offer(&event("40112002", 500)),
            Decision::RejectTooFrequent
        );
    }

    #[tokio::test]
    async fn duplicate_scan_is_suppressed_without_lookup() {
        let session = ScanSession::open(GateTuning::default());
        let lookup = StubLookup::returning(Ok(LookupOutcome::Unknown));

        process_scan(&session, &lookup, None, event("40112002", 0))
            .await
            .unwrap();
        let disposition = process_scan(&session, &lookup, None, event("40112002", 600))
            .await
            .unwrap();
        assert_eq!(
            disposition,
            ScanDisposition::Suppressed {
                reason: Decision::RejectDuplicate,
            }
        );
        assert_eq!(lookup.calls(), 1);
    }

    #[tokio::test]
    async fn lifecycle_events_are_published_in_order() {
        let session = ScanSession::open(GateTuning::default());
        let lookup = StubLookup::returning(Ok(LookupOutcome::Unknown));
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        process_scan(&session, &lookup, Some(&bus), event("40112002", 0))
            .await
            .unwrap();

        let accepted = rx.recv().await.unwrap();
        assert_eq!(
            accepted.body,
            GateEventBody::ScanAccepted {
                symbology: "Ean13".to_string(),
                payload: "40112002".to_string(),
            }
        );
        assert_eq!(accepted.session_id.as_deref(), Some(session.id().as_str()));
        let done = rx.recv().await.unwrap();
        assert_eq!(
            done.body,
            GateEventBody::ScanCompleted {
                resolution: ScanResolution::Unknown,
            }
        );
    }

    #[tokio::test]
    async fn rejection_publishes_the_cause() {
        let session = ScanSession::open(GateTuning::default());
        let lookup = StubLookup::returning(Ok(LookupOutcome::Unknown));
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        process_scan(&session, &lookup, Some(&bus), event("40112002", 0))
            .await
            .unwrap();
        process_scan(&session, &lookup, Some(&bus), event("40112002", 100))
            .await
            .unwrap();

        // Skip the accepted/completed pair from the first scan.
        rx.recv().await.unwrap();
        rx.recv().await.unwrap();
        let rejected = rx.recv().await.unwrap();
        assert_eq!(
            rejected.body,
            GateEventBody::ScanRejected {
                reason: RejectCause::Duplicate,
            }
        );
    }
}
