use crate::types::scan::ScanEvent;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::sync::{Mutex, PoisonError};
use utoipa::ToSchema;

pub const DEFAULT_SAME_PAYLOAD_COOLDOWN_MS: i64 = 3000;
pub const DEFAULT_MIN_INTERVAL_MS: i64 = 1000;

/// Outcome of offering one scan event to the gate. Only `Accept` obligates
/// the caller to a matching `complete()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub enum Decision {
    Accept,
    RejectLocked,
    RejectDuplicate,
    RejectTooFrequent,
}

impl Decision {
    pub fn is_accept(self) -> bool {
        self == Self::Accept
    }
}

/// Cooldown windows. The defaults are the tuning the source scanner shipped
/// with; both are adjustable per session for devices with different camera
/// frame rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateTuning {
    pub same_payload_cooldown: Duration,
    pub min_interval: Duration,
}

impl GateTuning {
    pub fn from_millis(same_payload_cooldown_ms: i64, min_interval_ms: i64) -> Self {
        Self {
            same_payload_cooldown: Duration::milliseconds(same_payload_cooldown_ms),
            min_interval: Duration::milliseconds(min_interval_ms),
        }
    }
}

impl Default for GateTuning {
    fn default() -> Self {
        Self::from_millis(DEFAULT_SAME_PAYLOAD_COOLDOWN_MS, DEFAULT_MIN_INTERVAL_MS)
    }
}

/// The gate's whole state. Pure logic: timestamps come from the events, so
/// every transition is deterministic and testable without a clock.
///
/// Rule order is fixed: locked, then duplicate, then too-frequent, then
/// accept. Only an accept mutates the cooldown fields; `complete` clears the
/// lock and nothing else, so duplicate suppression outlives the in-flight
/// handler.
#[derive(Debug)]
pub struct GateState {
    tuning: GateTuning,
    locked: bool,
    last_accepted_payload: Option<String>,
    last_accepted_at: Option<DateTime<Utc>>,
}

impl GateState {
    pub fn new(tuning: GateTuning) -> Self {
        Self {
            tuning,
            locked: false,
            last_accepted_payload: None,
            last_accepted_at: None,
        }
    }

    /// Return to initial state. Idempotent; safe to call on reactivation.
    pub fn activate(&mut self) {
        self.locked = false;
        self.last_accepted_payload = None;
        self.last_accepted_at = None;
    }

    pub fn offer(&mut self, event: &ScanEvent) -> Decision {
        if self.locked {
            return Decision::RejectLocked;
        }
        if let (Some(payload), Some(at)) = (&self.last_accepted_payload, self.last_accepted_at) {
            if *payload == event.payload
                && event.observed_at - at < self.tuning.same_payload_cooldown
            {
                return Decision::RejectDuplicate;
            }
        }
        if let Some(at) = self.last_accepted_at {
            if event.observed_at - at < self.tuning.min_interval {
                return Decision::RejectTooFrequent;
            }
        }
        self.locked = true;
        self.last_accepted_payload = Some(event.payload.clone());
        self.last_accepted_at = Some(event.observed_at);
        Decision::Accept
    }

    /// Release the lock. Without an unmatched accept this is a no-op: camera
    /// callback ordering from the OS layer is not fully controllable, so a
    /// stray or doubled release must never corrupt state.
    pub fn complete(&mut self) {
        self.locked = false;
    }

    /// Unconditional reset. Does not cancel an in-flight handler; a late
    /// `complete` from one lands on an unlocked gate and does nothing.
    pub fn force_reset(&mut self) {
        self.activate();
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn snapshot(&self) -> GateSnapshot {
        GateSnapshot {
            locked: self.locked,
            last_accepted_payload: self.last_accepted_payload.clone(),
            last_accepted_at: self.last_accepted_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateSnapshot {
    pub locked: bool,
    pub last_accepted_payload: Option<String>,
    pub last_accepted_at: Option<DateTime<Utc>>,
}

/// Shared gate: `GateState` behind a mutex so the check-and-set in `offer`
/// stays atomic when events arrive from more than one thread.
#[derive(Debug)]
pub struct ScanGate {
    inner: Mutex<GateState>,
}

impl ScanGate {
    pub fn new(tuning: GateTuning) -> Self {
        Self {
            inner: Mutex::new(GateState::new(tuning)),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, GateState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn activate(&self) {
        self.lock().activate();
    }

    pub fn offer(&self, event: &ScanEvent) -> Decision {
        self.lock().offer(event)
    }

    pub fn complete(&self) {
        self.lock().complete();
    }

    pub fn force_reset(&self) {
        self.lock().force_reset();
    }

    pub fn snapshot(&self) -> GateSnapshot {
        self.lock().snapshot()
    }

    /// Offer an event and, on accept, hand back a permit that releases the
    /// gate when dropped. Every exit path of the handler, panics included,
    /// runs the release exactly once.
    pub fn acquire(&self, event: &ScanEvent) -> Result<ScanPermit<'_>, Decision> {
        match self.offer(event) {
            Decision::Accept => Ok(ScanPermit { gate: self }),
            rejected => Err(rejected),
        }
    }
}

pub struct ScanPermit<'a> {
    gate: &'a ScanGate,
}

impl ScanPermit<'_> {
    /// Explicit release; dropping the permit is equivalent.
    pub fn complete(self) {}
}

impl Drop for ScanPermit<'_> {
    fn drop(&mut self) {
        self.gate.complete();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::enums::Symbology;
    use chrono::TimeZone;

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

    fn gate() -> GateState {
        GateState::new(GateTuning::default())
    }

    #[test]
    fn locked_gate_rejects_every_offer() {
        let mut gate = gate();
        assert_eq!(gate.offer(&event("01234567", 0)), Decision::Accept);
        assert_eq!(gate.offer(&event("01234567", 500)), Decision::RejectLocked);
        assert_eq!(gate.offer(&event("99999999", 500)), Decision::RejectLocked);
        // Time does not unlock; only complete does.
        assert_eq!(
            gate.offer(&event("99999999", 60_000)),
            Decision::RejectLocked
        );
    }

    #[test]
    fn duplicate_window_has_strict_boundaries() {
        let mut gate = gate();
        assert_eq!(gate.offer(&event("40111222", 0)), Decision::Accept);
        gate.complete();
        assert_eq!(
            gate.offer(&event("40111222", 2999)),
            Decision::RejectDuplicate
        );
        assert_eq!(gate.offer(&event("40111222", 3001)), Decision::Accept);
    }

    #[test]
    fn min_interval_has_strict_boundaries() {
        let mut gate = gate();
        assert_eq!(gate.offer(&event("40111222", 0)), Decision::Accept);
        gate.complete();
        assert_eq!(
            gate.offer(&event("50999888", 999)),
            Decision::RejectTooFrequent
        );
        assert_eq!(gate.offer(&event("50999888", 1001)), Decision::Accept);
    }

    #[test]
    fn second_complete_is_a_noop() {
        let mut gate = gate();
        assert_eq!(gate.offer(&event("40111222", 0)), Decision::Accept);
        gate.complete();
        gate.complete();
        // The doubled release neither unlocks anything extra nor clears the
        // cooldown fields.
        assert_eq!(
            gate.offer(&event("40111222", 100)),
            Decision::RejectDuplicate
        );
        assert_eq!(gate.offer(&event("40111222", 3500)), Decision::Accept);
    }

    #[test]
    fn complete_without_accept_is_a_noop() {
        let mut gate = gate();
        gate.complete();
        assert_eq!(gate.offer(&event("40111222", 0)), Decision::Accept);
    }

    #[test]
    fn activate_clears_stale_cooldowns() {
        let mut gate = gate();
        assert_eq!(gate.offer(&event("40111222", 0)), Decision::Accept);
        gate.complete();
        gate.activate();
        assert_eq!(gate.offer(&event("40111222", 1)), Decision::Accept);
    }

    #[test]
    fn force_reset_allows_immediate_rescan() {
        let mut gate = gate();
        assert_eq!(gate.offer(&event("33333333", 0)), Decision::Accept);
        gate.complete();
        gate.force_reset();
        assert_eq!(gate.offer(&event("33333333", 10)), Decision::Accept);
    }

    #[test]
    fn late_complete_after_force_reset_is_safe() {
        let mut gate = gate();
        assert_eq!(gate.offer(&event("33333333", 0)), Decision::Accept);
        gate.force_reset();
        // Handler from before the reset settles now.
        gate.complete();
        assert_eq!(gate.offer(&event("33333333", 10)), Decision::Accept);
    }

    #[test]
    fn duplicate_is_reported_before_too_frequent() {
        let mut gate = gate();
        assert_eq!(gate.offer(&event("01234567", 0)), Decision::Accept);
        assert_eq!(gate.offer(&event("01234567", 500)), Decision::RejectLocked);
        gate.complete();
        // 600ms is inside both windows; the duplicate rule wins.
        assert_eq!(
            gate.offer(&event("01234567", 600)),
            Decision::RejectDuplicate
        );
    }

    #[test]
    fn different_payload_past_min_interval_is_accepted() {
        let mut gate = gate();
        assert_eq!(gate.offer(&event("11111111", 0)), Decision::Accept);
        gate.complete();
        assert_eq!(gate.offer(&event("22222222", 1500)), Decision::Accept);
    }

    #[test]
    fn event_older_than_last_accept_is_suppressed() {
        let mut gate = gate();
        assert_eq!(gate.offer(&event("40111222", 5000)), Decision::Accept);
        gate.complete();
        // Detector clock ran backwards; a negative delta is inside every
        // window.
        assert_eq!(
            gate.offer(&event("50999888", 4500)),
            Decision::RejectTooFrequent
        );
        assert_eq!(
            gate.offer(&event("40111222", 4500)),
            Decision::RejectDuplicate
        );
    }

    #[test]
    fn tuning_overrides_change_both_windows() {
        let mut gate = GateState::new(GateTuning::from_millis(500, 200));
        assert_eq!(gate.offer(&event("40111222", 0)), Decision::Accept);
        gate.complete();
        assert_eq!(
            gate.offer(&event("40111222", 499)),
            Decision::RejectDuplicate
        );
        assert_eq!(gate.offer(&event("40111222", 501)), Decision::Accept);
        gate.complete();
        assert_eq!(
            gate.offer(&event("50999888", 700)),
            Decision::RejectTooFrequent
        );
        assert_eq!(gate.offer(&event("50999888", 800)), Decision::Accept);
    }

    #[test]
    fn only_accept_mutates_cooldown_state() {
        let mut gate = gate();
        assert_eq!(gate.offer(&event("11111111", 0)), Decision::Accept);
        gate.complete();
        assert_eq!(
            gate.offer(&event("11111111", 100)),
            Decision::RejectDuplicate
        );
        // The rejection at t=100 must not have refreshed the window.
        assert_eq!(gate.offer(&event("11111111", 3001)), Decision::Accept);
    }

    #[test]
    fn permit_holds_the_lock_until_dropped() {
        let gate = ScanGate::new(GateTuning::default());
        let Ok(permit) = gate.acquire(&event("40111222", 0)) else {
            panic!("first offer must be accepted");
        };
        assert!(gate.snapshot().locked);
        assert!(gate.acquire(&event("50999888", 10)).is_err());
        assert_eq!(gate.offer(&event("50999888", 10)), Decision::RejectLocked);
        drop(permit);
        assert!(!gate.snapshot().locked);
        assert_eq!(
            gate.offer(&event("40111222", 3500)),
            Decision::Accept
        );
    }

    #[test]
    fn permit_explicit_complete_releases() {
        let gate = ScanGate::new(GateTuning::default());
        let permit = gate.acquire(&event("40111222", 0)).unwrap();
        permit.complete();
        assert!(!gate.snapshot().locked);
    }

    #[test]
    fn snapshot_reflects_accepted_scan() {
        let gate = ScanGate::new(GateTuning::default());
        assert!(gate.snapshot().last_accepted_at.is_none());
        assert_eq!(gate.offer(&event("40111222", 0)), Decision::Accept);
        let snapshot = gate.snapshot();
        assert!(snapshot.locked);
        assert_eq!(snapshot.last_accepted_payload.as_deref(), Some("40111222"));
        assert_eq!(snapshot.last_accepted_at, Some(at(0)));
    }
}
