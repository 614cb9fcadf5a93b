use crate::error::SessionError;
use crate::gate::{GateTuning, ScanGate};
use crate::types::ids::SessionId;
use crate::types::io::SessionView;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// One scanning surface: a gate plus identity. Gate state lives and dies
/// with the session and is never shared across sessions.
#[derive(Debug)]
pub struct ScanSession {
    id: SessionId,
    gate: ScanGate,
    created_at: DateTime<Utc>,
}

impl ScanSession {
    pub fn open(tuning: GateTuning) -> Self {
        Self {
            id: SessionId::generate(),
            gate: ScanGate::new(tuning),
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn gate(&self) -> &ScanGate {
        &self.gate
    }

    pub fn view(&self) -> SessionView {
        let snapshot = self.gate.snapshot();
        SessionView {
            id: self.id.as_str().to_string(),
            created_at: self.created_at,
            locked: snapshot.locked,
            last_accepted_at: snapshot.last_accepted_at,
        }
    }
}

/// In-memory registry of active sessions. Nothing here persists; closing a
/// session destroys its gate state.
#[derive(Default)]
pub struct SessionRegistry {
    inner: Mutex<HashMap<SessionId, Arc<ScanSession>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<SessionId, Arc<ScanSession>>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn open(&self, tuning: GateTuning) -> Arc<ScanSession> {
        let session = Arc::new(ScanSession::open(tuning));
        self.lock().insert(session.id.clone(), Arc::clone(&session));
        session
    }

    pub fn get(&self, id: &SessionId) -> Result<Arc<ScanSession>, SessionError> {
        self.lock().get(id).cloned().ok_or(SessionError::NotFound)
    }

    pub fn close(&self, id: &SessionId) -> Result<(), SessionError> {
        self.lock().remove(id).map(|_| ()).ok_or(SessionError::NotFound)
    }
}
