pub mod config;
pub mod error;
pub mod gate;
pub mod intake;
pub mod lookup;
pub mod sessions;
pub mod validation;

pub mod types;

pub use crate::error::{LookupError, ScanError, SessionError, ValidationError};
pub use crate::gate::{Decision, GateState, GateTuning, ScanGate, ScanPermit};
pub use crate::intake::{process_scan, ScanDisposition};
pub use crate::lookup::{LookupOutcome, LookupService};
pub use crate::sessions::{ScanSession, SessionRegistry};
pub use crate::validation::ScanPayload;
