use thiserror::Error;

/// Payload-shape failures. These belong to the caller of the gate, never to
/// the gate itself; the gate stays shape-agnostic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("payload too short: {len} chars")]
    TooShort { len: usize },
    #[error("payload too long: {len} chars")]
    TooLong { len: usize },
    #[error("payload contains non-printable or non-ascii characters")]
    NotAscii,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("lookup service unavailable")]
    Unavailable,
    #[error("lookup timed out")]
    Timeout,
    #[error("lookup backend error: {reason}")]
    Backend { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("session not found")]
    NotFound,
    #[error("invalid session id: {message}")]
    InvalidId { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Lookup(#[from] LookupError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("internal error: {message}")]
    Internal { message: String },
}
