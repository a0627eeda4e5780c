// ── Core error types ──
//
// User-facing errors from netbane-core. Transport-layer failures propagate
// unmodified in meaning: the `From<SessionError>` impl translates them into
// domain variants without swallowing anything. A missing entity (interface
// in one source but not the other) is never an error -- it surfaces as
// absent fields in the collated record.

use netbane_session::SessionError;
use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to device: {reason}")]
    Connection { reason: String },

    #[error("Session closed")]
    ConnectionClosed,

    #[error("Command timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Command errors ───────────────────────────────────────────────
    #[error("Command rejected by device: {message}")]
    Command { message: String },

    // ── Construction errors ──────────────────────────────────────────
    #[error("Unsupported platform tag: {tag}")]
    UnsupportedPlatform { tag: String },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Parse error: {message}")]
    Parse { message: String },
}

impl CoreError {
    pub(crate) fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<SessionError> for CoreError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::ConnectionFailed { reason } => CoreError::Connection { reason },
            SessionError::Closed => CoreError::ConnectionClosed,
            SessionError::Command { message } => CoreError::Command { message },
            SessionError::Timeout { timeout_secs } => CoreError::Timeout { timeout_secs },
        }
    }
}
