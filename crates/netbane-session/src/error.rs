use thiserror::Error;

/// Transport-level error type for the `netbane-session` crate.
///
/// Covers every failure mode of a CLI session: connecting, executing
/// commands, and timeouts. `netbane-core` maps these into user-facing
/// diagnostics.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Opening the connection failed (TCP, handshake, host key, or auth).
    #[error("Connection failed: {reason}")]
    ConnectionFailed { reason: String },

    /// Operation attempted on a session that is not open.
    #[error("Session is closed")]
    Closed,

    /// The device rejected or errored on a command.
    #[error("Command failed on device: {message}")]
    Command { message: String },

    /// Command execution exceeded the configured operation timeout.
    #[error("Command timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },
}

impl SessionError {
    /// Returns `true` if this is a transient error worth retrying
    /// (retry policy belongs to the caller, never this crate).
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Timeout { .. } | Self::ConnectionFailed { .. }
        )
    }
}
