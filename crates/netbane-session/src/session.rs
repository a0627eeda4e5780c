// ── Session Adapter contract ──
//
// The narrow interface through which the fact pipeline reaches a device.
// Object-safe so `netbane-core` can hold `Box<dyn CliSession>` and tests
// can inject scripted mocks in place of a live transport.

use async_trait::async_trait;

use crate::error::SessionError;

/// A connected (or connectable) CLI session against one network device.
///
/// Implementations own the underlying connection exclusively. Commands on
/// one session must complete (or time out) before the next is issued --
/// callers are responsible for serializing access; implementations are not
/// required to support pipelining.
#[async_trait]
pub trait CliSession: Send {
    /// Open the connection. Fails with [`SessionError::ConnectionFailed`].
    async fn open(&mut self) -> Result<(), SessionError>;

    /// Close the connection. Idempotent: closing a closed session is a no-op.
    async fn close(&mut self) -> Result<(), SessionError>;

    /// Execute a command and return its raw text output.
    ///
    /// Fails with [`SessionError::Command`] on a device-side error,
    /// [`SessionError::Timeout`] when the operation timeout elapses, and
    /// [`SessionError::Closed`] when the session is not open.
    async fn execute(&mut self, command: &str) -> Result<String, SessionError>;
}
