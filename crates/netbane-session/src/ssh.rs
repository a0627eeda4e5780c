// ── SSH-backed CLI session ──
//
// `ssh2` is a blocking library; every operation on the underlying session
// runs inside `tokio::task::spawn_blocking` with the session behind an
// `Arc<Mutex<_>>`. The operation timeout is enforced here with
// `tokio::time::timeout`; a timed-out command leaves the blocking task to
// drain in the background.

use std::io::Read;
use std::net::{TcpStream, ToSocketAddrs};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use ssh2::{CheckResult, KnownHostFileKind};
use tracing::{debug, warn};

use crate::error::SessionError;
use crate::session::CliSession;
use crate::ssh_config;

/// Connection parameters for [`SshCliSession`].
#[derive(Debug, Clone)]
pub struct SshOptions {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: SecretString,
    /// Verify the server host key against `~/.ssh/known_hosts`.
    pub auth_strict_key: bool,
    /// Optional OpenSSH client config consulted for HostName/Port/User
    /// overrides of the target host.
    pub ssh_config_file: Option<PathBuf>,
    /// TCP connect timeout.
    pub socket_timeout: Duration,
    /// SSH handshake / blocking transport operation timeout.
    pub transport_timeout: Duration,
    /// Per-command execution timeout.
    pub ops_timeout: Duration,
}

/// [`CliSession`] implementation over an SSH exec channel.
pub struct SshCliSession {
    opts: SshOptions,
    session: Option<Arc<Mutex<ssh2::Session>>>,
}

/// Resolved connection target after ssh_config overrides.
struct Target {
    host: String,
    port: u16,
    username: String,
}

impl SshCliSession {
    pub fn new(opts: SshOptions) -> Self {
        Self {
            opts,
            session: None,
        }
    }

    /// Apply ssh_config_file overrides to the configured target.
    fn resolve_target(&self) -> Target {
        let mut target = Target {
            host: self.opts.host.clone(),
            port: self.opts.port,
            username: self.opts.username.clone(),
        };

        if let Some(ref path) = self.opts.ssh_config_file {
            match ssh_config::load_overrides(path, &self.opts.host) {
                Ok(ov) => {
                    if let Some(hostname) = ov.hostname {
                        target.host = hostname;
                    }
                    if let Some(port) = ov.port {
                        target.port = port;
                    }
                    if let Some(user) = ov.user {
                        target.username = user;
                    }
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to read ssh config (ignored)");
                }
            }
        }

        target
    }
}

#[async_trait]
impl CliSession for SshCliSession {
    async fn open(&mut self) -> Result<(), SessionError> {
        if self.session.is_some() {
            return Ok(());
        }

        let target = self.resolve_target();
        let password = self.opts.password.expose_secret().to_string();
        let strict = self.opts.auth_strict_key;
        let socket_timeout = self.opts.socket_timeout;
        let transport_timeout = self.opts.transport_timeout;

        debug!(host = %target.host, port = target.port, "opening ssh session");

        let session = tokio::task::spawn_blocking(move || {
            connect_blocking(&target, &password, strict, socket_timeout, transport_timeout)
        })
        .await
        .map_err(|e| SessionError::ConnectionFailed {
            reason: format!("connect task failed: {e}"),
        })??;

        self.session = Some(Arc::new(Mutex::new(session)));
        debug!("ssh session open");
        Ok(())
    }

    async fn close(&mut self) -> Result<(), SessionError> {
        if let Some(session) = self.session.take() {
            let _ = tokio::task::spawn_blocking(move || {
                if let Ok(sess) = session.lock() {
                    let _ = sess.disconnect(None, "closed by client", None);
                }
            })
            .await;
            debug!("ssh session closed");
        }
        Ok(())
    }

    async fn execute(&mut self, command: &str) -> Result<String, SessionError> {
        let session = self.session.clone().ok_or(SessionError::Closed)?;
        let command = command.to_string();
        let ops_timeout = self.opts.ops_timeout;

        debug!(%command, "executing command");

        let task = tokio::task::spawn_blocking(move || exec_blocking(&session, &command));

        match tokio::time::timeout(ops_timeout, task).await {
            Err(_) => Err(SessionError::Timeout {
                timeout_secs: ops_timeout.as_secs(),
            }),
            Ok(joined) => joined.map_err(|e| SessionError::Command {
                message: format!("exec task failed: {e}"),
            })?,
        }
    }
}

// ── Blocking internals ───────────────────────────────────────────────

fn connect_blocking(
    target: &Target,
    password: &str,
    strict: bool,
    socket_timeout: Duration,
    transport_timeout: Duration,
) -> Result<ssh2::Session, SessionError> {
    let addr = (target.host.as_str(), target.port)
        .to_socket_addrs()
        .map_err(|e| connection_failed(format!("resolving {}: {e}", target.host)))?
        .next()
        .ok_or_else(|| connection_failed(format!("no address for {}", target.host)))?;

    let tcp = TcpStream::connect_timeout(&addr, socket_timeout)
        .map_err(|e| connection_failed(format!("tcp connect: {e}")))?;

    let mut session =
        ssh2::Session::new().map_err(|e| connection_failed(format!("session init: {e}")))?;
    session.set_tcp_stream(tcp);
    session.set_timeout(u32::try_from(transport_timeout.as_millis()).unwrap_or(u32::MAX));
    session
        .handshake()
        .map_err(|e| connection_failed(format!("handshake: {e}")))?;

    if strict {
        verify_host_key(&session, &target.host, target.port)?;
    }

    session
        .userauth_password(&target.username, password)
        .map_err(|e| connection_failed(format!("authentication: {e}")))?;
    if !session.authenticated() {
        return Err(connection_failed("authentication rejected".to_string()));
    }

    Ok(session)
}

/// Check the server key against `~/.ssh/known_hosts`. Unknown or
/// mismatched keys fail the connection.
fn verify_host_key(session: &ssh2::Session, host: &str, port: u16) -> Result<(), SessionError> {
    let mut known = session
        .known_hosts()
        .map_err(|e| connection_failed(format!("known_hosts init: {e}")))?;

    let path = std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(".ssh").join("known_hosts"))
        .ok_or_else(|| connection_failed("HOME not set; cannot locate known_hosts".into()))?;
    known
        .read_file(&path, KnownHostFileKind::OpenSSH)
        .map_err(|e| connection_failed(format!("reading {}: {e}", path.display())))?;

    let (key, _) = session
        .host_key()
        .ok_or_else(|| connection_failed("server offered no host key".into()))?;

    match known.check_port(host, port, key) {
        CheckResult::Match => Ok(()),
        CheckResult::NotFound => Err(connection_failed(format!(
            "host key for {host} not found in known_hosts"
        ))),
        CheckResult::Mismatch => Err(connection_failed(format!(
            "host key mismatch for {host}"
        ))),
        CheckResult::Failure => Err(connection_failed("host key check failed".into())),
    }
}

fn exec_blocking(
    session: &Arc<Mutex<ssh2::Session>>,
    command: &str,
) -> Result<String, SessionError> {
    let sess = session
        .lock()
        .map_err(|_| connection_failed("session lock poisoned".into()))?;

    let mut channel = sess.channel_session().map_err(|e| SessionError::Command {
        message: format!("channel open: {e}"),
    })?;
    channel.exec(command).map_err(|e| SessionError::Command {
        message: format!("exec: {e}"),
    })?;

    let mut output = String::new();
    channel
        .read_to_string(&mut output)
        .map_err(|e| SessionError::Command {
            message: format!("reading output: {e}"),
        })?;

    let mut stderr = String::new();
    let _ = channel.stderr().read_to_string(&mut stderr);
    let _ = channel.wait_close();

    let status = channel.exit_status().unwrap_or(0);
    if status != 0 {
        return Err(SessionError::Command {
            message: format!(
                "exit status {status}: {}",
                if stderr.trim().is_empty() {
                    output.trim()
                } else {
                    stderr.trim()
                }
            ),
        });
    }

    Ok(output)
}

fn connection_failed(reason: String) -> SessionError {
    SessionError::ConnectionFailed { reason }
}
