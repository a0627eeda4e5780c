// ── Device connection configuration ──
//
// Describes *how* to reach one device. Carries credentials and timeout
// tuning, never touches disk itself (the optional ssh_config_file is read
// by the transport at open time).

use std::path::PathBuf;
use std::time::Duration;

use netbane_session::SshOptions;
use secrecy::SecretString;

use crate::platform::Platform;

pub const DEFAULT_SSH_PORT: u16 = 22;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for connecting to a single device.
#[derive(Debug, Clone)]
pub struct DeviceConfig {
    /// Hostname or address.
    pub host: String,
    /// SSH port (defaults to 22).
    pub port: u16,
    pub username: String,
    pub password: SecretString,
    /// Vendor family tag selecting the driver.
    pub platform: Platform,
    /// Optional OpenSSH client config for HostName/Port/User overrides.
    pub ssh_config_file: Option<PathBuf>,
    /// Verify the server host key against known_hosts (default false).
    pub auth_strict_key: bool,
    /// Fallback for the three specific timeouts below (default 30s).
    pub default_timeout: Duration,
    /// Per-command execution timeout; defaults to `default_timeout`.
    pub ops_timeout: Option<Duration>,
    /// TCP connect timeout; defaults to `default_timeout`.
    pub socket_timeout: Option<Duration>,
    /// SSH handshake/transport timeout; defaults to `default_timeout`.
    pub transport_timeout: Option<Duration>,
}

impl DeviceConfig {
    pub fn new(
        host: impl Into<String>,
        username: impl Into<String>,
        password: SecretString,
        platform: Platform,
    ) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_SSH_PORT,
            username: username.into(),
            password,
            platform,
            ssh_config_file: None,
            auth_strict_key: false,
            default_timeout: DEFAULT_TIMEOUT,
            ops_timeout: None,
            socket_timeout: None,
            transport_timeout: None,
        }
    }

    /// Effective per-command timeout.
    pub fn effective_ops_timeout(&self) -> Duration {
        self.ops_timeout.unwrap_or(self.default_timeout)
    }

    /// Effective TCP connect timeout.
    pub fn effective_socket_timeout(&self) -> Duration {
        self.socket_timeout.unwrap_or(self.default_timeout)
    }

    /// Effective transport/handshake timeout.
    pub fn effective_transport_timeout(&self) -> Duration {
        self.transport_timeout.unwrap_or(self.default_timeout)
    }

    /// Build transport options for the SSH-backed session.
    pub(crate) fn ssh_options(&self) -> SshOptions {
        SshOptions {
            host: self.host.clone(),
            port: self.port,
            username: self.username.clone(),
            password: self.password.clone(),
            auth_strict_key: self.auth_strict_key,
            ssh_config_file: self.ssh_config_file.clone(),
            socket_timeout: self.effective_socket_timeout(),
            transport_timeout: self.effective_transport_timeout(),
            ops_timeout: self.effective_ops_timeout(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn specific_timeouts_default_to_the_shared_default() {
        let mut cfg = DeviceConfig::new(
            "sw1",
            "admin",
            SecretString::from("secret".to_string()),
            Platform::Nxos,
        );
        cfg.default_timeout = Duration::from_secs(60);
        assert_eq!(cfg.effective_ops_timeout(), Duration::from_secs(60));
        assert_eq!(cfg.effective_socket_timeout(), Duration::from_secs(60));

        cfg.ops_timeout = Some(Duration::from_secs(5));
        assert_eq!(cfg.effective_ops_timeout(), Duration::from_secs(5));
        assert_eq!(cfg.effective_transport_timeout(), Duration::from_secs(60));
    }
}
