// ── Device session ──
//
// Full lifecycle for one connected device: open/close, command
// serialization, and the staged fact pipeline
// (fetch raw -> parse -> normalize -> collate -> cache).
//
// Caching is per fact class through `tokio::sync::OnceCell`, which gives
// single-flight and idempotence by construction: concurrent getters for
// the same fact class coalesce into one device round-trip and all callers
// observe the same cached value. Errors are not cached; a later call may
// retry. Closing the session cancels in-flight fetches via the
// cancellation token instead of letting them hang.

use std::sync::Arc;

use netbane_session::{
    CliSession, ConfigParser, ConfigTree, ParsedRecord, RecordParser, SshCliSession,
};
use tokio::sync::{Mutex, OnceCell};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::DeviceConfig;
use crate::driver::{self, VendorDriver};
use crate::error::CoreError;
use crate::model::{InterfaceFacts, SystemFacts, VlanFacts};
use crate::platform::Platform;
use crate::store::{FactClass, ParsedPayload, ParsedStore, RawStore};

/// The external record and config parsers the pipeline consumes.
///
/// Both are opaque collaborators: the record parser turns raw command
/// output into vendor-shaped records (e.g. a TextFSM-template binding),
/// the config parser turns raw config text into a navigable tree.
#[derive(Clone)]
pub struct Parsers {
    pub records: Arc<dyn RecordParser>,
    pub config: Arc<dyn ConfigParser>,
}

/// One device session: exclusively owned connection, immutable driver
/// selection, staged stores, and memoized fact slots.
pub struct DeviceSession {
    config: DeviceConfig,
    driver: Box<dyn VendorDriver>,
    parsers: Parsers,
    conn: Mutex<Option<Box<dyn CliSession>>>,
    raw: Mutex<RawStore>,
    parsed: Mutex<ParsedStore>,
    system_facts: OnceCell<Arc<SystemFacts>>,
    interface_facts: OnceCell<Arc<Vec<InterfaceFacts>>>,
    vlan_facts: OnceCell<Arc<Vec<VlanFacts>>>,
    closed: CancellationToken,
}

impl DeviceSession {
    /// Create a session with the SSH-backed transport. Does NOT connect --
    /// call [`open()`](Self::open). Fails with
    /// [`CoreError::UnsupportedPlatform`] before any connection work when
    /// the platform tag has no driver.
    pub fn new(config: DeviceConfig, parsers: Parsers) -> Result<Self, CoreError> {
        let driver = driver::for_platform(config.platform)?;
        let transport = Box::new(SshCliSession::new(config.ssh_options()));
        Ok(Self::build(config, driver, transport, parsers))
    }

    /// Create a session over a caller-supplied transport.
    ///
    /// Use this to inject a custom `CliSession` (or a scripted mock in
    /// tests) in place of the SSH transport.
    pub fn with_session(
        config: DeviceConfig,
        session: Box<dyn CliSession>,
        parsers: Parsers,
    ) -> Result<Self, CoreError> {
        let driver = driver::for_platform(config.platform)?;
        Ok(Self::build(config, driver, session, parsers))
    }

    fn build(
        config: DeviceConfig,
        driver: Box<dyn VendorDriver>,
        session: Box<dyn CliSession>,
        parsers: Parsers,
    ) -> Self {
        Self {
            config,
            driver,
            parsers,
            conn: Mutex::new(Some(session)),
            raw: Mutex::new(RawStore::default()),
            parsed: Mutex::new(ParsedStore::default()),
            system_facts: OnceCell::new(),
            interface_facts: OnceCell::new(),
            vlan_facts: OnceCell::new(),
            closed: CancellationToken::new(),
        }
    }

    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    pub fn platform(&self) -> Platform {
        self.config.platform
    }

    // ── Connection lifecycle ─────────────────────────────────────────

    /// Open the connection.
    pub async fn open(&self) -> Result<(), CoreError> {
        let mut guard = self.conn.lock().await;
        let conn = guard.as_mut().ok_or(CoreError::ConnectionClosed)?;
        conn.open().await?;
        info!(host = %self.config.host, platform = %self.config.platform, "device session open");
        Ok(())
    }

    /// Close the connection. Idempotent. In-flight fetches fail with
    /// [`CoreError::ConnectionClosed`]; no further fetch is permitted.
    pub async fn close(&self) {
        self.closed.cancel();
        let mut guard = self.conn.lock().await;
        if let Some(mut conn) = guard.take() {
            if let Err(e) = conn.close().await {
                warn!(error = %e, "transport close failed (non-fatal)");
            }
            debug!(host = %self.config.host, "device session closed");
        }
    }

    /// Execute a raw command on the device and return its unmodified output.
    pub async fn cli(&self, command: &str) -> Result<String, CoreError> {
        self.command(command).await
    }

    /// One serialized command round-trip. The connection lock guarantees
    /// commands never pipeline on one session; the cancellation token
    /// turns a racing `close()` into `ConnectionClosed` instead of a hang.
    async fn command(&self, command: &str) -> Result<String, CoreError> {
        let mut guard = self.conn.lock().await;
        let conn = guard.as_mut().ok_or(CoreError::ConnectionClosed)?;

        debug!(%command, "dispatching command");
        tokio::select! {
            biased;
            () = self.closed.cancelled() => Err(CoreError::ConnectionClosed),
            result = conn.execute(command) => result.map_err(CoreError::from),
        }
    }

    // ── Fetch stages ─────────────────────────────────────────────────

    /// Fetch a fact-class command and run the record parser over its output.
    async fn parse_cli(&self, fact: FactClass) -> Result<Vec<ParsedRecord>, CoreError> {
        let command = self.driver.command_for(fact);
        let output = self.command(command).await?;
        let records = self
            .parsers
            .records
            .parse(self.config.platform.as_str(), command, &output);
        debug!(fact = %fact, records = records.len(), "parsed command output");
        self.raw.lock().await.set(fact, output);
        Ok(records)
    }

    async fn fetch_system_facts(&self) -> Result<ParsedRecord, CoreError> {
        let records = self.parse_cli(FactClass::SystemFacts).await?;
        let record = records.into_iter().next().ok_or_else(|| {
            CoreError::parse("system facts command produced no records".to_string())
        })?;
        self.parsed
            .lock()
            .await
            .set(FactClass::SystemFacts, ParsedPayload::Record(record.clone()));
        Ok(record)
    }

    async fn fetch_running_config(&self) -> Result<Arc<dyn ConfigTree>, CoreError> {
        let command = self.driver.command_for(FactClass::RunningConfig);
        let output = self.command(command).await?;
        let tree = self.parsers.config.parse(&output);
        self.raw.lock().await.set(FactClass::RunningConfig, output);
        self.parsed.lock().await.set(
            FactClass::RunningConfig,
            ParsedPayload::Config(Arc::clone(&tree)),
        );
        Ok(tree)
    }

    async fn fetch_live_interface_facts(&self) -> Result<Vec<ParsedRecord>, CoreError> {
        let records = self.parse_cli(FactClass::LiveInterfaceFacts).await?;
        self.parsed.lock().await.set(
            FactClass::LiveInterfaceFacts,
            ParsedPayload::Records(records.clone()),
        );
        Ok(records)
    }

    // ── Public fact getters ──────────────────────────────────────────

    /// Canonical system facts. Idempotent: the underlying command is
    /// issued at most once per session.
    pub async fn get_system_facts(&self) -> Result<Arc<SystemFacts>, CoreError> {
        self.system_facts
            .get_or_try_init(|| async {
                let record = self.fetch_system_facts().await?;
                let normalized = self.driver.normalize_system_facts(&record)?;
                let mut facts = SystemFacts::default();
                facts.overlay(&normalized);
                Ok(Arc::new(facts))
            })
            .await
            .cloned()
    }

    /// Canonical per-interface facts, merged from configuration and live
    /// state. Idempotent per session.
    pub async fn get_interface_facts(&self) -> Result<Arc<Vec<InterfaceFacts>>, CoreError> {
        self.interface_facts
            .get_or_try_init(|| async {
                let config_tree = self.fetch_running_config().await?;
                let live = self.fetch_live_interface_facts().await?;
                Ok(Arc::new(
                    self.collate_interface_facts(&live, config_tree.as_ref()),
                ))
            })
            .await
            .cloned()
    }

    /// Canonical vlan facts. Idempotent per session.
    pub async fn get_vlan_facts(&self) -> Result<Arc<Vec<VlanFacts>>, CoreError> {
        self.vlan_facts
            .get_or_try_init(|| async {
                let records = self.parse_cli(FactClass::VlanFacts).await?;
                self.parsed
                    .lock()
                    .await
                    .set(FactClass::VlanFacts, ParsedPayload::Records(records.clone()));

                let mut all = Vec::with_capacity(records.len());
                for record in &records {
                    match self.driver.normalize_vlan_facts(record) {
                        Ok(normalized) => {
                            let mut facts = VlanFacts::default();
                            facts.overlay(&normalized);
                            all.push(facts);
                        }
                        Err(e) => {
                            warn!(error = %e, "skipping vlan record that failed to normalize");
                        }
                    }
                }
                Ok(Arc::new(all))
            })
            .await
            .cloned()
    }

    // ── Collation ────────────────────────────────────────────────────

    /// Merge config-derived and live-derived fields into one record per
    /// interface. Entities are enumerated from the live list (the
    /// authoritative name source; config-only interfaces are not emitted).
    /// Overlay order is fixed: template, then config, then live -- live
    /// wins on conflicts. An entity that fails to normalize is skipped
    /// with a warning; it never aborts the others.
    fn collate_interface_facts(
        &self,
        live: &[ParsedRecord],
        config: &dyn ConfigTree,
    ) -> Vec<InterfaceFacts> {
        let name_key = self.driver.live_interface_name_key();
        let mut all = Vec::with_capacity(live.len());

        for record in live {
            let Some(name) = record.get(name_key) else {
                warn!(key = name_key, "live interface record without a name field (skipped)");
                continue;
            };

            let mut facts = InterfaceFacts::default();
            facts.overlay(&self.driver.normalize_config_interface_facts(name, config));
            match self.driver.normalize_live_interface_facts(record) {
                Ok(live_facts) => facts.overlay(&live_facts),
                Err(e) => {
                    warn!(interface = %name, error = %e, "skipping interface that failed to normalize");
                    continue;
                }
            }
            all.push(facts);
        }

        all
    }

    // ── Store introspection ──────────────────────────────────────────

    /// Whether the raw output for a fact class has been fetched.
    pub async fn is_fetched(&self, fact: FactClass) -> bool {
        self.raw.lock().await.is_fetched(fact)
    }

    /// The unmodified command output stored for a fact class, if fetched.
    pub async fn raw_text(&self, fact: FactClass) -> Option<String> {
        self.raw
            .lock()
            .await
            .get(fact)
            .map(|entry| entry.text.clone())
    }
}
