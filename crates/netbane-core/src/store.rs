// ── Staged fact stores ──
//
// Pure per-device storage with presence tracking: no network or parsing
// logic lives here. `RawStore` keeps unmodified command output, keyed by
// fact class; `ParsedStore` keeps the structured-but-vendor-shaped results
// of the parse stage. Normalization reads from the parsed store and never
// mutates it.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use netbane_session::{ConfigTree, ParsedRecord};

/// A named category of device state, fetched and normalized independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FactClass {
    RunningConfig,
    SystemFacts,
    LiveInterfaceFacts,
    VlanFacts,
}

impl FactClass {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RunningConfig => "running_config",
            Self::SystemFacts => "system_facts",
            Self::LiveInterfaceFacts => "live_interface_facts",
            Self::VlanFacts => "vlan_facts",
        }
    }
}

impl fmt::Display for FactClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Raw store ────────────────────────────────────────────────────────

/// One raw fetch result: untouched command output plus when it was taken.
#[derive(Debug, Clone)]
pub struct RawEntry {
    pub text: String,
    pub fetched_at: DateTime<Utc>,
}

/// Unmodified command output per fact class.
#[derive(Debug, Default)]
pub struct RawStore {
    entries: HashMap<FactClass, RawEntry>,
}

impl RawStore {
    pub fn set(&mut self, fact: FactClass, text: String) {
        self.entries.insert(
            fact,
            RawEntry {
                text,
                fetched_at: Utc::now(),
            },
        );
    }

    pub fn get(&self, fact: FactClass) -> Option<&RawEntry> {
        self.entries.get(&fact)
    }

    pub fn is_fetched(&self, fact: FactClass) -> bool {
        self.entries.contains_key(&fact)
    }
}

// ── Parsed store ─────────────────────────────────────────────────────

/// Whatever shape the parse stage produced for one fact class.
#[derive(Clone)]
pub enum ParsedPayload {
    /// A singleton record (e.g. system facts).
    Record(ParsedRecord),
    /// A record list (e.g. live interface facts, vlans).
    Records(Vec<ParsedRecord>),
    /// A navigable config tree.
    Config(Arc<dyn ConfigTree>),
}

impl fmt::Debug for ParsedPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Record(r) => f.debug_tuple("Record").field(r).finish(),
            Self::Records(rs) => f.debug_tuple("Records").field(&rs.len()).finish(),
            Self::Config(_) => f.write_str("Config(..)"),
        }
    }
}

/// Structured, still vendor-shaped records per fact class.
#[derive(Debug, Default)]
pub struct ParsedStore {
    entries: HashMap<FactClass, ParsedPayload>,
}

impl ParsedStore {
    pub fn set(&mut self, fact: FactClass, payload: ParsedPayload) {
        self.entries.insert(fact, payload);
    }

    pub fn get(&self, fact: FactClass) -> Option<&ParsedPayload> {
        self.entries.get(&fact)
    }

    pub fn is_fetched(&self, fact: FactClass) -> bool {
        self.entries.contains_key(&fact)
    }

    pub fn record(&self, fact: FactClass) -> Option<&ParsedRecord> {
        match self.entries.get(&fact)? {
            ParsedPayload::Record(r) => Some(r),
            _ => None,
        }
    }

    pub fn records(&self, fact: FactClass) -> Option<&[ParsedRecord]> {
        match self.entries.get(&fact)? {
            ParsedPayload::Records(rs) => Some(rs),
            _ => None,
        }
    }

    pub fn config(&self, fact: FactClass) -> Option<&Arc<dyn ConfigTree>> {
        match self.entries.get(&fact)? {
            ParsedPayload::Config(tree) => Some(tree),
            _ => None,
        }
    }
}
