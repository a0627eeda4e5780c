use serde::{Deserialize, Serialize};

/// Canonical per-interface facts, merged from live state and configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceFacts {
    /// Canonical interface name -- the join key across sources.
    pub interface: Option<String>,
    pub description: Option<String>,
    /// Administrative state.
    pub is_enabled: Option<bool>,
    /// Link/protocol state.
    pub is_up: Option<bool>,
    /// Hardware address, colon/dot-delimited per vendor convention
    /// (not renormalized across vendors).
    pub mac: Option<String>,
    pub mtu: Option<u32>,
    /// Switchport mode; sourced from config facts only.
    pub mode: Option<String>,
}

impl InterfaceFacts {
    /// Copy every field the patch supplied; keep existing values elsewhere.
    pub fn overlay(&mut self, patch: &Self) {
        if patch.interface.is_some() {
            self.interface = patch.interface.clone();
        }
        if patch.description.is_some() {
            self.description = patch.description.clone();
        }
        if patch.is_enabled.is_some() {
            self.is_enabled = patch.is_enabled;
        }
        if patch.is_up.is_some() {
            self.is_up = patch.is_up;
        }
        if patch.mac.is_some() {
            self.mac = patch.mac.clone();
        }
        if patch.mtu.is_some() {
            self.mtu = patch.mtu;
        }
        if patch.mode.is_some() {
            self.mode = patch.mode.clone();
        }
    }
}
