use serde::{Deserialize, Serialize};

/// Canonical VLAN facts (from a `show vlan`-class command).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VlanFacts {
    pub vlan_id: Option<u16>,
    pub name: Option<String>,
    pub status: Option<String>,
}

impl VlanFacts {
    /// Copy every field the patch supplied; keep existing values elsewhere.
    pub fn overlay(&mut self, patch: &Self) {
        if patch.vlan_id.is_some() {
            self.vlan_id = patch.vlan_id;
        }
        if patch.name.is_some() {
            self.name = patch.name.clone();
        }
        if patch.status.is_some() {
            self.status = patch.status.clone();
        }
    }
}
