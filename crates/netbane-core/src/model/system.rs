use serde::{Deserialize, Serialize};

/// Canonical system facts (from a `show version`-class command).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemFacts {
    /// Uptime in the vendor-native human format.
    pub uptime: Option<String>,
    /// Uptime converted to whole seconds.
    pub uptime_sec: Option<u64>,
    /// Boot image identifier.
    pub image: Option<String>,
}

impl SystemFacts {
    /// Copy every field the patch supplied; keep existing values elsewhere.
    pub fn overlay(&mut self, patch: &Self) {
        if patch.uptime.is_some() {
            self.uptime = patch.uptime.clone();
        }
        if patch.uptime_sec.is_some() {
            self.uptime_sec = patch.uptime_sec;
        }
        if patch.image.is_some() {
            self.image = patch.image.clone();
        }
    }
}
