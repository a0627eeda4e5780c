// ── Vendor drivers ──
//
// One driver per device family encapsulates the command strings and the
// normalization logic that maps vendor-shaped records onto the canonical
// fact schema. Drivers are selected by platform tag through the registry
// below -- a tagged mapping, not a class hierarchy.

pub mod cisco;
mod uptime;

pub use uptime::parse_uptime;

use netbane_session::{ConfigTree, ParsedRecord};

use crate::error::CoreError;
use crate::model::{InterfaceFacts, SystemFacts, VlanFacts};
use crate::platform::Platform;
use crate::store::FactClass;

/// The polymorphic vendor unit: command strings plus normalize functions
/// for one device family. Implementations are pure -- they read parsed
/// records and produce canonical patches, never touching the network.
pub trait VendorDriver: Send + Sync {
    fn platform(&self) -> Platform;

    /// The vendor-specific command that produces this fact class.
    fn command_for(&self, fact: FactClass) -> &'static str;

    /// The field naming an interface in this family's live records
    /// (varies across vendors: `interface` vs `port` etc.).
    fn live_interface_name_key(&self) -> &'static str;

    /// Canonical system fields from the parsed `show version`-class record.
    fn normalize_system_facts(&self, record: &ParsedRecord) -> Result<SystemFacts, CoreError>;

    /// Canonical live fields from one parsed live-interface record.
    fn normalize_live_interface_facts(
        &self,
        record: &ParsedRecord,
    ) -> Result<InterfaceFacts, CoreError>;

    /// Canonical config-derived fields for the named interface, looked up
    /// in the parsed config tree. An interface absent from config yields
    /// an empty patch, never an error.
    fn normalize_config_interface_facts(
        &self,
        interface_name: &str,
        config: &dyn ConfigTree,
    ) -> InterfaceFacts;

    /// Canonical vlan fields from one parsed vlan record.
    fn normalize_vlan_facts(&self, record: &ParsedRecord) -> Result<VlanFacts, CoreError>;
}

/// Resolve the driver for a family tag.
///
/// `eos` and `junos` parse as valid tags but have no driver yet; they fail
/// here, before any connection work.
pub fn for_platform(platform: Platform) -> Result<Box<dyn VendorDriver>, CoreError> {
    match platform {
        Platform::Ios | Platform::IosXr => Ok(Box::new(cisco::IosDriver::new(platform))),
        Platform::Nxos => Ok(Box::new(cisco::NxosDriver)),
        Platform::Eos | Platform::Junos => Err(CoreError::UnsupportedPlatform {
            tag: platform.to_string(),
        }),
    }
}

// ── Shared coercions ─────────────────────────────────────────────────

/// Administrative/link state strings are compared case-insensitively
/// against `"up"`.
pub(crate) fn state_is_up(state: &str) -> bool {
    state.trim().eq_ignore_ascii_case("up")
}

/// Coerce an MTU field from text. Present-but-unparseable is a
/// [`CoreError::Parse`]; a missing field is the caller's `None`.
pub(crate) fn parse_mtu(value: &str) -> Result<u32, CoreError> {
    value
        .trim()
        .parse()
        .map_err(|_| CoreError::parse(format!("invalid mtu: {value:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_comparison_is_case_insensitive() {
        assert!(state_is_up("up"));
        assert!(state_is_up("Up"));
        assert!(state_is_up("UP"));
        assert!(!state_is_up("down"));
        assert!(!state_is_up("administratively down"));
    }

    #[test]
    fn mtu_coerces_from_text() {
        assert_eq!(parse_mtu("1500").unwrap(), 1500);
        assert_eq!(parse_mtu(" 9216 ").unwrap(), 9216);
        assert!(matches!(parse_mtu("jumbo"), Err(CoreError::Parse { .. })));
    }

    #[test]
    fn registry_rejects_families_without_a_driver() {
        assert!(for_platform(Platform::Nxos).is_ok());
        assert!(for_platform(Platform::Ios).is_ok());
        assert!(matches!(
            for_platform(Platform::Eos),
            Err(CoreError::UnsupportedPlatform { .. })
        ));
    }
}
