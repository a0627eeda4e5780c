// IOS / IOS-XR driver.
//
// Live record shape (record-parser output for `show interfaces`):
// `interface`, `link_status` ("up" / "down" / "administratively down"),
// `protocol_status`, `address`, `mtu`, `description`. System record:
// `uptime`, `running_image`. IOS folds the administrative state into
// `link_status`, so `is_enabled` is derived from the absence of
// "administratively down" rather than a dedicated field.

use netbane_session::{ConfigTree, ParsedRecord};

use crate::driver::{parse_mtu, parse_uptime, state_is_up, VendorDriver};
use crate::error::CoreError;
use crate::model::{InterfaceFacts, SystemFacts, VlanFacts};
use crate::platform::Platform;
use crate::store::FactClass;

#[derive(Debug, Clone, Copy)]
pub struct IosDriver {
    platform: Platform,
}

impl IosDriver {
    /// `platform` is `Ios` or `IosXr`; both share this fact shape.
    pub fn new(platform: Platform) -> Self {
        Self { platform }
    }
}

impl VendorDriver for IosDriver {
    fn platform(&self) -> Platform {
        self.platform
    }

    fn command_for(&self, fact: FactClass) -> &'static str {
        match fact {
            FactClass::RunningConfig => "show running-config",
            FactClass::SystemFacts => "show version",
            FactClass::LiveInterfaceFacts => "show interfaces",
            FactClass::VlanFacts => "show vlan",
        }
    }

    fn live_interface_name_key(&self) -> &'static str {
        "interface"
    }

    fn normalize_system_facts(&self, record: &ParsedRecord) -> Result<SystemFacts, CoreError> {
        let uptime = record.get("uptime").cloned();
        let uptime_sec = match uptime.as_deref() {
            Some(raw) => Some(parse_uptime(raw)?),
            None => None,
        };

        Ok(SystemFacts {
            uptime,
            uptime_sec,
            image: record.get("running_image").cloned(),
        })
    }

    fn normalize_live_interface_facts(
        &self,
        record: &ParsedRecord,
    ) -> Result<InterfaceFacts, CoreError> {
        let is_enabled = record
            .get("link_status")
            .map(|s| !s.to_ascii_lowercase().contains("administratively down"));

        Ok(InterfaceFacts {
            interface: record.get("interface").cloned(),
            description: record.get("description").cloned(),
            is_enabled,
            is_up: record.get("protocol_status").map(|s| state_is_up(s)),
            mac: record.get("address").cloned(),
            mtu: record.get("mtu").map(|s| parse_mtu(s)).transpose()?,
            // mode comes from config facts, never from live state
            mode: None,
        })
    }

    fn normalize_config_interface_facts(
        &self,
        interface_name: &str,
        config: &dyn ConfigTree,
    ) -> InterfaceFacts {
        super::config_interface_facts(interface_name, config)
    }

    fn normalize_vlan_facts(&self, record: &ParsedRecord) -> Result<VlanFacts, CoreError> {
        let vlan_id = record
            .get("vlan_id")
            .map(|raw| {
                raw.trim()
                    .parse()
                    .map_err(|_| CoreError::parse(format!("invalid vlan id: {raw:?}")))
            })
            .transpose()?;

        Ok(VlanFacts {
            vlan_id,
            name: record.get("name").cloned(),
            status: record.get("status").cloned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(pairs: &[(&str, &str)]) -> ParsedRecord {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn admin_down_is_disabled_but_not_an_error() {
        let parsed = record(&[
            ("interface", "GigabitEthernet0/2"),
            ("link_status", "administratively down"),
            ("protocol_status", "down"),
            ("mtu", "1500"),
        ]);
        let facts = IosDriver::new(Platform::Ios)
            .normalize_live_interface_facts(&parsed)
            .unwrap();
        assert_eq!(facts.is_enabled, Some(false));
        assert_eq!(facts.is_up, Some(false));
    }

    #[test]
    fn up_up_interface_is_enabled_and_up() {
        let parsed = record(&[
            ("interface", "GigabitEthernet0/1"),
            ("link_status", "up"),
            ("protocol_status", "up"),
            ("address", "0011.2233.4455"),
            ("mtu", "1500"),
            ("description", "uplink"),
        ]);
        let facts = IosDriver::new(Platform::Ios)
            .normalize_live_interface_facts(&parsed)
            .unwrap();
        assert_eq!(facts.is_enabled, Some(true));
        assert_eq!(facts.is_up, Some(true));
        assert_eq!(facts.mac.as_deref(), Some("0011.2233.4455"));
    }

    #[test]
    fn system_facts_use_the_running_image() {
        let parsed = record(&[
            ("uptime", "1 week, 2 days"),
            ("running_image", "flash:cat9k_iosxe.bin"),
        ]);
        let facts = IosDriver::new(Platform::IosXr)
            .normalize_system_facts(&parsed)
            .unwrap();
        assert_eq!(facts.uptime_sec, Some(604_800 + 2 * 86_400));
        assert_eq!(facts.image.as_deref(), Some("flash:cat9k_iosxe.bin"));
    }
}
