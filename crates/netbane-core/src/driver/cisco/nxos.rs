// NX-OS driver.
//
// Live record shape (record-parser output for `show interface`):
// `interface`, `admin_state`, `link_status`, `address`, `mtu`,
// `description`. System record: `uptime`, `boot_image`.

use netbane_session::{ConfigTree, ParsedRecord};

use crate::driver::{parse_mtu, parse_uptime, state_is_up, VendorDriver};
use crate::error::CoreError;
use crate::model::{InterfaceFacts, SystemFacts, VlanFacts};
use crate::platform::Platform;
use crate::store::FactClass;

#[derive(Debug, Default, Clone, Copy)]
pub struct NxosDriver;

impl VendorDriver for NxosDriver {
    fn platform(&self) -> Platform {
        Platform::Nxos
    }

    fn command_for(&self, fact: FactClass) -> &'static str {
        match fact {
            FactClass::RunningConfig => "show running-config",
            FactClass::SystemFacts => "show version",
            FactClass::LiveInterfaceFacts => "show interface",
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
            image: record.get("boot_image").cloned(),
        })
    }

    fn normalize_live_interface_facts(
        &self,
        record: &ParsedRecord,
    ) -> Result<InterfaceFacts, CoreError> {
        Ok(InterfaceFacts {
            interface: record.get("interface").cloned(),
            description: record.get("description").cloned(),
            is_enabled: record.get("admin_state").map(|s| state_is_up(s)),
            is_up: record.get("link_status").map(|s| state_is_up(s)),
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
