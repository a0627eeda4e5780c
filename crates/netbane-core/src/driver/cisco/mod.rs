// ── Cisco family drivers ──

mod ios;
mod nxos;

pub use ios::IosDriver;
pub use nxos::NxosDriver;

use std::sync::LazyLock;

use netbane_session::ConfigTree;
use regex::Regex;

use crate::model::InterfaceFacts;

static DESCRIPTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^description\s+(.+)$").expect("valid description regex"));
static SWITCHPORT_MODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^switchport mode\s+(\S+)$").expect("valid mode regex"));

/// First capture group of `re` across the block's lines, if any line matches.
fn first_capture(block: &[String], re: &Regex) -> Option<String> {
    block.iter().find_map(|line| {
        re.captures(line.trim())
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    })
}

/// Config-derived interface fields shared by the Cisco families:
/// `description` and switchport `mode` out of the `interface <name>` block.
/// An interface with no config block yields an empty patch.
pub(crate) fn config_interface_facts(
    interface_name: &str,
    config: &dyn ConfigTree,
) -> InterfaceFacts {
    let Some(block) = config.block(&format!("interface {interface_name}")) else {
        return InterfaceFacts::default();
    };

    InterfaceFacts {
        interface: Some(interface_name.to_string()),
        description: first_capture(&block, &DESCRIPTION),
        mode: first_capture(&block, &SWITCHPORT_MODE),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use netbane_session::{ConfigParser, IndentConfigParser};

    const CONFIG: &str = "\
interface Ethernet1/1
  description peer link to sw2
  switchport mode trunk
interface Ethernet1/2
  no switchport
";

    #[test]
    fn extracts_description_and_mode_from_the_interface_block() {
        let tree = IndentConfigParser.parse(CONFIG);
        let facts = config_interface_facts("Ethernet1/1", tree.as_ref());
        assert_eq!(facts.interface.as_deref(), Some("Ethernet1/1"));
        assert_eq!(facts.description.as_deref(), Some("peer link to sw2"));
        assert_eq!(facts.mode.as_deref(), Some("trunk"));
    }

    #[test]
    fn interface_without_matching_lines_yields_partial_patch() {
        let tree = IndentConfigParser.parse(CONFIG);
        let facts = config_interface_facts("Ethernet1/2", tree.as_ref());
        assert_eq!(facts.interface.as_deref(), Some("Ethernet1/2"));
        assert_eq!(facts.description, None);
        assert_eq!(facts.mode, None);
    }

    #[test]
    fn interface_missing_from_config_yields_empty_patch() {
        let tree = IndentConfigParser.parse(CONFIG);
        let facts = config_interface_facts("Ethernet1/9", tree.as_ref());
        assert_eq!(facts, InterfaceFacts::default());
    }
}
