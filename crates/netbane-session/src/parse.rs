// ── External parser contracts ──
//
// The fact pipeline never embeds vendor command-output grammars. Raw CLI
// text is turned into structured records by a `RecordParser` supplied by
// the caller (e.g. a TextFSM-template binding), and raw config text is
// turned into a navigable tree by a `ConfigParser`. Both are consumed
// through the narrow traits below.
//
// `IndentConfigParser` is the provided config-tree implementation: its
// grammar is structural (indentation), not vendor command output, so it
// ships in-tree.

use std::sync::Arc;

use indexmap::IndexMap;

/// One structured, still vendor-shaped record: ordered key/value pairs
/// exactly as the record parser produced them.
pub type ParsedRecord = IndexMap<String, String>;

/// Turns raw command output into structured records.
///
/// Total over arbitrary input: output that matches no template yields an
/// empty record list, never an error or a panic.
pub trait RecordParser: Send + Sync {
    fn parse(&self, platform: &str, command: &str, raw: &str) -> Vec<ParsedRecord>;
}

/// A navigable view over parsed configuration text.
pub trait ConfigTree: Send + Sync {
    /// The child lines (trimmed) of the top-level block with this exact
    /// heading, e.g. `"interface GigabitEthernet0/1"`. `None` if the block
    /// does not exist.
    fn block(&self, heading: &str) -> Option<Vec<String>>;

    /// All top-level block headings starting with `prefix`, in file order.
    fn headings(&self, prefix: &str) -> Vec<String>;
}

/// Turns raw configuration text into a [`ConfigTree`].
pub trait ConfigParser: Send + Sync {
    fn parse(&self, text: &str) -> Arc<dyn ConfigTree>;
}

// ── Provided implementation: indentation-based blocks ────────────────

/// Config parser for indentation-structured configs (the common shape of
/// `show running-config` output): an unindented line opens a block, the
/// indented lines that follow are its body.
#[derive(Debug, Default, Clone, Copy)]
pub struct IndentConfigParser;

/// Tree produced by [`IndentConfigParser`].
pub struct IndentConfigTree {
    blocks: Vec<(String, Vec<String>)>,
}

impl ConfigParser for IndentConfigParser {
    fn parse(&self, text: &str) -> Arc<dyn ConfigTree> {
        let mut blocks: Vec<(String, Vec<String>)> = Vec::new();

        for line in text.lines() {
            let trimmed = line.trim_end();
            if trimmed.trim_start().is_empty() {
                continue;
            }
            // Comment/separator lines ("!" in Cisco configs, "#" elsewhere)
            // neither open nor extend a block.
            let first = trimmed.trim_start().chars().next();
            if matches!(first, Some('!') | Some('#')) {
                continue;
            }

            if trimmed.starts_with(char::is_whitespace) {
                if let Some((_, body)) = blocks.last_mut() {
                    body.push(trimmed.trim().to_string());
                }
            } else {
                blocks.push((trimmed.to_string(), Vec::new()));
            }
        }

        Arc::new(IndentConfigTree { blocks })
    }
}

impl ConfigTree for IndentConfigTree {
    fn block(&self, heading: &str) -> Option<Vec<String>> {
        self.blocks
            .iter()
            .find(|(h, _)| h == heading)
            .map(|(_, body)| body.clone())
    }

    fn headings(&self, prefix: &str) -> Vec<String> {
        self.blocks
            .iter()
            .filter(|(h, _)| h.starts_with(prefix))
            .map(|(h, _)| h.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const CONFIG: &str = "\
hostname sw1
!
interface GigabitEthernet0/1
 description uplink to core
 switchport mode trunk
 mtu 9216
!
interface GigabitEthernet0/2
 shutdown
!
line vty 0 4
 transport input ssh
";

    #[test]
    fn block_lookup_returns_trimmed_body() {
        let tree = IndentConfigParser.parse(CONFIG);
        let body = tree.block("interface GigabitEthernet0/1").unwrap();
        assert_eq!(
            body,
            vec![
                "description uplink to core".to_string(),
                "switchport mode trunk".to_string(),
                "mtu 9216".to_string(),
            ]
        );
    }

    #[test]
    fn missing_block_is_none() {
        let tree = IndentConfigParser.parse(CONFIG);
        assert_eq!(tree.block("interface GigabitEthernet0/9"), None);
    }

    #[test]
    fn headings_filters_by_prefix_in_file_order() {
        let tree = IndentConfigParser.parse(CONFIG);
        assert_eq!(
            tree.headings("interface "),
            vec![
                "interface GigabitEthernet0/1".to_string(),
                "interface GigabitEthernet0/2".to_string(),
            ]
        );
    }

    #[test]
    fn comment_lines_are_ignored() {
        let tree = IndentConfigParser.parse("! header\nhostname sw1\n! trailer\n");
        assert_eq!(tree.block("hostname sw1"), Some(vec![]));
        assert_eq!(tree.headings("!"), Vec::<String>::new());
    }
}
