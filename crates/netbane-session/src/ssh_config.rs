// OpenSSH client-config lookup.
//
// When `SshOptions::ssh_config_file` is set we honor `HostName`, `Port`,
// and `User` overrides for the target host. Only exact host tokens and the
// `*` catch-all are matched; per OpenSSH semantics the first obtained value
// for each keyword wins.

use std::path::Path;

#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct HostOverrides {
    pub(crate) hostname: Option<String>,
    pub(crate) port: Option<u16>,
    pub(crate) user: Option<String>,
}

pub(crate) fn load_overrides(path: &Path, host: &str) -> std::io::Result<HostOverrides> {
    let contents = std::fs::read_to_string(path)?;
    Ok(parse_overrides(&contents, host))
}

fn parse_overrides(contents: &str, host: &str) -> HostOverrides {
    let mut overrides = HostOverrides::default();
    let mut in_matching_block = false;

    for line in contents.lines() {
        let line = line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }

        let mut parts = line.split_whitespace();
        let Some(keyword) = parts.next() else {
            continue;
        };

        if keyword.eq_ignore_ascii_case("host") {
            in_matching_block = parts.any(|pattern| pattern == host || pattern == "*");
            continue;
        }
        if !in_matching_block {
            continue;
        }

        let Some(value) = parts.next() else {
            continue;
        };

        if keyword.eq_ignore_ascii_case("hostname") {
            overrides.hostname.get_or_insert_with(|| value.to_string());
        } else if keyword.eq_ignore_ascii_case("port") {
            if overrides.port.is_none() {
                overrides.port = value.parse().ok();
            }
        } else if keyword.eq_ignore_ascii_case("user") {
            overrides.user.get_or_insert_with(|| value.to_string());
        }
    }

    overrides
}
