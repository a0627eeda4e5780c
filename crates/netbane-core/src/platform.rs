// ── Vendor family tags ──

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Device family tag selecting the vendor driver at construction time.
///
/// Parsing an unknown tag fails with [`CoreError::UnsupportedPlatform`]
/// before any connection attempt is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Ios,
    IosXr,
    Nxos,
    Eos,
    Junos,
}

impl Platform {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ios => "ios",
            Self::IosXr => "iosxr",
            Self::Nxos => "nxos",
            Self::Eos => "eos",
            Self::Junos => "junos",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ios" => Ok(Self::Ios),
            "iosxr" => Ok(Self::IosXr),
            "nxos" => Ok(Self::Nxos),
            "eos" => Ok(Self::Eos),
            "junos" => Ok(Self::Junos),
            other => Err(CoreError::UnsupportedPlatform {
                tag: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tags_round_trip() {
        for tag in ["ios", "iosxr", "nxos", "eos", "junos"] {
            let platform: Platform = tag.parse().unwrap();
            assert_eq!(platform.as_str(), tag);
        }
    }

    #[test]
    fn unknown_tag_is_unsupported_platform() {
        let err = "foo".parse::<Platform>().unwrap_err();
        assert!(matches!(err, CoreError::UnsupportedPlatform { tag } if tag == "foo"));
    }
}
