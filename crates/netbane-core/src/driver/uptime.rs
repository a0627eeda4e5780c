// Vendor uptime strings to whole seconds.
//
// Grammar (case-insensitive, comma separated, any subset of components,
// both plural and "(s)" unit forms):
//   "3 days, 4 hours, 5 minutes"
//   "1 year, 2 weeks"
//   "0 day(s), 1 hour(s), 47 minute(s), 27 second(s)"
// A string with no recognizable component is a Parse error -- the
// conversion never silently returns zero.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

static COMPONENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+)\s*(year|week|day|hour|minute|second)").expect("valid uptime regex")
});

const SECONDS_PER: [(&str, u64); 6] = [
    ("year", 31_536_000),
    ("week", 604_800),
    ("day", 86_400),
    ("hour", 3_600),
    ("minute", 60),
    ("second", 1),
];

/// Parse a vendor uptime string into total seconds.
pub fn parse_uptime(uptime: &str) -> Result<u64, CoreError> {
    let mut total: u64 = 0;
    let mut matched = false;

    for caps in COMPONENT.captures_iter(uptime) {
        let value: u64 = caps[1]
            .parse()
            .map_err(|_| CoreError::parse(format!("uptime component overflow in {uptime:?}")))?;
        let unit = caps[2].to_ascii_lowercase();
        let multiplier = SECONDS_PER
            .iter()
            .find(|(name, _)| *name == unit)
            .map(|(_, secs)| *secs)
            .unwrap_or(0);
        total = total.saturating_add(value.saturating_mul(multiplier));
        matched = true;
    }

    if matched {
        Ok(total)
    } else {
        Err(CoreError::parse(format!(
            "unrecognized uptime format: {uptime:?}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ios_style_components() {
        assert_eq!(parse_uptime("3 days, 4 hours, 5 minutes").unwrap(), 273_900);
        assert_eq!(
            parse_uptime("1 year, 2 weeks").unwrap(),
            31_536_000 + 2 * 604_800
        );
        assert_eq!(parse_uptime("5 minutes").unwrap(), 300);
    }

    #[test]
    fn nxos_style_parenthesized_units() {
        assert_eq!(
            parse_uptime("0 day(s), 1 hour(s), 47 minute(s), 27 second(s)").unwrap(),
            3_600 + 47 * 60 + 27
        );
    }

    #[test]
    fn leading_noise_is_tolerated() {
        assert_eq!(parse_uptime("uptime is 2 hours, 1 minute").unwrap(), 7_260);
    }

    #[test]
    fn garbage_is_a_parse_error_not_zero() {
        assert!(matches!(
            parse_uptime("forever and a day ago"),
            Err(CoreError::Parse { .. })
        ));
        assert!(matches!(parse_uptime(""), Err(CoreError::Parse { .. })));
    }
}
