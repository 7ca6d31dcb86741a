//! Environment-driven settings shared by the front ends.

use std::env;
use std::sync::OnceLock;

static ORTENSOR_LOG: OnceLock<String> = OnceLock::new();
static ORTENSOR_LOG_ANSI: OnceLock<bool> = OnceLock::new();

const DEFAULT_LOG_FILTER: &str = "warn";

fn parse_bool(value: &str) -> bool {
    let normalized = value.trim().to_ascii_lowercase();
    matches!(normalized.as_str(), "1" | "true" | "yes" | "on")
}

/// Log filter directives from `ORTENSOR_LOG`, defaulting to `warn`.
pub fn log_filter() -> &'static str {
    ORTENSOR_LOG.get_or_init(|| match env::var("ORTENSOR_LOG") {
        Ok(value) if !value.trim().is_empty() => value.trim().to_string(),
        _ => DEFAULT_LOG_FILTER.to_string(),
    })
}

/// Whether log output uses ANSI colors (`ORTENSOR_LOG_ANSI`, default on).
pub fn log_ansi() -> bool {
    *ORTENSOR_LOG_ANSI.get_or_init(|| match env::var("ORTENSOR_LOG_ANSI") {
        Ok(value) if !value.trim().is_empty() => parse_bool(&value),
        _ => true,
    })
}

#[cfg(test)]
mod tests {
    use super::parse_bool;

    #[test]
    fn parse_bool_accepts_common_spellings() {
        for value in ["1", "true", "YES", " on "] {
            assert!(parse_bool(value), "{value} should be truthy");
        }
        for value in ["0", "false", "off", "maybe"] {
            assert!(!parse_bool(value), "{value} should be falsy");
        }
    }
}
