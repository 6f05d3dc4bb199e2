//! Human-readable settle-delay parsing.
//!
//! The `[runner] settle` configuration key accepts values like `"500ms"`,
//! `"2s"`, or `"1m"`. On the serde side a bare number is also accepted and
//! read as seconds.

use serde::{Deserialize, Deserializer};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when parsing a delay value.
#[derive(Debug, Error, PartialEq)]
pub enum DelayParseError {
    /// Empty delay string.
    #[error("empty delay string")]
    Empty,

    /// Missing or invalid numeric value.
    #[error("invalid numeric value: {0:?}")]
    InvalidNumber(String),

    /// Number without a unit.
    #[error("missing unit on delay: {0:?}")]
    MissingUnit(String),

    /// Unrecognized unit suffix.
    #[error("unknown delay unit: {0:?}")]
    UnknownUnit(String),
}

/// Parse a delay such as `"500ms"`, `"2s"`, or `"1m"` into a [`Duration`].
pub fn parse_delay(s: &str) -> Result<Duration, DelayParseError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(DelayParseError::Empty);
    }

    let unit_start = s
        .find(|c: char| !c.is_ascii_digit())
        .ok_or_else(|| DelayParseError::MissingUnit(s.to_string()))?;
    let (digits, unit) = s.split_at(unit_start);
    let value: u64 = digits
        .parse()
        .map_err(|_| DelayParseError::InvalidNumber(digits.to_string()))?;

    match unit.trim() {
        "ms" => Ok(Duration::from_millis(value)),
        "s" => Ok(Duration::from_secs(value)),
        "m" => Ok(Duration::from_secs(value * 60)),
        other => Err(DelayParseError::UnknownUnit(other.to_string())),
    }
}

/// Deserialize a [`Duration`] from a delay string or a number of seconds.
///
/// Intended for use with serde's `deserialize_with` attribute.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum DelayInput {
        Text(String),
        Seconds(u64),
    }

    match DelayInput::deserialize(deserializer)? {
        DelayInput::Text(s) => {
            parse_delay(&s).map_err(|e| D::Error::custom(format!("invalid settle delay: {e}")))
        }
        DelayInput::Seconds(secs) => Ok(Duration::from_secs(secs)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_each_unit() {
        assert_eq!(parse_delay("500ms").unwrap(), Duration::from_millis(500));
        assert_eq!(parse_delay("0ms").unwrap(), Duration::ZERO);
        assert_eq!(parse_delay("2s").unwrap(), Duration::from_secs(2));
        assert_eq!(parse_delay("1m").unwrap(), Duration::from_secs(60));
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        assert_eq!(parse_delay(" 1s ").unwrap(), Duration::from_secs(1));
        assert_eq!(parse_delay("250 ms").unwrap(), Duration::from_millis(250));
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(parse_delay(""), Err(DelayParseError::Empty));
        assert_eq!(
            parse_delay("30"),
            Err(DelayParseError::MissingUnit("30".to_string()))
        );
        assert_eq!(
            parse_delay("ms"),
            Err(DelayParseError::InvalidNumber(String::new()))
        );
        assert_eq!(
            parse_delay("5h"),
            Err(DelayParseError::UnknownUnit("h".to_string()))
        );
    }

    #[test]
    fn deserializes_string_or_seconds() {
        #[derive(Deserialize)]
        struct Wrapper {
            #[serde(deserialize_with = "super::deserialize")]
            settle: Duration,
        }

        let parsed: Wrapper = toml::from_str(r#"settle = "750ms""#).unwrap();
        assert_eq!(parsed.settle, Duration::from_millis(750));

        let parsed: Wrapper = toml::from_str("settle = 2").unwrap();
        assert_eq!(parsed.settle, Duration::from_secs(2));

        let parsed: Result<Wrapper, _> = toml::from_str(r#"settle = "soon""#);
        assert!(parsed.is_err());
    }
}
