//! Key lifetime parsing
//!
//! A lifetime is either the literal `lifetime` or `<n><unit>` where unit is
//! one of `min`, `h`, `d`, `m` (30 days) or `y` (365 days).

use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static DURATION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(\d+)(min|[dhmy])$").unwrap());

const LIFETIME: &str = "lifetime";

/// Units accepted by the duration grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationUnit {
    Minute,
    Hour,
    Day,
    Month,
    Year,
}

impl DurationUnit {
    fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix.to_ascii_lowercase().as_str() {
            "min" => Some(Self::Minute),
            "h" => Some(Self::Hour),
            "d" => Some(Self::Day),
            "m" => Some(Self::Month),
            "y" => Some(Self::Year),
            _ => None,
        }
    }

    pub fn seconds(&self) -> u64 {
        match self {
            Self::Minute => 60,
            Self::Hour => 3_600,
            Self::Day => 86_400,
            Self::Month => 2_592_000,
            Self::Year => 31_536_000,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DurationError {
    #[error("Invalid time format (e.g., 1d, 1m, 1y, 1min)")]
    InvalidFormat,
}

/// How long an issued key stays valid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDuration {
    Lifetime,
    Limited { amount: u64, unit: DurationUnit },
}

impl KeyDuration {
    /// Total length in seconds, `None` for lifetime keys or on overflow
    pub fn seconds(&self) -> Option<u64> {
        match self {
            Self::Lifetime => None,
            Self::Limited { amount, unit } => amount.checked_mul(unit.seconds()),
        }
    }

    /// Expiry instant for a key issued at `now_ms`
    ///
    /// Returns `Ok(None)` for lifetime keys.
    pub fn expires_at(&self, now_ms: i64) -> Result<Option<i64>, DurationError> {
        match self {
            Self::Lifetime => Ok(None),
            Self::Limited { .. } => {
                let millis = self
                    .seconds()
                    .and_then(|s| s.checked_mul(1_000))
                    .and_then(|ms| i64::try_from(ms).ok())
                    .ok_or(DurationError::InvalidFormat)?;

                now_ms
                    .checked_add(millis)
                    .map(Some)
                    .ok_or(DurationError::InvalidFormat)
            }
        }
    }
}

impl FromStr for KeyDuration {
    type Err = DurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case(LIFETIME) {
            return Ok(Self::Lifetime);
        }

        let captures = DURATION_PATTERN
            .captures(s)
            .ok_or(DurationError::InvalidFormat)?;

        let amount: u64 = captures[1]
            .parse()
            .map_err(|_| DurationError::InvalidFormat)?;
        let unit = DurationUnit::from_suffix(&captures[2]).ok_or(DurationError::InvalidFormat)?;

        // Zero-length keys would be expired on issuance
        if amount == 0 {
            return Err(DurationError::InvalidFormat);
        }

        Ok(Self::Limited { amount, unit })
    }
}

/// Parse a `<n><unit>` duration into seconds
///
/// `lifetime` is not a duration and yields `None`, like any other string
/// outside the grammar.
pub fn parse_duration(s: &str) -> Option<u64> {
    match s.parse::<KeyDuration>() {
        Ok(duration @ KeyDuration::Limited { .. }) => duration.seconds(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_units() {
        assert_eq!(parse_duration("1min"), Some(60));
        assert_eq!(parse_duration("2h"), Some(7_200));
        assert_eq!(parse_duration("3d"), Some(259_200));
        assert_eq!(parse_duration("1m"), Some(2_592_000));
        assert_eq!(parse_duration("1y"), Some(31_536_000));
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(parse_duration("5MIN"), Some(300));
        assert_eq!(parse_duration("1D"), Some(86_400));
        assert_eq!(parse_duration("1Y"), Some(31_536_000));
        assert_eq!("LifeTime".parse::<KeyDuration>(), Ok(KeyDuration::Lifetime));
    }

    #[test]
    fn test_min_is_minutes_not_months() {
        let parsed: KeyDuration = "10min".parse().unwrap();
        assert_eq!(
            parsed,
            KeyDuration::Limited {
                amount: 10,
                unit: DurationUnit::Minute
            }
        );
    }

    #[test]
    fn test_rejects_outside_grammar() {
        for input in [
            "", "d", "1", "1w", "1 d", " 1d", "1d ", "-1d", "1.5d", "1mins", "1dd", "abc",
            "lifetimes",
        ] {
            assert_eq!(
                input.parse::<KeyDuration>(),
                Err(DurationError::InvalidFormat),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_rejects_zero_amount() {
        assert_eq!("0d".parse::<KeyDuration>(), Err(DurationError::InvalidFormat));
        assert_eq!(parse_duration("0min"), None);
    }

    #[test]
    fn test_lifetime_is_not_a_duration() {
        assert_eq!(parse_duration("lifetime"), None);
        assert_eq!(KeyDuration::Lifetime.expires_at(1_000), Ok(None));
    }

    #[test]
    fn test_expires_at() {
        let duration: KeyDuration = "2d".parse().unwrap();
        assert_eq!(
            duration.expires_at(1_000),
            Ok(Some(1_000 + 2 * 86_400 * 1_000))
        );
    }

    #[test]
    fn test_huge_amount_is_invalid() {
        let duration: KeyDuration = "99999999999999999y".parse().unwrap();
        assert_eq!(duration.expires_at(0), Err(DurationError::InvalidFormat));

        assert_eq!(
            "999999999999999999999999999d".parse::<KeyDuration>(),
            Err(DurationError::InvalidFormat)
        );
    }
}
