//! Bonding durations as the chain reports them (`"1209600s"`) and as people read them ("14 days").

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

const MINUTE: f64 = 60.0;
const HOUR: f64 = 60.0 * MINUTE;
const DAY: f64 = 24.0 * HOUR;
const DAYS_PER_MONTH: f64 = 146_097.0 / 4_800.0;
const DAYS_PER_YEAR: f64 = 146_097.0 / 400.0;

/// An error that can occur when parsing a chain duration string.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseDurationError {
    /// The string does not end with the `s` unit suffix.
    #[error("duration is missing the 's' suffix")]
    MissingUnit,
    /// The numeric part is not a non-negative number of seconds.
    #[error("invalid number of seconds")]
    InvalidSeconds,
}

/// A fixed lock-up period offered by a pool.
///
/// Two durations are the same bonding option exactly when they humanize to the
/// same label, which for whole seconds is the same as comparing seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BondingDuration {
    seconds: u64,
}

impl BondingDuration {
    pub const fn from_secs(seconds: u64) -> Self {
        Self { seconds }
    }

    pub const fn from_days(days: u64) -> Self {
        Self::from_secs(days * 86_400)
    }

    pub fn as_secs(&self) -> u64 {
        self.seconds
    }

    /// Formats the duration as a relative label, e.g. "an hour", "a day", "14 days".
    ///
    /// Each unit is rounded to the nearest whole value and the first unit that
    /// falls under its threshold wins (45 seconds, 45 minutes, 22 hours,
    /// 26 days, 11 months).
    pub fn humanize(&self) -> String {
        let secs = self.seconds as f64;
        let seconds = secs.round() as u64;
        let minutes = (secs / MINUTE).round() as u64;
        let hours = (secs / HOUR).round() as u64;
        let days = (secs / DAY).round() as u64;
        let months = (secs / DAY / DAYS_PER_MONTH).round() as u64;
        let years = (secs / DAY / DAYS_PER_YEAR).round() as u64;

        if seconds < 45 {
            "a few seconds".to_string()
        } else if minutes <= 1 {
            "a minute".to_string()
        } else if minutes < 45 {
            format!("{} minutes", minutes)
        } else if hours <= 1 {
            "an hour".to_string()
        } else if hours < 22 {
            format!("{} hours", hours)
        } else if days <= 1 {
            "a day".to_string()
        } else if days < 26 {
            format!("{} days", days)
        } else if months <= 1 {
            "a month".to_string()
        } else if months < 11 {
            format!("{} months", months)
        } else if years <= 1 {
            "a year".to_string()
        } else {
            format!("{} years", years)
        }
    }
}

impl fmt::Display for BondingDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.humanize())
    }
}

/// Parses the chain's duration form. Fractional seconds are dropped.
impl FromStr for BondingDuration {
    type Err = ParseDurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let number = s.trim().strip_suffix('s').ok_or(ParseDurationError::MissingUnit)?;
        let whole = number.split('.').next().unwrap_or("");
        let seconds = whole
            .parse::<u64>()
            .map_err(|_| ParseDurationError::InvalidSeconds)?;
        Ok(Self::from_secs(seconds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn humanizes_osmosis_lockable_durations() {
        assert_eq!(BondingDuration::from_secs(3_600).humanize(), "an hour");
        assert_eq!(BondingDuration::from_days(1).humanize(), "a day");
        assert_eq!(BondingDuration::from_days(7).humanize(), "7 days");
        assert_eq!(BondingDuration::from_days(14).humanize(), "14 days");
    }

    #[test]
    fn humanize_switches_units_at_thresholds() {
        assert_eq!(BondingDuration::from_secs(30).humanize(), "a few seconds");
        assert_eq!(BondingDuration::from_secs(60).humanize(), "a minute");
        assert_eq!(BondingDuration::from_secs(10 * 60).humanize(), "10 minutes");
        assert_eq!(BondingDuration::from_secs(5 * 3_600).humanize(), "5 hours");
        assert_eq!(BondingDuration::from_secs(22 * 3_600).humanize(), "a day");
        assert_eq!(BondingDuration::from_days(30).humanize(), "a month");
        assert_eq!(BondingDuration::from_days(90).humanize(), "3 months");
        assert_eq!(BondingDuration::from_days(365).humanize(), "a year");
        assert_eq!(BondingDuration::from_days(800).humanize(), "2 years");
    }

    #[test]
    fn parses_chain_durations() {
        assert_eq!(
            "1209600s".parse::<BondingDuration>(),
            Ok(BondingDuration::from_days(14))
        );
        assert_eq!(
            "86400.000000000s".parse::<BondingDuration>(),
            Ok(BondingDuration::from_days(1))
        );
        assert_eq!(
            "86400".parse::<BondingDuration>(),
            Err(ParseDurationError::MissingUnit)
        );
        assert_eq!(
            "-5s".parse::<BondingDuration>(),
            Err(ParseDurationError::InvalidSeconds)
        );
    }
}
