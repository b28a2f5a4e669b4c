//! Timestamp value object.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// UTC timestamp wrapper used across aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current instant.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from an existing datetime.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the inner datetime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Returns a timestamp this many days in the past.
    pub fn days_ago(days: i64) -> Self {
        Self(Utc::now() - Duration::days(days))
    }

    /// Returns the number of whole seconds between self and an earlier timestamp.
    pub fn seconds_since(&self, earlier: &Timestamp) -> i64 {
        (self.0 - earlier.0).num_seconds()
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn days_ago_is_in_the_past() {
        let past = Timestamp::days_ago(7);
        assert!(past < Timestamp::now());
    }

    #[test]
    fn seconds_since_measures_gap() {
        let earlier = Timestamp::from_datetime(Utc::now() - Duration::seconds(90));
        let now = Timestamp::now();
        let gap = now.seconds_since(&earlier);
        assert!((89..=91).contains(&gap));
    }

    #[test]
    fn serializes_transparently() {
        let ts = Timestamp::now();
        let json = serde_json::to_string(&ts).unwrap();
        let back: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(ts, back);
    }
}
