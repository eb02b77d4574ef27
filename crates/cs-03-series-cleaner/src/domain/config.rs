//! Cleaner configuration.

use chrono::Duration;

/// Longest accepted lookback: one hundred years.
pub const MAX_LOOKBACK_SECS: u64 = 100 * 365 * 24 * 60 * 60;

/// How far back the delete request reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanerConfig {
    pub lookback: Duration,
}

impl CleanerConfig {
    pub fn new(lookback: Duration) -> Self {
        Self { lookback }
    }

    /// Lookback of `secs` seconds, or `None` outside `1..=MAX_LOOKBACK_SECS`.
    pub fn from_secs(secs: u64) -> Option<Self> {
        if !(1..=MAX_LOOKBACK_SECS).contains(&secs) {
            return None;
        }
        let secs = i64::try_from(secs).ok()?;
        Duration::try_seconds(secs).map(Self::new)
    }
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            lookback: Duration::hours(1),
        }
    }
}
