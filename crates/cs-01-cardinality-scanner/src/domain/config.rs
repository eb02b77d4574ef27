//! Scanner configuration.

use super::errors::ScanError;

/// Default label-count limit used when the operator supplies none.
pub const DEFAULT_LABEL_LIMIT: u64 = 1_000_000;

/// Validated scanner settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScannerConfig {
    limit: u64,
}

impl ScannerConfig {
    /// A label is flagged when its distinct value count is strictly greater
    /// than `limit`. Zero is rejected.
    pub fn new(limit: u64) -> Result<Self, ScanError> {
        if limit == 0 {
            return Err(ScanError::InvalidLimit);
        }
        Ok(Self { limit })
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_limit_rejected() {
        assert_eq!(ScannerConfig::new(0), Err(ScanError::InvalidLimit));
        assert_eq!(ScannerConfig::new(50).map(|c| c.limit()), Ok(50));
    }
}
