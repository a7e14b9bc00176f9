//! Race timing configuration

use std::time::Duration;

/// Timing budget for one election race
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RaceConfig {
    /// Maximum time allotted to a single backend call
    pub call_timeout: Duration,
    /// Total budget for collecting results, measured from dispatch start
    pub total_deadline: Duration,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            call_timeout: Duration::from_secs(5),
            total_deadline: Duration::from_secs(10),
        }
    }
}

impl RaceConfig {
    /// Create a config from explicit durations
    pub fn new(call_timeout: Duration, total_deadline: Duration) -> Self {
        Self {
            call_timeout,
            total_deadline,
        }
    }

    /// Create a config from millisecond values
    pub fn from_millis(call_timeout_ms: u64, total_deadline_ms: u64) -> Self {
        Self::new(
            Duration::from_millis(call_timeout_ms),
            Duration::from_millis(total_deadline_ms),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_budget() {
        let config = RaceConfig::default();
        assert_eq!(config.call_timeout, Duration::from_secs(5));
        assert_eq!(config.total_deadline, Duration::from_secs(10));
    }

    #[test]
    fn test_from_millis() {
        let config = RaceConfig::from_millis(200, 800);
        assert_eq!(config.call_timeout, Duration::from_millis(200));
        assert_eq!(config.total_deadline, Duration::from_millis(800));
    }
}
