use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::app::{DigestError, Result};

pub const DEFAULT_BATCH_SIZE: usize = 15;
pub const DEFAULT_COOLDOWN_MS: u64 = 60_000;

/// `[pacing]` settings as written in the config file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    /// Links processed concurrently per batch (default: 15)
    pub batch_size: usize,

    /// Pause between batches in milliseconds (default: 60000)
    pub cooldown_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            cooldown_ms: DEFAULT_COOLDOWN_MS,
        }
    }
}

impl PacingConfig {
    pub fn policy(&self) -> Result<RatePolicy> {
        RatePolicy::new(self.batch_size, Duration::from_millis(self.cooldown_ms))
    }
}

/// How fast the scheduler is allowed to hit upstream services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatePolicy {
    batch_size: usize,
    cooldown: Duration,
}

impl RatePolicy {
    pub fn new(batch_size: usize, cooldown: Duration) -> Result<Self> {
        if batch_size == 0 {
            return Err(DigestError::Config("batch size must be at least 1".into()));
        }
        Ok(Self {
            batch_size,
            cooldown,
        })
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }
}

impl Default for RatePolicy {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            cooldown: Duration::from_millis(DEFAULT_COOLDOWN_MS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = RatePolicy::default();
        assert_eq!(policy.batch_size(), 15);
        assert_eq!(policy.cooldown(), Duration::from_secs(60));
        assert_eq!(PacingConfig::default().policy().unwrap(), policy);
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        assert!(RatePolicy::new(0, Duration::ZERO).is_err());

        let config = PacingConfig {
            batch_size: 0,
            cooldown_ms: 0,
        };
        assert!(matches!(config.policy(), Err(DigestError::Config(_))));
    }

    #[test]
    fn test_zero_cooldown_allowed() {
        let policy = RatePolicy::new(2, Duration::ZERO).unwrap();
        assert_eq!(policy.cooldown(), Duration::ZERO);
    }
}
