use alloy::primitives::U256;
use serde::{Deserialize, Serialize};

/// A staking epoch. Created and finalized by the epoch manager; read-only here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Epoch {
    /// The epoch number.
    pub id: u64,

    /// Unix timestamp (seconds) at which staking opens.
    pub start_time: u64,

    /// Unix timestamp (seconds) at which the epoch closes.
    pub end_time: u64,

    /// Total amount staked into the epoch, in base units.
    pub total_staked: U256,

    /// Whether the contract has finalized the epoch and released its prize.
    pub finalized: bool,
}

impl Epoch {
    /// The contract returns a zeroed record for unknown epochs.
    pub fn exists(&self) -> bool {
        self.start_time != 0
    }

    pub fn is_active(&self, now: u64) -> bool {
        self.start_time <= now && now < self.end_time
    }

    pub fn has_ended(&self, now: u64) -> bool {
        now >= self.end_time
    }

    /// Seconds until the epoch closes, zero once it has ended.
    pub fn time_remaining(&self, now: u64) -> u64 {
        self.end_time.saturating_sub(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn epoch() -> Epoch {
        Epoch {
            id: 3,
            start_time: 1_000,
            end_time: 2_000,
            total_staked: U256::ZERO,
            finalized: false,
        }
    }

    #[test]
    fn test_epoch_window() {
        let epoch = epoch();
        assert!(!epoch.is_active(999));
        assert!(epoch.is_active(1_000));
        assert!(epoch.is_active(1_999));
        assert!(!epoch.is_active(2_000));
        assert!(epoch.has_ended(2_000));
        assert_eq!(epoch.time_remaining(1_500), 500);
        assert_eq!(epoch.time_remaining(5_000), 0);
    }

    #[test]
    fn test_zeroed_epoch_does_not_exist() {
        let unknown = Epoch {
            id: 0,
            start_time: 0,
            end_time: 0,
            total_staked: U256::ZERO,
            finalized: false,
        };
        assert!(!unknown.exists());
        assert!(epoch().exists());
    }
}
