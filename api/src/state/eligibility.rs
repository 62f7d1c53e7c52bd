use std::fmt;

use alloy::primitives::U256;
use serde::{Deserialize, Serialize};

/// Where a user stands with respect to claiming an epoch's prize.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClaimEligibility {
    NotParticipated,
    PendingWinnerSelection,
    NotAWinner,
    PendingFinalization,
    EligibleToClaim,
}

impl ClaimEligibility {
    /// Reduces the four contract reads to one outcome.
    ///
    /// Checks run in a fixed order: participation, then winner selection,
    /// then prize, then finalization. A staker who lost is told they are not
    /// a winner even while the epoch is still unfinalized.
    pub fn evaluate(
        has_staked: bool,
        winners_set: bool,
        has_winnings: bool,
        is_finalized: bool,
    ) -> Self {
        if !has_staked {
            Self::NotParticipated
        } else if !winners_set {
            Self::PendingWinnerSelection
        } else if !has_winnings {
            Self::NotAWinner
        } else if !is_finalized {
            Self::PendingFinalization
        } else {
            Self::EligibleToClaim
        }
    }

    pub fn can_claim(self) -> bool {
        self == Self::EligibleToClaim
    }

    /// Status text shown to the user.
    pub fn message(self) -> &'static str {
        match self {
            Self::NotParticipated => "You did not stake in this epoch.",
            Self::PendingWinnerSelection => "Winners have not been selected for this epoch yet.",
            Self::NotAWinner => "You are not a winner in this epoch.",
            Self::PendingFinalization => {
                "You won! The epoch must be finalized before you can claim."
            }
            Self::EligibleToClaim => "You are eligible to claim your prize.",
        }
    }
}

impl fmt::Display for ClaimEligibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Snapshot of the reads behind an eligibility decision.
///
/// The reads are independent calls, so the snapshot is not atomic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityStatus {
    pub epoch_id: u64,
    pub epoch_exists: bool,
    pub is_finalized: bool,
    pub winners_set: bool,
    pub has_staked: bool,
    pub has_winnings: bool,
    pub stake_amount: U256,
    pub allocation_amount: U256,
}

impl EligibilityStatus {
    pub fn outcome(&self) -> ClaimEligibility {
        ClaimEligibility::evaluate(
            self.has_staked,
            self.winners_set,
            self.has_winnings,
            self.is_finalized,
        )
    }
}
