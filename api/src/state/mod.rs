mod eligibility;
mod epoch;

pub use eligibility::*;
pub use epoch::*;

use alloy::primitives::TxHash;
use serde::{Deserialize, Serialize};

/// A submitted write that has not been confirmed yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingTransaction {
    pub hash: TxHash,
}

impl From<TxHash> for PendingTransaction {
    fn from(hash: TxHash) -> Self {
        Self { hash }
    }
}
