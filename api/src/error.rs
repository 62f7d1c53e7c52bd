use alloy::primitives::TxHash;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GitStakeError {
    /// The amount string is not a non-negative decimal representable in base units.
    #[error("invalid amount {input:?}: {reason}")]
    InvalidAmount { input: String, reason: &'static str },

    /// A contract read or write failed (revert, signer rejection, transport).
    #[error("contract call failed: {0}")]
    Contract(String),

    /// An identical write is already waiting on the chain.
    #[error("{0} is already in flight")]
    AlreadyInFlight(String),

    #[error("transaction {0} reverted")]
    TransactionReverted(TxHash),

    #[error("transaction {0} was not confirmed in time")]
    ConfirmationTimeout(TxHash),
}

impl GitStakeError {
    pub fn contract(err: impl std::fmt::Display) -> Self {
        Self::Contract(err.to_string())
    }
}
