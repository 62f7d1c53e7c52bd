use alloy::primitives::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    contracts::ProtocolContracts,
    error::GitStakeError,
    inflight::InFlight,
    state::{ClaimEligibility, EligibilityStatus, Epoch, PendingTransaction},
    units::{to_base_units, to_decimal},
};

/// Result of a guarded claim.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimAttempt {
    /// The user was eligible and the claim transaction was submitted.
    Submitted(PendingTransaction),

    /// The user was not eligible; nothing was sent.
    Refused(ClaimEligibility),
}

/// Everything the dashboard shows for one user, read fresh.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDashboard {
    pub user: Address,
    pub epoch: Epoch,
    pub user_stake: U256,
    pub epoch_prize: U256,
    pub aave_balance: U256,
}

/// Typed entry point to the protocol, bound to one signer for its lifetime.
///
/// Holds no state between calls apart from the set of writes currently
/// being submitted.
#[derive(Debug)]
pub struct ProtocolFacade<C> {
    contracts: C,
    in_flight: InFlight,
}

fn claim_key(epoch_id: u64) -> String {
    format!("claim({epoch_id})")
}

impl<C: ProtocolContracts> ProtocolFacade<C> {
    pub fn new(contracts: C) -> Self {
        Self {
            contracts,
            in_flight: InFlight::default(),
        }
    }

    pub fn contracts(&self) -> &C {
        &self.contracts
    }

    /// Stakes `amount` (a decimal string in whole units) into the current epoch.
    pub async fn deposit(&self, amount: &str) -> Result<PendingTransaction, GitStakeError> {
        let value = to_base_units(amount)?;
        if value.is_zero() {
            return Err(GitStakeError::InvalidAmount {
                input: amount.to_string(),
                reason: "amount must be greater than zero",
            });
        }
        let _guard = self.in_flight.acquire(format!("deposit({value})"))?;
        let hash = self.contracts.deposit(value).await?;
        info!(%hash, amount = %to_decimal(value), "deposit submitted");
        Ok(hash.into())
    }

    /// Reads the current epoch id, then that epoch.
    ///
    /// The id may advance between the two reads.
    pub async fn get_current_epoch(&self) -> Result<Epoch, GitStakeError> {
        let epoch_id = self.contracts.current_epoch_id().await?;
        debug!(epoch_id, "fetching current epoch");
        self.contracts.epoch(epoch_id).await
    }

    pub async fn get_user_stake(&self, user: Address, epoch_id: u64) -> Result<U256, GitStakeError> {
        self.contracts.user_stake(user, epoch_id).await
    }

    /// Forwards the winner list as-is. The contract validates the signature.
    pub async fn submit_winners(
        &self,
        epoch_id: u64,
        winners: Vec<Address>,
        signature: Bytes,
    ) -> Result<PendingTransaction, GitStakeError> {
        let _guard = self
            .in_flight
            .acquire(format!("submitWinners({epoch_id})"))?;
        let count = winners.len();
        let hash = self
            .contracts
            .submit_winners(epoch_id, winners, signature)
            .await?;
        info!(%hash, epoch_id, winners = count, "winners submitted");
        Ok(hash.into())
    }

    /// Unchecked claim. Prefer [`ProtocolFacade::claim_if_eligible`].
    pub async fn claim(&self, epoch_id: u64) -> Result<PendingTransaction, GitStakeError> {
        let _guard = self.in_flight.acquire(claim_key(epoch_id))?;
        let hash = self.contracts.claim(epoch_id).await?;
        info!(%hash, epoch_id, "claim submitted");
        Ok(hash.into())
    }

    /// Asks the epoch manager to advance the epoch lifecycle if it is due.
    pub async fn poke(&self) -> Result<PendingTransaction, GitStakeError> {
        let _guard = self.in_flight.acquire("poke()".to_string())?;
        let hash = self.contracts.poke().await?;
        info!(%hash, "poke submitted");
        Ok(hash.into())
    }

    pub async fn get_aave_balance(&self) -> Result<U256, GitStakeError> {
        self.contracts.aave_balance().await
    }

    pub async fn get_epoch_prize(&self, epoch_id: u64) -> Result<U256, GitStakeError> {
        self.contracts.epoch_prize(epoch_id).await
    }

    /// Whether `user` has a non-zero allocation in `epoch_id`.
    ///
    /// Returns `false` while winners are not set. Read failures are logged
    /// and also reported as `false`.
    pub async fn is_winner(&self, user: Address, epoch_id: u64) -> bool {
        match self.lookup_winner(user, epoch_id).await {
            Ok(winner) => winner,
            Err(err) => {
                warn!(%user, epoch_id, %err, "winner lookup failed, treating as not a winner");
                false
            }
        }
    }

    async fn lookup_winner(&self, user: Address, epoch_id: u64) -> Result<bool, GitStakeError> {
        if !self.contracts.winners_set(epoch_id).await? {
            return Ok(false);
        }
        let allocation = self.contracts.allocation(user, epoch_id).await?;
        Ok(!allocation.is_zero())
    }

    /// Reads everything needed to decide whether `user` can claim `epoch_id`.
    pub async fn check_eligibility(
        &self,
        user: Address,
        epoch_id: u64,
    ) -> Result<EligibilityStatus, GitStakeError> {
        let (epoch, winners_set, stake, allocation) = futures::try_join!(
            self.contracts.epoch(epoch_id),
            self.contracts.winners_set(epoch_id),
            self.contracts.user_stake(user, epoch_id),
            self.contracts.allocation(user, epoch_id),
        )?;

        let status = EligibilityStatus {
            epoch_id,
            epoch_exists: epoch.exists(),
            is_finalized: epoch.finalized,
            winners_set,
            has_staked: !stake.is_zero(),
            has_winnings: !allocation.is_zero(),
            stake_amount: stake,
            allocation_amount: allocation,
        };
        debug!(%user, epoch_id, outcome = ?status.outcome(), "eligibility checked");
        Ok(status)
    }

    /// Re-checks the signer's eligibility and submits the claim only when it
    /// can claim.
    ///
    /// The claim key is held from the eligibility read until the transaction
    /// hash comes back, not until it is mined. A second call made after this
    /// one returns but before the claim lands reads the old chain state and
    /// submits again; the contract rejects the duplicate. Callers that need
    /// to avoid that should [`ProtocolFacade::confirm`] first.
    pub async fn claim_if_eligible(&self, epoch_id: u64) -> Result<ClaimAttempt, GitStakeError> {
        let _guard = self.in_flight.acquire(claim_key(epoch_id))?;
        let user = self.contracts.signer_address();
        let outcome = self.check_eligibility(user, epoch_id).await?.outcome();
        if !outcome.can_claim() {
            info!(%user, epoch_id, ?outcome, "claim refused");
            return Ok(ClaimAttempt::Refused(outcome));
        }
        let hash = self.contracts.claim(epoch_id).await?;
        info!(%hash, %user, epoch_id, "claim submitted");
        Ok(ClaimAttempt::Submitted(hash.into()))
    }

    /// Current epoch plus the user's stake, the epoch prize, and the yield balance.
    pub async fn user_dashboard(&self, user: Address) -> Result<UserDashboard, GitStakeError> {
        let epoch = self.get_current_epoch().await?;
        let (user_stake, epoch_prize, aave_balance) = futures::try_join!(
            self.contracts.user_stake(user, epoch.id),
            self.contracts.epoch_prize(epoch.id),
            self.contracts.aave_balance(),
        )?;
        Ok(UserDashboard {
            user,
            epoch,
            user_stake,
            epoch_prize,
            aave_balance,
        })
    }

    /// Waits for `pending` to be mined and fails if it reverted.
    pub async fn confirm(&self, pending: PendingTransaction) -> Result<(), GitStakeError> {
        if !self.contracts.confirm(pending.hash).await? {
            return Err(GitStakeError::TransactionReverted(pending.hash));
        }
        info!(hash = %pending.hash, "transaction confirmed");
        Ok(())
    }
}
