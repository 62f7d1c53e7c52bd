use alloy::{
    network::ReceiptResponse,
    primitives::{Address, Bytes, TxHash, U256},
    providers::{PendingTransactionBuilder, PendingTransactionError, Provider, WatchTxError},
};
use async_trait::async_trait;
use tracing::debug;

use crate::{
    abi::{
        EpochInfo, IAaveIntegration, IEpochManager, IMockAaveIntegration, IRewardDistributor,
        IStakingPool,
    },
    consts::CONFIRMATION_TIMEOUT,
    deployment::{ContractAddresses, YieldSource},
    error::GitStakeError,
    state::Epoch,
};

/// Raw calls into the deployed contracts, one method per ABI function.
///
/// Amounts are base units. Writes return the transaction hash as soon as the
/// transaction is accepted; [`ProtocolContracts::confirm`] waits for it.
#[async_trait]
pub trait ProtocolContracts: Send + Sync {
    /// The account every write is sent from.
    fn signer_address(&self) -> Address;

    async fn deposit(&self, value: U256) -> Result<TxHash, GitStakeError>;

    async fn current_epoch_id(&self) -> Result<u64, GitStakeError>;

    async fn epoch(&self, epoch_id: u64) -> Result<Epoch, GitStakeError>;

    async fn epoch_prize(&self, epoch_id: u64) -> Result<U256, GitStakeError>;

    async fn poke(&self) -> Result<TxHash, GitStakeError>;

    async fn user_stake(&self, user: Address, epoch_id: u64) -> Result<U256, GitStakeError>;

    async fn winners_set(&self, epoch_id: u64) -> Result<bool, GitStakeError>;

    async fn allocation(&self, user: Address, epoch_id: u64) -> Result<U256, GitStakeError>;

    async fn submit_winners(
        &self,
        epoch_id: u64,
        winners: Vec<Address>,
        signature: Bytes,
    ) -> Result<TxHash, GitStakeError>;

    async fn claim(&self, epoch_id: u64) -> Result<TxHash, GitStakeError>;

    async fn aave_balance(&self) -> Result<U256, GitStakeError>;

    /// Waits for the receipt and reports whether the transaction succeeded.
    async fn confirm(&self, hash: TxHash) -> Result<bool, GitStakeError>;
}

/// [`ProtocolContracts`] over an alloy provider that carries the signer.
#[derive(Debug, Clone)]
pub struct AlloyContracts<P> {
    provider: P,
    signer: Address,
    addresses: ContractAddresses,
    yield_source: YieldSource,
}

impl<P> AlloyContracts<P> {
    /// `signer` must be the address of the wallet attached to `provider`.
    pub fn new(
        provider: P,
        signer: Address,
        addresses: ContractAddresses,
        yield_source: YieldSource,
    ) -> Self {
        Self {
            provider,
            signer,
            addresses,
            yield_source,
        }
    }
}

fn to_u64(value: U256, field: &str) -> Result<u64, GitStakeError> {
    u64::try_from(value)
        .map_err(|_| GitStakeError::Contract(format!("{field} does not fit in 64 bits: {value}")))
}

impl TryFrom<EpochInfo> for Epoch {
    type Error = GitStakeError;

    fn try_from(info: EpochInfo) -> Result<Self, Self::Error> {
        Ok(Epoch {
            id: to_u64(info.id, "epoch id")?,
            start_time: to_u64(info.startTime, "epoch start time")?,
            end_time: to_u64(info.endTime, "epoch end time")?,
            total_staked: info.totalStaked,
            finalized: info.finalized,
        })
    }
}

#[async_trait]
impl<P> ProtocolContracts for AlloyContracts<P>
where
    P: Provider + Clone + 'static,
{
    fn signer_address(&self) -> Address {
        self.signer
    }

    async fn deposit(&self, value: U256) -> Result<TxHash, GitStakeError> {
        let epoch_manager = IEpochManager::new(self.addresses.epoch_manager, self.provider.clone());
        let pending = epoch_manager
            .deposit()
            .value(value)
            .send()
            .await
            .map_err(GitStakeError::contract)?;
        Ok(*pending.tx_hash())
    }

    async fn current_epoch_id(&self) -> Result<u64, GitStakeError> {
        let epoch_manager = IEpochManager::new(self.addresses.epoch_manager, self.provider.clone());
        let id = epoch_manager
            .currentEpochId()
            .call()
            .await
            .map_err(GitStakeError::contract)?
            .epochId;
        to_u64(id, "epoch id")
    }

    async fn epoch(&self, epoch_id: u64) -> Result<Epoch, GitStakeError> {
        let epoch_manager = IEpochManager::new(self.addresses.epoch_manager, self.provider.clone());
        let info = epoch_manager
            .getEpoch(U256::from(epoch_id))
            .call()
            .await
            .map_err(GitStakeError::contract)?
            .epoch;
        Epoch::try_from(info)
    }

    async fn epoch_prize(&self, epoch_id: u64) -> Result<U256, GitStakeError> {
        let epoch_manager = IEpochManager::new(self.addresses.epoch_manager, self.provider.clone());
        Ok(epoch_manager
            .getEpochPrize(U256::from(epoch_id))
            .call()
            .await
            .map_err(GitStakeError::contract)?
            .prize)
    }

    async fn poke(&self) -> Result<TxHash, GitStakeError> {
        let epoch_manager = IEpochManager::new(self.addresses.epoch_manager, self.provider.clone());
        let pending = epoch_manager
            .poke()
            .send()
            .await
            .map_err(GitStakeError::contract)?;
        Ok(*pending.tx_hash())
    }

    async fn user_stake(&self, user: Address, epoch_id: u64) -> Result<U256, GitStakeError> {
        let staking = IStakingPool::new(self.addresses.staking_pool, self.provider.clone());
        Ok(staking
            .getUserStake(user, U256::from(epoch_id))
            .call()
            .await
            .map_err(GitStakeError::contract)?
            .amount)
    }

    async fn winners_set(&self, epoch_id: u64) -> Result<bool, GitStakeError> {
        let rewards =
            IRewardDistributor::new(self.addresses.reward_distributor, self.provider.clone());
        Ok(rewards
            .winnersSet(U256::from(epoch_id))
            .call()
            .await
            .map_err(GitStakeError::contract)?
            .isSet)
    }

    async fn allocation(&self, user: Address, epoch_id: u64) -> Result<U256, GitStakeError> {
        let rewards =
            IRewardDistributor::new(self.addresses.reward_distributor, self.provider.clone());
        Ok(rewards
            .getAllocation(user, U256::from(epoch_id))
            .call()
            .await
            .map_err(GitStakeError::contract)?
            .amount)
    }

    async fn submit_winners(
        &self,
        epoch_id: u64,
        winners: Vec<Address>,
        signature: Bytes,
    ) -> Result<TxHash, GitStakeError> {
        let rewards =
            IRewardDistributor::new(self.addresses.reward_distributor, self.provider.clone());
        let pending = rewards
            .submitWinners(U256::from(epoch_id), winners, signature)
            .send()
            .await
            .map_err(GitStakeError::contract)?;
        Ok(*pending.tx_hash())
    }

    async fn claim(&self, epoch_id: u64) -> Result<TxHash, GitStakeError> {
        let rewards =
            IRewardDistributor::new(self.addresses.reward_distributor, self.provider.clone());
        let pending = rewards
            .claim(U256::from(epoch_id))
            .send()
            .await
            .map_err(GitStakeError::contract)?;
        Ok(*pending.tx_hash())
    }

    async fn aave_balance(&self) -> Result<U256, GitStakeError> {
        let address = self.addresses.yield_contract(self.yield_source);
        let balance = match self.yield_source {
            YieldSource::Aave => {
                IAaveIntegration::new(address, self.provider.clone())
                    .getAaveBalance()
                    .call()
                    .await
                    .map_err(GitStakeError::contract)?
                    .balance
            }
            YieldSource::MockAave => {
                IMockAaveIntegration::new(address, self.provider.clone())
                    .getAaveBalance()
                    .call()
                    .await
                    .map_err(GitStakeError::contract)?
                    .balance
            }
        };
        Ok(balance)
    }

    async fn confirm(&self, hash: TxHash) -> Result<bool, GitStakeError> {
        debug!(%hash, "waiting for receipt");
        let receipt = PendingTransactionBuilder::new(self.provider.root().clone(), hash)
            .with_timeout(Some(CONFIRMATION_TIMEOUT))
            .get_receipt()
            .await
            .map_err(|err| confirmation_error(hash, err))?;
        Ok(receipt.status())
    }
}

fn confirmation_error(hash: TxHash, err: PendingTransactionError) -> GitStakeError {
    match err {
        PendingTransactionError::TxWatcher(WatchTxError::Timeout) => {
            GitStakeError::ConfirmationTimeout(hash)
        }
        err => GitStakeError::contract(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watcher_timeout_is_confirmation_timeout() {
        let hash = TxHash::repeat_byte(0xab);
        assert!(matches!(
            confirmation_error(hash, PendingTransactionError::TxWatcher(WatchTxError::Timeout)),
            GitStakeError::ConfirmationTimeout(h) if h == hash
        ));
        assert!(matches!(
            confirmation_error(hash, PendingTransactionError::FailedToRegister),
            GitStakeError::Contract(_)
        ));
    }

    #[test]
    fn test_epoch_from_info() {
        let info = EpochInfo {
            id: U256::from(3),
            startTime: U256::from(100),
            endTime: U256::from(200),
            totalStaked: U256::from(7),
            finalized: true,
        };
        let epoch = Epoch::try_from(info).unwrap();
        assert_eq!((epoch.id, epoch.start_time, epoch.end_time), (3, 100, 200));
        assert!(epoch.finalized);

        let overflow = EpochInfo {
            id: U256::MAX,
            startTime: U256::ZERO,
            endTime: U256::ZERO,
            totalStaked: U256::ZERO,
            finalized: false,
        };
        assert!(matches!(
            Epoch::try_from(overflow),
            Err(GitStakeError::Contract(_))
        ));
    }
}
