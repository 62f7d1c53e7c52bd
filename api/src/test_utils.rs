use std::collections::{HashMap, HashSet};

use alloy::primitives::{Address, Bytes, TxHash, U256};
use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Notify;

use crate::{contracts::ProtocolContracts, error::GitStakeError, state::Epoch};

/// In-memory stand-in for the deployed contracts.
#[derive(Debug, Default)]
pub(crate) struct MockContracts {
    pub(crate) state: Mutex<MockState>,
    /// When set, every write parks until [`MockContracts::release_writes`].
    write_gate: Option<Notify>,
}

#[derive(Debug, Default)]
pub(crate) struct MockState {
    pub(crate) signer: Address,
    pub(crate) current_epoch: u64,
    pub(crate) epochs: HashMap<u64, Epoch>,
    pub(crate) prizes: HashMap<u64, U256>,
    pub(crate) stakes: HashMap<(Address, u64), U256>,
    pub(crate) allocations: HashMap<(Address, u64), U256>,
    pub(crate) winners_set: HashSet<u64>,
    pub(crate) aave_balance: U256,
    pub(crate) fail_reads: bool,
    /// Reads that fail by method name, e.g. `"allocation"`.
    pub(crate) failing: HashSet<&'static str>,
    pub(crate) revert_receipts: bool,
    /// Writes in submission order.
    pub(crate) writes: Vec<String>,
}

pub(crate) fn user() -> Address {
    Address::repeat_byte(0x42)
}

pub(crate) fn epoch(id: u64, finalized: bool) -> Epoch {
    Epoch {
        id,
        start_time: 1_700_000_000,
        end_time: 1_700_604_800,
        total_staked: U256::from(5_000_000_000_000_000_000u64),
        finalized,
    }
}

impl MockContracts {
    /// Epoch `id` is current; `user()` staked, won, and the epoch is finalized.
    pub(crate) fn eligible(id: u64) -> Self {
        let mock = Self::default();
        {
            let mut state = mock.state.lock();
            state.signer = user();
            state.current_epoch = id;
            state.epochs.insert(id, epoch(id, true));
            state.prizes.insert(id, U256::from(300));
            state.stakes.insert((user(), id), U256::from(1_000));
            state.allocations.insert((user(), id), U256::from(250));
            state.winners_set.insert(id);
            state.aave_balance = U256::from(9_999);
        }
        mock
    }

    pub(crate) fn with_write_gate(self) -> Self {
        Self {
            write_gate: Some(Notify::new()),
            ..self
        }
    }

    pub(crate) fn release_writes(&self) {
        if let Some(gate) = &self.write_gate {
            gate.notify_one();
        }
    }

    pub(crate) fn writes(&self) -> Vec<String> {
        self.state.lock().writes.clone()
    }

    fn read<T>(
        &self,
        method: &'static str,
        f: impl FnOnce(&MockState) -> T,
    ) -> Result<T, GitStakeError> {
        let state = self.state.lock();
        if state.fail_reads || state.failing.contains(method) {
            return Err(GitStakeError::Contract(format!("{method}: execution reverted")));
        }
        Ok(f(&*state))
    }

    async fn write(&self, call: String) -> Result<TxHash, GitStakeError> {
        let hash = {
            let mut state = self.state.lock();
            state.writes.push(call);
            TxHash::repeat_byte(state.writes.len() as u8)
        };
        if let Some(gate) = &self.write_gate {
            gate.notified().await;
        }
        Ok(hash)
    }
}

#[async_trait]
impl ProtocolContracts for MockContracts {
    fn signer_address(&self) -> Address {
        self.state.lock().signer
    }

    async fn deposit(&self, value: U256) -> Result<TxHash, GitStakeError> {
        self.write(format!("deposit({value})")).await
    }

    async fn current_epoch_id(&self) -> Result<u64, GitStakeError> {
        self.read("current_epoch_id", |s| s.current_epoch)
    }

    async fn epoch(&self, epoch_id: u64) -> Result<Epoch, GitStakeError> {
        self.read("epoch", |s| {
            s.epochs.get(&epoch_id).copied().unwrap_or(Epoch {
                id: 0,
                start_time: 0,
                end_time: 0,
                total_staked: U256::ZERO,
                finalized: false,
            })
        })
    }

    async fn epoch_prize(&self, epoch_id: u64) -> Result<U256, GitStakeError> {
        self.read("epoch_prize", |s| {
            s.prizes.get(&epoch_id).copied().unwrap_or_default()
        })
    }

    async fn poke(&self) -> Result<TxHash, GitStakeError> {
        self.write("poke()".to_string()).await
    }

    async fn user_stake(&self, user: Address, epoch_id: u64) -> Result<U256, GitStakeError> {
        self.read("user_stake", |s| {
            s.stakes.get(&(user, epoch_id)).copied().unwrap_or_default()
        })
    }

    async fn winners_set(&self, epoch_id: u64) -> Result<bool, GitStakeError> {
        self.read("winners_set", |s| s.winners_set.contains(&epoch_id))
    }

    async fn allocation(&self, user: Address, epoch_id: u64) -> Result<U256, GitStakeError> {
        self.read("allocation", |s| {
            s.allocations.get(&(user, epoch_id)).copied().unwrap_or_default()
        })
    }

    async fn submit_winners(
        &self,
        epoch_id: u64,
        winners: Vec<Address>,
        signature: Bytes,
    ) -> Result<TxHash, GitStakeError> {
        self.write(format!(
            "submitWinners({epoch_id}, {} winners, {} byte signature)",
            winners.len(),
            signature.len()
        ))
        .await
    }

    async fn claim(&self, epoch_id: u64) -> Result<TxHash, GitStakeError> {
        self.write(format!("claim({epoch_id})")).await
    }

    async fn aave_balance(&self) -> Result<U256, GitStakeError> {
        self.read("aave_balance", |s| s.aave_balance)
    }

    async fn confirm(&self, _hash: TxHash) -> Result<bool, GitStakeError> {
        Ok(!self.state.lock().revert_receipts)
    }
}
