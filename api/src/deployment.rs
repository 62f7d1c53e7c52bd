use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_EXPLORER_URL;

/// Addresses of the five deployed contracts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractAddresses {
    pub epoch_manager: Address,
    pub staking_pool: Address,
    pub reward_distributor: Address,
    pub aave_integration: Address,
    pub mock_aave_integration: Address,
}

/// Which yield integration answers balance queries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum YieldSource {
    #[default]
    Aave,
    MockAave,
}

/// A deployment of the protocol on one chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deployment {
    pub contracts: ContractAddresses,

    #[serde(default)]
    pub yield_source: YieldSource,

    #[serde(default = "default_explorer_url")]
    pub explorer_url: String,
}

fn default_explorer_url() -> String {
    DEFAULT_EXPLORER_URL.to_string()
}

impl ContractAddresses {
    /// The yield contract selected by `source`.
    pub fn yield_contract(&self, source: YieldSource) -> Address {
        match source {
            YieldSource::Aave => self.aave_integration,
            YieldSource::MockAave => self.mock_aave_integration,
        }
    }
}
