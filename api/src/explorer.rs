use alloy::primitives::{hex, Address, TxHash};

use crate::consts::DEFAULT_EXPLORER_URL;

/// Builds block explorer links by appending to a base URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Explorer {
    base_url: String,
}

impl Explorer {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn tx_url(&self, hash: &TxHash) -> String {
        format!("{}/tx/{}", self.base_url, hex::encode_prefixed(hash))
    }

    pub fn address_url(&self, address: &Address) -> String {
        format!("{}/address/{}", self.base_url, address.to_checksum(None))
    }
}

impl Default for Explorer {
    fn default() -> Self {
        Self::new(DEFAULT_EXPLORER_URL)
    }
}
