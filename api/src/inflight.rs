//! Single-flight guard for contract writes.
//!
//! Overlapping identical writes (a double-clicked claim) are rejected while
//! the first is still being submitted. Nothing is remembered once a call
//! returns.
use std::collections::HashSet;

use parking_lot::Mutex;
use tracing::debug;

use crate::error::GitStakeError;

#[derive(Debug, Default)]
pub struct InFlight {
    keys: Mutex<HashSet<String>>,
}

impl InFlight {
    /// Marks `key` as in flight until the returned guard is dropped.
    pub fn acquire(&self, key: String) -> Result<InFlightGuard<'_>, GitStakeError> {
        let mut keys = self.keys.lock();
        if !keys.insert(key.clone()) {
            debug!(%key, "rejecting duplicate in-flight call");
            return Err(GitStakeError::AlreadyInFlight(key));
        }
        Ok(InFlightGuard { owner: self, key })
    }

    #[cfg(test)]
    pub(crate) fn is_in_flight(&self, key: &str) -> bool {
        self.keys.lock().contains(key)
    }
}

#[derive(Debug)]
pub struct InFlightGuard<'a> {
    owner: &'a InFlight,
    key: String,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.owner.keys.lock().remove(&self.key);
    }
}
