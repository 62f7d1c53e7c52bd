//! Client-side bindings and facade for the GitStake staking protocol.
//!
//! The deployed contracts are the authority for every piece of state; this
//! crate only translates user intents into contract calls, converts amounts
//! between decimal strings and base units, and derives claim eligibility.
pub mod abi;
pub mod consts;
pub mod contracts;
pub mod deployment;
pub mod error;
pub mod explorer;
pub mod facade;
pub mod inflight;
pub mod state;
pub mod units;

#[cfg(test)]
pub(crate) mod test_utils;

pub mod prelude {
    pub use crate::consts::*;
    pub use crate::contracts::*;
    pub use crate::deployment::*;
    pub use crate::error::*;
    pub use crate::explorer::*;
    pub use crate::facade::*;
    pub use crate::state::*;
    pub use crate::units::*;
}
