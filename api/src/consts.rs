use std::time::Duration;

/// Number of fractional digits of the chain's native asset.
pub const DECIMALS: usize = 18;

/// Default block explorer (Sepolia Etherscan).
pub const DEFAULT_EXPLORER_URL: &str = "https://sepolia.etherscan.io";

/// How long to wait for a submitted transaction to be mined.
pub const CONFIRMATION_TIMEOUT: Duration = Duration::from_secs(120);

/// Fractional digits shown when rendering amounts for humans.
pub const DISPLAY_PRECISION: usize = 6;
