use std::path::PathBuf;

use alloy::primitives::{Address, Bytes, TxHash};
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "gitstake", about = "GitStake staking client", version)]
pub(crate) struct Cli {
    #[arg(long, env = "GITSTAKE_RPC_URL", help = "the JSON-RPC endpoint of the chain")]
    pub(crate) rpc_url: Option<String>,

    #[arg(
        long,
        env = "GITSTAKE_PRIVATE_KEY",
        hide_env_values = true,
        help = "hex private key of the signing account"
    )]
    pub(crate) private_key: Option<String>,

    #[arg(
        long,
        env = "GITSTAKE_DEPLOYMENT",
        default_value = "gitstake.toml",
        help = "the path to the deployment file"
    )]
    pub(crate) deployment: PathBuf,

    #[arg(long, global = true, help = "print results as JSON")]
    pub(crate) json: bool,

    #[command(subcommand)]
    pub(crate) command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub(crate) enum Commands {
    /// Show the current epoch.
    Epoch,

    /// Show a user's stake in an epoch.
    Stake(UserEpochArgs),

    /// Show the prize of an epoch.
    Prize(EpochArgs),

    /// Show the yield balance held in Aave.
    AaveBalance,

    /// Check whether a user won an epoch.
    IsWinner(UserEpochArgs),

    /// Explain whether a user can claim an epoch's prize.
    Eligibility(UserEpochArgs),

    /// Stake into the current epoch.
    Deposit(DepositArgs),

    /// Claim the signer's prize for an epoch.
    Claim(ClaimArgs),

    /// Advance the epoch lifecycle if it is due.
    Poke(WaitArgs),

    /// Submit the signed winner list for an epoch.
    SubmitWinners(SubmitWinnersArgs),

    /// Show the current epoch together with a user's position.
    Dashboard(UserArgs),

    /// Print block explorer links.
    Explorer(ExplorerArgs),
}

#[derive(Args, Debug, Clone)]
pub(crate) struct EpochArgs {
    #[arg(long, help = "the epoch id, defaults to the current epoch")]
    pub(crate) epoch: Option<u64>,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct UserArgs {
    #[arg(long, help = "the user address, defaults to the signer")]
    pub(crate) address: Option<Address>,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct UserEpochArgs {
    #[clap(flatten)]
    pub(crate) epoch: EpochArgs,

    #[clap(flatten)]
    pub(crate) user: UserArgs,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct WaitArgs {
    #[arg(long, help = "wait for the transaction to be confirmed")]
    pub(crate) wait: bool,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct DepositArgs {
    #[arg(help = "the amount to stake, in whole units (e.g. 0.5)")]
    pub(crate) amount: String,

    #[clap(flatten)]
    pub(crate) wait: WaitArgs,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct ClaimArgs {
    #[clap(flatten)]
    pub(crate) epoch: EpochArgs,

    #[clap(flatten)]
    pub(crate) wait: WaitArgs,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct SubmitWinnersArgs {
    #[arg(long, help = "the epoch the winners belong to")]
    pub(crate) epoch: u64,

    #[arg(long, value_delimiter = ',', help = "comma separated winner addresses")]
    pub(crate) winners: Vec<Address>,

    #[arg(long, help = "hex signature over the winner list")]
    pub(crate) signature: Bytes,

    #[clap(flatten)]
    pub(crate) wait: WaitArgs,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct ExplorerArgs {
    #[arg(long, help = "a transaction hash")]
    pub(crate) tx: Option<TxHash>,

    #[arg(long, help = "an account or contract address")]
    pub(crate) address: Option<Address>,
}
