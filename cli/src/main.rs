//! Command line client for the GitStake staking protocol.

mod cli;
mod config;
mod logging;

use std::time::{SystemTime, UNIX_EPOCH};

use alloy::primitives::{Address, U256};
use anyhow::{bail, Context, Result};
use clap::Parser;
use gitstake_api::prelude::*;
use serde::Serialize;

use crate::cli::{Cli, Commands, EpochArgs, UserArgs, WaitArgs};

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    let cli = Cli::parse();

    // Links need no chain access and no deployment file.
    if let Commands::Explorer(args) = &cli.command {
        let explorer = config::explorer_for(&cli.deployment)?;
        return log_explorer_links(&explorer, args);
    }

    let deployment = config::load_deployment(&cli.deployment)?;
    let facade = config::connect(
        cli.rpc_url.as_deref(),
        cli.private_key.as_deref(),
        &deployment,
    )?;
    let signer = facade.contracts().signer_address();
    let out = Output {
        json: cli.json,
        explorer: Explorer::new(deployment.explorer_url),
    };

    match cli.command {
        Commands::Epoch => log_epoch(&facade, &out).await,
        Commands::Stake(args) => {
            let user = user_or_signer(&args.user, signer);
            let epoch_id = epoch_or_current(&facade, &args.epoch).await?;
            let stake = facade
                .get_user_stake(user, epoch_id)
                .await
                .context("read user stake")?;
            out.amount("Stake", stake)
        }
        Commands::Prize(args) => {
            let epoch_id = epoch_or_current(&facade, &args).await?;
            let prize = facade
                .get_epoch_prize(epoch_id)
                .await
                .context("read epoch prize")?;
            out.amount("Prize", prize)
        }
        Commands::AaveBalance => {
            let balance = facade
                .get_aave_balance()
                .await
                .context("read aave balance")?;
            out.amount("Aave balance", balance)
        }
        Commands::IsWinner(args) => {
            let user = user_or_signer(&args.user, signer);
            let epoch_id = epoch_or_current(&facade, &args.epoch).await?;
            let winner = facade.is_winner(user, epoch_id).await;
            if out.json {
                return out.print_json(&winner);
            }
            println!("Winner: {}", if winner { "yes" } else { "no" });
            Ok(())
        }
        Commands::Eligibility(args) => {
            let user = user_or_signer(&args.user, signer);
            let epoch_id = epoch_or_current(&facade, &args.epoch).await?;
            log_eligibility(&facade, &out, user, epoch_id).await
        }
        Commands::Deposit(args) => {
            let pending = facade.deposit(&args.amount).await.context("deposit")?;
            out.pending(&facade, pending, &args.wait).await
        }
        Commands::Claim(args) => {
            let epoch_id = epoch_or_current(&facade, &args.epoch).await?;
            match facade.claim_if_eligible(epoch_id).await.context("claim")? {
                ClaimAttempt::Submitted(pending) => out.pending(&facade, pending, &args.wait).await,
                ClaimAttempt::Refused(outcome) => {
                    if out.json {
                        out.print_json(&ClaimAttempt::Refused(outcome))?;
                    } else {
                        println!("Claim not submitted: {outcome}");
                    }
                    Ok(())
                }
            }
        }
        Commands::Poke(wait) => {
            let pending = facade.poke().await.context("poke")?;
            out.pending(&facade, pending, &wait).await
        }
        Commands::SubmitWinners(args) => {
            let pending = facade
                .submit_winners(args.epoch, args.winners, args.signature)
                .await
                .context("submit winners")?;
            out.pending(&facade, pending, &args.wait).await
        }
        Commands::Dashboard(args) => {
            let user = user_or_signer(&args, signer);
            log_dashboard(&facade, &out, user).await
        }
        Commands::Explorer(_) => Ok(()),
    }
}

/// Renders results either as JSON or as indented status text.
struct Output {
    json: bool,
    explorer: Explorer,
}

impl Output {
    fn print_json<T: Serialize>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    fn amount(&self, label: &str, amount: U256) -> Result<()> {
        if self.json {
            return self.print_json(&to_decimal(amount));
        }
        println!("{label}: {}", eth(amount));
        Ok(())
    }

    async fn pending<C: ProtocolContracts>(
        &self,
        facade: &ProtocolFacade<C>,
        pending: PendingTransaction,
        wait: &WaitArgs,
    ) -> Result<()> {
        if self.json {
            self.print_json(&pending)?;
        } else {
            println!("Transaction submitted: {}", pending.hash);
            println!("  {}", self.explorer.tx_url(&pending.hash));
        }
        if wait.wait {
            facade.confirm(pending).await.context("confirm transaction")?;
            if !self.json {
                println!("Transaction confirmed.");
            }
        }
        Ok(())
    }
}

fn eth(amount: U256) -> String {
    format!("{} ETH", format_amount(amount, DISPLAY_PRECISION))
}

fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

fn user_or_signer(args: &UserArgs, signer: Address) -> Address {
    args.address.unwrap_or(signer)
}

async fn epoch_or_current<C: ProtocolContracts>(
    facade: &ProtocolFacade<C>,
    args: &EpochArgs,
) -> Result<u64> {
    match args.epoch {
        Some(id) => Ok(id),
        None => Ok(facade
            .get_current_epoch()
            .await
            .context("read current epoch")?
            .id),
    }
}

fn print_epoch(epoch: &Epoch) {
    let now = now();
    println!("Epoch");
    println!("  Id: {}", epoch.id);
    println!("  Start time: {}", epoch.start_time);
    println!("  End time: {}", epoch.end_time);
    println!("  Total staked: {}", eth(epoch.total_staked));
    println!("  Finalized: {}", if epoch.finalized { "yes" } else { "no" });
    if epoch.is_active(now) {
        println!("  Time remaining: {}s", epoch.time_remaining(now));
    } else if epoch.has_ended(now) {
        println!("  Status: ended");
    } else {
        println!("  Status: not started");
    }
}

async fn log_epoch<C: ProtocolContracts>(facade: &ProtocolFacade<C>, out: &Output) -> Result<()> {
    let epoch = facade
        .get_current_epoch()
        .await
        .context("read current epoch")?;
    if out.json {
        return out.print_json(&epoch);
    }
    print_epoch(&epoch);
    Ok(())
}

async fn log_eligibility<C: ProtocolContracts>(
    facade: &ProtocolFacade<C>,
    out: &Output,
    user: Address,
    epoch_id: u64,
) -> Result<()> {
    let status = facade
        .check_eligibility(user, epoch_id)
        .await
        .context("check eligibility")?;
    if out.json {
        #[derive(Serialize)]
        struct Report {
            #[serde(flatten)]
            status: EligibilityStatus,
            outcome: ClaimEligibility,
        }
        return out.print_json(&Report {
            status,
            outcome: status.outcome(),
        });
    }
    let yes_no = |b: bool| if b { "yes" } else { "no" };
    println!("Eligibility");
    println!("  User: {user}");
    println!("  Epoch: {epoch_id}");
    println!("  Epoch exists: {}", yes_no(status.epoch_exists));
    println!("  Staked: {} ({})", yes_no(status.has_staked), eth(status.stake_amount));
    println!("  Winners set: {}", yes_no(status.winners_set));
    println!(
        "  Winnings: {} ({})",
        yes_no(status.has_winnings),
        eth(status.allocation_amount)
    );
    println!("  Finalized: {}", yes_no(status.is_finalized));
    println!("  {}", status.outcome());
    Ok(())
}

async fn log_dashboard<C: ProtocolContracts>(
    facade: &ProtocolFacade<C>,
    out: &Output,
    user: Address,
) -> Result<()> {
    let dashboard = facade
        .user_dashboard(user)
        .await
        .context("read dashboard")?;
    if out.json {
        return out.print_json(&dashboard);
    }
    print_epoch(&dashboard.epoch);
    println!();
    println!("User");
    println!("  Address: {}", dashboard.user);
    println!("  Explorer: {}", out.explorer.address_url(&dashboard.user));
    println!("  Stake: {}", eth(dashboard.user_stake));
    println!("  Epoch prize: {}", eth(dashboard.epoch_prize));
    println!("  Aave balance: {}", eth(dashboard.aave_balance));
    Ok(())
}

fn log_explorer_links(explorer: &Explorer, args: &cli::ExplorerArgs) -> Result<()> {
    if args.tx.is_none() && args.address.is_none() {
        bail!("pass --tx and/or --address");
    }
    if let Some(hash) = &args.tx {
        println!("{}", explorer.tx_url(hash));
    }
    if let Some(address) = &args.address {
        println!("{}", explorer.address_url(address));
    }
    Ok(())
}
