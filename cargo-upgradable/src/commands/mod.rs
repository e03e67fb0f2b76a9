// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use crate::error::CargoUpgradableResult;

mod estimate;

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Estimate the cost of deploying a contract behind a proxy
    #[clap(visible_alias = "e")]
    Estimate(estimate::Args),
}

pub async fn exec(cmd: Command) -> CargoUpgradableResult {
    match cmd {
        Command::Estimate(args) => estimate::exec(args).await,
    }
}
