// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use alloy::{
    primitives::{utils::parse_ether, U256},
    providers::{Provider, ProviderBuilder},
};
use upgradable_tools::core::options::TxOverrides;

use crate::{constants::DEFAULT_ENDPOINT, utils::convert_gwei_to_wei};

#[derive(Debug, clap::Args)]
pub struct ProviderArgs {
    /// RPC endpoint used to simulate deployments
    #[arg(short, long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,
}

impl ProviderArgs {
    pub async fn build_provider(&self) -> eyre::Result<impl Provider> {
        let provider = ProviderBuilder::new().connect(&self.endpoint).await?;
        Ok(provider)
    }
}

#[derive(Debug, clap::Args)]
pub struct TxArgs {
    /// Gas price in gwei units. Defaults to the network's current gas price.
    #[arg(long)]
    gas_price_gwei: Option<String>,
    /// Gas limit handed to the node while simulating each deployment.
    #[arg(long)]
    gas_limit: Option<u64>,
    /// Amount of Ether sent to the proxy, and so to its initializer.
    #[arg(long, value_parser = parse_ether)]
    value: Option<U256>,
}

impl TxArgs {
    /// Applies the flags given on the command line over `overrides`.
    pub fn apply(&self, overrides: &mut TxOverrides) -> eyre::Result<()> {
        if let Some(gwei) = &self.gas_price_gwei {
            overrides.gas_price = Some(convert_gwei_to_wei(gwei)?);
        }
        if self.gas_limit.is_some() {
            overrides.gas_limit = self.gas_limit;
        }
        if self.value.is_some() {
            overrides.value = self.value;
        }
        Ok(())
    }
}
