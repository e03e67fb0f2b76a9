// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::path::PathBuf;

use alloy::primitives::Address;
use eyre::Context;
use upgradable_tools::{
    core::{
        artifact::HardhatArtifacts,
        estimation::{self, ProviderFeeEstimator},
        options::{DeploymentOptions, UnsafeAllow},
    },
    ops,
};

use crate::{
    common_args::{ProviderArgs, TxArgs},
    constants::DEFAULT_ARTIFACTS_DIR,
    error::CargoUpgradableResult,
};

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Name of the implementation contract, as found in the artifacts directory.
    contract: String,
    /// Proxy kind: transparent, uups or beacon.
    #[arg(long)]
    kind: Option<String>,
    /// Initializer name, or full signature when overloaded.
    #[arg(long)]
    initializer: Option<String>,
    /// Arguments passed to the initializer, or to the implementation constructor when there is
    /// no initializer.
    #[arg(
        long,
        num_args(1..),
        value_name = "ARGS",
        allow_negative_numbers = true,
    )]
    constructor_args: Vec<String>,
    /// Safety checks to skip: missing-initializer, constructor-args-mismatch.
    #[arg(long, value_delimiter = ',')]
    unsafe_allow: Vec<UnsafeAllow>,
    /// Admin of a transparent proxy.
    #[arg(long)]
    admin: Option<Address>,
    /// Also estimate the beacon of a beacon proxy.
    #[arg(long)]
    include_beacon: bool,
    /// Directory holding compiled Hardhat artifacts.
    #[arg(long, default_value = DEFAULT_ARTIFACTS_DIR)]
    artifacts: PathBuf,
    /// TOML or JSON file with deployment options. Flags take precedence over its contents.
    #[arg(long)]
    options: Option<PathBuf>,
    /// Sender of the simulated deployments.
    #[arg(long, default_value_t = Address::ZERO)]
    from: Address,
    /// Print the estimate as JSON.
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    tx: TxArgs,
    #[command(flatten)]
    provider: ProviderArgs,
}

impl Args {
    fn deployment_options(&self) -> eyre::Result<DeploymentOptions> {
        let mut options = match &self.options {
            Some(path) => DeploymentOptions::from_path(path)
                .wrap_err_with(|| format!("failed to read options from {}", path.display()))?,
            None => DeploymentOptions::default(),
        };
        if self.kind.is_some() {
            options.kind.clone_from(&self.kind);
        }
        if self.initializer.is_some() {
            options.initializer.clone_from(&self.initializer);
        }
        if !self.constructor_args.is_empty() {
            options.constructor_args.clone_from(&self.constructor_args);
        }
        options.unsafe_allow.extend(self.unsafe_allow.iter().copied());
        if self.admin.is_some() {
            options.admin = self.admin;
        }
        options.include_beacon |= self.include_beacon;
        self.tx.apply(&mut options.tx_overrides)?;
        Ok(options)
    }
}

pub async fn exec(args: Args) -> CargoUpgradableResult {
    let options = args.deployment_options()?;
    let artifacts = HardhatArtifacts::new(&args.artifacts);
    let provider = args.provider.build_provider().await?;
    let estimator = ProviderFeeEstimator::new(provider, args.from);

    if args.json {
        let aggregate =
            estimation::estimate(&args.contract, options, &artifacts, &estimator).await?;
        let json = serde_json::to_string_pretty(&aggregate).map_err(eyre::Error::from)?;
        println!("{json}");
    } else {
        ops::estimate(&args.contract, options, &artifacts, &estimator).await?;
    }
    Ok(())
}
