// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Deployment fee estimation of a contract behind a proxy.

use crate::{
    core::{
        artifact::ArtifactSource,
        estimation::{self, AggregateEstimate, FeeEstimator},
        options::DeploymentOptions,
    },
    utils::{color::Color, format_ether},
};

/// Estimates the deployment and prints a per-contract report followed by the total.
pub async fn estimate(
    implementation: &str,
    options: DeploymentOptions,
    artifacts: &impl ArtifactSource,
    estimator: &impl FeeEstimator,
) -> eyre::Result<AggregateEstimate> {
    let aggregate = estimation::estimate(implementation, options, artifacts, estimator).await?;

    greyln!("estimates");
    let mut report = aggregate.report(|wei| format_ether(wei).lavender());
    let total = report.pop().unwrap_or_default();
    for line in report {
        greyln!("{line}");
    }
    mintln!("{total}");
    Ok(aggregate)
}
