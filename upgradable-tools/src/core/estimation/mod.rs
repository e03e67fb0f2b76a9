// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Fee estimation of a proxied deployment, end to end.
//!
//! Nothing here submits a transaction: every contract is priced through a [`FeeEstimator`].

use crate::core::{
    artifact::{ArtifactError, ArtifactSource},
    encoding::EncodingError,
    mock::MockedDependency,
    options::{DeploymentOptions, OptionsError, UnsupportedProxyKind},
    topology::{self, ContractRole},
};

pub use aggregate::{AggregateEstimate, ContractFeeEstimate, OverflowError};
pub use deployer::{ContractDeployment, DeployerError, FeeEstimator, ProviderFeeEstimator};

pub mod aggregate;
pub mod deployer;

#[derive(Debug, thiserror::Error)]
pub enum EstimationError {
    #[error("invalid options: {0}")]
    InvalidOptions(#[from] OptionsError),
    #[error("artifact not found: {0}")]
    ArtifactNotFound(String),
    #[error("{0}")]
    Artifact(ArtifactError),
    #[error("encoding error: {0}")]
    Encoding(#[from] EncodingError),
    #[error("{0}")]
    UnsupportedProxyKind(#[from] UnsupportedProxyKind),
    #[error("failed to estimate {contract} deployment: {reason}")]
    EstimationFailed { contract: String, reason: String },
    #[error("{0}")]
    Overflow(#[from] OverflowError),
}

impl From<ArtifactError> for EstimationError {
    fn from(err: ArtifactError) -> Self {
        match err {
            ArtifactError::NotFound(label) => Self::ArtifactNotFound(label),
            err => Self::Artifact(err),
        }
    }
}

/// Estimates the total fee of deploying `implementation` behind the proxy described by
/// `options`.
///
/// Every deployment is encoded before the first estimator call, so invalid options or
/// arguments never reach the network. Contracts are then estimated one at a time in
/// deployment order, stopping at the first failure.
pub async fn estimate(
    implementation: &str,
    options: DeploymentOptions,
    artifacts: &impl ArtifactSource,
    estimator: &impl FeeEstimator,
) -> Result<AggregateEstimate, EstimationError> {
    let kind = options.proxy_kind()?;
    let implementation_artifact = artifacts.resolve_artifact(implementation)?;
    let resolved = options.resolve(kind, &implementation_artifact.abi)?;
    let mocked = MockedDependency::generate(implementation, &resolved)?;

    let planned = topology::plan(implementation, &resolved, &mocked);
    let mut deployments = Vec::with_capacity(planned.len());
    for planned in &planned {
        let overrides = resolved.tx_overrides();
        let deployment = match planned.role {
            ContractRole::Implementation => {
                ContractDeployment::new(planned, &implementation_artifact, overrides)?
            }
            ContractRole::Beacon | ContractRole::Proxy => {
                let artifact = artifacts.resolve_artifact(&planned.label)?;
                ContractDeployment::new(planned, &artifact, overrides)?
            }
        };
        deployments.push(deployment);
    }
    info!(@grey, "estimating {} deployment of {implementation}: {} contracts", kind, deployments.len());

    let mut per_contract = Vec::with_capacity(deployments.len());
    for deployment in &deployments {
        let wei_cost = estimator
            .estimate_deployment_fee(deployment)
            .await
            .map_err(|err| EstimationError::EstimationFailed {
                contract: deployment.label().to_string(),
                reason: err.to_string(),
            })?;
        per_contract.push(ContractFeeEstimate {
            label: deployment.label().to_string(),
            role: deployment.role(),
            wei_cost,
        });
    }
    Ok(AggregateEstimate::new(per_contract)?)
}
