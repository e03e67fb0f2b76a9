// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Dry-run fee estimation of a single contract deployment.

use std::fmt::Display;

use alloy::{
    network::TransactionBuilder,
    primitives::{utils::format_units, Address, Bytes, U256},
    providers::Provider,
    rpc::types::TransactionRequest,
};

use crate::{
    core::{
        artifact::Artifact,
        encoding::{coerce_args, EncodingError},
        options::TxOverrides,
        topology::{ConstructorArgs, ContractRole, PlannedDeployment},
    },
    utils::format_gas,
};

/// A planned deployment with its artifact resolved and initcode encoded.
#[derive(Clone, Debug)]
pub struct ContractDeployment {
    label: String,
    role: ContractRole,
    initcode: Bytes,
    value: U256,
    overrides: TxOverrides,
}

impl ContractDeployment {
    pub fn new(
        planned: &PlannedDeployment,
        artifact: &Artifact,
        overrides: &TxOverrides,
    ) -> Result<Self, EncodingError> {
        let constructor_args = match &planned.constructor_args {
            ConstructorArgs::Values(values) => values.clone(),
            ConstructorArgs::Raw(args) => {
                let context = format!("{} constructor", planned.label);
                let params = artifact
                    .abi
                    .constructor()
                    .map(|c| c.inputs.as_slice())
                    .unwrap_or_default();
                coerce_args(&context, params, args)?
            }
        };
        let initcode = artifact.initcode(&constructor_args)?;
        debug!(@grey,
            "encoded {} with {} constructor arguments ({} bytes of initcode)",
            planned.label,
            constructor_args.len(),
            initcode.len()
        );
        // only the proxy runs the initializer, so only it receives value
        let value = match planned.role {
            ContractRole::Proxy => overrides.value.unwrap_or_default(),
            ContractRole::Implementation | ContractRole::Beacon => U256::ZERO,
        };
        Ok(Self {
            label: planned.label.clone(),
            role: planned.role,
            initcode,
            value,
            overrides: overrides.clone(),
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn role(&self) -> ContractRole {
        self.role
    }

    pub fn initcode(&self) -> &Bytes {
        &self.initcode
    }

    pub fn value(&self) -> U256 {
        self.value
    }

    pub fn overrides(&self) -> &TxOverrides {
        &self.overrides
    }
}

/// Prices a contract deployment without submitting it.
///
/// Implementations must never send a transaction. Retrying, if desired, is theirs to do.
#[allow(async_fn_in_trait)]
pub trait FeeEstimator {
    type Error: Display;

    /// Returns the fee, in wei, of deploying `deployment`.
    async fn estimate_deployment_fee(
        &self,
        deployment: &ContractDeployment,
    ) -> Result<U256, Self::Error>;
}

#[derive(Debug, thiserror::Error)]
pub enum DeployerError {
    #[error("rpc error: {0}")]
    Rpc(#[from] alloy::transports::RpcError<alloy::transports::TransportErrorKind>),
}

/// Estimates deployment fees with `eth_estimateGas` and the network gas price.
#[derive(Debug)]
pub struct ProviderFeeEstimator<P> {
    provider: P,
    sender: Address,
}

impl<P: Provider> ProviderFeeEstimator<P> {
    pub fn new(provider: P, sender: Address) -> Self {
        Self { provider, sender }
    }
}

impl<P: Provider> FeeEstimator for ProviderFeeEstimator<P> {
    type Error = DeployerError;

    async fn estimate_deployment_fee(
        &self,
        deployment: &ContractDeployment,
    ) -> Result<U256, DeployerError> {
        let req = DeploymentRequest::new(self.sender, deployment);
        let gas = req.estimate_gas(&self.provider).await?;
        let gas_price = req.fee_per_gas(&self.provider).await?;
        debug!(@grey,
            "{} ({}): {} at {} gwei",
            deployment.label(),
            deployment.role(),
            format_gas(gas),
            format_units(gas_price, "gwei")
                .unwrap_or_default()
                .lavender()
        );
        // a u64 times a u128 always fits in 256 bits
        Ok(U256::from(gas) * U256::from(gas_price))
    }
}

/// Contract creation transaction, only ever simulated.
#[derive(Debug)]
struct DeploymentRequest {
    tx: TransactionRequest,
    gas_price_wei: Option<u128>,
}

impl DeploymentRequest {
    fn new(sender: Address, deployment: &ContractDeployment) -> Self {
        let mut tx = TransactionRequest::default()
            .with_from(sender)
            .with_deploy_code(deployment.initcode().clone())
            .with_value(deployment.value());
        if let Some(gas_limit) = deployment.overrides().gas_limit {
            tx = tx.with_gas_limit(gas_limit);
        }
        Self {
            tx,
            gas_price_wei: deployment.overrides().gas_price,
        }
    }

    async fn estimate_gas(&self, provider: &impl Provider) -> Result<u64, DeployerError> {
        Ok(provider.estimate_gas(self.tx.clone()).await?)
    }

    async fn fee_per_gas(&self, provider: &impl Provider) -> Result<u128, DeployerError> {
        match self.gas_price_wei {
            Some(wei) => Ok(wei),
            None => Ok(provider.get_gas_price().await?),
        }
    }
}
