// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Fixtures shared by unit tests.

use std::{cell::RefCell, collections::HashMap};

use alloy::{
    json_abi::JsonAbi,
    primitives::{bytes, Bytes, U256},
};

use crate::core::{
    artifact::{Artifact, ArtifactError, ArtifactSource},
    estimation::{ContractDeployment, FeeEstimator},
    topology::{BEACON_PROXY, ERC1967_PROXY, TRANSPARENT_PROXY, UPGRADEABLE_BEACON},
};

pub fn greeter_abi() -> JsonAbi {
    JsonAbi::parse([
        "function initialize(string _greeting)",
        "function greet() view returns (string)",
        "function setGreeting(string _greeting)",
    ])
    .unwrap()
}

pub fn greeter_artifact() -> Artifact {
    Artifact {
        contract_name: "Greeter".into(),
        source_name: Some("contracts/Greeter.sol".into()),
        abi: greeter_abi(),
        bytecode: bytes!("608060405234801561001057600080fd5b50"),
    }
}

/// Proxy contract artifacts with the constructors of OpenZeppelin 4.x.
pub fn proxy_artifact(label: &str) -> Artifact {
    let constructor = match label {
        TRANSPARENT_PROXY => "constructor(address _logic, address admin_, bytes _data)",
        ERC1967_PROXY => "constructor(address _logic, bytes _data)",
        UPGRADEABLE_BEACON => "constructor(address implementation_)",
        BEACON_PROXY => "constructor(address beacon, bytes data)",
        _ => panic!("no proxy artifact named {label}"),
    };
    Artifact {
        contract_name: label.into(),
        source_name: None,
        abi: JsonAbi::parse([constructor]).unwrap(),
        bytecode: bytes!("6080604052604051610400380380"),
    }
}

/// In-memory artifacts: the greeter and every proxy contract.
#[derive(Debug)]
pub struct StubArtifacts(HashMap<String, Artifact>);

impl Default for StubArtifacts {
    fn default() -> Self {
        let mut artifacts: HashMap<_, _> = [
            TRANSPARENT_PROXY,
            ERC1967_PROXY,
            UPGRADEABLE_BEACON,
            BEACON_PROXY,
        ]
        .into_iter()
        .map(|label| (label.to_string(), proxy_artifact(label)))
        .collect();
        artifacts.insert("Greeter".into(), greeter_artifact());
        Self(artifacts)
    }
}

impl StubArtifacts {
    pub fn without(mut self, label: &str) -> Self {
        self.0.remove(label);
        self
    }

    /// Replaces the artifact of the same contract name.
    pub fn with(mut self, artifact: Artifact) -> Self {
        self.0.insert(artifact.contract_name.clone(), artifact);
        self
    }
}

impl ArtifactSource for StubArtifacts {
    fn resolve_artifact(&self, label: &str) -> Result<Artifact, ArtifactError> {
        self.0
            .get(label)
            .cloned()
            .ok_or_else(|| ArtifactError::NotFound(label.to_string()))
    }
}

/// Fixed per-contract fees, recording every request it is asked to price.
#[derive(Debug, Default)]
pub struct StubEstimator {
    costs: HashMap<String, u64>,
    failing: Option<String>,
    calls: RefCell<Vec<String>>,
    initcodes: RefCell<Vec<Bytes>>,
}

impl StubEstimator {
    pub fn new<'a>(costs: impl IntoIterator<Item = (&'a str, u64)>) -> Self {
        Self {
            costs: costs
                .into_iter()
                .map(|(label, wei)| (label.to_string(), wei))
                .collect(),
            ..Default::default()
        }
    }

    /// Reverts when asked to price `label`.
    pub fn failing_on(mut self, label: &str) -> Self {
        self.failing = Some(label.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn initcodes(&self) -> Vec<Bytes> {
        self.initcodes.borrow().clone()
    }
}

impl FeeEstimator for StubEstimator {
    type Error = String;

    async fn estimate_deployment_fee(
        &self,
        deployment: &ContractDeployment,
    ) -> Result<U256, String> {
        let label = deployment.label().to_string();
        self.calls.borrow_mut().push(label.clone());
        self.initcodes
            .borrow_mut()
            .push(deployment.initcode().clone());
        if self.failing.as_ref() == Some(&label) {
            return Err("execution reverted".to_string());
        }
        self.costs
            .get(&label)
            .map(|wei| U256::from(*wei))
            .ok_or_else(|| format!("no stub cost for {label}"))
    }
}
