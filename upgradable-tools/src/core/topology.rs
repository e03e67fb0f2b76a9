// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Which contracts a proxied deployment consists of, per proxy kind.
//!
//! Proxy contracts are the OpenZeppelin 4.x ones, looked up by artifact name:
//!
//! | kind        | contracts, in deployment order                                                      |
//! |-------------|-------------------------------------------------------------------------------------|
//! | transparent | implementation, `TransparentUpgradeableProxy(logic, admin, data)`                   |
//! | uups        | implementation, `ERC1967Proxy(logic, data)`                                         |
//! | beacon      | implementation, optionally `UpgradeableBeacon(logic)`, `BeaconProxy(beacon, data)` |

use std::fmt;

use alloy::{dyn_abi::DynSolValue, primitives::Address};
use serde::Serialize;

use crate::core::{
    mock::{admin_placeholder, implementation_placeholder, MockedDependency},
    options::{ProxyKind, ResolvedOptions},
};

pub const TRANSPARENT_PROXY: &str = "TransparentUpgradeableProxy";
pub const ERC1967_PROXY: &str = "ERC1967Proxy";
pub const UPGRADEABLE_BEACON: &str = "UpgradeableBeacon";
pub const BEACON_PROXY: &str = "BeaconProxy";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContractRole {
    Implementation,
    Beacon,
    Proxy,
}

impl fmt::Display for ContractRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Implementation => f.write_str("implementation"),
            Self::Beacon => f.write_str("beacon"),
            Self::Proxy => f.write_str("proxy"),
        }
    }
}

/// Constructor arguments of a planned deployment.
#[derive(Clone, Debug, PartialEq)]
pub enum ConstructorArgs {
    /// User-provided values, parsed against the artifact's constructor when encoding.
    Raw(Vec<String>),
    /// Values already typed by the planner.
    Values(Vec<DynSolValue>),
}

/// One contract to estimate, described but not yet encoded.
#[derive(Clone, Debug, PartialEq)]
pub struct PlannedDeployment {
    pub label: String,
    pub role: ContractRole,
    pub constructor_args: ConstructorArgs,
}

impl PlannedDeployment {
    fn new(label: &str, role: ContractRole, args: Vec<DynSolValue>) -> Self {
        Self {
            label: label.to_string(),
            role,
            constructor_args: ConstructorArgs::Values(args),
        }
    }
}

/// Lists the contracts to deploy for `implementation` behind the resolved proxy kind,
/// dependencies first.
pub fn plan(
    implementation: &str,
    resolved: &ResolvedOptions,
    mocked: &MockedDependency,
) -> Vec<PlannedDeployment> {
    // The implementation is only constructed with the user's arguments when they are not
    // meant for an initializer.
    let implementation_args = match resolved.initializer() {
        Some(_) => Vec::new(),
        None => resolved.constructor_args().to_vec(),
    };
    let mut topology = vec![PlannedDeployment {
        label: implementation.to_string(),
        role: ContractRole::Implementation,
        constructor_args: ConstructorArgs::Raw(implementation_args),
    }];

    let dependency = DynSolValue::Address(mocked.placeholder_address);
    let data = DynSolValue::Bytes(mocked.initialize_calldata.to_vec());
    match resolved.kind() {
        ProxyKind::Transparent => {
            let admin = resolved
                .admin()
                .unwrap_or_else(|| admin_placeholder(implementation));
            topology.push(PlannedDeployment::new(
                TRANSPARENT_PROXY,
                ContractRole::Proxy,
                vec![dependency, DynSolValue::Address(admin), data],
            ));
        }
        ProxyKind::Uups => {
            topology.push(PlannedDeployment::new(
                ERC1967_PROXY,
                ContractRole::Proxy,
                vec![dependency, data],
            ));
        }
        ProxyKind::Beacon => {
            if resolved.include_beacon() {
                topology.push(beacon(implementation_placeholder(implementation)));
            }
            topology.push(PlannedDeployment::new(
                BEACON_PROXY,
                ContractRole::Proxy,
                vec![dependency, data],
            ));
        }
    }
    topology
}

fn beacon(implementation: Address) -> PlannedDeployment {
    PlannedDeployment::new(
        UPGRADEABLE_BEACON,
        ContractRole::Beacon,
        vec![DynSolValue::Address(implementation)],
    )
}
