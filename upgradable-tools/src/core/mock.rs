// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Stand-ins for contracts that do not exist yet at estimation time.
//!
//! A proxy's constructor references the address of a sibling contract (the implementation, or
//! the beacon) that would only exist once the real deployment runs. Estimation substitutes a
//! placeholder address for it.
//!
//! Placeholders are derived as `0xdeadbeef ++ keccak256(domain ++ role ++ 0x00 ++ context)[16..]`.
//! The hash makes them deterministic for identical inputs and distinct per role and contract.
//! The fixed `0xdeadbeef` prefix marks them as synthetic. A placeholder never represents a
//! deployable address and must never be used for anything but estimation.

use alloy::primitives::{keccak256, Address, Bytes};

use crate::core::{
    encoding::{encode_function_call, EncodingError},
    options::{ProxyKind, ResolvedOptions},
};

/// Leading bytes shared by every placeholder address.
pub const PLACEHOLDER_MARKER: [u8; 4] = [0xde, 0xad, 0xbe, 0xef];

const PLACEHOLDER_DOMAIN: &[u8] = b"upgradable-tools/placeholder";

/// Derives a synthetic address for the contract playing `role`.
pub fn placeholder_address(role: &str, context: &[u8]) -> Address {
    let mut preimage =
        Vec::with_capacity(PLACEHOLDER_DOMAIN.len() + role.len() + 1 + context.len());
    preimage.extend_from_slice(PLACEHOLDER_DOMAIN);
    preimage.extend_from_slice(role.as_bytes());
    preimage.push(0);
    preimage.extend_from_slice(context);
    let hash = keccak256(&preimage);

    let mut address = [0u8; 20];
    address[..PLACEHOLDER_MARKER.len()].copy_from_slice(&PLACEHOLDER_MARKER);
    address[PLACEHOLDER_MARKER.len()..].copy_from_slice(&hash[32 - 16..]);
    Address::from(address)
}

pub fn is_placeholder(address: &Address) -> bool {
    address.starts_with(&PLACEHOLDER_MARKER)
}

/// Where the implementation would be deployed.
pub fn implementation_placeholder(implementation: &str) -> Address {
    placeholder_address("implementation", implementation.as_bytes())
}

/// Admin of a transparent proxy when the caller did not name one.
pub fn admin_placeholder(implementation: &str) -> Address {
    placeholder_address("admin", implementation.as_bytes())
}

/// The dependency a proxy constructor needs, synthesized for one estimation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MockedDependency {
    /// Address handed to the proxy constructor in place of the real dependency.
    pub placeholder_address: Address,
    /// Encoded initializer call, empty when the proxy is not initialized.
    pub initialize_calldata: Bytes,
}

impl MockedDependency {
    /// Builds the dependency for `implementation` under the resolved proxy topology.
    ///
    /// The beacon placeholder also commits to the initializer calldata, so two estimations
    /// only share it when they would deploy identical beacon proxies.
    pub fn generate(
        implementation: &str,
        resolved: &ResolvedOptions,
    ) -> Result<Self, EncodingError> {
        let initialize_calldata = match resolved.initializer() {
            Some(initializer) => encode_function_call(initializer, resolved.constructor_args())?,
            None => Bytes::new(),
        };

        let implementation_address = implementation_placeholder(implementation);
        let placeholder_address = match resolved.kind() {
            ProxyKind::Transparent | ProxyKind::Uups => implementation_address,
            ProxyKind::Beacon => {
                let mut context = implementation_address.to_vec();
                context.extend_from_slice(&initialize_calldata);
                placeholder_address("beacon", &context)
            }
        };
        debug!(@grey,
            "mocked {} dependency at {} ({} bytes of initializer calldata)",
            resolved.kind(),
            placeholder_address,
            initialize_calldata.len()
        );

        Ok(Self {
            placeholder_address,
            initialize_calldata,
        })
    }
}
