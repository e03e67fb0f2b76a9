// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

/// The default endpoint, a local development node.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8545";

/// Where Hardhat writes compiled artifacts by default.
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";
