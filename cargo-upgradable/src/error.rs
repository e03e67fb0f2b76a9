// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::fmt;
use std::process::ExitCode;

use upgradable_tools::core::estimation::EstimationError;

pub type CargoUpgradableResult = Result<(), CargoUpgradableError>;

/// Exit code for options rejected before anything was estimated.
const INVALID_INPUT: u8 = 2;

#[derive(Debug)]
pub struct CargoUpgradableError {
    error: eyre::Error,
    exit_code: ExitCode,
}

impl CargoUpgradableError {
    pub fn exit_code(&self) -> ExitCode {
        self.exit_code
    }
}

impl fmt::Display for CargoUpgradableError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.error.fmt(f)
    }
}

impl From<std::io::Error> for CargoUpgradableError {
    fn from(err: std::io::Error) -> Self {
        Self {
            error: err.into(),
            exit_code: ExitCode::FAILURE,
        }
    }
}

impl From<eyre::Error> for CargoUpgradableError {
    fn from(error: eyre::Error) -> Self {
        let exit_code = match error.downcast_ref::<EstimationError>() {
            Some(
                EstimationError::InvalidOptions(_)
                | EstimationError::UnsupportedProxyKind(_)
                | EstimationError::Encoding(_),
            ) => ExitCode::from(INVALID_INPUT),
            _ => ExitCode::FAILURE,
        };
        Self { error, exit_code }
    }
}

impl From<EstimationError> for CargoUpgradableError {
    fn from(err: EstimationError) -> Self {
        eyre::Error::from(err).into()
    }
}
