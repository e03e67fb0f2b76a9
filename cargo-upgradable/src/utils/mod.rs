// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::fmt::Display;

use alloy::primitives::utils::{parse_units, ParseUnits};
use eyre::{bail, eyre};

use style::{BOLD, ERROR};

mod style;

pub fn convert_gwei_to_wei(fee_str: &str) -> eyre::Result<u128> {
    let wei = match parse_units(fee_str.trim(), "gwei") {
        Ok(ParseUnits::U256(wei)) => wei,
        Ok(ParseUnits::I256(_)) => bail!("Gas price must be non-negative"),
        Err(_) => bail!("Invalid gas price value: {}", fee_str),
    };
    u128::try_from(wei).map_err(|_| eyre!("Gas price of {} gwei does not fit in u128 wei", fee_str))
}

pub fn print_error(err: impl Display) {
    eprintln!("{ERROR}error{ERROR:#}{BOLD}:{BOLD:#} {err}");
}
