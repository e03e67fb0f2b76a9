// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! General purpose utilities.

use alloy::primitives::{utils, U256};
use color::Color;

pub mod color;
#[cfg(test)]
pub(crate) mod testing;

/// Converts a wei amount to a human-readable ether string, e.g. `0.0015 ETH`.
///
/// Trailing zeros of the fractional part are trimmed, but at least one decimal digit is kept.
pub fn format_ether(wei: U256) -> String {
    let text = utils::format_ether(wei);
    let text = match text.split_once('.') {
        Some((whole, frac)) => {
            let frac = frac.trim_end_matches('0');
            let frac = if frac.is_empty() { "0" } else { frac };
            format!("{whole}.{frac}")
        }
        None => text,
    };
    format!("{text} ETH")
}

/// Pretty-prints a gas amount.
pub fn format_gas(gas: u64) -> String {
    let text = format!("{gas} gas");
    if gas <= 3_000_000 {
        text.mint()
    } else if gas <= 7_000_000 {
        text.yellow()
    } else {
        text.pink()
    }
}
