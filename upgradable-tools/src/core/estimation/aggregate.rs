// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::fmt;

use alloy::primitives::U256;
use serde::Serialize;

use crate::{core::topology::ContractRole, utils::format_ether};

/// Estimated fee of deploying one contract.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ContractFeeEstimate {
    pub label: String,
    pub role: ContractRole,
    pub wei_cost: U256,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("overflow summing deployment fees")]
pub struct OverflowError;

/// Per-contract estimates in deployment order, and their sum.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AggregateEstimate {
    per_contract: Vec<ContractFeeEstimate>,
    total_wei: U256,
}

impl AggregateEstimate {
    pub fn new(per_contract: Vec<ContractFeeEstimate>) -> Result<Self, OverflowError> {
        let total_wei = per_contract
            .iter()
            .try_fold(U256::ZERO, |total, estimate| {
                total.checked_add(estimate.wei_cost)
            })
            .ok_or(OverflowError)?;
        Ok(Self {
            per_contract,
            total_wei,
        })
    }

    pub fn per_contract(&self) -> &[ContractFeeEstimate] {
        &self.per_contract
    }

    pub fn total_wei(&self) -> U256 {
        self.total_wei
    }

    /// Human-readable report, one line per contract followed by the total.
    pub fn report(&self, display: impl Fn(U256) -> String) -> Vec<String> {
        self.per_contract
            .iter()
            .map(|estimate| {
                format!(
                    "{} deployment estimated at {}",
                    estimate.label,
                    display(estimate.wei_cost)
                )
            })
            .chain(std::iter::once(format!(
                "Total estimated cost: {}",
                display(self.total_wei)
            )))
            .collect()
    }
}

impl fmt::Display for AggregateEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.report(format_ether) {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn estimate(label: &str, role: ContractRole, wei: u64) -> ContractFeeEstimate {
        ContractFeeEstimate {
            label: label.into(),
            role,
            wei_cost: U256::from(wei),
        }
    }

    #[test]
    fn sums_in_order() {
        let aggregate = AggregateEstimate::new(vec![
            estimate("Greeter", ContractRole::Implementation, 1_000_000),
            estimate("UpgradeableBeacon", ContractRole::Beacon, 250_000),
            estimate("BeaconProxy", ContractRole::Proxy, 500_000),
        ])
        .unwrap();
        assert_eq!(aggregate.total_wei(), U256::from(1_750_000));
        let labels: Vec<_> = aggregate
            .per_contract()
            .iter()
            .map(|e| e.label.as_str())
            .collect();
        assert_eq!(labels, ["Greeter", "UpgradeableBeacon", "BeaconProxy"]);
    }

    #[test]
    fn empty_sums_to_zero() {
        let aggregate = AggregateEstimate::new(vec![]).unwrap();
        assert_eq!(aggregate.total_wei(), U256::ZERO);
    }

    #[test]
    fn overflow_is_an_error() {
        let mut big = estimate("A", ContractRole::Implementation, 0);
        big.wei_cost = U256::MAX;
        let one = estimate("B", ContractRole::Proxy, 1);
        assert_eq!(AggregateEstimate::new(vec![big, one]), Err(OverflowError));
    }

    #[test]
    fn reports_each_contract_and_total() {
        let aggregate = AggregateEstimate::new(vec![
            estimate("Greeter", ContractRole::Implementation, 1_000_000),
            estimate("BeaconProxy", ContractRole::Proxy, 500_000),
        ])
        .unwrap();
        assert_eq!(
            aggregate.report(|wei| format!("{wei} wei")),
            [
                "Greeter deployment estimated at 1000000 wei",
                "BeaconProxy deployment estimated at 500000 wei",
                "Total estimated cost: 1500000 wei",
            ]
        );
        assert_eq!(
            aggregate.to_string(),
            "Greeter deployment estimated at 0.000000000001 ETH\n\
             BeaconProxy deployment estimated at 0.0000000000005 ETH\n\
             Total estimated cost: 0.0000000000015 ETH\n"
        );
    }
}
