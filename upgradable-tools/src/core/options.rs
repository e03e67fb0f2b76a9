// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Deployment options and their resolution against an implementation ABI.

use std::{collections::BTreeSet, fmt, fs, path::Path, str::FromStr};

use alloy::{
    json_abi::{Function, JsonAbi, Param},
    primitives::{Address, U256},
};
use serde::{Deserialize, Serialize};

use crate::core::encoding::{coerce_args, EncodingError};

/// Proxy pattern used to front the implementation contract.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProxyKind {
    #[default]
    Transparent,
    Uups,
    Beacon,
}

impl ProxyKind {
    /// Parses the requested kind, defaulting to [`ProxyKind::Transparent`].
    pub fn resolve(requested: Option<&str>) -> Result<Self, UnsupportedProxyKind> {
        requested.map_or(Ok(Self::default()), |kind| kind.parse())
    }
}

impl FromStr for ProxyKind {
    type Err = UnsupportedProxyKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "transparent" => Ok(Self::Transparent),
            "uups" => Ok(Self::Uups),
            "beacon" => Ok(Self::Beacon),
            _ => Err(UnsupportedProxyKind(s.to_string())),
        }
    }
}

impl fmt::Display for ProxyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Self::Transparent => "transparent",
            Self::Uups => "uups",
            Self::Beacon => "beacon",
        };
        f.write_str(kind)
    }
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("unsupported proxy kind `{0}` (expected one of: transparent, uups, beacon)")]
pub struct UnsupportedProxyKind(pub String);

/// Safety checks a caller may explicitly opt out of.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum UnsafeAllow {
    MissingInitializer,
    ConstructorArgsMismatch,
}

impl FromStr for UnsafeAllow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "missing-initializer" => Ok(Self::MissingInitializer),
            "constructor-args-mismatch" => Ok(Self::ConstructorArgsMismatch),
            _ => Err(format!(
                "unknown unsafe-allow flag `{s}` (expected missing-initializer or constructor-args-mismatch)"
            )),
        }
    }
}

impl fmt::Display for UnsafeAllow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingInitializer => f.write_str("missing-initializer"),
            Self::ConstructorArgsMismatch => f.write_str("constructor-args-mismatch"),
        }
    }
}

/// Transaction parameters applied to every simulated deployment.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct TxOverrides {
    /// Gas price in wei. Defaults to the network's current gas price.
    pub gas_price: Option<u128>,
    /// Upper bound handed to the node while simulating.
    pub gas_limit: Option<u64>,
    /// Value sent along with the proxy deployment (and so to the initializer).
    pub value: Option<U256>,
}

/// Options as provided by the caller, possibly partially specified.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct DeploymentOptions {
    pub kind: Option<String>,
    /// Initializer name (`initialize`) or full signature (`initialize(string)`).
    pub initializer: Option<String>,
    pub constructor_args: Vec<String>,
    pub unsafe_allow: BTreeSet<UnsafeAllow>,
    pub tx_overrides: TxOverrides,
    /// Admin of a transparent proxy. A placeholder is used when not set.
    pub admin: Option<Address>,
    /// Also charge the deployment of the beacon in a beacon topology.
    pub include_beacon: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum OptionsError {
    #[error(
        "beacon proxies must be initialized: name an initializer, or allow `{}` to skip initialization",
        UnsafeAllow::MissingInitializer
    )]
    MissingInitializer,
    #[error("initializer `{0}` not found in contract ABI")]
    InitializerNotFound(String),
    #[error("initializer `{name}` is ambiguous, use a full signature: {}", .candidates.join(", "))]
    AmbiguousInitializer {
        name: String,
        candidates: Vec<String>,
    },
    #[error(
        "arguments do not match `{signature}`: {source} (allow `{}` to skip this check)",
        UnsafeAllow::ConstructorArgsMismatch
    )]
    ConstructorArgsMismatch {
        signature: String,
        #[source]
        source: EncodingError,
    },
}

/// Name of the initializer looked up when none is given.
const DEFAULT_INITIALIZER: &str = "initialize";

impl DeploymentOptions {
    /// Reads options from a TOML or JSON file, picked by extension.
    pub fn from_path(path: impl AsRef<Path>) -> crate::Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let options = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::from_str(&contents)?,
            _ => toml::from_str(&contents)?,
        };
        Ok(options)
    }

    pub fn proxy_kind(&self) -> Result<ProxyKind, UnsupportedProxyKind> {
        ProxyKind::resolve(self.kind.as_deref())
    }

    pub fn allows(&self, flag: UnsafeAllow) -> bool {
        self.unsafe_allow.contains(&flag)
    }

    /// Validates and normalizes the options for `kind` against the implementation's ABI.
    ///
    /// This is pure: nothing here talks to the network.
    pub fn resolve(self, kind: ProxyKind, abi: &JsonAbi) -> Result<ResolvedOptions, OptionsError> {
        if kind == ProxyKind::Beacon
            && self.initializer.is_none()
            && !self.allows(UnsafeAllow::MissingInitializer)
        {
            return Err(OptionsError::MissingInitializer);
        }

        let initializer = match &self.initializer {
            Some(name) => Some(find_initializer(abi, name)?),
            None => match find_initializer(abi, DEFAULT_INITIALIZER) {
                Ok(function) => Some(function),
                Err(OptionsError::InitializerNotFound(_)) => None,
                Err(err) => return Err(err),
            },
        };

        if !self.allows(UnsafeAllow::ConstructorArgsMismatch) {
            let (signature, params): (String, &[Param]) = match &initializer {
                Some(function) => (function.signature(), function.inputs.as_slice()),
                None => (
                    "constructor".to_string(),
                    abi.constructor()
                        .map(|c| c.inputs.as_slice())
                        .unwrap_or_default(),
                ),
            };
            coerce_args(&signature, params, &self.constructor_args)
                .map_err(|source| OptionsError::ConstructorArgsMismatch { signature, source })?;
        }

        Ok(ResolvedOptions {
            kind,
            initializer,
            constructor_args: self.constructor_args,
            tx_overrides: self.tx_overrides,
            admin: self.admin,
            include_beacon: self.include_beacon,
        })
    }
}

fn find_initializer(abi: &JsonAbi, name: &str) -> Result<Function, OptionsError> {
    let name: String = name.chars().filter(|c| !c.is_whitespace()).collect();
    let candidates: Vec<&Function> = if name.contains('(') {
        abi.functions().filter(|f| f.signature() == name).collect()
    } else {
        abi.function(&name).map(|fs| fs.iter().collect()).unwrap_or_default()
    };
    match candidates.as_slice() {
        [] => Err(OptionsError::InitializerNotFound(name)),
        [function] => Ok((*function).clone()),
        _ => Err(OptionsError::AmbiguousInitializer {
            candidates: candidates.iter().map(|f| f.signature()).collect(),
            name,
        }),
    }
}

/// Options after validation. Immutable for the rest of the estimation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedOptions {
    kind: ProxyKind,
    initializer: Option<Function>,
    constructor_args: Vec<String>,
    tx_overrides: TxOverrides,
    admin: Option<Address>,
    include_beacon: bool,
}

impl ResolvedOptions {
    pub fn kind(&self) -> ProxyKind {
        self.kind
    }

    pub fn initializer(&self) -> Option<&Function> {
        self.initializer.as_ref()
    }

    pub fn constructor_args(&self) -> &[String] {
        &self.constructor_args
    }

    pub fn tx_overrides(&self) -> &TxOverrides {
        &self.tx_overrides
    }

    pub fn admin(&self) -> Option<Address> {
        self.admin
    }

    pub fn include_beacon(&self) -> bool {
        self.include_beacon
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::testing::greeter_abi;

    fn beacon_options(initializer: Option<&str>) -> DeploymentOptions {
        DeploymentOptions {
            kind: Some("beacon".into()),
            initializer: initializer.map(Into::into),
            constructor_args: vec!["Hi there!".into()],
            ..Default::default()
        }
    }

    #[test]
    fn parses_proxy_kinds() {
        assert_eq!(ProxyKind::resolve(None), Ok(ProxyKind::Transparent));
        assert_eq!(ProxyKind::resolve(Some("UUPS")), Ok(ProxyKind::Uups));
        assert_eq!(ProxyKind::resolve(Some(" beacon ")), Ok(ProxyKind::Beacon));
        assert_eq!(
            ProxyKind::resolve(Some("diamond")),
            Err(UnsupportedProxyKind("diamond".into()))
        );
    }

    #[test]
    fn beacon_requires_initializer() {
        let err = beacon_options(None)
            .resolve(ProxyKind::Beacon, &greeter_abi())
            .unwrap_err();
        assert!(matches!(err, OptionsError::MissingInitializer));
    }

    #[test]
    fn allowed_missing_initializer_falls_back_to_initialize() {
        let mut options = beacon_options(None);
        options.unsafe_allow.insert(UnsafeAllow::MissingInitializer);
        let resolved = options.resolve(ProxyKind::Beacon, &greeter_abi()).unwrap();
        assert_eq!(
            resolved.initializer().map(|f| f.signature()),
            Some("initialize(string)".to_string())
        );
        assert_eq!(resolved.constructor_args(), ["Hi there!"]);
    }

    #[test]
    fn allowed_missing_initializer_without_initialize() {
        let abi = JsonAbi::parse(["constructor(string greeting)"]).unwrap();
        let mut options = beacon_options(None);
        options.unsafe_allow.insert(UnsafeAllow::MissingInitializer);
        let resolved = options.resolve(ProxyKind::Beacon, &abi).unwrap();
        assert!(resolved.initializer().is_none());
    }

    #[test]
    fn resolves_named_initializer() {
        let resolved = beacon_options(Some("initialize"))
            .resolve(ProxyKind::Beacon, &greeter_abi())
            .unwrap();
        assert_eq!(
            resolved.initializer().map(|f| f.signature()),
            Some("initialize(string)".to_string())
        );
        assert_eq!(resolved.constructor_args(), ["Hi there!"]);
    }

    #[test]
    fn transparent_defaults_to_initialize() {
        let options = DeploymentOptions {
            constructor_args: vec!["hello".into()],
            ..Default::default()
        };
        let resolved = options
            .resolve(ProxyKind::Transparent, &greeter_abi())
            .unwrap();
        assert_eq!(resolved.initializer().unwrap().name, "initialize");
    }

    #[test]
    fn uups_without_initialize_uses_constructor() {
        let abi = JsonAbi::parse(["constructor(uint256 supply)"]).unwrap();
        let options = DeploymentOptions {
            constructor_args: vec!["1000".into()],
            ..Default::default()
        };
        let resolved = options.resolve(ProxyKind::Uups, &abi).unwrap();
        assert!(resolved.initializer().is_none());
    }

    #[test]
    fn unknown_initializer() {
        let err = beacon_options(Some("setup"))
            .resolve(ProxyKind::Beacon, &greeter_abi())
            .unwrap_err();
        assert!(matches!(err, OptionsError::InitializerNotFound(name) if name == "setup"));
    }

    #[test]
    fn overloaded_initializer_needs_signature() {
        let abi = JsonAbi::parse([
            "function initialize(string greeting)",
            "function initialize(string greeting, uint8 times)",
        ])
        .unwrap();
        let err = beacon_options(Some("initialize"))
            .resolve(ProxyKind::Beacon, &abi)
            .unwrap_err();
        assert!(matches!(err, OptionsError::AmbiguousInitializer { .. }));

        let options = DeploymentOptions {
            constructor_args: vec!["hi".into(), "3".into()],
            ..beacon_options(Some("initialize(string, uint8)"))
        };
        let resolved = options.resolve(ProxyKind::Beacon, &abi).unwrap();
        assert_eq!(resolved.initializer().unwrap().inputs.len(), 2);
    }

    #[test]
    fn argument_mismatch() {
        let mut options = beacon_options(Some("initialize"));
        options.constructor_args.push("extra".into());
        let err = options
            .clone()
            .resolve(ProxyKind::Beacon, &greeter_abi())
            .unwrap_err();
        assert!(matches!(err, OptionsError::ConstructorArgsMismatch { .. }));

        options.unsafe_allow.insert(UnsafeAllow::ConstructorArgsMismatch);
        assert!(options.resolve(ProxyKind::Beacon, &greeter_abi()).is_ok());
    }

    #[test]
    fn argument_type_mismatch() {
        let abi = JsonAbi::parse(["function initialize(uint256 supply)"]).unwrap();
        let options = DeploymentOptions {
            kind: Some("uups".into()),
            constructor_args: vec!["not a number".into()],
            ..Default::default()
        };
        let err = options.resolve(ProxyKind::Uups, &abi).unwrap_err();
        assert!(matches!(
            err,
            OptionsError::ConstructorArgsMismatch { ref signature, .. } if signature == "initialize(uint256)"
        ));
    }

    #[test]
    fn reads_toml_options() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("options.toml");
        fs::write(
            &path,
            r#"
                kind = "beacon"
                initializer = "initialize"
                constructor-args = ["Hi there!"]
                unsafe-allow = ["constructor-args-mismatch"]
                include-beacon = true

                [tx-overrides]
                gas-price = 100000000
            "#,
        )
        .unwrap();
        let options = DeploymentOptions::from_path(&path).unwrap();
        assert_eq!(options.proxy_kind(), Ok(ProxyKind::Beacon));
        assert_eq!(options.initializer.as_deref(), Some("initialize"));
        assert!(options.allows(UnsafeAllow::ConstructorArgsMismatch));
        assert!(options.include_beacon);
        assert_eq!(options.tx_overrides.gas_price, Some(100_000_000));
    }
}
