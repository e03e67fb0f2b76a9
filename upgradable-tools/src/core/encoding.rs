// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! ABI encoding of constructor and initializer arguments.

use alloy::{
    dyn_abi::{DynSolValue, JsonAbiExt, Specifier},
    json_abi::{Constructor, Function, Param},
    primitives::Bytes,
};

#[derive(Debug, thiserror::Error)]
pub enum EncodingError {
    #[error("{context}: expected {expected} arguments, got {got}")]
    ArgumentCount {
        context: String,
        expected: usize,
        got: usize,
    },
    #[error("{context}: could not resolve type of `{param}`: {source}")]
    ResolveType {
        context: String,
        param: String,
        source: alloy::dyn_abi::Error,
    },
    #[error("{context}: could not parse `{value}` as `{param}`: {source}")]
    Coerce {
        context: String,
        param: String,
        value: String,
        source: alloy::dyn_abi::Error,
    },
    #[error("{context}: {source}")]
    Abi {
        context: String,
        source: alloy::dyn_abi::Error,
    },
    #[error("artifact {0} has no deployable bytecode")]
    EmptyBytecode(String),
}

/// Parses `args` against the types declared by `params`.
pub fn coerce_args(
    context: &str,
    params: &[Param],
    args: &[String],
) -> Result<Vec<DynSolValue>, EncodingError> {
    if params.len() != args.len() {
        return Err(EncodingError::ArgumentCount {
            context: context.to_string(),
            expected: params.len(),
            got: args.len(),
        });
    }
    params
        .iter()
        .zip(args)
        .map(|(param, arg)| {
            let ty = param.resolve().map_err(|source| EncodingError::ResolveType {
                context: context.to_string(),
                param: param.to_string(),
                source,
            })?;
            ty.coerce_str(arg).map_err(|source| EncodingError::Coerce {
                context: context.to_string(),
                param: param.to_string(),
                value: arg.clone(),
                source,
            })
        })
        .collect()
}

/// Encodes a call to `function`, selector included.
pub fn encode_function_call(function: &Function, args: &[String]) -> Result<Bytes, EncodingError> {
    let context = function.signature();
    let values = coerce_args(&context, &function.inputs, args)?;
    let calldata = function
        .abi_encode_input(&values)
        .map_err(|source| EncodingError::Abi { context, source })?;
    Ok(calldata.into())
}

/// Encodes constructor arguments to be appended to creation bytecode.
///
/// Contracts without a declared constructor accept no arguments.
pub fn encode_constructor_args(
    contract: &str,
    constructor: Option<&Constructor>,
    values: &[DynSolValue],
) -> Result<Vec<u8>, EncodingError> {
    let context = format!("{contract} constructor");
    match constructor {
        Some(constructor) => constructor
            .abi_encode_input(values)
            .map_err(|source| EncodingError::Abi { context, source }),
        None if values.is_empty() => Ok(Vec::new()),
        None => Err(EncodingError::ArgumentCount {
            context,
            expected: 0,
            got: values.len(),
        }),
    }
}
