//! Constructor arguments and creation-code assembly.

use std::fmt;

use alloy::dyn_abi::DynSolValue;
use alloy::primitives::{Address, Bytes, U256};
use serde::Serialize;

use crate::artifacts::ContractArtifact;

/// A typed constructor argument value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum ConstructorArg {
    Address(Address),
    Uint(U256),
    Bool(bool),
    String(String),
}

impl ConstructorArg {
    fn to_sol_value(&self) -> DynSolValue {
        match self {
            ConstructorArg::Address(a) => DynSolValue::Address(*a),
            ConstructorArg::Uint(v) => DynSolValue::Uint(*v, 256),
            ConstructorArg::Bool(b) => DynSolValue::Bool(*b),
            ConstructorArg::String(s) => DynSolValue::String(s.clone()),
        }
    }
}

impl fmt::Display for ConstructorArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstructorArg::Address(a) => write!(f, "{}", a),
            ConstructorArg::Uint(v) => write!(f, "{}", v),
            ConstructorArg::Bool(b) => write!(f, "{}", b),
            ConstructorArg::String(s) => write!(f, "{}", s),
        }
    }
}

/// ABI-encode constructor arguments. Empty input encodes to nothing.
pub fn encode_args(args: &[ConstructorArg]) -> Bytes {
    if args.is_empty() {
        return Bytes::new();
    }
    let values = args.iter().map(ConstructorArg::to_sol_value).collect();
    DynSolValue::Tuple(values).abi_encode_params().into()
}

/// Creation bytecode followed by the encoded constructor arguments.
pub fn creation_code(artifact: &ContractArtifact, args: &[ConstructorArg]) -> Bytes {
    let encoded = encode_args(args);
    let mut code = Vec::with_capacity(artifact.bytecode.len() + encoded.len());
    code.extend_from_slice(&artifact.bytecode);
    code.extend_from_slice(&encoded);
    code.into()
}
