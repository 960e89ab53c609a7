use crate::error::ServiceError;
use alloy::{
    network::TransactionBuilder,
    primitives::{Address, Bytes},
    rpc::types::TransactionRequest,
};
use alloy_primitives::hex;
use serde::Deserialize;
use std::{fs, path::Path, str::FromStr};
use tracing::debug;

/// Creation bytecode as written by a Solidity toolchain
///
/// Foundry nests it (`"bytecode": {"object": "0x.."}`), Hardhat and Truffle
/// store the hex string directly (`"bytecode": "0x.."`).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ArtifactBytecode {
    Nested { object: String },
    Flat(String),
}

/// Compiled contract artifact
#[derive(Debug, Deserialize)]
pub struct ContractArtifact {
    /// Contract name, when the toolchain records it
    #[serde(default, rename = "contractName")]
    pub contract_name: Option<String>,

    bytecode: ArtifactBytecode,
}

impl ContractArtifact {
    /// Read and parse an artifact file
    pub fn from_file(path: &Path) -> Result<Self, ServiceError> {
        debug!("Loading contract artifact from {}", path.display());
        let contents = fs::read_to_string(path).map_err(|e| {
            ServiceError::Artifact(format!("Cannot read {}: {}", path.display(), e))
        })?;
        Self::from_str(&contents)
    }

    /// Creation bytecode, validated as non-empty hex
    pub fn bytecode(&self) -> Result<Bytes, ServiceError> {
        let raw = match &self.bytecode {
            ArtifactBytecode::Nested { object } => object,
            ArtifactBytecode::Flat(hex) => hex,
        };
        // Foundry omits the prefix for some build modes
        let prefixed = if raw.starts_with("0x") {
            raw.clone()
        } else {
            format!("0x{raw}")
        };
        let code = parse_hex_bytes(&prefixed).map_err(ServiceError::Artifact)?;
        if code.is_empty() {
            return Err(ServiceError::Artifact(
                "Artifact has no creation bytecode (abstract contract or interface?)".to_string(),
            ));
        }
        Ok(code)
    }
}

impl FromStr for ContractArtifact {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(s).map_err(|e| ServiceError::Artifact(format!("Malformed JSON: {e}")))
    }
}

/// Everything needed to describe a contract creation transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentDescriptor {
    /// Creation bytecode
    pub bytecode: Bytes,

    /// ABI-encoded constructor arguments appended to the bytecode
    pub constructor_args: Bytes,
}

impl DeploymentDescriptor {
    /// Descriptor for a contract whose constructor takes no arguments
    pub fn new(bytecode: Bytes) -> Self {
        Self {
            bytecode,
            constructor_args: Bytes::new(),
        }
    }

    /// Build a descriptor from a compiled artifact
    pub fn from_artifact(artifact: &ContractArtifact) -> Result<Self, ServiceError> {
        Ok(Self::new(artifact.bytecode()?))
    }

    /// Attach ABI-encoded constructor arguments
    pub fn with_constructor_args(mut self, args: Bytes) -> Self {
        self.constructor_args = args;
        self
    }

    /// Full init code sent on-chain
    pub fn init_code(&self) -> Bytes {
        let mut code = Vec::with_capacity(self.bytecode.len() + self.constructor_args.len());
        code.extend_from_slice(&self.bytecode);
        code.extend_from_slice(&self.constructor_args);
        Bytes::from(code)
    }

    /// Unsigned contract-creation request, optionally attributed to a sender
    pub fn into_request(&self, from: Option<Address>) -> TransactionRequest {
        let request = TransactionRequest::default().with_deploy_code(self.init_code());
        match from {
            Some(from) => request.with_from(from),
            None => request,
        }
    }
}

/// Parse a hexadecimal address string into an `Address`.
///
/// Expects a string starting with "0x" and 40 hex digits (20 bytes).
pub fn parse_hex_address(hex: &str) -> Result<Address, String> {
    if !hex.starts_with("0x") {
        return Err("Address must start with 0x".to_string());
    }
    Address::from_str(hex).map_err(|e| format!("Invalid address: {}", e))
}

/// Parse a hexadecimal string into a `Bytes` value.
///
/// Expects a string starting with "0x". If the hex string contains no data (i.e. "0x"),
/// an empty `Bytes` value is returned.
pub fn parse_hex_bytes(hex: &str) -> Result<Bytes, String> {
    let hex = hex
        .strip_prefix("0x")
        .ok_or_else(|| "Hex data must start with 0x".to_string())?;
    if hex.is_empty() {
        return Ok(Bytes::new());
    }
    let data = hex::decode(hex).map_err(|e| format!("Invalid hex data: {}", e))?;
    Ok(Bytes::from(data))
}
