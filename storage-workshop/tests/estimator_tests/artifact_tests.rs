//! Artifact parsing for the two common toolchain layouts

use std::str::FromStr;

use alloy::primitives::{Bytes, TxKind};
use storage_workshop::{
    error::ServiceError,
    models::artifact::{parse_hex_address, parse_hex_bytes, ContractArtifact, DeploymentDescriptor},
};

const FOUNDRY_ARTIFACT: &str = r#"{
    "abi": [],
    "bytecode": {
        "object": "0x6080604052348015600e575f80fd5b50",
        "sourceMap": "",
        "linkReferences": {}
    },
    "deployedBytecode": { "object": "0x" }
}"#;

const HARDHAT_ARTIFACT: &str = r#"{
    "_format": "hh-sol-artifact-1",
    "contractName": "SimpleStorage",
    "abi": [],
    "bytecode": "0x6080604052348015600e575f80fd5b50",
    "deployedBytecode": "0x"
}"#;

#[test]
fn test_foundry_and_hardhat_layouts_agree() {
    let foundry = ContractArtifact::from_str(FOUNDRY_ARTIFACT).unwrap();
    let hardhat = ContractArtifact::from_str(HARDHAT_ARTIFACT).unwrap();

    assert_eq!(foundry.bytecode().unwrap(), hardhat.bytecode().unwrap());
    assert_eq!(foundry.bytecode().unwrap().len(), 16);
    assert_eq!(hardhat.contract_name.as_deref(), Some("SimpleStorage"));
    assert!(foundry.contract_name.is_none());
}

#[test]
fn test_unprefixed_bytecode_is_accepted() {
    let artifact = ContractArtifact::from_str(r#"{"bytecode": {"object": "00"}}"#).unwrap();
    assert_eq!(artifact.bytecode().unwrap(), Bytes::from_static(&[0x00]));
}

#[test]
fn test_empty_bytecode_is_rejected() {
    let artifact = ContractArtifact::from_str(r#"{"bytecode": "0x"}"#).unwrap();
    assert!(matches!(artifact.bytecode(), Err(ServiceError::Artifact(_))));
}

#[test]
fn test_non_hex_bytecode_is_rejected() {
    let artifact = ContractArtifact::from_str(r#"{"bytecode": "0xzz"}"#).unwrap();
    assert!(matches!(artifact.bytecode(), Err(ServiceError::Artifact(_))));
}

#[test]
fn test_malformed_json_is_rejected() {
    assert!(matches!(
        ContractArtifact::from_str("{\"abi\": []}"),
        Err(ServiceError::Artifact(_))
    ));
}

#[test]
fn test_missing_artifact_file() {
    let err = ContractArtifact::from_file(std::path::Path::new("does/not/exist.json")).unwrap_err();
    assert!(err.to_string().contains("does/not/exist.json"));
}

#[test]
fn test_descriptor_builds_creation_request() {
    let artifact = ContractArtifact::from_str(HARDHAT_ARTIFACT).unwrap();
    let descriptor = DeploymentDescriptor::from_artifact(&artifact).unwrap();
    let request = descriptor.into_request(None);

    assert_eq!(request.to, Some(TxKind::Create));
    assert!(request.from.is_none());
    assert_eq!(request.input.input(), Some(&descriptor.bytecode));
}

#[test]
fn test_hex_helpers() {
    assert!(parse_hex_address("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266").is_err());
    assert!(parse_hex_address("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266").is_ok());
    assert_eq!(parse_hex_bytes("0x").unwrap(), Bytes::new());
    assert!(parse_hex_bytes("0xabc").is_err());
}
