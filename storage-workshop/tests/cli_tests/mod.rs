//! Exit-status behaviour of the `storage-workshop` binary
//!
//! None of these need a running node: each case fails, or finishes, before
//! or at the first network call.

use std::net::TcpListener;
use std::process::{Command, Output};

fn workshop(args: &[&str], envs: &[(&str, &str)]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_storage-workshop"));
    cmd.args(args)
        .env_remove("WORKSHOP_NETWORK")
        .env_remove("RUST_LOG")
        .env("MNEMONIC", "")
        .env("RPC_API_KEY", "");
    for (key, value) in envs {
        cmd.env(key, value);
    }
    cmd.output().expect("Failed to run storage-workshop")
}

/// A local URL nothing is listening on
fn closed_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Could not bind to port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

#[test]
fn test_unknown_network_exits_non_zero() {
    let output = workshop(&["estimate", "--network", "nowhere"], &[]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown network 'nowhere'"), "stderr: {stderr}");
}

#[test]
fn test_missing_credentials_exit_non_zero() {
    let output = workshop(&["estimate", "--network", "sepolia"], &[]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("RPC_API_KEY"), "stderr: {stderr}");
}

#[test]
fn test_unreachable_node_exits_non_zero() {
    let url = closed_endpoint();
    let output = workshop(
        &["estimate", "--network", "localhost"],
        &[("WORKSHOP__NETWORKS__LOCALHOST__URL", url.as_str())],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty(), "no report may be printed on failure");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unreachable"), "stderr: {stderr}");
}

#[test]
fn test_networks_lists_profiles() {
    let output = workshop(&["networks"], &[]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("* localhost"));
    assert!(stdout.contains("sepolia"));
}

#[test]
fn test_store_rejects_malformed_address() {
    let output = workshop(&["store", "--address", "1234", "5"], &[]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Address must start with 0x"), "stderr: {stderr}");
}
