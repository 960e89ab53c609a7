use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::thread::sleep;
use std::time::Duration;

use storage_workshop::config::ResolvedNetwork;

/// Spawns an Anvil process on a free port and returns the process handle and the RPC URL.
///
/// # Panics
///
/// Panics if it fails to bind to a free port or spawn Anvil.
pub fn spawn_anvil() -> (Child, String) {
    // Bind to a free port
    let listener = TcpListener::bind("127.0.0.1:0").expect("Could not bind to port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let rpc_url = format!("http://127.0.0.1:{}", port);

    let child = Command::new("anvil")
        .arg("-p")
        .arg(port.to_string())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn anvil");

    // Wait a moment to ensure Anvil is up and running
    sleep(Duration::from_secs(1));

    (child, rpc_url)
}

/// Network entry for a spawned Anvil instance
pub fn anvil_network(rpc_url: &str, signer: Option<alloy::signers::local::PrivateKeySigner>) -> ResolvedNetwork {
    ResolvedNetwork {
        name: "anvil".to_string(),
        url: rpc_url.parse().unwrap(),
        signer,
        currency: "ETH".to_string(),
    }
}
