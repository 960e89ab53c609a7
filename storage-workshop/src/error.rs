use alloy_primitives::utils::UnitsError;
use thiserror::Error;

/// Errors raised while talking to the node or preparing what is sent to it
///
/// Every variant is terminal for the calling command: nothing here is retried.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Node unreachable or endpoint unusable
    #[error("RPC connection error: {0}")]
    RPCConnection(String),

    /// The node refused `eth_estimateGas`, usually because the transaction would revert
    #[error("Gas estimation failed: {0}")]
    Estimation(String),

    /// The node could not report the current gas price
    #[error("Fee data request failed: {0}")]
    FeeData(String),

    /// Submission or inclusion of the deployment transaction failed
    #[error("Deployment failed: {0}")]
    Deployment(String),

    /// No account is available to send transactions from
    #[error("No sending account: {0}")]
    NoSender(String),

    /// A call against the deployed contract failed or reverted
    #[error("Contract call failed: {0}")]
    Contract(String),

    /// The compiled contract artifact could not be used
    #[error("Invalid contract artifact: {0}")]
    Artifact(String),

    /// Display scaling of a wei amount failed
    #[error("Unit conversion failed: {0}")]
    Units(#[from] UnitsError),
}

/// Errors raised while resolving settings, profiles and credentials
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unknown network '{0}'. Configured networks: {1}")]
    UnknownNetwork(String, String),

    #[error("Network '{network}' requires {variable} to be set")]
    MissingCredential {
        network: String,
        variable: &'static str,
    },

    #[error("Invalid RPC URL for network '{network}': {reason}")]
    InvalidUrl { network: String, reason: String },

    #[error("Could not derive signer: {0}")]
    Signer(String),

    #[error(transparent)]
    Load(#[from] config::ConfigError),
}
