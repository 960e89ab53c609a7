use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use storage_workshop::{
    cli::{Cli, Command},
    config::{Credentials, ResolvedNetwork, Settings},
    contract,
    estimator::GasEstimator,
    models::artifact::{ContractArtifact, DeploymentDescriptor},
    rpc::EthereumClient,
};

/// Application entry point
///
/// Strictly sequential: load settings, resolve the network, connect, run one
/// command, print. Any error ends the process with a non-zero status.
#[tokio::main(flavor = "current_thread")]
async fn main() -> eyre::Result<()> {
    // Our crate at info, dependencies quieter; RUST_LOG overrides
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("storage_workshop=info,alloy=warn,hyper=warn,reqwest=warn")
    });

    // Logs go to stderr so stdout carries only command output
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = Settings::load(Some(&cli.config))?;

    match cli.command {
        Command::Networks => {
            for (name, profile) in &settings.networks {
                let marker = if *name == settings.default_network { "*" } else { " " };
                println!(
                    "{marker} {name:<12} {} (accounts: {}, currency: {})",
                    profile.url, profile.accounts, profile.currency
                );
            }
        }
        Command::Estimate { artifact } => {
            let (network, client) = connect(&settings, cli.network.as_deref()).await?;
            let descriptor = load_descriptor(&artifact)?;
            let estimator =
                GasEstimator::new(Arc::new(client.clone())).with_sender(client.signer_address());
            let report = estimator.estimate_deployment_cost(&descriptor).await?;
            for line in report.lines(&network.currency)? {
                println!("{line}");
            }
        }
        Command::Deploy { artifact } => {
            let (_, client) = connect(&settings, cli.network.as_deref()).await?;
            let descriptor = load_descriptor(&artifact)?;
            let address = contract::deploy(&client, &descriptor).await?;
            println!("SimpleStorage deployed at {address}");
        }
        Command::Store { address, value } => {
            let (_, client) = connect(&settings, cli.network.as_deref()).await?;
            contract::ensure_deployed(&client, address).await?;
            let tx_hash = contract::store(&client, address, value).await?;
            info!("store({}) included in {}", value, tx_hash);
            println!("Stored {value} (transaction {tx_hash})");
        }
        Command::Retrieve { address } => {
            let (_, client) = connect(&settings, cli.network.as_deref()).await?;
            contract::ensure_deployed(&client, address).await?;
            let value = contract::retrieve(&client, address).await?;
            println!("{value}");
        }
    }

    Ok(())
}

/// Resolve the selected profile and connect to its node
///
/// Unknown networks and missing credentials fail before any network I/O.
async fn connect(
    settings: &Settings,
    network: Option<&str>,
) -> eyre::Result<(ResolvedNetwork, EthereumClient)> {
    let credentials = Credentials::from_env();
    let network = settings.resolve(network, &credentials)?;
    let client = EthereumClient::connect(&network).await?;
    Ok((network, client))
}

fn load_descriptor(path: &Path) -> eyre::Result<DeploymentDescriptor> {
    let artifact = ContractArtifact::from_file(path)?;
    if let Some(name) = &artifact.contract_name {
        info!("Loaded artifact for {}", name);
    }
    Ok(DeploymentDescriptor::from_artifact(&artifact)?)
}
