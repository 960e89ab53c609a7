use alloy::primitives::{Address, U256};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::models::artifact::parse_hex_address;

/// Default location of the compiled contract (`forge build` output)
pub const DEFAULT_ARTIFACT: &str = "out/SimpleStorage.sol/SimpleStorage.json";

#[derive(Debug, Parser)]
#[command(
    name = "storage-workshop",
    version,
    about = "Estimate, deploy and call the SimpleStorage workshop contract."
)]
pub struct Cli {
    /// Network profile to use (defaults to the configured default network)
    #[arg(long, global = true, env = "WORKSHOP_NETWORK")]
    pub network: Option<String>,

    /// Network profile file
    #[arg(long, global = true, default_value = "Workshop.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Project the cost of deploying the contract at current network prices
    Estimate {
        /// Compiled contract artifact
        #[arg(long, default_value = DEFAULT_ARTIFACT)]
        artifact: PathBuf,
    },
    /// Deploy the contract and print its address
    Deploy {
        /// Compiled contract artifact
        #[arg(long, default_value = DEFAULT_ARTIFACT)]
        artifact: PathBuf,
    },
    /// Store a non-zero value in a deployed contract
    Store {
        /// Contract address
        #[arg(long, value_parser = parse_hex_address)]
        address: Address,
        /// Value to store
        value: U256,
    },
    /// Read the stored value from a deployed contract
    Retrieve {
        /// Contract address
        #[arg(long, value_parser = parse_hex_address)]
        address: Address,
    },
    /// List configured network profiles
    Networks,
}
