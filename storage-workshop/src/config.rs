use crate::error::ConfigError;
use alloy::{
    signers::local::{coins_bip39::English, MnemonicBuilder, PrivateKeySigner},
    transports::http::reqwest::Url,
};
use serde::Deserialize;
use std::{collections::BTreeMap, env, fmt, path::Path};
use tracing::debug;

/// Placeholder substituted with the gateway API key inside profile URLs
const API_KEY_PLACEHOLDER: &str = "{api_key}";

/// Environment variable holding the BIP-39 seed phrase
pub const MNEMONIC_VAR: &str = "MNEMONIC";

/// Environment variable holding the node gateway API key
pub const API_KEY_VAR: &str = "RPC_API_KEY";

/// Where a profile gets the account that signs transactions
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AccountSource {
    /// Accounts managed and unlocked by the node itself (local dev nodes)
    Node,
    /// First account derived from the `MNEMONIC` seed phrase
    Mnemonic,
}

impl fmt::Display for AccountSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountSource::Node => f.write_str("node"),
            AccountSource::Mnemonic => f.write_str("mnemonic"),
        }
    }
}

/// A named network the workshop can talk to
#[derive(Debug, Deserialize, Clone)]
pub struct NetworkProfile {
    /// Node endpoint; may contain `{api_key}`
    pub url: String,

    /// Signing account source
    pub accounts: AccountSource,

    /// Symbol printed next to top-level amounts
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Mnemonic derivation index used when `accounts = "mnemonic"`
    #[serde(default)]
    pub derivation_index: u32,
}

fn default_currency() -> String {
    "ETH".to_string()
}

/// Workshop settings
///
/// Built from three layers, later ones winning: built-in profiles for
/// `localhost` and `sepolia`, an optional TOML file, and `WORKSHOP__*`
/// environment variables (`__` separates nested keys).
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    /// Profile used when no `--network` is given
    pub default_network: String,

    /// Profiles by name
    pub networks: BTreeMap<String, NetworkProfile>,
}

impl Settings {
    /// Load settings from defaults, the optional file at `path` and the environment
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Self::defaults()?;
        if let Some(path) = path {
            debug!("Reading network profiles from {}", path.display());
            builder = builder.add_source(config::File::from(path).required(false));
        }
        let settings = builder
            .add_source(
                config::Environment::with_prefix("WORKSHOP")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    /// Load settings from defaults and a TOML document, ignoring the environment
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let settings = Self::defaults()?
            .add_source(config::File::from_str(contents, config::FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Ok(config::Config::builder()
            .set_default("default_network", "localhost")?
            .set_default("networks.localhost.url", "http://127.0.0.1:8545")?
            .set_default("networks.localhost.accounts", "node")?
            .set_default("networks.sepolia.url", "https://sepolia.infura.io/v3/{api_key}")?
            .set_default("networks.sepolia.accounts", "mnemonic")?)
    }

    /// Look up a profile by name, failing before any network I/O if it is unknown
    pub fn network(&self, name: &str) -> Result<&NetworkProfile, ConfigError> {
        self.networks.get(name).ok_or_else(|| {
            let known = self.networks.keys().cloned().collect::<Vec<_>>().join(", ");
            ConfigError::UnknownNetwork(name.to_string(), known)
        })
    }

    /// Select a profile and resolve its credentials in one step
    pub fn resolve(
        &self,
        name: Option<&str>,
        credentials: &Credentials,
    ) -> Result<ResolvedNetwork, ConfigError> {
        let name = name.unwrap_or(&self.default_network);
        let profile = self.network(name)?;
        debug!("Selected network '{}' ({} accounts)", name, profile.accounts);
        Ok(ResolvedNetwork {
            name: name.to_string(),
            url: profile.endpoint(name, credentials)?,
            signer: profile.signer(name, credentials)?,
            currency: profile.currency.clone(),
        })
    }
}

impl NetworkProfile {
    /// Endpoint with the API key substituted in
    pub fn endpoint(&self, name: &str, credentials: &Credentials) -> Result<Url, ConfigError> {
        let url = if self.url.contains(API_KEY_PLACEHOLDER) {
            let key = credentials
                .api_key
                .as_deref()
                .ok_or_else(|| ConfigError::MissingCredential {
                    network: name.to_string(),
                    variable: API_KEY_VAR,
                })?;
            self.url.replace(API_KEY_PLACEHOLDER, key)
        } else {
            self.url.clone()
        };

        url.parse().map_err(|e| ConfigError::InvalidUrl {
            network: name.to_string(),
            reason: format!("{e}"),
        })
    }

    /// Local signer for mnemonic profiles; `None` when the node signs
    pub fn signer(
        &self,
        name: &str,
        credentials: &Credentials,
    ) -> Result<Option<PrivateKeySigner>, ConfigError> {
        match self.accounts {
            AccountSource::Node => Ok(None),
            AccountSource::Mnemonic => {
                let phrase = credentials
                    .mnemonic
                    .as_deref()
                    .ok_or_else(|| ConfigError::MissingCredential {
                        network: name.to_string(),
                        variable: MNEMONIC_VAR,
                    })?;
                let signer = MnemonicBuilder::<English>::default()
                    .phrase(phrase)
                    .index(self.derivation_index)
                    .map_err(|e| ConfigError::Signer(e.to_string()))?
                    .build()
                    .map_err(|e| ConfigError::Signer(e.to_string()))?;
                Ok(Some(signer))
            }
        }
    }
}

/// Secrets read from the (uncommitted) credentials file
#[derive(Clone, Default)]
pub struct Credentials {
    pub mnemonic: Option<String>,
    pub api_key: Option<String>,
}

impl Credentials {
    /// Read credentials once from `.env` and the process environment
    pub fn from_env() -> Self {
        // Load .env file if it exists
        let _ = dotenv::dotenv();

        Self {
            mnemonic: non_empty_var(MNEMONIC_VAR),
            api_key: non_empty_var(API_KEY_VAR),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("mnemonic", &self.mnemonic.as_ref().map(|_| "<redacted>"))
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// A profile with its endpoint and signer resolved, ready to connect
#[derive(Debug, Clone)]
pub struct ResolvedNetwork {
    pub name: String,
    pub url: Url,
    pub signer: Option<PrivateKeySigner>,
    pub currency: String,
}
