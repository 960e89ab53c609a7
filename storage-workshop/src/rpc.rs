use std::sync::Arc;

use crate::{config::ResolvedNetwork, error::ServiceError, estimator::FeeOracle};
use alloy::{
    network::{Ethereum, EthereumWallet},
    primitives::{Address, U64},
    providers::{Provider, ProviderBuilder},
    rpc::types::TransactionRequest,
};
use async_trait::async_trait;
use tracing::{debug, info};

/// Ethereum RPC client for the selected network
///
/// Wraps a typed Alloy provider. When the network profile carries a local
/// signer the provider signs and fills transactions itself; otherwise the
/// node's own unlocked accounts are used.
#[derive(Clone)]
pub struct EthereumClient {
    /// Typed provider for Ethereum network
    pub provider: Arc<dyn Provider<Ethereum>>,
    /// Address of the local signer, if any
    signer_address: Option<Address>,
}

impl EthereumClient {
    /// Connect to the network's node
    ///
    /// Verifies the connection by fetching the latest block number, so an
    /// unreachable node fails here rather than mid-command.
    pub async fn connect(network: &ResolvedNetwork) -> Result<Self, ServiceError> {
        let (provider, signer_address) = match &network.signer {
            Some(signer) => {
                let provider: Arc<dyn Provider<Ethereum>> = Arc::new(
                    ProviderBuilder::new()
                        .wallet(EthereumWallet::from(signer.clone()))
                        .on_http(network.url.clone()),
                );
                (provider, Some(signer.address()))
            }
            None => {
                let provider: Arc<dyn Provider<Ethereum>> = Arc::new(
                    ProviderBuilder::new()
                        .network::<Ethereum>()
                        .on_http(network.url.clone()),
                );
                (provider, None)
            }
        };

        // Test the connection by fetching the latest block number
        let block_number = provider.get_block_number().await.map_err(|e| {
            ServiceError::RPCConnection(format!("{} is unreachable: {}", network.name, e))
        })?;
        info!("Connected to {}. Latest block number: {}", network.name, block_number);

        Ok(Self {
            provider,
            signer_address,
        })
    }

    /// Address of the local signer, if the profile has one
    pub fn signer_address(&self) -> Option<Address> {
        self.signer_address
    }

    /// Account that sends transactions: the local signer, or the node's first account
    pub async fn sending_account(&self) -> Result<Address, ServiceError> {
        if let Some(address) = self.signer_address {
            return Ok(address);
        }

        let accounts = self
            .provider
            .get_accounts()
            .await
            .map_err(|e| ServiceError::RPCConnection(format!("eth_accounts failed: {e}")))?;
        let account = accounts.first().copied().ok_or_else(|| {
            ServiceError::NoSender("the node manages no accounts and no mnemonic is configured".to_string())
        })?;
        debug!("Using node-managed account {}", account);
        Ok(account)
    }
}

#[async_trait]
impl FeeOracle for EthereumClient {
    async fn estimate_units(&self, tx: &TransactionRequest) -> Result<u64, ServiceError> {
        let units: U64 = self
            .provider
            .client()
            .request("eth_estimateGas", (tx.clone(),))
            .await
            .map_err(|e| ServiceError::Estimation(e.to_string()))?;
        Ok(units.to::<u64>())
    }

    async fn unit_price(&self) -> Result<u128, ServiceError> {
        self.provider
            .get_gas_price()
            .await
            .map_err(|e| ServiceError::FeeData(e.to_string()))
    }
}
