//! `SimpleStorage` deployment and interaction.
//!
//! The contract keeps one `uint256`. `store` rejects zero, `retrieve` returns
//! the current value (zero until the first successful `store`).

use crate::{
    error::ServiceError, models::artifact::DeploymentDescriptor, rpc::EthereumClient,
};
use alloy::{
    network::ReceiptResponse,
    primitives::{Address, TxHash, U256},
    sol,
};
use tracing::{debug, info};

sol! {
    #[sol(rpc)]
    contract SimpleStorage {
        function store(uint256 newValue) public;
        function retrieve() public view returns (uint256);
    }
}

/// Deploy a contract and wait for its inclusion
///
/// # Returns
///
/// * `Result<Address, ServiceError>` - The address the contract was created at
pub async fn deploy(
    client: &EthereumClient,
    descriptor: &DeploymentDescriptor,
) -> Result<Address, ServiceError> {
    let sender = client.sending_account().await?;
    let tx_request = descriptor.into_request(Some(sender));

    info!("Submitting deployment from {}", sender);
    let pending = client
        .provider
        .send_transaction(tx_request)
        .await
        .map_err(|e| ServiceError::Deployment(e.to_string()))?;
    debug!("Deployment transaction {} pending", pending.tx_hash());

    let receipt = pending
        .get_receipt()
        .await
        .map_err(|e| ServiceError::Deployment(e.to_string()))?;

    if !receipt.status() {
        return Err(ServiceError::Deployment(format!(
            "transaction {} reverted",
            receipt.transaction_hash
        )));
    }
    let address = receipt.contract_address.ok_or_else(|| {
        ServiceError::Deployment(format!(
            "receipt for {} carries no contract address",
            receipt.transaction_hash
        ))
    })?;

    info!(
        "Contract created in block {:?} using {} gas",
        receipt.block_number, receipt.gas_used
    );
    Ok(address)
}

/// Store `value` in the contract at `address`
///
/// A zero value is rejected by the contract itself and surfaces as a
/// [`ServiceError::Contract`] error.
pub async fn store(
    client: &EthereumClient,
    address: Address,
    value: U256,
) -> Result<TxHash, ServiceError> {
    let sender = client.sending_account().await?;
    let contract = SimpleStorage::new(address, &*client.provider);

    debug!("Calling store({}) on {}", value, address);
    let pending = contract
        .store(value)
        .from(sender)
        .send()
        .await
        .map_err(|e| ServiceError::Contract(e.to_string()))?;

    let receipt = pending
        .get_receipt()
        .await
        .map_err(|e| ServiceError::Contract(e.to_string()))?;
    if !receipt.status() {
        return Err(ServiceError::Contract(format!(
            "store({}) reverted in {}",
            value, receipt.transaction_hash
        )));
    }
    Ok(receipt.transaction_hash)
}

/// Read the value held by the contract at `address`
pub async fn retrieve(client: &EthereumClient, address: Address) -> Result<U256, ServiceError> {
    let contract = SimpleStorage::new(address, &*client.provider);
    let value = contract
        .retrieve()
        .call()
        .await
        .map_err(|e| ServiceError::Contract(e.to_string()))?
        ._0;
    debug!("retrieve() on {} returned {}", address, value);
    Ok(value)
}

/// Ensure there is code at `address` before talking to it
pub async fn ensure_deployed(client: &EthereumClient, address: Address) -> Result<(), ServiceError> {
    let code = client
        .provider
        .get_code_at(address)
        .await
        .map_err(|e| ServiceError::RPCConnection(e.to_string()))?;
    if code.is_empty() {
        return Err(ServiceError::Contract(format!("no contract deployed at {address}")));
    }
    Ok(())
}
