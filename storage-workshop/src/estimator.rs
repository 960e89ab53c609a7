use crate::{
    error::ServiceError,
    models::artifact::DeploymentDescriptor,
    units::{format_ether, format_gwei},
};
use alloy::{
    primitives::{Address, U256},
    rpc::types::TransactionRequest,
};
use async_trait::async_trait;
use mockall::automock;
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

/// The two node capabilities a cost projection needs
///
/// Implemented over a live provider by [`crate::rpc::EthereumClient`] and by
/// `MockFeeOracle` in tests.
#[automock]
#[async_trait]
pub trait FeeOracle: Send + Sync {
    /// Ask the node how much gas `tx` would use against current state.
    ///
    /// Read-only simulation; no signature is needed. A transaction that would
    /// revert is reported as [`ServiceError::Estimation`].
    async fn estimate_units(&self, tx: &TransactionRequest) -> Result<u64, ServiceError>;

    /// Current price per gas unit in wei.
    ///
    /// Reads the legacy single `gasPrice` field only; the EIP-1559
    /// base/priority split is not consulted.
    async fn unit_price(&self) -> Result<u128, ServiceError>;
}

/// Projected cost of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostReport {
    /// Gas units predicted by the node
    pub gas_units: u64,
    /// Wei per gas unit at the time of the query
    pub gas_price: u128,
    /// `gas_units * gas_price` in wei
    pub total_cost: U256,
}

impl CostReport {
    pub fn new(gas_units: u64, gas_price: u128) -> Self {
        Self {
            gas_units,
            gas_price,
            total_cost: total_cost(gas_units, gas_price),
        }
    }

    /// The three report lines, with `currency` naming the top-level unit
    pub fn lines(&self, currency: &str) -> Result<[String; 3], ServiceError> {
        Ok([
            format!("Estimated gas: {}", self.gas_units),
            format!("Gas price: {} gwei", format_gwei(U256::from(self.gas_price))?),
            format!(
                "Estimated deployment cost: {} {}",
                format_ether(self.total_cost)?,
                currency
            ),
        ])
    }
}

/// Exact product of gas units and unit price.
///
/// A u64 times a u128 is below 2^192, so the multiplication cannot overflow.
pub fn total_cost(gas_units: u64, gas_price: u128) -> U256 {
    U256::from(gas_units) * U256::from(gas_price)
}

/// Deployment cost estimator
///
/// Runs the estimate and fee reads strictly in order, once each, and stops
/// at the first failure.
#[derive(Clone)]
pub struct GasEstimator<O: FeeOracle> {
    oracle: Arc<O>,
    /// Account the estimate is attributed to, if one is known
    sender: Option<Address>,
}

impl<O: FeeOracle> GasEstimator<O> {
    /// Creates a new gas estimator over the given fee oracle
    pub fn new(oracle: Arc<O>) -> Self {
        Self {
            oracle,
            sender: None,
        }
    }

    /// Attribute estimates to `sender`, so balance-dependent code paths are simulated
    pub fn with_sender(mut self, sender: Option<Address>) -> Self {
        self.sender = sender;
        self
    }

    /// Project the cost of deploying `descriptor` at current network conditions
    ///
    /// # Returns
    ///
    /// * `Result<CostReport, ServiceError>` - The projection, or the first node error
    #[instrument(skip(self, descriptor), err)]
    pub async fn estimate_deployment_cost(
        &self,
        descriptor: &DeploymentDescriptor,
    ) -> Result<CostReport, ServiceError> {
        let tx_request = descriptor.into_request(self.sender);
        debug!(
            "Estimating deployment of {} bytes of init code",
            descriptor.init_code().len()
        );

        let gas_units = self.oracle.estimate_units(&tx_request).await.map_err(|e| {
            error!("Gas estimation rejected: {}", e);
            e
        })?;
        debug!("Node estimated {} gas units", gas_units);

        let gas_price = self.oracle.unit_price().await.map_err(|e| {
            error!("Fee data unavailable: {}", e);
            e
        })?;
        debug!("Node reported gas price of {} wei", gas_price);

        let report = CostReport::new(gas_units, gas_price);
        info!("Projected deployment cost: {} wei", report.total_cost);
        Ok(report)
    }
}
