// Export modules for the binary and integration tests
pub mod cli;
pub mod config;
pub mod contract;
pub mod error;
pub mod estimator;
pub mod models;
pub mod rpc;
pub mod units;
