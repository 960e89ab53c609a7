//! Exact decimal scaling of wei amounts for display.
//!
//! Amounts stay integers end to end; only the decimal point moves. Trailing
//! fractional zeros are dropped so one ether prints as `1`, not `1.000000000000000000`.

use alloy_primitives::{
    utils::{format_units, UnitsError},
    U256,
};

/// Wei per gwei
pub const GWEI: u64 = 1_000_000_000;

/// Wei per ether
pub const WEI_PER_ETHER: u128 = 1_000_000_000_000_000_000;

/// Format a wei amount in the chain's top-level unit (10^18 wei)
pub fn format_ether(wei: U256) -> Result<String, UnitsError> {
    format_units(wei, "ether").map(trim_fraction)
}

/// Format a wei amount in gwei (10^9 wei)
pub fn format_gwei(wei: U256) -> Result<String, UnitsError> {
    format_units(wei, "gwei").map(trim_fraction)
}

fn trim_fraction(formatted: String) -> String {
    match formatted.split_once('.') {
        Some((integer, fraction)) => {
            let fraction = fraction.trim_end_matches('0');
            if fraction.is_empty() {
                integer.to_string()
            } else {
                format!("{integer}.{fraction}")
            }
        }
        None => formatted,
    }
}

