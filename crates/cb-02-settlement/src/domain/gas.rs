//! # Gas Metering
//!
//! Intrinsic gas follows the usual transaction schedule. Contract calls add a
//! flat execution charge; confidential inputs are not metered.

/// Gas costs.
pub mod costs {
    /// Base transaction gas.
    pub const TX_BASE: u64 = 21_000;
    /// Contract creation base gas.
    pub const TX_CREATE: u64 = 53_000;
    /// Gas per non-zero byte of calldata.
    pub const TX_DATA_NON_ZERO: u64 = 16;
    /// Gas per zero byte of calldata.
    pub const TX_DATA_ZERO: u64 = 4;
}

/// Intrinsic gas of a transaction with `data`.
pub fn intrinsic_gas(data: &[u8], is_create: bool) -> u64 {
    let data_gas: u64 = data
        .iter()
        .map(|b| {
            if *b == 0 {
                costs::TX_DATA_ZERO
            } else {
                costs::TX_DATA_NON_ZERO
            }
        })
        .sum();
    let base = if is_create {
        costs::TX_CREATE
    } else {
        costs::TX_BASE
    };
    base + data_gas
}
