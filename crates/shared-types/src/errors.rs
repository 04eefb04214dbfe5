//! # Error Types
//!
//! Errors raised while constructing shared value types.

use thiserror::Error;

/// Errors from parsing or validating shared types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    /// Address with no bytes.
    #[error("Address must not be empty")]
    EmptyAddress,

    /// Address longer than the length prefix can encode.
    #[error("Address too long: {len} bytes, max {max}")]
    AddressTooLong { len: usize, max: usize },

    /// Address string was not valid hex.
    #[error("Invalid hex address: {0}")]
    InvalidHex(String),

    /// Coin string did not match `<amount><denom>`.
    #[error("Invalid coin: {0:?}")]
    InvalidCoin(String),

    /// Summing duplicate denominations overflowed.
    #[error("Amount overflow for denom {denom}")]
    AmountOverflow { denom: String },
}
