//! # Core Domain Entities
//!
//! Ledger-level identifiers and amounts shared by the restriction subsystem,
//! the host runtime and the test suite.
//!
//! ## Clusters
//!
//! - **Accounts**: `Address`
//! - **Governance**: `BatchId`
//! - **Value**: `Coin`, `Coins`

use crate::errors::TypeError;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Maximum address length in bytes.
///
/// Addresses are stored length-prefixed with a single byte, so 255 is a hard
/// upper bound.
pub const MAX_ADDRESS_LEN: usize = 255;

/// Identifier of a governance batch (proposal).
///
/// Assigned by the governance lifecycle in strictly increasing order, which
/// lets it double as a logical clock.
pub type BatchId = u64;

/// Amount of a single denomination.
pub type Amount = u128;

// =============================================================================
// CLUSTER A: ACCOUNTS
// =============================================================================

/// An opaque, orderable account identifier.
///
/// Serialized as a `0x`-prefixed hex string.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, SerializeDisplay, DeserializeFromStr)]
pub struct Address(Vec<u8>);

impl Address {
    /// Build an address from raw bytes.
    ///
    /// Rejects empty addresses and anything longer than [`MAX_ADDRESS_LEN`].
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, TypeError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(TypeError::EmptyAddress);
        }
        if bytes.len() > MAX_ADDRESS_LEN {
            return Err(TypeError::AddressTooLong {
                len: bytes.len(),
                max: MAX_ADDRESS_LEN,
            });
        }
        Ok(Self(bytes))
    }

    /// Fixed-width test/fixture helper: `len` copies of `byte`.
    #[must_use]
    pub fn repeat(byte: u8, len: usize) -> Self {
        let len = len.clamp(1, MAX_ADDRESS_LEN);
        Self(vec![byte; len])
    }

    /// Raw address bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Length in bytes (always 1..=255).
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for clippy's `len_without_is_empty`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(&self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

impl FromStr for Address {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
        let bytes = hex::decode(digits).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        Self::new(bytes)
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

// =============================================================================
// CLUSTER B: VALUE
// =============================================================================

/// A single denomination amount, e.g. `10ustake`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coin {
    pub denom: String,
    pub amount: Amount,
}

impl Coin {
    pub fn new(amount: Amount, denom: impl Into<String>) -> Self {
        Self {
            denom: denom.into(),
            amount,
        }
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

impl FromStr for Coin {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let split = s
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| TypeError::InvalidCoin(s.to_string()))?;
        let (amount, denom) = s.split_at(split);
        if amount.is_empty() || !is_valid_denom(denom) {
            return Err(TypeError::InvalidCoin(s.to_string()));
        }
        let amount = amount
            .parse::<Amount>()
            .map_err(|_| TypeError::InvalidCoin(s.to_string()))?;
        Ok(Self::new(amount, denom))
    }
}

fn is_valid_denom(denom: &str) -> bool {
    let mut chars = denom.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | ':' | '.' | '_' | '-'))
}

/// A normalized multi-denomination amount.
///
/// Invariants: one entry per denomination, no zero amounts, ordered by denom.
/// Serialized as the comma-separated string form (`"10atom,5ustake"`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, SerializeDisplay, DeserializeFromStr)]
pub struct Coins(BTreeMap<String, Amount>);

impl Coins {
    /// The empty amount.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Normalize a list of coins, summing duplicates and dropping zeros.
    pub fn new(coins: impl IntoIterator<Item = Coin>) -> Result<Self, TypeError> {
        let mut map: BTreeMap<String, Amount> = BTreeMap::new();
        for coin in coins {
            let entry = map.entry(coin.denom.clone()).or_insert(0);
            *entry = entry
                .checked_add(coin.amount)
                .ok_or(TypeError::AmountOverflow { denom: coin.denom })?;
        }
        map.retain(|_, amount| *amount > 0);
        Ok(Self(map))
    }

    /// Convenience constructor for a single denomination.
    #[must_use]
    pub fn single(amount: Amount, denom: impl Into<String>) -> Self {
        let mut map = BTreeMap::new();
        if amount > 0 {
            map.insert(denom.into(), amount);
        }
        Self(map)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Amount held of `denom` (zero if absent).
    #[must_use]
    pub fn amount_of(&self, denom: &str) -> Amount {
        self.0.get(denom).copied().unwrap_or(0)
    }

    /// True when, for every denomination in `other`, `self` holds at least
    /// as much. Denominations present only in `self` are ignored.
    #[must_use]
    pub fn is_all_gte(&self, other: &Coins) -> bool {
        other
            .0
            .iter()
            .all(|(denom, amount)| self.amount_of(denom) >= *amount)
    }

    /// `self - other`, or `None` if any denomination would go negative.
    #[must_use]
    pub fn checked_sub(&self, other: &Coins) -> Option<Coins> {
        let mut map = self.0.clone();
        for (denom, amount) in &other.0 {
            let held = map.get_mut(denom)?;
            *held = held.checked_sub(*amount)?;
        }
        map.retain(|_, amount| *amount > 0);
        Some(Self(map))
    }

    /// `self + other`, or `None` on overflow.
    #[must_use]
    pub fn checked_add(&self, other: &Coins) -> Option<Coins> {
        Self::new(self.iter().chain(other.iter())).ok()
    }

    /// Iterate as `Coin` values in denomination order.
    pub fn iter(&self) -> impl Iterator<Item = Coin> + '_ {
        self.0
            .iter()
            .map(|(denom, amount)| Coin::new(*amount, denom.clone()))
    }
}

impl fmt::Display for Coins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for coin in self.iter() {
            if !first {
                f.write_str(",")?;
            }
            write!(f, "{coin}")?;
            first = false;
        }
        Ok(())
    }
}

impl FromStr for Coins {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(Self::empty());
        }
        let coins = s
            .split(',')
            .map(Coin::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(coins)
    }
}

impl FromIterator<Coin> for Coins {
    /// Overflowing sums saturate; use [`Coins::new`] to detect them.
    fn from_iter<I: IntoIterator<Item = Coin>>(iter: I) -> Self {
        let mut map: BTreeMap<String, Amount> = BTreeMap::new();
        for coin in iter {
            let entry = map.entry(coin.denom).or_insert(0);
            *entry = entry.saturating_add(coin.amount);
        }
        map.retain(|_, amount| *amount > 0);
        Self(map)
    }
}
