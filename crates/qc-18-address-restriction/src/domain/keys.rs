//! Store key layout
//!
//! All namespaces share one keyspace, separated by a one-byte prefix:
//!
//! ```text
//! 0x00 <name>                         params
//! 0x01 <len:u8> <addr>                permanent restrictions
//! 0x02 <len:u8> <addr> <batch:u64 BE> temporary entries by address
//! 0x03 <batch:u64 BE> <len:u8> <addr> temporary entries by batch
//! ```
//!
//! Addresses are length-prefixed so one address can never be a byte prefix of
//! another inside the same namespace. Batch ids are fixed-width big-endian so
//! lexicographic key order equals numeric order.

use super::errors::RestrictionError;
use shared_types::{Address, BatchId};

pub const PARAMS_PREFIX: u8 = 0x00;
pub const PERMANENT_PREFIX: u8 = 0x01;
pub const TEMP_BY_ADDR_PREFIX: u8 = 0x02;
pub const TEMP_BY_BATCH_PREFIX: u8 = 0x03;

const BATCH_LEN: usize = 8;

fn push_address(buf: &mut Vec<u8>, address: &Address) {
    // Address construction guarantees len <= 255
    buf.push(address.len() as u8);
    buf.extend_from_slice(address.as_bytes());
}

/// Decode `<len><addr>` from the front of `buf`, returning the rest.
fn take_address(buf: &[u8]) -> Result<(Address, &[u8]), RestrictionError> {
    let (&len, rest) = buf
        .split_first()
        .ok_or_else(|| RestrictionError::Codec("missing address length".into()))?;
    let len = len as usize;
    if rest.len() < len {
        return Err(RestrictionError::Codec(format!(
            "address truncated: need {len} bytes, have {}",
            rest.len()
        )));
    }
    let (addr, rest) = rest.split_at(len);
    Ok((Address::new(addr.to_vec())?, rest))
}

fn take_batch(buf: &[u8]) -> Result<(BatchId, &[u8]), RestrictionError> {
    if buf.len() < BATCH_LEN {
        return Err(RestrictionError::Codec(format!(
            "batch id truncated: {} bytes",
            buf.len()
        )));
    }
    let (raw, rest) = buf.split_at(BATCH_LEN);
    let mut bytes = [0u8; BATCH_LEN];
    bytes.copy_from_slice(raw);
    Ok((BatchId::from_be_bytes(bytes), rest))
}

fn strip_prefix(key: &[u8], prefix: u8) -> Result<&[u8], RestrictionError> {
    match key.split_first() {
        Some((&p, rest)) if p == prefix => Ok(rest),
        _ => Err(RestrictionError::Codec(format!(
            "expected namespace 0x{prefix:02x}"
        ))),
    }
}

fn expect_end(rest: &[u8]) -> Result<(), RestrictionError> {
    if rest.is_empty() {
        Ok(())
    } else {
        Err(RestrictionError::Codec(format!(
            "{} trailing bytes in key",
            rest.len()
        )))
    }
}

// === Params ===

pub fn params_key(name: &str) -> Vec<u8> {
    let mut key = Vec::with_capacity(1 + name.len());
    key.push(PARAMS_PREFIX);
    key.extend_from_slice(name.as_bytes());
    key
}

// === Permanent ===

pub fn permanent_key(address: &Address) -> Vec<u8> {
    let mut key = Vec::with_capacity(2 + address.len());
    key.push(PERMANENT_PREFIX);
    push_address(&mut key, address);
    key
}

pub fn permanent_namespace() -> Vec<u8> {
    vec![PERMANENT_PREFIX]
}

pub fn decode_permanent_key(key: &[u8]) -> Result<Address, RestrictionError> {
    let rest = strip_prefix(key, PERMANENT_PREFIX)?;
    let (address, rest) = take_address(rest)?;
    expect_end(rest)?;
    Ok(address)
}

// === Temporary entries by address ===

pub fn temp_by_addr_key(address: &Address, batch_id: BatchId) -> Vec<u8> {
    let mut key = temp_by_addr_prefix(address);
    key.extend_from_slice(&batch_id.to_be_bytes());
    key
}

/// Prefix covering every entry of one address.
pub fn temp_by_addr_prefix(address: &Address) -> Vec<u8> {
    let mut key = Vec::with_capacity(2 + address.len() + BATCH_LEN);
    key.push(TEMP_BY_ADDR_PREFIX);
    push_address(&mut key, address);
    key
}

pub fn temp_by_addr_namespace() -> Vec<u8> {
    vec![TEMP_BY_ADDR_PREFIX]
}

pub fn decode_temp_by_addr_key(key: &[u8]) -> Result<(Address, BatchId), RestrictionError> {
    let rest = strip_prefix(key, TEMP_BY_ADDR_PREFIX)?;
    let (address, rest) = take_address(rest)?;
    let (batch_id, rest) = take_batch(rest)?;
    expect_end(rest)?;
    Ok((address, batch_id))
}

// === Temporary entries by batch ===

pub fn temp_by_batch_key(batch_id: BatchId, address: &Address) -> Vec<u8> {
    let mut key = temp_by_batch_prefix(batch_id);
    push_address(&mut key, address);
    key
}

/// Prefix covering every entry of one batch.
pub fn temp_by_batch_prefix(batch_id: BatchId) -> Vec<u8> {
    let mut key = Vec::with_capacity(1 + BATCH_LEN + 32);
    key.push(TEMP_BY_BATCH_PREFIX);
    key.extend_from_slice(&batch_id.to_be_bytes());
    key
}

pub fn temp_by_batch_namespace() -> Vec<u8> {
    vec![TEMP_BY_BATCH_PREFIX]
}

pub fn decode_temp_by_batch_key(key: &[u8]) -> Result<(BatchId, Address), RestrictionError> {
    let rest = strip_prefix(key, TEMP_BY_BATCH_PREFIX)?;
    let (batch_id, rest) = take_batch(rest)?;
    let (address, rest) = take_address(rest)?;
    expect_end(rest)?;
    Ok((batch_id, address))
}

/// Smallest key greater than every key starting with `prefix`.
///
/// `None` when the prefix is all `0xFF` (the range is unbounded above).
pub fn prefix_successor(prefix: &[u8]) -> Option<Vec<u8>> {
    let mut end = prefix.to_vec();
    while let Some(last) = end.pop() {
        if last < u8::MAX {
            end.push(last + 1);
            return Some(end);
        }
    }
    None
}
