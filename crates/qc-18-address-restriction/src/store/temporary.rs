//! Dual-indexed provisional entries
//!
//! Every entry is written twice: once keyed `(address, batch)` to answer
//! "what is the latest decision for this address", and once keyed
//! `(batch, address)` to clean up everything a batch created. Both copies
//! are always written and deleted in the same atomic batch.

use crate::domain::errors::RestrictionError;
use crate::domain::keys;
use crate::domain::value_objects::{Status, TemporaryEntry};
use crate::ports::outbound::{BatchOperation, KeyValueStore};
use shared_types::{Address, BatchId};
use std::sync::Arc;
use tracing::trace;

pub struct TemporaryIndex<S: KeyValueStore> {
    store: Arc<S>,
}

fn decode_status(value: &[u8]) -> Result<Status, RestrictionError> {
    match value {
        [byte] => Status::from_byte(*byte)
            .ok_or_else(|| RestrictionError::Codec(format!("unknown status byte 0x{byte:02x}"))),
        _ => Err(RestrictionError::Codec(format!(
            "status value must be 1 byte, got {}",
            value.len()
        ))),
    }
}

impl<S: KeyValueStore> TemporaryIndex<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Record that `batch_id` proposes `status` for `address`.
    ///
    /// A second put for the same pair overwrites the first.
    pub fn put(
        &self,
        address: &Address,
        batch_id: BatchId,
        status: Status,
    ) -> Result<(), RestrictionError> {
        let value = [status.to_byte()];
        self.store.atomic_batch_write(vec![
            BatchOperation::put(keys::temp_by_addr_key(address, batch_id), value.to_vec()),
            BatchOperation::put(keys::temp_by_batch_key(batch_id, address), value.to_vec()),
        ])?;
        trace!(%address, batch_id, ?status, "temporary entry written");
        Ok(())
    }

    /// The entry with the greatest batch id for `address`.
    pub fn get_latest(&self, address: &Address) -> Result<Option<(BatchId, Status)>, RestrictionError> {
        match self
            .store
            .last_with_prefix(&keys::temp_by_addr_prefix(address))?
        {
            Some((key, value)) => {
                let (_, batch_id) = keys::decode_temp_by_addr_key(&key)?;
                Ok(Some((batch_id, decode_status(&value)?)))
            }
            None => Ok(None),
        }
    }

    /// Remove every entry of `address` from both indexes.
    ///
    /// Returns the number of entries removed.
    pub fn delete_for_address(&self, address: &Address) -> Result<usize, RestrictionError> {
        let entries = self.store.prefix_scan(&keys::temp_by_addr_prefix(address))?;
        if entries.is_empty() {
            return Ok(0);
        }

        let mut ops = Vec::with_capacity(entries.len() * 2);
        for (key, _) in &entries {
            let (_, batch_id) = keys::decode_temp_by_addr_key(key)?;
            ops.push(BatchOperation::delete(key.clone()));
            ops.push(BatchOperation::delete(keys::temp_by_batch_key(batch_id, address)));
        }
        self.store.atomic_batch_write(ops)?;
        trace!(%address, removed = entries.len(), "temporary entries purged for address");
        Ok(entries.len())
    }

    /// Remove every entry created by `batch_id` from both indexes.
    ///
    /// Returns the number of entries removed.
    pub fn delete_for_batch(&self, batch_id: BatchId) -> Result<usize, RestrictionError> {
        let entries = self.store.prefix_scan(&keys::temp_by_batch_prefix(batch_id))?;
        if entries.is_empty() {
            return Ok(0);
        }

        let mut ops = Vec::with_capacity(entries.len() * 2);
        for (key, _) in &entries {
            let (_, address) = keys::decode_temp_by_batch_key(key)?;
            ops.push(BatchOperation::delete(key.clone()));
            ops.push(BatchOperation::delete(keys::temp_by_addr_key(&address, batch_id)));
        }
        self.store.atomic_batch_write(ops)?;
        trace!(batch_id, removed = entries.len(), "temporary entries purged for batch");
        Ok(entries.len())
    }

    /// Address-keyed entries, optionally restricted to one address.
    ///
    /// Ordered by address key, then ascending batch id.
    pub fn iterate(&self, address: Option<&Address>) -> Result<Vec<TemporaryEntry>, RestrictionError> {
        let prefix = match address {
            Some(a) => keys::temp_by_addr_prefix(a),
            None => keys::temp_by_addr_namespace(),
        };
        self.store
            .prefix_scan(&prefix)?
            .iter()
            .map(|(key, value)| -> Result<TemporaryEntry, RestrictionError> {
                let (address, batch_id) = keys::decode_temp_by_addr_key(key)?;
                Ok(TemporaryEntry::new(address, batch_id, decode_status(value)?))
            })
            .collect()
    }

    /// Batch-keyed entries, optionally restricted to one batch.
    ///
    /// Ordered by ascending batch id, then address key.
    pub fn iterate_batch(
        &self,
        batch_id: Option<BatchId>,
    ) -> Result<Vec<TemporaryEntry>, RestrictionError> {
        let prefix = match batch_id {
            Some(id) => keys::temp_by_batch_prefix(id),
            None => keys::temp_by_batch_namespace(),
        };
        self.store
            .prefix_scan(&prefix)?
            .iter()
            .map(|(key, value)| -> Result<TemporaryEntry, RestrictionError> {
                let (batch_id, address) = keys::decode_temp_by_batch_key(key)?;
                Ok(TemporaryEntry::new(address, batch_id, decode_status(value)?))
            })
            .collect()
    }
}
