//! Permanent restriction set

use crate::domain::entities::AllowList;
use crate::domain::errors::RestrictionError;
use crate::domain::keys;
use crate::domain::value_objects::RESTRICTED_BYTE;
use crate::ports::outbound::KeyValueStore;
use shared_types::Address;
use std::sync::Arc;
use tracing::trace;

pub struct PermanentStore<S: KeyValueStore> {
    store: Arc<S>,
}

impl<S: KeyValueStore> PermanentStore<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Whether `address` is in the permanent set.
    pub fn contains(&self, address: &Address) -> Result<bool, RestrictionError> {
        Ok(self.store.exists(&keys::permanent_key(address))?)
    }

    /// Add `address` to the set. Fails for allow-listed addresses.
    ///
    /// Re-adding an already restricted address is a no-op write.
    pub fn add(&self, allow_list: &AllowList, address: &Address) -> Result<(), RestrictionError> {
        if allow_list.contains(address) {
            return Err(RestrictionError::AllowListedAddress {
                address: address.clone(),
            });
        }
        self.store
            .put(&keys::permanent_key(address), &[RESTRICTED_BYTE])?;
        trace!(%address, "permanent entry written");
        Ok(())
    }

    /// Remove `address` from the set. Removing an absent address is fine.
    pub fn remove(&self, address: &Address) -> Result<(), RestrictionError> {
        self.store.delete(&keys::permanent_key(address))?;
        trace!(%address, "permanent entry removed");
        Ok(())
    }

    /// Every permanently restricted address, ordered by key.
    pub fn iterate(&self) -> Result<Vec<Address>, RestrictionError> {
        self.store
            .prefix_scan(&keys::permanent_namespace())?
            .iter()
            .map(|(key, _)| keys::decode_permanent_key(key))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryKVStore;

    fn setup() -> PermanentStore<InMemoryKVStore> {
        PermanentStore::new(Arc::new(InMemoryKVStore::new()))
    }

    #[test]
    fn test_add_contains_remove() {
        let perm = setup();
        let allow = AllowList::default();
        let a = Address::repeat(1, 20);

        assert!(!perm.contains(&a).unwrap());
        perm.add(&allow, &a).unwrap();
        perm.add(&allow, &a).unwrap();
        assert!(perm.contains(&a).unwrap());
        assert_eq!(perm.iterate().unwrap(), vec![a.clone()]);

        perm.remove(&a).unwrap();
        perm.remove(&a).unwrap();
        assert!(!perm.contains(&a).unwrap());
    }

    #[test]
    fn test_add_rejects_allow_listed() {
        let perm = setup();
        let m = Address::repeat(0xEE, 20);
        let allow = AllowList::new(vec![m.clone()]);

        let err = perm.add(&allow, &m).unwrap_err();
        assert!(matches!(err, RestrictionError::AllowListedAddress { .. }));
        assert!(!perm.contains(&m).unwrap());
    }

    #[test]
    fn test_iterate_orders_by_length_then_bytes() {
        let perm = setup();
        let allow = AllowList::default();
        let long = Address::repeat(0x01, 32);
        let short = Address::repeat(0xFF, 20);
        perm.add(&allow, &long).unwrap();
        perm.add(&allow, &short).unwrap();

        // Length prefix sorts the 20-byte address first
        assert_eq!(perm.iterate().unwrap(), vec![short, long]);
    }
}
