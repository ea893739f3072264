use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use vault_shared::AccountRecord;

use crate::model::errors::VaultResult;

/// The document store holding one account record per user id.
///
/// Production deployments back this with the hosted document database; the
/// store only needs to hand back whole records, reads never see a partially
/// applied write.
pub trait AccountStore: Send + Sync {
    fn get(&self, uid: &str) -> VaultResult<Option<AccountRecord>>;
    fn put(&self, uid: &str, record: AccountRecord) -> VaultResult<()>;
    /// Every record, ordered by uid.
    fn all(&self) -> VaultResult<Vec<(String, AccountRecord)>>;
}

#[derive(Clone, Default)]
pub struct MemoryAccountStore {
    records: Arc<RwLock<BTreeMap<String, AccountRecord>>>,
}

impl MemoryAccountStore {
    pub fn from_records(records: impl IntoIterator<Item = (String, AccountRecord)>) -> Self {
        Self { records: Arc::new(RwLock::new(records.into_iter().collect())) }
    }

    pub fn len(&self) -> VaultResult<usize> {
        Ok(self.records.read()?.len())
    }

    pub fn is_empty(&self) -> VaultResult<bool> {
        Ok(self.len()? == 0)
    }
}

impl AccountStore for MemoryAccountStore {
    fn get(&self, uid: &str) -> VaultResult<Option<AccountRecord>> {
        Ok(self.records.read()?.get(uid).cloned())
    }

    fn put(&self, uid: &str, record: AccountRecord) -> VaultResult<()> {
        self.records.write()?.insert(uid.to_string(), record);
        Ok(())
    }

    fn all(&self) -> VaultResult<Vec<(String, AccountRecord)>> {
        Ok(self
            .records
            .read()?
            .iter()
            .map(|(uid, record)| (uid.clone(), record.clone()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_replaces_whole_record() {
        let store = MemoryAccountStore::default();
        store
            .put("a", AccountRecord { has_had_subscription: true, ..Default::default() })
            .unwrap();
        store.put("a", AccountRecord { is_trialing: true, ..Default::default() }).unwrap();

        let record = store.get("a").unwrap().unwrap();
        assert!(record.is_trialing);
        assert!(!record.has_had_subscription);
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn all_is_ordered_by_uid() {
        let store = MemoryAccountStore::from_records(
            ["c", "a", "b"].map(|uid| (uid.to_string(), AccountRecord::default())),
        );
        let uids: Vec<String> = store.all().unwrap().into_iter().map(|(uid, _)| uid).collect();
        assert_eq!(uids, vec!["a", "b", "c"]);
    }

    #[test]
    fn missing() {
        assert!(MemoryAccountStore::default().get("nobody").unwrap().is_none());
        assert!(MemoryAccountStore::default().is_empty().unwrap());
    }
}
