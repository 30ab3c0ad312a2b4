use crate::storage::{KvStore, StorageError};
use parking_lot::Mutex;
use std::collections::BTreeMap;

// Nothing here survives a restart. Workers use it when started with in-memory storage, and
// tests use it to inspect replicas directly.
#[derive(Default)]
pub struct InMemoryStore {
    records: Mutex<BTreeMap<String, String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        InMemoryStore::default()
    }

    /// All records in key order.
    pub fn entries(&self) -> Vec<(String, String)> {
        self.records
            .lock()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

#[async_trait::async_trait]
impl KvStore for InMemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.records.lock().get(key).cloned())
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.records.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.records.lock().remove(key);
        Ok(())
    }
}
