use std::io;

/// KvStore is the local, ordered key-value engine a worker holds its replica in.
///
/// Implementations must tolerate concurrent calls from many RPC handlers. They give no
/// cross-key or multi-call atomicity; a read-modify-write on one key is made safe by the
/// master's per-key lock, not by the store.
#[async_trait::async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Inserts or overwrites `key`. Returns once the write is durable.
    async fn put(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key`. Removing an absent key succeeds.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage io failure: {0}")]
    Io(#[from] io::Error),
    #[error("storage engine failure: {0}")]
    Engine(String),
}

/// Puts `key` back the way it was: `prior` present means put it, absent means delete.
pub(crate) async fn restore(store: &dyn KvStore, key: &str, prior: Option<&str>) -> Result<(), StorageError> {
    match prior {
        Some(value) => store.put(key, value).await,
        None => store.delete(key).await,
    }
}
