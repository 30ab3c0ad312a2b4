//! Durable worker storage backed by redb.
//!
//! One database file per worker, under a worker-local directory. Each put/delete is its own
//! write transaction and is durable once the call returns.

use crate::storage::{KvStore, StorageError};
use redb::{Database, ReadableDatabase, TableDefinition};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const RECORDS: TableDefinition<&str, &str> = TableDefinition::new("records");
const DATABASE_FILE_NAME: &str = "records.redb";

#[derive(Debug, thiserror::Error)]
pub enum RedbError {
    #[error("redb error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("redb table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("redb storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("redb commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("redb transaction error: {0}")]
    Transaction(Box<redb::TransactionError>),
}

impl From<RedbError> for StorageError {
    fn from(e: RedbError) -> Self {
        StorageError::Engine(e.to_string())
    }
}

fn box_txn_error(e: redb::TransactionError) -> RedbError {
    RedbError::Transaction(Box::new(e))
}

pub struct RedbStore {
    db: Arc<Database>,
    path: PathBuf,
}

impl RedbStore {
    /// Opens the store in `directory`, creating the directory and database if missing.
    pub fn open<P: AsRef<Path>>(directory: P) -> Result<Self, StorageError> {
        fs::create_dir_all(directory.as_ref())?;
        let path = directory.as_ref().join(DATABASE_FILE_NAME);
        let db = Database::create(&path).map_err(RedbError::from)?;

        // Create the table eagerly so reads work before the first write.
        let txn = db.begin_write().map_err(box_txn_error)?;
        let _ = txn.open_table(RECORDS).map_err(RedbError::from)?;
        txn.commit().map_err(RedbError::from)?;

        Ok(RedbStore {
            db: Arc::new(db),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait::async_trait]
impl KvStore for RedbStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let db = self.db.clone();
        let key = key.to_string();
        run_blocking(move || read_record(&db, &key)).await
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let db = self.db.clone();
        let key = key.to_string();
        let value = value.to_string();
        run_blocking(move || write_record(&db, &key, &value)).await
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let db = self.db.clone();
        let key = key.to_string();
        run_blocking(move || remove_record(&db, &key)).await
    }
}

// redb calls block on disk IO, so they run off the async worker threads.
async fn run_blocking<T, F>(f: F) -> Result<T, StorageError>
where
    F: FnOnce() -> Result<T, RedbError> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(f).await {
        Ok(result) => result.map_err(StorageError::from),
        Err(join_error) => Err(StorageError::Engine(format!("storage task failed: {}", join_error))),
    }
}

fn read_record(db: &Database, key: &str) -> Result<Option<String>, RedbError> {
    let txn = db.begin_read().map_err(box_txn_error)?;
    let table = txn.open_table(RECORDS)?;
    let value = table.get(key)?.map(|guard| guard.value().to_string());
    Ok(value)
}

fn write_record(db: &Database, key: &str, value: &str) -> Result<(), RedbError> {
    let txn = db.begin_write().map_err(box_txn_error)?;
    {
        let mut table = txn.open_table(RECORDS)?;
        table.insert(key, value)?;
    }
    txn.commit()?;
    Ok(())
}

fn remove_record(db: &Database, key: &str) -> Result<(), RedbError> {
    let txn = db.begin_write().map_err(box_txn_error)?;
    {
        let mut table = txn.open_table(RECORDS)?;
        table.remove(key)?;
    }
    txn.commit()?;
    Ok(())
}
