mod in_memory;
mod redb_store;
mod store;

pub use in_memory::InMemoryStore;
pub use redb_store::RedbError;
pub use redb_store::RedbStore;
pub use store::KvStore;
pub use store::StorageError;
pub(crate) use store::restore;
