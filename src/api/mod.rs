//! This mod holds the library's public entry points: process wiring, options, and the client.
mod client;
mod options;
mod wiring;

pub use client::KvClient;
pub use client::KvClientError;
pub use options::MasterOptions;
pub use options::WorkerOptions;
pub use wiring::try_create_master;
pub use wiring::try_create_worker;
pub use wiring::try_create_worker_with_store;
pub use wiring::MasterConfig;
pub use wiring::MasterCreationError;
pub use wiring::MasterHandle;
pub use wiring::StorageConfig;
pub use wiring::WorkerConfig;
pub use wiring::WorkerCreationError;
pub use wiring::WorkerHandle;
