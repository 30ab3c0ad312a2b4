mod api;
mod cli;
mod logging;
mod master;
mod server;
mod shared;
mod storage;
mod worker;
mod grpc {
    include!("../generated/distributed_kv.rs");
}

pub use api::try_create_master;
pub use api::try_create_worker;
pub use api::try_create_worker_with_store;
pub use api::KvClient;
pub use api::KvClientError;
pub use api::MasterConfig;
pub use api::MasterCreationError;
pub use api::MasterHandle;
pub use api::MasterOptions;
pub use api::StorageConfig;
pub use api::WorkerConfig;
pub use api::WorkerCreationError;
pub use api::WorkerHandle;
pub use api::WorkerOptions;
pub use cli::describe_success;
pub use cli::execute;
pub use cli::parse_command;
pub use cli::wants_retry;
pub use cli::KvCommand;
pub use cli::Outcome;
pub use cli::UsageError;
pub use cli::HELP_TEXT;
pub use cli::RETRY_PROMPT;
pub use logging::create_root_logger_for_file;
pub use logging::create_root_logger_for_stdout;
pub use shared::KvError;
pub use shared::KvOutput;
pub use shared::KvRequest;
pub use shared::MembershipSnapshot;
pub use shared::RpcError;
pub use shared::WorkerEndpoint;
pub use storage::InMemoryStore;
pub use storage::KvStore;
pub use storage::RedbError;
pub use storage::RedbStore;
pub use storage::StorageError;

// `crate::{root_mod}` holds no code, only `mod` and `pub use` statements. No `mod` is `pub`;
// everything public is exported through an individual use statement.
