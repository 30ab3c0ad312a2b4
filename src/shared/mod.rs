//! Types shared by master, worker and client: endpoints, KV messages, wire conversions, and
//! the pooled RPC channels every node uses to reach workers.
mod channel_pool;
mod convert;
mod endpoint;
mod messages;

pub(crate) use channel_pool::connect;
pub(crate) use channel_pool::ChannelPool;
pub use channel_pool::RpcError;
pub(crate) use convert::*;
pub use endpoint::MembershipSnapshot;
pub use endpoint::WorkerEndpoint;
pub use messages::KvError;
pub use messages::KvOutput;
pub use messages::KvRequest;
pub(crate) use messages::Method;
pub(crate) use messages::ReplicationIntent;
