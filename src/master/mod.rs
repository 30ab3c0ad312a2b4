//! The master: worker registry, round-robin routing and per-key mutation locks.
mod key_lock;
mod membership;
mod registry;
mod router;
mod server;
#[cfg(test)]
mod test_utils;
mod worker_client;

pub(crate) use membership::Membership;
pub(crate) use registry::WorkerRegistry;
pub(crate) use router::RequestRouter;
pub(crate) use server::MasterRpcServer;
pub(crate) use worker_client::GrpcWorkerTransport;
