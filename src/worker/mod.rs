//! The worker: local storage, the coordinator for forwarded client requests, and replica
//! propagation to peers.
mod coordinator;
mod peer_client;
mod peers;
mod propagator;
mod registration;
mod server;

pub(crate) use coordinator::WorkerCoordinator;
pub(crate) use peer_client::GrpcPeerTransport;
pub(crate) use peers::LocalMembership;
pub(crate) use propagator::ReplicaPropagator;
pub(crate) use registration::MasterClient;
pub(crate) use server::WorkerRpcServer;
