use crate::api::options::{MasterOptionsValidated, WorkerOptionsValidated};
use crate::master::{GrpcWorkerTransport, MasterRpcServer, Membership, RequestRouter, WorkerRegistry};
use crate::server::{bind_listener, shutdown_signal, RpcServerShutdownHandle};
use crate::shared::{MembershipSnapshot, RpcError, WorkerEndpoint};
use crate::storage::{InMemoryStore, KvStore, RedbStore, StorageError};
use crate::worker::{
    GrpcPeerTransport, LocalMembership, MasterClient, ReplicaPropagator, WorkerCoordinator, WorkerRpcServer,
};
use crate::{MasterOptions, WorkerOptions};
use std::convert::TryFrom;
use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::JoinHandle;

// ------- Master --------

pub struct MasterConfig {
    pub listen_addr: SocketAddr,
    pub info_logger: slog::Logger,
    pub options: MasterOptions,
}

#[derive(Debug, thiserror::Error)]
pub enum MasterCreationError {
    #[error("Illegal options for configuring master: {0}")]
    IllegalOptions(String),
    #[error("Failed to bind master to {addr}: {source}")]
    Bind { addr: SocketAddr, source: io::Error },
}

pub async fn try_create_master(config: MasterConfig) -> Result<MasterHandle, MasterCreationError> {
    let options = MasterOptionsValidated::try_from(config.options)
        .map_err(|e| MasterCreationError::IllegalOptions(e.to_string()))?;

    let listen_addr = config.listen_addr;
    let (listener, local_addr) = bind_listener(listen_addr)
        .await
        .map_err(|source| MasterCreationError::Bind {
            addr: listen_addr,
            source,
        })?;
    let logger = config
        .info_logger
        .new(slog::o!("component" => "master", "port" => local_addr.port()));

    let membership = Arc::new(Membership::new());
    let transport = Arc::new(GrpcWorkerTransport::new(
        logger.clone(),
        options.connect_timeout,
        options.rpc_timeout,
    ));
    let router = Arc::new(RequestRouter::new(logger.clone(), membership.clone(), transport.clone()));
    let registry = Arc::new(WorkerRegistry::new(logger.clone(), membership, transport));

    let (shutdown_handle, server_shutdown_signal) = shutdown_signal();
    let server = MasterRpcServer::new(logger.clone(), router, registry.clone());
    let server_task = tokio::spawn(server.run(listener, server_shutdown_signal));

    Ok(MasterHandle {
        local_addr,
        registry,
        shutdown_handle,
        server_task,
    })
}

/// MasterHandle owns a running master. Dropping it stops the server.
pub struct MasterHandle {
    local_addr: SocketAddr,
    registry: Arc<WorkerRegistry>,
    shutdown_handle: RpcServerShutdownHandle,
    server_task: JoinHandle<()>,
}

impl MasterHandle {
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// URI clients and workers dial to reach this master.
    pub fn uri(&self) -> String {
        format!("http://{}", self.local_addr)
    }

    pub fn members(&self) -> MembershipSnapshot {
        self.registry.snapshot()
    }

    pub async fn shutdown(self) {
        self.shutdown_handle.shutdown();
        let _ = self.server_task.await;
    }
}

// ------- Worker --------

pub enum StorageConfig {
    /// A redb database under `directory`, created if missing.
    Persistent { directory: PathBuf },
    InMemory,
}

pub struct WorkerConfig {
    pub listen_addr: SocketAddr,
    /// Address peers and the master use to reach this worker. The port is always the bound one.
    pub advertise_address: String,
    pub master_uri: String,
    pub storage: StorageConfig,
    pub info_logger: slog::Logger,
    pub options: WorkerOptions,
}

#[derive(Debug, thiserror::Error)]
pub enum WorkerCreationError {
    #[error("Illegal options for configuring worker: {0}")]
    IllegalOptions(String),
    #[error("Failed to bind worker to {addr}: {source}")]
    Bind { addr: SocketAddr, source: io::Error },
    #[error("Failed to open storage: {0}")]
    Storage(#[from] StorageError),
    #[error("Failed to register with master: {0}")]
    Registration(#[source] RpcError),
}

pub async fn try_create_worker(config: WorkerConfig) -> Result<WorkerHandle, WorkerCreationError> {
    let store: Arc<dyn KvStore> = match &config.storage {
        StorageConfig::Persistent { directory } => Arc::new(RedbStore::open(directory)?),
        StorageConfig::InMemory => Arc::new(InMemoryStore::new()),
    };

    try_create_worker_with_store(config, store).await
}

/// Like `try_create_worker`, but serves from the given store. `config.storage` is ignored.
pub async fn try_create_worker_with_store(
    config: WorkerConfig,
    store: Arc<dyn KvStore>,
) -> Result<WorkerHandle, WorkerCreationError> {
    let options = WorkerOptionsValidated::try_from(config.options)
        .map_err(|e| WorkerCreationError::IllegalOptions(e.to_string()))?;

    let listen_addr = config.listen_addr;
    let (listener, local_addr) = bind_listener(listen_addr)
        .await
        .map_err(|source| WorkerCreationError::Bind {
            addr: listen_addr,
            source,
        })?;
    let me = WorkerEndpoint::new(config.advertise_address, local_addr.port());
    let logger = config
        .info_logger
        .new(slog::o!("component" => "worker", "port" => local_addr.port()));

    let membership = Arc::new(LocalMembership::new(me.clone()));
    let peer_transport = Arc::new(GrpcPeerTransport::new(
        logger.clone(),
        options.connect_timeout,
        options.rpc_timeout,
    ));
    let propagator = ReplicaPropagator::new(logger.clone(), membership.clone(), peer_transport);
    let coordinator = Arc::new(WorkerCoordinator::new(logger.clone(), store.clone(), propagator));

    // Serve before registering: the master may push membership to us as soon as we're known.
    let (shutdown_handle, server_shutdown_signal) = shutdown_signal();
    let server = WorkerRpcServer::new(logger.clone(), coordinator, membership.clone());
    let server_task = tokio::spawn(server.run(listener, server_shutdown_signal));

    let master = MasterClient::new(
        logger.clone(),
        config.master_uri,
        options.connect_timeout,
        options.rpc_timeout,
    );
    let snapshot = match master
        .register_with_retries(&me, options.register_attempts, options.register_backoff)
        .await
    {
        Ok(snapshot) => snapshot,
        Err(e) => {
            shutdown_handle.shutdown();
            let _ = server_task.await;
            return Err(WorkerCreationError::Registration(e));
        }
    };
    slog::info!(
        logger,
        "Registered as {} (membership v{}, {} members)",
        me,
        snapshot.version,
        snapshot.members.len()
    );
    membership.apply(snapshot);

    Ok(WorkerHandle {
        logger,
        me,
        store,
        membership,
        master,
        shutdown_handle,
        server_task,
    })
}

/// WorkerHandle owns a running, registered worker. Dropping it stops the server without
/// deregistering; call `shutdown()` to leave the pool cleanly.
pub struct WorkerHandle {
    logger: slog::Logger,
    me: WorkerEndpoint,
    store: Arc<dyn KvStore>,
    membership: Arc<LocalMembership>,
    master: MasterClient,
    shutdown_handle: RpcServerShutdownHandle,
    server_task: JoinHandle<()>,
}

impl WorkerHandle {
    pub fn endpoint(&self) -> &WorkerEndpoint {
        &self.me
    }

    /// The store this worker serves from, for inspection.
    pub fn store(&self) -> Arc<dyn KvStore> {
        self.store.clone()
    }

    /// This worker's copy of the membership.
    pub fn known_members(&self) -> MembershipSnapshot {
        self.membership.snapshot()
    }

    /// Deregisters from the master (best effort) and stops serving.
    pub async fn shutdown(self) {
        if let Err(e) = self.master.deregister(&self.me).await {
            slog::warn!(self.logger, "Failed to deregister {}: {}", self.me, e);
        }

        self.shutdown_handle.shutdown();
        let _ = self.server_task.await;
    }
}
