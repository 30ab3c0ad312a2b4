use crate::grpc::kv_methods_server::{KvMethods, KvMethodsServer};
use crate::grpc::worker_membership_server::{WorkerMembership, WorkerMembershipServer};
use crate::grpc::worker_spreader_server::{WorkerSpreader, WorkerSpreaderServer};
use crate::grpc::{
    proto_spread_result, ProtoKvReq, ProtoKvResult, ProtoMembership, ProtoMembershipAck, ProtoServerFault,
    ProtoSpreadAck, ProtoSpreadReq, ProtoSpreadResult,
};
use crate::server::RpcServerShutdownSignal;
use crate::shared::{intent_from_proto, kv_result_to_proto, membership_from_proto};
use crate::storage::StorageError;
use crate::worker::coordinator::WorkerCoordinator;
use crate::worker::peers::LocalMembership;
use crate::worker::propagator::apply_replication_intent;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;
use tonic::{Request, Response, Status};

/// WorkerRpcServer serves forwarded client requests, replication from peers, and membership
/// pushes from the master.
#[derive(Clone)]
pub(crate) struct WorkerRpcServer {
    logger: slog::Logger,
    coordinator: Arc<WorkerCoordinator>,
    membership: Arc<LocalMembership>,
}

impl WorkerRpcServer {
    pub(crate) fn new(
        logger: slog::Logger,
        coordinator: Arc<WorkerCoordinator>,
        membership: Arc<LocalMembership>,
    ) -> Self {
        WorkerRpcServer {
            logger,
            coordinator,
            membership,
        }
    }

    pub(crate) async fn run(self, listener: TcpListener, shutdown_signal: RpcServerShutdownSignal) {
        let logger = self.logger.clone();
        slog::info!(logger, "Worker listening on '{:?}'", listener.local_addr());

        let result = Server::builder()
            .add_service(KvMethodsServer::new(self.clone()))
            .add_service(WorkerSpreaderServer::new(self.clone()))
            .add_service(WorkerMembershipServer::new(self))
            .serve_with_incoming_shutdown(TcpListenerStream::new(listener), shutdown_signal)
            .await;

        slog::info!(logger, "Worker server run() has exited: {:?}", result);
    }

    async fn handle_spread(&self, rpc_request: ProtoSpreadReq) -> Result<ProtoSpreadResult, Status> {
        let intent = intent_from_proto(rpc_request).map_err(Status::invalid_argument)?;
        let app_result = apply_replication_intent(self.coordinator.store().as_ref(), &intent).await;

        if let Err(e) = &app_result {
            slog::error!(self.logger, "Failed to apply replicated {:?} on '{}': {}", intent.method, intent.key, e);
        }
        Ok(Self::convert_spread_result(app_result))
    }

    fn convert_spread_result(app_result: Result<(), StorageError>) -> ProtoSpreadResult {
        match app_result {
            Ok(()) => ProtoSpreadResult {
                result: Some(proto_spread_result::Result::Ok(ProtoSpreadAck {})),
            },
            Err(e) => ProtoSpreadResult {
                result: Some(proto_spread_result::Result::Err(ProtoServerFault { message: e.to_string() })),
            },
        }
    }

    fn handle_sync_membership(&self, rpc_request: ProtoMembership) -> Result<ProtoMembershipAck, Status> {
        let snapshot = membership_from_proto(rpc_request).map_err(Status::invalid_argument)?;
        let version = snapshot.version;

        if self.membership.apply(snapshot) {
            slog::info!(self.logger, "Applied membership v{}", version);
        } else {
            slog::debug!(self.logger, "Ignored stale membership v{}", version);
        }

        Ok(ProtoMembershipAck {})
    }
}

#[async_trait::async_trait]
impl KvMethods for WorkerRpcServer {
    async fn get(&self, rpc_request_wrapped: Request<ProtoKvReq>) -> Result<Response<ProtoKvResult>, Status> {
        let rpc_request = rpc_request_wrapped.into_inner();
        slog::debug!(self.logger, "ServerWire - Get {:?}", rpc_request);

        let rpc_reply = kv_result_to_proto(self.coordinator.get(rpc_request.key).await);

        slog::debug!(self.logger, "ServerWire - {:?}", rpc_reply);
        Ok(Response::new(rpc_reply))
    }

    async fn put(&self, rpc_request_wrapped: Request<ProtoKvReq>) -> Result<Response<ProtoKvResult>, Status> {
        let rpc_request = rpc_request_wrapped.into_inner();
        slog::debug!(self.logger, "ServerWire - Put {:?}", rpc_request);

        let rpc_reply = kv_result_to_proto(self.coordinator.put(rpc_request.key, rpc_request.value).await);

        slog::debug!(self.logger, "ServerWire - {:?}", rpc_reply);
        Ok(Response::new(rpc_reply))
    }

    async fn del(&self, rpc_request_wrapped: Request<ProtoKvReq>) -> Result<Response<ProtoKvResult>, Status> {
        let rpc_request = rpc_request_wrapped.into_inner();
        slog::debug!(self.logger, "ServerWire - Del {:?}", rpc_request);

        let rpc_reply = kv_result_to_proto(self.coordinator.del(rpc_request.key).await);

        slog::debug!(self.logger, "ServerWire - {:?}", rpc_reply);
        Ok(Response::new(rpc_reply))
    }
}

#[async_trait::async_trait]
impl WorkerSpreader for WorkerRpcServer {
    async fn spread(
        &self,
        rpc_request_wrapped: Request<ProtoSpreadReq>,
    ) -> Result<Response<ProtoSpreadResult>, Status> {
        let rpc_request = rpc_request_wrapped.into_inner();

        slog::debug!(self.logger, "ServerWire - {:?}", rpc_request);
        let rpc_result = self.handle_spread(rpc_request).await;
        slog::debug!(self.logger, "ServerWire - {:?}", rpc_result);

        rpc_result.map(Response::new)
    }
}

#[async_trait::async_trait]
impl WorkerMembership for WorkerRpcServer {
    async fn sync_membership(
        &self,
        rpc_request_wrapped: Request<ProtoMembership>,
    ) -> Result<Response<ProtoMembershipAck>, Status> {
        let rpc_request = rpc_request_wrapped.into_inner();

        slog::debug!(self.logger, "ServerWire - {:?}", rpc_request);
        let rpc_result = self.handle_sync_membership(rpc_request);
        slog::debug!(self.logger, "ServerWire - {:?}", rpc_result);

        rpc_result.map(Response::new)
    }
}
