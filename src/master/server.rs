use crate::grpc::kv_methods_server::{KvMethods, KvMethodsServer};
use crate::grpc::worker_registry_server::{WorkerRegistry as GrpcWorkerRegistry, WorkerRegistryServer};
use crate::grpc::{ProtoDeregisterReq, ProtoKvReq, ProtoKvResult, ProtoMembershipReply, ProtoRegisterReq};
use crate::master::registry::WorkerRegistry;
use crate::master::router::RequestRouter;
use crate::server::RpcServerShutdownSignal;
use crate::shared::{kv_result_to_proto, membership_to_proto, port_from_proto, MembershipSnapshot, WorkerEndpoint};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;
use tonic::{Request, Response, Status};

const REGISTER_REPLY_MESSAGE: &str = "Register Successfully!";
const DEREGISTER_REPLY_MESSAGE: &str = "Deregistered";

/// MasterRpcServer exposes the client-facing KV methods and the worker registry.
#[derive(Clone)]
pub(crate) struct MasterRpcServer {
    logger: slog::Logger,
    router: Arc<RequestRouter>,
    registry: Arc<WorkerRegistry>,
}

impl MasterRpcServer {
    pub(crate) fn new(logger: slog::Logger, router: Arc<RequestRouter>, registry: Arc<WorkerRegistry>) -> Self {
        MasterRpcServer {
            logger,
            router,
            registry,
        }
    }

    pub(crate) async fn run(self, listener: TcpListener, shutdown_signal: RpcServerShutdownSignal) {
        let logger = self.logger.clone();
        slog::info!(logger, "Master listening on '{:?}'", listener.local_addr());

        let result = Server::builder()
            .add_service(KvMethodsServer::new(self.clone()))
            .add_service(WorkerRegistryServer::new(self))
            .serve_with_incoming_shutdown(TcpListenerStream::new(listener), shutdown_signal)
            .await;

        slog::info!(logger, "Master server run() has exited: {:?}", result);
    }

    fn convert_key(rpc_request: &ProtoKvReq) -> Result<String, Status> {
        if rpc_request.key.is_empty() {
            return Err(Status::invalid_argument("Key must not be empty"));
        }

        Ok(rpc_request.key.clone())
    }

    fn convert_register_input(
        rpc_request: ProtoRegisterReq,
        remote_addr: Option<SocketAddr>,
    ) -> Result<WorkerEndpoint, Status> {
        let port = port_from_proto(rpc_request.port).map_err(Status::invalid_argument)?;

        // A worker that doesn't advertise an address is reached at the address it called from.
        let address = if rpc_request.address.is_empty() {
            match remote_addr {
                Some(socket_addr) => socket_addr.ip().to_string(),
                None => return Err(Status::invalid_argument("Worker address missing and not inferable")),
            }
        } else {
            rpc_request.address
        };

        Ok(WorkerEndpoint::new(address, port))
    }

    fn convert_membership_reply(message: &str, snapshot: &MembershipSnapshot) -> ProtoMembershipReply {
        ProtoMembershipReply {
            message: message.to_string(),
            membership: Some(membership_to_proto(snapshot)),
        }
    }
}

#[async_trait::async_trait]
impl KvMethods for MasterRpcServer {
    async fn get(&self, rpc_request_wrapped: Request<ProtoKvReq>) -> Result<Response<ProtoKvResult>, Status> {
        let rpc_request = rpc_request_wrapped.into_inner();
        slog::debug!(self.logger, "ServerWire - Get {:?}", rpc_request);

        let key = Self::convert_key(&rpc_request)?;
        let rpc_reply = kv_result_to_proto(self.router.get(key).await);

        slog::debug!(self.logger, "ServerWire - {:?}", rpc_reply);
        Ok(Response::new(rpc_reply))
    }

    async fn put(&self, rpc_request_wrapped: Request<ProtoKvReq>) -> Result<Response<ProtoKvResult>, Status> {
        let rpc_request = rpc_request_wrapped.into_inner();
        slog::debug!(self.logger, "ServerWire - Put {:?}", rpc_request);

        let key = Self::convert_key(&rpc_request)?;
        let rpc_reply = kv_result_to_proto(self.router.put(key, rpc_request.value).await);

        slog::debug!(self.logger, "ServerWire - {:?}", rpc_reply);
        Ok(Response::new(rpc_reply))
    }

    async fn del(&self, rpc_request_wrapped: Request<ProtoKvReq>) -> Result<Response<ProtoKvResult>, Status> {
        let rpc_request = rpc_request_wrapped.into_inner();
        slog::debug!(self.logger, "ServerWire - Del {:?}", rpc_request);

        let key = Self::convert_key(&rpc_request)?;
        let rpc_reply = kv_result_to_proto(self.router.del(key).await);

        slog::debug!(self.logger, "ServerWire - {:?}", rpc_reply);
        Ok(Response::new(rpc_reply))
    }
}

#[async_trait::async_trait]
impl GrpcWorkerRegistry for MasterRpcServer {
    async fn register(
        &self,
        rpc_request_wrapped: Request<ProtoRegisterReq>,
    ) -> Result<Response<ProtoMembershipReply>, Status> {
        let remote_addr = rpc_request_wrapped.remote_addr();
        let rpc_request = rpc_request_wrapped.into_inner();
        slog::debug!(self.logger, "ServerWire - {:?}", rpc_request);

        let endpoint = Self::convert_register_input(rpc_request, remote_addr)?;
        let snapshot = self.registry.register(endpoint).await;
        let rpc_reply = Self::convert_membership_reply(REGISTER_REPLY_MESSAGE, &snapshot);

        slog::debug!(self.logger, "ServerWire - {:?}", rpc_reply);
        Ok(Response::new(rpc_reply))
    }

    async fn deregister(
        &self,
        rpc_request_wrapped: Request<ProtoDeregisterReq>,
    ) -> Result<Response<ProtoMembershipReply>, Status> {
        let rpc_request = rpc_request_wrapped.into_inner();
        slog::debug!(self.logger, "ServerWire - {:?}", rpc_request);

        let port = port_from_proto(rpc_request.port).map_err(Status::invalid_argument)?;
        let snapshot = self.registry.deregister(port).await;
        let rpc_reply = Self::convert_membership_reply(DEREGISTER_REPLY_MESSAGE, &snapshot);

        slog::debug!(self.logger, "ServerWire - {:?}", rpc_reply);
        Ok(Response::new(rpc_reply))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_input_prefers_advertised_address() {
        let rpc_request = ProtoRegisterReq {
            message: "hello".into(),
            address: "10.0.0.7".into(),
            port: 51051,
        };
        let remote: SocketAddr = "127.0.0.1:40000".parse().unwrap();

        let endpoint = MasterRpcServer::convert_register_input(rpc_request, Some(remote)).unwrap();

        assert_eq!(WorkerEndpoint::new("10.0.0.7", 51051), endpoint);
    }

    #[test]
    fn register_input_falls_back_to_remote_address() {
        let rpc_request = ProtoRegisterReq {
            message: String::new(),
            address: String::new(),
            port: 51051,
        };
        let remote: SocketAddr = "192.168.1.4:40000".parse().unwrap();

        let endpoint = MasterRpcServer::convert_register_input(rpc_request, Some(remote)).unwrap();

        assert_eq!(WorkerEndpoint::new("192.168.1.4", 51051), endpoint);
    }

    #[test]
    fn register_input_rejects_bad_port() {
        let rpc_request = ProtoRegisterReq {
            message: String::new(),
            address: "127.0.0.1".into(),
            port: 70000,
        };

        let status = MasterRpcServer::convert_register_input(rpc_request, None).unwrap_err();

        assert_eq!(tonic::Code::InvalidArgument, status.code());
    }

    #[test]
    fn empty_key_is_rejected() {
        let rpc_request = ProtoKvReq {
            key: String::new(),
            value: "8".into(),
        };

        let status = MasterRpcServer::convert_key(&rpc_request).unwrap_err();

        assert_eq!(tonic::Code::InvalidArgument, status.code());
    }
}
