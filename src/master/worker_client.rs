use crate::grpc::kv_methods_client::KvMethodsClient;
use crate::grpc::worker_membership_client::WorkerMembershipClient;
use crate::grpc::ProtoKvReq;
use crate::shared::{
    kv_result_from_proto, membership_to_proto, ChannelPool, KvError, KvOutput, KvRequest, MembershipSnapshot,
    RpcError, WorkerEndpoint,
};
use tokio::time::Duration;

/// WorkerTransport is how the master reaches workers.
#[async_trait::async_trait]
pub(crate) trait WorkerTransport: Send + Sync {
    /// Forwards a client request. Transport failures come back as `KvError::WorkerUnavailable`.
    async fn forward(&self, worker: &WorkerEndpoint, request: KvRequest) -> Result<KvOutput, KvError>;

    async fn sync_membership(&self, worker: &WorkerEndpoint, snapshot: &MembershipSnapshot) -> Result<(), RpcError>;
}

pub(crate) struct GrpcWorkerTransport {
    logger: slog::Logger,
    pool: ChannelPool,
}

impl GrpcWorkerTransport {
    pub(crate) fn new(logger: slog::Logger, connect_timeout: Duration, rpc_timeout: Duration) -> Self {
        GrpcWorkerTransport {
            logger,
            pool: ChannelPool::new(connect_timeout, rpc_timeout),
        }
    }

    async fn try_forward(
        &self,
        worker: &WorkerEndpoint,
        request: KvRequest,
    ) -> Result<Result<KvOutput, KvError>, RpcError> {
        let channel = self.pool.channel(worker).await?;
        let mut client = KvMethodsClient::new(channel);

        let rpc_reply = match request {
            KvRequest::Get { key } => client.get(ProtoKvReq { key, value: String::new() }).await?,
            KvRequest::Put { key, value } => client.put(ProtoKvReq { key, value }).await?,
            KvRequest::Del { key } => client.del(ProtoKvReq { key, value: String::new() }).await?,
        };

        Ok(kv_result_from_proto(rpc_reply.into_inner()))
    }

    async fn try_sync_membership(&self, worker: &WorkerEndpoint, snapshot: &MembershipSnapshot) -> Result<(), RpcError> {
        let channel = self.pool.channel(worker).await?;
        let mut client = WorkerMembershipClient::new(channel);
        client.sync_membership(membership_to_proto(snapshot)).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl WorkerTransport for GrpcWorkerTransport {
    async fn forward(&self, worker: &WorkerEndpoint, request: KvRequest) -> Result<KvOutput, KvError> {
        match self.try_forward(worker, request).await {
            Ok(worker_result) => worker_result,
            Err(e) => {
                slog::warn!(self.logger, "Forward to worker {} failed: {}", worker, e);
                self.pool.evict_on_failure(worker, &e);
                Err(KvError::WorkerUnavailable {
                    worker: worker.clone(),
                    reason: e.to_string(),
                })
            }
        }
    }

    async fn sync_membership(&self, worker: &WorkerEndpoint, snapshot: &MembershipSnapshot) -> Result<(), RpcError> {
        let result = self.try_sync_membership(worker, snapshot).await;
        if let Err(e) = &result {
            self.pool.evict_on_failure(worker, e);
        }
        result
    }
}
