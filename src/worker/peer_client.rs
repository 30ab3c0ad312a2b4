use crate::grpc::worker_spreader_client::WorkerSpreaderClient;
use crate::grpc::{proto_spread_result, ProtoSpreadResult};
use crate::shared::{intent_to_proto, ChannelPool, ReplicationIntent, RpcError, WorkerEndpoint};
use crate::worker::propagator::PeerTransport;
use tokio::time::Duration;

/// GrpcPeerTransport calls `WorkerSpreader.Spread` on peers over pooled channels.
pub(crate) struct GrpcPeerTransport {
    logger: slog::Logger,
    pool: ChannelPool,
}

impl GrpcPeerTransport {
    pub(crate) fn new(logger: slog::Logger, connect_timeout: Duration, rpc_timeout: Duration) -> Self {
        GrpcPeerTransport {
            logger,
            pool: ChannelPool::new(connect_timeout, rpc_timeout),
        }
    }

    async fn try_spread(&self, peer: &WorkerEndpoint, intent: &ReplicationIntent) -> Result<(), RpcError> {
        let channel = self.pool.channel(peer).await?;
        let mut client = WorkerSpreaderClient::new(channel);

        let rpc_request = intent_to_proto(intent);
        slog::debug!(self.logger, "ClientWire - {} {:?}", peer, rpc_request);
        let rpc_reply = client.spread(rpc_request).await?.into_inner();
        slog::debug!(self.logger, "ClientWire - {} {:?}", peer, rpc_reply);

        Self::convert_spread_result(rpc_reply)
    }

    fn convert_spread_result(rpc_reply: ProtoSpreadResult) -> Result<(), RpcError> {
        match rpc_reply.result {
            Some(proto_spread_result::Result::Ok(_)) => Ok(()),
            Some(proto_spread_result::Result::Err(fault)) => Err(RpcError::RemoteFault(fault.message)),
            None => Err(RpcError::MalformedReply("Spread reply has no result".to_string())),
        }
    }
}

#[async_trait::async_trait]
impl PeerTransport for GrpcPeerTransport {
    async fn spread(&self, peer: &WorkerEndpoint, intent: &ReplicationIntent) -> Result<(), RpcError> {
        let result = self.try_spread(peer, intent).await;
        if let Err(e) = &result {
            self.pool.evict_on_failure(peer, e);
        }
        result
    }
}
