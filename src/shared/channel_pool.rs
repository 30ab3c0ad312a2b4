use crate::shared::WorkerEndpoint;
use parking_lot::Mutex;
use std::collections::HashMap;
use tokio::time::Duration;
use tonic::codegen::http::uri;
use tonic::transport::{Channel, Endpoint};
use tonic::Code;

/// RpcError is a failure to complete a call to another node. From the caller's point of view
/// it is always a transport failure: the remote side either never saw the request or could not
/// tell us the outcome.
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    #[error("invalid uri: {0}")]
    InvalidUri(#[from] uri::InvalidUri),
    #[error("failed to connect: {0}")]
    Connect(#[from] tonic::transport::Error),
    #[error("timed out connecting after {0:?}")]
    ConnectTimeout(Duration),
    #[error("rpc failed: {0}")]
    Status(#[from] tonic::Status),
    #[error("remote reported a fault: {0}")]
    RemoteFault(String),
    #[error("malformed reply: {0}")]
    MalformedReply(String),
}

/// Opens a channel to `uri`. Every call made on the channel is bounded by `rpc_timeout`.
pub(crate) async fn connect(uri: String, connect_timeout: Duration, rpc_timeout: Duration) -> Result<Channel, RpcError> {
    let endpoint = Endpoint::from_shared(uri)?.timeout(rpc_timeout);

    match tokio::time::timeout(connect_timeout, endpoint.connect()).await {
        Ok(connect_result) => Ok(connect_result?),
        Err(_) => Err(RpcError::ConnectTimeout(connect_timeout)),
    }
}

/// ChannelPool keeps one channel per worker endpoint so forwarded requests and propagation
/// calls don't reconnect on every call.
pub(crate) struct ChannelPool {
    channels: Mutex<HashMap<WorkerEndpoint, Channel>>,
    connect_timeout: Duration,
    rpc_timeout: Duration,
}

impl ChannelPool {
    pub(crate) fn new(connect_timeout: Duration, rpc_timeout: Duration) -> Self {
        ChannelPool {
            channels: Mutex::new(HashMap::new()),
            connect_timeout,
            rpc_timeout,
        }
    }

    pub(crate) async fn channel(&self, endpoint: &WorkerEndpoint) -> Result<Channel, RpcError> {
        let cached = self.channels.lock().get(endpoint).cloned();
        if let Some(channel) = cached {
            return Ok(channel);
        }

        let channel = connect(endpoint.uri(), self.connect_timeout, self.rpc_timeout).await?;

        // Two callers may have raced to connect. Keep whichever landed first.
        let mut channels = self.channels.lock();
        let pooled = channels.entry(endpoint.clone()).or_insert(channel);
        Ok(pooled.clone())
    }

    /// Drops the pooled channel if `error` says the endpoint is unreachable, so the next call
    /// starts from a fresh connection.
    pub(crate) fn evict_on_failure(&self, endpoint: &WorkerEndpoint, error: &RpcError) {
        let unreachable = match error {
            RpcError::Status(status) => matches!(status.code(), Code::Unavailable | Code::Unknown),
            RpcError::Connect(_) | RpcError::ConnectTimeout(_) => true,
            _ => false,
        };

        if unreachable {
            self.channels.lock().remove(endpoint);
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.channels.lock().len()
    }
}
