use crate::grpc::kv_methods_client::KvMethodsClient;
use crate::grpc::ProtoKvReq;
use crate::shared::{connect, kv_result_from_proto, KvError, KvOutput, RpcError};
use tokio::time::Duration;
use tonic::transport::Channel;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(2);
// Covers the master's own forward deadline plus slack.
const RPC_TIMEOUT: Duration = Duration::from_secs(15);

/// KvClient talks to the master's KV methods.
#[derive(Clone)]
pub struct KvClient {
    client: KvMethodsClient<Channel>,
}

#[derive(Debug, thiserror::Error)]
pub enum KvClientError {
    #[error("Failed to connect to master: {0}")]
    Connect(#[source] RpcError),
    /// The call to the master itself failed. Retrying may succeed.
    #[error("RPC to master failed: {0}")]
    Rpc(#[from] tonic::Status),
    #[error(transparent)]
    Kv(#[from] KvError),
}

impl KvClientError {
    pub fn is_retryable(&self) -> bool {
        match self {
            KvClientError::Connect(_) => true,
            KvClientError::Rpc(status) => status.code() != tonic::Code::InvalidArgument,
            KvClientError::Kv(e) => e.is_retryable(),
        }
    }
}

impl KvClient {
    /// `target` is `host:port`, with or without an `http://` scheme.
    pub async fn connect(target: &str) -> Result<Self, KvClientError> {
        let channel = connect(normalize_target(target), CONNECT_TIMEOUT, RPC_TIMEOUT)
            .await
            .map_err(KvClientError::Connect)?;

        Ok(KvClient {
            client: KvMethodsClient::new(channel),
        })
    }

    pub async fn get(&self, key: &str) -> Result<KvOutput, KvClientError> {
        let rpc_request = ProtoKvReq {
            key: key.to_string(),
            value: String::new(),
        };
        let rpc_reply = self.client.clone().get(rpc_request).await?.into_inner();

        Ok(kv_result_from_proto(rpc_reply)?)
    }

    pub async fn put(&self, key: &str, value: &str) -> Result<KvOutput, KvClientError> {
        let rpc_request = ProtoKvReq {
            key: key.to_string(),
            value: value.to_string(),
        };
        let rpc_reply = self.client.clone().put(rpc_request).await?.into_inner();

        Ok(kv_result_from_proto(rpc_reply)?)
    }

    pub async fn del(&self, key: &str) -> Result<KvOutput, KvClientError> {
        let rpc_request = ProtoKvReq {
            key: key.to_string(),
            value: String::new(),
        };
        let rpc_reply = self.client.clone().del(rpc_request).await?.into_inner();

        Ok(kv_result_from_proto(rpc_reply)?)
    }
}

fn normalize_target(target: &str) -> String {
    if target.starts_with("http://") || target.starts_with("https://") {
        target.to_string()
    } else {
        format!("http://{}", target)
    }
}
