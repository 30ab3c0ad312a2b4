use crate::grpc::worker_registry_client::WorkerRegistryClient;
use crate::grpc::{ProtoDeregisterReq, ProtoMembershipReply, ProtoRegisterReq};
use crate::shared::{connect, membership_from_proto, MembershipSnapshot, RpcError, WorkerEndpoint};
use tokio::time::Duration;

const REGISTER_MESSAGE: &str = "Hello Master";

/// MasterClient is a worker's connection to the master's registry.
pub(crate) struct MasterClient {
    logger: slog::Logger,
    master_uri: String,
    connect_timeout: Duration,
    rpc_timeout: Duration,
}

impl MasterClient {
    pub(crate) fn new(logger: slog::Logger, master_uri: String, connect_timeout: Duration, rpc_timeout: Duration) -> Self {
        MasterClient {
            logger,
            master_uri,
            connect_timeout,
            rpc_timeout,
        }
    }

    async fn client(&self) -> Result<WorkerRegistryClient<tonic::transport::Channel>, RpcError> {
        let channel = connect(self.master_uri.clone(), self.connect_timeout, self.rpc_timeout).await?;
        Ok(WorkerRegistryClient::new(channel))
    }

    pub(crate) async fn register(&self, me: &WorkerEndpoint) -> Result<MembershipSnapshot, RpcError> {
        let mut client = self.client().await?;
        let rpc_reply = client
            .register(ProtoRegisterReq {
                message: REGISTER_MESSAGE.to_string(),
                address: me.address().to_string(),
                port: me.port() as u32,
            })
            .await?
            .into_inner();

        slog::info!(self.logger, "Master replied to Register: '{}'", rpc_reply.message);
        Self::convert_membership_reply(rpc_reply)
    }

    /// Calls Register up to `attempts` times, sleeping `backoff` between failures. The master
    /// may still be starting when a worker boots.
    pub(crate) async fn register_with_retries(
        &self,
        me: &WorkerEndpoint,
        attempts: u32,
        backoff: Duration,
    ) -> Result<MembershipSnapshot, RpcError> {
        let mut attempt = 1;
        loop {
            match self.register(me).await {
                Ok(snapshot) => return Ok(snapshot),
                Err(e) if attempt < attempts => {
                    slog::warn!(
                        self.logger,
                        "Register attempt {}/{} with {} failed: {}",
                        attempt,
                        attempts,
                        self.master_uri,
                        e
                    );
                    attempt += 1;
                    tokio::time::sleep(backoff).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    pub(crate) async fn deregister(&self, me: &WorkerEndpoint) -> Result<MembershipSnapshot, RpcError> {
        let mut client = self.client().await?;
        let rpc_reply = client
            .deregister(ProtoDeregisterReq { port: me.port() as u32 })
            .await?
            .into_inner();

        Self::convert_membership_reply(rpc_reply)
    }

    fn convert_membership_reply(rpc_reply: ProtoMembershipReply) -> Result<MembershipSnapshot, RpcError> {
        let membership = rpc_reply
            .membership
            .ok_or_else(|| RpcError::MalformedReply("Membership reply without membership".to_string()))?;

        membership_from_proto(membership).map_err(RpcError::MalformedReply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grpc::{ProtoMembership, ProtoWorkerEndpoint};
    use tokio::time::Instant;

    fn logger() -> slog::Logger {
        slog::Logger::root(slog::Discard, slog::o!())
    }

    #[test]
    fn reply_without_membership_is_malformed() {
        let rpc_reply = ProtoMembershipReply {
            message: "Register Successfully!".to_string(),
            membership: None,
        };

        assert!(matches!(
            MasterClient::convert_membership_reply(rpc_reply),
            Err(RpcError::MalformedReply(_))
        ));
    }

    #[test]
    fn reply_membership_is_decoded() {
        let rpc_reply = ProtoMembershipReply {
            message: "Register Successfully!".to_string(),
            membership: Some(ProtoMembership {
                version: 4,
                members: vec![ProtoWorkerEndpoint {
                    address: "127.0.0.1".to_string(),
                    port: 51051,
                }],
            }),
        };

        let snapshot = MasterClient::convert_membership_reply(rpc_reply).unwrap();

        assert_eq!(4, snapshot.version);
        assert_eq!(vec![WorkerEndpoint::new("127.0.0.1", 51051)], snapshot.members);
    }

    #[tokio::test]
    async fn gives_up_after_configured_attempts() {
        let client = MasterClient::new(
            logger(),
            "http://127.0.0.1:1".to_string(),
            Duration::from_millis(100),
            Duration::from_millis(100),
        );
        let me = WorkerEndpoint::new("127.0.0.1", 51051);

        let started = Instant::now();
        let result = client.register_with_retries(&me, 3, Duration::from_millis(50)).await;

        assert!(result.is_err());
        // Two sleeps between three attempts.
        assert!(started.elapsed() >= Duration::from_millis(100));
    }
}
