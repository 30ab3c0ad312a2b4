use crate::shared::{Method, ReplicationIntent, RpcError, WorkerEndpoint};
use crate::storage::{restore, KvStore, StorageError};
use crate::worker::peers::LocalMembership;
use futures::future;
use std::sync::Arc;

/// PeerTransport is how a worker reaches its peers' Spread endpoint.
#[async_trait::async_trait]
pub(crate) trait PeerTransport: Send + Sync {
    async fn spread(&self, peer: &WorkerEndpoint, intent: &ReplicationIntent) -> Result<(), RpcError>;
}

#[derive(Debug, Eq, PartialEq)]
pub(crate) struct PropagationFailure {
    pub(crate) failed_peers: Vec<WorkerEndpoint>,
}

/// ReplicaPropagator pushes a mutation this worker has already applied to every peer.
///
/// Round 1 sends the intent to all peers at once. If any peer fails, round 2 sends the
/// compensating intent to the peers that acknowledged round 1, and the caller reverts its own
/// write. There is no quorum: every peer must acknowledge.
pub(crate) struct ReplicaPropagator {
    logger: slog::Logger,
    membership: Arc<LocalMembership>,
    transport: Arc<dyn PeerTransport>,
}

impl ReplicaPropagator {
    pub(crate) fn new(logger: slog::Logger, membership: Arc<LocalMembership>, transport: Arc<dyn PeerTransport>) -> Self {
        ReplicaPropagator {
            logger,
            membership,
            transport,
        }
    }

    pub(crate) fn membership(&self) -> &LocalMembership {
        &self.membership
    }

    pub(crate) async fn propagate(&self, intent: &ReplicationIntent) -> Result<(), PropagationFailure> {
        let peers = self.membership.peers();
        if peers.is_empty() {
            return Ok(());
        }

        let (acked, failed) = self.send_to_all(peers, intent).await;
        if failed.is_empty() {
            return Ok(());
        }

        let failed_peers: Vec<WorkerEndpoint> = failed.into_iter().map(|(peer, _)| peer).collect();
        slog::warn!(
            self.logger,
            "Propagation of {:?} '{}' failed on {:?}, rolling back {} peer(s)",
            intent.method,
            intent.key,
            failed_peers,
            acked.len()
        );

        let (_, rollback_failed) = self.send_to_all(acked, &intent.to_rollback()).await;
        for (peer, e) in rollback_failed {
            // Nothing left to compensate with. The peer keeps the mutation until overwritten.
            slog::error!(self.logger, "Rollback of '{}' on {} failed: {}", intent.key, peer, e);
        }

        Err(PropagationFailure { failed_peers })
    }

    async fn send_to_all(
        &self,
        peers: Vec<WorkerEndpoint>,
        intent: &ReplicationIntent,
    ) -> (Vec<WorkerEndpoint>, Vec<(WorkerEndpoint, RpcError)>) {
        let sends = peers.into_iter().map(|peer| async move {
            let result = self.transport.spread(&peer, intent).await;
            (peer, result)
        });

        let mut acked = Vec::new();
        let mut failed = Vec::new();
        for (peer, result) in future::join_all(sends).await {
            match result {
                Ok(()) => acked.push(peer),
                Err(e) => failed.push((peer, e)),
            }
        }

        (acked, failed)
    }
}

/// Applies an intent received from a coordinating peer. Applying the same intent twice leaves
/// the store the same as applying it once.
pub(crate) async fn apply_replication_intent(
    store: &dyn KvStore,
    intent: &ReplicationIntent,
) -> Result<(), StorageError> {
    if intent.rollback {
        return restore(store, &intent.key, intent.prior_value.as_deref()).await;
    }

    match intent.method {
        Method::Put => store.put(&intent.key, &intent.value).await,
        Method::Del => store.delete(&intent.key).await,
    }
}


#[cfg(test)]
mod tests {
    use super::test_utils::FakePeerTransport;
    use super::*;
    use crate::shared::MembershipSnapshot;
    use crate::storage::InMemoryStore;

    const ME: u16 = 1001;

    fn worker(port: u16) -> WorkerEndpoint {
        WorkerEndpoint::new("127.0.0.1", port)
    }

    fn propagator_with(transport: Arc<FakePeerTransport>, ports: &[u16]) -> ReplicaPropagator {
        let membership = Arc::new(LocalMembership::new(worker(ME)));
        membership.apply(MembershipSnapshot {
            version: 1,
            members: ports.iter().map(|p| worker(*p)).collect(),
        });
        ReplicaPropagator::new(slog::Logger::root(slog::Discard, slog::o!()), membership, transport)
    }

    #[tokio::test]
    async fn no_peers_is_trivially_successful() {
        let transport = Arc::new(FakePeerTransport::new(&[]));
        let propagator = propagator_with(transport.clone(), &[ME]);

        let intent = ReplicationIntent::put("64".into(), "8".into(), None);

        assert_eq!(Ok(()), propagator.propagate(&intent).await);
        assert!(transport.received.lock().is_empty());
    }

    #[tokio::test]
    async fn put_reaches_every_peer_but_not_self() {
        let transport = Arc::new(FakePeerTransport::new(&[1002, 1003]));
        let propagator = propagator_with(transport.clone(), &[ME, 1002, 1003]);

        let intent = ReplicationIntent::put("64".into(), "8".into(), None);
        propagator.propagate(&intent).await.unwrap();

        for port in &[1002, 1003] {
            assert_eq!(Some("8".to_string()), transport.store(*port).get("64").await.unwrap());
        }
        assert!(transport.received.lock().iter().all(|(port, _)| *port != ME));
    }

    #[tokio::test]
    async fn failed_peer_rolls_back_acked_peers() {
        let transport = Arc::new(FakePeerTransport::new(&[1002, 1003, 1004]));
        transport.store(1002).put("64", "old").await.unwrap();
        transport.store(1004).put("64", "old").await.unwrap();
        transport.fail_peer(1003);
        let propagator = propagator_with(transport.clone(), &[ME, 1002, 1003, 1004]);

        let intent = ReplicationIntent::put("64".into(), "8".into(), Some("old".into()));
        let result = propagator.propagate(&intent).await;

        assert_eq!(
            Err(PropagationFailure {
                failed_peers: vec![worker(1003)]
            }),
            result
        );
        assert_eq!(Some("old".to_string()), transport.store(1002).get("64").await.unwrap());
        assert_eq!(Some("old".to_string()), transport.store(1004).get("64").await.unwrap());

        // Rollback went only to the peers that acknowledged.
        let rolled_back: Vec<u16> = transport
            .received
            .lock()
            .iter()
            .filter(|(_, i)| i.rollback)
            .map(|(port, _)| *port)
            .collect();
        assert!(!rolled_back.contains(&1003));
        assert_eq!(2, rolled_back.len());
    }

    #[tokio::test]
    async fn rollback_of_new_key_deletes_it() {
        let transport = Arc::new(FakePeerTransport::new(&[1002, 1003]));
        transport.fail_peer(1003);
        let propagator = propagator_with(transport.clone(), &[ME, 1002, 1003]);

        let intent = ReplicationIntent::put("k".into(), "v".into(), None);
        assert!(propagator.propagate(&intent).await.is_err());

        assert_eq!(None, transport.store(1002).get("k").await.unwrap());
    }

    #[tokio::test]
    async fn rollback_of_del_restores_value() {
        let transport = Arc::new(FakePeerTransport::new(&[1002, 1003]));
        transport.store(1002).put("k", "v").await.unwrap();
        transport.fail_peer(1003);
        let propagator = propagator_with(transport.clone(), &[ME, 1002, 1003]);

        let intent = ReplicationIntent::del("k".into(), Some("v".into()));
        assert!(propagator.propagate(&intent).await.is_err());

        assert_eq!(Some("v".to_string()), transport.store(1002).get("k").await.unwrap());
    }

    #[tokio::test]
    async fn rollback_failure_still_reports_round_one_failures_only() {
        let transport = Arc::new(FakePeerTransport::new(&[1002, 1003]));
        transport.fail_peer(1003);
        transport.fail_rollback_on(1002);
        let propagator = propagator_with(transport.clone(), &[ME, 1002, 1003]);

        let intent = ReplicationIntent::put("k".into(), "v".into(), None);
        let result = propagator.propagate(&intent).await;

        assert_eq!(
            Err(PropagationFailure {
                failed_peers: vec![worker(1003)]
            }),
            result
        );
        // 1002 could not be compensated.
        assert_eq!(Some("v".to_string()), transport.store(1002).get("k").await.unwrap());
    }

    #[tokio::test]
    async fn applying_an_intent_twice_is_idempotent() {
        let store = InMemoryStore::new();
        let put = ReplicationIntent::put("k".into(), "v".into(), None);
        let del = ReplicationIntent::del("k".into(), Some("v".into()));

        apply_replication_intent(&store, &put).await.unwrap();
        apply_replication_intent(&store, &put).await.unwrap();
        assert_eq!(vec![("k".to_string(), "v".to_string())], store.entries());

        apply_replication_intent(&store, &del).await.unwrap();
        apply_replication_intent(&store, &del).await.unwrap();
        assert!(store.entries().is_empty());

        apply_replication_intent(&store, &del.to_rollback()).await.unwrap();
        apply_replication_intent(&store, &del.to_rollback()).await.unwrap();
        assert_eq!(vec![("k".to_string(), "v".to_string())], store.entries());
    }
}
