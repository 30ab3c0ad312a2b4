use crate::shared::{KvError, KvOutput, ReplicationIntent};
use crate::storage::{restore, KvStore, StorageError};
use crate::worker::propagator::{PropagationFailure, ReplicaPropagator};
use std::sync::Arc;

/// WorkerCoordinator serves the client requests the master forwards to this worker: it
/// applies the mutation locally, replicates it to every peer, and undoes the local write if
/// replication fails.
pub(crate) struct WorkerCoordinator {
    logger: slog::Logger,
    store: Arc<dyn KvStore>,
    propagator: ReplicaPropagator,
}

impl WorkerCoordinator {
    pub(crate) fn new(logger: slog::Logger, store: Arc<dyn KvStore>, propagator: ReplicaPropagator) -> Self {
        WorkerCoordinator {
            logger,
            store,
            propagator,
        }
    }

    pub(crate) fn store(&self) -> &Arc<dyn KvStore> {
        &self.store
    }

    pub(crate) async fn get(&self, key: String) -> Result<KvOutput, KvError> {
        match self.store.get(&key).await.map_err(storage_failure)? {
            Some(value) => Ok(KvOutput::found(key, value)),
            None => Ok(KvOutput::not_found(key)),
        }
    }

    pub(crate) async fn put(&self, key: String, value: String) -> Result<KvOutput, KvError> {
        self.check_registered(&key)?;
        let prior = self.store.get(&key).await.map_err(storage_failure)?;
        self.store.put(&key, &value).await.map_err(storage_failure)?;

        let intent = ReplicationIntent::put(key, value, prior);
        self.replicate_or_revert(&intent).await?;

        Ok(KvOutput::found(intent.key, intent.value))
    }

    pub(crate) async fn del(&self, key: String) -> Result<KvOutput, KvError> {
        self.check_registered(&key)?;
        let prior = match self.store.get(&key).await.map_err(storage_failure)? {
            Some(prior) => prior,
            None => return Ok(KvOutput::not_found(key)),
        };
        self.store.delete(&key).await.map_err(storage_failure)?;

        let intent = ReplicationIntent::del(key, Some(prior.clone()));
        self.replicate_or_revert(&intent).await?;

        Ok(KvOutput::found(intent.key, prior))
    }

    // The master routes to a worker as soon as it is listed, which can be before this worker has
    // applied a snapshot naming it. Until then the peer list may be incomplete.
    fn check_registered(&self, key: &str) -> Result<(), KvError> {
        let membership = self.propagator.membership();
        if membership.is_registered() {
            return Ok(());
        }

        slog::info!(self.logger, "Rejecting mutation of '{}' until registration is applied", key);
        Err(KvError::WorkerUnavailable {
            worker: membership.me().clone(),
            reason: "not registered with the master yet".to_string(),
        })
    }

    async fn replicate_or_revert(&self, intent: &ReplicationIntent) -> Result<(), KvError> {
        let failure = match self.propagator.propagate(intent).await {
            Ok(()) => return Ok(()),
            Err(PropagationFailure { failed_peers }) => failed_peers,
        };

        if let Err(e) = restore(self.store.as_ref(), &intent.key, intent.prior_value.as_deref()).await {
            slog::error!(self.logger, "Failed to revert local write of '{}': {}", intent.key, e);
        }

        Err(KvError::ReplicationFailed { failed_peers: failure })
    }
}

fn storage_failure(e: StorageError) -> KvError {
    KvError::Storage(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::{MembershipSnapshot, WorkerEndpoint};
    use crate::storage::InMemoryStore;
    use crate::worker::peers::LocalMembership;
    use crate::worker::propagator::test_utils::FakePeerTransport;

    const ME: u16 = 1001;

    fn worker(port: u16) -> WorkerEndpoint {
        WorkerEndpoint::new("127.0.0.1", port)
    }

    struct Fixture {
        local: Arc<InMemoryStore>,
        transport: Arc<FakePeerTransport>,
        coordinator: WorkerCoordinator,
    }

    fn fixture(peer_ports: &[u16]) -> Fixture {
        let logger = slog::Logger::root(slog::Discard, slog::o!());
        let membership = Arc::new(LocalMembership::new(worker(ME)));
        let mut members = vec![worker(ME)];
        members.extend(peer_ports.iter().map(|p| worker(*p)));
        membership.apply(MembershipSnapshot { version: 1, members });

        let transport = Arc::new(FakePeerTransport::new(peer_ports));
        let local = Arc::new(InMemoryStore::new());
        let propagator = ReplicaPropagator::new(logger.clone(), membership, transport.clone());
        let coordinator = WorkerCoordinator::new(logger, local.clone(), propagator);

        Fixture {
            local,
            transport,
            coordinator,
        }
    }

    /// Fails every call, to check storage errors never reach peers.
    struct BrokenStore;

    #[async_trait::async_trait]
    impl KvStore for BrokenStore {
        async fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Engine("disk on fire".to_string()))
        }

        async fn put(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Engine("disk on fire".to_string()))
        }

        async fn delete(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Engine("disk on fire".to_string()))
        }
    }

    /// Reads succeed with a fixed value but every write fails.
    struct ReadOnlyStore;

    #[async_trait::async_trait]
    impl KvStore for ReadOnlyStore {
        async fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(Some("old".to_string()))
        }

        async fn put(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Engine("read-only".to_string()))
        }

        async fn delete(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Engine("read-only".to_string()))
        }
    }

    fn coordinator_over(store: Arc<dyn KvStore>, transport: Arc<FakePeerTransport>) -> WorkerCoordinator {
        let logger = slog::Logger::root(slog::Discard, slog::o!());
        let membership = Arc::new(LocalMembership::new(worker(ME)));
        membership.apply(MembershipSnapshot {
            version: 1,
            members: vec![worker(ME), worker(1002)],
        });
        let propagator = ReplicaPropagator::new(logger.clone(), membership, transport);
        WorkerCoordinator::new(logger, store, propagator)
    }

    #[tokio::test]
    async fn get_absent_key_is_not_found() {
        let f = fixture(&[]);

        assert_eq!(Ok(KvOutput::not_found("64".into())), f.coordinator.get("64".into()).await);
    }

    #[tokio::test]
    async fn put_replicates_to_all_peers() {
        let f = fixture(&[1002, 1003]);

        let output = f.coordinator.put("64".into(), "8".into()).await;

        assert_eq!(Ok(KvOutput::found("64".into(), "8".into())), output);
        assert_eq!(Some("8".to_string()), f.local.get("64").await.unwrap());
        assert_eq!(Some("8".to_string()), f.transport.store(1002).get("64").await.unwrap());
        assert_eq!(Some("8".to_string()), f.transport.store(1003).get("64").await.unwrap());
    }

    #[tokio::test]
    async fn failed_put_leaves_every_store_as_before() {
        let f = fixture(&[1002, 1003]);
        f.coordinator.put("64".into(), "8".into()).await.unwrap();
        f.transport.fail_peer(1003);

        let result = f.coordinator.put("64".into(), "9".into()).await;

        assert_eq!(
            Err(KvError::ReplicationFailed {
                failed_peers: vec![worker(1003)]
            }),
            result
        );
        assert_eq!(Some("8".to_string()), f.local.get("64").await.unwrap());
        assert_eq!(Some("8".to_string()), f.transport.store(1002).get("64").await.unwrap());
        assert_eq!(Some("8".to_string()), f.transport.store(1003).get("64").await.unwrap());
    }

    #[tokio::test]
    async fn failed_put_of_new_key_removes_it_locally() {
        let f = fixture(&[1002]);
        f.transport.fail_peer(1002);

        assert!(f.coordinator.put("k".into(), "v".into()).await.is_err());

        assert_eq!(None, f.local.get("k").await.unwrap());
    }

    #[tokio::test]
    async fn del_returns_removed_value_and_replicates() {
        let f = fixture(&[1002]);
        f.coordinator.put("64".into(), "8".into()).await.unwrap();

        let output = f.coordinator.del("64".into()).await;

        assert_eq!(Ok(KvOutput::found("64".into(), "8".into())), output);
        assert_eq!(None, f.local.get("64").await.unwrap());
        assert_eq!(None, f.transport.store(1002).get("64").await.unwrap());
    }

    #[tokio::test]
    async fn del_of_absent_key_does_not_propagate() {
        let f = fixture(&[1002]);

        let output = f.coordinator.del("nope".into()).await;

        assert_eq!(Ok(KvOutput::not_found("nope".into())), output);
        assert!(f.transport.received.lock().is_empty());
    }

    #[tokio::test]
    async fn failed_del_restores_value_everywhere() {
        let f = fixture(&[1002, 1003]);
        f.coordinator.put("64".into(), "8".into()).await.unwrap();
        f.transport.fail_peer(1002);

        assert!(f.coordinator.del("64".into()).await.is_err());

        assert_eq!(Some("8".to_string()), f.local.get("64").await.unwrap());
        assert_eq!(Some("8".to_string()), f.transport.store(1002).get("64").await.unwrap());
        assert_eq!(Some("8".to_string()), f.transport.store(1003).get("64").await.unwrap());
    }

    #[tokio::test]
    async fn failed_read_never_replicates() {
        let transport = Arc::new(FakePeerTransport::new(&[1002]));
        let coordinator = coordinator_over(Arc::new(BrokenStore), transport.clone());

        assert!(matches!(coordinator.put("k".into(), "v".into()).await, Err(KvError::Storage(_))));
        assert!(matches!(coordinator.del("k".into()).await, Err(KvError::Storage(_))));
        assert!(matches!(coordinator.get("k".into()).await, Err(KvError::Storage(_))));
        assert!(transport.received.lock().is_empty());
    }

    #[tokio::test]
    async fn failed_write_after_read_never_replicates() {
        let transport = Arc::new(FakePeerTransport::new(&[1002]));
        let coordinator = coordinator_over(Arc::new(ReadOnlyStore), transport.clone());

        assert!(matches!(coordinator.put("k".into(), "v".into()).await, Err(KvError::Storage(_))));
        // The key reads as present, so Del gets as far as the local delete.
        assert!(matches!(coordinator.del("k".into()).await, Err(KvError::Storage(_))));
        assert!(transport.received.lock().is_empty());
        assert_eq!(None, transport.store(1002).get("k").await.unwrap());
    }

    #[tokio::test]
    async fn mutations_wait_for_registration() {
        let logger = slog::Logger::root(slog::Discard, slog::o!());
        let membership = Arc::new(LocalMembership::new(worker(ME)));
        let transport = Arc::new(FakePeerTransport::new(&[1002]));
        let local = Arc::new(InMemoryStore::new());
        local.put("k", "old").await.unwrap();
        let propagator = ReplicaPropagator::new(logger.clone(), membership.clone(), transport.clone());
        let coordinator = WorkerCoordinator::new(logger, local.clone(), propagator);

        // Master already lists 1002 and may route here, but no snapshot has reached me yet.
        let unavailable = KvError::WorkerUnavailable {
            worker: worker(ME),
            reason: "not registered with the master yet".to_string(),
        };
        let put = coordinator.put("k".into(), "new".into()).await;
        assert_eq!(Err(unavailable.clone()), put);
        assert!(unavailable.is_retryable());
        assert_eq!(Err(unavailable.clone()), coordinator.del("k".into()).await);

        // A snapshot that leaves me out is not enough either.
        membership.apply(MembershipSnapshot {
            version: 1,
            members: vec![worker(1002)],
        });
        assert_eq!(Err(unavailable), coordinator.put("k".into(), "new".into()).await);

        // Reads are served locally regardless.
        assert_eq!(Ok(KvOutput::found("k".into(), "old".into())), coordinator.get("k".into()).await);
        assert_eq!(Some("old".to_string()), local.get("k").await.unwrap());
        assert!(transport.received.lock().is_empty());

        membership.apply(MembershipSnapshot {
            version: 2,
            members: vec![worker(1002), worker(ME)],
        });
        assert_eq!(
            Ok(KvOutput::found("k".into(), "new".into())),
            coordinator.put("k".into(), "new".into()).await
        );
        assert_eq!(Some("new".to_string()), transport.store(1002).get("k").await.unwrap());
    }
}
