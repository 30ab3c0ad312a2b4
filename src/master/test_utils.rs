use crate::master::worker_client::WorkerTransport;
use crate::shared::{KvError, KvOutput, KvRequest, MembershipSnapshot, RpcError, WorkerEndpoint};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use tokio::sync::{oneshot, Notify};

pub(super) fn test_logger() -> slog::Logger {
    slog::Logger::root(slog::Discard, slog::o!())
}

/// In-process stand-in for the worker pool. All workers share one map, which is what a fully
/// replicated pool looks like from the master.
pub(super) struct FakeWorkerTransport {
    records: Mutex<HashMap<String, String>>,
    forwarded: Mutex<Vec<(WorkerEndpoint, KvRequest)>>,
    synced: Mutex<Vec<(WorkerEndpoint, MembershipSnapshot)>>,
    failing_ports: Mutex<HashSet<u16>>,
    hold: Mutex<Option<oneshot::Receiver<()>>>,
    forward_started: Notify,
}

impl FakeWorkerTransport {
    pub(super) fn new() -> Self {
        FakeWorkerTransport {
            records: Mutex::new(HashMap::new()),
            forwarded: Mutex::new(Vec::new()),
            synced: Mutex::new(Vec::new()),
            failing_ports: Mutex::new(HashSet::new()),
            hold: Mutex::new(None),
            forward_started: Notify::new(),
        }
    }

    /// The next forwarded request parks until `release` fires (or its sender drops).
    pub(super) fn hold_next_forward(self, release: oneshot::Receiver<()>) -> Self {
        self.hold.lock().replace(release);
        self
    }

    pub(super) async fn wait_for_forward_started(&self) {
        tokio::time::timeout(std::time::Duration::from_secs(5), self.forward_started.notified())
            .await
            .expect("Unexpected timeout waiting for a forward");
    }

    pub(super) fn fail_worker(&self, port: u16) {
        self.failing_ports.lock().insert(port);
    }

    pub(super) fn heal_worker(&self, port: u16) {
        self.failing_ports.lock().remove(&port);
    }

    pub(super) fn forwarded(&self) -> Vec<(WorkerEndpoint, KvRequest)> {
        self.forwarded.lock().clone()
    }

    pub(super) fn synced(&self) -> Vec<(WorkerEndpoint, MembershipSnapshot)> {
        self.synced.lock().clone()
    }

    fn apply(&self, request: KvRequest) -> KvOutput {
        let mut records = self.records.lock();
        match request {
            KvRequest::Get { key } => match records.get(&key) {
                Some(value) => KvOutput::found(key.clone(), value.clone()),
                None => KvOutput::not_found(key),
            },
            KvRequest::Put { key, value } => {
                records.insert(key.clone(), value.clone());
                KvOutput::found(key, value)
            }
            KvRequest::Del { key } => match records.remove(&key) {
                Some(value) => KvOutput::found(key, value),
                None => KvOutput::not_found(key),
            },
        }
    }
}

#[async_trait::async_trait]
impl WorkerTransport for FakeWorkerTransport {
    async fn forward(&self, worker: &WorkerEndpoint, request: KvRequest) -> Result<KvOutput, KvError> {
        self.forwarded.lock().push((worker.clone(), request.clone()));
        self.forward_started.notify_one();

        let hold = self.hold.lock().take();
        if let Some(release) = hold {
            let _ = release.await;
        }

        if self.failing_ports.lock().contains(&worker.port()) {
            return Err(KvError::WorkerUnavailable {
                worker: worker.clone(),
                reason: "connection refused".to_string(),
            });
        }

        Ok(self.apply(request))
    }

    async fn sync_membership(&self, worker: &WorkerEndpoint, snapshot: &MembershipSnapshot) -> Result<(), RpcError> {
        if self.failing_ports.lock().contains(&worker.port()) {
            return Err(RpcError::RemoteFault("connection refused".to_string()));
        }

        self.synced.lock().push((worker.clone(), snapshot.clone()));
        Ok(())
    }
}
