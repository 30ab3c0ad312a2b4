use crate::master::key_lock::KeyLockTable;
use crate::master::membership::Membership;
use crate::master::worker_client::WorkerTransport;
use crate::shared::{KvError, KvOutput, KvRequest};
use std::sync::Arc;

/// RequestRouter sends each client request to one worker, chosen round robin, and makes sure
/// at most one Put/Del per key is in flight.
pub(crate) struct RequestRouter {
    logger: slog::Logger,
    membership: Arc<Membership>,
    key_locks: KeyLockTable,
    transport: Arc<dyn WorkerTransport>,
}

impl RequestRouter {
    pub(crate) fn new(logger: slog::Logger, membership: Arc<Membership>, transport: Arc<dyn WorkerTransport>) -> Self {
        RequestRouter {
            logger,
            membership,
            key_locks: KeyLockTable::new(),
            transport,
        }
    }

    // Reads take no lock. A Get racing a Put on the same key may see either value.
    pub(crate) async fn get(&self, key: String) -> Result<KvOutput, KvError> {
        let worker = self.membership.pick_worker().ok_or(KvError::NoWorkers)?;
        slog::debug!(self.logger, "Routing Get '{}' to {}", key, worker);

        self.transport.forward(&worker, KvRequest::Get { key }).await
    }

    pub(crate) async fn put(&self, key: String, value: String) -> Result<KvOutput, KvError> {
        self.mutate(KvRequest::Put { key, value }).await
    }

    pub(crate) async fn del(&self, key: String) -> Result<KvOutput, KvError> {
        self.mutate(KvRequest::Del { key }).await
    }

    async fn mutate(&self, request: KvRequest) -> Result<KvOutput, KvError> {
        let _key_lock = match self.key_locks.try_acquire(request.key()) {
            Some(guard) => guard,
            None => {
                slog::info!(self.logger, "Rejecting mutation on busy key '{}'", request.key());
                return Err(KvError::KeyBusy(request.key().to_string()));
            }
        };

        let worker = self.membership.pick_worker().ok_or(KvError::NoWorkers)?;
        slog::debug!(self.logger, "Routing {:?} to {}", request, worker);

        // `_key_lock` drops on every path out of here, including cancellation of this future.
        self.transport.forward(&worker, request).await
    }

    #[cfg(test)]
    pub(crate) fn is_key_locked(&self, key: &str) -> bool {
        self.key_locks.is_locked(key)
    }
}
