use crate::master::membership::Membership;
use crate::master::worker_client::WorkerTransport;
use crate::shared::{MembershipSnapshot, WorkerEndpoint};
use futures::future;
use std::sync::Arc;

/// WorkerRegistry applies Register/Deregister to the master's membership and pushes the new
/// member list out to every worker, so each worker knows which peers to replicate to.
pub(crate) struct WorkerRegistry {
    logger: slog::Logger,
    membership: Arc<Membership>,
    transport: Arc<dyn WorkerTransport>,
}

impl WorkerRegistry {
    pub(crate) fn new(logger: slog::Logger, membership: Arc<Membership>, transport: Arc<dyn WorkerTransport>) -> Self {
        WorkerRegistry {
            logger,
            membership,
            transport,
        }
    }

    /// The returned snapshot includes `endpoint` itself. The registering worker gets it in the
    /// reply, so it is skipped by the broadcast.
    pub(crate) async fn register(&self, endpoint: WorkerEndpoint) -> MembershipSnapshot {
        let snapshot = self.membership.register(endpoint.clone());
        slog::info!(
            self.logger,
            "Registered worker {} (membership v{}, {} members)",
            endpoint,
            snapshot.version,
            snapshot.members.len()
        );

        self.broadcast(&snapshot, Some(endpoint.port())).await;
        snapshot
    }

    pub(crate) async fn deregister(&self, port: u16) -> MembershipSnapshot {
        let (removed, snapshot) = self.membership.deregister(port);
        if !removed {
            slog::info!(self.logger, "Deregister for unknown worker port {}", port);
            return snapshot;
        }

        slog::info!(
            self.logger,
            "Deregistered worker port {} (membership v{}, {} members)",
            port,
            snapshot.version,
            snapshot.members.len()
        );
        self.broadcast(&snapshot, None).await;
        snapshot
    }

    pub(crate) fn snapshot(&self) -> MembershipSnapshot {
        self.membership.snapshot()
    }

    // Best effort. A worker that misses a snapshot catches up on the next membership change.
    async fn broadcast(&self, snapshot: &MembershipSnapshot, skip_port: Option<u16>) {
        let targets = snapshot.members.iter().filter(|m| Some(m.port()) != skip_port);
        let syncs = targets.map(|member| async move {
            let result = self.transport.sync_membership(member, snapshot).await;
            (member, result)
        });

        for (member, result) in future::join_all(syncs).await {
            if let Err(e) = result {
                slog::warn!(self.logger, "Failed to sync membership v{} to {}: {}", snapshot.version, member, e);
            }
        }
    }
}
