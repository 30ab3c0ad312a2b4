use crate::shared::{MembershipSnapshot, WorkerEndpoint};
use parking_lot::RwLock;

/// LocalMembership is a worker's copy of the master's member list.
pub(crate) struct LocalMembership {
    me: WorkerEndpoint,
    snapshot: RwLock<MembershipSnapshot>,
}

impl LocalMembership {
    pub(crate) fn new(me: WorkerEndpoint) -> Self {
        LocalMembership {
            me,
            snapshot: RwLock::new(MembershipSnapshot::default()),
        }
    }

    /// Replaces the held copy if `snapshot` is newer. Returns whether it was applied.
    ///
    /// Broadcasts from the master can arrive out of order, and the reply to Register can race
    /// the broadcast for the next registration.
    ///
    /// A restarted master counts versions from 1 again, so a worker that outlives it ignores
    /// its broadcasts until the new count passes the one held here.
    pub(crate) fn apply(&self, snapshot: MembershipSnapshot) -> bool {
        let mut current = self.snapshot.write();
        if snapshot.version <= current.version {
            return false;
        }

        *current = snapshot;
        true
    }

    pub(crate) fn me(&self) -> &WorkerEndpoint {
        &self.me
    }

    /// Whether the held snapshot lists me. Until it does, `peers()` may be missing workers the
    /// master already routes to.
    pub(crate) fn is_registered(&self) -> bool {
        self.snapshot.read().contains_port(self.me.port())
    }

    pub(crate) fn snapshot(&self) -> MembershipSnapshot {
        self.snapshot.read().clone()
    }

    /// Everyone but me.
    pub(crate) fn peers(&self) -> Vec<WorkerEndpoint> {
        self.snapshot
            .read()
            .members
            .iter()
            .filter(|m| m.port() != self.me.port())
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn worker(port: u16) -> WorkerEndpoint {
        WorkerEndpoint::new("127.0.0.1", port)
    }

    fn snapshot(version: u64, ports: &[u16]) -> MembershipSnapshot {
        MembershipSnapshot {
            version,
            members: ports.iter().map(|p| worker(*p)).collect(),
        }
    }

    #[test]
    fn peers_exclude_self() {
        let local = LocalMembership::new(worker(1002));
        local.apply(snapshot(3, &[1001, 1002, 1003]));

        assert_eq!(vec![worker(1001), worker(1003)], local.peers());
    }

    #[test]
    fn stale_snapshot_is_ignored() {
        let local = LocalMembership::new(worker(1001));
        assert!(local.apply(snapshot(3, &[1001, 1002, 1003])));

        assert!(!local.apply(snapshot(2, &[1001, 1002])));
        assert!(!local.apply(snapshot(3, &[1001])));

        assert_eq!(snapshot(3, &[1001, 1002, 1003]), local.snapshot());
    }

    #[test]
    fn starts_with_no_peers() {
        let local = LocalMembership::new(worker(1001));

        assert!(local.peers().is_empty());
        assert!(!local.is_registered());
    }

    #[test]
    fn registered_once_a_snapshot_lists_me() {
        let local = LocalMembership::new(worker(1002));

        local.apply(snapshot(1, &[1001]));
        assert!(!local.is_registered());

        local.apply(snapshot(2, &[1001, 1002]));
        assert!(local.is_registered());
    }
}
