use crate::shared::{MembershipSnapshot, WorkerEndpoint};
use parking_lot::Mutex;

/// Membership is the master's ordered list of registered workers together with the
/// round-robin cursor used to route requests. List, cursor and version share one lock, so a
/// pick never observes a half-applied membership change.
pub(crate) struct Membership {
    state: Mutex<MembershipState>,
}

struct MembershipState {
    members: Vec<WorkerEndpoint>,
    version: u64,
    next: u64,
}

impl MembershipState {
    fn snapshot(&self) -> MembershipSnapshot {
        MembershipSnapshot {
            version: self.version,
            members: self.members.clone(),
        }
    }
}

impl Membership {
    pub(crate) fn new() -> Self {
        Membership {
            state: Mutex::new(MembershipState {
                members: Vec::new(),
                version: 0,
                next: 0,
            }),
        }
    }

    /// Adds `endpoint`, or overwrites the member with the same port in place. Returns the
    /// membership after the change.
    pub(crate) fn register(&self, endpoint: WorkerEndpoint) -> MembershipSnapshot {
        let mut state = self.state.lock();

        match state.members.iter_mut().find(|m| m.port() == endpoint.port()) {
            Some(existing) => *existing = endpoint,
            None => state.members.push(endpoint),
        }
        state.version += 1;

        state.snapshot()
    }

    /// Removes the member with `port`. Returns whether it was present, and the membership after.
    pub(crate) fn deregister(&self, port: u16) -> (bool, MembershipSnapshot) {
        let mut state = self.state.lock();

        let before = state.members.len();
        state.members.retain(|m| m.port() != port);
        let removed = state.members.len() != before;
        if removed {
            state.version += 1;
        }

        (removed, state.snapshot())
    }

    pub(crate) fn snapshot(&self) -> MembershipSnapshot {
        self.state.lock().snapshot()
    }

    /// Round-robin pick. `None` when there are no members.
    pub(crate) fn pick_worker(&self) -> Option<WorkerEndpoint> {
        let mut state = self.state.lock();

        if state.members.is_empty() {
            return None;
        }

        let index = (state.next % state.members.len() as u64) as usize;
        state.next = state.next.wrapping_add(1);

        Some(state.members[index].clone())
    }
}
