use std::fmt;

/// WorkerEndpoint identifies one worker process. Within a single master, a worker is keyed by
/// its port: two endpoints with the same port refer to the same worker.
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct WorkerEndpoint {
    address: String,
    port: u16,
}

impl WorkerEndpoint {
    pub fn new(address: impl Into<String>, port: u16) -> Self {
        WorkerEndpoint {
            address: address.into(),
            port,
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub(crate) fn uri(&self) -> String {
        format!("http://{}:{}", self.address, self.port)
    }
}

impl fmt::Display for WorkerEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.address, self.port)
    }
}

/// MembershipSnapshot is a point-in-time copy of the master's member list.
///
/// `version` increases with every membership change on the master, so a worker can discard a
/// snapshot older than the one it already holds.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MembershipSnapshot {
    pub version: u64,
    pub members: Vec<WorkerEndpoint>,
}

impl MembershipSnapshot {
    pub fn contains_port(&self, port: u16) -> bool {
        self.members.iter().any(|m| m.port() == port)
    }
}
