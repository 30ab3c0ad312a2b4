use crate::shared::WorkerEndpoint;

/// A client operation as it travels client -> master -> worker.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum KvRequest {
    Get { key: String },
    Put { key: String, value: String },
    Del { key: String },
}

impl KvRequest {
    pub fn key(&self) -> &str {
        match self {
            KvRequest::Get { key } => key,
            KvRequest::Put { key, .. } => key,
            KvRequest::Del { key } => key,
        }
    }
}

/// Successful reply to Get/Put/Del.
///
/// `found` is false when a Get or Del targeted an absent key. That is a normal reply, not an
/// error. For Del, `value` is the value that was removed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct KvOutput {
    pub key: String,
    pub value: String,
    pub found: bool,
}

impl KvOutput {
    pub fn found(key: String, value: String) -> Self {
        KvOutput { key, value, found: true }
    }

    pub fn not_found(key: String) -> Self {
        KvOutput {
            key,
            value: String::new(),
            found: false,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum KvError {
    // Another Put/Del on the same key is in flight. Retry without backoff.
    #[error("key `{0}` is busy with another mutation, retry later")]
    KeyBusy(String),

    #[error("no workers available")]
    NoWorkers,

    // The master could not complete the forwarded call (worker down, network error, timeout).
    #[error("worker {worker} unavailable: {reason}")]
    WorkerUnavailable { worker: WorkerEndpoint, reason: String },

    #[error("storage failure: {0}")]
    Storage(String),

    // Round 1 of propagation failed on these peers. The mutation was rolled back everywhere.
    #[error("replication failed on {} peer(s), mutation rolled back", .failed_peers.len())]
    ReplicationFailed { failed_peers: Vec<WorkerEndpoint> },

    #[error("malformed reply: {0}")]
    MalformedReply(String),
}

impl KvError {
    /// Whether re-issuing the identical request may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            KvError::KeyBusy(_) => true,
            KvError::NoWorkers => true,
            KvError::WorkerUnavailable { .. } => true,
            KvError::ReplicationFailed { .. } => true,
            KvError::Storage(_) => false,
            KvError::MalformedReply(_) => false,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum Method {
    Put,
    Del,
}

/// ReplicationIntent is one mutation as sent from the coordinating worker to a peer.
///
/// `prior_value` is the coordinator's value for `key` before the mutation (`None` if absent).
/// A deleted value cannot be recovered after the fact, so it travels with every intent and is
/// what a rollback restores.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct ReplicationIntent {
    pub(crate) rollback: bool,
    pub(crate) method: Method,
    pub(crate) key: String,
    pub(crate) value: String,
    pub(crate) prior_value: Option<String>,
}

impl ReplicationIntent {
    pub(crate) fn put(key: String, value: String, prior_value: Option<String>) -> Self {
        ReplicationIntent {
            rollback: false,
            method: Method::Put,
            key,
            value,
            prior_value,
        }
    }

    pub(crate) fn del(key: String, prior_value: Option<String>) -> Self {
        ReplicationIntent {
            rollback: false,
            method: Method::Del,
            key,
            value: String::new(),
            prior_value,
        }
    }

    /// The compensating intent for this one.
    pub(crate) fn to_rollback(&self) -> Self {
        ReplicationIntent {
            rollback: true,
            ..self.clone()
        }
    }
}
