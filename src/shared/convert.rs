use crate::grpc::{
    proto_kv_error, proto_kv_result, ProtoKeyBusy, ProtoKvError, ProtoKvResult, ProtoKvSuccess, ProtoMalformedReply,
    ProtoMembership, ProtoMethod, ProtoNoWorkers, ProtoReplicationFailed, ProtoSpreadReq, ProtoStorageFault,
    ProtoValue, ProtoWorkerEndpoint, ProtoWorkerUnavailable,
};
use crate::shared::{KvError, KvOutput, MembershipSnapshot, Method, ReplicationIntent, WorkerEndpoint};
use std::convert::TryFrom;

// ------- KV results --------

pub(crate) fn kv_result_to_proto(app_result: Result<KvOutput, KvError>) -> ProtoKvResult {
    let result = match app_result {
        Ok(output) => proto_kv_result::Result::Ok(ProtoKvSuccess {
            key: output.key,
            value: output.value,
            found: output.found,
        }),
        Err(e) => proto_kv_result::Result::Err(ProtoKvError {
            err: Some(kv_error_to_proto(e)),
        }),
    };

    ProtoKvResult { result: Some(result) }
}

fn kv_error_to_proto(error: KvError) -> proto_kv_error::Err {
    match error {
        KvError::KeyBusy(key) => proto_kv_error::Err::KeyBusy(ProtoKeyBusy { key }),
        KvError::NoWorkers => proto_kv_error::Err::NoWorkers(ProtoNoWorkers {
            // Empty
        }),
        KvError::WorkerUnavailable { worker, reason } => {
            proto_kv_error::Err::WorkerUnavailable(ProtoWorkerUnavailable {
                worker: Some(endpoint_to_proto(&worker)),
                reason,
            })
        }
        KvError::Storage(message) => proto_kv_error::Err::StorageFault(ProtoStorageFault { message }),
        KvError::ReplicationFailed { failed_peers } => {
            proto_kv_error::Err::ReplicationFailed(ProtoReplicationFailed {
                failed_peers: failed_peers.iter().map(endpoint_to_proto).collect(),
            })
        }
        KvError::MalformedReply(message) => proto_kv_error::Err::MalformedReply(ProtoMalformedReply { message }),
    }
}

pub(crate) fn kv_result_from_proto(rpc_reply: ProtoKvResult) -> Result<KvOutput, KvError> {
    match rpc_reply.result {
        Some(proto_kv_result::Result::Ok(ok)) => Ok(KvOutput {
            key: ok.key,
            value: ok.value,
            found: ok.found,
        }),
        Some(proto_kv_result::Result::Err(ProtoKvError { err: Some(err) })) => Err(kv_error_from_proto(err)),
        Some(proto_kv_result::Result::Err(ProtoKvError { err: None })) => {
            Err(KvError::MalformedReply("KV error reply without a variant".to_string()))
        }
        None => Err(KvError::MalformedReply("KV reply without a result".to_string())),
    }
}

fn kv_error_from_proto(err: proto_kv_error::Err) -> KvError {
    match err {
        proto_kv_error::Err::KeyBusy(busy) => KvError::KeyBusy(busy.key),
        proto_kv_error::Err::NoWorkers(_) => KvError::NoWorkers,
        proto_kv_error::Err::WorkerUnavailable(unavailable) => match unavailable.worker.map(endpoint_from_proto) {
            Some(Ok(worker)) => KvError::WorkerUnavailable {
                worker,
                reason: unavailable.reason,
            },
            _ => KvError::MalformedReply(format!(
                "WorkerUnavailable without a valid worker: {}",
                unavailable.reason
            )),
        },
        proto_kv_error::Err::StorageFault(fault) => KvError::Storage(fault.message),
        proto_kv_error::Err::ReplicationFailed(failed) => {
            // A peer that can't be decoded is still a failed peer; keep what we can.
            let failed_peers = failed
                .failed_peers
                .into_iter()
                .filter_map(|p| endpoint_from_proto(p).ok())
                .collect();
            KvError::ReplicationFailed { failed_peers }
        }
        proto_kv_error::Err::MalformedReply(malformed) => KvError::MalformedReply(malformed.message),
    }
}

// ------- Membership --------

pub(crate) fn endpoint_to_proto(endpoint: &WorkerEndpoint) -> ProtoWorkerEndpoint {
    ProtoWorkerEndpoint {
        address: endpoint.address().to_string(),
        port: u32::from(endpoint.port()),
    }
}

pub(crate) fn endpoint_from_proto(proto: ProtoWorkerEndpoint) -> Result<WorkerEndpoint, String> {
    let port = port_from_proto(proto.port)?;
    if proto.address.is_empty() {
        return Err(format!("Worker endpoint on port {} has no address", port));
    }

    Ok(WorkerEndpoint::new(proto.address, port))
}

pub(crate) fn port_from_proto(port: u32) -> Result<u16, String> {
    match u16::try_from(port) {
        Ok(0) => Err("Port 0 is not a valid worker port".to_string()),
        Ok(port) => Ok(port),
        Err(_) => Err(format!("Port {} is out of range", port)),
    }
}

pub(crate) fn membership_to_proto(snapshot: &MembershipSnapshot) -> ProtoMembership {
    ProtoMembership {
        version: snapshot.version,
        members: snapshot.members.iter().map(endpoint_to_proto).collect(),
    }
}

pub(crate) fn membership_from_proto(proto: ProtoMembership) -> Result<MembershipSnapshot, String> {
    let mut members = Vec::with_capacity(proto.members.len());
    for proto_member in proto.members {
        members.push(endpoint_from_proto(proto_member)?);
    }

    Ok(MembershipSnapshot {
        version: proto.version,
        members,
    })
}

// ------- Replication --------

pub(crate) fn intent_to_proto(intent: &ReplicationIntent) -> ProtoSpreadReq {
    let method = match intent.method {
        Method::Put => ProtoMethod::Put,
        Method::Del => ProtoMethod::Del,
    };

    ProtoSpreadReq {
        rollback: intent.rollback,
        method: method as i32,
        key: intent.key.clone(),
        value: intent.value.clone(),
        prior: intent.prior_value.clone().map(|value| ProtoValue { value }),
    }
}

pub(crate) fn intent_from_proto(rpc_request: ProtoSpreadReq) -> Result<ReplicationIntent, String> {
    let method = match ProtoMethod::from_i32(rpc_request.method) {
        Some(ProtoMethod::Put) => Method::Put,
        Some(ProtoMethod::Del) => Method::Del,
        Some(ProtoMethod::Unspecified) | None => {
            return Err(format!("Unknown replication method {}", rpc_request.method));
        }
    };
    if rpc_request.key.is_empty() {
        return Err("Replication intent has an empty key".to_string());
    }

    Ok(ReplicationIntent {
        rollback: rpc_request.rollback,
        method,
        key: rpc_request.key,
        value: rpc_request.value,
        prior_value: rpc_request.prior.map(|p| p.value),
    })
}
