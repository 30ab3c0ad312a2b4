use replicated_kv::{
    InMemoryStore, KvClient, KvClientError, KvError, KvOutput, KvStore, MasterConfig, MasterHandle, MasterOptions,
    StorageConfig, StorageError, WorkerConfig, WorkerCreationError, WorkerHandle, WorkerOptions,
};
use std::error::Error;
use std::sync::Arc;
use tokio::time::Duration;

#[tokio::test]
async fn put_get_del_reach_every_replica() -> Result<(), Box<dyn Error>> {
    let master = start_master().await?;
    let mut workers = Vec::new();
    for _ in 0..3 {
        workers.push(start_worker(&master, Arc::new(InMemoryStore::new())).await?);
    }
    let client = KvClient::connect(&master.uri()).await?;

    // Every worker knows every other worker before any write.
    for worker in &workers {
        assert_eq!(3, worker.known_members().members.len());
    }

    let put = client.put("64", "8").await?;
    assert_eq!(KvOutput::found("64".into(), "8".into()), put);
    for worker in &workers {
        assert_eq!(Some("8".to_string()), worker.store().get("64").await?);
    }

    // Round robin sends consecutive reads to different workers; all agree.
    for _ in 0..3 {
        assert_eq!(KvOutput::found("64".into(), "8".into()), client.get("64").await?);
    }

    let del = client.del("64").await?;
    assert_eq!(KvOutput::found("64".into(), "8".into()), del);
    for worker in &workers {
        assert_eq!(None, worker.store().get("64").await?);
    }

    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_puts_on_one_key_admit_exactly_one() -> Result<(), Box<dyn Error>> {
    let master = start_master().await?;
    let slow_store = Arc::new(SlowStore::new(Duration::from_millis(500)));
    let worker = start_worker(&master, slow_store).await?;
    let client = KvClient::connect(&master.uri()).await?;

    let (first, second) = tokio::join!(client.put("5", "X"), client.put("5", "Y"));

    let (winner, loser) = match (first, second) {
        (Ok(winner), Err(loser)) => (winner, loser),
        (Err(loser), Ok(winner)) => (winner, loser),
        other => panic!("Expected exactly one put to succeed, got {:?}", other),
    };
    assert!(matches!(loser, KvClientError::Kv(KvError::KeyBusy(ref key)) if key == "5"));
    assert_eq!(Some(winner.value.clone()), worker.store().get("5").await?);

    // Lock is released once the winner completes.
    assert!(client.put("5", "Z").await.is_ok());

    Ok(())
}

#[tokio::test]
async fn empty_pool_fails_fast_with_no_workers() -> Result<(), Box<dyn Error>> {
    let master = start_master().await?;
    let client = KvClient::connect(&master.uri()).await?;

    assert!(matches!(client.get("1").await, Err(KvClientError::Kv(KvError::NoWorkers))));
    assert!(matches!(client.put("1", "2").await, Err(KvClientError::Kv(KvError::NoWorkers))));
    assert!(matches!(client.del("1").await, Err(KvClientError::Kv(KvError::NoWorkers))));

    Ok(())
}

#[tokio::test]
async fn absent_key_is_not_found_not_an_error() -> Result<(), Box<dyn Error>> {
    let master = start_master().await?;
    let _worker = start_worker(&master, Arc::new(InMemoryStore::new())).await?;
    let client = KvClient::connect(&master.uri()).await?;

    assert_eq!(KvOutput::not_found("missing".into()), client.get("missing").await?);
    assert_eq!(KvOutput::not_found("missing".into()), client.del("missing").await?);

    Ok(())
}

#[tokio::test]
async fn empty_key_is_rejected_by_master() -> Result<(), Box<dyn Error>> {
    let master = start_master().await?;
    let _worker = start_worker(&master, Arc::new(InMemoryStore::new())).await?;
    let client = KvClient::connect(&master.uri()).await?;

    match client.put("", "v").await {
        Err(KvClientError::Rpc(status)) => assert_eq!(tonic::Code::InvalidArgument, status.code()),
        other => panic!("Unexpected reply {:?}", other),
    }

    Ok(())
}

#[tokio::test]
async fn shutdown_deregisters_worker_everywhere() -> Result<(), Box<dyn Error>> {
    let master = start_master().await?;
    let staying = start_worker(&master, Arc::new(InMemoryStore::new())).await?;
    let leaving = start_worker(&master, Arc::new(InMemoryStore::new())).await?;
    let leaving_port = leaving.endpoint().port();
    assert!(master.members().contains_port(leaving_port));

    leaving.shutdown().await;

    assert!(!master.members().contains_port(leaving_port));
    assert!(!staying.known_members().contains_port(leaving_port));

    // The remaining worker serves writes without trying to reach the departed one.
    let client = KvClient::connect(&master.uri()).await?;
    client.put("k", "v").await?;
    assert_eq!(Some("v".to_string()), staying.store().get("k").await?);

    Ok(())
}

#[tokio::test]
async fn unreachable_peer_rolls_back_write() -> Result<(), Box<dyn Error>> {
    let master = start_master().await?;
    let first = start_worker(&master, Arc::new(InMemoryStore::new())).await?;
    let second = start_worker(&master, Arc::new(InMemoryStore::new())).await?;
    let client = KvClient::connect(&master.uri()).await?;
    client.put("k", "before").await?;

    // Stop serving without deregistering: the master and `first` still list it.
    drop(second);
    tokio::time::sleep(Duration::from_millis(200)).await;

    // Whichever worker gets the request, the write must not stick.
    for _ in 0..2 {
        let result = client.put("k", "after").await;
        assert!(result.is_err(), "Unexpected success {:?}", result);
    }
    assert_eq!(Some("before".to_string()), first.store().get("k").await?);

    Ok(())
}

#[tokio::test]
async fn persistent_worker_serves_from_disk() -> Result<(), Box<dyn Error>> {
    let master = start_master().await?;
    let data_dir = tempfile::tempdir()?;
    let worker = replicated_kv::try_create_worker(WorkerConfig {
        storage: StorageConfig::Persistent {
            directory: data_dir.path().join("db"),
        },
        ..worker_config(&master)
    })
    .await?;
    let client = KvClient::connect(&master.uri()).await?;

    client.put("64", "8").await?;

    assert_eq!(Some("8".to_string()), worker.store().get("64").await?);
    assert!(data_dir.path().join("db").exists());

    Ok(())
}

#[tokio::test]
async fn worker_gives_up_when_master_unreachable() {
    let config = WorkerConfig {
        master_uri: "http://127.0.0.1:1".to_string(),
        options: WorkerOptions {
            register_attempts: Some(2),
            register_backoff: Some(Duration::from_millis(10)),
            connect_timeout: Some(Duration::from_millis(200)),
            ..Default::default()
        },
        ..base_worker_config()
    };

    let result = replicated_kv::try_create_worker(config).await;

    assert!(matches!(result, Err(WorkerCreationError::Registration(_))));
}

// ------- Helpers --------

fn test_logger() -> slog::Logger {
    slog::Logger::root(slog::Discard, slog::o!())
}

async fn start_master() -> Result<MasterHandle, Box<dyn Error>> {
    let master = replicated_kv::try_create_master(MasterConfig {
        listen_addr: "127.0.0.1:0".parse()?,
        info_logger: test_logger(),
        options: MasterOptions {
            rpc_timeout: Some(Duration::from_secs(5)),
            connect_timeout: Some(Duration::from_millis(500)),
        },
    })
    .await?;

    Ok(master)
}

fn base_worker_config() -> WorkerConfig {
    WorkerConfig {
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        advertise_address: "127.0.0.1".to_string(),
        master_uri: String::new(),
        storage: StorageConfig::InMemory,
        info_logger: test_logger(),
        options: WorkerOptions {
            rpc_timeout: Some(Duration::from_secs(1)),
            connect_timeout: Some(Duration::from_millis(500)),
            ..Default::default()
        },
    }
}

fn worker_config(master: &MasterHandle) -> WorkerConfig {
    WorkerConfig {
        master_uri: master.uri(),
        ..base_worker_config()
    }
}

async fn start_worker(master: &MasterHandle, store: Arc<dyn KvStore>) -> Result<WorkerHandle, Box<dyn Error>> {
    let worker = replicated_kv::try_create_worker_with_store(worker_config(master), store).await?;
    Ok(worker)
}

/// Holds every write for `delay`, so a mutation stays in flight long enough to race.
struct SlowStore {
    inner: InMemoryStore,
    delay: Duration,
}

impl SlowStore {
    fn new(delay: Duration) -> Self {
        SlowStore {
            inner: InMemoryStore::new(),
            delay,
        }
    }
}

#[async_trait::async_trait]
impl KvStore for SlowStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key).await
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        tokio::time::sleep(self.delay).await;
        self.inner.put(key, value).await
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.inner.delete(key).await
    }
}
