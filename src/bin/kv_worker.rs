use clap::Parser;
use rand::Rng;
use replicated_kv::{
    create_root_logger_for_file, create_root_logger_for_stdout, StorageConfig, WorkerConfig, WorkerOptions,
};
use std::error::Error;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

const RANDOM_PORT_RANGE: std::ops::Range<u16> = 51051..55051;

/// Runs a worker: registers with the master, stores a full replica, and propagates writes to
/// its peers.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to serve on. Picked at random when absent.
    #[arg(long)]
    port: Option<u16>,

    /// Master to register with.
    #[arg(long, default_value = "http://127.0.0.1:50051")]
    master: String,

    /// Address the master and peers use to reach this worker.
    #[arg(long, default_value = "127.0.0.1")]
    address: String,

    /// Interface to listen on.
    #[arg(long, default_value = "0.0.0.0")]
    bind: IpAddr,

    /// Database directory. Defaults to /tmp/testdb/<port>.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Keep data in memory only.
    #[arg(long, conflicts_with = "data_dir")]
    in_memory: bool,

    #[arg(long)]
    register_attempts: Option<u32>,

    /// Write logs to this directory instead of the terminal.
    #[arg(long)]
    log_dir: Option<PathBuf>,

    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let port = args
        .port
        .unwrap_or_else(|| rand::thread_rng().gen_range(RANDOM_PORT_RANGE));

    let name = format!("kv-worker-{}", port);
    let logger = match &args.log_dir {
        Some(dir) => create_root_logger_for_file(dir, &name, args.verbose)?,
        None => create_root_logger_for_stdout(&name, args.verbose),
    };

    let storage = if args.in_memory {
        StorageConfig::InMemory
    } else {
        let directory = args
            .data_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("/tmp/testdb/{}", port)));
        StorageConfig::Persistent { directory }
    };

    let worker = replicated_kv::try_create_worker(WorkerConfig {
        listen_addr: SocketAddr::new(args.bind, port),
        advertise_address: args.address.clone(),
        master_uri: args.master.clone(),
        storage,
        info_logger: logger.clone(),
        options: WorkerOptions {
            register_attempts: args.register_attempts,
            ..Default::default()
        },
    })
    .await?;
    slog::info!(
        logger,
        "Worker {} serving, {} member(s) known",
        worker.endpoint(),
        worker.known_members().members.len()
    );

    tokio::signal::ctrl_c().await?;
    slog::info!(logger, "Shutting down");
    worker.shutdown().await;

    Ok(())
}
