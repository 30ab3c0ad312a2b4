use clap::Parser;
use replicated_kv::{create_root_logger_for_file, create_root_logger_for_stdout, MasterConfig, MasterOptions};
use std::error::Error;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use tokio::time::Duration;

/// Runs the master: accepts worker registrations and routes client requests to workers.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long, default_value_t = 50051)]
    port: u16,

    /// Interface to listen on.
    #[arg(long, default_value = "0.0.0.0")]
    bind: IpAddr,

    /// Deadline in milliseconds for a request forwarded to a worker.
    #[arg(long)]
    rpc_timeout_ms: Option<u64>,

    /// Write logs to this directory instead of the terminal.
    #[arg(long)]
    log_dir: Option<PathBuf>,

    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let logger = match &args.log_dir {
        Some(dir) => create_root_logger_for_file(dir, "kv-master", args.verbose)?,
        None => create_root_logger_for_stdout("kv-master", args.verbose),
    };

    let master = replicated_kv::try_create_master(MasterConfig {
        listen_addr: SocketAddr::new(args.bind, args.port),
        info_logger: logger.clone(),
        options: MasterOptions {
            rpc_timeout: args.rpc_timeout_ms.map(Duration::from_millis),
            ..Default::default()
        },
    })
    .await?;
    slog::info!(logger, "Master serving on {}", master.local_addr());

    tokio::signal::ctrl_c().await?;
    slog::info!(logger, "Shutting down");
    master.shutdown().await;

    Ok(())
}
