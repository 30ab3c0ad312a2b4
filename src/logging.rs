use chrono::Utc;
use slog::Drain;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;

/// Terminal logger for a process named `name`. `verbose` lets wire-level debug records through.
pub fn create_root_logger_for_stdout(name: &str, verbose: bool) -> slog::Logger {
    let decorator = slog_term::TermDecorator::new().build();
    let drain = slog_term::FullFormat::new(decorator).use_file_location().build().fuse();
    let drain = slog::LevelFilter::new(drain, level(verbose)).fuse();
    let drain = slog_async::Async::new(drain).build().fuse();

    slog::Logger::root(drain, slog::o!("process" => name.to_string()))
}

/// File logger writing to `<directory>/<name>_<utc timestamp>_info.log`.
pub fn create_root_logger_for_file(directory: &Path, name: &str, verbose: bool) -> io::Result<slog::Logger> {
    fs::create_dir_all(directory)?;

    let now = Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
    let log_path = directory.join(format!("{}_{}_info.log", name, now));
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(log_path)?;

    let decorator = slog_term::PlainDecorator::new(file);
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog::LevelFilter::new(drain, level(verbose)).fuse();
    let drain = slog_async::Async::new(drain).build().fuse();

    Ok(slog::Logger::root(drain, slog::o!("process" => name.to_string())))
}

fn level(verbose: bool) -> slog::Level {
    if verbose {
        slog::Level::Debug
    } else {
        slog::Level::Info
    }
}
