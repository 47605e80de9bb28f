use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Mutex;
use tracing::warn;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "xrpticker=info";

/// Log file writer, or a sink plus the open error when the file can't be created.
pub fn log_writer(path: &Path) -> (BoxMakeWriter, Option<io::Error>) {
    match File::create(path) {
        Ok(file) => (BoxMakeWriter::new(Mutex::new(file)), None),
        Err(e) => (BoxMakeWriter::new(io::sink), Some(e)),
    }
}

/// Installs the global subscriber. Logging is never fatal: an unwritable
/// log path falls back to discarding output.
pub fn init(path: &Path) {
    let (writer, open_error) = log_writer(path);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
        )
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .init();

    if let Some(e) = open_error {
        warn!("cannot open log file {}: {}", path.display(), e);
    }
}
