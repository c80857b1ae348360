use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber, appending to `log_path`.
///
/// Lines carry level, timestamp, source location and message. `RUST_LOG`
/// overrides the default `info` filter. Falls back to stderr when the log
/// file cannot be opened.
pub fn init_logging(log_path: &Path) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(false)
        .with_file(true)
        .with_line_number(true);

    match OpenOptions::new().create(true).append(true).open(log_path) {
        Ok(file) => {
            let _ = builder.with_writer(Mutex::new(file)).try_init();
        }
        Err(err) => {
            let _ = builder.with_writer(std::io::stderr).try_init();
            tracing::warn!(
                "cannot open log file {}: {err}; logging to stderr",
                log_path.display()
            );
        }
    }
}
