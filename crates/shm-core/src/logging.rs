//! Tracing setup.
//!
//! Logs go to `$SHM_HOME/logs/shm.log` so they never interleave with the
//! generated markup on stdout. The filter is read from `SHM_LOG`
//! (e.g. `SHM_LOG=shm_editor=debug`), defaulting to `warn`.

use std::fs;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "SHM_LOG";

const LOG_FILE: &str = "shm.log";

/// Installs the global subscriber writing to `log_dir`.
///
/// Returns the writer guard, which must be held until exit so buffered
/// lines are flushed. Returns `None` if logging could not be set up; the
/// program keeps running without logs in that case.
pub fn init(log_dir: &Path) -> Option<WorkerGuard> {
    if fs::create_dir_all(log_dir).is_err() {
        return None;
    }

    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    match tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
    {
        Ok(()) => Some(guard),
        // A global subscriber is already installed; dropping the guard shuts the writer down.
        Err(_) => None,
    }
}
