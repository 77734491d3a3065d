//! Log setup. A TUI owns the terminal, so tracing goes to a file under the
//! data directory; `RAFIQ_LOG` filters it (`info` by default).

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

pub fn init_tracing(data_dir: &Path) {
    let _ = std::fs::create_dir_all(data_dir);
    let log_path = data_dir.join("rafiq.log");

    let Ok(file) = OpenOptions::new().create(true).append(true).open(&log_path) else {
        // No log file, no logs. The app still runs.
        return;
    };

    let filter = EnvFilter::try_from_env("RAFIQ_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .try_init();
}
