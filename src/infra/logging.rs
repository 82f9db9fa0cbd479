//! File logging. The terminal belongs to the TUI, so every log line goes to
//! `.prompt-console/console.log`.
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

use pc_base::constants::{LOG_FILE, STORE_DIR};

pub fn log_path() -> PathBuf {
    Path::new(STORE_DIR).join(LOG_FILE)
}

/// Filter from `RUST_LOG` when set, else `fallback`
fn build_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. Returns the log file path.
pub fn init(filter: &str) -> io::Result<PathBuf> {
    let path = log_path();
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let subscriber = tracing_subscriber::registry().with(build_filter(filter)).with(
        tracing_subscriber::fmt::layer()
            .with_writer(Mutex::new(file))
            .with_ansi(false) // No ANSI colors in file
            .with_target(true),
    );
    tracing::subscriber::set_global_default(subscriber).map_err(io::Error::other)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_fallback_filter_still_builds() {
        // Only meaningful when RUST_LOG is unset, but must never panic either way
        let _ = build_filter("pconsole=[[[");
        let _ = build_filter(pc_base::constants::DEFAULT_LOG_FILTER);
    }
}
