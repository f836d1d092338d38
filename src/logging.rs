//! File-backed `tracing` output.
//!
//! The terminal is owned by the UI, so events go to a log file or nowhere.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::{AppError, Result};

/// Build the filter from a directive such as `"debug"` or `"tree_view_tui=trace"`.
pub fn filter_for(level: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(level)
        .map_err(|e| AppError::Config(format!("invalid log level {level:?}: {e}")))
}

/// Install the global subscriber writing to `path`. Without a path, logging stays off.
pub fn init(path: Option<&Path>, level: &str) -> Result<bool> {
    let Some(path) = path else {
        return Ok(false);
    };

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = filter_for(level)?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| AppError::Logging(e.to_string()))?;

    tracing::info!(path = %path.display(), level, "logging started");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_path_means_no_logging() {
        assert!(!init(None, "debug").unwrap());
    }

    #[test]
    fn directive_is_kept() {
        let filter = filter_for("debug").unwrap();
        assert!(filter.to_string().contains("debug"));
    }

    #[test]
    fn unwritable_path_is_io_error() {
        let err = init(Some(Path::new("/nonexistent/dir/tv.log")), "info").unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }
}
