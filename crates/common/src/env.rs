//! Environment/runtime helpers
//!
//! Sanity checks to ensure the SQLite file location exists at startup.

use std::path::Path;

use tracing::{debug, warn};

/// Extract the filesystem path from a `sqlite:` URL.
///
/// Returns `None` for in-memory databases.
pub fn sqlite_file_path(url: &str) -> Option<&str> {
    let rest = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or(rest);
    if path.is_empty() || path == ":memory:" || path.starts_with("file::memory:") {
        return None;
    }
    Some(path)
}

/// Ensure the directory holding the SQLite file exists.
pub async fn ensure_env(database_url: &str) -> anyhow::Result<()> {
    let Some(path) = sqlite_file_path(database_url) else {
        warn!(%database_url, "in-memory database; data is lost on shutdown");
        return Ok(());
    };
    if let Some(dir) = Path::new(path).parent().filter(|d| !d.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", dir.display()))?;
        debug!(dir = %dir.display(), "database directory ready");
    }
    Ok(())
}
