//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` so the server crate can prepare the
//! database location through the service layer.

/// Ensure the SQLite file's directory exists.
pub async fn ensure_env(database_url: &str) -> anyhow::Result<()> {
    common::env::ensure_env(database_url).await
}
