//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` so binaries and the server can prepare the
//! data directory through `service::runtime` without depending directly on `common`.

use std::path::Path;

/// Ensure the directory holding the record file exists.
pub async fn ensure_env(records_path: &Path) -> anyhow::Result<()> {
    common::env::ensure_data_dir(records_path).await
}
