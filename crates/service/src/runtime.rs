//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` to keep binary crates importing
//! `service::runtime::ensure_env` without depending directly on `common`.

use std::path::Path;

/// Ensure expected directories exist; warn on missing optional ones.
pub async fn ensure_env(repository_root: &Path, assets_dir: &Path, favorites_file: &Path) -> anyhow::Result<()> {
    common::env::ensure_env(repository_root, assets_dir, favorites_file).await
}
