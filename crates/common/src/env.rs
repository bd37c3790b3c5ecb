//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::Path;

use tracing::warn;

/// Ensure expected directories exist; warn on missing optional ones.
///
/// The repository root and assets dir are only read, so a missing one is a
/// warning. The favorites file's parent is created since saves need it.
pub async fn ensure_env(repository_root: &Path, assets_dir: &Path, favorites_file: &Path) -> anyhow::Result<()> {
    if tokio::fs::metadata(repository_root).await.is_err() {
        warn!(repository_root = %repository_root.display(), "repository root not found; search and downloads will fail");
    }
    if tokio::fs::metadata(assets_dir).await.is_err() {
        warn!(assets_dir = %assets_dir.display(), "assets directory not found; static assets may 404");
    }
    if let Some(data_dir) = favorites_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(data_dir)
            .await
            .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", data_dir.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_favorites_parent_dir() -> anyhow::Result<()> {
        let tmp = tempfile::tempdir()?;
        let favorites = tmp.path().join("data/nested/favorites.json");
        ensure_env(&tmp.path().join("missing-repo"), &tmp.path().join("missing-assets"), &favorites).await?;
        assert!(tmp.path().join("data/nested").is_dir());
        Ok(())
    }
}
