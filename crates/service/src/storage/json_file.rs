use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use super::FavoritesStore;
use crate::errors::ServiceError;
use crate::model::FavoritesMap;

/// JSON file-backed favorites store.
///
/// Every `save` writes a sibling temp file and renames it over the target,
/// so readers see either the old or the new document, never a partial one.
#[derive(Clone, Debug)]
pub struct JsonFileFavoritesStore {
    file_path: PathBuf,
}

impl JsonFileFavoritesStore {
    /// Bind the store to a path. Creates the parent directory; the file itself
    /// is only created by the first save.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Self, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(ServiceError::persistence)?;
        }
        Ok(Self { file_path })
    }

    pub fn path(&self) -> &Path { &self.file_path }
}

#[async_trait]
impl FavoritesStore for JsonFileFavoritesStore {
    async fn load(&self) -> Result<FavoritesMap, ServiceError> {
        let bytes = match fs::read(&self.file_path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(FavoritesMap::new()),
            Err(e) => {
                return Err(ServiceError::Persistence(format!(
                    "failed to read {}: {e}",
                    self.file_path.display()
                )))
            }
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(FavoritesMap::new());
        }
        serde_json::from_slice(&bytes).map_err(|e| {
            ServiceError::Persistence(format!("malformed favorites file {}: {e}", self.file_path.display()))
        })
    }

    async fn save(&self, snapshot: &FavoritesMap) -> Result<(), ServiceError> {
        let data = serde_json::to_vec_pretty(snapshot).map_err(ServiceError::persistence)?;
        let path = self.file_path.clone();
        tokio::task::spawn_blocking(move || atomic_write(&path, &data))
            .await
            .map_err(ServiceError::persistence)??;
        debug!(path = %self.file_path.display(), users = snapshot.len(), "favorites saved");
        Ok(())
    }
}

fn atomic_write(path: &Path, data: &[u8]) -> Result<(), ServiceError> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut temp = tempfile::NamedTempFile::new_in(dir).map_err(|e| {
        ServiceError::Persistence(format!("failed to create temp file in {}: {e}", dir.display()))
    })?;
    temp.write_all(data)
        .and_then(|_| temp.as_file().sync_all())
        .map_err(|e| ServiceError::Persistence(format!("failed to write favorites temp file: {e}")))?;
    temp.persist(path).map_err(|e| {
        ServiceError::Persistence(format!("failed to persist favorites to {}: {e}", path.display()))
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FileRefList;

    fn tmp_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("favorites_store_{}", uuid::Uuid::new_v4()))
            .join("favorites.json")
    }

    #[tokio::test]
    async fn missing_file_loads_empty() -> Result<(), anyhow::Error> {
        let store = JsonFileFavoritesStore::new(tmp_path()).await?;
        assert!(store.load().await?.is_empty());
        // load must not create the file
        assert!(!store.path().exists());
        Ok(())
    }

    #[tokio::test]
    async fn save_then_reload_persists() -> Result<(), anyhow::Error> {
        let path = tmp_path();
        let store = JsonFileFavoritesStore::new(&path).await?;

        let mut map = FavoritesMap::new();
        map.insert("alice".into(), ["a.txt", "b.txt"].into_iter().collect());
        map.insert("bob".into(), FileRefList::new());
        store.save(&map).await?;

        let reloaded = JsonFileFavoritesStore::new(&path).await?;
        assert_eq!(reloaded.load().await?, map);

        let _ = tokio::fs::remove_dir_all(path.parent().unwrap()).await;
        Ok(())
    }

    #[tokio::test]
    async fn save_of_load_keeps_bytes() -> Result<(), anyhow::Error> {
        let path = tmp_path();
        let store = JsonFileFavoritesStore::new(&path).await?;
        let mut map = FavoritesMap::new();
        map.insert("zed".into(), ["z"].into_iter().collect());
        map.insert("amy".into(), ["a", "b"].into_iter().collect());
        store.save(&map).await?;
        let before = tokio::fs::read(&path).await?;

        let snapshot = store.load().await?;
        store.save(&snapshot).await?;
        assert_eq!(tokio::fs::read(&path).await?, before);

        let _ = tokio::fs::remove_dir_all(path.parent().unwrap()).await;
        Ok(())
    }

    #[tokio::test]
    async fn malformed_file_is_persistence_error() -> Result<(), anyhow::Error> {
        let path = tmp_path();
        let store = JsonFileFavoritesStore::new(&path).await?;
        tokio::fs::write(&path, b"{not json").await?;
        assert!(matches!(store.load().await, Err(ServiceError::Persistence(_))));

        tokio::fs::write(&path, b"  \n").await?;
        assert!(store.load().await?.is_empty());

        let _ = tokio::fs::remove_dir_all(path.parent().unwrap()).await;
        Ok(())
    }

    #[tokio::test]
    async fn unwritable_target_keeps_previous_document() -> Result<(), anyhow::Error> {
        let path = tmp_path();
        let store = JsonFileFavoritesStore::new(&path).await?;
        let mut map = FavoritesMap::new();
        map.insert("alice".into(), ["a.txt"].into_iter().collect());
        store.save(&map).await?;

        // a directory where the file should be makes the rename fail
        let blocked = JsonFileFavoritesStore::new(path.parent().unwrap().join("blocked")).await?;
        tokio::fs::create_dir_all(blocked.path()).await?;
        tokio::fs::write(blocked.path().join("keep"), b"x").await?;
        assert!(matches!(blocked.save(&map).await, Err(ServiceError::Persistence(_))));

        assert_eq!(store.load().await?, map);
        let _ = tokio::fs::remove_dir_all(path.parent().unwrap()).await;
        Ok(())
    }
}
