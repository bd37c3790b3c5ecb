//! Per-user favorite files.
//!
//! Each operation is a self-contained load → compute → optional save against
//! the whole favorites document. `add` and `remove` hold `write_lock` across
//! that sequence so concurrent mutations cannot overwrite each other's save.
//! `list` takes no lock; the store's atomic save means it sees either the old
//! or the new document.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::errors::ServiceError;
use crate::model::FileRefList;
use crate::oracle::FileOracle;
use crate::repository::Repository;
use crate::storage::FavoritesStore;

#[derive(Clone)]
pub struct FavoritesService {
    store: Arc<dyn FavoritesStore>,
    oracle: Arc<dyn FileOracle>,
    repository: Repository,
    write_lock: Arc<Mutex<()>>,
}

impl FavoritesService {
    pub fn new(store: Arc<dyn FavoritesStore>, oracle: Arc<dyn FileOracle>, repository: Repository) -> Self {
        Self { store, oracle, repository, write_lock: Arc::new(Mutex::new(())) }
    }

    pub fn repository(&self) -> &Repository { &self.repository }

    /// The user's favorites, or an empty list for an unknown user.
    pub async fn list(&self, user_id: &str) -> Result<FileRefList, ServiceError> {
        let mut snapshot = self.store.load().await?;
        Ok(snapshot.remove(user_id).unwrap_or_default())
    }

    /// Append `file_id` to the user's favorites if the file exists.
    /// Adding a file that is already there changes nothing and writes nothing.
    pub async fn add(&self, user_id: &str, file_id: &str) -> Result<FileRefList, ServiceError> {
        if file_id.is_empty() {
            return Err(ServiceError::file_id_required());
        }
        let path = self.repository.resolve(file_id).ok_or_else(ServiceError::file_not_found)?;
        if !self.oracle.exists(&path).await? {
            debug!(%user_id, %file_id, "rejecting favorite for missing file");
            return Err(ServiceError::file_not_found());
        }

        let _guard = self.write_lock.lock().await;
        let mut snapshot = self.store.load().await?;
        let list = snapshot.entry(user_id.to_string()).or_default();
        if !list.insert(file_id) {
            return Ok(list.clone());
        }
        let result = list.clone();
        self.store.save(&snapshot).await?;
        info!(%user_id, %file_id, count = result.len(), "favorite added");
        Ok(result)
    }

    /// Remove `file_id` from the user's favorites. Unknown users and absent
    /// files are no-ops; the document is only rewritten when the list changed.
    pub async fn remove(&self, user_id: &str, file_id: &str) -> Result<FileRefList, ServiceError> {
        if file_id.is_empty() {
            return Err(ServiceError::file_id_required());
        }

        let _guard = self.write_lock.lock().await;
        let mut snapshot = self.store.load().await?;
        let Some(list) = snapshot.get_mut(user_id) else {
            return Ok(FileRefList::new());
        };
        if !list.remove(file_id) {
            return Ok(list.clone());
        }
        let result = list.clone();
        if let Err(e) = self.store.save(&snapshot).await {
            warn!(%user_id, %file_id, error = %e, "failed to persist favorite removal");
            return Err(e);
        }
        info!(%user_id, %file_id, count = result.len(), "favorite removed");
        Ok(result)
    }
}
