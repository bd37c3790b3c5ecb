use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::FavoritesStore;
use crate::errors::ServiceError;
use crate::model::FavoritesMap;

/// In-process favorites store.
///
/// Counts saves and can be switched into a failing mode so callers can check
/// write cardinality and error propagation. `load` and `save` yield to the
/// scheduler like real I/O would, which keeps lost-update races observable.
#[derive(Debug, Default)]
pub struct MemoryFavoritesStore {
    inner: RwLock<FavoritesMap>,
    saves: AtomicUsize,
    fail_saves: AtomicBool,
}

impl MemoryFavoritesStore {
    pub fn new() -> Self { Self::default() }

    pub fn with_snapshot(snapshot: FavoritesMap) -> Self {
        Self { inner: RwLock::new(snapshot), ..Self::default() }
    }

    /// Number of successful `save` calls so far.
    pub fn save_count(&self) -> usize { self.saves.load(Ordering::SeqCst) }

    pub fn set_fail_saves(&self, fail: bool) { self.fail_saves.store(fail, Ordering::SeqCst); }

    pub async fn snapshot(&self) -> FavoritesMap { self.inner.read().await.clone() }
}

#[async_trait]
impl FavoritesStore for MemoryFavoritesStore {
    async fn load(&self) -> Result<FavoritesMap, ServiceError> {
        tokio::task::yield_now().await;
        Ok(self.inner.read().await.clone())
    }

    async fn save(&self, snapshot: &FavoritesMap) -> Result<(), ServiceError> {
        tokio::task::yield_now().await;
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(ServiceError::Persistence("simulated write failure".into()));
        }
        *self.inner.write().await = snapshot.clone();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn failing_save_leaves_snapshot_untouched() {
        let mut initial = FavoritesMap::new();
        initial.insert("alice".into(), ["a.txt"].into_iter().collect());
        let store = MemoryFavoritesStore::with_snapshot(initial.clone());

        store.set_fail_saves(true);
        assert!(store.save(&FavoritesMap::new()).await.is_err());
        assert_eq!(store.load().await.unwrap(), initial);
        assert_eq!(store.save_count(), 0);

        store.set_fail_saves(false);
        store.save(&FavoritesMap::new()).await.unwrap();
        assert!(store.snapshot().await.is_empty());
        assert_eq!(store.save_count(), 1);
    }
}
