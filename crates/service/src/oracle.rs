//! File existence checks consulted before a favorite is admitted.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::errors::ServiceError;

#[async_trait]
pub trait FileOracle: Send + Sync {
    /// `Ok(false)` means the check worked and nothing is there; `Err` means
    /// the check itself failed.
    async fn exists(&self, path: &Path) -> Result<bool, ServiceError>;
}

/// Asks the local filesystem.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsFileOracle;

#[async_trait]
impl FileOracle for FsFileOracle {
    async fn exists(&self, path: &Path) -> Result<bool, ServiceError> {
        tokio::fs::try_exists(path)
            .await
            .map_err(|e| ServiceError::Oracle(format!("cannot check {}: {e}", path.display())))
    }
}

/// Fixed set of known paths. Records how often it was asked.
#[derive(Debug, Default)]
pub struct MemoryFileOracle {
    known: HashSet<PathBuf>,
    calls: AtomicUsize,
    fail: AtomicBool,
}

impl MemoryFileOracle {
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self { known: paths.into_iter().map(Into::into).collect(), ..Self::default() }
    }

    pub fn call_count(&self) -> usize { self.calls.load(Ordering::SeqCst) }

    pub fn set_fail(&self, fail: bool) { self.fail.store(fail, Ordering::SeqCst); }
}

#[async_trait]
impl FileOracle for MemoryFileOracle {
    async fn exists(&self, path: &Path) -> Result<bool, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(ServiceError::Oracle(format!("simulated failure checking {}", path.display())));
        }
        Ok(self.known.contains(path))
    }
}
