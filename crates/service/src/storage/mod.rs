//! Storage abstractions for the favorites document.
//!
//! The document is loaded and saved as a whole; there is no per-user
//! partial read or write. Merging is the caller's job.

pub mod json_file;
pub mod memory;

use async_trait::async_trait;

use crate::errors::ServiceError;
use crate::model::FavoritesMap;

pub use json_file::JsonFileFavoritesStore;
pub use memory::MemoryFavoritesStore;

/// Trait abstraction for favorites persistence.
/// Implementations can be file-backed, database-backed, or in-memory.
#[async_trait]
pub trait FavoritesStore: Send + Sync {
    /// Current snapshot. Absent data is an empty map, not an error.
    async fn load(&self) -> Result<FavoritesMap, ServiceError>;

    /// Replace the persisted document with `snapshot`, all or nothing.
    async fn save(&self, snapshot: &FavoritesMap) -> Result<(), ServiceError>;
}
