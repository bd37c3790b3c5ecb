//! Service layer for the file repository API.
//! - `storage`: whole-document persistence of the favorites map.
//! - `oracle`: file existence checks.
//! - `repository`: path resolution, search and download lookup under the root.
//! - `favorites`: the list/add/remove operations on top of the three.

pub mod errors;
pub mod model;
pub mod storage;
pub mod oracle;
pub mod repository;
pub mod favorites;
pub mod runtime;

pub use errors::ServiceError;
pub use favorites::FavoritesService;
