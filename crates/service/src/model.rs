//! Favorites data model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub type UserId = String;
pub type FileId = String;

/// Full favorites document: every user's list, keyed by user id.
///
/// Ordered keys keep the persisted JSON stable across rewrites.
pub type FavoritesMap = BTreeMap<UserId, FileRefList>;

/// Ordered, duplicate-free list of file references for one user.
///
/// Stored as a plain JSON array. Duplicates in a hand-edited document are
/// dropped on load, keeping the first occurrence.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<FileId>", into = "Vec<FileId>")]
pub struct FileRefList(Vec<FileId>);

impl FileRefList {
    pub fn new() -> Self { Self::default() }

    pub fn contains(&self, file_id: &str) -> bool {
        self.0.iter().any(|f| f == file_id)
    }

    /// Appends `file_id` unless already present. Returns whether the list changed.
    pub fn insert(&mut self, file_id: impl Into<FileId>) -> bool {
        let file_id = file_id.into();
        if self.contains(&file_id) {
            return false;
        }
        self.0.push(file_id);
        true
    }

    /// Drops every occurrence of `file_id`. Returns whether the list changed.
    pub fn remove(&mut self, file_id: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|f| f != file_id);
        self.0.len() != before
    }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = &FileId> { self.0.iter() }

    pub fn as_slice(&self) -> &[FileId] { &self.0 }
}

impl<S: Into<FileId>> FromIterator<S> for FileRefList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = Self::new();
        for f in iter {
            list.insert(f);
        }
        list
    }
}

impl From<Vec<FileId>> for FileRefList {
    fn from(v: Vec<FileId>) -> Self { v.into_iter().collect() }
}

impl From<FileRefList> for Vec<FileId> {
    fn from(list: FileRefList) -> Self { list.0 }
}
