//! The browsed file tree: path resolution, name search, download lookup.

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

use crate::errors::ServiceError;

#[derive(Clone, Debug)]
pub struct Repository {
    root: PathBuf,
}

impl Repository {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self { Self { root: root.into() } }

    /// Join a repository-relative path onto the root.
    ///
    /// Normalized lexically: `.` and a leading `/` are ignored, and `..`
    /// cancels the previous component. Returns `None` when a `..` would climb
    /// above the root or nothing is left to name.
    pub fn resolve(&self, relative: &str) -> Option<PathBuf> {
        let mut parts: Vec<&OsStr> = Vec::new();
        for component in Path::new(relative).components() {
            match component {
                Component::Normal(part) => parts.push(part),
                Component::ParentDir => {
                    parts.pop()?;
                }
                Component::CurDir | Component::RootDir => {}
                Component::Prefix(_) => return None,
            }
        }
        if parts.is_empty() {
            return None;
        }
        let mut joined = self.root.clone();
        joined.extend(parts);
        Some(joined)
    }

    /// Files whose name contains `text` (case-insensitive), as sorted
    /// `/`-separated paths relative to the root. Empty `text` matches all.
    pub async fn search(&self, text: &str) -> Result<Vec<String>, ServiceError> {
        let root = self.root.clone();
        let needle = text.trim().to_lowercase();
        tokio::task::spawn_blocking(move || search_blocking(&root, &needle))
            .await
            .map_err(ServiceError::oracle)?
    }

    /// Locate a regular file for download. Returns its full path and the file
    /// name to advertise in `Content-Disposition`.
    pub async fn open_download(&self, relative: &str) -> Result<(PathBuf, String), ServiceError> {
        let path = self.resolve(relative).ok_or_else(ServiceError::file_not_found)?;
        let meta = tokio::fs::metadata(&path).await.map_err(|_| ServiceError::file_not_found())?;
        if !meta.is_file() {
            return Err(ServiceError::file_not_found());
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(ServiceError::file_not_found)?;
        Ok((path, name))
    }
}

fn search_blocking(root: &Path, needle: &str) -> Result<Vec<String>, ServiceError> {
    if !root.is_dir() {
        return Err(ServiceError::Oracle(format!("repository root {} is not a directory", root.display())));
    }
    let mut hits = Vec::new();
    for entry in WalkDir::new(root).follow_links(false) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!(error = %e, "skipping unreadable repository entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_lowercase();
        if !needle.is_empty() && !name.contains(needle) {
            continue;
        }
        if let Ok(rel) = entry.path().strip_prefix(root) {
            let parts: Vec<_> = rel.components().map(|c| c.as_os_str().to_string_lossy()).collect();
            hits.push(parts.join("/"));
        }
    }
    hits.sort();
    Ok(hits)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn fixture() -> Result<(tempfile::TempDir, Repository), anyhow::Error> {
        let dir = tempfile::tempdir()?;
        tokio::fs::create_dir_all(dir.path().join("docs/nested")).await?;
        tokio::fs::write(dir.path().join("Readme.md"), b"readme").await?;
        tokio::fs::write(dir.path().join("docs/test.html"), b"<p>").await?;
        tokio::fs::write(dir.path().join("docs/nested/other_TEST.txt"), b"x").await?;
        let repo = Repository::new(dir.path());
        Ok((dir, repo))
    }

    #[test]
    fn resolve_rejects_escapes() {
        let repo = Repository::new("/srv/repo");
        assert_eq!(repo.resolve("a/b.txt"), Some(PathBuf::from("/srv/repo/a/b.txt")));
        assert_eq!(repo.resolve("./a.txt"), Some(PathBuf::from("/srv/repo/a.txt")));
        assert_eq!(repo.resolve("../etc/passwd"), None);
        assert_eq!(repo.resolve("a/../../b"), None);
        assert_eq!(repo.resolve(""), None);
        assert_eq!(repo.resolve("."), None);
        assert_eq!(repo.resolve("docs/.."), None);
    }

    #[test]
    fn resolve_normalizes_in_root_paths() {
        let repo = Repository::new("/srv/repo");
        assert_eq!(repo.resolve("docs/../a.txt"), Some(PathBuf::from("/srv/repo/a.txt")));
        assert_eq!(repo.resolve("/a.txt"), Some(PathBuf::from("/srv/repo/a.txt")));
        assert_eq!(repo.resolve("/etc/passwd"), Some(PathBuf::from("/srv/repo/etc/passwd")));
        assert_eq!(repo.resolve("a/./b/../c.txt"), Some(PathBuf::from("/srv/repo/a/c.txt")));
    }

    #[tokio::test]
    async fn search_matches_names_case_insensitively() -> Result<(), anyhow::Error> {
        let (_dir, repo) = fixture().await?;
        let hits = repo.search("test").await?;
        assert_eq!(hits, vec!["docs/nested/other_TEST.txt".to_string(), "docs/test.html".to_string()]);
        assert_eq!(repo.search("").await?.len(), 3);
        assert!(repo.search("nothing-like-this").await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn search_on_missing_root_fails() {
        let repo = Repository::new("/definitely/not/here");
        assert!(matches!(repo.search("x").await, Err(ServiceError::Oracle(_))));
    }

    #[tokio::test]
    async fn open_download_only_returns_regular_files() -> Result<(), anyhow::Error> {
        let (_dir, repo) = fixture().await?;
        let (path, name) = repo.open_download("docs/test.html").await?;
        assert!(path.ends_with("docs/test.html"));
        assert_eq!(name, "test.html");

        assert!(matches!(repo.open_download("docs").await, Err(ServiceError::NotFound(_))));
        assert!(matches!(repo.open_download("missing.txt").await, Err(ServiceError::NotFound(_))));
        assert!(matches!(repo.open_download("../x").await, Err(ServiceError::NotFound(_))));

        let (path, _) = repo.open_download("docs/nested/../test.html").await?;
        assert!(path.ends_with("docs/test.html"));
        let (_, name) = repo.open_download("/Readme.md").await?;
        assert_eq!(name, "Readme.md");
        Ok(())
    }
}
