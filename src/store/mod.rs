//! Output store for persisted page snapshots
//!
//! Each crawled URL maps to one file named after its sanitized identifier.
//! The file's existence is the completion record for that URL: the
//! orchestrator checks `exists` before fetching, which is what makes a
//! re-run resume instead of reprocessing. Records are written once and
//! never overwritten by the crawl loop.

use crate::config::OutputConfig;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while persisting a record
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Derives the filesystem-safe identifier for a URL
///
/// Every character outside `[A-Za-z0-9]` becomes `_`; the mapping is a
/// pure function of the URL. Distinct URLs can collide on the same
/// identifier (for example `a/b` and `a_b`); collisions are not
/// detected, which preserves the naming scheme of existing output
/// directories.
pub fn identifier_for(url: &str) -> String {
    url.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Filesystem-backed store of per-URL output records
#[derive(Debug, Clone)]
pub struct PageStore {
    root: PathBuf,
    extension: String,
}

impl PageStore {
    /// Creates a store rooted at the configured output directory
    ///
    /// The directory itself is created lazily on the first `persist`.
    pub fn new(config: &OutputConfig) -> Self {
        Self {
            root: PathBuf::from(&config.directory),
            extension: config.extension.clone(),
        }
    }

    /// Returns the path where the record for `id` lives
    pub fn record_path(&self, id: &str) -> PathBuf {
        self.root.join(format!("{}.{}", id, self.extension))
    }

    /// Checks whether a record is already persisted; side-effect-free
    pub fn exists(&self, id: &str) -> bool {
        self.record_path(id).exists()
    }

    /// Persists `content` as the record for `id`
    ///
    /// Creates the output directory if absent and returns the written
    /// path. A failure here is scoped to one URL; the caller reports it
    /// and moves on.
    pub fn persist(&self, id: &str, content: &str) -> Result<PathBuf, StoreError> {
        fs::create_dir_all(&self.root).map_err(|e| StoreError::CreateDir {
            path: self.root.clone(),
            source: e,
        })?;

        let path = self.record_path(id);
        fs::write(&path, content).map_err(|e| StoreError::Write {
            path: path.clone(),
            source: e,
        })?;

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> PageStore {
        PageStore::new(&OutputConfig {
            directory: dir.path().to_string_lossy().into_owned(),
            extension: "md".to_string(),
        })
    }

    #[test]
    fn test_identifier_replaces_non_alphanumerics() {
        assert_eq!(
            identifier_for("https://x.test/a"),
            "https___x_test_a"
        );
    }

    #[test]
    fn test_identifier_is_deterministic() {
        let url = "https://docs.example.com/guide?page=2";
        assert_eq!(identifier_for(url), identifier_for(url));
    }

    #[test]
    fn test_identifier_maps_non_ascii_to_underscore() {
        assert_eq!(identifier_for("https://x.test/café"), "https___x_test_caf_");
    }

    #[test]
    fn test_distinct_urls_can_collide() {
        // Known limitation of the sanitization scheme
        assert_eq!(identifier_for("a/b"), identifier_for("a_b"));
    }

    #[test]
    fn test_exists_is_false_before_persist() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert!(!store.exists("some_id"));
    }

    #[test]
    fn test_persist_then_exists() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let path = store.persist("some_id", "content").unwrap();
        assert!(store.exists("some_id"));
        assert_eq!(path, dir.path().join("some_id.md"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "content");
    }

    #[test]
    fn test_persist_creates_missing_directory() {
        let dir = TempDir::new().unwrap();
        let store = PageStore::new(&OutputConfig {
            directory: dir
                .path()
                .join("nested")
                .to_string_lossy()
                .into_owned(),
            extension: "md".to_string(),
        });

        store.persist("id", "content").unwrap();
        assert!(store.exists("id"));
    }

    #[test]
    fn test_persist_fails_when_root_is_a_file() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();

        let store = PageStore::new(&OutputConfig {
            directory: blocker.to_string_lossy().into_owned(),
            extension: "md".to_string(),
        });

        assert!(matches!(
            store.persist("id", "content").unwrap_err(),
            StoreError::CreateDir { .. }
        ));
    }
}
