//! The filesystem capability consumed by the directory store.
//!
//! [`FsCapability`] is the seam between the core and the host filesystem.
//! The store only ever talks to this trait, which keeps it testable with
//! in-memory fakes and portable to sandboxed or remote backends. [`LocalFs`]
//! is the local-disk implementation over `tokio::fs`.

use std::path::Path;
use std::time::SystemTime;

use async_trait::async_trait;

use crate::error::{FsError, FsResult};
use crate::fs::entry::FileEntry;

/// Attributes of a single path, as reported by [`FsCapability::stat`].
#[derive(Debug, Clone, PartialEq)]
pub struct PathStat {
    /// Size in bytes.
    pub size: u64,
    /// `true` when the path is a directory.
    pub is_dir: bool,
    /// Creation time, when the platform records one.
    pub created: Option<SystemTime>,
    /// Last-modified time, if available.
    pub modified: Option<SystemTime>,
}

/// Asynchronous filesystem operations the core depends on but does not own.
///
/// Every method maps onto a single host call; implementations surface host
/// errors through the [`FsError`] taxonomy and perform no retries.
#[async_trait]
pub trait FsCapability: Send + Sync {
    /// Enumerates the immediate children of `path`.
    ///
    /// The returned entries are **unsorted**; ordering is the store's job.
    async fn list(&self, path: &Path) -> FsResult<Vec<FileEntry>>;

    /// Reads the attributes of `path` itself.
    async fn stat(&self, path: &Path) -> FsResult<PathStat>;

    /// Creates a directory at `path`. Fails if it already exists.
    async fn create_dir(&self, path: &Path) -> FsResult<()>;

    /// Creates an empty file at `path`. Fails if it already exists.
    async fn create_file(&self, path: &Path) -> FsResult<()>;

    /// Removes the file or directory (recursively) at `path`.
    async fn remove(&self, path: &Path) -> FsResult<()>;

    /// Moves `from` to `to`. Fails with [`FsError::AlreadyExists`] when the
    /// destination is occupied — never clobbers.
    async fn rename(&self, from: &Path, to: &Path) -> FsResult<()>;
}

/// [`FsCapability`] backed by the local disk via `tokio::fs`.
#[derive(Debug, Default, Clone)]
pub struct LocalFs;

impl LocalFs {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FsCapability for LocalFs {
    async fn list(&self, path: &Path) -> FsResult<Vec<FileEntry>> {
        let mut read_dir = tokio::fs::read_dir(path)
            .await
            .map_err(|e| FsError::from_io(path, e))?;

        let mut entries = Vec::new();
        loop {
            let dir_entry = match read_dir.next_entry().await {
                Ok(Some(e)) => e,
                Ok(None) => break,
                Err(e) => return Err(FsError::from_io(path, e)),
            };
            // Entries whose metadata cannot be read are skipped, not fatal.
            let Ok(metadata) = dir_entry.metadata().await else {
                continue;
            };
            entries.push(FileEntry::new(dir_entry.path(), &metadata));
        }

        Ok(entries)
    }

    async fn stat(&self, path: &Path) -> FsResult<PathStat> {
        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|e| FsError::from_io(path, e))?;
        Ok(PathStat {
            size: metadata.len(),
            is_dir: metadata.is_dir(),
            created: metadata.created().ok(),
            modified: metadata.modified().ok(),
        })
    }

    async fn create_dir(&self, path: &Path) -> FsResult<()> {
        tokio::fs::create_dir(path)
            .await
            .map_err(|e| FsError::from_io(path, e))
    }

    async fn create_file(&self, path: &Path) -> FsResult<()> {
        tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .await
            .map(|_| ())
            .map_err(|e| FsError::from_io(path, e))
    }

    async fn remove(&self, path: &Path) -> FsResult<()> {
        // symlink_metadata: does not follow symlinks, avoids TOCTOU
        let metadata = tokio::fs::symlink_metadata(path)
            .await
            .map_err(|e| FsError::from_io(path, e))?;

        if metadata.is_dir() {
            tokio::fs::remove_dir_all(path)
                .await
                .map_err(|e| FsError::from_io(path, e))
        } else {
            tokio::fs::remove_file(path)
                .await
                .map_err(|e| FsError::from_io(path, e))
        }
    }

    async fn rename(&self, from: &Path, to: &Path) -> FsResult<()> {
        // Plain rename on Unix silently replaces the destination; the
        // capability contract refuses to clobber.
        if tokio::fs::symlink_metadata(to).await.is_ok() {
            return Err(FsError::AlreadyExists(to.to_path_buf()));
        }
        tokio::fs::rename(from, to)
            .await
            .map_err(|e| FsError::from_io(from, e))
    }
}
