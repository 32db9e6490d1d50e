//! Error types for `skiff-core`.
//!
//! All fallible operations in the core library return [`FsResult<T>`],
//! which is an alias for `Result<T, FsError>`.
//!
//! Every variant originates at the filesystem or thumbnail capability
//! boundary — the core performs no validation of its own and introduces
//! no error kinds beyond what the host OS reports.

use std::path::{Path, PathBuf};

/// Unified error type for all core operations.
///
/// The enum is `Clone + PartialEq` so failures can be published as part of
/// observable state (see [`crate::store::LoadState::Failed`]) and compared
/// in frontends (e.g. rendering "permission denied" distinctly from a
/// generic error). I/O errors are classified by kind rather than wrapped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FsError {
    /// The target path does not exist.
    #[error("path not found: {0}")]
    NotFound(PathBuf),

    /// A file or directory already exists at the target path.
    #[error("already exists: {0}")]
    AlreadyExists(PathBuf),

    /// The process lacks permission to access the path.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// Any other failure, carrying the underlying message.
    #[error("{0}")]
    Unknown(String),
}

impl FsError {
    /// Classifies a `std::io::Error` for `path` into the core taxonomy.
    pub fn from_io(path: &Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => FsError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::AlreadyExists => FsError::AlreadyExists(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => FsError::PermissionDenied(path.to_path_buf()),
            _ => FsError::Unknown(err.to_string()),
        }
    }
}

/// Convenience alias used throughout `skiff-core`.
pub type FsResult<T> = Result<T, FsError>;
