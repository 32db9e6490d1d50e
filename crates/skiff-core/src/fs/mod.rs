//! File system abstractions.
//!
//! - [`entry`] — the immutable [`FileEntry`](entry::FileEntry) snapshot value.
//! - [`capability`] — the [`FsCapability`](capability::FsCapability) trait the
//!   rest of the crate consumes, plus the local-disk implementation.

pub mod capability;
pub mod entry;

pub use capability::{FsCapability, LocalFs, PathStat};
pub use entry::FileEntry;
