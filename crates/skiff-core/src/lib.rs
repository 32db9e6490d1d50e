//! Skiff core library — UI-agnostic directory browsing logic.
//!
//! `skiff-core` holds the state and filesystem plumbing for a file browser
//! frontend: directory listings, create/rename/delete operations, and
//! thumbnail loading. It is deliberately decoupled from any UI framework so
//! that a mobile shell, a TUI, or a desktop frontend can all drive the same
//! logic and observe the same state.
//!
//! # Modules
//!
//! - [`fs`] — File system abstractions: [`FileEntry`], the [`FsCapability`]
//!   trait, and the local-disk implementation [`LocalFs`].
//! - [`store`] — [`DirectoryStore`]: observable per-directory state with
//!   refresh, hidden-file filtering, and mutating operations.
//! - [`thumb`] — [`ThumbnailAdapter`]: per-file thumbnail loading state.
//! - [`event`] — Explicit navigation signals ([`NavBus`]) between views.
//! - [`error`] — Unified error type ([`FsError`]) and result alias ([`FsResult`]).

pub mod error;
pub mod event;
pub mod fs;
pub mod store;
pub mod thumb;

pub use error::{FsError, FsResult};
pub use event::{NavBus, NavSignal};
pub use fs::capability::{FsCapability, LocalFs, PathStat};
pub use fs::entry::FileEntry;
pub use store::summary::DirectorySummary;
pub use store::{
    filter_hidden, sort_entries, DirectoryListing, DirectoryStore, LoadState, RemoveOutcome,
};
pub use thumb::render::ImageThumbnailer;
pub use thumb::{ThumbnailAdapter, ThumbnailCapability, ThumbnailState};

/// Normalises a string to NFC (composed) form.
///
/// macOS stores filenames in NFD (decomposed), which causes Korean Hangul
/// characters to appear as individual Jamo. This helper re-composes them.
pub fn nfc_string(s: &str) -> String {
    use unicode_normalization::UnicodeNormalization;
    s.nfc().collect()
}
