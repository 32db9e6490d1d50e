//! Observable per-directory state.
//!
//! A [`DirectoryStore`] owns the listing of exactly one directory and
//! mediates every mutating filesystem operation for it. State is published
//! through a `tokio::sync::watch` channel: frontends subscribe once and
//! re-render whenever a new [`DirectoryListing`] snapshot lands.
//!
//! The store issues single calls to the [`FsCapability`] and reconciles the
//! results; it adds no caching, locking, or validation of its own.

pub mod summary;

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;

use crate::error::{FsError, FsResult};
use crate::fs::capability::{FsCapability, LocalFs, PathStat};
use crate::fs::entry::FileEntry;
use self::summary::DirectorySummary;

/// Loading status of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// No refresh has been issued yet.
    Idle,
    /// A refresh is in flight.
    Loading,
    /// The last refresh succeeded. An empty entry list here means the
    /// directory really is empty.
    Loaded,
    /// The last refresh failed; the entry list has been cleared.
    Failed(FsError),
}

/// The per-item result of a [`DirectoryStore::delete_items`] batch.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoveOutcome {
    /// The entry that was targeted.
    pub path: PathBuf,
    /// Whether removal succeeded for this entry.
    pub result: FsResult<()>,
}

/// One published snapshot of a directory's state.
///
/// Snapshots are replaced wholesale by the owning store's refresh; nothing
/// mutates them incrementally. The visible view is derived on every call to
/// [`entries`](DirectoryListing::entries), never cached.
#[derive(Debug, Clone)]
pub struct DirectoryListing {
    all_entries: Vec<FileEntry>,
    show_hidden: bool,
    load_state: LoadState,
    summary: Option<DirectorySummary>,
}

impl DirectoryListing {
    fn new() -> Self {
        Self {
            all_entries: Vec::new(),
            show_hidden: false,
            load_state: LoadState::Idle,
            summary: None,
        }
    }

    /// Returns the visible entries: all entries, minus hidden ones unless
    /// hidden files are shown.
    pub fn entries(&self) -> Vec<FileEntry> {
        filter_hidden(&self.all_entries, self.show_hidden)
    }

    /// Returns every entry of the last successful listing, hidden included.
    pub fn all_entries(&self) -> &[FileEntry] {
        &self.all_entries
    }

    /// Returns `true` when hidden (dot-prefixed) entries are visible.
    pub fn show_hidden(&self) -> bool {
        self.show_hidden
    }

    /// Returns the listing's loading status.
    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    /// Returns the aggregate summary over the visible entries, if one has
    /// been computed. May be stale after a failed refresh.
    pub fn summary(&self) -> Option<&DirectorySummary> {
        self.summary.as_ref()
    }
}

impl Default for DirectoryListing {
    fn default() -> Self {
        Self::new()
    }
}

/// Sorts entries for display: directories before files, then
/// case-insensitive ascending by name within each group.
///
/// Returns a **new** sorted `Vec<FileEntry>` — the input is never mutated.
pub fn sort_entries(entries: &[FileEntry]) -> Vec<FileEntry> {
    let mut sorted: Vec<FileEntry> = entries.to_vec();
    sorted.sort_by(|a, b| {
        b.is_dir()
            .cmp(&a.is_dir())
            .then_with(|| a.name().to_lowercase().cmp(&b.name().to_lowercase()))
    });
    sorted
}

/// Filters out hidden entries when `show_hidden` is `false`.
///
/// When `show_hidden` is `true` all entries are returned unchanged.
pub fn filter_hidden(entries: &[FileEntry], show_hidden: bool) -> Vec<FileEntry> {
    if show_hidden {
        return entries.to_vec();
    }
    entries.iter().filter(|e| !e.is_hidden()).cloned().collect()
}

/// Authoritative state holder for one directory.
///
/// Each store owns its state exclusively; nothing is shared between stores.
/// All mutation goes through the store's own methods, and results are
/// published to subscribers as [`DirectoryListing`] snapshots.
///
/// Overlapping [`refresh`](DirectoryStore::refresh) calls are resolved by a
/// monotonic generation counter: only the most recently issued refresh may
/// apply its result, so a slow stale enumeration can never overwrite a
/// newer one.
pub struct DirectoryStore<F: FsCapability = LocalFs> {
    path: PathBuf,
    fs: Arc<F>,
    state: watch::Sender<DirectoryListing>,
    generation: AtomicU64,
}

impl DirectoryStore<LocalFs> {
    /// Creates a store for `path` backed by the local disk.
    ///
    /// The state starts [`LoadState::Idle`] with no entries; call
    /// [`refresh`](DirectoryStore::refresh) to populate it.
    pub fn new(path: PathBuf) -> Self {
        Self::with_capability(path, Arc::new(LocalFs::new()))
    }
}

impl<F: FsCapability> DirectoryStore<F> {
    /// Creates a store for `path` over an arbitrary filesystem capability.
    pub fn with_capability(path: PathBuf, fs: Arc<F>) -> Self {
        let (state, _) = watch::channel(DirectoryListing::new());
        Self {
            path,
            fs,
            state,
            generation: AtomicU64::new(0),
        }
    }

    /// The directory this store manages. Fixed for the store's lifetime.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Subscribes to state changes. The receiver yields the current
    /// snapshot immediately and then on every update.
    pub fn subscribe(&self) -> watch::Receiver<DirectoryListing> {
        self.state.subscribe()
    }

    /// Returns a clone of the current snapshot.
    pub fn snapshot(&self) -> DirectoryListing {
        self.state.borrow().clone()
    }

    /// Re-enumerates the directory and republishes the listing.
    ///
    /// On success the entries are replaced wholesale (sorted directories
    /// first, then case-insensitive by name) and the summary is recomputed
    /// over the visible entries. On failure the entries are cleared, the
    /// error is stored as [`LoadState::Failed`], and the previous summary
    /// is left in place, stale.
    ///
    /// If another `refresh` is issued while this one is in flight, the
    /// older completion is discarded.
    pub async fn refresh(&self) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state
            .send_modify(|listing| listing.load_state = LoadState::Loading);

        let listed = self.fs.list(&self.path).await;
        let stat = self.fs.stat(&self.path).await.ok();

        // A newer refresh owns the state now.
        if self.generation.load(Ordering::SeqCst) != generation {
            return;
        }

        match listed {
            Ok(entries) => {
                let entries = sort_entries(&entries);
                self.state.send_modify(|listing| {
                    listing.all_entries = entries;
                    listing.load_state = LoadState::Loaded;
                    let visible = filter_hidden(&listing.all_entries, listing.show_hidden);
                    listing.summary = Some(DirectorySummary::compute(
                        &visible,
                        stat.as_ref().and_then(|s: &PathStat| s.created),
                        stat.as_ref().and_then(|s: &PathStat| s.modified),
                    ));
                });
            }
            Err(err) => {
                self.state.send_modify(|listing| {
                    listing.all_entries.clear();
                    listing.load_state = LoadState::Failed(err);
                });
            }
        }
    }

    /// Flips hidden-file visibility and recomputes the summary over the
    /// newly visible population. Never re-enumerates the directory; the
    /// directory dates captured by the last refresh are reused.
    pub fn toggle_hidden_files(&self) {
        self.state.send_modify(|listing| {
            listing.show_hidden = !listing.show_hidden;
            if let Some(previous) = listing.summary.take() {
                let visible = filter_hidden(&listing.all_entries, listing.show_hidden);
                listing.summary = Some(DirectorySummary::compute(
                    &visible,
                    previous.created,
                    previous.modified,
                ));
            }
        });
    }

    /// Creates a subdirectory named `name` and refreshes on success.
    ///
    /// Errors ([`FsError::AlreadyExists`], [`FsError::PermissionDenied`],
    /// …) surface to the caller exactly as the capability reports them;
    /// on failure no state changes.
    pub async fn create_directory(&self, name: &str) -> FsResult<()> {
        self.fs.create_dir(&self.path.join(name)).await?;
        self.refresh().await;
        Ok(())
    }

    /// Creates an empty file named `name` and refreshes on success.
    ///
    /// Errors surface to the caller; on failure no state changes.
    pub async fn create_file(&self, name: &str) -> FsResult<()> {
        self.fs.create_file(&self.path.join(name)).await?;
        self.refresh().await;
        Ok(())
    }

    /// Deletes the entries whose paths appear in `ids`, best-effort.
    ///
    /// Ids that match no current entry are skipped silently. Each matched
    /// entry gets exactly one removal attempt, and a per-item
    /// [`RemoveOutcome`] is returned so partial failures of a multi-select
    /// batch are visible to the caller. The listing is refreshed afterwards
    /// regardless of individual failures.
    pub async fn delete_items(&self, ids: &[PathBuf]) -> Vec<RemoveOutcome> {
        let targets: Vec<FileEntry> = {
            let listing = self.state.borrow();
            ids.iter()
                .filter_map(|id| {
                    listing
                        .all_entries
                        .iter()
                        .find(|entry| entry.path() == id)
                        .cloned()
                })
                .collect()
        };

        let mut outcomes = Vec::with_capacity(targets.len());
        for entry in targets {
            let result = self.fs.remove(entry.path()).await;
            if let Err(err) = &result {
                tracing::warn!(path = %entry.path().display(), error = %err, "delete failed");
            }
            outcomes.push(RemoveOutcome {
                path: entry.path().to_path_buf(),
                result,
            });
        }

        self.refresh().await;
        outcomes
    }

    /// Renames the item at `path` to `new_name` within the same parent
    /// directory, refreshing on success.
    ///
    /// Fails with whatever the capability reports — notably
    /// [`FsError::AlreadyExists`] when a sibling with `new_name` exists.
    /// On failure no state changes.
    pub async fn rename_item(&self, path: &Path, new_name: &str) -> FsResult<()> {
        let parent = path
            .parent()
            .ok_or_else(|| FsError::Unknown(format!("path has no parent: {}", path.display())))?;
        self.fs.rename(path, &parent.join(new_name)).await?;
        self.refresh().await;
        Ok(())
    }
}
