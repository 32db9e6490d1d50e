//! Per-file thumbnail loading state.
//!
//! A [`ThumbnailAdapter`] is created per visible file item. It issues at
//! most one in-flight request to a [`ThumbnailCapability`] and publishes the
//! outcome as observable state. There is no cache across adapters and no
//! retry: once settled in [`ThumbnailState::Unavailable`], a caller cannot
//! tell a missing preview from a transient failure — the error detail is
//! logged and dropped.

pub mod render;

use std::sync::Arc;

use async_trait::async_trait;
use image::DynamicImage;
use tokio::sync::watch;

use crate::error::FsResult;
use crate::fs::entry::FileEntry;

/// Lifecycle of a single thumbnail request.
#[derive(Debug, Clone)]
pub enum ThumbnailState {
    /// No request issued yet.
    Idle,
    /// A request is in flight.
    Loading,
    /// A rendered preview is available.
    Ready(Arc<DynamicImage>),
    /// No preview will be produced; terminal.
    Unavailable,
}

impl ThumbnailState {
    /// Returns `true` while a request is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self, ThumbnailState::Loading)
    }

    /// Returns the rendered image, if one is ready.
    pub fn image(&self) -> Option<&Arc<DynamicImage>> {
        match self {
            ThumbnailState::Ready(image) => Some(image),
            _ => None,
        }
    }
}

/// The external thumbnail-rendering service the adapter delegates to.
#[async_trait]
pub trait ThumbnailCapability: Send + Sync {
    /// Renders the best available preview of the file at `path`, sized for
    /// `target_size` points at `display_scale` pixels per point.
    async fn generate(
        &self,
        path: &std::path::Path,
        target_size: (u32, u32),
        display_scale: f32,
    ) -> FsResult<DynamicImage>;
}

/// Observable thumbnail state for one file item.
pub struct ThumbnailAdapter<T: ThumbnailCapability> {
    capability: Arc<T>,
    state: watch::Sender<ThumbnailState>,
}

impl<T: ThumbnailCapability> ThumbnailAdapter<T> {
    /// Creates an adapter in [`ThumbnailState::Idle`].
    pub fn new(capability: Arc<T>) -> Self {
        let (state, _) = watch::channel(ThumbnailState::Idle);
        Self { capability, state }
    }

    /// Subscribes to state changes.
    pub fn subscribe(&self) -> watch::Receiver<ThumbnailState> {
        self.state.subscribe()
    }

    /// Returns a clone of the current state.
    pub fn snapshot(&self) -> ThumbnailState {
        self.state.borrow().clone()
    }

    /// Requests a preview for `entry`.
    ///
    /// No-op while a request is already in flight. Directories never get a
    /// request issued at all: the state moves straight to
    /// [`ThumbnailState::Unavailable`]. Failures from the capability are
    /// logged and collapse into `Unavailable` as well.
    pub async fn load(&self, entry: &FileEntry, target_size: (u32, u32), display_scale: f32) {
        if entry.is_dir() {
            self.state.send_replace(ThumbnailState::Unavailable);
            return;
        }
        if self.state.borrow().is_loading() {
            return;
        }
        self.state.send_replace(ThumbnailState::Loading);

        match self
            .capability
            .generate(entry.path(), target_size, display_scale)
            .await
        {
            Ok(image) => {
                self.state
                    .send_replace(ThumbnailState::Ready(Arc::new(image)));
            }
            Err(err) => {
                tracing::warn!(
                    path = %entry.path().display(),
                    error = %err,
                    "thumbnail generation failed"
                );
                self.state.send_replace(ThumbnailState::Unavailable);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    use crate::error::FsError;

    fn file_entry(name: &str) -> FileEntry {
        FileEntry::from_parts(PathBuf::from("/d").join(name), false, Some(1), None)
    }

    fn dir_entry(name: &str) -> FileEntry {
        FileEntry::from_parts(PathBuf::from("/d").join(name), true, None, None)
    }

    /// Counts `generate` calls; behavior is scripted per test.
    struct CountingThumbnailer {
        calls: AtomicUsize,
        fail: bool,
        stall: Option<Notify>,
    }

    impl CountingThumbnailer {
        fn succeeding() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail: false,
                stall: None,
            }
        }

        fn failing() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail: true,
                stall: None,
            }
        }

        fn stalling() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail: false,
                stall: Some(Notify::new()),
            }
        }
    }

    #[async_trait]
    impl ThumbnailCapability for CountingThumbnailer {
        async fn generate(
            &self,
            path: &Path,
            _target_size: (u32, u32),
            _display_scale: f32,
        ) -> FsResult<DynamicImage> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(stall) = &self.stall {
                stall.notified().await;
            }
            if self.fail {
                Err(FsError::NotFound(path.to_path_buf()))
            } else {
                Ok(DynamicImage::new_rgba8(2, 2))
            }
        }
    }

    #[tokio::test]
    async fn successful_load_becomes_ready() {
        let capability = Arc::new(CountingThumbnailer::succeeding());
        let adapter = ThumbnailAdapter::new(capability.clone());
        assert!(matches!(adapter.snapshot(), ThumbnailState::Idle));

        adapter.load(&file_entry("pic.png"), (256, 256), 2.0).await;

        assert!(adapter.snapshot().image().is_some());
        assert_eq!(capability.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failure_collapses_to_unavailable() {
        let capability = Arc::new(CountingThumbnailer::failing());
        let adapter = ThumbnailAdapter::new(capability);

        adapter.load(&file_entry("pic.png"), (256, 256), 1.0).await;

        assert!(matches!(adapter.snapshot(), ThumbnailState::Unavailable));
    }

    #[tokio::test]
    async fn directories_never_issue_a_request() {
        let capability = Arc::new(CountingThumbnailer::succeeding());
        let adapter = ThumbnailAdapter::new(capability.clone());

        adapter.load(&dir_entry("Documents"), (256, 256), 1.0).await;

        assert!(matches!(adapter.snapshot(), ThumbnailState::Unavailable));
        assert_eq!(capability.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn concurrent_load_is_a_noop() {
        let capability = Arc::new(CountingThumbnailer::stalling());
        let adapter = Arc::new(ThumbnailAdapter::new(capability.clone()));

        let first = {
            let adapter = adapter.clone();
            tokio::spawn(async move {
                adapter.load(&file_entry("pic.png"), (128, 128), 1.0).await;
            })
        };
        while capability.calls.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }

        // Second load while the first is in flight: must not re-request.
        adapter.load(&file_entry("pic.png"), (128, 128), 1.0).await;
        assert_eq!(capability.calls.load(Ordering::SeqCst), 1);

        capability.stall.as_ref().unwrap().notify_one();
        first.await.unwrap();
        assert!(adapter.snapshot().image().is_some());
    }

    #[tokio::test]
    async fn subscribers_observe_transition() {
        let capability = Arc::new(CountingThumbnailer::succeeding());
        let adapter = ThumbnailAdapter::new(capability);
        let mut rx = adapter.subscribe();

        adapter.load(&file_entry("pic.png"), (64, 64), 1.0).await;

        rx.changed().await.unwrap();
        let settled = rx.borrow_and_update().clone();
        assert!(settled.image().is_some());
    }
}
