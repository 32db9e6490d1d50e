//! Default thumbnail renderer backed by the `image` crate.

use std::path::Path;

use async_trait::async_trait;
use image::DynamicImage;

use crate::error::{FsError, FsResult};
use crate::thumb::ThumbnailCapability;

/// Renders thumbnails by decoding the file and downscaling it.
///
/// Decoding runs on a blocking thread so the caller's task never stalls on
/// CPU-bound work. Aspect ratio is preserved; the result fits within
/// `target_size × display_scale` pixels.
#[derive(Debug, Default, Clone)]
pub struct ImageThumbnailer;

impl ImageThumbnailer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ThumbnailCapability for ImageThumbnailer {
    async fn generate(
        &self,
        path: &Path,
        target_size: (u32, u32),
        display_scale: f32,
    ) -> FsResult<DynamicImage> {
        let path = path.to_path_buf();
        let width = scaled_dimension(target_size.0, display_scale);
        let height = scaled_dimension(target_size.1, display_scale);

        tokio::task::spawn_blocking(move || {
            let decoded = image::open(&path).map_err(|err| match err {
                image::ImageError::IoError(io) => FsError::from_io(&path, io),
                other => FsError::Unknown(other.to_string()),
            })?;
            Ok(decoded.thumbnail(width, height))
        })
        .await
        .map_err(|err| FsError::Unknown(format!("thumbnail task failed: {err}")))?
    }
}

fn scaled_dimension(points: u32, scale: f32) -> u32 {
    ((points as f32 * scale).round() as u32).max(1)
}
