// SPDX-License-Identifier: MPL-2.0
//! Image fetching: the host's decode facility behind a trait, plus the
//! built-in filesystem implementation.

use crate::error::Result;
use crate::media::ImageData;
use std::fs;
use std::path::PathBuf;

/// The host's synchronous image-decoding facility.
///
/// [`ImageCache`](crate::media::ImageCache) runs `fetch` on a blocking
/// task, so implementations may do real I/O. A returned error marks the
/// item as failed; the cache never retries a source id on its own.
pub trait ImageFetcher: Send + Sync {
    fn fetch(&self, source_id: &str) -> Result<ImageData>;
}

/// Fetcher that treats source ids as filesystem paths.
///
/// Supports the common raster formats (PNG, JPEG, GIF, WebP, BMP).
#[derive(Debug, Clone, Default)]
pub struct FileFetcher {
    base_dir: Option<PathBuf>,
}

impl FileFetcher {
    /// Creates a fetcher resolving source ids as-is.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a fetcher resolving source ids relative to `base_dir`.
    #[must_use]
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(base_dir.into()),
        }
    }

    fn resolve(&self, source_id: &str) -> PathBuf {
        match &self.base_dir {
            Some(base) => base.join(source_id),
            None => PathBuf::from(source_id),
        }
    }
}

impl ImageFetcher for FileFetcher {
    fn fetch(&self, source_id: &str) -> Result<ImageData> {
        let path = self.resolve(source_id);
        let bytes = fs::read(&path)?;

        let decoded = image::load_from_memory(&bytes)?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();

        Ok(ImageData::from_rgba(width, height, rgba.into_vec()))
    }
}
