// SPDX-License-Identifier: MPL-2.0
//! Slider items and their decoded image resources.

pub mod cache;
pub mod loader;

pub use cache::ImageCache;
pub use loader::{FileFetcher, ImageFetcher};

use std::sync::Arc;

/// A decoded raster image: RGBA bytes plus natural dimensions.
#[derive(Debug, Clone)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    /// Unpremultiplied RGBA bytes, row-major, `width * height * 4` long.
    /// Stored in an Arc to avoid expensive cloning.
    rgba_bytes: Arc<Vec<u8>>,
}

impl ImageData {
    /// Creates a new `ImageData` from RGBA pixels.
    ///
    /// `pixels` must hold exactly `width * height * 4` bytes.
    #[must_use]
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize * 4);
        Self {
            width,
            height,
            rgba_bytes: Arc::new(pixels),
        }
    }

    /// Returns a reference to the RGBA bytes.
    pub fn rgba_bytes(&self) -> &[u8] {
        &self.rgba_bytes
    }

    /// Natural width over height, for aspect-correct layout.
    ///
    /// Returns `None` for degenerate (zero-sized) images.
    #[must_use]
    pub fn aspect_ratio(&self) -> Option<f32> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        Some(self.width as f32 / self.height as f32)
    }
}

/// Load state of a slider item.
///
/// Transitions only `Pending -> Ready` or `Pending -> Failed`, never
/// backward; a failure is terminal for its source id.
#[derive(Debug, Clone, Default)]
pub enum LoadStatus {
    #[default]
    Pending,
    Ready(Arc<ImageData>),
    Failed,
}

/// One entry of the slider's item list.
#[derive(Debug, Clone)]
pub struct SliderItem {
    source_id: String,
    status: LoadStatus,
}

impl SliderItem {
    pub(crate) fn pending(source_id: String) -> Self {
        Self {
            source_id,
            status: LoadStatus::Pending,
        }
    }

    /// The source identifier this item was requested with.
    #[must_use]
    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    /// The current load status.
    #[must_use]
    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    /// The decoded image, when ready.
    #[must_use]
    pub fn image(&self) -> Option<&Arc<ImageData>> {
        match &self.status {
            LoadStatus::Ready(image) => Some(image),
            _ => None,
        }
    }

    /// Natural pixel dimensions, when ready.
    #[must_use]
    pub fn natural_size(&self) -> Option<(u32, u32)> {
        self.image().map(|image| (image.width, image.height))
    }

    /// Whether the load is still in flight.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self.status, LoadStatus::Pending)
    }

    /// Whether the load failed (terminal).
    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self.status, LoadStatus::Failed)
    }

    pub(crate) fn set_status(&mut self, status: LoadStatus) {
        self.status = status;
    }
}
