// SPDX-License-Identifier: MPL-2.0
//! Test utilities: float assertions and the shared test doubles for
//! the host collaborators (frame scheduler, drawing surface, fetcher).
//!
//! The `approx` assertion macros are re-exported here so float
//! comparisons tolerate the rounding noise that `assert_eq!` would
//! trip over.

pub use approx::{assert_abs_diff_eq, assert_abs_diff_ne, assert_relative_eq, assert_relative_ne};

use crate::anim::scheduler::{FrameRequest, FrameScheduler};
use crate::error::{Error, LoadError, Result};
use crate::geometry::Rect;
use crate::media::{ImageData, ImageFetcher, LoadStatus, SliderItem};
use crate::render::{Canvas, Color};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Condvar, Mutex};

/// Epsilon for f32 comparisons of values that should match exactly
/// but may carry accumulated rounding error.
pub const F32_EPSILON: f32 = 1e-6;

/// Epsilon for f64 comparisons, e.g. millisecond timestamps.
pub const F64_EPSILON: f64 = 1e-10;

/// Builds a `SliderItem` whose image already finished decoding.
#[must_use]
pub fn ready_item(source_id: &str, width: u32, height: u32) -> SliderItem {
    let pixels = vec![128; width as usize * height as usize * 4];
    let mut item = SliderItem::pending(source_id.to_string());
    item.set_status(LoadStatus::Ready(Arc::new(ImageData::from_rgba(
        width, height, pixels,
    ))));
    item
}

// ==========================================================================
// Frame scheduler double
// ==========================================================================

/// Deterministic [`FrameScheduler`]: grants sequential ids, remembers
/// every request and cancellation, and can be told to refuse.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    queue: Vec<FrameRequest>,
    granted: usize,
    cancelled: Vec<FrameRequest>,
    refuse: bool,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A scheduler that refuses every request.
    #[must_use]
    pub fn refusing() -> Self {
        Self {
            refuse: true,
            ..Self::default()
        }
    }

    /// Makes every future request fail.
    pub fn refuse_from_now_on(&mut self) {
        self.refuse = true;
    }

    /// Total number of granted requests.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.granted
    }

    /// Requests granted but neither fired nor cancelled yet.
    #[must_use]
    pub fn live_requests(&self) -> usize {
        self.queue.len()
    }

    /// Snapshot of the live requests.
    #[must_use]
    pub fn pending(&self) -> Vec<FrameRequest> {
        self.queue.clone()
    }

    /// Every cancellation seen so far.
    #[must_use]
    pub fn cancelled(&self) -> Vec<FrameRequest> {
        self.cancelled.clone()
    }

    /// Fires the oldest live request, handing it to the caller.
    pub fn pop_fired(&mut self) -> Option<FrameRequest> {
        if self.queue.is_empty() {
            None
        } else {
            Some(self.queue.remove(0))
        }
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> Option<FrameRequest> {
        if self.refuse {
            return None;
        }
        self.next_id += 1;
        let request = FrameRequest(self.next_id);
        self.queue.push(request);
        self.granted += 1;
        Some(request)
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        self.queue.retain(|live| *live != request);
        self.cancelled.push(request);
    }
}

// ==========================================================================
// Canvas double
// ==========================================================================

/// One recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasOp {
    SetTransform {
        scale: f32,
    },
    Clear {
        width: f32,
        height: f32,
        color: Color,
    },
    DrawImage {
        width: u32,
        height: u32,
        dest: Rect,
    },
    FillRect {
        rect: Rect,
        color: Color,
    },
    GradientH {
        rect: Rect,
        from: Color,
        to: Color,
    },
    FillText {
        text: String,
        center_x: f32,
        baseline_y: f32,
        size: f32,
        color: Color,
    },
}

/// [`Canvas`] that records operations instead of drawing.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    ops: Vec<CanvasOp>,
}

impl RecordingCanvas {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every operation in submission order.
    #[must_use]
    pub fn ops(&self) -> &[CanvasOp] {
        &self.ops
    }

    /// Number of images drawn.
    #[must_use]
    pub fn image_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, CanvasOp::DrawImage { .. }))
            .count()
    }

    /// Number of solid fills in the given color.
    #[must_use]
    pub fn fill_count(&self, color: Color) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, CanvasOp::FillRect { color: c, .. } if *c == color))
            .count()
    }

    /// Number of gradient fills.
    #[must_use]
    pub fn gradient_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, CanvasOp::GradientH { .. }))
            .count()
    }

    /// Every text drawn, in order.
    #[must_use]
    pub fn texts(&self) -> Vec<String> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                CanvasOp::FillText { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    /// Dimensions of the most recent clear.
    #[must_use]
    pub fn clear_dimensions(&self) -> Option<(f32, f32)> {
        self.ops.iter().rev().find_map(|op| match op {
            CanvasOp::Clear { width, height, .. } => Some((*width, *height)),
            _ => None,
        })
    }
}

impl Canvas for RecordingCanvas {
    fn set_transform(&mut self, scale: f32) {
        self.ops.push(CanvasOp::SetTransform { scale });
    }

    fn clear(&mut self, width: f32, height: f32, color: Color) {
        self.ops.push(CanvasOp::Clear {
            width,
            height,
            color,
        });
    }

    fn draw_image(&mut self, image: &ImageData, dest: Rect) {
        self.ops.push(CanvasOp::DrawImage {
            width: image.width,
            height: image.height,
            dest,
        });
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ops.push(CanvasOp::FillRect { rect, color });
    }

    fn fill_gradient_h(&mut self, rect: Rect, from: Color, to: Color) {
        self.ops.push(CanvasOp::GradientH { rect, from, to });
    }

    fn fill_text(&mut self, text: &str, center_x: f32, baseline_y: f32, size: f32, color: Color) {
        self.ops.push(CanvasOp::FillText {
            text: text.to_string(),
            center_x,
            baseline_y,
            size,
            color,
        });
    }
}

// ==========================================================================
// Fetcher doubles
// ==========================================================================

/// Fetcher resolving every id to a solid image of a fixed size.
#[derive(Debug, Clone, Copy)]
pub struct FixedSizeFetcher {
    width: u32,
    height: u32,
}

impl FixedSizeFetcher {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl ImageFetcher for FixedSizeFetcher {
    fn fetch(&self, _source_id: &str) -> Result<ImageData> {
        let pixels = vec![200; self.width as usize * self.height as usize * 4];
        Ok(ImageData::from_rgba(self.width, self.height, pixels))
    }
}

/// [`FixedSizeFetcher`] that also counts underlying fetches.
#[derive(Debug)]
pub struct CountingFetcher {
    inner: FixedSizeFetcher,
    count: AtomicUsize,
}

impl CountingFetcher {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            inner: FixedSizeFetcher::new(width, height),
            count: AtomicUsize::new(0),
        }
    }

    /// How many fetches actually ran.
    #[must_use]
    pub fn fetch_count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

impl ImageFetcher for CountingFetcher {
    fn fetch(&self, source_id: &str) -> Result<ImageData> {
        self.count.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch(source_id)
    }
}

/// Fetcher that fails every request.
#[derive(Debug, Clone, Copy)]
pub struct FailingFetcher;

impl ImageFetcher for FailingFetcher {
    fn fetch(&self, source_id: &str) -> Result<ImageData> {
        Err(Error::Load(LoadError::Other(format!(
            "no decoder for {}",
            source_id
        ))))
    }
}

/// [`FixedSizeFetcher`] whose fetches block until [`release`] is
/// called, keeping items observably pending.
///
/// [`release`]: GatedFetcher::release
#[derive(Debug)]
pub struct GatedFetcher {
    inner: FixedSizeFetcher,
    gate: Arc<(Mutex<bool>, Condvar)>,
}

impl GatedFetcher {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            inner: FixedSizeFetcher::new(width, height),
            gate: Arc::new((Mutex::new(false), Condvar::new())),
        }
    }

    /// Lets every blocked and future fetch proceed.
    pub fn release(&self) {
        let (flag, condvar) = &*self.gate;
        *flag.lock().expect("gate poisoned") = true;
        condvar.notify_all();
    }
}

impl ImageFetcher for GatedFetcher {
    fn fetch(&self, source_id: &str) -> Result<ImageData> {
        let (flag, condvar) = &*self.gate;
        let mut released = flag.lock().expect("gate poisoned");
        while !*released {
            released = condvar.wait(released).expect("gate poisoned");
        }
        drop(released);
        self.inner.fetch(source_id)
    }
}
