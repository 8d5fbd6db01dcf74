// SPDX-License-Identifier: MPL-2.0
//! Frame rendering: the drawing-surface abstraction and the paint pass
//! that lays a frame onto it.

pub mod pixmap;

pub use pixmap::PixmapCanvas;

use crate::config::defaults::CAPTION_BASELINE_INSET;
use crate::config::SliderConfig;
use crate::geometry::Rect;
use crate::layout;
use crate::media::{ImageData, SliderItem};
use crate::viewport::ViewportState;
use serde::{Deserialize, Serialize};

/// An RGBA color with 8 bits per channel, unpremultiplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    /// An opaque color.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// A color with an explicit alpha.
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// The same color with a different alpha.
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

/// Caption overlay color.
const CAPTION_COLOR: Color = Color::WHITE;

/// The drawing surface the renderer paints onto.
///
/// All coordinates are logical px; implementations apply the device
/// scale set by [`set_transform`](Canvas::set_transform) so strokes and
/// images stay crisp on high-density displays.
pub trait Canvas {
    /// Sets the logical-to-device scale for subsequent operations.
    fn set_transform(&mut self, scale: f32);

    /// Clears the whole surface to `color`.
    fn clear(&mut self, width: f32, height: f32, color: Color);

    /// Draws a decoded image into `dest`, scaling as needed.
    fn draw_image(&mut self, image: &ImageData, dest: Rect);

    /// Fills a rectangle with a solid color.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Fills a rectangle with a horizontal gradient from the left
    /// edge's color to the right edge's.
    fn fill_gradient_h(&mut self, rect: Rect, from: Color, to: Color);

    /// Draws one line of text centered on `center_x`, with its
    /// baseline at `baseline_y`.
    fn fill_text(&mut self, text: &str, center_x: f32, baseline_y: f32, size: f32, color: Color);
}

/// Paints slider frames from the current offset, viewport, and items.
///
/// Rendering is idempotent and side-effect-free beyond the canvas: it
/// reads state and never mutates it, so it can run any number of times
/// per state change.
#[derive(Debug, Clone, Copy)]
pub struct Renderer<'a> {
    config: &'a SliderConfig,
}

impl<'a> Renderer<'a> {
    #[must_use]
    pub fn new(config: &'a SliderConfig) -> Self {
        Self { config }
    }

    /// Draws one frame. Returns `false` (and touches nothing) while the
    /// viewport is unmeasured.
    pub fn paint(
        &self,
        canvas: &mut dyn Canvas,
        viewport: Option<&ViewportState>,
        offset: f32,
        items: &[&SliderItem],
    ) -> bool {
        let Some(viewport) = viewport else {
            return false;
        };

        canvas.set_transform(viewport.pixel_ratio.value());
        canvas.clear(viewport.width, viewport.height, self.config.background);

        let spans = layout::item_spans(items, viewport);
        let window = Rect::new(0.0, 0.0, viewport.width, viewport.height);

        for (item, span) in items.iter().zip(&spans) {
            let dest = Rect::new(span.start - offset, 0.0, span.width, viewport.height);
            if !dest.intersects(&window) {
                continue;
            }
            match item.image() {
                Some(image) if image.aspect_ratio().is_some() => canvas.draw_image(image, dest),
                _ => canvas.fill_rect(dest, self.config.placeholder),
            }
        }

        self.paint_edge_fades(canvas, viewport, offset, &spans);

        if self.config.show_caption {
            if let Some(index) = layout::index_at(&spans, offset + viewport.width / 2.0) {
                let text = format!("{} / {}", index + 1, items.len());
                canvas.fill_text(
                    &text,
                    viewport.width / 2.0,
                    viewport.height - CAPTION_BASELINE_INSET,
                    self.config.caption_size,
                    CAPTION_COLOR,
                );
            }
        }

        true
    }

    /// Gradient overlays at whichever edges content extends beyond.
    fn paint_edge_fades(
        &self,
        canvas: &mut dyn Canvas,
        viewport: &ViewportState,
        offset: f32,
        spans: &[layout::ItemSpan],
    ) {
        let fade = self.config.edge_fade_width.min(viewport.width / 2.0);
        if fade <= 0.0 {
            return;
        }

        let opaque = self.config.background;
        let transparent = opaque.with_alpha(0);
        let max = layout::max_offset(spans, viewport);

        if offset > 0.0 {
            let rect = Rect::new(0.0, 0.0, fade, viewport.height);
            canvas.fill_gradient_h(rect, opaque, transparent);
        }
        if offset < max {
            let rect = Rect::new(viewport.width - fade, 0.0, fade, viewport.height);
            canvas.fill_gradient_h(rect, transparent, opaque);
        }
    }
}
