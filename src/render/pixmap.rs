// SPDX-License-Identifier: MPL-2.0
//! Software canvas backend
//!
//! Rasterizes frames into a tiny-skia pixmap sized in device pixels,
//! so the backing store matches the display density while the renderer
//! keeps issuing logical-pixel operations. Caption text is rasterized
//! with fontdue when the embedder supplies a font; without one the
//! text op is a no-op (a raster surface cannot conjure glyphs).

use crate::error::{Error, Result};
use crate::geometry::Rect;
use crate::media::ImageData;
use crate::render::{Canvas, Color};
use crate::viewport::ViewportState;
use tiny_skia::{
    FilterQuality, GradientStop, IntSize, LinearGradient, Paint, Pixmap, PixmapPaint, Point,
    SpreadMode, Transform,
};
use tracing::trace;

/// [`Canvas`] drawing into an owned RGBA pixmap.
pub struct PixmapCanvas {
    pixmap: Pixmap,
    scale: f32,
    font: Option<fontdue::Font>,
}

impl PixmapCanvas {
    /// Allocates a backing store for the measured viewport.
    ///
    /// Fails with [`Error::Render`] when the device size is zero.
    pub fn new(viewport: &ViewportState) -> Result<Self> {
        let width = viewport.device_width();
        let height = viewport.device_height();
        let pixmap = Pixmap::new(width, height)
            .ok_or_else(|| Error::Render("zero-sized drawing surface".to_string()))?;
        Ok(Self {
            pixmap,
            scale: viewport.pixel_ratio.value(),
            font: None,
        })
    }

    /// Enables caption text using the given TTF/OTF font bytes.
    pub fn with_font(mut self, font_bytes: &[u8]) -> Result<Self> {
        let font = fontdue::Font::from_bytes(font_bytes, fontdue::FontSettings::default())
            .map_err(|e| Error::Render(e.to_string()))?;
        self.font = Some(font);
        Ok(self)
    }

    /// The finished frame.
    #[must_use]
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Consumes the canvas, returning the frame.
    #[must_use]
    pub fn into_pixmap(self) -> Pixmap {
        self.pixmap
    }

    fn device_rect(&self, rect: Rect) -> Option<tiny_skia::Rect> {
        tiny_skia::Rect::from_xywh(
            rect.x * self.scale,
            rect.y * self.scale,
            rect.width * self.scale,
            rect.height * self.scale,
        )
    }
}

impl Canvas for PixmapCanvas {
    fn set_transform(&mut self, scale: f32) {
        self.scale = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            1.0
        };
    }

    fn clear(&mut self, _width: f32, _height: f32, color: Color) {
        self.pixmap.fill(to_sk_color(color));
    }

    fn draw_image(&mut self, image: &ImageData, dest: Rect) {
        if dest.width <= 0.0 || dest.height <= 0.0 {
            return;
        }
        let Some(source) = image_to_pixmap(image) else {
            return;
        };

        let sx = dest.width * self.scale / image.width as f32;
        let sy = dest.height * self.scale / image.height as f32;
        let transform = Transform::from_row(
            sx,
            0.0,
            0.0,
            sy,
            dest.x * self.scale,
            dest.y * self.scale,
        );

        let paint = PixmapPaint {
            quality: FilterQuality::Bilinear,
            ..PixmapPaint::default()
        };
        self.pixmap
            .draw_pixmap(0, 0, source.as_ref(), &paint, transform, None);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let Some(rect) = self.device_rect(rect) else {
            return;
        };
        let mut paint = Paint::default();
        paint.set_color(to_sk_color(color));
        paint.anti_alias = false;
        self.pixmap
            .fill_rect(rect, &paint, Transform::identity(), None);
    }

    fn fill_gradient_h(&mut self, rect: Rect, from: Color, to: Color) {
        let Some(rect) = self.device_rect(rect) else {
            return;
        };
        let Some(shader) = LinearGradient::new(
            Point::from_xy(rect.left(), rect.top()),
            Point::from_xy(rect.right(), rect.top()),
            vec![
                GradientStop::new(0.0, to_sk_color(from)),
                GradientStop::new(1.0, to_sk_color(to)),
            ],
            SpreadMode::Pad,
            Transform::identity(),
        ) else {
            return;
        };

        let mut paint = Paint::default();
        paint.shader = shader;
        paint.anti_alias = false;
        self.pixmap
            .fill_rect(rect, &paint, Transform::identity(), None);
    }

    fn fill_text(&mut self, text: &str, center_x: f32, baseline_y: f32, size: f32, color: Color) {
        let Some(font) = self.font.as_ref() else {
            trace!("caption skipped: no font configured");
            return;
        };

        let px_size = size * self.scale;
        let glyphs: Vec<_> = text
            .chars()
            .map(|ch| font.rasterize(ch, px_size))
            .collect();
        let total_advance: f32 = glyphs.iter().map(|(metrics, _)| metrics.advance_width).sum();

        let mut pen_x = center_x * self.scale - total_advance / 2.0;
        let baseline = baseline_y * self.scale;
        for (metrics, coverage) in &glyphs {
            let left = (pen_x + metrics.xmin as f32).round() as i32;
            let top = (baseline - metrics.height as f32 - metrics.ymin as f32).round() as i32;
            blend_glyph(
                &mut self.pixmap,
                coverage,
                metrics.width,
                metrics.height,
                left,
                top,
                color,
            );
            pen_x += metrics.advance_width;
        }
    }
}

fn to_sk_color(color: Color) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(color.r, color.g, color.b, color.a)
}

/// Converts unpremultiplied RGBA bytes into a premultiplied pixmap.
fn image_to_pixmap(image: &ImageData) -> Option<Pixmap> {
    let size = IntSize::from_wh(image.width, image.height)?;
    let expected = image.width as usize * image.height as usize * 4;
    if image.rgba_bytes().len() != expected {
        return None;
    }

    let mut data = image.rgba_bytes().to_vec();
    for pixel in data.chunks_exact_mut(4) {
        let alpha = pixel[3] as u16;
        if alpha < 255 {
            pixel[0] = ((pixel[0] as u16 * alpha) / 255) as u8;
            pixel[1] = ((pixel[1] as u16 * alpha) / 255) as u8;
            pixel[2] = ((pixel[2] as u16 * alpha) / 255) as u8;
        }
    }
    Pixmap::from_vec(data, size)
}

/// Source-over blend of a coverage mask in `color` onto the pixmap.
fn blend_glyph(
    pixmap: &mut Pixmap,
    coverage: &[u8],
    glyph_width: usize,
    glyph_height: usize,
    left: i32,
    top: i32,
    color: Color,
) {
    let width = pixmap.width() as i32;
    let height = pixmap.height() as i32;
    let data = pixmap.data_mut();

    for row in 0..glyph_height as i32 {
        let y = top + row;
        if y < 0 || y >= height {
            continue;
        }
        for col in 0..glyph_width as i32 {
            let x = left + col;
            if x < 0 || x >= width {
                continue;
            }
            let cover = coverage[(row * glyph_width as i32 + col) as usize] as u32;
            if cover == 0 {
                continue;
            }

            let alpha = cover * color.a as u32 / 255;
            let inverse = 255 - alpha;
            let index = ((y * width + x) * 4) as usize;

            data[index] = (color.r as u32 * alpha / 255 + data[index] as u32 * inverse / 255) as u8;
            data[index + 1] =
                (color.g as u32 * alpha / 255 + data[index + 1] as u32 * inverse / 255) as u8;
            data[index + 2] =
                (color.b as u32 * alpha / 255 + data[index + 2] as u32 * inverse / 255) as u8;
            data[index + 3] = (alpha + data[index + 3] as u32 * inverse / 255) as u8;
        }
    }
}
