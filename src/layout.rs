// SPDX-License-Identifier: MPL-2.0
//! Content layout math: item spans, scroll bounds, and snap targets.
//!
//! Everything here is pure arithmetic over the item list and the
//! current viewport; the drag controller, snap animator, and renderer
//! all read the same span/boundary data so they can never disagree
//! about where items sit.

use crate::media::SliderItem;
use crate::viewport::ViewportState;

/// Tolerance when deciding whether a boundary is "beyond" an offset.
const SNAP_EPSILON: f32 = 1e-3;

/// Horizontal extent of one item in content coordinates (logical px).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemSpan {
    pub start: f32,
    pub width: f32,
}

impl ItemSpan {
    /// Exclusive right edge of the span.
    #[must_use]
    pub fn end(&self) -> f32 {
        self.start + self.width
    }
}

/// Lays the items out left to right and returns their spans.
///
/// A ready item is height-fit: display height equals the viewport
/// height and width follows the natural aspect ratio. Items that are
/// still pending, failed, or degenerate occupy one full viewport width
/// as a placeholder slot.
#[must_use]
pub fn item_spans(items: &[&SliderItem], viewport: &ViewportState) -> Vec<ItemSpan> {
    let mut spans = Vec::with_capacity(items.len());
    let mut cursor = 0.0;
    for item in items {
        let width = match item.image().and_then(|image| image.aspect_ratio()) {
            Some(aspect) => viewport.height * aspect,
            None => viewport.width,
        };
        spans.push(ItemSpan {
            start: cursor,
            width,
        });
        cursor += width;
    }
    spans
}

/// Total content width covered by the spans.
#[must_use]
pub fn total_width(spans: &[ItemSpan]) -> f32 {
    spans.last().map_or(0.0, ItemSpan::end)
}

/// Largest reachable offset: content width minus one viewport, floored
/// at zero when the content fits.
#[must_use]
pub fn max_offset(spans: &[ItemSpan], viewport: &ViewportState) -> f32 {
    (total_width(spans) - viewport.width).max(0.0)
}

/// The offsets a snap may settle on: item start positions clamped into
/// the reachable range, deduplicated, ascending. Never empty.
#[must_use]
pub fn boundaries(spans: &[ItemSpan], max_offset: f32) -> Vec<f32> {
    let mut result = vec![0.0];
    for span in spans {
        let boundary = span.start.min(max_offset);
        if boundary > result.last().copied().unwrap_or(0.0) + SNAP_EPSILON {
            result.push(boundary);
        }
    }
    result
}

/// Index of the item whose span contains the content position `x`.
///
/// Positions left of the first span report the first item, positions
/// past the last span the last item.
#[must_use]
pub fn index_at(spans: &[ItemSpan], x: f32) -> Option<usize> {
    if spans.is_empty() {
        return None;
    }
    let mut index = 0;
    for (i, span) in spans.iter().enumerate() {
        if x >= span.start {
            index = i;
        } else {
            break;
        }
    }
    Some(index)
}

/// Picks the boundary a released drag settles on.
///
/// Below the fling threshold the nearest boundary by absolute distance
/// wins, with exact ties going to the lower boundary. At or above the
/// threshold the offset advances to the next boundary strictly in the
/// travel direction; when none exists the rule falls back to nearest.
/// The threshold is a tunable policy, not a contract.
#[must_use]
pub fn snap_target(offset: f32, velocity: f32, boundaries: &[f32], fling_velocity: f32) -> f32 {
    let Some(&first) = boundaries.first() else {
        return offset.max(0.0);
    };

    if velocity.abs() >= fling_velocity {
        let flung = if velocity > 0.0 {
            boundaries
                .iter()
                .find(|&&boundary| boundary > offset + SNAP_EPSILON)
        } else {
            boundaries
                .iter()
                .rev()
                .find(|&&boundary| boundary < offset - SNAP_EPSILON)
        };
        if let Some(&target) = flung {
            return target;
        }
    }

    let mut best = first;
    let mut best_distance = (offset - first).abs();
    for &boundary in &boundaries[1..] {
        let distance = (offset - boundary).abs();
        if distance < best_distance {
            best = boundary;
            best_distance = distance;
        }
    }
    best
}
