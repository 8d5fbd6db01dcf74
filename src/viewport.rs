// SPDX-License-Identifier: MPL-2.0
//! Viewport state management
//!
//! Tracks the slider's visible box in logical pixels together with the
//! device pixel ratio, updated from the host's resize notifications.

use crate::geometry::{DevicePixels, LogicalPixels, PixelRatio};

/// A measured viewport: logical size plus device pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    /// Visible width in logical px. Always positive once observed.
    pub width: f32,

    /// Visible height in logical px. Always positive once observed.
    pub height: f32,

    /// Device pixel ratio, at least 1.
    pub pixel_ratio: PixelRatio,
}

impl ViewportState {
    /// Backing-store width in whole device pixels.
    #[must_use]
    pub fn device_width(&self) -> u32 {
        LogicalPixels(self.width).to_device(self.pixel_ratio).to_whole()
    }

    /// Backing-store height in whole device pixels.
    #[must_use]
    pub fn device_height(&self) -> u32 {
        LogicalPixels(self.height).to_device(self.pixel_ratio).to_whole()
    }

    /// Logical size recovered from a device-pixel measurement.
    #[must_use]
    pub fn logical_from_device(&self, device: DevicePixels) -> f32 {
        device.to_logical(self.pixel_ratio).0
    }
}

/// Owns the viewport measurement delivered by the host.
///
/// The state stays `None` until a measurement with positive dimensions
/// arrives; a later degenerate measurement clears it again ("not yet
/// laid out"), which makes the renderer skip frames instead of drawing
/// degenerate geometry.
#[derive(Debug, Clone, Default)]
pub struct Viewport {
    state: Option<ViewportState>,
}

impl Viewport {
    /// Applies a measurement from a resize notification.
    ///
    /// Returns `true` when the stored state changed. Cheap and
    /// idempotent: the host calls this once per notification, never per
    /// frame.
    pub fn apply_measurement(&mut self, width: f32, height: f32, pixel_ratio: f32) -> bool {
        let next = if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
            Some(ViewportState {
                width,
                height,
                pixel_ratio: PixelRatio::new(pixel_ratio),
            })
        } else {
            None
        };

        if next == self.state {
            return false;
        }
        self.state = next;
        true
    }

    /// The current measurement, or `None` before layout.
    #[must_use]
    pub fn state(&self) -> Option<&ViewportState> {
        self.state.as_ref()
    }

    /// Whether a usable measurement exists.
    #[must_use]
    pub fn is_measured(&self) -> bool {
        self.state.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    #[test]
    fn default_viewport_is_unmeasured() {
        let viewport = Viewport::default();
        assert!(!viewport.is_measured());
        assert!(viewport.state().is_none());
    }

    #[test]
    fn positive_measurement_is_stored() {
        let mut viewport = Viewport::default();
        assert!(viewport.apply_measurement(640.0, 360.0, 2.0));

        let state = viewport.state().expect("measured");
        assert_abs_diff_eq!(state.width, 640.0);
        assert_abs_diff_eq!(state.height, 360.0);
        assert_abs_diff_eq!(state.pixel_ratio.value(), 2.0);
    }

    #[test]
    fn repeated_measurement_reports_no_change() {
        let mut viewport = Viewport::default();
        assert!(viewport.apply_measurement(640.0, 360.0, 1.0));
        assert!(!viewport.apply_measurement(640.0, 360.0, 1.0));
    }

    #[test]
    fn degenerate_measurement_clears_the_state() {
        let mut viewport = Viewport::default();
        viewport.apply_measurement(640.0, 360.0, 1.0);
        assert!(viewport.apply_measurement(0.0, 360.0, 1.0));
        assert!(!viewport.is_measured());
    }

    #[test]
    fn ratio_below_one_is_clamped() {
        let mut viewport = Viewport::default();
        viewport.apply_measurement(640.0, 360.0, 0.25);
        let state = viewport.state().expect("measured");
        assert_abs_diff_eq!(state.pixel_ratio.value(), 1.0);
    }

    #[test]
    fn device_size_scales_by_the_ratio() {
        let mut viewport = Viewport::default();
        viewport.apply_measurement(640.0, 360.0, 2.0);
        let state = viewport.state().expect("measured");
        assert_eq!(state.device_width(), 1280);
        assert_eq!(state.device_height(), 720);
    }
}
