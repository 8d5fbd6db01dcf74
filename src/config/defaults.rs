// SPDX-License-Identifier: MPL-2.0
//! Default values for the slider's configuration constants.
//!
//! Single source of truth for the defaults and their MIN/MAX bounds,
//! grouped by category.
//!
//! # Categories
//!
//! - **Snap**: release animation duration and travel extension
//! - **Drag**: velocity estimation and bounds resistance
//! - **Fade**: edge fade overlay width
//! - **Caption**: index/caption overlay sizing

// ==========================================================================
// Snap Defaults
// ==========================================================================

/// Default base duration of the snap animation (milliseconds).
pub const DEFAULT_SNAP_DURATION_MS: f32 = 280.0;

/// Minimum allowed base snap duration.
pub const MIN_SNAP_DURATION_MS: f32 = 80.0;

/// Maximum allowed base snap duration.
pub const MAX_SNAP_DURATION_MS: f32 = 800.0;

/// Extra duration per square-root pixel of travel distance (ms/√px).
///
/// Long snaps get proportionally more time so they never look
/// instantaneous, while short corrections stay close to the base.
pub const SNAP_DISTANCE_EXTENSION_MS: f32 = 6.0;

/// Hard upper bound on the extended snap duration (milliseconds).
pub const SNAP_DURATION_CAP_MS: f32 = 1200.0;

// ==========================================================================
// Drag Defaults
// ==========================================================================

/// Weight of the newest displacement sample in the velocity estimate.
///
/// `velocity = velocity + (sample - velocity) * VELOCITY_SMOOTHING`
pub const VELOCITY_SMOOTHING: f32 = 0.8;

/// Default release velocity (logical px/ms) treated as a fling.
pub const DEFAULT_FLING_VELOCITY: f32 = 0.5;

/// Minimum allowed fling velocity threshold.
pub const MIN_FLING_VELOCITY: f32 = 0.05;

/// Maximum allowed fling velocity threshold.
pub const MAX_FLING_VELOCITY: f32 = 10.0;

/// Fraction of the overshoot kept when rubber-banding past an edge.
pub const RUBBER_BAND_RESISTANCE: f32 = 0.45;

// ==========================================================================
// Fade Defaults
// ==========================================================================

/// Default width of the edge fade overlays (logical px). Zero disables them.
pub const DEFAULT_EDGE_FADE_WIDTH: f32 = 48.0;

/// Maximum allowed edge fade width.
pub const MAX_EDGE_FADE_WIDTH: f32 = 256.0;

// ==========================================================================
// Caption Defaults
// ==========================================================================

/// Default caption text size (logical px).
pub const DEFAULT_CAPTION_SIZE: f32 = 14.0;

/// Minimum allowed caption text size.
pub const MIN_CAPTION_SIZE: f32 = 6.0;

/// Maximum allowed caption text size.
pub const MAX_CAPTION_SIZE: f32 = 72.0;

/// Distance between the caption baseline and the bottom edge (logical px).
pub const CAPTION_BASELINE_INSET: f32 = 12.0;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    // Snap validation
    assert!(MIN_SNAP_DURATION_MS > 0.0);
    assert!(MIN_SNAP_DURATION_MS < DEFAULT_SNAP_DURATION_MS);
    assert!(MAX_SNAP_DURATION_MS > DEFAULT_SNAP_DURATION_MS);
    assert!(SNAP_DISTANCE_EXTENSION_MS >= 0.0);
    assert!(SNAP_DURATION_CAP_MS >= MAX_SNAP_DURATION_MS);

    // Drag validation
    assert!(VELOCITY_SMOOTHING > 0.0);
    assert!(VELOCITY_SMOOTHING <= 1.0);
    assert!(MIN_FLING_VELOCITY > 0.0);
    assert!(MAX_FLING_VELOCITY > MIN_FLING_VELOCITY);
    assert!(DEFAULT_FLING_VELOCITY >= MIN_FLING_VELOCITY);
    assert!(DEFAULT_FLING_VELOCITY <= MAX_FLING_VELOCITY);
    assert!(RUBBER_BAND_RESISTANCE > 0.0);
    assert!(RUBBER_BAND_RESISTANCE < 1.0);

    // Fade validation
    assert!(DEFAULT_EDGE_FADE_WIDTH >= 0.0);
    assert!(MAX_EDGE_FADE_WIDTH >= DEFAULT_EDGE_FADE_WIDTH);

    // Caption validation
    assert!(MIN_CAPTION_SIZE > 0.0);
    assert!(MAX_CAPTION_SIZE > MIN_CAPTION_SIZE);
    assert!(DEFAULT_CAPTION_SIZE >= MIN_CAPTION_SIZE);
    assert!(DEFAULT_CAPTION_SIZE <= MAX_CAPTION_SIZE);
    assert!(CAPTION_BASELINE_INSET >= 0.0);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snap_defaults_are_valid() {
        assert_eq!(DEFAULT_SNAP_DURATION_MS, 280.0);
        assert!(MIN_SNAP_DURATION_MS < DEFAULT_SNAP_DURATION_MS);
        assert!(MAX_SNAP_DURATION_MS > DEFAULT_SNAP_DURATION_MS);
        assert!(SNAP_DURATION_CAP_MS >= MAX_SNAP_DURATION_MS);
    }

    #[test]
    fn fling_defaults_are_valid() {
        assert_eq!(DEFAULT_FLING_VELOCITY, 0.5);
        assert!(DEFAULT_FLING_VELOCITY >= MIN_FLING_VELOCITY);
        assert!(DEFAULT_FLING_VELOCITY <= MAX_FLING_VELOCITY);
    }

    #[test]
    fn fade_defaults_are_valid() {
        assert_eq!(DEFAULT_EDGE_FADE_WIDTH, 48.0);
        assert!(DEFAULT_EDGE_FADE_WIDTH <= MAX_EDGE_FADE_WIDTH);
    }

    #[test]
    fn caption_defaults_are_valid() {
        assert_eq!(DEFAULT_CAPTION_SIZE, 14.0);
        assert!(DEFAULT_CAPTION_SIZE >= MIN_CAPTION_SIZE);
        assert!(DEFAULT_CAPTION_SIZE <= MAX_CAPTION_SIZE);
    }
}
