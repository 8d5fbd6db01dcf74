// SPDX-License-Identifier: MPL-2.0
//! Slider configuration: snap behavior, drag feel, and overlay styling,
//! with optional persistence to a TOML file.
//!
//! Every numeric field is clamped into its documented range by
//! [`SliderConfig::sanitized`]; the top-level controller applies that
//! normalization on construction so out-of-range host values can never
//! produce degenerate animations or overlays.

pub mod defaults;

pub use defaults::*;

use crate::anim::ease::Ease;
use crate::error::Result;
use crate::render::Color;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// How the offset behaves when a drag pushes past the content edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BoundsPolicy {
    /// Hard-stop at the edges.
    Clamp,
    /// Let the content follow the pointer past an edge with resistance;
    /// the release settles it back inside the bounds.
    RubberBand,
}

/// Mapping from pointer motion to content motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DragDirection {
    /// Content follows the pointer: dragging right reveals earlier items.
    Natural,
    /// Content moves against the pointer.
    Inverted,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderConfig {
    /// Whether releasing a drag animates to the nearest item boundary.
    pub snap: bool,

    /// Base duration of the snap animation in milliseconds.
    pub snap_duration_ms: f32,

    /// Easing applied to the snap animation.
    pub easing: Ease,

    /// Width of the edge fade overlays in logical px (0 disables them).
    pub edge_fade_width: f32,

    /// Edge behavior while dragging.
    pub bounds: BoundsPolicy,

    /// Pointer-to-content direction mapping.
    pub direction: DragDirection,

    /// Whether to draw the `index / count` caption overlay.
    pub show_caption: bool,

    /// Caption text size in logical px.
    pub caption_size: f32,

    /// Release velocity (logical px/ms) treated as a fling.
    pub fling_velocity: f32,

    /// Background color, also the opaque end of the edge fades.
    pub background: Color,

    /// Solid fill drawn for items that are still loading or failed.
    pub placeholder: Color,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            snap: true,
            snap_duration_ms: DEFAULT_SNAP_DURATION_MS,
            easing: Ease::OutCubic,
            edge_fade_width: DEFAULT_EDGE_FADE_WIDTH,
            bounds: BoundsPolicy::Clamp,
            direction: DragDirection::Natural,
            show_caption: false,
            caption_size: DEFAULT_CAPTION_SIZE,
            fling_velocity: DEFAULT_FLING_VELOCITY,
            background: Color::BLACK,
            placeholder: Color::rgb(34, 34, 34),
        }
    }
}

impl SliderConfig {
    /// Returns a copy with every numeric field clamped into its valid range.
    ///
    /// Non-finite values fall back to the defaults before clamping.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        let mut config = self.clone();
        config.snap_duration_ms = clamp_or(
            config.snap_duration_ms,
            MIN_SNAP_DURATION_MS,
            MAX_SNAP_DURATION_MS,
            DEFAULT_SNAP_DURATION_MS,
        );
        config.edge_fade_width = clamp_or(
            config.edge_fade_width,
            0.0,
            MAX_EDGE_FADE_WIDTH,
            DEFAULT_EDGE_FADE_WIDTH,
        );
        config.caption_size = clamp_or(
            config.caption_size,
            MIN_CAPTION_SIZE,
            MAX_CAPTION_SIZE,
            DEFAULT_CAPTION_SIZE,
        );
        config.fling_velocity = clamp_or(
            config.fling_velocity,
            MIN_FLING_VELOCITY,
            MAX_FLING_VELOCITY,
            DEFAULT_FLING_VELOCITY,
        );
        config
    }
}

fn clamp_or(value: f32, min: f32, max: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        fallback
    }
}

/// Parses a configuration from a TOML string.
///
/// Missing fields take their defaults; the result is sanitized.
pub fn from_toml_str(content: &str) -> Result<SliderConfig> {
    let config: SliderConfig = toml::from_str(content)?;
    Ok(config.sanitized())
}

/// Serializes a configuration to a pretty TOML string.
pub fn to_toml_string(config: &SliderConfig) -> Result<String> {
    Ok(toml::to_string_pretty(config)?)
}

/// Loads a configuration from a TOML file.
pub fn load_from_path(path: &Path) -> Result<SliderConfig> {
    let content = fs::read_to_string(path)?;
    from_toml_str(&content)
}

/// Saves a configuration to a TOML file, creating parent directories.
pub fn save_to_path(config: &SliderConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = to_toml_string(config)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_config_is_already_sanitized() {
        let config = SliderConfig::default();
        let sanitized = config.sanitized();
        assert_eq!(config.snap_duration_ms, sanitized.snap_duration_ms);
        assert_eq!(config.edge_fade_width, sanitized.edge_fade_width);
        assert_eq!(config.caption_size, sanitized.caption_size);
        assert_eq!(config.fling_velocity, sanitized.fling_velocity);
    }

    #[test]
    fn sanitized_clamps_out_of_range_values() {
        let config = SliderConfig {
            snap_duration_ms: 10_000.0,
            edge_fade_width: -5.0,
            caption_size: 1.0,
            fling_velocity: 100.0,
            ..SliderConfig::default()
        };
        let sanitized = config.sanitized();
        assert_eq!(sanitized.snap_duration_ms, MAX_SNAP_DURATION_MS);
        assert_eq!(sanitized.edge_fade_width, 0.0);
        assert_eq!(sanitized.caption_size, MIN_CAPTION_SIZE);
        assert_eq!(sanitized.fling_velocity, MAX_FLING_VELOCITY);
    }

    #[test]
    fn sanitized_replaces_non_finite_values() {
        let config = SliderConfig {
            snap_duration_ms: f32::NAN,
            ..SliderConfig::default()
        };
        assert_eq!(
            config.sanitized().snap_duration_ms,
            DEFAULT_SNAP_DURATION_MS
        );
    }

    #[test]
    fn from_toml_str_fills_missing_fields_with_defaults() {
        let config = from_toml_str("snap = false\n").expect("valid toml");
        assert!(!config.snap);
        assert_eq!(config.snap_duration_ms, DEFAULT_SNAP_DURATION_MS);
        assert_eq!(config.bounds, BoundsPolicy::Clamp);
    }

    #[test]
    fn from_toml_str_parses_enums_in_kebab_case() {
        let config =
            from_toml_str("bounds = \"rubber-band\"\ndirection = \"inverted\"\n").expect("valid");
        assert_eq!(config.bounds, BoundsPolicy::RubberBand);
        assert_eq!(config.direction, DragDirection::Inverted);
    }

    #[test]
    fn from_toml_str_rejects_invalid_toml() {
        assert!(from_toml_str("snap = ").is_err());
    }

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let config = SliderConfig {
            snap: false,
            edge_fade_width: 64.0,
            show_caption: true,
            ..SliderConfig::default()
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("slider.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded.snap, config.snap);
        assert_eq!(loaded.edge_fade_width, config.edge_fade_width);
        assert_eq!(loaded.show_caption, config.show_caption);
        assert_eq!(loaded.background, config.background);
    }
}
