// SPDX-License-Identifier: MPL-2.0
//! Snap animator
//!
//! Drives the released offset to its target boundary with a time-based
//! easing animation, one scheduled frame at a time. At most one frame
//! request is outstanding; cancelling revokes it, so no further step
//! can fire after an interrupt.

use crate::anim::ease::Ease;
use crate::anim::scheduler::{FrameRequest, FrameScheduler};
use crate::config::defaults::{SNAP_DISTANCE_EXTENSION_MS, SNAP_DURATION_CAP_MS};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy)]
struct AnimationState {
    start_offset: f32,
    target_offset: f32,
    /// Stamped by the first frame callback.
    start_time_ms: Option<f64>,
    duration_ms: f32,
    ease: Ease,
}

/// Outcome of [`SnapAnimator::start`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SnapStart {
    /// Frames are scheduled; interpolated offsets arrive via
    /// [`SnapAnimator::on_frame`].
    Animating,
    /// Nothing to animate (no travel, or the host refused to schedule).
    /// The caller applies this offset immediately as a static snap.
    Settled(f32),
}

/// Cancellable easing animation between two offsets.
#[derive(Debug, Default)]
pub struct SnapAnimator {
    anim: Option<AnimationState>,
    pending: Option<FrameRequest>,
}

impl SnapAnimator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an animation is in flight.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.anim.is_some()
    }

    /// The target of the in-flight animation, if any.
    #[must_use]
    pub fn target(&self) -> Option<f32> {
        self.anim.map(|anim| anim.target_offset)
    }

    /// Starts animating from `from` to `to`.
    ///
    /// A running animation is cancelled first, so two animations never
    /// touch the offset concurrently. Zero travel, a non-positive
    /// duration, or a refused frame request all settle immediately.
    pub fn start(
        &mut self,
        from: f32,
        to: f32,
        duration_ms: f32,
        ease: Ease,
        scheduler: &mut dyn FrameScheduler,
    ) -> SnapStart {
        self.cancel(scheduler);

        if (to - from).abs() <= f32::EPSILON || duration_ms <= 0.0 {
            return SnapStart::Settled(to);
        }

        match scheduler.request_frame() {
            Some(request) => {
                debug!(from, to, duration_ms, "snap started");
                self.pending = Some(request);
                self.anim = Some(AnimationState {
                    start_offset: from,
                    target_offset: to,
                    start_time_ms: None,
                    duration_ms,
                    ease,
                });
                SnapStart::Animating
            }
            None => {
                warn!(offset = to, "frame scheduling refused, snapping statically");
                SnapStart::Settled(to)
            }
        }
    }

    /// Advances the animation for a fired frame callback.
    ///
    /// Returns the offset to apply, or `None` when no animation is
    /// running (e.g. the callback fired after a cancel). Lands exactly
    /// on the target once the elapsed time reaches the duration.
    pub fn on_frame(&mut self, now_ms: f64, scheduler: &mut dyn FrameScheduler) -> Option<f32> {
        self.pending = None;
        let mut anim = self.anim?;

        let start = match anim.start_time_ms {
            Some(start) => start,
            None => {
                anim.start_time_ms = Some(now_ms);
                now_ms
            }
        };

        let elapsed = (now_ms - start) as f32;
        if elapsed >= anim.duration_ms {
            self.anim = None;
            debug!(offset = anim.target_offset, "snap finished");
            return Some(anim.target_offset);
        }

        let eased = anim.ease.apply(elapsed / anim.duration_ms);
        let offset = anim.start_offset + (anim.target_offset - anim.start_offset) * eased;

        match scheduler.request_frame() {
            Some(request) => {
                self.pending = Some(request);
                self.anim = Some(anim);
                Some(offset)
            }
            None => {
                // Graceful degradation: settle rather than hang mid-flight.
                warn!(offset = anim.target_offset, "frame scheduling refused mid-snap");
                self.anim = None;
                Some(anim.target_offset)
            }
        }
    }

    /// Stops the animation and revokes the pending frame request.
    ///
    /// Safe to call when idle.
    pub fn cancel(&mut self, scheduler: &mut dyn FrameScheduler) {
        if let Some(request) = self.pending.take() {
            scheduler.cancel_frame(request);
        }
        if self.anim.take().is_some() {
            debug!("snap cancelled");
        }
    }
}

/// Extends the base duration for longer travel distances.
///
/// Square-root growth keeps short corrections at the base duration
/// while long snaps never look instantaneous, capped so no snap drags
/// on perceptibly.
#[must_use]
pub fn snap_duration(distance: f32, base_ms: f32) -> f32 {
    (base_ms + distance.abs().sqrt() * SNAP_DISTANCE_EXTENSION_MS).min(SNAP_DURATION_CAP_MS)
}
