// SPDX-License-Identifier: MPL-2.0
//! Drag state machine
//!
//! Consumes raw pointer events and produces the current pan offset and
//! a release intent. Exactly one pointer drives a drag: the pointer id
//! recorded at pointerdown owns the interaction until its own up or
//! cancel, and every event from another id is a silent no-op.

use crate::config::defaults::{RUBBER_BAND_RESISTANCE, VELOCITY_SMOOTHING};
use crate::config::{BoundsPolicy, DragDirection};
use crate::input::{PointerEvent, PointerId};
use tracing::trace;

/// The live bookkeeping of an in-progress drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveDrag {
    /// The pointer that issued the capturing pointerdown.
    pub pointer_id: PointerId,

    /// Pointer position when the drag started.
    pub origin_client_x: f32,

    /// Slider offset when the drag started.
    pub origin_offset: f32,

    /// Most recent pointer position.
    pub last_client_x: f32,

    /// Timestamp of the most recent processed event.
    pub last_time_ms: f64,

    /// Exponentially-weighted offset velocity in logical px/ms.
    pub velocity: f32,
}

/// Drag interaction phases.
///
/// `Releasing` is the transient phase between the matching pointerup
/// and the controller settling back to `Idle`; it exists so the machine
/// never reports a release while still claiming the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(ActiveDrag),
    Releasing,
}

/// What a finished drag hands back to the slider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReleaseIntent {
    /// Residual offset velocity at release, logical px/ms.
    pub velocity: f32,
}

/// Pointer-event state machine producing pan offsets.
#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current phase.
    #[must_use]
    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// The pointer currently captured by a drag, if any.
    #[must_use]
    pub fn captured_pointer(&self) -> Option<PointerId> {
        match &self.state {
            DragState::Dragging(drag) => Some(drag.pointer_id),
            _ => None,
        }
    }

    /// Handles a pointerdown. Returns `true` when the pointer was
    /// captured; a down while another pointer is already dragging is
    /// ignored (first pointer wins until release).
    pub fn pointer_down(&mut self, event: &PointerEvent, current_offset: f32) -> bool {
        if let DragState::Dragging(drag) = &self.state {
            trace!(
                ignored = event.pointer_id.0,
                active = drag.pointer_id.0,
                "pointerdown while dragging"
            );
            return false;
        }

        self.state = DragState::Dragging(ActiveDrag {
            pointer_id: event.pointer_id,
            origin_client_x: event.client_x,
            origin_offset: current_offset,
            last_client_x: event.client_x,
            last_time_ms: event.time_ms,
            velocity: 0.0,
        });
        true
    }

    /// Handles a pointermove, returning the new offset when the event
    /// belongs to the captured pointer.
    ///
    /// The offset is recomputed from the drag origin rather than
    /// accumulated per move, so rubber-band resistance never compounds
    /// across events. The velocity estimate, by contrast, is fed from
    /// per-move displacement over time.
    pub fn pointer_move(
        &mut self,
        event: &PointerEvent,
        max_offset: f32,
        bounds: BoundsPolicy,
        direction: DragDirection,
    ) -> Option<f32> {
        let DragState::Dragging(drag) = &mut self.state else {
            return None;
        };
        if drag.pointer_id != event.pointer_id {
            return None;
        }

        let sign = direction_sign(direction);
        let travel = event.client_x - drag.origin_client_x;
        let offset = apply_bounds(drag.origin_offset + sign * travel, max_offset, bounds);

        let delta = event.client_x - drag.last_client_x;
        let dt = (event.time_ms - drag.last_time_ms) as f32;
        if dt > 0.0 {
            let sample = sign * delta / dt;
            drag.velocity += (sample - drag.velocity) * VELOCITY_SMOOTHING;
        }

        drag.last_client_x = event.client_x;
        drag.last_time_ms = event.time_ms;
        Some(offset)
    }

    /// Handles a pointerup or pointercancel for the captured pointer.
    ///
    /// Releases pointer capture and returns the release intent; events
    /// for other pointers leave the drag untouched.
    pub fn pointer_up(&mut self, event: &PointerEvent) -> Option<ReleaseIntent> {
        match self.state {
            DragState::Dragging(drag) if drag.pointer_id == event.pointer_id => {
                self.state = DragState::Releasing;
                let intent = ReleaseIntent {
                    velocity: drag.velocity,
                };
                self.state = DragState::Idle;
                Some(intent)
            }
            _ => None,
        }
    }

    /// Drops any in-progress drag, e.g. on item-list replacement.
    pub fn reset(&mut self) {
        self.state = DragState::Idle;
    }
}

fn direction_sign(direction: DragDirection) -> f32 {
    match direction {
        // Content follows the pointer: moving the pointer left (negative
        // travel) pushes the offset forward.
        DragDirection::Natural => -1.0,
        DragDirection::Inverted => 1.0,
    }
}

fn apply_bounds(raw: f32, max_offset: f32, bounds: BoundsPolicy) -> f32 {
    match bounds {
        BoundsPolicy::Clamp => raw.clamp(0.0, max_offset),
        BoundsPolicy::RubberBand => {
            if raw < 0.0 {
                raw * RUBBER_BAND_RESISTANCE
            } else if raw > max_offset {
                max_offset + (raw - max_offset) * RUBBER_BAND_RESISTANCE
            } else {
                raw
            }
        }
    }
}
