// SPDX-License-Identifier: MPL-2.0
//! Pointer input: raw event types and the drag state machine.

pub mod drag;

pub use drag::{ActiveDrag, DragController, DragState, ReleaseIntent};

/// Identifies one pointer input stream (finger, pen, mouse).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointerId(pub i64);

/// The pointer event kinds the slider consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Move,
    Up,
    Cancel,
}

/// A raw pointer event in the host's coordinate space.
///
/// `time_ms` comes from the host's monotonic clock (the same one that
/// stamps animation frames) and feeds the drag velocity estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub pointer_id: PointerId,
    /// Horizontal position in logical px.
    pub client_x: f32,
    pub time_ms: f64,
}

impl PointerEvent {
    /// A pointerdown event.
    #[must_use]
    pub fn down(pointer_id: PointerId, client_x: f32, time_ms: f64) -> Self {
        Self {
            kind: PointerKind::Down,
            pointer_id,
            client_x,
            time_ms,
        }
    }

    /// A pointermove event.
    #[must_use]
    pub fn moved(pointer_id: PointerId, client_x: f32, time_ms: f64) -> Self {
        Self {
            kind: PointerKind::Move,
            pointer_id,
            client_x,
            time_ms,
        }
    }

    /// A pointerup event.
    #[must_use]
    pub fn up(pointer_id: PointerId, client_x: f32, time_ms: f64) -> Self {
        Self {
            kind: PointerKind::Up,
            pointer_id,
            client_x,
            time_ms,
        }
    }

    /// A pointercancel event.
    #[must_use]
    pub fn cancel(pointer_id: PointerId, client_x: f32, time_ms: f64) -> Self {
        Self {
            kind: PointerKind::Cancel,
            pointer_id,
            client_x,
            time_ms,
        }
    }
}
