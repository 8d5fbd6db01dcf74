// SPDX-License-Identifier: MPL-2.0
//! Frame scheduling abstraction
//!
//! The host's animation-frame primitive behind a trait: request a
//! callback for the next rendering opportunity, cancel it by handle.
//! Modeling the pending callback as an explicit id makes cancellation
//! observable in tests without any rendering involved.

/// Handle for one scheduled frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameRequest(pub u64);

/// The host's frame scheduling primitive.
///
/// The host guarantees that granted callbacks fire in submission
/// order, roughly once per display refresh, with a monotonic timestamp
/// in milliseconds. Each fired callback reaches the slider through
/// [`CanvasSlider::on_frame`](crate::slider::CanvasSlider::on_frame).
pub trait FrameScheduler {
    /// Requests one frame callback. `None` means the host refused; the
    /// caller must degrade gracefully rather than fail.
    fn request_frame(&mut self) -> Option<FrameRequest>;

    /// Cancels a previously granted request. Cancelling a request that
    /// already fired is a no-op.
    fn cancel_frame(&mut self, request: FrameRequest);
}
