// SPDX-License-Identifier: MPL-2.0
//! Top-level slider controller
//!
//! Owns the offset and wires the pieces together: pointer events feed
//! the drag machine, releases hand off to the snap animator, loads
//! arrive through the image cache, and the renderer reads the combined
//! state each frame. The offset is written only by the drag while
//! dragging and by the animator while animating; a pointerdown cancels
//! the animator before the drag takes over (interrupt-on-grab), which
//! is the crate's entire concurrency discipline.

use crate::anim::snap::{snap_duration, SnapAnimator, SnapStart};
use crate::anim::FrameScheduler;
use crate::config::SliderConfig;
use crate::input::{DragController, PointerEvent, PointerKind, ReleaseIntent};
use crate::layout::{self, ItemSpan};
use crate::media::{ImageCache, ImageFetcher, SliderItem};
use crate::render::{Canvas, Renderer};
use crate::viewport::Viewport;
use std::sync::Arc;
use tracing::trace;

/// A pointer-driven, canvas-rendered image carousel.
pub struct CanvasSlider {
    config: SliderConfig,
    item_ids: Vec<String>,
    offset: f32,
    viewport: Viewport,
    drag: DragController,
    snap: SnapAnimator,
    cache: ImageCache,
    dirty: bool,
}

impl CanvasSlider {
    /// Creates a slider with a sanitized copy of `config`, loading
    /// images through `fetcher` on `runtime`.
    #[must_use]
    pub fn new(
        config: SliderConfig,
        fetcher: Arc<dyn ImageFetcher>,
        runtime: tokio::runtime::Handle,
    ) -> Self {
        Self {
            config: config.sanitized(),
            item_ids: Vec::new(),
            offset: 0.0,
            viewport: Viewport::default(),
            drag: DragController::new(),
            snap: SnapAnimator::new(),
            cache: ImageCache::new(fetcher, runtime),
            dirty: false,
        }
    }

    /// The active (sanitized) configuration.
    #[must_use]
    pub fn config(&self) -> &SliderConfig {
        &self.config
    }

    /// Current logical scroll position.
    #[must_use]
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Whether a pointer currently drives the offset.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Whether a snap animation currently drives the offset.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.snap.is_running()
    }

    /// The viewport as last measured.
    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// The items in list order.
    #[must_use]
    pub fn items(&self) -> Vec<&SliderItem> {
        self.item_ids
            .iter()
            .filter_map(|id| self.cache.get(id))
            .collect()
    }

    /// Index of the item under the viewport center, once measured.
    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        let viewport = self.viewport.state()?;
        let items = self.items();
        let spans = layout::item_spans(&items, viewport);
        layout::index_at(&spans, self.offset + viewport.width / 2.0)
    }

    /// Takes the repaint flag, clearing it.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Replaces the item list.
    ///
    /// Cancels any drag or snap, resets the offset, and requests every
    /// id; entries surviving from the previous list keep their decoded
    /// images, dropped ones are discarded.
    pub fn set_items(&mut self, items: Vec<String>, scheduler: &mut dyn FrameScheduler) {
        self.snap.cancel(scheduler);
        self.drag.reset();
        self.cache.retain(&items);
        for id in &items {
            self.cache.request(id);
        }
        self.item_ids = items;
        self.offset = 0.0;
        self.dirty = true;
    }

    /// Routes one pointer event through the drag state machine.
    ///
    /// Downs and moves are ignored until the viewport has been measured
    /// (no bounds exist to drag against). A pointerdown cancels an
    /// in-flight snap before the origin offset is read, so the user
    /// grabs the pre-interrupt value, never a stale interpolation.
    pub fn handle_pointer(&mut self, event: PointerEvent, scheduler: &mut dyn FrameScheduler) {
        if !self.viewport.is_measured() {
            // Releases still free the captured pointer so a box collapse
            // mid-drag cannot wedge the state machine; nothing is
            // snapped or scheduled.
            if matches!(event.kind, PointerKind::Up | PointerKind::Cancel) {
                self.drag.pointer_up(&event);
            } else {
                trace!(?event.kind, "pointer event before layout");
            }
            return;
        }

        match event.kind {
            PointerKind::Down => {
                self.snap.cancel(scheduler);
                self.drag.pointer_down(&event, self.offset);
            }
            PointerKind::Move => {
                let (_, max) = self.current_layout();
                if let Some(offset) =
                    self.drag
                        .pointer_move(&event, max, self.config.bounds, self.config.direction)
                {
                    self.offset = offset;
                    self.dirty = true;
                }
            }
            PointerKind::Up | PointerKind::Cancel => {
                if let Some(intent) = self.drag.pointer_up(&event) {
                    self.release(intent, scheduler);
                }
            }
        }
    }

    /// Steps the snap animation for a fired frame callback.
    ///
    /// The written offset is re-clamped against the current bounds, so
    /// a resize racing the animation can never leave the offset outside
    /// the reachable range.
    pub fn on_frame(&mut self, now_ms: f64, scheduler: &mut dyn FrameScheduler) {
        if let Some(offset) = self.snap.on_frame(now_ms, scheduler) {
            let (_, max) = self.current_layout();
            self.offset = offset.clamp(0.0, max);
            self.dirty = true;
        }
    }

    /// Applies finished image loads. Returns whether anything changed.
    pub fn pump_loads(&mut self) -> bool {
        if self.cache.poll_completions() > 0 {
            self.dirty = true;
            true
        } else {
            false
        }
    }

    /// Waits for every in-flight load (ordering helper for tests and
    /// shutdown; the render loop uses [`pump_loads`](Self::pump_loads)).
    pub async fn wait_for_loads(&mut self) {
        self.cache.wait_idle().await;
        self.dirty = true;
    }

    /// Applies a resize notification.
    ///
    /// When the slider is idle the offset is re-clamped into the new
    /// bounds immediately; during a drag or snap the active writer
    /// applies its own clamping.
    pub fn resize(&mut self, width: f32, height: f32, pixel_ratio: f32) {
        if !self.viewport.apply_measurement(width, height, pixel_ratio) {
            return;
        }
        if !self.drag.is_dragging() && !self.snap.is_running() {
            let (_, max) = self.current_layout();
            self.offset = self.offset.clamp(0.0, max);
        }
        self.dirty = true;
    }

    /// Paints the current frame. Read-only; returns `false` while the
    /// viewport is unmeasured.
    pub fn paint(&self, canvas: &mut dyn Canvas) -> bool {
        let items = self.items();
        Renderer::new(&self.config).paint(canvas, self.viewport.state(), self.offset, &items)
    }

    fn release(&mut self, intent: ReleaseIntent, scheduler: &mut dyn FrameScheduler) {
        let (spans, max) = self.current_layout();

        if !self.config.snap {
            // The offset stays exactly where the drag left it, pulled
            // back inside the bounds if a rubber-band overshot them.
            let clamped = self.offset.clamp(0.0, max);
            if clamped != self.offset {
                self.offset = clamped;
                self.dirty = true;
            }
            return;
        }

        let boundaries = layout::boundaries(&spans, max);
        let target = layout::snap_target(
            self.offset,
            intent.velocity,
            &boundaries,
            self.config.fling_velocity,
        );
        let duration = snap_duration(target - self.offset, self.config.snap_duration_ms);
        match self
            .snap
            .start(self.offset, target, duration, self.config.easing, scheduler)
        {
            SnapStart::Animating => {}
            SnapStart::Settled(offset) => {
                self.offset = offset.clamp(0.0, max);
                self.dirty = true;
            }
        }
    }

    fn current_layout(&self) -> (Vec<ItemSpan>, f32) {
        match self.viewport.state() {
            Some(viewport) => {
                let items = self.items();
                let spans = layout::item_spans(&items, viewport);
                let max = layout::max_offset(&spans, viewport);
                (spans, max)
            }
            None => (Vec::new(), 0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::PointerId;
    use crate::test_utils::{FixedSizeFetcher, ManualScheduler};

    fn slider() -> CanvasSlider {
        CanvasSlider::new(
            SliderConfig::default(),
            Arc::new(FixedSizeFetcher::new(300, 200)),
            tokio::runtime::Handle::current(),
        )
    }

    #[tokio::test]
    async fn set_items_requests_every_id_and_resets_the_offset() {
        let mut scheduler = ManualScheduler::new();
        let mut slider = slider();
        slider.set_items(vec!["a".into(), "b".into()], &mut scheduler);

        assert_eq!(slider.items().len(), 2);
        assert_eq!(slider.offset(), 0.0);
        assert!(slider.take_dirty());
        assert!(!slider.take_dirty());
    }

    #[tokio::test]
    async fn pointer_events_before_layout_are_ignored() {
        let mut scheduler = ManualScheduler::new();
        let mut slider = slider();
        slider.set_items(vec!["a".into(), "b".into()], &mut scheduler);
        slider.take_dirty();

        slider.handle_pointer(PointerEvent::down(PointerId(1), 100.0, 0.0), &mut scheduler);
        assert!(!slider.is_dragging());
        assert!(!slider.take_dirty());
    }

    #[tokio::test]
    async fn resize_reclamps_the_offset_when_idle() {
        let mut scheduler = ManualScheduler::new();
        let mut slider = slider();
        slider.set_items(vec!["a".into(), "b".into(), "c".into()], &mut scheduler);
        slider.resize(300.0, 200.0, 1.0);
        slider.wait_for_loads().await;

        // Drag to the far end, then shrink the content by widening the
        // viewport: the offset must come back inside the new bounds.
        slider.handle_pointer(PointerEvent::down(PointerId(1), 700.0, 0.0), &mut scheduler);
        slider.handle_pointer(PointerEvent::moved(PointerId(1), 100.0, 500.0), &mut scheduler);
        slider.handle_pointer(PointerEvent::up(PointerId(1), 100.0, 600.0), &mut scheduler);
        // Snap is on by default; finish the animation.
        let mut now = 10_000.0;
        while scheduler.pop_fired().is_some() {
            now += 16.0;
            slider.on_frame(now, &mut scheduler);
        }
        assert_eq!(slider.offset(), 600.0);

        slider.resize(800.0, 200.0, 1.0);
        assert!(slider.offset() <= 100.0);
    }

    #[tokio::test]
    async fn release_during_a_collapsed_viewport_frees_the_pointer() {
        let mut scheduler = ManualScheduler::new();
        let mut slider = slider();
        slider.set_items(vec!["a".into(), "b".into()], &mut scheduler);
        slider.resize(300.0, 200.0, 1.0);
        slider.wait_for_loads().await;

        slider.handle_pointer(PointerEvent::down(PointerId(1), 300.0, 0.0), &mut scheduler);
        assert!(slider.is_dragging());

        // The host's box collapses mid-drag; the release still arrives.
        slider.resize(0.0, 0.0, 1.0);
        slider.handle_pointer(PointerEvent::up(PointerId(1), 250.0, 50.0), &mut scheduler);
        assert!(!slider.is_dragging());
        assert_eq!(scheduler.request_count(), 0);

        // A later measurement lets the next pointer grab normally.
        slider.resize(300.0, 200.0, 1.0);
        slider.handle_pointer(PointerEvent::down(PointerId(2), 100.0, 100.0), &mut scheduler);
        assert!(slider.is_dragging());
    }

    #[tokio::test]
    async fn current_index_follows_the_viewport_center() {
        let mut scheduler = ManualScheduler::new();
        let mut slider = slider();
        slider.set_items(vec!["a".into(), "b".into(), "c".into()], &mut scheduler);
        slider.resize(300.0, 200.0, 1.0);
        slider.wait_for_loads().await;

        assert_eq!(slider.current_index(), Some(0));
        slider.handle_pointer(PointerEvent::down(PointerId(1), 700.0, 0.0), &mut scheduler);
        slider.handle_pointer(PointerEvent::moved(PointerId(1), 400.0, 100.0), &mut scheduler);
        assert_eq!(slider.offset(), 300.0);
        assert_eq!(slider.current_index(), Some(1));
    }
}
