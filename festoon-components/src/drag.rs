//! Positional drag engine.
//!
//! Maps a draggable handle's pixel position inside a bounded wrapper to a
//! normalized ratio pair in [0.0, 1.0] and animates the handle toward a
//! target ratio over time. Supports discrete step snapping, elastic
//! overscroll while dragging, and momentum on release.
//!
//! The engine is a plain state machine: the embedder (usually a navigator)
//! feeds it [`CursorEvent`]s and drives [`DragEngine::tick`] from a ticker
//! subscription.

use std::sync::Arc;
use std::time::Instant;

use derive_setters::Setters;
use festoon_foundation::{Dp, Px, PxPosition};
use festoon_ui::{
    Callback, CallbackWith, CursorEvent, CursorEventContent, Element, ElementError, ElementRect,
    ElementSource,
};
use tracing::{debug, warn};

/// Divisor applied to out-of-range drag excess when elastic bounds are on.
const LOOSE_DAMPING: f32 = 4.0;

/// Multiplier applied to the last frame's delta on release when momentum is
/// on.
const SLIDE_MOMENTUM: f32 = 4.0;

/// Remaining distance, in device pixels, below which a settling animation
/// snaps to its target.
const SETTLE_EPSILON_PX: f32 = 1.0;

/// Normalized position state of the engine.
///
/// Each component is a ratio relative to the available drag range. `current`
/// converges toward `target` on every tick unless a drag is active, in which
/// case `target` tracks the pointer directly and `current` follows within
/// the same tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragState {
    /// The rendered position.
    pub current: [f32; 2],
    /// The position being animated toward.
    pub target: [f32; 2],
    /// `current` as of the previous tick.
    pub previous: [f32; 2],
}

impl Default for DragState {
    fn default() -> Self {
        Self {
            current: [0.0, 0.0],
            target: [0.0, 0.0],
            previous: [0.0, 0.0],
        }
    }
}

/// Pixel-space drag bounds derived from wrapper/handle geometry.
///
/// `avail_width`/`avail_height` may go negative when the handle is larger
/// than the wrapper minus padding; the ratio arithmetic tolerates that.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    /// Top inset of the drag area inside the wrapper.
    pub top: Px,
    /// Left inset of the drag area inside the wrapper.
    pub left: Px,
    /// Horizontal drag range in pixels.
    pub avail_width: Px,
    /// Vertical drag range in pixels.
    pub avail_height: Px,
}

/// Builds the table of allowed resting ratios.
///
/// Zero steps disables stepping (empty table). One step pins the handle to
/// the origin. For `n > 1` the table has exactly `n` evenly spaced entries
/// from 0.0 to 1.0, ascending.
pub fn step_table(steps: usize) -> Vec<f32> {
    match steps {
        0 => Vec::new(),
        1 => vec![0.0],
        n => (0..n).map(|i| i as f32 / (n - 1) as f32).collect(),
    }
}

/// Substitutes the table entry nearest to `ratio`.
///
/// Exact midpoints resolve to the lower-index entry. An empty table returns
/// `ratio` unchanged.
pub fn snap_to_step(ratio: f32, table: &[f32]) -> f32 {
    let mut best = ratio;
    let mut best_distance = f32::INFINITY;
    for &step in table {
        let distance = (ratio - step).abs();
        if distance < best_distance {
            best = step;
            best_distance = distance;
        }
    }
    best
}

/// Configuration for a [`DragEngine`].
#[derive(Clone, Setters)]
pub struct DragEngineArgs {
    /// Whether the handle responds to horizontal pointer movement.
    pub horizontal: bool,
    /// Whether the handle responds to vertical pointer movement.
    pub vertical: bool,
    /// Number of discrete resting positions; 0 disables stepping.
    pub steps: usize,
    /// When stepping, also snap the rendered position while animating, not
    /// just the resting target.
    pub snap: bool,
    /// Elastic bounds: dragging may overshoot [0, 1], damped by
    /// `LOOSE_DAMPING`, and snaps back on release.
    pub loose: bool,
    /// Animation speed constant in (0, 1]; 1.0 settles in roughly one frame.
    pub speed: f32,
    /// Momentum: extrapolate the last frame's delta on release.
    pub slide: bool,
    /// Inset between wrapper edges and the drag area.
    pub padding: Dp,
    /// Fired with the rendered ratio pair when it changes, at most once per
    /// tick.
    #[setters(skip)]
    pub on_position: Option<CallbackWith<[f32; 2]>>,
    /// Fired when a pointer drag begins on the handle.
    #[setters(skip)]
    pub on_drag_start: Option<Callback>,
    /// Fired when a pointer drag ends.
    #[setters(skip)]
    pub on_drag_stop: Option<Callback>,
    /// Fired with the new target when the target ratio changes.
    #[setters(skip)]
    pub on_target_change: Option<CallbackWith<[f32; 2]>>,
}

impl DragEngineArgs {
    /// Sets the position handler.
    pub fn on_position<F>(mut self, handler: F) -> Self
    where
        F: Fn([f32; 2]) + Send + Sync + 'static,
    {
        self.on_position = Some(CallbackWith::new(handler));
        self
    }

    /// Sets the drag-start handler.
    pub fn on_drag_start<F>(mut self, handler: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_drag_start = Some(Callback::new(handler));
        self
    }

    /// Sets the drag-stop handler.
    pub fn on_drag_stop<F>(mut self, handler: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_drag_stop = Some(Callback::new(handler));
        self
    }

    /// Sets the target-change handler.
    pub fn on_target_change<F>(mut self, handler: F) -> Self
    where
        F: Fn([f32; 2]) + Send + Sync + 'static,
    {
        self.on_target_change = Some(CallbackWith::new(handler));
        self
    }
}

impl Default for DragEngineArgs {
    fn default() -> Self {
        Self {
            horizontal: true,
            vertical: false,
            steps: 0,
            snap: false,
            loose: false,
            speed: 0.5,
            slide: false,
            padding: Dp::ZERO,
            on_position: None,
            on_drag_start: None,
            on_drag_stop: None,
            on_target_change: None,
        }
    }
}

struct DragOrigin {
    pointer: PxPosition,
    ratio: [f32; 2],
}

struct EngineParts {
    wrapper: Arc<dyn Element>,
    handle: Arc<dyn Element>,
    args: DragEngineArgs,
    bounds: Bounds,
    steps: Vec<f32>,
    state: DragState,
    enabled: bool,
    dragging: bool,
    origin: Option<DragOrigin>,
    last_frame: Option<Instant>,
    last_rendered: Option<[f32; 2]>,
}

/// The drag engine.
///
/// Constructed inert when its wrapper or handle element cannot be resolved;
/// an inert engine accepts every call and does nothing.
pub struct DragEngine {
    parts: Option<EngineParts>,
}

impl DragEngine {
    /// Creates an engine over resolved wrapper and handle elements.
    pub fn new(
        wrapper: Arc<dyn Element>,
        handle: Arc<dyn Element>,
        args: DragEngineArgs,
    ) -> Self {
        let steps = step_table(args.steps);
        let mut parts = EngineParts {
            wrapper,
            handle,
            args,
            bounds: Bounds::default(),
            steps,
            state: DragState::default(),
            enabled: true,
            dragging: false,
            origin: None,
            last_frame: None,
            last_rendered: None,
        };
        parts.recompute_bounds();
        parts.render_initial();
        Self { parts: Some(parts) }
    }

    /// Resolves `wrapper_key`/`handle_key` through `source` and creates the
    /// engine. A failed lookup produces a permanently inert engine.
    pub fn from_source(
        source: &dyn ElementSource,
        wrapper_key: &str,
        handle_key: &str,
        args: DragEngineArgs,
    ) -> Self {
        let wrapper = match source.find(wrapper_key) {
            Ok(element) => element,
            Err(ElementError::NotFound(key)) => {
                warn!(%key, "drag wrapper missing, engine is inert");
                return Self { parts: None };
            }
        };
        let handle = match source.find(handle_key) {
            Ok(element) => element,
            Err(ElementError::NotFound(key)) => {
                warn!(%key, "drag handle missing, engine is inert");
                return Self { parts: None };
            }
        };
        Self::new(wrapper, handle, args)
    }

    /// Whether the engine resolved its elements.
    pub fn is_inert(&self) -> bool {
        self.parts.is_none()
    }

    /// The current target ratio pair.
    ///
    /// The rendered position may still be animating toward it.
    pub fn value(&self) -> [f32; 2] {
        self.parts
            .as_ref()
            .map(|p| p.state.target)
            .unwrap_or([0.0, 0.0])
    }

    /// A snapshot of the full position state.
    pub fn state(&self) -> DragState {
        self.parts.as_ref().map(|p| p.state).unwrap_or_default()
    }

    /// The bounds computed at the last reflow.
    pub fn bounds(&self) -> Bounds {
        self.parts.as_ref().map(|p| p.bounds).unwrap_or_default()
    }

    /// Whether a pointer drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.parts.as_ref().map(|p| p.dragging).unwrap_or(false)
    }

    /// Whether pointer input is accepted.
    pub fn is_enabled(&self) -> bool {
        self.parts.as_ref().map(|p| p.enabled).unwrap_or(false)
    }

    /// Sets the target ratio pair.
    ///
    /// Values are clamped to [0, 1], or substituted by the nearest step when
    /// stepping is enabled. With `snap` the rendered position jumps to the
    /// target immediately and the position callback fires synchronously;
    /// otherwise the handle animates there on subsequent ticks.
    pub fn set_value(&mut self, x: f32, y: f32, snap: bool) {
        let Some(parts) = self.parts.as_mut() else {
            return;
        };
        let value = [parts.constrain(x), parts.constrain(y)];
        parts.retarget(value);
        if snap {
            parts.state.previous = parts.state.current;
            parts.state.current = parts.state.target;
            parts.render();
        }
    }

    /// Recomputes bounds from the current wrapper/handle geometry.
    ///
    /// Call after any layout change.
    pub fn reflow(&mut self) {
        let Some(parts) = self.parts.as_mut() else {
            return;
        };
        parts.recompute_bounds();
    }

    /// Accepts pointer-drag input. Does not move the handle.
    pub fn enable(&mut self) {
        if let Some(parts) = self.parts.as_mut() {
            parts.enabled = true;
        }
    }

    /// Ignores pointer-drag input. Does not reset the position.
    pub fn disable(&mut self) {
        if let Some(parts) = self.parts.as_mut() {
            parts.enabled = false;
            parts.stop_drag();
        }
    }

    /// Clears all callbacks and stops accepting input.
    ///
    /// Used by owning navigators during teardown; the handle keeps its last
    /// rendered position.
    pub fn unbind(&mut self) {
        if let Some(parts) = self.parts.as_mut() {
            parts.enabled = false;
            parts.dragging = false;
            parts.origin = None;
            parts.args.on_position = None;
            parts.args.on_drag_start = None;
            parts.args.on_drag_stop = None;
            parts.args.on_target_change = None;
        }
    }

    /// Feeds one pointer event into the engine.
    pub fn handle_event(&mut self, event: &CursorEvent) {
        let Some(parts) = self.parts.as_mut() else {
            return;
        };
        if !parts.enabled {
            return;
        }
        match event.content {
            CursorEventContent::Pressed => parts.pointer_down(event.position),
            CursorEventContent::Moved => parts.pointer_move(event.position),
            CursorEventContent::Released => parts.pointer_up(),
        }
    }

    /// Advances the animation by one frame.
    pub fn tick(&mut self, now: Instant) {
        let Some(parts) = self.parts.as_mut() else {
            return;
        };
        parts.tick(now);
    }
}

impl EngineParts {
    fn recompute_bounds(&mut self) {
        let wrapper = self.wrapper.rect();
        let handle = self.handle.rect();
        let padding = self.args.padding.to_px();
        self.bounds = Bounds {
            top: padding,
            left: padding,
            avail_width: wrapper.width - handle.width - padding * 2,
            avail_height: wrapper.height - handle.height - padding * 2,
        };
    }

    /// Clamps a raw ratio, or substitutes the nearest step when stepping.
    fn constrain(&self, ratio: f32) -> f32 {
        let clamped = ratio.clamp(0.0, 1.0);
        if self.steps.is_empty() {
            clamped
        } else {
            snap_to_step(clamped, &self.steps)
        }
    }

    fn retarget(&mut self, value: [f32; 2]) {
        if value == self.state.target {
            return;
        }
        self.state.target = value;
        if let Some(on_target_change) = &self.args.on_target_change {
            on_target_change.call(value);
        }
    }

    fn axis_avail(&self, axis: usize) -> f32 {
        if axis == 0 {
            self.bounds.avail_width.to_f32()
        } else {
            self.bounds.avail_height.to_f32()
        }
    }

    fn axis_enabled(&self, axis: usize) -> bool {
        if axis == 0 {
            self.args.horizontal
        } else {
            self.args.vertical
        }
    }

    /// Pixel delta to ratio delta. A zero range yields zero rather than a
    /// division error; negative ranges (handle wider than wrapper, as in a
    /// slide strip) pass through and flip the direction.
    fn delta_ratio(&self, delta_px: f32, axis: usize) -> f32 {
        let avail = self.axis_avail(axis);
        if avail == 0.0 { 0.0 } else { delta_px / avail }
    }

    /// The handle's hit box: its layout rectangle shifted by its current
    /// translation.
    fn handle_box(&self) -> ElementRect {
        let rect = self.handle.rect();
        let offset = self.handle.offset();
        ElementRect::new(
            rect.left + offset.x,
            rect.top + offset.y,
            rect.width,
            rect.height,
        )
    }

    fn pointer_down(&mut self, position: PxPosition) {
        if self.handle_box().contains(position) {
            self.dragging = true;
            self.origin = Some(DragOrigin {
                pointer: position,
                ratio: self.state.current,
            });
            // Halt any running animation at the grab point.
            self.state.target = self.state.current;
            if let Some(on_drag_start) = &self.args.on_drag_start {
                on_drag_start.call();
            }
        } else if self.wrapper.rect().contains(position) {
            self.tap_to_position(position);
        }
    }

    /// Pointer-down on the wrapper: animate the handle so it centers on the
    /// pointer, without entering drag mode.
    fn tap_to_position(&mut self, position: PxPosition) {
        let wrapper = self.wrapper.rect();
        let handle = self.handle.rect();
        let x = self.delta_ratio(
            (position.x - wrapper.left - self.bounds.left - handle.width / 2).to_f32(),
            0,
        );
        let y = self.delta_ratio(
            (position.y - wrapper.top - self.bounds.top - handle.height / 2).to_f32(),
            1,
        );
        let value = [
            if self.args.horizontal {
                self.constrain(x)
            } else {
                self.state.target[0]
            },
            if self.args.vertical {
                self.constrain(y)
            } else {
                self.state.target[1]
            },
        ];
        self.retarget(value);
    }

    fn pointer_move(&mut self, position: PxPosition) {
        if !self.dragging {
            return;
        }
        let Some(origin) = self.origin.as_ref() else {
            return;
        };
        let mut value = self.state.target;
        for axis in 0..2 {
            if !self.axis_enabled(axis) {
                continue;
            }
            let delta_px = if axis == 0 {
                (position.x - origin.pointer.x).to_f32()
            } else {
                (position.y - origin.pointer.y).to_f32()
            };
            let raw = origin.ratio[axis] + self.delta_ratio(delta_px, axis);
            let clamped = raw.clamp(0.0, 1.0);
            value[axis] = if self.args.loose {
                clamped + (raw - clamped) / LOOSE_DAMPING
            } else {
                clamped
            };
        }
        self.retarget(value);
    }

    fn pointer_up(&mut self) {
        if self.dragging {
            self.stop_drag();
            if let Some(on_drag_stop) = &self.args.on_drag_stop {
                on_drag_stop.call();
            }
        }
    }

    /// Ends a drag: applies release momentum when sliding is enabled, then
    /// re-clamps the target inside [0, 1] (or onto a step) so any elastic
    /// overshoot snaps back.
    fn stop_drag(&mut self) {
        if !self.dragging {
            return;
        }
        self.dragging = false;
        self.origin = None;
        let mut value = self.state.target;
        for axis in 0..2 {
            if !self.axis_enabled(axis) {
                continue;
            }
            if self.args.slide {
                let frame_delta = self.state.current[axis] - self.state.previous[axis];
                value[axis] += frame_delta * SLIDE_MOMENTUM;
            }
            value[axis] = self.constrain(value[axis]);
        }
        self.retarget(value);
    }

    fn tick(&mut self, now: Instant) {
        let dt = self
            .last_frame
            .map(|last| now.saturating_duration_since(last).as_secs_f32())
            .unwrap_or(1.0 / 60.0);
        self.last_frame = Some(now);

        self.state.previous = self.state.current;
        if self.dragging {
            self.state.current = self.state.target;
        } else {
            let factor = (self.args.speed * dt * 60.0).min(1.0);
            for axis in 0..2 {
                let diff = self.state.target[axis] - self.state.current[axis];
                let remaining_px = diff * self.axis_avail(axis).abs();
                if remaining_px.abs() < SETTLE_EPSILON_PX {
                    self.state.current[axis] = self.state.target[axis];
                } else {
                    self.state.current[axis] += diff * factor;
                }
            }
        }
        self.render();
    }

    fn rendered_value(&self) -> [f32; 2] {
        if self.args.snap && !self.steps.is_empty() {
            [
                snap_to_step(self.state.current[0], &self.steps),
                snap_to_step(self.state.current[1], &self.steps),
            ]
        } else {
            self.state.current
        }
    }

    fn offset_for(&self, value: [f32; 2]) -> PxPosition {
        PxPosition::new(
            self.bounds.left
                + Px::saturating_from_f32((value[0] * self.axis_avail(0)).round()),
            self.bounds.top
                + Px::saturating_from_f32((value[1] * self.axis_avail(1)).round()),
        )
    }

    /// Applies the rendered value to the handle and fires the position
    /// callback when it changed since the previous render.
    fn render(&mut self) {
        let rendered = self.rendered_value();
        self.handle.set_offset(self.offset_for(rendered));
        if self.last_rendered != Some(rendered) {
            self.last_rendered = Some(rendered);
            if let Some(on_position) = &self.args.on_position {
                on_position.call(rendered);
            }
        }
    }

    /// First paint during construction: place the handle without treating it
    /// as a change.
    fn render_initial(&mut self) {
        let rendered = self.rendered_value();
        self.handle.set_offset(self.offset_for(rendered));
        self.last_rendered = Some(rendered);
        debug!(bounds = ?self.bounds, "drag engine ready");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use festoon_ui::testing::{MockElement, MockSource};
    use parking_lot::Mutex;

    use super::*;

    fn engine_200x50() -> (DragEngine, Arc<MockElement>, Arc<MockElement>) {
        let wrapper = MockElement::with_rect(0, 0, 200, 40);
        let handle = MockElement::with_rect(0, 0, 50, 40);
        let engine = DragEngine::new(
            wrapper.clone(),
            handle.clone(),
            DragEngineArgs::default(),
        );
        (engine, wrapper, handle)
    }

    fn press(x: i32, y: i32) -> CursorEvent {
        CursorEvent::new(
            Instant::now(),
            PxPosition::new(Px(x), Px(y)),
            CursorEventContent::Pressed,
        )
    }

    fn moved(x: i32, y: i32) -> CursorEvent {
        CursorEvent::new(
            Instant::now(),
            PxPosition::new(Px(x), Px(y)),
            CursorEventContent::Moved,
        )
    }

    fn released(x: i32, y: i32) -> CursorEvent {
        CursorEvent::new(
            Instant::now(),
            PxPosition::new(Px(x), Px(y)),
            CursorEventContent::Released,
        )
    }

    #[test]
    fn test_step_table_shape() {
        assert!(step_table(0).is_empty());
        assert_eq!(step_table(1), vec![0.0]);

        for n in 2..8 {
            let table = step_table(n);
            assert_eq!(table.len(), n);
            assert_eq!(table[0], 0.0);
            assert_eq!(table[n - 1], 1.0);
            assert!(table.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_step_snap_ties_resolve_low() {
        let table = step_table(3); // [0.0, 0.5, 1.0]
        assert_eq!(snap_to_step(0.25, &table), 0.0);
        assert_eq!(snap_to_step(0.26, &table), 0.5);
        assert_eq!(snap_to_step(0.75, &table), 0.5);
        assert_eq!(snap_to_step(0.9, &table), 1.0);
    }

    #[test]
    fn test_bounds_from_geometry() {
        let (engine, _, _) = engine_200x50();
        assert_eq!(engine.bounds().avail_width, Px(150));
        assert_eq!(engine.bounds().left, Px(0));
    }

    #[test]
    fn test_snap_set_value_renders_immediately() {
        let (mut engine, _, handle) = engine_200x50();

        engine.set_value(0.5, 0.0, true);
        assert_eq!(engine.value(), [0.5, 0.0]);
        assert_eq!(handle.offset().x, Px(75));
    }

    #[test]
    fn test_set_value_clamps() {
        let (mut engine, _, _) = engine_200x50();

        engine.set_value(1.5, -0.5, true);
        assert_eq!(engine.value(), [1.0, 0.0]);
    }

    #[test]
    fn test_stepped_set_value_snaps_to_table() {
        let wrapper = MockElement::with_rect(0, 0, 200, 40);
        let handle = MockElement::with_rect(0, 0, 50, 40);
        let mut engine = DragEngine::new(
            wrapper,
            handle.clone(),
            DragEngineArgs::default().steps(3),
        );

        engine.set_value(0.6, 0.0, true);
        assert_eq!(engine.value(), [0.5, 0.0]);
        assert_eq!(handle.offset().x, Px(75));
    }

    #[test]
    fn test_snap_fires_position_callback_synchronously() {
        let wrapper = MockElement::with_rect(0, 0, 200, 40);
        let handle = MockElement::with_rect(0, 0, 50, 40);
        let positions = Arc::new(Mutex::new(Vec::new()));
        let positions_in = positions.clone();
        let mut engine = DragEngine::new(
            wrapper,
            handle,
            DragEngineArgs::default().on_position(move |value| {
                positions_in.lock().push(value);
            }),
        );

        engine.set_value(0.5, 0.0, true);
        assert_eq!(positions.lock().as_slice(), &[[0.5, 0.0]]);
    }

    #[test]
    fn test_animated_set_value_settles_over_ticks() {
        let (mut engine, _, handle) = engine_200x50();

        engine.set_value(1.0, 0.0, false);
        assert_eq!(handle.offset().x, Px(0));

        let t0 = Instant::now();
        let mut now = t0;
        for _ in 0..60 {
            now += Duration::from_millis(16);
            engine.tick(now);
        }
        assert_eq!(engine.state().current, [1.0, 0.0]);
        assert_eq!(handle.offset().x, Px(150));
    }

    #[test]
    fn test_drag_retargets_from_pointer_delta() {
        let (mut engine, _, _) = engine_200x50();

        engine.handle_event(&press(10, 10));
        assert!(engine.is_dragging());
        engine.handle_event(&moved(40, 10));
        // 30 px over a 150 px range.
        assert_eq!(engine.value(), [0.2, 0.0]);
    }

    #[test]
    fn test_release_with_slide_extrapolates_last_frame_delta() {
        let wrapper = MockElement::with_rect(0, 0, 200, 40);
        let handle = MockElement::with_rect(0, 0, 50, 40);
        let mut engine = DragEngine::new(
            wrapper,
            handle,
            DragEngineArgs::default().slide(true),
        );

        engine.handle_event(&press(10, 10));
        engine.handle_event(&moved(25, 10)); // +15 px => ratio 0.1
        engine.tick(Instant::now()); // previous 0.0, current 0.1
        engine.handle_event(&released(25, 10));

        // 0.1 + (0.1 - 0.0) * 4, clamped inside [0, 1].
        assert!((engine.value()[0] - 0.5).abs() < 1e-6);
        assert!(!engine.is_dragging());
    }

    #[test]
    fn test_release_momentum_clamps() {
        let wrapper = MockElement::with_rect(0, 0, 200, 40);
        let handle = MockElement::with_rect(0, 0, 50, 40);
        let mut engine = DragEngine::new(
            wrapper,
            handle,
            DragEngineArgs::default().slide(true),
        );

        engine.handle_event(&press(10, 10));
        engine.handle_event(&moved(100, 10)); // ratio 0.6
        engine.tick(Instant::now());
        engine.handle_event(&released(100, 10));

        assert_eq!(engine.value(), [1.0, 0.0]);
    }

    #[test]
    fn test_loose_drag_rubber_bands_past_one() {
        let wrapper = MockElement::with_rect(0, 0, 200, 40);
        let handle = MockElement::with_rect(0, 0, 50, 40);
        let mut engine = DragEngine::new(
            wrapper,
            handle,
            DragEngineArgs::default().loose(true),
        );

        engine.handle_event(&press(10, 10));
        engine.handle_event(&moved(310, 10)); // raw ratio 2.0
        assert!((engine.value()[0] - 1.25).abs() < 1e-6);

        // Elastic overshoot snaps back inside the track on release.
        engine.handle_event(&released(310, 10));
        assert_eq!(engine.value(), [1.0, 0.0]);
    }

    #[test]
    fn test_tap_on_wrapper_centers_handle_on_pointer() {
        let (mut engine, _, _) = engine_200x50();

        engine.handle_event(&press(150, 10));
        assert!(!engine.is_dragging());
        let expected = (150.0 - 25.0) / 150.0;
        assert!((engine.value()[0] - expected).abs() < 1e-6);
    }

    #[test]
    fn test_zero_range_yields_zero_deltas() {
        let wrapper = MockElement::with_rect(0, 0, 50, 40);
        let handle = MockElement::with_rect(0, 0, 50, 40);
        let mut engine = DragEngine::new(wrapper, handle, DragEngineArgs::default());
        assert_eq!(engine.bounds().avail_width, Px(0));

        engine.handle_event(&press(10, 10));
        engine.handle_event(&moved(40, 10));
        assert_eq!(engine.value(), [0.0, 0.0]);
    }

    #[test]
    fn test_disable_ignores_pointer_input() {
        let (mut engine, _, _) = engine_200x50();

        engine.set_value(0.5, 0.0, true);
        engine.disable();
        engine.handle_event(&press(80, 10));
        engine.handle_event(&moved(120, 10));

        assert!(!engine.is_dragging());
        // Disabling does not reset position.
        assert_eq!(engine.value(), [0.5, 0.0]);
    }

    #[test]
    fn test_missing_element_produces_inert_engine() {
        let source = MockSource::new();
        let mut engine =
            DragEngine::from_source(&source, "wrap", "handle", DragEngineArgs::default());

        assert!(engine.is_inert());
        engine.set_value(0.7, 0.0, true);
        engine.reflow();
        engine.enable();
        engine.handle_event(&press(10, 10));
        engine.tick(Instant::now());
        assert_eq!(engine.value(), [0.0, 0.0]);
    }

    #[test]
    fn test_position_callback_fires_once_per_change() {
        let wrapper = MockElement::with_rect(0, 0, 200, 40);
        let handle = MockElement::with_rect(0, 0, 50, 40);
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_in = hits.clone();
        let mut engine = DragEngine::new(
            wrapper,
            handle,
            DragEngineArgs::default().on_position(move |_| {
                hits_in.fetch_add(1, Ordering::SeqCst);
            }),
        );

        engine.set_value(1.0, 0.0, true);
        let fired = hits.load(Ordering::SeqCst);
        assert_eq!(fired, 1);

        // Settled: further ticks render the same value and stay silent.
        let mut now = Instant::now();
        for _ in 0..5 {
            now += Duration::from_millis(16);
            engine.tick(now);
        }
        assert_eq!(hits.load(Ordering::SeqCst), fired);
    }

    #[test]
    fn test_reflow_tracks_layout_changes() {
        let (mut engine, wrapper, _) = engine_200x50();

        wrapper.set_rect(0, 0, 400, 40);
        engine.reflow();
        assert_eq!(engine.bounds().avail_width, Px(350));
    }
}
