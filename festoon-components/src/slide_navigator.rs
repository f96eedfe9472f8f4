//! Swipeable horizontal button strip.
//!
//! Composes a [`DragEngine`] (horizontal, elastic, momentum-enabled) with a
//! [`Navigation`] so that dragging slides the strip while clicking a button
//! still activates it directly. Dragging is only enabled while the strip
//! actually overflows its wrapper; otherwise the strip pins left.

use std::sync::Arc;

use derive_setters::Setters;
use festoon_foundation::{Dp, Px};
use festoon_ui::{CursorEvent, Element, TickControl, TickSubscription, Ticker};
use parking_lot::Mutex;
use tracing::debug;

use crate::drag::{DragEngine, DragEngineArgs};
use crate::navigation::{ClickEvent, Navigation, NavigationArgs};

/// Configuration for a [`SlideNavigator`].
#[derive(Clone, Setters)]
pub struct SlideNavigatorArgs {
    /// Slide animation speed constant in (0, 1].
    pub speed: f32,
    /// Inset between wrapper edges and the strip's drag area.
    pub padding: Dp,
    /// Callbacks forwarded to the composed [`Navigation`].
    pub navigation: NavigationArgs,
}

impl Default for SlideNavigatorArgs {
    fn default() -> Self {
        Self {
            speed: 0.5,
            padding: Dp::ZERO,
            navigation: NavigationArgs::default(),
        }
    }
}

/// A swipeable strip of N buttons with one active index.
pub struct SlideNavigator {
    engine: Arc<Mutex<DragEngine>>,
    navigation: Navigation,
    wrapper: Arc<dyn Element>,
    handle: Arc<dyn Element>,
    subscription: Option<TickSubscription>,
    destroyed: bool,
}

impl SlideNavigator {
    /// Creates a navigator over a wrapper/strip element pair and its
    /// buttons, driving the slide animation from `ticker`.
    pub fn new(
        ticker: &dyn Ticker,
        wrapper: Arc<dyn Element>,
        handle: Arc<dyn Element>,
        buttons: Vec<Arc<dyn Element>>,
        args: SlideNavigatorArgs,
    ) -> Self {
        let engine = Arc::new(Mutex::new(DragEngine::new(
            wrapper.clone(),
            handle.clone(),
            DragEngineArgs::default()
                .horizontal(true)
                .vertical(false)
                .loose(true)
                .slide(true)
                .speed(args.speed)
                .padding(args.padding),
        )));

        let engine_for_tick = engine.clone();
        let subscription = ticker.subscribe(Box::new(move |now| {
            engine_for_tick.lock().tick(now);
            TickControl::Continue
        }));

        let mut navigator = Self {
            engine,
            navigation: Navigation::new(buttons, args.navigation),
            wrapper,
            handle,
            subscription: Some(subscription),
            destroyed: false,
        };
        navigator.resize();
        navigator
    }

    /// Re-evaluates overflow after a layout change.
    ///
    /// Dragging is enabled only when the strip's rendered width exceeds the
    /// wrapper's; with nothing to reveal, dragging is disabled and the strip
    /// pins to ratio 0.
    pub fn resize(&mut self) {
        if self.destroyed {
            return;
        }
        let mut engine = self.engine.lock();
        engine.reflow();
        if self.handle.rect().width > self.wrapper.rect().width {
            engine.enable();
        } else {
            engine.disable();
            engine.set_value(0.0, 0.0, true);
        }
    }

    /// Whether drag input is currently accepted.
    pub fn is_drag_enabled(&self) -> bool {
        self.engine.lock().is_enabled()
    }

    /// The strip's current horizontal target ratio.
    pub fn ratio_x(&self) -> f32 {
        self.engine.lock().value()[0]
    }

    /// Positions the strip at a horizontal ratio, animated.
    pub fn set_ratio_x(&mut self, ratio: f32) {
        if self.destroyed {
            return;
        }
        self.engine.lock().set_value(ratio, 0.0, false);
    }

    /// Positions the strip at a pixel offset inside the drag range,
    /// animated.
    pub fn set_x(&mut self, offset: Px) {
        if self.destroyed {
            return;
        }
        let avail = self.engine.lock().bounds().avail_width;
        let ratio = if avail != Px::ZERO {
            offset.to_f32() / avail.to_f32()
        } else {
            0.0
        };
        self.set_ratio_x(ratio);
    }

    /// The externally visible selected index.
    pub fn active_index(&self) -> usize {
        self.navigation.activate_index()
    }

    /// The most recently hovered or interacted index.
    pub fn current_index(&self) -> usize {
        self.navigation.current_index()
    }

    /// Sets the active button and slides it into view.
    pub fn activate(&mut self, index: usize) {
        if self.destroyed {
            return;
        }
        self.navigation.activate(index);
        self.reveal(index);
    }

    /// Slides the strip so the given button is centered in the wrapper, as
    /// far as the drag range allows.
    fn reveal(&mut self, index: usize) {
        let Some(button) = self.navigation.get_btn(index) else {
            return;
        };
        let wrapper = self.wrapper.rect();
        let strip = self.handle.rect();
        let overflow = strip.width - wrapper.width;
        if overflow <= Px::ZERO {
            return;
        }
        let button_rect = button.rect();
        let button_center = button_rect.left + button_rect.width / 2 - strip.left;
        let ratio = (button_center - wrapper.width / 2).to_f32() / overflow.to_f32();
        self.set_ratio_x(ratio.clamp(0.0, 1.0));
    }

    /// Feeds one pointer event to the drag engine and the navigation.
    ///
    /// Returns the click when this event completed one on a button.
    pub fn handle_event(&mut self, event: &CursorEvent) -> Option<ClickEvent> {
        if self.destroyed {
            return None;
        }
        self.engine.lock().handle_event(event);
        self.navigation.handle_event(event)
    }

    /// Detaches the tick subscription, unbinds the drag engine and destroys
    /// the navigation. Idempotent.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        if let Some(subscription) = self.subscription.take() {
            subscription.cancel();
        }
        self.engine.lock().unbind();
        self.navigation.destroy();
        debug!("slide navigator destroyed");
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use festoon_foundation::PxPosition;
    use festoon_ui::testing::MockElement;
    use festoon_ui::{CursorEventContent, FrameSyncedTicker};

    use super::*;

    /// Wrapper 200 px wide; strip 600 px wide holding six 100 px buttons.
    fn overflowing_navigator(ticker: &FrameSyncedTicker) -> SlideNavigator {
        let wrapper = MockElement::with_rect(0, 0, 200, 40);
        let strip = MockElement::with_rect(0, 0, 600, 40);
        let buttons = (0..6)
            .map(|i| MockElement::with_rect(i * 100, 0, 100, 40) as Arc<dyn Element>)
            .collect();
        SlideNavigator::new(
            ticker,
            wrapper,
            strip,
            buttons,
            SlideNavigatorArgs::default(),
        )
    }

    fn event(x: i32, y: i32, content: CursorEventContent) -> CursorEvent {
        CursorEvent::new(Instant::now(), PxPosition::new(Px(x), Px(y)), content)
    }

    #[test]
    fn test_overflow_enables_dragging() {
        let ticker = FrameSyncedTicker::new();
        let navigator = overflowing_navigator(&ticker);
        assert!(navigator.is_drag_enabled());
    }

    #[test]
    fn test_no_overflow_disables_and_pins_left() {
        let ticker = FrameSyncedTicker::new();
        let wrapper = MockElement::with_rect(0, 0, 200, 40);
        let strip = MockElement::with_rect(0, 0, 120, 40);
        let mut navigator = SlideNavigator::new(
            &ticker,
            wrapper,
            strip.clone(),
            vec![MockElement::with_rect(0, 0, 120, 40) as Arc<dyn Element>],
            SlideNavigatorArgs::default(),
        );

        navigator.set_ratio_x(0.8);
        navigator.resize();

        assert!(!navigator.is_drag_enabled());
        assert_eq!(navigator.ratio_x(), 0.0);
    }

    #[test]
    fn test_shrinking_layout_disables_dragging() {
        let ticker = FrameSyncedTicker::new();
        let wrapper = MockElement::with_rect(0, 0, 200, 40);
        let strip = MockElement::with_rect(0, 0, 600, 40);
        let mut navigator = SlideNavigator::new(
            &ticker,
            wrapper,
            strip.clone(),
            Vec::new(),
            SlideNavigatorArgs::default(),
        );
        assert!(navigator.is_drag_enabled());

        strip.set_rect(0, 0, 180, 40);
        navigator.resize();
        assert!(!navigator.is_drag_enabled());
        assert_eq!(navigator.ratio_x(), 0.0);
    }

    #[test]
    fn test_click_activates_button() {
        let ticker = FrameSyncedTicker::new();
        let mut navigator = overflowing_navigator(&ticker);

        navigator.handle_event(&event(150, 10, CursorEventContent::Pressed));
        let click = navigator.handle_event(&event(150, 10, CursorEventContent::Released));

        assert_eq!(click.map(|c| c.index), Some(2));
        assert_eq!(navigator.active_index(), 2);
    }

    #[test]
    fn test_set_x_maps_pixels_to_ratio() {
        let ticker = FrameSyncedTicker::new();
        let mut navigator = overflowing_navigator(&ticker);

        // avail_width = 200 - 600 = -400: the strip slides left, so pixel
        // offsets in the drag range are negative.
        navigator.set_x(Px(-200));
        assert_eq!(navigator.ratio_x(), 0.5);

        navigator.set_x(Px(-400));
        assert_eq!(navigator.ratio_x(), 1.0);
    }

    #[test]
    fn test_destroy_cancels_ticks_and_silences_events() {
        let ticker = FrameSyncedTicker::new();
        let mut navigator = overflowing_navigator(&ticker);

        navigator.destroy();
        navigator.destroy();

        // Ticks after destroy must not touch the torn-down engine.
        ticker.advance(Instant::now());

        navigator.handle_event(&event(150, 10, CursorEventContent::Pressed));
        let click = navigator.handle_event(&event(150, 10, CursorEventContent::Released));
        assert_eq!(click, None);
        assert_eq!(navigator.active_index(), 0);
    }
}
