//! Desktop paged button navigator.
//!
//! Shows a fixed-size window (4 buttons by default) over a larger logical
//! button list. `prev`/`next` shift the window by one logical index with
//! 1-based modulo wrap-around, and the button strip slides via the
//! [`animate`] primitive to suggest continuous scrolling, without ever
//! rendering more than the logical button elements the embedder supplied.

use std::sync::Arc;
use std::time::Duration;

use derive_setters::Setters;
use festoon_foundation::{Px, PxPosition};
use festoon_ui::{
    CursorEvent, CursorEventContent, Easing, Element, ElementRect, Ticker, TransitionHandle,
    animate,
};
use tracing::debug;

use crate::navigation::{NONE_INDEX, Navigation, NavigationArgs};
use crate::pagination::{Direction, PageEvent};

/// The 1-based index range currently visible in the rotating window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeIndices {
    /// First visible logical index.
    pub left: usize,
    /// Last visible logical index.
    pub right: usize,
}

/// Wraps a 1-based index into `1..=n`.
///
/// A raw result of 0 wraps to `n`, never 0; values past `n` wrap to 1 and
/// onward. Returns 0 only for an empty list.
pub fn wrap1(value: i64, n: usize) -> usize {
    if n == 0 {
        NONE_INDEX
    } else {
        ((value - 1).rem_euclid(n as i64) + 1) as usize
    }
}

/// Configuration for a [`PagedNavigator`].
#[derive(Clone, Setters)]
pub struct PagedNavigatorArgs {
    /// Number of buttons visible at once.
    pub display_count: usize,
    /// Duration of the strip slide on a window shift.
    pub slide_duration: Duration,
    /// Easing curve for the strip slide.
    pub easing: Easing,
    /// Callbacks forwarded to the composed [`Navigation`].
    pub navigation: NavigationArgs,
}

impl Default for PagedNavigatorArgs {
    fn default() -> Self {
        Self {
            display_count: 4,
            slide_duration: Duration::from_millis(300),
            easing: Easing::EaseInOut,
            navigation: NavigationArgs::default(),
        }
    }
}

/// A fixed-window paged navigator over N logical buttons.
pub struct PagedNavigator {
    navigation: Navigation,
    strip: Arc<dyn Element>,
    prev_btn: Option<Arc<dyn Element>>,
    next_btn: Option<Arc<dyn Element>>,
    ticker: Arc<dyn Ticker>,
    display_count: usize,
    slide_duration: Duration,
    easing: Easing,
    active: usize,
    edges: EdgeIndices,
    transition: Option<TransitionHandle>,
    pressed_prev: bool,
    pressed_next: bool,
    destroyed: bool,
}

impl PagedNavigator {
    /// Creates a navigator over a sliding strip, its logical page buttons
    /// and optional prev/next shift buttons.
    pub fn new(
        ticker: Arc<dyn Ticker>,
        strip: Arc<dyn Element>,
        buttons: Vec<Arc<dyn Element>>,
        prev_btn: Option<Arc<dyn Element>>,
        next_btn: Option<Arc<dyn Element>>,
        args: PagedNavigatorArgs,
    ) -> Self {
        let n = buttons.len();
        let display_count = args.display_count.max(1);
        Self {
            navigation: Navigation::new(buttons, args.navigation),
            strip,
            prev_btn,
            next_btn,
            ticker,
            display_count,
            slide_duration: args.slide_duration,
            easing: args.easing,
            active: NONE_INDEX,
            edges: EdgeIndices {
                left: wrap1(1, n),
                right: wrap1(display_count as i64, n),
            },
            transition: None,
            pressed_prev: false,
            pressed_next: false,
            destroyed: false,
        }
    }

    /// The currently visible index range.
    pub fn edges(&self) -> EdgeIndices {
        self.edges
    }

    /// The externally visible selected index.
    pub fn active_index(&self) -> usize {
        self.active
    }

    /// The most recently hovered or interacted index.
    pub fn current_index(&self) -> usize {
        self.navigation.current_index()
    }

    /// Sets the active button from outside (e.g. a rotator auto-advance),
    /// updating the window and strip without emitting a page event.
    pub fn activate(&mut self, index: usize) {
        if self.destroyed {
            return;
        }
        self.navigation.activate(index);
        self.active = self.navigation.activate_index();
        if self.active != NONE_INDEX {
            self.set_window(self.active);
        }
    }

    /// Shifts the window one logical index backward.
    pub fn shift_prev(&mut self) -> Option<PageEvent> {
        self.shift(-1, Direction::Prev)
    }

    /// Shifts the window one logical index forward.
    pub fn shift_next(&mut self) -> Option<PageEvent> {
        self.shift(1, Direction::Next)
    }

    fn shift(&mut self, step: i64, direction: Direction) -> Option<PageEvent> {
        if self.destroyed || self.navigation.is_empty() {
            return None;
        }
        let base = if self.active == NONE_INDEX {
            self.edges.left
        } else {
            self.active
        };
        let new_active = wrap1(base as i64 + step, self.navigation.len());
        self.navigation.activate(new_active);
        self.active = new_active;
        self.set_window(new_active);
        Some(PageEvent {
            index: new_active,
            direction: Some(direction),
        })
    }

    /// Recomputes the visible window from a new active index and slides the
    /// strip accordingly.
    fn set_window(&mut self, active: usize) {
        let n = self.navigation.len();
        self.edges = EdgeIndices {
            left: active,
            right: wrap1(active as i64 + self.display_count as i64 - 1, n),
        };
        self.slide_strip();
    }

    fn button_width(&self) -> Px {
        if let Some(button) = self.navigation.get_btn(1) {
            let width = button.rect().width;
            if width > Px::ZERO {
                return width;
            }
        }
        self.strip.rect().width / self.display_count as i32
    }

    fn slide_strip(&mut self) {
        if let Some(transition) = self.transition.take() {
            transition.cancel();
        }
        let target_x = -(self.button_width() * (self.edges.left as i32 - 1));
        self.transition = Some(animate(
            self.ticker.as_ref(),
            self.strip.clone(),
            PxPosition::new(target_x, Px::ZERO),
            self.slide_duration,
            self.easing,
        ));
    }

    /// Feeds one pointer event through prev/next detection and the
    /// navigation.
    ///
    /// Returns the unified page event when this event selected a page.
    pub fn handle_event(&mut self, event: &CursorEvent) -> Option<PageEvent> {
        if self.destroyed {
            return None;
        }

        let over_prev = self.hit_shift_button(&self.prev_btn, event.position);
        let over_next = self.hit_shift_button(&self.next_btn, event.position);
        match event.content {
            CursorEventContent::Pressed => {
                self.pressed_prev = over_prev;
                self.pressed_next = over_next;
            }
            CursorEventContent::Released => {
                let was_prev = std::mem::replace(&mut self.pressed_prev, false);
                let was_next = std::mem::replace(&mut self.pressed_next, false);
                if was_prev && over_prev {
                    return self.shift_prev();
                }
                if was_next && over_next {
                    return self.shift_next();
                }
            }
            CursorEventContent::Moved => {}
        }

        let click = self.navigation.handle_event(event)?;
        // The navigation already ran its own activate bookkeeping.
        self.active = click.index;
        self.set_window(click.index);
        Some(PageEvent {
            index: click.index,
            direction: None,
        })
    }

    fn hit_shift_button(&self, button: &Option<Arc<dyn Element>>, pos: PxPosition) -> bool {
        button
            .as_ref()
            .map(|b| shifted_box(b.as_ref()).contains(pos))
            .unwrap_or(false)
    }

    /// Cancels the running slide and destroys the navigation. Idempotent.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        if let Some(transition) = self.transition.take() {
            transition.cancel();
        }
        self.navigation.destroy();
        debug!("paged navigator destroyed");
    }
}

fn shifted_box(element: &dyn Element) -> ElementRect {
    let rect = element.rect();
    let offset = element.offset();
    ElementRect::new(
        rect.left + offset.x,
        rect.top + offset.y,
        rect.width,
        rect.height,
    )
}
