//! Button-strip navigation model.
//!
//! Associates a set of clickable button elements with an active index and
//! dispatches pointer events to caller-supplied callbacks. Indices are
//! 1-based; 0 is the "none" sentinel.

use std::sync::Arc;

use festoon_ui::{CallbackWith, CursorEvent, CursorEventContent, Element, ElementRect, PxPosition};
use tracing::debug;

/// The "no button" sentinel index.
pub const NONE_INDEX: usize = 0;

/// Hover transition on a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoverEvent {
    /// 1-based button index.
    pub index: usize,
    /// `true` on enter, `false` on leave.
    pub entered: bool,
}

/// A completed click on a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickEvent {
    /// The active index before the click ([`NONE_INDEX`] when none).
    pub previous_index: usize,
    /// 1-based index of the clicked button.
    pub index: usize,
}

/// An active-index change, observed before state mutates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivateEvent {
    /// The active index being replaced.
    pub previous_index: usize,
    /// The new active index ([`NONE_INDEX`] for out-of-range requests).
    pub index: usize,
}

/// Callbacks for a [`Navigation`] instance.
///
/// Hover, press and release are independent of active-index bookkeeping;
/// click and activate participate in it.
#[derive(Clone, Default)]
pub struct NavigationArgs {
    /// Fired on hover enter/leave per button.
    pub on_hover: Option<CallbackWith<HoverEvent>>,
    /// Fired with the button index on pointer press.
    pub on_press: Option<CallbackWith<usize>>,
    /// Fired with the button index on pointer release over a button.
    pub on_release: Option<CallbackWith<usize>>,
    /// Fired on a completed click, before the activate callback.
    pub on_click: Option<CallbackWith<ClickEvent>>,
    /// Fired on every active-index change, before state mutates.
    pub on_activate: Option<CallbackWith<ActivateEvent>>,
}

impl NavigationArgs {
    /// Creates an args value with no callbacks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the hover handler.
    pub fn on_hover<F>(mut self, handler: F) -> Self
    where
        F: Fn(HoverEvent) + Send + Sync + 'static,
    {
        self.on_hover = Some(CallbackWith::new(handler));
        self
    }

    /// Sets the press handler.
    pub fn on_press<F>(mut self, handler: F) -> Self
    where
        F: Fn(usize) + Send + Sync + 'static,
    {
        self.on_press = Some(CallbackWith::new(handler));
        self
    }

    /// Sets the release handler.
    pub fn on_release<F>(mut self, handler: F) -> Self
    where
        F: Fn(usize) + Send + Sync + 'static,
    {
        self.on_release = Some(CallbackWith::new(handler));
        self
    }

    /// Sets the click handler.
    pub fn on_click<F>(mut self, handler: F) -> Self
    where
        F: Fn(ClickEvent) + Send + Sync + 'static,
    {
        self.on_click = Some(CallbackWith::new(handler));
        self
    }

    /// Sets the activate handler.
    pub fn on_activate<F>(mut self, handler: F) -> Self
    where
        F: Fn(ActivateEvent) + Send + Sync + 'static,
    {
        self.on_activate = Some(CallbackWith::new(handler));
        self
    }
}

/// Tracks which of N buttons is active and dispatches pointer callbacks.
pub struct Navigation {
    buttons: Vec<Arc<dyn Element>>,
    args: NavigationArgs,
    current_index: usize,
    activate_index: usize,
    hovered: usize,
    pressed: usize,
    destroyed: bool,
}

impl Navigation {
    /// Creates a navigation over `buttons`.
    pub fn new(buttons: Vec<Arc<dyn Element>>, args: NavigationArgs) -> Self {
        Self {
            buttons,
            args,
            current_index: NONE_INDEX,
            activate_index: NONE_INDEX,
            hovered: NONE_INDEX,
            pressed: NONE_INDEX,
            destroyed: false,
        }
    }

    /// Number of buttons.
    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    /// Whether the button list is empty.
    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }

    /// The externally visible selected index ([`NONE_INDEX`] when none).
    pub fn activate_index(&self) -> usize {
        self.activate_index
    }

    /// The most recently hovered or interacted index.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Whether [`destroy`](Self::destroy) has run.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// The 1-based button, or `None` for any out-of-range index (including
    /// 0 and negative-equivalent values).
    pub fn get_btn(&self, index: usize) -> Option<Arc<dyn Element>> {
        if (1..=self.buttons.len()).contains(&index) {
            Some(self.buttons[index - 1].clone())
        } else {
            None
        }
    }

    /// The 1-based index of the button under `position`, or [`NONE_INDEX`].
    pub fn hit_test(&self, position: PxPosition) -> usize {
        for (i, button) in self.buttons.iter().enumerate() {
            if button_box(button.as_ref()).contains(position) {
                return i + 1;
            }
        }
        NONE_INDEX
    }

    /// Sets the active index.
    ///
    /// Out-of-range values (including 0) select the "none" sentinel. The
    /// activate callback observes `{previous_index, index}` before the
    /// state mutates.
    pub fn activate(&mut self, index: usize) {
        if self.destroyed {
            return;
        }
        let index = if (1..=self.buttons.len()).contains(&index) {
            index
        } else {
            NONE_INDEX
        };
        if let Some(on_activate) = &self.args.on_activate {
            on_activate.call(ActivateEvent {
                previous_index: self.activate_index,
                index,
            });
        }
        self.activate_index = index;
    }

    /// Feeds one pointer event through hover/press/click dispatch.
    ///
    /// Returns the click when this event completed one, so composing widgets
    /// can react without installing their own callbacks.
    pub fn handle_event(&mut self, event: &CursorEvent) -> Option<ClickEvent> {
        if self.destroyed {
            return None;
        }
        let hit = self.hit_test(event.position);
        match event.content {
            CursorEventContent::Moved => {
                self.update_hover(hit);
                None
            }
            CursorEventContent::Pressed => {
                self.update_hover(hit);
                if hit != NONE_INDEX {
                    self.pressed = hit;
                    self.current_index = hit;
                    if let Some(on_press) = &self.args.on_press {
                        on_press.call(hit);
                    }
                }
                None
            }
            CursorEventContent::Released => {
                let pressed = std::mem::replace(&mut self.pressed, NONE_INDEX);
                if hit == NONE_INDEX {
                    return None;
                }
                if let Some(on_release) = &self.args.on_release {
                    on_release.call(hit);
                }
                if pressed == hit {
                    Some(self.click(hit))
                } else {
                    None
                }
            }
        }
    }

    fn update_hover(&mut self, hit: usize) {
        if hit == self.hovered {
            return;
        }
        if self.hovered != NONE_INDEX
            && let Some(on_hover) = &self.args.on_hover
        {
            on_hover.call(HoverEvent {
                index: self.hovered,
                entered: false,
            });
        }
        if hit != NONE_INDEX {
            if let Some(on_hover) = &self.args.on_hover {
                on_hover.call(HoverEvent {
                    index: hit,
                    entered: true,
                });
            }
            self.current_index = hit;
        }
        self.hovered = hit;
    }

    /// Completed click: click callback, then activate callback, then both
    /// indices update.
    fn click(&mut self, index: usize) -> ClickEvent {
        let click = ClickEvent {
            previous_index: self.activate_index,
            index,
        };
        if let Some(on_click) = &self.args.on_click {
            on_click.call(click);
        }
        if let Some(on_activate) = &self.args.on_activate {
            on_activate.call(ActivateEvent {
                previous_index: self.activate_index,
                index,
            });
        }
        self.activate_index = index;
        self.current_index = index;
        click
    }

    /// Detaches everything: buttons, callbacks, indices. Idempotent; public
    /// methods on a destroyed instance are no-ops.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        debug!(buttons = self.buttons.len(), "navigation destroyed");
        self.destroyed = true;
        self.buttons.clear();
        self.args = NavigationArgs::default();
        self.current_index = NONE_INDEX;
        self.activate_index = NONE_INDEX;
        self.hovered = NONE_INDEX;
        self.pressed = NONE_INDEX;
    }
}

fn button_box(button: &dyn Element) -> ElementRect {
    let rect = button.rect();
    let offset = button.offset();
    ElementRect::new(
        rect.left + offset.x,
        rect.top + offset.y,
        rect.width,
        rect.height,
    )
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use festoon_foundation::Px;
    use festoon_ui::testing::MockElement;
    use parking_lot::Mutex;

    use super::*;

    /// Three 40x20 buttons laid out left to right at y=0.
    fn three_buttons() -> Vec<Arc<dyn Element>> {
        (0..3)
            .map(|i| MockElement::with_rect(i * 40, 0, 40, 20) as Arc<dyn Element>)
            .collect()
    }

    fn event(x: i32, y: i32, content: CursorEventContent) -> CursorEvent {
        CursorEvent::new(Instant::now(), PxPosition::new(Px(x), Px(y)), content)
    }

    #[test]
    fn test_activate_clamps_to_sentinel() {
        let mut navi = Navigation::new(three_buttons(), NavigationArgs::new());

        navi.activate(2);
        assert_eq!(navi.activate_index(), 2);

        navi.activate(9);
        assert_eq!(navi.activate_index(), NONE_INDEX);

        navi.activate(0);
        assert_eq!(navi.activate_index(), NONE_INDEX);
    }

    #[test]
    fn test_activate_callback_sees_previous_state() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_in = seen.clone();
        let args = NavigationArgs::new().on_activate(move |e: ActivateEvent| {
            seen_in.lock().push((e.previous_index, e.index));
        });
        let mut navi = Navigation::new(three_buttons(), args);

        navi.activate(1);
        navi.activate(3);
        navi.activate(99);
        assert_eq!(seen.lock().as_slice(), &[(0, 1), (1, 3), (3, 0)]);
    }

    #[test]
    fn test_click_dispatch_order_and_state() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let log_click = log.clone();
        let log_activate = log.clone();
        let args = NavigationArgs::new()
            .on_click(move |e: ClickEvent| {
                log_click.lock().push(format!("click {}->{}", e.previous_index, e.index));
            })
            .on_activate(move |e: ActivateEvent| {
                log_activate
                    .lock()
                    .push(format!("activate {}->{}", e.previous_index, e.index));
            });
        let mut navi = Navigation::new(three_buttons(), args);

        // Press and release inside button 2.
        navi.handle_event(&event(50, 10, CursorEventContent::Pressed));
        let click = navi.handle_event(&event(50, 10, CursorEventContent::Released));

        assert_eq!(
            click,
            Some(ClickEvent {
                previous_index: 0,
                index: 2
            })
        );
        assert_eq!(
            log.lock().as_slice(),
            &["click 0->2".to_string(), "activate 0->2".to_string()]
        );
        assert_eq!(navi.activate_index(), 2);
        assert_eq!(navi.current_index(), 2);
    }

    #[test]
    fn test_press_and_release_on_different_buttons_is_not_a_click() {
        let mut navi = Navigation::new(three_buttons(), NavigationArgs::new());

        navi.handle_event(&event(10, 10, CursorEventContent::Pressed));
        let click = navi.handle_event(&event(90, 10, CursorEventContent::Released));

        assert_eq!(click, None);
        assert_eq!(navi.activate_index(), NONE_INDEX);
    }

    #[test]
    fn test_hover_enter_and_leave() {
        let hovers = Arc::new(Mutex::new(Vec::new()));
        let hovers_in = hovers.clone();
        let args = NavigationArgs::new().on_hover(move |e: HoverEvent| {
            hovers_in.lock().push((e.index, e.entered));
        });
        let mut navi = Navigation::new(three_buttons(), args);

        navi.handle_event(&event(10, 10, CursorEventContent::Moved)); // enter 1
        navi.handle_event(&event(50, 10, CursorEventContent::Moved)); // leave 1, enter 2
        navi.handle_event(&event(300, 10, CursorEventContent::Moved)); // leave 2

        assert_eq!(
            hovers.lock().as_slice(),
            &[(1, true), (1, false), (2, true), (2, false)]
        );
        // Hovering tracks current but never touches the active index.
        assert_eq!(navi.current_index(), 2);
        assert_eq!(navi.activate_index(), NONE_INDEX);
    }

    #[test]
    fn test_get_btn_bounds() {
        let navi = Navigation::new(three_buttons(), NavigationArgs::new());

        assert!(navi.get_btn(1).is_some());
        assert!(navi.get_btn(3).is_some());
        assert!(navi.get_btn(0).is_none());
        assert!(navi.get_btn(4).is_none());
    }

    #[test]
    fn test_destroy_is_idempotent_and_silences_callbacks() {
        let hits = Arc::new(Mutex::new(0usize));
        let hits_in = hits.clone();
        let args = NavigationArgs::new().on_press(move |_| {
            *hits_in.lock() += 1;
        });
        let mut navi = Navigation::new(three_buttons(), args);

        navi.handle_event(&event(10, 10, CursorEventContent::Pressed));
        assert_eq!(*hits.lock(), 1);

        navi.destroy();
        navi.destroy();
        assert!(navi.is_destroyed());

        navi.handle_event(&event(10, 10, CursorEventContent::Pressed));
        navi.activate(1);
        assert_eq!(*hits.lock(), 1);
        assert_eq!(navi.activate_index(), NONE_INDEX);
        assert!(navi.get_btn(1).is_none());
    }
}
