//! Responsive pagination controller.
//!
//! Owns exactly one of the two navigator implementations at a time (the
//! swipeable [`SlideNavigator`] below the `pc` breakpoint, the windowed
//! [`PagedNavigator`] at or above it), swapping on breakpoint crossings
//! while preserving the logical current index. Whichever navigator is live,
//! page selections surface as one unified [`PageEvent`].

use std::sync::Arc;
use std::time::Duration;

use derive_setters::Setters;
use festoon_foundation::{Dp, Px};
use festoon_ui::{
    CallbackWith, CursorEvent, Easing, Element, ElementError, ElementSource, Ticker,
};
use thiserror::Error;
use tracing::{debug, warn};

use crate::breakpoint::{Breakpoints, NavigatorKind};
use crate::navigation::{NONE_INDEX, NavigationArgs};
use crate::paged_navigator::{PagedNavigator, PagedNavigatorArgs};
use crate::slide_navigator::{SlideNavigator, SlideNavigatorArgs};

/// Which way a shift-driven page change went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Toward lower indices.
    Prev,
    /// Toward higher indices.
    Next,
}

/// The unified "page button activated" notification.
///
/// Consumed by an external content rotator; `direction` is present only for
/// prev/next shifts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageEvent {
    /// 1-based logical page index.
    pub index: usize,
    /// Shift direction, when the selection came from a prev/next button.
    pub direction: Option<Direction>,
}

/// Internal construction failure; never escapes the public API.
#[derive(Debug, Error)]
pub enum NavigatorError {
    /// A required element was missing from the page.
    #[error(transparent)]
    MissingElement(#[from] ElementError),
}

/// Configuration for a [`Pagination`] controller.
#[derive(Clone, Setters)]
pub struct PaginationArgs {
    /// Element key of the outer wrap; missing makes the controller inert.
    #[setters(into)]
    pub wrap_key: String,
    /// Element key of the sliding button strip.
    #[setters(into)]
    pub strip_key: String,
    /// Element keys of the logical page buttons, in order.
    #[setters(skip)]
    pub button_keys: Vec<String>,
    /// Element key of the desktop "previous" shift button.
    #[setters(strip_option, into)]
    pub prev_key: Option<String>,
    /// Element key of the desktop "next" shift button.
    #[setters(strip_option, into)]
    pub next_key: Option<String>,
    /// Viewport thresholds for navigator selection.
    pub breakpoints: Breakpoints,
    /// Visible button count of the desktop window.
    pub display_count: usize,
    /// Mobile slide animation speed constant in (0, 1].
    pub slide_speed: f32,
    /// Inset between the wrap edges and the strip's drag area.
    pub padding: Dp,
    /// Desktop strip slide duration.
    pub slide_duration: Duration,
    /// Desktop strip slide easing.
    pub easing: Easing,
    /// Callbacks forwarded to whichever navigation is live.
    #[setters(skip)]
    pub navigation: NavigationArgs,
    /// Fired for every page selection, regardless of navigator.
    #[setters(skip)]
    pub on_page: Option<CallbackWith<PageEvent>>,
}

impl PaginationArgs {
    /// Sets the logical page button keys.
    pub fn button_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.button_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the navigation callbacks.
    pub fn navigation(mut self, navigation: NavigationArgs) -> Self {
        self.navigation = navigation;
        self
    }

    /// Sets the page-selection handler.
    pub fn on_page<F>(mut self, handler: F) -> Self
    where
        F: Fn(PageEvent) + Send + Sync + 'static,
    {
        self.on_page = Some(CallbackWith::new(handler));
        self
    }
}

impl Default for PaginationArgs {
    fn default() -> Self {
        Self {
            wrap_key: String::new(),
            strip_key: String::new(),
            button_keys: Vec::new(),
            prev_key: None,
            next_key: None,
            breakpoints: Breakpoints::default(),
            display_count: 4,
            slide_speed: 0.5,
            padding: Dp::ZERO,
            slide_duration: Duration::from_millis(300),
            easing: Easing::EaseInOut,
            navigation: NavigationArgs::default(),
            on_page: None,
        }
    }
}

enum ActiveNavigator {
    Mobile(SlideNavigator),
    Desktop(PagedNavigator),
}

struct Parts {
    ticker: Arc<dyn Ticker>,
    wrap: Arc<dyn Element>,
    strip: Arc<dyn Element>,
    buttons: Vec<Arc<dyn Element>>,
    prev_btn: Option<Arc<dyn Element>>,
    next_btn: Option<Arc<dyn Element>>,
    args: PaginationArgs,
    kind: NavigatorKind,
    navigator: ActiveNavigator,
    current_index: usize,
}

/// The responsive pagination controller.
///
/// Constructed inert when its wrap or strip element is absent; an inert
/// controller accepts every call and does nothing.
pub struct Pagination {
    parts: Option<Parts>,
}

impl Pagination {
    /// Resolves elements through `source` and builds the navigator matching
    /// `viewport_width`.
    pub fn new(
        source: &dyn ElementSource,
        ticker: Arc<dyn Ticker>,
        viewport_width: Px,
        args: PaginationArgs,
    ) -> Self {
        let parts = match Self::build_parts(source, ticker, viewport_width, args) {
            Ok(parts) => Some(parts),
            Err(error) => {
                warn!(%error, "pagination element missing, controller is inert");
                None
            }
        };
        Self { parts }
    }

    fn build_parts(
        source: &dyn ElementSource,
        ticker: Arc<dyn Ticker>,
        viewport_width: Px,
        args: PaginationArgs,
    ) -> Result<Parts, NavigatorError> {
        let wrap = source.find(&args.wrap_key)?;
        let strip = source.find(&args.strip_key)?;

        let mut buttons = Vec::with_capacity(args.button_keys.len());
        for key in &args.button_keys {
            match source.find(key) {
                Ok(button) => buttons.push(button),
                Err(error) => warn!(%error, "page button missing, skipping"),
            }
        }
        let prev_btn = args.prev_key.as_deref().and_then(|k| source.find(k).ok());
        let next_btn = args.next_key.as_deref().and_then(|k| source.find(k).ok());

        let kind = args.breakpoints.navigator_for(viewport_width);
        let navigator = build_navigator(
            kind,
            &ticker,
            &wrap,
            &strip,
            &buttons,
            &prev_btn,
            &next_btn,
            &args,
        );
        debug!(?kind, buttons = buttons.len(), "pagination ready");

        Ok(Parts {
            ticker,
            wrap,
            strip,
            buttons,
            prev_btn,
            next_btn,
            args,
            kind,
            navigator,
            current_index: NONE_INDEX,
        })
    }

    /// Whether construction failed to resolve the required elements.
    pub fn is_inert(&self) -> bool {
        self.parts.is_none()
    }

    /// The navigator implementation currently live.
    pub fn kind(&self) -> Option<NavigatorKind> {
        self.parts.as_ref().map(|p| p.kind)
    }

    /// The logical current page index ([`NONE_INDEX`] when none).
    pub fn current_index(&self) -> usize {
        self.parts
            .as_ref()
            .map(|p| p.current_index)
            .unwrap_or(NONE_INDEX)
    }

    /// Re-evaluates the breakpoint for a settled viewport width.
    ///
    /// On a category change the live navigator is destroyed and the other
    /// implementation constructed in its place, preserving the current
    /// index. Within the same category the live navigator just reflows.
    pub fn resize(&mut self, viewport_width: Px) {
        let Some(parts) = self.parts.as_mut() else {
            return;
        };
        let new_kind = parts.args.breakpoints.navigator_for(viewport_width);
        if new_kind == parts.kind {
            if let ActiveNavigator::Mobile(navigator) = &mut parts.navigator {
                navigator.resize();
            }
            return;
        }

        debug!(from = ?parts.kind, to = ?new_kind, "breakpoint crossed, swapping navigator");
        match &mut parts.navigator {
            ActiveNavigator::Mobile(navigator) => navigator.destroy(),
            ActiveNavigator::Desktop(navigator) => navigator.destroy(),
        }
        parts.kind = new_kind;
        parts.navigator = build_navigator(
            new_kind,
            &parts.ticker,
            &parts.wrap,
            &parts.strip,
            &parts.buttons,
            &parts.prev_btn,
            &parts.next_btn,
            &parts.args,
        );
        if parts.current_index != NONE_INDEX {
            match &mut parts.navigator {
                ActiveNavigator::Mobile(navigator) => navigator.activate(parts.current_index),
                ActiveNavigator::Desktop(navigator) => navigator.activate(parts.current_index),
            }
        }
    }

    /// Synchronizes the active visual state from outside (e.g. a banner
    /// rotator's auto-advance) without re-emitting a page event.
    pub fn activate(&mut self, index: usize, _direction: Option<Direction>) {
        let Some(parts) = self.parts.as_mut() else {
            return;
        };
        let applied = match &mut parts.navigator {
            ActiveNavigator::Mobile(navigator) => {
                navigator.activate(index);
                navigator.active_index()
            }
            ActiveNavigator::Desktop(navigator) => {
                navigator.activate(index);
                navigator.active_index()
            }
        };
        parts.current_index = applied;
    }

    /// Feeds one pointer event to the live navigator.
    ///
    /// When the event selected a page, the unified page event fires through
    /// `on_page` and is also returned.
    pub fn handle_event(&mut self, event: &CursorEvent) -> Option<PageEvent> {
        let parts = self.parts.as_mut()?;
        let page = match &mut parts.navigator {
            ActiveNavigator::Mobile(navigator) => {
                navigator.handle_event(event).map(|click| PageEvent {
                    index: click.index,
                    direction: None,
                })
            }
            ActiveNavigator::Desktop(navigator) => navigator.handle_event(event),
        }?;
        parts.current_index = page.index;
        if let Some(on_page) = &parts.args.on_page {
            on_page.call(page);
        }
        Some(page)
    }

    /// Destroys the live navigator and renders the controller inert.
    /// Idempotent.
    pub fn destroy(&mut self) {
        let Some(mut parts) = self.parts.take() else {
            return;
        };
        match &mut parts.navigator {
            ActiveNavigator::Mobile(navigator) => navigator.destroy(),
            ActiveNavigator::Desktop(navigator) => navigator.destroy(),
        }
        debug!("pagination destroyed");
    }
}

#[allow(clippy::too_many_arguments)]
fn build_navigator(
    kind: NavigatorKind,
    ticker: &Arc<dyn Ticker>,
    wrap: &Arc<dyn Element>,
    strip: &Arc<dyn Element>,
    buttons: &[Arc<dyn Element>],
    prev_btn: &Option<Arc<dyn Element>>,
    next_btn: &Option<Arc<dyn Element>>,
    args: &PaginationArgs,
) -> ActiveNavigator {
    match kind {
        NavigatorKind::Mobile => ActiveNavigator::Mobile(SlideNavigator::new(
            ticker.as_ref(),
            wrap.clone(),
            strip.clone(),
            buttons.to_vec(),
            SlideNavigatorArgs::default()
                .speed(args.slide_speed)
                .padding(args.padding)
                .navigation(args.navigation.clone()),
        )),
        NavigatorKind::Desktop => ActiveNavigator::Desktop(PagedNavigator::new(
            ticker.clone(),
            strip.clone(),
            buttons.to_vec(),
            prev_btn.clone(),
            next_btn.clone(),
            PagedNavigatorArgs::default()
                .display_count(args.display_count)
                .slide_duration(args.slide_duration)
                .easing(args.easing)
                .navigation(args.navigation.clone()),
        )),
    }
}
