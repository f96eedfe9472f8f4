//! Headless pagination demo.
//!
//! Wires a [`Pagination`] controller to a simulated page: mock elements
//! stand in for the wrap/strip/button markup, an interval ticker drives the
//! animations, and a scripted sequence of pointer events and resizes plays
//! the role of the user. Page selections are logged as they surface.
//!
//! Run with `RUST_LOG=debug cargo run -p example` for the full lifecycle
//! trace.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use festoon_components::{Direction, Pagination, PaginationArgs};
use festoon_foundation::{Px, PxPosition};
use festoon_ui::testing::{MockElement, MockSource};
use festoon_ui::{
    CursorEvent, CursorEventContent, IntervalTicker, ResizeDebouncer, Ticker,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

const BUTTON_COUNT: i32 = 8;
const BUTTON_WIDTH: i32 = 90;

/// Builds the simulated markup: a 360 px wrap holding an overflowing strip
/// of page buttons, plus desktop prev/next shift buttons.
fn build_page() -> MockSource {
    let mut source = MockSource::new();
    source.insert("banner-wrap", MockElement::with_rect(0, 0, 360, 48));
    source.insert(
        "banner-strip",
        MockElement::with_rect(0, 0, BUTTON_COUNT * BUTTON_WIDTH, 48),
    );
    for i in 0..BUTTON_COUNT {
        source.insert(
            format!("banner-btn-{}", i + 1),
            MockElement::with_rect(i * BUTTON_WIDTH, 0, BUTTON_WIDTH, 48),
        );
    }
    source.insert("banner-prev", MockElement::with_rect(-48, 0, 40, 48));
    source.insert(
        "banner-next",
        MockElement::with_rect(BUTTON_COUNT * BUTTON_WIDTH + 8, 0, 40, 48),
    );
    source
}

fn click(pagination: &mut Pagination, x: i32) {
    let position = PxPosition::new(Px(x), Px(24));
    pagination.handle_event(&CursorEvent::new(
        Instant::now(),
        position,
        CursorEventContent::Pressed,
    ));
    pagination.handle_event(&CursorEvent::new(
        Instant::now(),
        position,
        CursorEventContent::Released,
    ));
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let source = build_page();
    let ticker: Arc<dyn Ticker> = Arc::new(IntervalTicker::new());

    let args = PaginationArgs::default()
        .wrap_key("banner-wrap")
        .strip_key("banner-strip")
        .button_keys((1..=BUTTON_COUNT).map(|i| format!("banner-btn-{i}")))
        .prev_key("banner-prev")
        .next_key("banner-next")
        .on_page(|page| info!(index = page.index, direction = ?page.direction, "page selected"));

    // A phone-sized viewport selects the swipeable strip.
    let mut pagination = Pagination::new(&source, ticker.clone(), Px(390), args);
    info!(kind = ?pagination.kind(), "controller constructed");

    click(&mut pagination, 150); // button 2
    click(&mut pagination, 50); // button 1
    thread::sleep(Duration::from_millis(80)); // let the strip settle

    // The banner rotator auto-advances independently; keep the pagination
    // in sync without echoing a page event back at it.
    pagination.activate(3, Some(Direction::Next));
    info!(index = pagination.current_index(), "synced from rotator");

    // A window resize burst ends on a desktop width; only the settled
    // width reaches the controller.
    let mut debouncer = ResizeDebouncer::new();
    let t0 = Instant::now();
    for (offset_ms, width) in [(0u64, 700), (40, 980), (80, 1280)] {
        debouncer.push(Px(width), t0 + Duration::from_millis(offset_ms));
    }
    if let Some(width) = debouncer.poll(t0 + Duration::from_millis(200)) {
        pagination.resize(width);
    }
    info!(
        kind = ?pagination.kind(),
        index = pagination.current_index(),
        "after breakpoint crossing"
    );

    // Desktop shift buttons walk the rotating window.
    click(&mut pagination, BUTTON_COUNT * BUTTON_WIDTH + 20); // next
    click(&mut pagination, BUTTON_COUNT * BUTTON_WIDTH + 20); // next
    click(&mut pagination, -40); // prev
    thread::sleep(Duration::from_millis(350)); // let the strip slide finish

    pagination.destroy();
    info!("done");
}
