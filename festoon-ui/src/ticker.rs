//! Frame tick scheduling.
//!
//! Animated widgets advance their state once per frame. Where the frames come
//! from is the embedder's business: a compositor callback, a vsync signal, or
//! nothing at all, in which case a fixed-interval timer thread stands in.
//! Widgets only see the [`Ticker`] trait and pick neither implementation;
//! the embedder selects one at startup and shares it.
//!
//! A subscription callback returns [`TickControl::Continue`] to stay
//! subscribed or [`TickControl::Stop`] to remove itself, which is how
//! settling animations terminate without an external observer.
//!
//! Callbacks are dispatched with the subscriber registry locked: a callback
//! must not subscribe to or cancel on the same ticker from inside itself.
//! [`TickSubscription::cancel`] blocks until any in-flight dispatch round
//! completes, so after `cancel` returns the callback is never invoked again.

use std::sync::{Arc, Weak};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::trace;

/// Whether a tick callback stays subscribed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    /// Keep receiving ticks.
    Continue,
    /// Unsubscribe after this tick.
    Stop,
}

/// Boxed per-frame callback.
pub type TickFn = Box<dyn FnMut(Instant) -> TickControl + Send>;

struct RegistryEntry {
    id: u64,
    callback: TickFn,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    entries: Vec<RegistryEntry>,
}

/// A source of per-frame callbacks.
pub trait Ticker: Send + Sync {
    /// Registers `callback` to run on every subsequent tick until it returns
    /// [`TickControl::Stop`] or the subscription is cancelled.
    fn subscribe(&self, callback: TickFn) -> TickSubscription;
}

/// Handle to an active tick subscription.
///
/// Dropping the handle does not cancel the subscription; teardown is an
/// explicit lifecycle step for the owning widget.
pub struct TickSubscription {
    registry: Weak<Mutex<Registry>>,
    id: u64,
}

impl TickSubscription {
    /// Detaches the callback. Idempotent; safe to call after the callback
    /// already stopped itself.
    pub fn cancel(&self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.lock().entries.retain(|entry| entry.id != self.id);
        }
    }
}

#[derive(Clone, Default)]
struct TickerCore {
    registry: Arc<Mutex<Registry>>,
}

impl TickerCore {
    fn subscribe(&self, callback: TickFn) -> TickSubscription {
        let mut registry = self.registry.lock();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.entries.push(RegistryEntry { id, callback });
        trace!(id, "tick subscription added");
        TickSubscription {
            registry: Arc::downgrade(&self.registry),
            id,
        }
    }

    fn dispatch(&self, now: Instant) {
        let mut registry = self.registry.lock();
        registry
            .entries
            .retain_mut(|entry| matches!((entry.callback)(now), TickControl::Continue));
    }
}

/// Ticker driven by the embedder's own frame callback.
///
/// The embedder calls [`advance`](Self::advance) once per display refresh.
#[derive(Clone, Default)]
pub struct FrameSyncedTicker {
    core: TickerCore,
}

impl FrameSyncedTicker {
    /// Creates a ticker with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispatches one tick to every live subscriber.
    pub fn advance(&self, now: Instant) {
        self.core.dispatch(now);
    }
}

impl Ticker for FrameSyncedTicker {
    fn subscribe(&self, callback: TickFn) -> TickSubscription {
        self.core.subscribe(callback)
    }
}

/// Fixed-interval fallback ticker.
///
/// Runs a background thread that dispatches at the configured period.
/// Dropping the ticker stops the thread and joins it; no tick is dispatched
/// after the drop returns.
pub struct IntervalTicker {
    core: TickerCore,
    shutdown: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl IntervalTicker {
    /// The default dispatch period, roughly 40 Hz.
    pub const DEFAULT_PERIOD: Duration = Duration::from_millis(25);

    /// Creates a ticker dispatching at [`DEFAULT_PERIOD`](Self::DEFAULT_PERIOD).
    pub fn new() -> Self {
        Self::with_period(Self::DEFAULT_PERIOD)
    }

    /// Creates a ticker dispatching at `period`.
    pub fn with_period(period: Duration) -> Self {
        let core = TickerCore::default();
        let shutdown = Arc::new(AtomicBool::new(false));

        let thread_core = core.clone();
        let thread_shutdown = shutdown.clone();
        let worker = thread::Builder::new()
            .name("festoon-interval-ticker".into())
            .spawn(move || {
                while !thread_shutdown.load(Ordering::Acquire) {
                    thread::sleep(period);
                    if thread_shutdown.load(Ordering::Acquire) {
                        break;
                    }
                    thread_core.dispatch(Instant::now());
                }
            })
            .ok();

        Self {
            core,
            shutdown,
            worker,
        }
    }
}

impl Default for IntervalTicker {
    fn default() -> Self {
        Self::new()
    }
}

impl Ticker for IntervalTicker {
    fn subscribe(&self, callback: TickFn) -> TickSubscription {
        self.core.subscribe(callback)
    }
}

impl Drop for IntervalTicker {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::Release);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}
