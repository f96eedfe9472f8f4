//! One-shot offset transitions with easing.
//!
//! [`animate`] is the transition primitive consumed by widgets that want a
//! fire-and-forget slide (move this element to that offset over 300 ms)
//! instead of a continuously tracked target. It drives the element through a
//! [`Ticker`] subscription and removes itself on completion.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use festoon_foundation::{Px, PxPosition};

use crate::element::Element;
use crate::ticker::{TickControl, TickSubscription, Ticker};

/// Easing curve applied to transition progress.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    /// Constant-rate progress.
    Linear,
    /// Cubic ease-out: fast start, decelerating finish.
    EaseOut,
    /// Cubic ease-in-out.
    #[default]
    EaseInOut,
}

impl Easing {
    /// Maps linear progress in [0.0, 1.0] to eased progress in [0.0, 1.0].
    pub fn apply(self, progress: f32) -> f32 {
        let t = progress.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseOut => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

/// Handle to a running transition.
pub struct TransitionHandle {
    subscription: TickSubscription,
    finished: Arc<AtomicBool>,
}

impl TransitionHandle {
    /// Stops the transition, leaving the element at its current offset.
    ///
    /// A no-op when the transition already completed.
    pub fn cancel(&self) {
        self.subscription.cancel();
    }

    /// Whether the transition ran to completion.
    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::Acquire)
    }
}

fn lerp_px(from: Px, to: Px, progress: f32) -> Px {
    Px::saturating_from_f32((from.to_f32() + (to.to_f32() - from.to_f32()) * progress).round())
}

/// Eases `element`'s offset from its current value to `target` over
/// `duration`.
///
/// The starting offset is sampled when the call is made; the clock starts on
/// the first tick, so a transition started between frames still runs its
/// full duration. A zero `duration` jumps to the target on the next tick.
pub fn animate(
    ticker: &dyn Ticker,
    element: Arc<dyn Element>,
    target: PxPosition,
    duration: Duration,
    easing: Easing,
) -> TransitionHandle {
    let start_offset = element.offset();
    let finished = Arc::new(AtomicBool::new(false));
    let finished_in = finished.clone();
    let mut started_at: Option<Instant> = None;

    let subscription = ticker.subscribe(Box::new(move |now| {
        let started = *started_at.get_or_insert(now);
        let progress = if duration.is_zero() {
            1.0
        } else {
            (now.saturating_duration_since(started).as_secs_f32() / duration.as_secs_f32())
                .clamp(0.0, 1.0)
        };

        if progress >= 1.0 {
            element.set_offset(target);
            finished_in.store(true, Ordering::Release);
            return TickControl::Stop;
        }

        let eased = easing.apply(progress);
        element.set_offset(PxPosition::new(
            lerp_px(start_offset.x, target.x, eased),
            lerp_px(start_offset.y, target.y, eased),
        ));
        TickControl::Continue
    }));

    TransitionHandle {
        subscription,
        finished,
    }
}
