//! Resize burst coalescing.
//!
//! Mobile browsers and window managers fire resize/orientation events in
//! bursts. Navigator swapping is expensive (destroy + rebuild), so the
//! embedder funnels raw widths through a [`ResizeDebouncer`] and only
//! forwards a width once the burst has been quiet for the configured window.

use std::time::{Duration, Instant};

use festoon_foundation::Px;

/// Coalesces a burst of resize events into a single settled width.
#[derive(Debug, Clone)]
pub struct ResizeDebouncer {
    quiet_window: Duration,
    pending: Option<(Px, Instant)>,
}

impl ResizeDebouncer {
    /// The default quiet window.
    pub const DEFAULT_QUIET_WINDOW: Duration = Duration::from_millis(100);

    /// Creates a debouncer with the default quiet window.
    pub fn new() -> Self {
        Self::with_quiet_window(Self::DEFAULT_QUIET_WINDOW)
    }

    /// Creates a debouncer with a custom quiet window.
    pub fn with_quiet_window(quiet_window: Duration) -> Self {
        Self {
            quiet_window,
            pending: None,
        }
    }

    /// Records a raw resize event. Later pushes replace earlier ones.
    pub fn push(&mut self, width: Px, now: Instant) {
        self.pending = Some((width, now));
    }

    /// Returns the settled width once no push has arrived for the quiet
    /// window, consuming it. Returns `None` while a burst is still active
    /// or nothing is pending.
    pub fn poll(&mut self, now: Instant) -> Option<Px> {
        let (width, last_push) = self.pending?;
        if now.saturating_duration_since(last_push) >= self.quiet_window {
            self.pending = None;
            Some(width)
        } else {
            None
        }
    }
}

impl Default for ResizeDebouncer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burst_yields_only_final_width() {
        let mut debouncer = ResizeDebouncer::with_quiet_window(Duration::from_millis(100));
        let t0 = Instant::now();

        debouncer.push(Px(300), t0);
        debouncer.push(Px(320), t0 + Duration::from_millis(30));
        debouncer.push(Px(375), t0 + Duration::from_millis(60));

        assert_eq!(debouncer.poll(t0 + Duration::from_millis(90)), None);
        assert_eq!(
            debouncer.poll(t0 + Duration::from_millis(160)),
            Some(Px(375))
        );
        // Consumed; nothing further until the next push.
        assert_eq!(debouncer.poll(t0 + Duration::from_millis(300)), None);
    }

    #[test]
    fn test_empty_debouncer_yields_nothing() {
        let mut debouncer = ResizeDebouncer::new();
        assert_eq!(debouncer.poll(Instant::now()), None);
    }
}
