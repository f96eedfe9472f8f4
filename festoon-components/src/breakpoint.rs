//! Named viewport-width thresholds.
//!
//! The pagination controller decides which navigator implementation to run
//! from the viewport width alone. Thresholds are configuration, fixed at
//! construction; `tablet < pc < max` in ascending pixel order.

use festoon_foundation::Px;

/// Which navigator implementation serves a given viewport width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigatorKind {
    /// Swipeable button strip for narrow viewports.
    Mobile,
    /// Paged button window for wide viewports.
    Desktop,
}

/// Coarse viewport classification, mostly useful for logging and styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportClass {
    /// Narrower than the `tablet` threshold.
    Phone,
    /// At least `tablet`, narrower than `pc`.
    Tablet,
    /// At least `pc`, narrower than `max`.
    Desktop,
    /// At least `max`.
    Wide,
}

/// Named width thresholds in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Breakpoints {
    /// Lower bound of the tablet range.
    pub tablet: Px,
    /// Lower bound of the desktop range; selects the desktop navigator.
    pub pc: Px,
    /// Lower bound of the wide range.
    pub max: Px,
}

impl Breakpoints {
    /// Creates a breakpoint table. Callers are expected to pass thresholds
    /// in ascending order.
    pub const fn new(tablet: Px, pc: Px, max: Px) -> Self {
        Self { tablet, pc, max }
    }

    /// The navigator implementation serving `width`.
    pub fn navigator_for(&self, width: Px) -> NavigatorKind {
        if width >= self.pc {
            NavigatorKind::Desktop
        } else {
            NavigatorKind::Mobile
        }
    }

    /// Classifies `width` against all three thresholds.
    pub fn classify(&self, width: Px) -> ViewportClass {
        if width >= self.max {
            ViewportClass::Wide
        } else if width >= self.pc {
            ViewportClass::Desktop
        } else if width >= self.tablet {
            ViewportClass::Tablet
        } else {
            ViewportClass::Phone
        }
    }
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self::new(Px(768), Px(1024), Px(1920))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigator_selection_splits_at_pc() {
        let breakpoints = Breakpoints::default();

        assert_eq!(breakpoints.navigator_for(Px(320)), NavigatorKind::Mobile);
        assert_eq!(breakpoints.navigator_for(Px(1023)), NavigatorKind::Mobile);
        assert_eq!(breakpoints.navigator_for(Px(1024)), NavigatorKind::Desktop);
        assert_eq!(breakpoints.navigator_for(Px(2560)), NavigatorKind::Desktop);
    }

    #[test]
    fn test_classification_ranges() {
        let breakpoints = Breakpoints::default();

        assert_eq!(breakpoints.classify(Px(767)), ViewportClass::Phone);
        assert_eq!(breakpoints.classify(Px(768)), ViewportClass::Tablet);
        assert_eq!(breakpoints.classify(Px(1024)), ViewportClass::Desktop);
        assert_eq!(breakpoints.classify(Px(1920)), ViewportClass::Wide);
    }
}
