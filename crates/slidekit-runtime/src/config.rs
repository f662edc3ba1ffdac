#![forbid(unsafe_code)]

//! Carousel configuration.
//!
//! [`CarouselConfig`] collects the host-facing options (looping, controls,
//! pagination, autoplay, heading) together with the engine's timing windows.
//! Defaults match the stock component: no looping, no autoplay, a 3 s
//! autoplay interval, a 0.6 visibility threshold, a 100 ms scroll-settle
//! window, and a 50 ms scroll-end silence before clone corrections.

use std::time::Duration;

use slidekit_core::CarouselError;
use slidekit_core::event::Axis;

/// Default autoplay interval.
pub const DEFAULT_AUTOPLAY_INTERVAL: Duration = Duration::from_millis(3_000);
/// Default quiet window before a batch of visibility reports is processed.
pub const DEFAULT_SCROLL_DEBOUNCE: Duration = Duration::from_millis(100);
/// Default silence required before a clone correction is issued.
pub const DEFAULT_SCROLL_END_QUIET: Duration = Duration::from_millis(50);
/// Default fraction of a slide that must be visible to count as in view.
pub const DEFAULT_VISIBILITY_THRESHOLD: f32 = 0.6;

/// Options for a [`Carousel`](crate::Carousel).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CarouselConfig {
    /// Allow navigating in the same direction indefinitely.
    pub loop_enabled: bool,
    /// Show previous/next controls.
    pub show_controls: bool,
    /// Show pagination indicators.
    pub show_pagination: bool,
    /// Advance automatically while the user is not interacting.
    pub autoplay: bool,
    /// Time between automatic advances.
    pub autoplay_interval: Duration,
    /// Carousel heading text.
    pub heading: String,
    /// Visible fraction in `(0, 1]` required for an intersection.
    pub visibility_threshold: f32,
    /// Quiet window before processing visibility reports.
    pub scroll_debounce: Duration,
    /// Scroll silence required before a clone correction.
    pub scroll_end_quiet: Duration,
    /// Scroll axis.
    pub axis: Axis,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            loop_enabled: false,
            show_controls: false,
            show_pagination: false,
            autoplay: false,
            autoplay_interval: DEFAULT_AUTOPLAY_INTERVAL,
            heading: String::new(),
            visibility_threshold: DEFAULT_VISIBILITY_THRESHOLD,
            scroll_debounce: DEFAULT_SCROLL_DEBOUNCE,
            scroll_end_quiet: DEFAULT_SCROLL_END_QUIET,
            axis: Axis::Horizontal,
        }
    }
}

impl CarouselConfig {
    /// Enable or disable looping.
    #[must_use]
    pub fn with_loop(mut self, enabled: bool) -> Self {
        self.loop_enabled = enabled;
        self
    }

    /// Show or hide the controls.
    #[must_use]
    pub fn with_controls(mut self, shown: bool) -> Self {
        self.show_controls = shown;
        self
    }

    /// Show or hide pagination.
    #[must_use]
    pub fn with_pagination(mut self, shown: bool) -> Self {
        self.show_pagination = shown;
        self
    }

    /// Enable or disable autoplay.
    #[must_use]
    pub fn with_autoplay(mut self, enabled: bool) -> Self {
        self.autoplay = enabled;
        self
    }

    /// Set the autoplay interval.
    #[must_use]
    pub fn with_autoplay_interval(mut self, interval: Duration) -> Self {
        self.autoplay_interval = interval;
        self
    }

    /// Set the heading.
    #[must_use]
    pub fn with_heading(mut self, heading: impl Into<String>) -> Self {
        self.heading = heading.into();
        self
    }

    /// Set the visibility threshold.
    #[must_use]
    pub fn with_visibility_threshold(mut self, threshold: f32) -> Self {
        self.visibility_threshold = threshold;
        self
    }

    /// Set the scroll-settle debounce window.
    #[must_use]
    pub fn with_scroll_debounce(mut self, window: Duration) -> Self {
        self.scroll_debounce = window;
        self
    }

    /// Set the scroll-end silence window.
    #[must_use]
    pub fn with_scroll_end_quiet(mut self, window: Duration) -> Self {
        self.scroll_end_quiet = window;
        self
    }

    /// Set the scroll axis.
    #[must_use]
    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    /// Check option ranges.
    pub fn validate(&self) -> Result<(), CarouselError> {
        if self.autoplay_interval.is_zero() {
            return Err(CarouselError::InvalidConfig {
                field: "autoplay_interval",
                reason: "must be non-zero",
            });
        }
        if self.scroll_debounce.is_zero() {
            return Err(CarouselError::InvalidConfig {
                field: "scroll_debounce",
                reason: "must be non-zero",
            });
        }
        if self.scroll_end_quiet.is_zero() {
            return Err(CarouselError::InvalidConfig {
                field: "scroll_end_quiet",
                reason: "must be non-zero",
            });
        }
        if !(self.visibility_threshold > 0.0 && self.visibility_threshold <= 1.0) {
            return Err(CarouselError::InvalidConfig {
                field: "visibility_threshold",
                reason: "must be in (0, 1]",
            });
        }
        Ok(())
    }
}
