#![forbid(unsafe_code)]

//! Autoplay scheduler.
//!
//! A repeating deadline that asks the engine to advance while nobody is
//! interacting with the carousel. Hovering or focusing the carousel pauses
//! it; leaving re-arms it, but only when the autoplay flag is still set and
//! the other interaction has also ended.
//!
//! # Example
//!
//! ```rust
//! use slidekit_runtime::autoplay::AutoplayScheduler;
//! use std::time::{Duration, Instant};
//!
//! let t0 = Instant::now();
//! let mut autoplay = AutoplayScheduler::new(true, Duration::from_secs(3));
//! autoplay.resume(t0);
//! assert!(!autoplay.poll(t0 + Duration::from_secs(2)));
//! assert!(autoplay.poll(t0 + Duration::from_secs(3)));
//!
//! autoplay.pointer_enter();
//! assert!(!autoplay.is_armed());
//! ```

use std::time::{Duration, Instant};

/// Interaction-aware repeating timer.
#[derive(Debug, Clone)]
pub struct AutoplayScheduler {
    enabled: bool,
    interval: Duration,
    next_fire: Option<Instant>,
    hovered: bool,
    focused: bool,
    arm_count: u64,
}

impl AutoplayScheduler {
    /// Create a disarmed scheduler.
    ///
    /// `interval` must be non-zero; [`CarouselConfig::validate`](crate::CarouselConfig::validate)
    /// enforces this for engine-owned schedulers.
    #[must_use]
    pub fn new(enabled: bool, interval: Duration) -> Self {
        Self {
            enabled,
            interval,
            next_fire: None,
            hovered: false,
            focused: false,
            arm_count: 0,
        }
    }

    /// Whether the autoplay flag is set.
    #[must_use]
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Time between advances.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether a timer is live.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.next_fire.is_some()
    }

    /// Next fire time, when armed.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.next_fire
    }

    /// How many times a timer has been armed.
    #[must_use]
    pub fn arm_count(&self) -> u64 {
        self.arm_count
    }

    /// Arm the timer from `now`, replacing any live timer.
    ///
    /// Does nothing while the flag is clear or the carousel is hovered or
    /// focused.
    pub fn resume(&mut self, now: Instant) {
        if !self.enabled || self.hovered || self.focused {
            return;
        }
        self.next_fire = now.checked_add(self.interval);
        self.arm_count += 1;
        slidekit_core::trace!(
            interval_ms = u64::try_from(self.interval.as_millis()).unwrap_or(u64::MAX),
            "autoplay armed"
        );
    }

    /// Cancel the timer. Returns whether one was live.
    pub fn pause(&mut self) -> bool {
        let was_armed = self.next_fire.take().is_some();
        if was_armed {
            slidekit_core::trace!("autoplay paused");
        }
        was_armed
    }

    /// Pointer entered the carousel.
    pub fn pointer_enter(&mut self) {
        self.hovered = true;
        self.pause();
    }

    /// Pointer left the carousel.
    pub fn pointer_leave(&mut self, now: Instant) {
        self.hovered = false;
        self.resume(now);
    }

    /// Focus moved inside the carousel.
    pub fn focus_in(&mut self) {
        self.focused = true;
        self.pause();
    }

    /// Focus left the carousel.
    pub fn focus_out(&mut self, now: Instant) {
        self.focused = false;
        self.resume(now);
    }

    /// Set the autoplay flag; tears down and re-arms from the new setting.
    pub fn set_enabled(&mut self, enabled: bool, now: Instant) {
        self.enabled = enabled;
        self.pause();
        self.resume(now);
    }

    /// Change the interval; a live timer is re-armed from `now`.
    pub fn set_interval(&mut self, interval: Duration, now: Instant) {
        self.interval = interval;
        if self.pause() {
            self.resume(now);
        }
    }

    /// Fire if the deadline has passed.
    ///
    /// Fires at most once per call. Periods missed while the host was not
    /// ticking are skipped, not replayed.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(deadline) = self.next_fire else {
            return false;
        };
        if now < deadline {
            return false;
        }

        let period = self.interval.as_nanos().max(1);
        let skipped = now.duration_since(deadline).as_nanos() / period;
        let steps = u32::try_from(skipped + 1).unwrap_or(u32::MAX);
        self.next_fire = deadline.checked_add(self.interval.saturating_mul(steps));
        if skipped > 0 {
            slidekit_core::debug!(
                skipped = u64::try_from(skipped).unwrap_or(u64::MAX),
                "autoplay periods skipped"
            );
        }
        true
    }

    /// Forget interaction state and cancel the timer.
    pub fn reset(&mut self) {
        self.hovered = false;
        self.focused = false;
        self.pause();
    }
}
