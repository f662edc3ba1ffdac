#![forbid(unsafe_code)]

//! Generation-keyed quiet-window debouncer.
//!
//! A [`Debouncer`] models "wait until nothing has happened for `quiet`" as a
//! deadline plus a generation counter instead of a timer callback chain.
//! Every [`trigger`](Debouncer::trigger) starts a new generation and pushes
//! the deadline out; a pending generation is fully superseded, not queued.
//! The owner polls with the current time and acts once per fired generation.
//!
//! # Invariants
//!
//! 1. At most one generation is pending at any time.
//! 2. `poll` fires a given generation at most once.
//! 3. N triggers inside the window followed by silence fire exactly once,
//!    carrying the generation of the last trigger.
//! 4. `cancel` discards the pending generation; a later `poll` is a no-op.
//!
//! # Example
//!
//! ```
//! use slidekit_core::debounce::Debouncer;
//! use std::time::{Duration, Instant};
//!
//! let start = Instant::now();
//! let mut debounce = Debouncer::new(Duration::from_millis(100));
//! debounce.trigger(start);
//! debounce.trigger(start + Duration::from_millis(40));
//! assert_eq!(debounce.poll(start + Duration::from_millis(120)), None);
//! assert_eq!(debounce.poll(start + Duration::from_millis(140)), Some(2));
//! assert_eq!(debounce.poll(start + Duration::from_millis(500)), None);
//! ```

use std::time::{Duration, Instant};

/// Reset-the-timer debouncer driven by caller-supplied time.
#[derive(Debug, Clone)]
pub struct Debouncer {
    quiet: Duration,
    generation: u64,
    deadline: Option<Instant>,
}

impl Debouncer {
    /// Create a debouncer with the given quiet window.
    #[must_use]
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            generation: 0,
            deadline: None,
        }
    }

    /// The configured quiet window.
    #[must_use]
    pub fn quiet(&self) -> Duration {
        self.quiet
    }

    /// Change the quiet window. A pending deadline keeps its old value.
    pub fn set_quiet(&mut self, quiet: Duration) {
        self.quiet = quiet;
    }

    /// Record activity at `now`, superseding any pending generation.
    ///
    /// Returns the new generation.
    pub fn trigger(&mut self, now: Instant) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.deadline = Some(now + self.quiet);
        self.generation
    }

    /// Fire the pending generation if its quiet window has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<u64> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                Some(self.generation)
            }
            _ => None,
        }
    }

    /// Discard the pending generation.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Whether a generation is waiting for its quiet window.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Deadline of the pending generation, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Most recently issued generation.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
