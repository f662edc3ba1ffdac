//! Scroll-position observer.
//!
//! Batches visibility reports from the host oracle and only acts once the
//! viewport has been quiet for the configured window (100 ms by default).
//! During a smooth or snapped scroll many entries cross the threshold on the
//! way past; those transients are coalesced away so that only the resting
//! position reaches the navigation controller.
//!
//! # Invariants
//!
//! - **Latest-wins per entry**: within one window, a later report for the
//!   same key replaces the earlier one; nothing is buffered twice.
//! - **Reset-the-timer**: every `Scroll` or report pushes the deadline out.
//!   N events inside the window followed by silence yield exactly one batch.
//! - **Stale guard**: reports for keys no longer registered are dropped and
//!   counted, never forwarded.
//!
//! # Batch rule
//!
//! For every recorded entry, the inert marker is set to `!is_intersecting`.
//! Of the intersecting entries whose ratio reaches the visibility threshold,
//! the one with the highest ratio is forwarded (a later entry wins ties).
//! When an entry settles, every other registered slide absent from the
//! batch is marked inert as well, so exactly one slide stays reachable.

#![forbid(unsafe_code)]

use std::time::{Duration, Instant};

use slidekit_core::SlideKey;
use slidekit_core::debounce::Debouncer;
use slidekit_core::event::IntersectionEntry;
use slidekit_core::registry::SlideRegistry;

/// Result of processing one settled batch.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BatchOutcome {
    /// The entry that settled in view, if any.
    pub settled: Option<SlideKey>,
    /// Reports dropped because their key is no longer registered.
    pub stale: usize,
    /// Number of entries whose inert marker was updated.
    pub updated: usize,
}

/// Debounced batcher of visibility reports.
#[derive(Debug, Clone)]
pub struct ScrollObserver {
    pending: Vec<IntersectionEntry>,
    debounce: Debouncer,
    threshold: f32,
}

impl ScrollObserver {
    /// Create an observer with the given quiet window and visibility threshold.
    #[must_use]
    pub fn new(quiet: Duration, threshold: f32) -> Self {
        Self {
            pending: Vec::new(),
            debounce: Debouncer::new(quiet),
            threshold,
        }
    }

    /// Visible fraction an entry must reach to settle. Hosts configure their
    /// oracle with the same value.
    #[must_use]
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Record reports delivered by the oracle and restart the quiet window.
    pub fn record(&mut self, entries: impl IntoIterator<Item = IntersectionEntry>, now: Instant) {
        for entry in entries {
            match self.pending.iter_mut().find(|p| p.key == entry.key) {
                Some(slot) => *slot = entry,
                None => self.pending.push(entry),
            }
        }
        let _generation = self.debounce.trigger(now);
        slidekit_core::trace!(
            generation = _generation,
            pending = self.pending.len(),
            "visibility reports recorded"
        );
    }

    /// The viewport scrolled: restart the quiet window.
    pub fn notify_scroll(&mut self, now: Instant) {
        self.debounce.trigger(now);
    }

    /// Take the settled batch once the quiet window has elapsed.
    ///
    /// Returns `None` while the window is open, and also when it fires with
    /// nothing recorded.
    pub fn poll(&mut self, now: Instant) -> Option<Vec<IntersectionEntry>> {
        let _generation = self.debounce.poll(now)?;
        if self.pending.is_empty() {
            return None;
        }
        let batch = std::mem::take(&mut self.pending);
        slidekit_core::debug!(generation = _generation, entries = batch.len(), "scroll settled");
        Some(batch)
    }

    /// Apply a settled batch to the registry.
    pub fn process(
        &self,
        batch: &[IntersectionEntry],
        registry: &mut SlideRegistry,
    ) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();
        let mut best: Option<IntersectionEntry> = None;

        for entry in batch {
            if !registry.set_inert(entry.key, !entry.is_intersecting) {
                slidekit_core::warn!(key = %entry.key, "report for unregistered slide ignored");
                outcome.stale += 1;
                continue;
            }
            outcome.updated += 1;
            let settles = entry.is_intersecting && entry.ratio >= self.threshold;
            if settles && best.is_none_or(|b| entry.ratio >= b.ratio) {
                best = Some(*entry);
            }
        }

        if let Some(settled) = best {
            for key in registry.keys() {
                if key != settled.key && !batch.iter().any(|e| e.key == key) {
                    registry.set_inert(key, true);
                    outcome.updated += 1;
                }
            }
        }

        outcome.settled = best.map(|b| b.key);
        outcome
    }

    /// Drop recorded reports and any pending window.
    pub fn clear(&mut self) {
        self.pending.clear();
        self.debounce.cancel();
    }

    /// Whether a batch is waiting for its quiet window.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.debounce.is_pending()
    }

    /// Deadline of the open quiet window.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.debounce.deadline()
    }

    /// Time left until the open window closes.
    #[must_use]
    pub fn time_until_flush(&self, now: Instant) -> Option<Duration> {
        self.debounce
            .deadline()
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Number of distinct entries recorded in the open window.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}
