#![forbid(unsafe_code)]

//! Deterministic host simulator for testing.
//!
//! [`HostSimulator`] implements every host trait in memory. Scroll requests
//! land immediately, the entry they target becomes "in view", and the
//! simulator can then produce the visibility reports a real oracle would
//! deliver. Every call the engine makes is recorded in order.
//!
//! [`run_until_settled`] drives a carousel the way a real host would after a
//! navigation: deliver scroll and visibility events, a frame boundary, then
//! advance a synthetic clock through each pending quiet window until nothing
//! is left to do.
//!
//! # Example
//!
//! ```
//! use slidekit_core::Slide;
//! use slidekit_core::event::ScrollBehavior;
//! use slidekit_runtime::simulator::{HostSimulator, run_until_settled};
//! use slidekit_runtime::{Carousel, CarouselConfig};
//! use std::time::Instant;
//!
//! let mut carousel = Carousel::new(CarouselConfig::default(), HostSimulator::new()).unwrap();
//! carousel.set_slides((0..3).map(Slide::new).collect());
//! let t0 = Instant::now();
//! carousel.start(t0).unwrap();
//! let now = run_until_settled(&mut carousel, t0);
//!
//! carousel.next_slide(ScrollBehavior::Smooth).unwrap();
//! run_until_settled(&mut carousel, now);
//! assert_eq!(carousel.active_index(), 1);
//! assert_eq!(carousel.host().notifications().len(), 1);
//! ```

use std::time::Instant;

use slidekit_core::SlideKey;
use slidekit_core::event::{CarouselEvent, IntersectionEntry};
use slidekit_core::registry::ObserverMembership;

use crate::carousel::Carousel;
use crate::host::{EventSink, Notification, ScrollRequest, ScrollSurface, VisibilityOracle};

/// Upper bound on settle rounds; a carousel that keeps scheduling work past
/// this is considered stuck.
const MAX_SETTLE_ROUNDS: usize = 64;

/// Record of a call the engine made into the host.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    /// `observe(key)`.
    Observe(SlideKey),
    /// `unobserve(key)`.
    Unobserve(SlideKey),
    /// `take_records()`.
    TakeRecords,
    /// `disconnect()`.
    Disconnect,
    /// `scroll_to(request)`.
    ScrollTo(ScrollRequest),
    /// `set_transitions_enabled(enabled)`.
    Transitions(bool),
    /// `sync_layout()`.
    SyncLayout,
    /// `emit(notification)`.
    Emit(Notification),
}

/// In-memory host.
#[derive(Debug, Clone)]
pub struct HostSimulator {
    observed: Vec<SlideKey>,
    viewport: Option<SlideKey>,
    reported: Option<SlideKey>,
    queued: Vec<IntersectionEntry>,
    transitions_enabled: bool,
    calls: Vec<HostCall>,
}

impl Default for HostSimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl HostSimulator {
    /// Create an empty host with transitions enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            observed: Vec::new(),
            viewport: None,
            reported: None,
            queued: Vec::new(),
            transitions_enabled: true,
            calls: Vec::new(),
        }
    }

    /// Entry currently scrolled into view.
    #[must_use]
    pub fn in_view(&self) -> Option<SlideKey> {
        self.viewport
    }

    /// Move the viewport without going through the engine, as a user drag would.
    pub fn drag_to(&mut self, key: SlideKey) {
        self.viewport = Some(key);
    }

    /// Whether `key` is currently observed.
    #[must_use]
    pub fn is_observed(&self, key: SlideKey) -> bool {
        self.observed.contains(&key)
    }

    /// Observed keys in observation order.
    #[must_use]
    pub fn observed(&self) -> &[SlideKey] {
        &self.observed
    }

    /// Whether surface transitions are enabled.
    #[must_use]
    pub fn transitions_enabled(&self) -> bool {
        self.transitions_enabled
    }

    /// Every recorded call, in order.
    #[must_use]
    pub fn calls(&self) -> &[HostCall] {
        &self.calls
    }

    /// Clear the call log.
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Scroll requests, in order.
    #[must_use]
    pub fn scrolls(&self) -> Vec<ScrollRequest> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                HostCall::ScrollTo(request) => Some(*request),
                _ => None,
            })
            .collect()
    }

    /// Emitted notifications, in order.
    #[must_use]
    pub fn notifications(&self) -> Vec<Notification> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                HostCall::Emit(notification) => Some(*notification),
                _ => None,
            })
            .collect()
    }

    /// Number of `disconnect` calls.
    #[must_use]
    pub fn disconnect_count(&self) -> usize {
        self.count(|call| matches!(call, HostCall::Disconnect))
    }

    /// Number of forced layout read-backs.
    #[must_use]
    pub fn layout_sync_count(&self) -> usize {
        self.count(|call| matches!(call, HostCall::SyncLayout))
    }

    fn count(&self, pred: impl Fn(&HostCall) -> bool) -> usize {
        self.calls.iter().filter(|call| pred(call)).count()
    }

    /// Queue reports to be returned by the next `take_records`.
    pub fn queue_records(&mut self, entries: impl IntoIterator<Item = IntersectionEntry>) {
        self.queued.extend(entries);
    }

    /// Reports a real oracle would deliver for the viewport change since the
    /// previous call: the old entry leaving, the new one entering.
    pub fn visibility_reports(&mut self) -> Vec<IntersectionEntry> {
        let current = self.viewport.filter(|key| self.is_observed(*key));
        if current == self.reported {
            return Vec::new();
        }
        let mut reports = Vec::with_capacity(2);
        if let Some(previous) = self.reported.filter(|key| self.is_observed(*key)) {
            reports.push(IntersectionEntry::hidden(previous));
        }
        if let Some(key) = current {
            reports.push(IntersectionEntry::visible(key));
        }
        self.reported = current;
        reports
    }
}

impl ObserverMembership for HostSimulator {
    fn observe(&mut self, key: SlideKey) {
        if !self.observed.contains(&key) {
            self.observed.push(key);
        }
        self.calls.push(HostCall::Observe(key));
    }

    fn unobserve(&mut self, key: SlideKey) {
        self.observed.retain(|k| *k != key);
        self.calls.push(HostCall::Unobserve(key));
    }
}

impl VisibilityOracle for HostSimulator {
    fn take_records(&mut self) -> Vec<IntersectionEntry> {
        self.calls.push(HostCall::TakeRecords);
        std::mem::take(&mut self.queued)
    }

    fn disconnect(&mut self) {
        self.observed.clear();
        self.queued.clear();
        self.calls.push(HostCall::Disconnect);
    }
}

impl ScrollSurface for HostSimulator {
    fn scroll_to(&mut self, request: ScrollRequest) {
        self.viewport = Some(request.key);
        self.calls.push(HostCall::ScrollTo(request));
    }

    fn set_transitions_enabled(&mut self, enabled: bool) {
        self.transitions_enabled = enabled;
        self.calls.push(HostCall::Transitions(enabled));
    }

    fn sync_layout(&mut self) {
        self.calls.push(HostCall::SyncLayout);
    }
}

impl EventSink for HostSimulator {
    fn emit(&mut self, notification: Notification) {
        self.calls.push(HostCall::Emit(notification));
    }
}

/// Deliver pending viewport changes and run every quiet window to completion.
///
/// Autoplay deadlines are not advanced. Returns the synthetic time reached.
pub fn run_until_settled(carousel: &mut Carousel<HostSimulator>, mut now: Instant) -> Instant {
    for _ in 0..MAX_SETTLE_ROUNDS {
        if !carousel.is_running() {
            break;
        }
        let reports = carousel.host_mut().visibility_reports();
        let moved = !reports.is_empty();
        if moved {
            let _ = carousel.handle_event(CarouselEvent::Scroll, now);
            let _ = carousel.handle_event(CarouselEvent::Intersections(reports), now);
        }
        let _ = carousel.handle_event(CarouselEvent::Frame, now);

        match carousel.settle_deadline() {
            Some(deadline) => {
                now = now.max(deadline);
                carousel.tick(now);
            }
            None if moved => {}
            None => break,
        }
    }
    now
}

#[cfg(test)]
mod tests {
    use super::*;
    use slidekit_core::SlideId;
    use slidekit_core::event::{Axis, ScrollBehavior};

    fn key(id: u64) -> SlideKey {
        SlideKey::real(SlideId::new(id))
    }

    #[test]
    fn reports_follow_viewport_changes() {
        let mut host = HostSimulator::new();
        host.observe(key(0));
        host.observe(key(1));
        assert!(host.visibility_reports().is_empty());

        host.drag_to(key(0));
        assert_eq!(host.visibility_reports(), vec![IntersectionEntry::visible(key(0))]);
        assert!(host.visibility_reports().is_empty());

        host.drag_to(key(1));
        assert_eq!(
            host.visibility_reports(),
            vec![
                IntersectionEntry::hidden(key(0)),
                IntersectionEntry::visible(key(1))
            ]
        );
    }

    #[test]
    fn unobserved_entries_are_silent() {
        let mut host = HostSimulator::new();
        host.drag_to(key(3));
        assert!(host.visibility_reports().is_empty());
    }

    #[test]
    fn scroll_moves_viewport_and_is_logged() {
        let mut host = HostSimulator::new();
        host.scroll_to(ScrollRequest {
            key: key(2),
            position: 2,
            axis: Axis::Horizontal,
            behavior: ScrollBehavior::Instant,
        });
        assert_eq!(host.in_view(), Some(key(2)));
        assert_eq!(host.scrolls().len(), 1);
    }

    #[test]
    fn disconnect_drops_membership() {
        let mut host = HostSimulator::new();
        host.observe(key(0));
        host.queue_records([IntersectionEntry::visible(key(0))]);
        host.disconnect();
        assert!(host.observed().is_empty());
        assert!(host.take_records().is_empty());
        assert_eq!(host.disconnect_count(), 1);
    }
}
