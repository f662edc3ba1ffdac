#![forbid(unsafe_code)]

//! The carousel engine.
//!
//! [`Carousel`] owns the slide registry, the scroll observer, the navigation
//! controller and the autoplay scheduler, and talks to the outside world only
//! through a [`CarouselHost`]. The host feeds it events with
//! [`handle_event`](Carousel::handle_event) and calls
//! [`tick`](Carousel::tick) when [`next_deadline`](Carousel::next_deadline)
//! is reached.
//!
//! # Lifecycle
//!
//! `Created` → [`start`](Carousel::start) → `Running` →
//! [`stop`](Carousel::stop) → `Stopped`. Starting observes every entry and
//! seats the viewport on the active slide. Stopping disconnects the oracle
//! exactly once and cancels every pending window and timer; dropping a
//! running carousel stops it. A stopped carousel cannot be restarted.

use std::time::{Duration, Instant};

use slidekit_core::direction::DirectionLookup;
use slidekit_core::event::{CarouselEvent, NavKey, ScrollBehavior, SwipeDirection};
use slidekit_core::registry::{SlideEntry, SlideRegistry};
use slidekit_core::{CarouselError, Slide};
use slidekit_widgets::{DerivedState, PresenterInput, slide_label};

use crate::autoplay::AutoplayScheduler;
use crate::config::CarouselConfig;
use crate::controller::{ActiveChange, NavOutcome, NavState, NavigationController, Seek, Step};
use crate::host::{CarouselHost, Notification, ScrollRequest};
use crate::observer::ScrollObserver;

/// Engine lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Constructed, not yet observing.
    Created,
    /// Observing and accepting events.
    Running,
    /// Torn down.
    Stopped,
}

/// Engine counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CarouselStats {
    /// Settled batches processed.
    pub batches_processed: u64,
    /// Visibility reports dropped for unregistered slides.
    pub stale_callbacks: u64,
    /// Clone corrections issued.
    pub corrections: u64,
    /// Scroll requests issued.
    pub seeks: u64,
    /// `slide-change` notifications emitted.
    pub notifications: u64,
}

/// Restorable navigation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CarouselSnapshot {
    /// Active logical index.
    pub active_index: usize,
    /// Whether looping was enabled.
    pub loop_enabled: bool,
}

/// Everything the surrounding UI renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselView {
    /// Heading text.
    pub heading: String,
    /// Controls, pagination and enablement.
    pub state: DerivedState,
    /// Accessible label per real slide, in logical order.
    pub slide_labels: Vec<String>,
}

/// Slide-navigation engine bound to a host.
pub struct Carousel<H: CarouselHost> {
    config: CarouselConfig,
    host: H,
    registry: SlideRegistry,
    observer: ScrollObserver,
    controller: NavigationController,
    autoplay: AutoplayScheduler,
    lifecycle: Lifecycle,
    transitions_suppressed: bool,
    stats: CarouselStats,
}

impl<H: CarouselHost> Carousel<H> {
    /// Create an engine with no slides.
    pub fn new(config: CarouselConfig, host: H) -> Result<Self, CarouselError> {
        config.validate()?;
        Ok(Self {
            observer: ScrollObserver::new(config.scroll_debounce, config.visibility_threshold),
            controller: NavigationController::new(config.scroll_end_quiet),
            autoplay: AutoplayScheduler::new(config.autoplay, config.autoplay_interval),
            registry: SlideRegistry::new(),
            lifecycle: Lifecycle::Created,
            transitions_suppressed: false,
            stats: CarouselStats::default(),
            config,
            host,
        })
    }

    // ─── Lifecycle ──────────────────────────────────────────────────────

    /// Observe every entry, seat the viewport, and arm autoplay.
    ///
    /// Starting a running carousel is a no-op; starting a stopped one fails
    /// with [`CarouselError::NotRunning`].
    pub fn start(&mut self, now: Instant) -> Result<(), CarouselError> {
        match self.lifecycle {
            Lifecycle::Running => return Ok(()),
            Lifecycle::Stopped => return Err(CarouselError::NotRunning),
            Lifecycle::Created => {}
        }

        self.registry.resync(self.config.loop_enabled, &mut self.host);
        let _discarded = self.host.take_records();
        self.lifecycle = Lifecycle::Running;

        if !self.registry.is_empty() {
            let active = self.controller.active().min(self.registry.len() - 1);
            self.controller.reset(active);
            self.reseat();
        }
        self.autoplay.resume(now);

        slidekit_core::info!(
            slides = self.registry.len(),
            loop_enabled = self.config.loop_enabled,
            autoplay = self.config.autoplay,
            "carousel started"
        );
        Ok(())
    }

    /// Disconnect the oracle and cancel everything pending. Idempotent.
    pub fn stop(&mut self) {
        if self.lifecycle == Lifecycle::Stopped {
            return;
        }
        self.host.disconnect();
        self.observer.clear();
        self.controller.cancel();
        self.autoplay.reset();
        if self.transitions_suppressed {
            self.host.set_transitions_enabled(true);
            self.transitions_suppressed = false;
        }
        self.lifecycle = Lifecycle::Stopped;
        slidekit_core::info!(stats = ?self.stats, "carousel stopped");
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Whether the engine is accepting events.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.lifecycle == Lifecycle::Running
    }

    fn ensure_running(&self) -> Result<(), CarouselError> {
        if self.is_running() {
            Ok(())
        } else {
            Err(CarouselError::NotRunning)
        }
    }

    // ─── Content ────────────────────────────────────────────────────────

    /// Replace the real slides, e.g. after the host content changed.
    ///
    /// While running, membership is resynced atomically, the active index
    /// is clamped into the new range (publishing a change if it moved), and
    /// the viewport is re-seated without animation.
    pub fn set_slides(&mut self, slides: Vec<Slide>) {
        if !self.is_running() {
            self.registry = SlideRegistry::with_slides(slides);
            let active = self.controller.active();
            self.controller.reset(active.min(self.registry.len().saturating_sub(1)));
            return;
        }

        self.registry.replace_slides(slides, &mut self.host);
        let _discarded = self.host.take_records();
        self.observer.clear();
        let change = self.controller.rebase(&self.registry);
        self.publish(change);
        self.reseat();
    }

    /// Sequence entries in physical order, optionally without clones.
    pub fn get_slides(&self, include_clones: bool) -> impl Iterator<Item = &SlideEntry> + '_ {
        self.registry.slides(include_clones)
    }

    /// The slide registry.
    #[must_use]
    pub fn registry(&self) -> &SlideRegistry {
        &self.registry
    }

    // ─── Navigation ─────────────────────────────────────────────────────

    /// Go to the previous slide.
    ///
    /// Returns the new active index, or `None` when looping is disabled and
    /// the first slide is already active.
    pub fn prev_slide(&mut self, behavior: ScrollBehavior) -> Result<Option<usize>, CarouselError> {
        self.step(Step::Prev, behavior)
    }

    /// Go to the next slide.
    ///
    /// Returns the new active index, or `None` when looping is disabled and
    /// the last slide is already active.
    pub fn next_slide(&mut self, behavior: ScrollBehavior) -> Result<Option<usize>, CarouselError> {
        self.step(Step::Next, behavior)
    }

    fn step(&mut self, step: Step, behavior: ScrollBehavior) -> Result<Option<usize>, CarouselError> {
        self.ensure_running()?;
        let outcome = self.controller.step(&self.registry, step, behavior)?;
        let moved = outcome.seek.is_some();
        self.apply(outcome);
        Ok(moved.then(|| self.controller.active()))
    }

    /// Scroll to the slide at `index`, wrapping negative and overflowing
    /// values. Returns the normalized index.
    pub fn scroll_to_slide(
        &mut self,
        index: isize,
        behavior: ScrollBehavior,
    ) -> Result<usize, CarouselError> {
        self.ensure_running()?;
        let outcome = self.controller.seek(&self.registry, index, behavior)?;
        self.apply(outcome);
        Ok(self.controller.active())
    }

    /// The active logical index.
    #[must_use]
    pub fn active_index(&self) -> usize {
        self.controller.active()
    }

    /// Navigation controller state.
    #[must_use]
    pub fn nav_state(&self) -> NavState {
        self.controller.state()
    }

    // ─── Options ────────────────────────────────────────────────────────

    /// The current configuration.
    #[must_use]
    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    /// Enable or disable looping, rebuilding clones while running.
    pub fn set_loop(&mut self, enabled: bool) {
        self.config.loop_enabled = enabled;
        if !self.is_running() || self.registry.loop_enabled() == enabled {
            return;
        }
        self.registry.resync(enabled, &mut self.host);
        let _discarded = self.host.take_records();
        self.observer.clear();
        let change = self.controller.rebase(&self.registry);
        self.publish(change);
        self.reseat();
    }

    /// Set the autoplay flag; a live timer is torn down and re-armed.
    pub fn set_autoplay(&mut self, enabled: bool, now: Instant) {
        self.config.autoplay = enabled;
        if self.is_running() {
            self.autoplay.set_enabled(enabled, now);
        } else {
            self.autoplay = AutoplayScheduler::new(enabled, self.config.autoplay_interval);
        }
    }

    /// Change the autoplay interval.
    pub fn set_autoplay_interval(
        &mut self,
        interval: Duration,
        now: Instant,
    ) -> Result<(), CarouselError> {
        if interval.is_zero() {
            return Err(CarouselError::InvalidConfig {
                field: "autoplay_interval",
                reason: "must be non-zero",
            });
        }
        self.config.autoplay_interval = interval;
        if self.is_running() {
            self.autoplay.set_interval(interval, now);
        } else {
            self.autoplay = AutoplayScheduler::new(self.config.autoplay, interval);
        }
        Ok(())
    }

    /// Show or hide the controls.
    pub fn set_show_controls(&mut self, shown: bool) {
        self.config.show_controls = shown;
    }

    /// Show or hide pagination.
    pub fn set_show_pagination(&mut self, shown: bool) {
        self.config.show_pagination = shown;
    }

    /// Set the heading.
    pub fn set_heading(&mut self, heading: impl Into<String>) {
        self.config.heading = heading.into();
    }

    /// The autoplay scheduler.
    #[must_use]
    pub fn autoplay(&self) -> &AutoplayScheduler {
        &self.autoplay
    }

    // ─── Events and time ────────────────────────────────────────────────

    /// Feed one host event.
    pub fn handle_event(&mut self, event: CarouselEvent, now: Instant) -> Result<(), CarouselError> {
        let _span = slidekit_core::debug_span!(
            "carousel_event",
            kind = event.kind(),
            active = self.controller.active()
        )
        .entered();
        self.ensure_running()?;

        match event {
            CarouselEvent::PointerEnter => self.autoplay.pointer_enter(),
            CarouselEvent::PointerLeave => self.autoplay.pointer_leave(now),
            CarouselEvent::FocusIn => self.autoplay.focus_in(),
            CarouselEvent::FocusOut => self.autoplay.focus_out(now),
            CarouselEvent::Scroll => {
                self.observer.notify_scroll(now);
                self.controller.on_scroll(now);
            }
            CarouselEvent::Intersections(entries) => self.observer.record(entries, now),
            CarouselEvent::Swipe(SwipeDirection::Left) => {
                self.next_slide(ScrollBehavior::Smooth)?;
            }
            CarouselEvent::Swipe(SwipeDirection::Right) => {
                self.prev_slide(ScrollBehavior::Smooth)?;
            }
            CarouselEvent::Key(NavKey::Prev) => {
                self.prev_slide(ScrollBehavior::Smooth)?;
            }
            CarouselEvent::Key(NavKey::Next) => {
                self.next_slide(ScrollBehavior::Smooth)?;
            }
            CarouselEvent::Key(NavKey::First) => {
                self.scroll_to_slide(0, ScrollBehavior::Smooth)?;
            }
            CarouselEvent::Key(NavKey::Last) => {
                self.scroll_to_slide(-1, ScrollBehavior::Smooth)?;
            }
            CarouselEvent::Frame => {
                if self.transitions_suppressed {
                    self.host.set_transitions_enabled(true);
                    self.transitions_suppressed = false;
                }
            }
        }
        Ok(())
    }

    /// Run whatever is due at `now`: a settled batch, a clone correction,
    /// an autoplay advance.
    pub fn tick(&mut self, now: Instant) {
        if !self.is_running() {
            return;
        }

        if let Some(batch) = self.observer.poll(now) {
            let outcome = self.observer.process(&batch, &mut self.registry);
            self.stats.batches_processed += 1;
            self.stats.stale_callbacks += outcome.stale as u64;
            if let Some(key) = outcome.settled {
                let nav = self.controller.on_intersection(&self.registry, key, now);
                self.apply(nav);
            }
        }

        let correction = self.controller.poll(&self.registry, now);
        if correction.seek.is_some() {
            self.stats.corrections += 1;
        }
        self.apply(correction);

        if self.autoplay.poll(now) {
            self.advance_autoplay();
        }
    }

    /// Earliest pending deadline, autoplay included.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        [self.settle_deadline(), self.autoplay.next_deadline()]
            .into_iter()
            .flatten()
            .min()
    }

    /// Earliest scroll-settle or correction deadline.
    #[must_use]
    pub fn settle_deadline(&self) -> Option<Instant> {
        [self.observer.deadline(), self.controller.deadline()]
            .into_iter()
            .flatten()
            .min()
    }

    fn advance_autoplay(&mut self) {
        if self.registry.is_empty() {
            return;
        }
        let at_end = self.controller.active() + 1 >= self.registry.len();
        let result = if !self.registry.loop_enabled() && at_end {
            self.controller.seek(&self.registry, 0, ScrollBehavior::Smooth)
        } else {
            self.controller.step(&self.registry, Step::Next, ScrollBehavior::Smooth)
        };
        match result {
            Ok(outcome) => self.apply(outcome),
            Err(_err) => {
                slidekit_core::warn!(error = %_err, "autoplay advance failed");
            }
        }
    }

    // ─── Presentation ───────────────────────────────────────────────────

    /// Project the current state for rendering.
    #[must_use]
    pub fn view(&self, direction: &impl DirectionLookup) -> CarouselView {
        let count = self.registry.len();
        let state = DerivedState::derive(PresenterInput {
            active_index: self.controller.active(),
            slide_count: count,
            loop_enabled: self.config.loop_enabled,
            show_controls: self.config.show_controls,
            show_pagination: self.config.show_pagination,
            direction: direction.direction(),
        });
        let slide_labels = self
            .registry
            .slides(false)
            .map(|entry| slide_label(entry.logical_index(), count, entry.label()))
            .collect();
        CarouselView {
            heading: self.config.heading.clone(),
            state,
            slide_labels,
        }
    }

    // ─── Persistence ────────────────────────────────────────────────────

    /// Capture the restorable state.
    #[must_use]
    pub fn snapshot(&self) -> CarouselSnapshot {
        CarouselSnapshot {
            active_index: self.controller.active(),
            loop_enabled: self.config.loop_enabled,
        }
    }

    /// Apply a snapshot.
    ///
    /// Before `start` the index is adopted silently; while running the
    /// viewport jumps there without animation and a change is published if
    /// the index moved.
    pub fn restore(&mut self, snapshot: CarouselSnapshot) -> Result<(), CarouselError> {
        self.set_loop(snapshot.loop_enabled);
        match self.lifecycle {
            Lifecycle::Created => {
                self.controller.reset(snapshot.active_index);
                Ok(())
            }
            Lifecycle::Running => {
                let index = isize::try_from(snapshot.active_index).unwrap_or(isize::MAX);
                self.scroll_to_slide(index, ScrollBehavior::Instant).map(|_| ())
            }
            Lifecycle::Stopped => Err(CarouselError::NotRunning),
        }
    }

    // ─── Host access ────────────────────────────────────────────────────

    /// The host.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The host, mutably.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Engine counters.
    #[must_use]
    pub fn stats(&self) -> CarouselStats {
        self.stats
    }

    // ─── Effects ────────────────────────────────────────────────────────

    fn reseat(&mut self) {
        if self.registry.is_empty() {
            return;
        }
        let active = self.controller.active() as isize;
        match self.controller.seek(&self.registry, active, ScrollBehavior::Instant) {
            Ok(outcome) => self.apply(outcome),
            Err(_err) => {
                slidekit_core::warn!(error = %_err, "reseat failed");
            }
        }
    }

    fn apply(&mut self, outcome: NavOutcome) {
        if let Some(seek) = outcome.seek {
            self.issue_scroll(seek);
        }
        self.publish(outcome.change);
    }

    fn issue_scroll(&mut self, seek: Seek) {
        let request = ScrollRequest {
            key: seek.key,
            position: seek.position,
            axis: self.config.axis,
            behavior: seek.behavior,
        };
        match seek.behavior {
            ScrollBehavior::Instant => {
                if !self.transitions_suppressed {
                    self.host.set_transitions_enabled(false);
                    self.transitions_suppressed = true;
                }
                self.host.scroll_to(request);
                self.host.sync_layout();
            }
            ScrollBehavior::Smooth => {
                if self.transitions_suppressed {
                    self.host.set_transitions_enabled(true);
                    self.transitions_suppressed = false;
                }
                self.host.scroll_to(request);
            }
        }
        self.stats.seeks += 1;
    }

    fn publish(&mut self, change: Option<ActiveChange>) {
        let Some(change) = change else {
            return;
        };
        self.host.emit(Notification::SlideChange {
            slide_index: change.slide_index,
            slide: change.slide,
        });
        self.stats.notifications += 1;
        slidekit_core::debug!(
            active = change.slide_index,
            slide = change.slide.get(),
            "slide-change emitted"
        );
    }
}

impl<H: CarouselHost> Drop for Carousel<H> {
    fn drop(&mut self) {
        self.stop();
    }
}

impl<H: CarouselHost + std::fmt::Debug> std::fmt::Debug for Carousel<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Carousel")
            .field("lifecycle", &self.lifecycle)
            .field("active", &self.controller.active())
            .field("state", &self.controller.state())
            .field("slides", &self.registry.len())
            .field("host", &self.host)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulator::{HostSimulator, run_until_settled};
    use slidekit_core::direction::Direction;
    use slidekit_core::{SlideId, SlideKey};

    fn carousel(n: u64, config: CarouselConfig) -> Carousel<HostSimulator> {
        let mut c = Carousel::new(config, HostSimulator::new()).unwrap();
        c.set_slides((0..n).map(Slide::new).collect());
        c
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = CarouselConfig::default().with_autoplay_interval(Duration::ZERO);
        assert!(Carousel::new(config, HostSimulator::new()).is_err());
    }

    #[test]
    fn navigation_before_start_fails() {
        let mut c = carousel(3, CarouselConfig::default());
        assert_eq!(c.next_slide(ScrollBehavior::Smooth), Err(CarouselError::NotRunning));
        assert_eq!(
            c.handle_event(CarouselEvent::Scroll, Instant::now()),
            Err(CarouselError::NotRunning)
        );
    }

    #[test]
    fn empty_carousel_rejects_navigation() {
        let mut c = carousel(0, CarouselConfig::default());
        c.start(Instant::now()).unwrap();
        assert_eq!(
            c.scroll_to_slide(2, ScrollBehavior::Smooth),
            Err(CarouselError::EmptyCollection)
        );
        assert!(c.host().scrolls().is_empty());
    }

    #[test]
    fn start_observes_and_seats_without_animation() {
        let mut c = carousel(3, CarouselConfig::default().with_loop(true));
        c.start(Instant::now()).unwrap();
        assert_eq!(c.host().observed().len(), 5);
        let scrolls = c.host().scrolls();
        assert_eq!(scrolls.len(), 1);
        assert_eq!(scrolls[0].position, 1);
        assert_eq!(scrolls[0].behavior, ScrollBehavior::Instant);
        assert!(!c.host().transitions_enabled());
        assert!(c.host().notifications().is_empty());

        c.handle_event(CarouselEvent::Frame, Instant::now()).unwrap();
        assert!(c.host().transitions_enabled());
    }

    #[test]
    fn stop_disconnects_exactly_once() {
        let mut c = carousel(3, CarouselConfig::default().with_autoplay(true));
        let t0 = Instant::now();
        c.start(t0).unwrap();
        assert!(c.autoplay().is_armed());
        c.stop();
        c.stop();
        assert_eq!(c.host().disconnect_count(), 1);
        assert!(!c.autoplay().is_armed());
        assert_eq!(c.next_deadline(), None);
        assert_eq!(c.start(t0), Err(CarouselError::NotRunning));
    }

    #[test]
    fn stop_restores_transitions() {
        let mut c = carousel(2, CarouselConfig::default());
        c.start(Instant::now()).unwrap();
        assert!(!c.host().transitions_enabled());
        c.stop();
        assert!(c.host().transitions_enabled());
    }

    #[test]
    fn swipe_and_keys_navigate() {
        let mut c = carousel(4, CarouselConfig::default());
        let t0 = Instant::now();
        c.start(t0).unwrap();
        c.handle_event(CarouselEvent::Swipe(SwipeDirection::Left), t0).unwrap();
        assert_eq!(c.active_index(), 1);
        c.handle_event(CarouselEvent::Swipe(SwipeDirection::Right), t0).unwrap();
        assert_eq!(c.active_index(), 0);
        c.handle_event(CarouselEvent::Key(NavKey::Last), t0).unwrap();
        assert_eq!(c.active_index(), 3);
        c.handle_event(CarouselEvent::Key(NavKey::First), t0).unwrap();
        assert_eq!(c.active_index(), 0);
        c.handle_event(CarouselEvent::Key(NavKey::Next), t0).unwrap();
        c.handle_event(CarouselEvent::Key(NavKey::Prev), t0).unwrap();
        assert_eq!(c.active_index(), 0);
    }

    #[test]
    fn user_drag_onto_real_slide_publishes_change() {
        let mut c = carousel(3, CarouselConfig::default());
        let t0 = Instant::now();
        c.start(t0).unwrap();
        let now = run_until_settled(&mut c, t0);

        c.host_mut().drag_to(SlideKey::real(SlideId::new(2)));
        run_until_settled(&mut c, now);
        assert_eq!(c.active_index(), 2);
        assert_eq!(
            c.host().notifications(),
            vec![Notification::SlideChange {
                slide_index: 2,
                slide: SlideId::new(2)
            }]
        );
    }

    #[test]
    fn stale_reports_are_counted() {
        let mut c = carousel(2, CarouselConfig::default());
        let t0 = Instant::now();
        c.start(t0).unwrap();
        let ghost = SlideKey::real(SlideId::new(40));
        c.handle_event(
            CarouselEvent::Intersections(vec![
                slidekit_core::event::IntersectionEntry::visible(ghost),
            ]),
            t0,
        )
        .unwrap();
        c.tick(t0 + ms(100));
        assert_eq!(c.stats().stale_callbacks, 1);
        assert_eq!(c.active_index(), 0);
    }

    #[test]
    fn set_slides_while_running_clamps_and_reseats() {
        let mut c = carousel(5, CarouselConfig::default());
        let t0 = Instant::now();
        c.start(t0).unwrap();
        c.scroll_to_slide(4, ScrollBehavior::Smooth).unwrap();
        c.set_slides((10..12).map(Slide::new).collect());
        assert_eq!(c.active_index(), 1);
        let last = c.host().notifications().last().copied();
        assert_eq!(
            last,
            Some(Notification::SlideChange {
                slide_index: 1,
                slide: SlideId::new(11)
            })
        );
        assert_eq!(c.host().in_view(), Some(SlideKey::real(SlideId::new(11))));
    }

    #[test]
    fn toggling_loop_rebuilds_membership() {
        let mut c = carousel(3, CarouselConfig::default());
        c.start(Instant::now()).unwrap();
        assert_eq!(c.host().observed().len(), 3);
        c.set_loop(true);
        assert_eq!(c.host().observed().len(), 5);
        assert_eq!(c.get_slides(true).count(), 5);
        assert_eq!(c.get_slides(false).count(), 3);
        c.set_loop(false);
        assert_eq!(c.host().observed().len(), 3);
    }

    #[test]
    fn view_carries_heading_and_labels() {
        let config = CarouselConfig::default()
            .with_heading("Gallery")
            .with_controls(true)
            .with_pagination(true);
        let mut c = Carousel::new(config, HostSimulator::new()).unwrap();
        c.set_slides(vec![Slide::new(1).with_label("Cover"), Slide::new(2)]);
        c.start(Instant::now()).unwrap();

        let view = c.view(&Direction::Ltr);
        assert_eq!(view.heading, "Gallery");
        assert_eq!(view.slide_labels, vec!["Cover".to_string(), "2 of 2".to_string()]);
        assert!(view.state.prev_disabled);
        assert!(!view.state.next_disabled);
        assert_eq!(view.state.pagination.map(|p| p.len()), Some(2));
    }

    #[test]
    fn snapshot_restores_before_start() {
        let mut c = carousel(4, CarouselConfig::default());
        c.restore(CarouselSnapshot {
            active_index: 2,
            loop_enabled: true,
        })
        .unwrap();
        c.start(Instant::now()).unwrap();
        assert_eq!(c.active_index(), 2);
        assert!(c.registry().loop_enabled());
        assert_eq!(c.host().scrolls()[0].position, 3);
        assert!(c.host().notifications().is_empty());
        assert_eq!(
            c.snapshot(),
            CarouselSnapshot {
                active_index: 2,
                loop_enabled: true
            }
        );
    }

    #[test]
    fn snapshot_restore_while_running_jumps() {
        let mut c = carousel(4, CarouselConfig::default());
        c.start(Instant::now()).unwrap();
        c.restore(CarouselSnapshot {
            active_index: 3,
            loop_enabled: false,
        })
        .unwrap();
        assert_eq!(c.active_index(), 3);
        assert_eq!(c.host().scrolls().last().map(|s| s.behavior), Some(ScrollBehavior::Instant));
    }

    /// Warning paths compile and run with the logging macros expanded away.
    #[test]
    #[cfg(not(feature = "tracing"))]
    fn warning_paths_run_without_tracing() {
        let config = CarouselConfig::default()
            .with_autoplay(true)
            .with_autoplay_interval(ms(1_000));
        let mut c = carousel(3, config);
        let t0 = Instant::now();
        c.start(t0).unwrap();

        c.tick(t0 + ms(1_010));
        assert_eq!(c.active_index(), 1);

        c.set_loop(true);
        assert_eq!(c.active_index(), 1);
        assert_eq!(c.host().scrolls().last().map(|s| s.position), Some(2));

        let ghost = SlideKey::real(SlideId::new(40));
        c.handle_event(
            CarouselEvent::Intersections(vec![
                slidekit_core::event::IntersectionEntry::visible(ghost),
            ]),
            t0 + ms(1_020),
        )
        .unwrap();
        c.tick(t0 + ms(1_200));
        assert_eq!(c.stats().stale_callbacks, 1);
        assert_eq!(c.active_index(), 1);
    }

    #[test]
    fn zero_interval_update_is_rejected() {
        let mut c = carousel(2, CarouselConfig::default());
        assert!(c.set_autoplay_interval(Duration::ZERO, Instant::now()).is_err());
        assert!(c.set_autoplay_interval(ms(500), Instant::now()).is_ok());
        assert_eq!(c.config().autoplay_interval, ms(500));
    }
}
