#![forbid(unsafe_code)]

//! Navigation controller: the single owner of the active index.
//!
//! # State machine
//!
//! ```text
//!            clone settles in view
//!   Idle ───────────────────────────▶ ReconcilingClone { AwaitingSettle }
//!    ▲                                         │ scroll silent for quiet window
//!    │                                         ▼
//!    │  real target observed      ReconcilingClone { AwaitingConfirm }
//!    └─────────────────────────────────────────┘   (instant seek issued)
//! ```
//!
//! A user seek, or a different real slide settling in view, abandons any
//! reconciliation and returns to `Idle`. While reconciling, further clone
//! reports are ignored so that at most one corrective seek is in flight.
//!
//! # Policy
//!
//! - `seek(i)` normalizes `i` into `[0, count)` and lands on the real slide.
//! - `step` with looping disabled stops at the boundaries. With looping
//!   enabled it moves to the physically adjacent entry, which is a clone at
//!   the edges; the clone is then silently corrected. A step taken while the
//!   viewport still rests on a clone seeks the real neighbour instead.
//! - The active index changes, and a change is reported, only when the
//!   logical index actually differs. Corrections never report a change.

use std::time::{Duration, Instant};

use slidekit_core::debounce::Debouncer;
use slidekit_core::event::ScrollBehavior;
use slidekit_core::registry::SlideRegistry;
use slidekit_core::{CarouselError, SlideId, SlideKey};

/// Progress of a clone correction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcilePhase {
    /// Waiting for scrolling to stop before jumping.
    AwaitingSettle,
    /// Jump issued; waiting for the real slide to be observed.
    AwaitingConfirm,
}

/// Controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavState {
    /// No correction pending.
    #[default]
    Idle,
    /// The viewport rests on a clone of `target` and is being re-seated.
    ReconcilingClone {
        /// Logical index the clone stands in for.
        target: usize,
        /// Correction progress.
        phase: ReconcilePhase,
    },
}

impl NavState {
    /// Whether a correction is in flight.
    #[must_use]
    pub const fn is_reconciling(&self) -> bool {
        matches!(self, Self::ReconcilingClone { .. })
    }
}

/// A scroll the host should perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seek {
    /// Entry to bring into view.
    pub key: SlideKey,
    /// Physical position of the entry.
    pub position: usize,
    /// Animated or instant.
    pub behavior: ScrollBehavior,
}

/// A change of the active index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveChange {
    /// New active index.
    pub slide_index: usize,
    /// Slide now active.
    pub slide: SlideId,
}

/// Side effects requested by a controller transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavOutcome {
    /// Scroll to perform.
    pub seek: Option<Seek>,
    /// Active-index change to publish.
    pub change: Option<ActiveChange>,
}

impl NavOutcome {
    /// Whether the transition requested nothing.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.seek.is_none() && self.change.is_none()
    }
}

/// Direction of a single step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Toward index 0.
    Prev,
    /// Toward the last slide.
    Next,
}

/// Owner of the active index and the clone-correction state machine.
#[derive(Debug, Clone)]
pub struct NavigationController {
    active: usize,
    position: Option<usize>,
    state: NavState,
    settle: Debouncer,
}

impl NavigationController {
    /// Create a controller at index 0 whose corrections wait for `settle_quiet`
    /// of scroll silence.
    #[must_use]
    pub fn new(settle_quiet: Duration) -> Self {
        Self {
            active: 0,
            position: None,
            state: NavState::Idle,
            settle: Debouncer::new(settle_quiet),
        }
    }

    /// The active logical index.
    #[must_use]
    pub fn active(&self) -> usize {
        self.active
    }

    /// Last requested or observed physical position.
    #[must_use]
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> NavState {
        self.state
    }

    /// Deadline of a pending settle wait.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.settle.deadline()
    }

    /// Scroll to the real slide at `target`, wrapping out-of-range indices.
    pub fn seek(
        &mut self,
        registry: &SlideRegistry,
        target: isize,
        behavior: ScrollBehavior,
    ) -> Result<NavOutcome, CarouselError> {
        let normalized = normalize(target, registry.len())?;
        let position = registry
            .real_position(normalized)
            .ok_or(CarouselError::EmptyCollection)?;
        let key = registry
            .entry_at(position)
            .map(|entry| entry.key())
            .ok_or(CarouselError::EmptyCollection)?;

        self.abandon_reconciliation();
        self.position = Some(position);
        slidekit_core::debug!(
            requested = target,
            active = normalized,
            position,
            behavior = behavior.as_str(),
            "seek"
        );
        Ok(NavOutcome {
            seek: Some(Seek {
                key,
                position,
                behavior,
            }),
            change: self.set_active(registry, normalized),
        })
    }

    /// Move one slide backward or forward.
    ///
    /// With looping disabled a step past either boundary is a no-op.
    pub fn step(
        &mut self,
        registry: &SlideRegistry,
        step: Step,
        behavior: ScrollBehavior,
    ) -> Result<NavOutcome, CarouselError> {
        let count = registry.len();
        if count == 0 {
            return Err(CarouselError::EmptyCollection);
        }

        if !registry.loop_enabled() {
            let target = match step {
                Step::Prev if self.active == 0 => return Ok(NavOutcome::default()),
                Step::Prev => self.active - 1,
                Step::Next if self.active + 1 >= count => return Ok(NavOutcome::default()),
                Step::Next => self.active + 1,
            };
            return self.seek(registry, target as isize, behavior);
        }

        // Stepping off a clone that has not been corrected yet targets the
        // real neighbour of the active slide.
        let on_clone = self
            .position
            .and_then(|position| registry.entry_at(position))
            .is_some_and(|entry| entry.is_clone());
        if on_clone {
            let target = match step {
                Step::Prev => self.active as isize - 1,
                Step::Next => self.active as isize + 1,
            };
            return self.seek(registry, target, behavior);
        }

        let base = registry
            .real_position(self.active)
            .ok_or(CarouselError::EmptyCollection)?;
        let position = match step {
            Step::Prev => base - 1,
            Step::Next => base + 1,
        };
        let Some(entry) = registry.entry_at(position) else {
            return Err(CarouselError::EmptyCollection);
        };
        let (key, logical) = (entry.key(), entry.logical_index());

        self.abandon_reconciliation();
        self.position = Some(position);
        slidekit_core::debug!(
            active = logical,
            position,
            clone = key.is_clone(),
            behavior = behavior.as_str(),
            "step"
        );
        Ok(NavOutcome {
            seek: Some(Seek {
                key,
                position,
                behavior,
            }),
            change: self.set_active(registry, logical),
        })
    }

    /// An entry settled in view.
    pub fn on_intersection(
        &mut self,
        registry: &SlideRegistry,
        key: SlideKey,
        now: Instant,
    ) -> NavOutcome {
        let Some(entry) = registry.get(key) else {
            return NavOutcome::default();
        };
        let logical = entry.logical_index();
        let position = registry.position_of(key);

        if let NavState::ReconcilingClone { target, .. } = self.state {
            if entry.is_clone() {
                slidekit_core::trace!(
                    target_index = target,
                    seen = logical,
                    "clone report ignored while reconciling"
                );
                return NavOutcome::default();
            }
            if logical == target {
                self.state = NavState::Idle;
                self.settle.cancel();
                self.position = position;
                slidekit_core::debug!(active = target, "clone correction confirmed");
                return NavOutcome::default();
            }
            slidekit_core::debug!(target_index = target, seen = logical, "clone correction superseded");
            self.abandon_reconciliation();
        }

        self.position = position;
        if entry.is_clone() && registry.loop_enabled() {
            self.state = NavState::ReconcilingClone {
                target: logical,
                phase: ReconcilePhase::AwaitingSettle,
            };
            let _generation = self.settle.trigger(now);
            slidekit_core::debug!(
                target_index = logical,
                generation = _generation,
                "clone settled in view"
            );
        }
        NavOutcome {
            seek: None,
            change: self.set_active(registry, logical),
        }
    }

    /// The viewport scrolled; postpone a pending correction.
    pub fn on_scroll(&mut self, now: Instant) {
        if let NavState::ReconcilingClone {
            phase: ReconcilePhase::AwaitingSettle,
            ..
        } = self.state
        {
            self.settle.trigger(now);
        }
    }

    /// Issue the corrective jump once scrolling has been silent long enough.
    pub fn poll(&mut self, registry: &SlideRegistry, now: Instant) -> NavOutcome {
        let Some(_generation) = self.settle.poll(now) else {
            return NavOutcome::default();
        };
        let NavState::ReconcilingClone {
            target,
            phase: ReconcilePhase::AwaitingSettle,
        } = self.state
        else {
            return NavOutcome::default();
        };

        let Some((position, key)) = registry
            .real_position(target)
            .and_then(|position| registry.entry_at(position).map(|e| (position, e.key())))
        else {
            self.state = NavState::Idle;
            return NavOutcome::default();
        };

        self.state = NavState::ReconcilingClone {
            target,
            phase: ReconcilePhase::AwaitingConfirm,
        };
        self.position = Some(position);
        slidekit_core::debug!(
            target_index = target,
            position,
            generation = _generation,
            "clone correction issued"
        );
        NavOutcome {
            seek: Some(Seek {
                key,
                position,
                behavior: ScrollBehavior::Instant,
            }),
            change: None,
        }
    }

    /// Re-seat after the registry changed shape (loop toggle, new slides).
    ///
    /// Clamps the active index into the new range and reports a change when
    /// clamping moved it.
    pub fn rebase(&mut self, registry: &SlideRegistry) -> Option<ActiveChange> {
        self.abandon_reconciliation();
        let count = registry.len();
        if count == 0 {
            self.active = 0;
            self.position = None;
            return None;
        }
        let clamped = self.active.min(count - 1);
        self.position = registry.real_position(clamped);
        self.set_active(registry, clamped)
    }

    /// Set the active index without reporting, e.g. before the first seek.
    pub fn reset(&mut self, active: usize) {
        self.abandon_reconciliation();
        self.active = active;
        self.position = None;
    }

    /// Drop any pending correction.
    pub fn cancel(&mut self) {
        self.abandon_reconciliation();
    }

    fn abandon_reconciliation(&mut self) {
        self.state = NavState::Idle;
        self.settle.cancel();
    }

    fn set_active(&mut self, registry: &SlideRegistry, logical: usize) -> Option<ActiveChange> {
        if logical == self.active {
            return None;
        }
        let slide = registry.real_slide(logical)?.id;
        self.active = logical;
        Some(ActiveChange {
            slide_index: logical,
            slide,
        })
    }
}

/// Wrap `index` into `[0, count)`.
pub fn normalize(index: isize, count: usize) -> Result<usize, CarouselError> {
    if count == 0 {
        return Err(CarouselError::EmptyCollection);
    }
    let count = count as isize;
    Ok(index.rem_euclid(count) as usize)
}
