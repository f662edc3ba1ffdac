#![forbid(unsafe_code)]

//! Host collaborator traits.
//!
//! The engine never touches a real viewport. It talks to three narrow
//! interfaces that the embedding toolkit implements:
//!
//! - [`ScrollSurface`]: moves the viewport to a sequence entry.
//! - [`VisibilityOracle`]: reports which entries cross the visibility
//!   threshold, with observe/unobserve/disconnect lifecycle.
//! - [`EventSink`]: receives `slide-change` notifications.
//!
//! Any type implementing all three is a [`CarouselHost`].

use slidekit_core::event::{Axis, IntersectionEntry, ScrollBehavior};
use slidekit_core::registry::ObserverMembership;
use slidekit_core::{SlideId, SlideKey};

/// A request to bring one sequence entry into view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollRequest {
    /// Entry to scroll to.
    pub key: SlideKey,
    /// Physical position of that entry in the sequence.
    pub position: usize,
    /// Scroll axis.
    pub axis: Axis,
    /// Animated or instant.
    pub behavior: ScrollBehavior,
}

/// The viewport scroll surface.
pub trait ScrollSurface {
    /// Scroll `request.key` into view within the carousel viewport.
    fn scroll_to(&mut self, request: ScrollRequest);

    /// Enable or disable visual transitions on the surface.
    ///
    /// Instant jumps disable transitions, force a layout read-back, and
    /// re-enable them on the next animation frame so no flash is visible.
    fn set_transitions_enabled(&mut self, enabled: bool) {
        let _ = enabled;
    }

    /// Force a synchronous layout read-back.
    fn sync_layout(&mut self) {}
}

/// The visibility oracle (an intersection observer).
pub trait VisibilityOracle: ObserverMembership {
    /// Drain any reports queued but not yet delivered.
    fn take_records(&mut self) -> Vec<IntersectionEntry>;

    /// Stop observing everything. Called exactly once, at end of life.
    fn disconnect(&mut self);
}

/// Notifications published by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    /// The active logical index changed.
    SlideChange {
        /// New active index.
        slide_index: usize,
        /// Identity of the slide now active.
        slide: SlideId,
    },
}

impl Notification {
    /// Event name as published to listeners.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SlideChange { .. } => "slide-change",
        }
    }
}

/// Receiver of engine notifications.
pub trait EventSink {
    /// Publish a notification.
    fn emit(&mut self, notification: Notification);
}

/// Everything the engine needs from its host.
pub trait CarouselHost: ScrollSurface + VisibilityOracle + EventSink {}

impl<T> CarouselHost for T where T: ScrollSurface + VisibilityOracle + EventSink {}
