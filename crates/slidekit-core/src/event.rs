#![forbid(unsafe_code)]

//! Input events consumed by the carousel engine.
//!
//! The host translates whatever its toolkit delivers (pointer and focus
//! transitions, scroll notifications, visibility reports, gestures, key
//! presses, animation frames) into [`CarouselEvent`] values and feeds them to
//! the engine together with the current time.

use crate::slide::SlideKey;

/// How a scroll request should move the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollBehavior {
    /// Animated movement.
    #[default]
    Smooth,
    /// Jump without animation.
    Instant,
}

impl ScrollBehavior {
    /// Stable lowercase name, used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Smooth => "smooth",
            Self::Instant => "instant",
        }
    }
}

/// Scroll axis of the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    /// Slides laid out left to right (or right to left).
    #[default]
    Horizontal,
    /// Slides stacked top to bottom.
    Vertical,
}

/// One visibility report for an observed entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    /// The observed sequence entry.
    pub key: SlideKey,
    /// Whether the entry crossed into view past the threshold.
    pub is_intersecting: bool,
    /// Visible fraction of the entry's area in `[0, 1]`.
    pub ratio: f32,
}

impl IntersectionEntry {
    /// An entry reported as visible past the threshold.
    #[must_use]
    pub fn visible(key: SlideKey) -> Self {
        Self {
            key,
            is_intersecting: true,
            ratio: 1.0,
        }
    }

    /// An entry reported as scrolled out of view.
    #[must_use]
    pub fn hidden(key: SlideKey) -> Self {
        Self {
            key,
            is_intersecting: false,
            ratio: 0.0,
        }
    }
}

/// Discrete swipe gesture direction, as recognized by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    /// Content dragged toward the left: advance.
    Left,
    /// Content dragged toward the right: go back.
    Right,
}

/// Keyboard navigation commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    /// Previous slide.
    Prev,
    /// Next slide.
    Next,
    /// First slide.
    First,
    /// Last slide.
    Last,
}

/// Events the host feeds into the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum CarouselEvent {
    /// Pointer entered the carousel.
    PointerEnter,
    /// Pointer left the carousel.
    PointerLeave,
    /// Focus moved inside the carousel.
    FocusIn,
    /// Focus left the carousel.
    FocusOut,
    /// The viewport scrolled.
    Scroll,
    /// A batch of visibility reports from the oracle.
    Intersections(Vec<IntersectionEntry>),
    /// A recognized swipe gesture.
    Swipe(SwipeDirection),
    /// A navigation key press.
    Key(NavKey),
    /// An animation-frame boundary.
    Frame,
}

impl CarouselEvent {
    /// Short event name for span fields.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::PointerEnter => "pointer_enter",
            Self::PointerLeave => "pointer_leave",
            Self::FocusIn => "focus_in",
            Self::FocusOut => "focus_out",
            Self::Scroll => "scroll",
            Self::Intersections(_) => "intersections",
            Self::Swipe(_) => "swipe",
            Self::Key(_) => "key",
            Self::Frame => "frame",
        }
    }
}
