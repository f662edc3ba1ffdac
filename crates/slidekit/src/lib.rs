#![forbid(unsafe_code)]

//! slidekit public facade crate.
//!
//! Re-exports the carousel engine, its host traits, and the presentation
//! types from the internal crates, plus a prelude for day-to-day use.

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use slidekit_core::direction::{Direction, DirectionLookup, LocaleDirection};
pub use slidekit_core::event::{
    Axis, CarouselEvent, IntersectionEntry, NavKey, ScrollBehavior, SwipeDirection,
};
pub use slidekit_core::registry::{ObserverMembership, SlideEntry, SlideRegistry};
pub use slidekit_core::{CarouselError, CloneEdge, Slide, SlideFlags, SlideId, SlideKey};

// --- Widget re-exports -----------------------------------------------------

pub use slidekit_widgets::{
    ControlState, ControlsState, DerivedState, IndicatorMode, PaginationEntry,
    PaginationIndicator, PresenterInput,
};

// --- Runtime re-exports ----------------------------------------------------

pub use slidekit_runtime::{
    Carousel, CarouselConfig, CarouselHost, CarouselSnapshot, CarouselStats, CarouselView,
    EventSink, Lifecycle, NavState, Notification, ScrollRequest, ScrollSurface, VisibilityOracle,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for slidekit hosts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The carousel rejected an operation.
    Carousel(CarouselError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Carousel(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Carousel(err) => Some(err),
        }
    }
}

impl From<CarouselError> for Error {
    fn from(err: CarouselError) -> Self {
        Self::Carousel(err)
    }
}

/// Standard result type for slidekit APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Carousel, CarouselConfig, CarouselEvent, CarouselHost, Direction, Error, EventSink,
        Notification, Result, ScrollBehavior, ScrollRequest, ScrollSurface, Slide, SlideId,
        SlideKey, VisibilityOracle,
    };

    pub use crate::{core, runtime, widgets};
}

pub use slidekit_core as core;
pub use slidekit_runtime as runtime;
pub use slidekit_widgets as widgets;
