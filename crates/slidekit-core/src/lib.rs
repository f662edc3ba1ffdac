#![forbid(unsafe_code)]

//! Core: slide identities, the slide registry, input events, and the timing
//! primitives the carousel engine is built on.

pub mod debounce;
pub mod direction;
pub mod error;
pub mod event;
pub mod logging;
pub mod registry;
pub mod slide;

pub use error::CarouselError;
pub use slide::{CloneEdge, Slide, SlideFlags, SlideId, SlideKey};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
