#![forbid(unsafe_code)]

//! Error kinds surfaced by the carousel engine.
//!
//! Ordinary navigation never fails: out-of-range indices wrap and boundary
//! moves with looping disabled are reported through the derived state rather
//! than as errors. What remains is the empty collection, rejected
//! configuration, and calls against an engine that is not running.
//!
//! Stale observer callbacks (an intersection for a slide the registry no
//! longer holds) are a tolerated race and are never surfaced here.

use core::fmt;

/// Errors returned by carousel operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CarouselError {
    /// No real slides are registered; index arithmetic is undefined.
    EmptyCollection,
    /// A configuration value was rejected.
    InvalidConfig {
        /// Name of the offending option.
        field: &'static str,
        /// Why it was rejected.
        reason: &'static str,
    },
    /// The engine was used before `start` or after `stop`.
    NotRunning,
}

impl fmt::Display for CarouselError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCollection => write!(f, "carousel has no slides"),
            Self::InvalidConfig { field, reason } => {
                write!(f, "invalid carousel option `{field}`: {reason}")
            }
            Self::NotRunning => write!(f, "carousel is not running"),
        }
    }
}

impl std::error::Error for CarouselError {}
