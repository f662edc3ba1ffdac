#![forbid(unsafe_code)]

//! Derived carousel state: control enablement, pagination entries, labels,
//! and the textual pagination indicator.
//!
//! Everything here is a pure projection of the authoritative active index.
//! Nothing holds state between calls, so hosts may recompute on every frame.

pub mod pagination;
pub mod presenter;

pub use pagination::{IndicatorMode, PaginationIndicator};
pub use presenter::{
    ControlState, ControlsState, DerivedState, PaginationEntry, PresenterInput, slide_label,
};
