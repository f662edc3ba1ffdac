#![forbid(unsafe_code)]

//! Derived-state presenter.
//!
//! [`DerivedState::derive`] maps the authoritative active index and the
//! display flags onto what the surrounding UI renders: whether the previous
//! and next controls are disabled, which pagination entry is current, and the
//! labels and icons that go with them.
//!
//! # Invariants
//!
//! 1. With looping enabled neither control is ever disabled.
//! 2. With looping disabled, previous is disabled exactly at index 0 and next
//!    exactly at `slide_count - 1`.
//! 3. Pagination has one entry per real slide and exactly one active entry
//!    (none for an empty carousel).
//! 4. Deriving twice from the same input yields equal output.

use slidekit_core::direction::Direction;

use crate::pagination::{IndicatorMode, PaginationIndicator};

/// Inputs to the projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PresenterInput {
    /// Authoritative active index.
    pub active_index: usize,
    /// Number of real slides.
    pub slide_count: usize,
    /// Whether infinite looping is enabled.
    pub loop_enabled: bool,
    /// Whether previous/next controls are shown.
    pub show_controls: bool,
    /// Whether pagination indicators are shown.
    pub show_pagination: bool,
    /// Writing direction, used to mirror control icons.
    pub direction: Direction,
}

/// One pagination indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationEntry {
    /// Logical index this entry jumps to.
    pub logical_index: usize,
    /// Whether this is the current slide.
    pub is_active: bool,
    /// Accessible label, e.g. "Go to slide 2 of 4".
    pub label: String,
}

/// One previous/next control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlState {
    /// Navigation in this direction is not allowed.
    pub disabled: bool,
    /// Icon name, mirrored in right-to-left layouts.
    pub icon: &'static str,
    /// Accessible label.
    pub label: &'static str,
}

/// Both controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlsState {
    /// The previous-slide control.
    pub prev: ControlState,
    /// The next-slide control.
    pub next: ControlState,
}

/// UI-facing projection of the carousel state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedState {
    /// Active index normalized into `[0, slide_count)`.
    pub active_index: usize,
    /// Number of real slides.
    pub slide_count: usize,
    /// Previous navigation is disallowed.
    pub prev_disabled: bool,
    /// Next navigation is disallowed.
    pub next_disabled: bool,
    /// Controls, when shown.
    pub controls: Option<ControlsState>,
    /// Pagination entries, when shown.
    pub pagination: Option<Vec<PaginationEntry>>,
}

impl DerivedState {
    /// Project `input` into UI state.
    #[must_use]
    pub fn derive(input: PresenterInput) -> Self {
        #[cfg(feature = "tracing")]
        let _span = tracing::trace_span!(
            "presenter_derive",
            active = input.active_index,
            count = input.slide_count,
            loop_enabled = input.loop_enabled
        )
        .entered();

        let count = input.slide_count;
        let active = if count == 0 {
            0
        } else {
            input.active_index % count
        };

        let (prev_disabled, next_disabled) = if count == 0 {
            (true, true)
        } else if input.loop_enabled {
            (false, false)
        } else {
            (active == 0, active == count - 1)
        };

        let controls = input.show_controls.then(|| {
            let (prev_icon, next_icon) = match input.direction {
                Direction::Ltr => ("chevron-left", "chevron-right"),
                Direction::Rtl => ("chevron-right", "chevron-left"),
            };
            ControlsState {
                prev: ControlState {
                    disabled: prev_disabled,
                    icon: prev_icon,
                    label: "Previous slide",
                },
                next: ControlState {
                    disabled: next_disabled,
                    icon: next_icon,
                    label: "Next slide",
                },
            }
        });

        let pagination = input.show_pagination.then(|| {
            (0..count)
                .map(|logical_index| PaginationEntry {
                    logical_index,
                    is_active: logical_index == active,
                    label: format!("Go to slide {} of {count}", logical_index + 1),
                })
                .collect()
        });

        Self {
            active_index: active,
            slide_count: count,
            prev_disabled,
            next_disabled,
            controls,
            pagination,
        }
    }

    /// Textual indicator for the current position.
    #[must_use]
    pub fn indicator(&self, mode: IndicatorMode, max_width: usize) -> String {
        PaginationIndicator::new(self.active_index, self.slide_count)
            .mode(mode)
            .format_for_width(max_width)
    }
}

/// Accessible label for a slide: its own label, or "{n} of {count}".
#[must_use]
pub fn slide_label(logical_index: usize, slide_count: usize, label: Option<&str>) -> String {
    match label {
        Some(label) => label.to_string(),
        None => format!("{} of {slide_count}", logical_index + 1),
    }
}
