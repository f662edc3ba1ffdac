#![forbid(unsafe_code)]

//! Slide identities and per-entry flags.
//!
//! Real slides are created and destroyed by the host content source; the
//! engine only ever fabricates clone entries. A [`SlideKey`] distinguishes the
//! two so that a clone and the real slide it duplicates can be observed,
//! scrolled to, and marked inert independently.

use bitflags::bitflags;
use core::fmt;

/// Stable host-assigned identity of a real slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlideId(u64);

impl SlideId {
    /// Wrap a raw host identity.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw identity value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SlideId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slide#{}", self.0)
    }
}

/// An opaque content unit supplied by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Slide {
    /// Stable identity.
    pub id: SlideId,
    /// Optional human-readable label, used for accessibility text.
    pub label: Option<String>,
}

impl Slide {
    /// Create an unlabeled slide.
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self {
            id: SlideId::new(id),
            label: None,
        }
    }

    /// Attach a human-readable label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Which end of the sequence a clone sits at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CloneEdge {
    /// Prepended clone of the last real slide.
    Leading,
    /// Appended clone of the first real slide.
    Trailing,
}

/// Identity of one entry in the slide sequence (real slide or clone).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlideKey {
    id: SlideId,
    clone: Option<CloneEdge>,
}

impl SlideKey {
    /// Key of a real slide.
    #[must_use]
    pub const fn real(id: SlideId) -> Self {
        Self { id, clone: None }
    }

    /// Key of a boundary clone duplicating `id`.
    #[must_use]
    pub const fn clone_of(id: SlideId, edge: CloneEdge) -> Self {
        Self {
            id,
            clone: Some(edge),
        }
    }

    /// The real slide this entry shows.
    #[must_use]
    pub const fn id(self) -> SlideId {
        self.id
    }

    /// Whether this entry is a synthetic clone.
    #[must_use]
    pub const fn is_clone(self) -> bool {
        self.clone.is_some()
    }

    /// Clone edge, `None` for real slides.
    #[must_use]
    pub const fn edge(self) -> Option<CloneEdge> {
        self.clone
    }
}

impl fmt::Display for SlideKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.clone {
            None => write!(f, "{}", self.id),
            Some(CloneEdge::Leading) => write!(f, "{}(leading clone)", self.id),
            Some(CloneEdge::Trailing) => write!(f, "{}(trailing clone)", self.id),
        }
    }
}

bitflags! {
    /// Per-entry markers maintained by the registry.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SlideFlags: u8 {
        /// Synthetic boundary duplicate.
        const CLONE = 0b0001;
        /// Hidden from interaction and assistive technology.
        const INERT = 0b0010;
    }
}
