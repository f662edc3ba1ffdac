#![forbid(unsafe_code)]

//! Slide registry: the ordered arena of real slides plus boundary clones.
//!
//! The registry owns the *slide sequence*, the physical order the viewport
//! scrolls through:
//!
//! ```text
//! loop off:  [ 0, 1, 2, 3 ]
//! loop on:   [ clone(3), 0, 1, 2, 3, clone(0) ]
//! ```
//!
//! Clones are entries tagged with the logical index they stand in for. They
//! count toward physical positions but never toward logical counts.
//!
//! # Invariants
//!
//! 1. `physical_len() == len() + 2 * loop_offset()`.
//! 2. Clones exist only while looping is enabled and at least one real slide
//!    is registered.
//! 3. Every clone is `CLONE | INERT`.
//! 4. Keys are unique across the sequence; duplicate host ids keep their
//!    first occurrence.
//!
//! Membership changes go through [`resync`](SlideRegistry::resync) or
//! [`replace_slides`](SlideRegistry::replace_slides), which unobserve every
//! current entry, rebuild the sequence, then observe every new entry. Both
//! take `&mut self`, so no observer callback can run against a half-built
//! sequence.

use crate::slide::{CloneEdge, Slide, SlideFlags, SlideKey};

/// Observer membership, the part of the visibility oracle the registry drives.
pub trait ObserverMembership {
    /// Start reporting visibility for `key`.
    fn observe(&mut self, key: SlideKey);
    /// Stop reporting visibility for `key`.
    fn unobserve(&mut self, key: SlideKey);
}

/// One entry of the slide sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideEntry {
    key: SlideKey,
    logical_index: usize,
    label: Option<String>,
    flags: SlideFlags,
}

impl SlideEntry {
    /// Sequence key.
    #[must_use]
    pub fn key(&self) -> SlideKey {
        self.key
    }

    /// Logical index of the real slide this entry shows.
    #[must_use]
    pub fn logical_index(&self) -> usize {
        self.logical_index
    }

    /// Host-supplied label of the underlying slide.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Entry flags.
    #[must_use]
    pub fn flags(&self) -> SlideFlags {
        self.flags
    }

    /// Whether this entry is a clone.
    #[must_use]
    pub fn is_clone(&self) -> bool {
        self.flags.contains(SlideFlags::CLONE)
    }

    /// Whether this entry is hidden from interaction.
    #[must_use]
    pub fn is_inert(&self) -> bool {
        self.flags.contains(SlideFlags::INERT)
    }
}

/// Ordered registry of real slides and their loop clones.
#[derive(Debug, Clone, Default)]
pub struct SlideRegistry {
    slides: Vec<Slide>,
    sequence: Vec<SlideEntry>,
    loop_enabled: bool,
}

impl SlideRegistry {
    /// Create an empty registry with looping disabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding `slides`, looping disabled, nothing observed.
    #[must_use]
    pub fn with_slides(slides: Vec<Slide>) -> Self {
        let mut registry = Self {
            slides: dedup(slides),
            sequence: Vec::new(),
            loop_enabled: false,
        };
        registry.rebuild();
        registry
    }

    /// Number of real slides.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Whether no real slides are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Number of sequence entries, clones included.
    #[must_use]
    pub fn physical_len(&self) -> usize {
        self.sequence.len()
    }

    /// Whether loop clones are requested.
    #[must_use]
    pub fn loop_enabled(&self) -> bool {
        self.loop_enabled
    }

    /// Physical offset of real slide 0: 1 when a leading clone exists.
    #[must_use]
    pub fn loop_offset(&self) -> usize {
        usize::from(self.has_clones())
    }

    fn has_clones(&self) -> bool {
        self.loop_enabled && !self.slides.is_empty()
    }

    /// Sequence entries in physical order, optionally without clones.
    pub fn slides(&self, include_clones: bool) -> impl Iterator<Item = &SlideEntry> + '_ {
        self.sequence
            .iter()
            .filter(move |entry| include_clones || !entry.is_clone())
    }

    /// Every key in physical order.
    #[must_use]
    pub fn keys(&self) -> Vec<SlideKey> {
        self.sequence.iter().map(SlideEntry::key).collect()
    }

    /// Entry at a physical position.
    #[must_use]
    pub fn entry_at(&self, position: usize) -> Option<&SlideEntry> {
        self.sequence.get(position)
    }

    /// Physical position of `key`, if registered.
    #[must_use]
    pub fn position_of(&self, key: SlideKey) -> Option<usize> {
        self.sequence.iter().position(|entry| entry.key == key)
    }

    /// Entry for `key`, if registered.
    #[must_use]
    pub fn get(&self, key: SlideKey) -> Option<&SlideEntry> {
        self.sequence.iter().find(|entry| entry.key == key)
    }

    /// Whether `key` is part of the current sequence.
    #[must_use]
    pub fn contains(&self, key: SlideKey) -> bool {
        self.position_of(key).is_some()
    }

    /// Physical position of the real slide at `logical`.
    #[must_use]
    pub fn real_position(&self, logical: usize) -> Option<usize> {
        (logical < self.slides.len()).then(|| logical + self.loop_offset())
    }

    /// The real slide at `logical`.
    #[must_use]
    pub fn real_slide(&self, logical: usize) -> Option<&Slide> {
        self.slides.get(logical)
    }

    /// Set or clear the inert marker. Clones stay inert regardless.
    ///
    /// Returns `false` when `key` is not registered.
    pub fn set_inert(&mut self, key: SlideKey, inert: bool) -> bool {
        let Some(entry) = self.sequence.iter_mut().find(|entry| entry.key == key) else {
            return false;
        };
        if !entry.is_clone() {
            entry.flags.set(SlideFlags::INERT, inert);
        }
        true
    }

    /// Apply a loop-mode setting, rebuilding clones and observer membership.
    pub fn resync(&mut self, loop_enabled: bool, observer: &mut impl ObserverMembership) {
        self.unobserve_all(observer);
        self.loop_enabled = loop_enabled;
        self.rebuild();
        self.observe_all(observer);
        crate::debug!(
            loop_enabled,
            slides = self.slides.len(),
            physical = self.sequence.len(),
            "registry resynced"
        );
    }

    /// Replace the real slides (host content changed) and resync.
    pub fn replace_slides(&mut self, slides: Vec<Slide>, observer: &mut impl ObserverMembership) {
        self.unobserve_all(observer);
        self.slides = dedup(slides);
        self.rebuild();
        self.observe_all(observer);
        crate::debug!(
            slides = self.slides.len(),
            physical = self.sequence.len(),
            "registry slides replaced"
        );
    }

    /// Unobserve every entry without changing the sequence.
    pub fn unobserve_all(&self, observer: &mut impl ObserverMembership) {
        for entry in &self.sequence {
            observer.unobserve(entry.key);
        }
    }

    /// Observe every entry, clones included.
    pub fn observe_all(&self, observer: &mut impl ObserverMembership) {
        for entry in &self.sequence {
            observer.observe(entry.key);
        }
    }

    fn rebuild(&mut self) {
        let count = self.slides.len();
        let mut sequence = Vec::with_capacity(count + 2);

        let inert_of = |key: SlideKey| {
            self.sequence
                .iter()
                .find(|entry| entry.key == key)
                .is_some_and(SlideEntry::is_inert)
        };

        if self.has_clones() {
            let last = &self.slides[count - 1];
            sequence.push(clone_entry(last, count - 1, CloneEdge::Leading));
        }
        for (logical_index, slide) in self.slides.iter().enumerate() {
            let key = SlideKey::real(slide.id);
            let mut flags = SlideFlags::empty();
            flags.set(SlideFlags::INERT, inert_of(key));
            sequence.push(SlideEntry {
                key,
                logical_index,
                label: slide.label.clone(),
                flags,
            });
        }
        if self.has_clones() {
            let first = &self.slides[0];
            sequence.push(clone_entry(first, 0, CloneEdge::Trailing));
        }

        self.sequence = sequence;
    }
}

fn clone_entry(slide: &Slide, logical_index: usize, edge: CloneEdge) -> SlideEntry {
    SlideEntry {
        key: SlideKey::clone_of(slide.id, edge),
        logical_index,
        label: slide.label.clone(),
        flags: SlideFlags::CLONE | SlideFlags::INERT,
    }
}

fn dedup(slides: Vec<Slide>) -> Vec<Slide> {
    let mut out: Vec<Slide> = Vec::with_capacity(slides.len());
    for slide in slides {
        if out.iter().any(|kept| kept.id == slide.id) {
            crate::warn!(id = slide.id.get(), "duplicate slide id ignored");
            continue;
        }
        out.push(slide);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slide::SlideId;

    #[derive(Debug, Default)]
    struct Recorder {
        observed: Vec<SlideKey>,
        log: Vec<(&'static str, SlideKey)>,
    }

    impl ObserverMembership for Recorder {
        fn observe(&mut self, key: SlideKey) {
            self.observed.push(key);
            self.log.push(("observe", key));
        }

        fn unobserve(&mut self, key: SlideKey) {
            self.observed.retain(|k| *k != key);
            self.log.push(("unobserve", key));
        }
    }

    fn slides(n: u64) -> Vec<Slide> {
        (0..n).map(Slide::new).collect()
    }

    fn real(id: u64) -> SlideKey {
        SlideKey::real(SlideId::new(id))
    }

    #[test]
    fn loop_disabled_has_no_clones() {
        let registry = SlideRegistry::with_slides(slides(4));
        assert_eq!(registry.len(), 4);
        assert_eq!(registry.physical_len(), 4);
        assert_eq!(registry.loop_offset(), 0);
        assert_eq!(registry.real_position(2), Some(2));
    }

    #[test]
    fn loop_enabled_wraps_sequence_with_clones() {
        let mut registry = SlideRegistry::with_slides(slides(4));
        let mut rec = Recorder::default();
        registry.resync(true, &mut rec);

        let keys = registry.keys();
        assert_eq!(keys.len(), 6);
        assert_eq!(keys[0], SlideKey::clone_of(SlideId::new(3), CloneEdge::Leading));
        assert_eq!(keys[5], SlideKey::clone_of(SlideId::new(0), CloneEdge::Trailing));
        assert_eq!(registry.entry_at(0).map(SlideEntry::logical_index), Some(3));
        assert_eq!(registry.entry_at(5).map(SlideEntry::logical_index), Some(0));
        assert_eq!(registry.real_position(0), Some(1));
        assert_eq!(rec.observed.len(), 6);
    }

    #[test]
    fn logical_view_excludes_clones() {
        let mut registry = SlideRegistry::with_slides(slides(3));
        registry.resync(true, &mut Recorder::default());
        let logical: Vec<usize> = registry.slides(false).map(SlideEntry::logical_index).collect();
        assert_eq!(logical, vec![0, 1, 2]);
        assert_eq!(registry.slides(true).count(), 5);
    }

    #[test]
    fn disabling_loop_removes_clones_and_their_observation() {
        let mut registry = SlideRegistry::with_slides(slides(3));
        let mut rec = Recorder::default();
        registry.resync(true, &mut rec);
        registry.resync(false, &mut rec);
        assert_eq!(registry.physical_len(), 3);
        assert_eq!(rec.observed, vec![real(0), real(1), real(2)]);
    }

    #[test]
    fn resync_unobserves_everything_before_observing() {
        let mut registry = SlideRegistry::with_slides(slides(2));
        let mut rec = Recorder::default();
        registry.resync(false, &mut rec);
        rec.log.clear();
        registry.resync(true, &mut rec);
        let first_observe = rec.log.iter().position(|(op, _)| *op == "observe");
        let last_unobserve = rec.log.iter().rposition(|(op, _)| *op == "unobserve");
        assert!(last_unobserve < first_observe);
    }

    #[test]
    fn single_slide_loop_clones_the_same_slide() {
        let mut registry = SlideRegistry::with_slides(slides(1));
        registry.resync(true, &mut Recorder::default());
        let ids: Vec<u64> = registry
            .slides(true)
            .map(|entry| entry.key().id().get())
            .collect();
        assert_eq!(ids, vec![0, 0, 0]);
        assert_eq!(registry.physical_len(), 3);
    }

    #[test]
    fn empty_registry_never_clones() {
        let mut registry = SlideRegistry::new();
        registry.resync(true, &mut Recorder::default());
        assert_eq!(registry.physical_len(), 0);
        assert_eq!(registry.loop_offset(), 0);
        assert_eq!(registry.real_position(0), None);
    }

    #[test]
    fn clones_stay_inert() {
        let mut registry = SlideRegistry::with_slides(slides(2));
        registry.resync(true, &mut Recorder::default());
        let clone = registry.keys()[0];
        assert!(registry.set_inert(clone, false));
        assert!(registry.get(clone).is_some_and(SlideEntry::is_inert));
    }

    #[test]
    fn inert_marker_survives_resync() {
        let mut registry = SlideRegistry::with_slides(slides(3));
        assert!(registry.set_inert(real(1), true));
        registry.resync(true, &mut Recorder::default());
        assert!(registry.get(real(1)).is_some_and(SlideEntry::is_inert));
        assert!(!registry.get(real(0)).is_some_and(SlideEntry::is_inert));
    }

    #[test]
    fn set_inert_on_unknown_key_reports_false() {
        let mut registry = SlideRegistry::with_slides(slides(1));
        assert!(!registry.set_inert(real(9), true));
    }

    #[test]
    fn replace_slides_rebuilds_clones_from_new_edges() {
        let mut registry = SlideRegistry::with_slides(slides(3));
        let mut rec = Recorder::default();
        registry.resync(true, &mut rec);
        registry.replace_slides(vec![Slide::new(10), Slide::new(11)], &mut rec);
        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.keys()[0],
            SlideKey::clone_of(SlideId::new(11), CloneEdge::Leading)
        );
        assert!(!rec.observed.contains(&real(0)));
        assert_eq!(rec.observed.len(), 4);
    }

    #[test]
    fn duplicate_ids_keep_first() {
        let registry = SlideRegistry::with_slides(vec![
            Slide::new(1).with_label("first"),
            Slide::new(1).with_label("second"),
            Slide::new(2),
        ]);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.entry_at(0).and_then(SlideEntry::label), Some("first"));
    }
}
