// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer identifiers, lifecycle events, and the active pointer set.

use kurbo::Point;
use smallvec::SmallVec;

/// Opaque identifier for a pointer (mouse, pen, or touch contact).
///
/// Hosts pass through whatever identifier their event source provides; the
/// only requirement is that it is stable between the down and up events of a
/// single contact.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointerId(pub u64);

/// Lifecycle phase carried by a [`PointerEvent`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointerPhase {
    /// The pointer made contact (button press or touch start).
    Down,
    /// The pointer moved.
    Move,
    /// The pointer was released.
    Up,
    /// The pointer left the surface.
    Leave,
    /// The platform cancelled the pointer stream.
    Cancel,
}

impl PointerPhase {
    /// Returns `true` for the phases that end a contact: up, leave and cancel.
    #[must_use]
    pub const fn is_release(self) -> bool {
        matches!(self, Self::Up | Self::Leave | Self::Cancel)
    }
}

/// A single pointer event in viewport (pixel) coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointerEvent {
    /// Which pointer this event belongs to.
    pub pointer: PointerId,
    /// What happened to the pointer.
    pub phase: PointerPhase,
    /// Position relative to the viewport's top-left corner.
    pub position: Point,
}

impl PointerEvent {
    /// Creates an event for `pointer` in `phase` at `position`.
    #[must_use]
    pub fn new(pointer: PointerId, phase: PointerPhase, position: impl Into<Point>) -> Self {
        Self {
            pointer,
            phase,
            position: position.into(),
        }
    }

    /// Shorthand for a [`PointerPhase::Down`] event.
    #[must_use]
    pub fn down(pointer: u64, position: impl Into<Point>) -> Self {
        Self::new(PointerId(pointer), PointerPhase::Down, position)
    }

    /// Shorthand for a [`PointerPhase::Move`] event.
    #[must_use]
    pub fn moved(pointer: u64, position: impl Into<Point>) -> Self {
        Self::new(PointerId(pointer), PointerPhase::Move, position)
    }

    /// Shorthand for a [`PointerPhase::Up`] event.
    #[must_use]
    pub fn up(pointer: u64, position: impl Into<Point>) -> Self {
        Self::new(PointerId(pointer), PointerPhase::Up, position)
    }

    /// Shorthand for a [`PointerPhase::Leave`] event.
    #[must_use]
    pub fn leave(pointer: u64, position: impl Into<Point>) -> Self {
        Self::new(PointerId(pointer), PointerPhase::Leave, position)
    }

    /// Shorthand for a [`PointerPhase::Cancel`] event.
    #[must_use]
    pub fn cancel(pointer: u64, position: impl Into<Point>) -> Self {
        Self::new(PointerId(pointer), PointerPhase::Cancel, position)
    }
}

/// Insertion-ordered map from active pointers to their last known position.
///
/// Re-reporting a tracked pointer updates its position in place, so the order
/// always reflects when each contact first went down. Pinch gestures read the
/// first two entries.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointerSet {
    entries: SmallVec<[(PointerId, Point); 4]>,
}

impl PointerSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tracked pointers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no pointer is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if `pointer` is tracked.
    #[must_use]
    pub fn contains(&self, pointer: PointerId) -> bool {
        self.position(pointer).is_some()
    }

    /// Last known position of `pointer`, if tracked.
    #[must_use]
    pub fn position(&self, pointer: PointerId) -> Option<Point> {
        self.entries
            .iter()
            .find(|(id, _)| *id == pointer)
            .map(|(_, pos)| *pos)
    }

    /// Tracks `pointer` at `position`.
    ///
    /// Returns `true` if the pointer was not tracked before. A pointer that is
    /// already tracked keeps its place in the order.
    pub fn insert(&mut self, pointer: PointerId, position: Point) -> bool {
        if self.update(pointer, position) {
            return false;
        }
        self.entries.push((pointer, position));
        true
    }

    /// Updates the position of a tracked pointer.
    ///
    /// Returns `false` (and does nothing) if `pointer` is not tracked.
    pub fn update(&mut self, pointer: PointerId, position: Point) -> bool {
        match self.entries.iter_mut().find(|(id, _)| *id == pointer) {
            Some(entry) => {
                entry.1 = position;
                true
            }
            None => false,
        }
    }

    /// Stops tracking `pointer`, returning its last position.
    pub fn remove(&mut self, pointer: PointerId) -> Option<Point> {
        let idx = self.entries.iter().position(|(id, _)| *id == pointer)?;
        Some(self.entries.remove(idx).1)
    }

    /// Positions of the two earliest tracked pointers.
    #[must_use]
    pub fn first_two(&self) -> Option<(Point, Point)> {
        match self.entries.as_slice() {
            [(_, a), (_, b), ..] => Some((*a, *b)),
            _ => None,
        }
    }

    /// Iterates tracked pointers in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (PointerId, Point)> + '_ {
        self.entries.iter().copied()
    }

    /// Removes every pointer.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl FromIterator<(PointerId, Point)> for PointerSet {
    fn from_iter<I: IntoIterator<Item = (PointerId, Point)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (id, pos) in iter {
            set.insert(id, pos);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;

    #[test]
    fn shorthands_set_phase_and_pointer() {
        let leave = PointerEvent::leave(3, (1.0, 2.0));
        assert_eq!(leave.phase, PointerPhase::Leave);
        assert_eq!(leave.pointer, PointerId(3));
        assert_eq!(leave.position, Point::new(1.0, 2.0));

        let cancel = PointerEvent::cancel(4, (0.0, 0.0));
        assert_eq!(cancel.phase, PointerPhase::Cancel);
        assert!(cancel.phase.is_release());
    }

    #[test]
    fn insert_keeps_first_seen_order() {
        let mut set = PointerSet::new();
        assert!(set.insert(PointerId(7), Point::new(1.0, 1.0)));
        assert!(set.insert(PointerId(3), Point::new(2.0, 2.0)));
        assert!(!set.insert(PointerId(7), Point::new(5.0, 5.0)));

        let ids: Vec<_> = set.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![PointerId(7), PointerId(3)]);
        assert_eq!(set.position(PointerId(7)), Some(Point::new(5.0, 5.0)));
    }

    #[test]
    fn update_ignores_untracked_pointers() {
        let mut set = PointerSet::new();
        assert!(!set.update(PointerId(1), Point::new(1.0, 1.0)));
        assert!(set.is_empty());
    }

    #[test]
    fn remove_drops_stale_entries() {
        let mut set: PointerSet = [
            (PointerId(1), Point::new(0.0, 0.0)),
            (PointerId(2), Point::new(10.0, 0.0)),
            (PointerId(3), Point::new(20.0, 0.0)),
        ]
        .into_iter()
        .collect();

        assert_eq!(set.remove(PointerId(1)), Some(Point::new(0.0, 0.0)));
        assert_eq!(set.remove(PointerId(1)), None);
        assert!(!set.contains(PointerId(1)));
        assert_eq!(
            set.first_two(),
            Some((Point::new(10.0, 0.0), Point::new(20.0, 0.0)))
        );
    }

    #[test]
    fn first_two_needs_two_pointers() {
        let mut set = PointerSet::new();
        assert_eq!(set.first_two(), None);
        set.insert(PointerId(1), Point::new(0.0, 0.0));
        assert_eq!(set.first_two(), None);
        set.clear();
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn release_phases() {
        assert!(PointerPhase::Up.is_release());
        assert!(PointerPhase::Leave.is_release());
        assert!(PointerPhase::Cancel.is_release());
        assert!(!PointerPhase::Down.is_release());
        assert!(!PointerPhase::Move.is_release());
    }
}
