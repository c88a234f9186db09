// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag / pinch disambiguation as a pure state machine.
//!
//! ## Usage
//!
//! 1) Keep a [`GestureState`] next to the transform it drives.
//! 2) For each pointer event, call [`GestureState::transition`] with the current
//!    view → content transform.
//! 3) Apply the returned [`GestureAction`] (if any) to the transform.
//!
//! ## States
//!
//! - [`GestureState::Idle`]: no pointer is down.
//! - [`GestureState::Dragging`]: exactly one pointer is down. Every move pans by
//!   the distance between the pointer's current content position and the
//!   content position it first touched. The anchor is never advanced; once the
//!   pan is applied, the pointer maps back onto the anchor, so each move yields
//!   a fresh delta relative to the same origin.
//! - [`GestureState::Pinching`]: two or more pointers went down. Moves zoom by the
//!   ratio of successive distances between the first two pointers, around
//!   their midpoint.
//!
//! Any up, leave, or cancel ends a drag, even one reported for another pointer.
//! During a pinch it forgets the released pointer and resets the baseline, so
//! the next move only re-samples the distance. When a pinch loses all but one
//! pointer it stays in `Pinching` with a single pointer: moves do nothing until
//! that pointer lifts or another goes down.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Affine, Vec2};
//! use understory_gesture::{GestureAction, GestureState, PointerEvent};
//!
//! let to_content = Affine::IDENTITY;
//! let state = GestureState::Idle;
//!
//! let (state, _) = state.transition(&PointerEvent::down(1, (50.0, 50.0)), to_content);
//! let (state, action) = state.transition(&PointerEvent::moved(1, (80.0, 50.0)), to_content);
//!
//! assert!(state.is_dragging());
//! assert_eq!(action, Some(GestureAction::Pan(Vec2::new(30.0, 0.0))));
//! ```

use kurbo::{Affine, Point, Vec2};

use crate::pointer::{PointerEvent, PointerId, PointerPhase, PointerSet};

/// Transform change requested by a gesture step.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GestureAction {
    /// Translate by this content-space delta.
    Pan(Vec2),
    /// Scale by `factor` keeping the content-space point `anchor` fixed on screen.
    Zoom {
        /// Content-space point that stays put.
        anchor: Point,
        /// Incremental scale factor (`> 1` zooms in).
        factor: f64,
    },
}

/// Gesture recognition state for one viewport.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GestureState {
    /// No pointer is down.
    #[default]
    Idle,
    /// A single pointer is panning the content.
    Dragging {
        /// The pointer doing the dragging.
        pointer: PointerId,
        /// Last viewport position of that pointer.
        position: Point,
        /// Content-space point under the pointer when it went down.
        anchor: Point,
    },
    /// Several pointers went down; the first two drive the zoom.
    Pinching {
        /// Active pointers in the order they went down.
        pointers: PointerSet,
        /// Distance between the first two pointers at the previous move, or
        /// `0` if no distance has been sampled yet.
        baseline: f64,
    },
}

impl GestureState {
    /// Returns `true` when no pointer is down.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Returns `true` while a single pointer drag is active.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    /// Returns `true` while in the multi-pointer state.
    #[must_use]
    pub fn is_pinching(&self) -> bool {
        matches!(self, Self::Pinching { .. })
    }

    /// Number of pointers currently down.
    #[must_use]
    pub fn active_pointers(&self) -> usize {
        match self {
            Self::Idle => 0,
            Self::Dragging { .. } => 1,
            Self::Pinching { pointers, .. } => pointers.len(),
        }
    }

    /// Content-space drag anchor, if dragging.
    #[must_use]
    pub fn anchor(&self) -> Option<Point> {
        match self {
            Self::Dragging { anchor, .. } => Some(*anchor),
            _ => None,
        }
    }

    /// Current pinch baseline distance (`0` outside of a sampled pinch).
    #[must_use]
    pub fn baseline(&self) -> f64 {
        match self {
            Self::Pinching { baseline, .. } => *baseline,
            _ => 0.0,
        }
    }

    /// Advances the state machine by one event.
    ///
    /// `view_to_content` maps viewport positions into content space and must
    /// reflect the transform as it is right now; drag anchors and zoom anchors
    /// are expressed in content space.
    #[must_use]
    pub fn transition(
        self,
        event: &PointerEvent,
        view_to_content: Affine,
    ) -> (Self, Option<GestureAction>) {
        let id = event.pointer;
        let pos = event.position;
        match event.phase {
            PointerPhase::Down => (self.pointer_down(id, pos, view_to_content), None),
            PointerPhase::Move => self.pointer_move(id, pos, view_to_content),
            PointerPhase::Up | PointerPhase::Leave | PointerPhase::Cancel => {
                (self.pointer_release(id), None)
            }
        }
    }

    fn pointer_down(self, id: PointerId, pos: Point, view_to_content: Affine) -> Self {
        let drag = |pointer, position| Self::Dragging {
            pointer,
            position,
            anchor: view_to_content * position,
        };
        match self {
            Self::Idle => drag(id, pos),
            Self::Dragging { pointer, .. } if pointer == id => drag(id, pos),
            Self::Dragging {
                pointer, position, ..
            } => {
                log::trace!("pointer {id:?} down while dragging, switching to pinch");
                let pointers = [(pointer, position), (id, pos)].into_iter().collect();
                Self::Pinching {
                    pointers,
                    baseline: 0.0,
                }
            }
            Self::Pinching { mut pointers, .. } => {
                pointers.insert(id, pos);
                if pointers.len() == 1 {
                    drag(id, pos)
                } else {
                    Self::Pinching {
                        pointers,
                        baseline: 0.0,
                    }
                }
            }
        }
    }

    fn pointer_move(
        self,
        id: PointerId,
        pos: Point,
        view_to_content: Affine,
    ) -> (Self, Option<GestureAction>) {
        match self {
            Self::Dragging {
                pointer, anchor, ..
            } if pointer == id => {
                let delta = view_to_content * pos - anchor;
                let next = Self::Dragging {
                    pointer,
                    position: pos,
                    anchor,
                };
                (next, Some(GestureAction::Pan(delta)))
            }
            Self::Pinching {
                mut pointers,
                baseline,
            } => {
                pointers.update(id, pos);
                let Some((p0, p1)) = pointers.first_two() else {
                    return (Self::Pinching { pointers, baseline }, None);
                };
                let distance = p0.distance(p1);
                let action = (baseline != 0.0).then(|| GestureAction::Zoom {
                    anchor: view_to_content * p0.midpoint(p1),
                    factor: distance / baseline,
                });
                let next = Self::Pinching {
                    pointers,
                    baseline: distance,
                };
                (next, action)
            }
            other => (other, None),
        }
    }

    fn pointer_release(self, id: PointerId) -> Self {
        match self {
            // Any release drops the drag anchor; a fresh down re-anchors.
            Self::Dragging { .. } => Self::Idle,
            Self::Pinching { mut pointers, .. } => {
                pointers.remove(id);
                if pointers.is_empty() {
                    Self::Idle
                } else {
                    log::trace!("pinch dropped to {} pointer(s)", pointers.len());
                    Self::Pinching {
                        pointers,
                        baseline: 0.0,
                    }
                }
            }
            Self::Idle => Self::Idle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn step(state: GestureState, event: PointerEvent) -> (GestureState, Option<GestureAction>) {
        state.transition(&event, Affine::IDENTITY)
    }

    #[test]
    fn first_down_starts_drag_with_content_anchor() {
        let to_content = Affine::scale(0.5);
        let (state, action) =
            GestureState::Idle.transition(&PointerEvent::down(1, (40.0, 20.0)), to_content);

        assert_eq!(action, None);
        assert_eq!(state.anchor(), Some(Point::new(20.0, 10.0)));
        assert_eq!(state.active_pointers(), 1);
    }

    #[test]
    fn drag_delta_is_relative_to_anchor() {
        let (state, _) = step(GestureState::Idle, PointerEvent::down(1, (50.0, 50.0)));
        let (state, a1) = step(state, PointerEvent::moved(1, (80.0, 50.0)));
        let (state, a2) = step(state, PointerEvent::moved(1, (90.0, 60.0)));

        assert_eq!(a1, Some(GestureAction::Pan(Vec2::new(30.0, 0.0))));
        // Identity transform was never updated, so the delta keeps growing.
        assert_eq!(a2, Some(GestureAction::Pan(Vec2::new(40.0, 10.0))));
        assert_eq!(state.anchor(), Some(Point::new(50.0, 50.0)));
    }

    #[test]
    fn moves_from_other_pointers_do_not_drag() {
        let (state, _) = step(GestureState::Idle, PointerEvent::down(1, (0.0, 0.0)));
        let (state, action) = step(state, PointerEvent::moved(2, (10.0, 0.0)));
        assert_eq!(action, None);
        assert!(state.is_dragging());
    }

    #[test]
    fn hover_while_idle_does_nothing() {
        let (state, action) = step(GestureState::Idle, PointerEvent::moved(1, (10.0, 0.0)));
        assert!(state.is_idle());
        assert_eq!(action, None);
    }

    #[test]
    fn second_down_switches_to_pinch() {
        let (state, _) = step(GestureState::Idle, PointerEvent::down(1, (100.0, 100.0)));
        let (state, _) = step(state, PointerEvent::down(2, (200.0, 100.0)));

        assert!(state.is_pinching());
        assert_eq!(state.anchor(), None);
        assert_eq!(state.baseline(), 0.0);
        assert_eq!(state.active_pointers(), 2);
    }

    #[test]
    fn first_pinch_sample_only_sets_baseline() {
        let (state, _) = step(GestureState::Idle, PointerEvent::down(1, (100.0, 100.0)));
        let (state, _) = step(state, PointerEvent::down(2, (200.0, 100.0)));
        let (state, action) = step(state, PointerEvent::moved(2, (200.0, 100.0)));

        assert_eq!(action, None);
        assert!((state.baseline() - 100.0).abs() < EPS);
    }

    #[test]
    fn pinch_zooms_by_distance_ratio_around_midpoint() {
        let (state, _) = step(GestureState::Idle, PointerEvent::down(1, (100.0, 100.0)));
        let (state, _) = step(state, PointerEvent::down(2, (200.0, 100.0)));
        let (state, _) = step(state, PointerEvent::moved(2, (200.0, 100.0)));
        let to_content = Affine::translate((10.0, 0.0));
        let (state, action) =
            state.transition(&PointerEvent::moved(2, (250.0, 100.0)), to_content);

        let Some(GestureAction::Zoom { anchor, factor }) = action else {
            panic!("expected a zoom, got {action:?}");
        };
        assert!((factor - 1.5).abs() < EPS);
        assert!((anchor.x - 185.0).abs() < EPS);
        assert!((anchor.y - 100.0).abs() < EPS);
        assert!((state.baseline() - 150.0).abs() < EPS);
    }

    #[test]
    fn third_pointer_does_not_change_pinch_pair() {
        let (state, _) = step(GestureState::Idle, PointerEvent::down(1, (0.0, 0.0)));
        let (state, _) = step(state, PointerEvent::down(2, (100.0, 0.0)));
        let (state, _) = step(state, PointerEvent::down(3, (500.0, 500.0)));
        let (state, _) = step(state, PointerEvent::moved(3, (900.0, 900.0)));

        assert_eq!(state.active_pointers(), 3);
        assert!((state.baseline() - 100.0).abs() < EPS);
    }

    #[test]
    fn dropping_to_one_pointer_neither_pans_nor_zooms() {
        let (state, _) = step(GestureState::Idle, PointerEvent::down(1, (100.0, 100.0)));
        let (state, _) = step(state, PointerEvent::down(2, (200.0, 100.0)));
        let (state, _) = step(state, PointerEvent::moved(2, (210.0, 100.0)));
        let (state, _) = step(state, PointerEvent::up(2, (210.0, 100.0)));

        assert!(state.is_pinching());
        assert_eq!(state.baseline(), 0.0);

        let (state, action) = step(state, PointerEvent::moved(1, (150.0, 150.0)));
        assert_eq!(action, None);
        assert_eq!(state.active_pointers(), 1);

        let (state, _) = step(state, PointerEvent::up(1, (150.0, 150.0)));
        assert!(state.is_idle());
    }

    #[test]
    fn new_down_after_drop_restarts_pinch() {
        let (state, _) = step(GestureState::Idle, PointerEvent::down(1, (0.0, 0.0)));
        let (state, _) = step(state, PointerEvent::down(2, (100.0, 0.0)));
        let (state, _) = step(state, PointerEvent::up(1, (0.0, 0.0)));
        let (state, _) = step(state, PointerEvent::down(3, (0.0, 50.0)));

        assert!(state.is_pinching());
        assert_eq!(state.active_pointers(), 2);
        assert_eq!(state.baseline(), 0.0);
    }

    #[test]
    fn release_of_any_pointer_ends_a_drag() {
        let (state, _) = step(GestureState::Idle, PointerEvent::down(1, (50.0, 50.0)));
        let (state, _) = step(state, PointerEvent::leave(2, (0.0, 0.0)));
        assert!(state.is_idle());

        let (state, action) = step(state, PointerEvent::moved(1, (80.0, 50.0)));
        assert_eq!(action, None);
        assert!(state.is_idle());
    }

    #[test]
    fn release_of_untracked_pointer_resets_pinch_baseline() {
        let (state, _) = step(GestureState::Idle, PointerEvent::down(1, (0.0, 0.0)));
        let (state, _) = step(state, PointerEvent::down(2, (100.0, 0.0)));
        let (state, _) = step(state, PointerEvent::moved(2, (100.0, 0.0)));
        assert!((state.baseline() - 100.0).abs() < EPS);

        let (state, _) = step(state, PointerEvent::cancel(9, (0.0, 0.0)));
        assert!(state.is_pinching());
        assert_eq!(state.active_pointers(), 2);
        assert_eq!(state.baseline(), 0.0);

        // The next move only re-samples the distance.
        let (_, action) = step(state, PointerEvent::moved(2, (150.0, 0.0)));
        assert_eq!(action, None);
    }

    #[test]
    fn every_release_phase_ends_a_drag() {
        for phase in [PointerPhase::Leave, PointerPhase::Cancel, PointerPhase::Up] {
            for released in [4, 5] {
                let (state, _) = step(GestureState::Idle, PointerEvent::down(4, (1.0, 1.0)));
                let (state, _) = step(
                    state,
                    PointerEvent::new(PointerId(released), phase, (1.0, 1.0)),
                );
                assert!(state.is_idle(), "{phase:?} of {released} should end the drag");
            }
        }
    }

    #[test]
    fn zero_distance_pinch_does_not_divide_by_zero_next_time() {
        let (state, _) = step(GestureState::Idle, PointerEvent::down(1, (10.0, 10.0)));
        let (state, _) = step(state, PointerEvent::down(2, (10.0, 10.0)));
        let (state, a1) = step(state, PointerEvent::moved(2, (10.0, 10.0)));
        let (_, a2) = step(state, PointerEvent::moved(2, (20.0, 10.0)));

        assert_eq!(a1, None);
        assert_eq!(a2, None);
    }
}
