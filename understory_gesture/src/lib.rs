// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Gesture: pointer tracking and pan/zoom gesture disambiguation.
//!
//! This crate turns a raw stream of pointer and wheel events into pan and zoom
//! requests for a 2D surface. It is the input half of a pan-and-zoom viewport;
//! the transform itself lives elsewhere (for example in `understory_zoomable`).
//!
//! - [`pointer`]: pointer identifiers, lifecycle events, and the insertion-ordered
//!   [`PointerSet`] of active contacts.
//! - [`gesture`]: the [`GestureState`] machine (`Idle`, `Dragging`, `Pinching`)
//!   with a pure [`GestureState::transition`] function.
//! - [`wheel`]: per-tick zoom factors for wheel input.
//!
//! ## Design
//!
//! Transitions take the current state and one event and return the next state
//! plus an optional [`GestureAction`]. There is no hidden mutable state, so the
//! machine can be unit tested (and serialized, with the `serde` feature)
//! without any rendering surface.
//!
//! Positions in events are viewport (pixel) coordinates. Anchors in actions
//! are content coordinates, obtained from the view → content transform the
//! caller passes to each transition.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::Affine;
//! use understory_gesture::{GestureAction, GestureState, PointerEvent};
//!
//! let to_content = Affine::IDENTITY;
//! let mut state = GestureState::default();
//! let mut zooms = 0;
//!
//! for event in [
//!     PointerEvent::down(1, (100.0, 100.0)),
//!     PointerEvent::down(2, (200.0, 100.0)),
//!     PointerEvent::moved(2, (200.0, 100.0)),
//!     PointerEvent::moved(2, (250.0, 100.0)),
//! ] {
//!     let (next, action) = state.transition(&event, to_content);
//!     state = next;
//!     if let Some(GestureAction::Zoom { factor, .. }) = action {
//!         assert!((factor - 1.5).abs() < 1e-9);
//!         zooms += 1;
//!     }
//! }
//! assert_eq!(zooms, 1);
//! ```
//!
//! This crate is `no_std` compatible (with `alloc`).

#![no_std]

extern crate alloc;

pub mod gesture;
pub mod pointer;
pub mod wheel;

pub use gesture::{GestureAction, GestureState};
pub use pointer::{PointerEvent, PointerId, PointerPhase, PointerSet};
pub use wheel::WheelZoom;
