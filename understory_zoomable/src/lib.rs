// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Zoomable: a headless pan-and-zoom container.
//!
//! This crate manages a content → viewport transform for a container holding
//! freely positioned children. It focuses on:
//! - Drag to pan, pinch and wheel to zoom (via `understory_gesture`).
//! - Zoom limits and padding-aware clamping so content cannot be lost.
//! - Fitting all content into the viewport.
//! - Propagating the transform to each child as a [`Placement`].
//!
//! It does **not** render anything. Callers are expected to:
//! - Implement [`Element`] for whatever they draw (widgets, DOM nodes, scene
//!   items), measuring intrinsic sizes and applying placements.
//! - Forward pointer and wheel events in viewport coordinates.
//! - Call [`Zoomable::resize`] when the container's size changes.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use understory_zoomable::{ChildSpec, Element, Placement, Zoomable};
//!
//! #[derive(Default)]
//! struct Card {
//!     placed: Option<Placement>,
//! }
//!
//! impl Element for Card {
//!     fn measure(&self) -> Size {
//!         Size::new(200.0, 100.0)
//!     }
//!
//!     fn apply(&mut self, placement: &Placement) {
//!         self.placed = Some(*placement);
//!     }
//! }
//!
//! let mut view = Zoomable::new();
//! view.resize(Size::new(800.0, 600.0));
//! view.push_child(ChildSpec::at(0.0, 0.0).with_size(1000.0, 500.0), Card::default());
//!
//! view.fit();
//! assert!((view.scale() - 0.78).abs() < 1e-9);
//!
//! // Convert a viewport point back to content space for hit testing.
//! let content_pt = view.convert(Point::new(400.0, 300.0));
//! assert!((content_pt.x - 500.0).abs() < 1e-9);
//! ```
//!
//! ## Design notes
//!
//! - The transform is a general [`kurbo::Affine`], but the container only
//!   ever produces uniform scale plus translation.
//! - Operations compose in issue order (`M * op`), see [`AffineExt`].
//! - Content and viewport bounds are cached in a [`BoundsCache`] keyed on a
//!   generation counter; resizes and child changes bump the generation.
//! - Within one input event the order is always invalidate → clamp (which
//!   re-measures if needed) → layout.
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

mod bounds;
mod config;
mod controller;
mod geometry;
mod modes;
mod placement;

pub use bounds::BoundsCache;
pub use config::{ConfigError, ParseSizeModeError, ZoomableConfig};
pub use controller::Zoomable;
pub use geometry::{AffineExt, union_bounds};
pub use modes::{Overflow, SizeMode};
pub use placement::{Child, ChildSpec, Element, Placement, place};
