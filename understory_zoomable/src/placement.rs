// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Child placement: from a content-space spec and the current transform to an
//! on-screen position, size, and visual scale.
//!
//! Computing a [`Placement`] is a pure function ([`place`]). Applying it to a
//! real widget, DOM node, or scene item is up to the host's [`Element`]
//! implementation.

use kurbo::{Affine, Point, Rect, Size, Vec2};

use crate::modes::SizeMode;

/// Where and how a child is authored in content space.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChildSpec {
    /// Left edge in content units.
    pub x: f64,
    /// Top edge in content units.
    pub y: f64,
    /// Horizontal sizing.
    pub width: SizeMode,
    /// Vertical sizing.
    pub height: SizeMode,
    /// Whether the element receives pointer events itself.
    ///
    /// When `false`, drags and pinches that start over the element go to the
    /// viewport instead.
    pub pointer_passthrough: bool,
}

impl ChildSpec {
    /// A spec at `(x, y)` with [`SizeMode::Auto`] sizing.
    #[must_use]
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            ..Self::default()
        }
    }

    /// Sets both size modes.
    #[must_use]
    pub fn with_size(mut self, width: impl Into<SizeMode>, height: impl Into<SizeMode>) -> Self {
        self.width = width.into();
        self.height = height.into();
        self
    }

    /// Sets [`ChildSpec::pointer_passthrough`].
    #[must_use]
    pub fn with_pointer_passthrough(mut self, passthrough: bool) -> Self {
        self.pointer_passthrough = passthrough;
        self
    }

    /// Content-space bounding box, using `measured` for any axis that is not
    /// [`SizeMode::Fixed`].
    #[must_use]
    pub fn report_bounds(&self, measured: Size) -> Rect {
        let size = Size::new(
            self.width.resolve(measured.width),
            self.height.resolve(measured.height),
        );
        Rect::from_origin_size(Point::new(self.x, self.y), size)
    }
}

/// Screen-space layout for one child.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// Top-left corner in viewport coordinates.
    pub position: Point,
    /// Explicit box width in pixels, or `None` to leave the box width alone.
    pub width: Option<f64>,
    /// Explicit box height in pixels, or `None` to leave the box height alone.
    pub height: Option<f64>,
    /// Visual scale applied about the top-left corner without affecting layout.
    pub scale: Vec2,
    /// Whether the element should receive pointer events.
    pub pointer_events: bool,
}

/// Computes where `spec` lands under `transform`.
///
/// - The position is `transform * (x, y)`.
/// - A positive [`SizeMode::Fixed`] size becomes an explicit pixel size scaled
///   by the transform along that axis (`a` for width, `d` for height).
///   Non-positive fixed sizes leave the box size unset.
/// - [`SizeMode::Scale`] leaves the box size unset and scales the element
///   visually by the same axis factor.
/// - [`SizeMode::Auto`] leaves both the box size and the visual scale alone.
#[must_use]
pub fn place(spec: &ChildSpec, transform: Affine) -> Placement {
    let [a, _, _, d, _, _] = transform.as_coeffs();
    let axis = |mode: SizeMode, factor: f64| match mode {
        SizeMode::Fixed(v) if v > 0.0 => (Some(v * factor), 1.0),
        SizeMode::Fixed(_) | SizeMode::Auto => (None, 1.0),
        SizeMode::Scale => (None, factor),
    };
    let (width, sx) = axis(spec.width, a);
    let (height, sy) = axis(spec.height, d);
    Placement {
        position: transform * Point::new(spec.x, spec.y),
        width,
        height,
        scale: Vec2::new(sx, sy),
        pointer_events: spec.pointer_passthrough,
    }
}

/// Host-side element managed by a [`crate::Zoomable`].
///
/// This is the seam to the rendering layer: the controller only ever measures
/// elements and hands them placements.
pub trait Element {
    /// Intrinsic size of the element in content units.
    ///
    /// Only consulted for axes whose [`SizeMode`] is not `Fixed`.
    fn measure(&self) -> Size;

    /// Applies a computed placement.
    fn apply(&mut self, placement: &Placement);
}

/// A managed child: its spec paired with the host element.
#[derive(Clone, Debug)]
pub struct Child<E> {
    /// Content-space configuration.
    pub spec: ChildSpec,
    /// The host element.
    pub element: E,
}

impl<E: Element> Child<E> {
    /// Pairs `spec` with `element`.
    pub fn new(spec: ChildSpec, element: E) -> Self {
        Self { spec, element }
    }

    /// Content-space bounding box, measuring the element if needed.
    #[must_use]
    pub fn report_bounds(&self) -> Rect {
        let needs_measure = !matches!(
            (self.spec.width, self.spec.height),
            (SizeMode::Fixed(_), SizeMode::Fixed(_))
        );
        let measured = if needs_measure {
            self.element.measure()
        } else {
            Size::ZERO
        };
        self.spec.report_bounds(measured)
    }

    /// Places the element under `transform`, returning what was applied.
    pub fn apply_transform(&mut self, transform: Affine) -> Placement {
        let placement = place(&self.spec, transform);
        self.element.apply(&placement);
        placement
    }
}
