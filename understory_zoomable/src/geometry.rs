// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Affine helpers that compose operations in the order they are issued.
//!
//! Every helper here post-multiplies: `m.translated(v)` is `m * T(v)`, so the
//! new operation acts in the content space of `m`. Chaining
//! `translated(p)`, `scaled(k)`, `translated(-p)` therefore scales about the
//! content point `p`, which is exactly what [`AffineExt::zoomed_about`] does.

use kurbo::{Affine, Point, Rect, Vec2};

/// Post-multiplying operations on [`Affine`].
pub trait AffineExt: Sized {
    /// Returns `self * translate(delta)`.
    #[must_use]
    fn translated(self, delta: Vec2) -> Self;

    /// Returns `self * scale(sx, sy)`.
    #[must_use]
    fn scaled(self, sx: f64, sy: f64) -> Self;

    /// Scales by `factor` about the content-space point `anchor`.
    ///
    /// The screen position of `anchor` is the same before and after.
    #[must_use]
    fn zoomed_about(self, anchor: Point, factor: f64) -> Self;

    /// Uniform scale factor: the Euclidean norm of the first column `(a, b)`.
    ///
    /// This stays meaningful if a little skew has crept into the matrix.
    fn uniform_scale(self) -> f64;
}

impl AffineExt for Affine {
    fn translated(self, delta: Vec2) -> Self {
        self * Self::translate(delta)
    }

    fn scaled(self, sx: f64, sy: f64) -> Self {
        self * Self::scale_non_uniform(sx, sy)
    }

    fn zoomed_about(self, anchor: Point, factor: f64) -> Self {
        let v = anchor.to_vec2();
        self.translated(v).scaled(factor, factor).translated(-v)
    }

    fn uniform_scale(self) -> f64 {
        let [a, b, ..] = self.as_coeffs();
        Vec2::new(a, b).hypot()
    }
}

/// Smallest rectangle covering every rectangle in `rects`.
///
/// Returns [`Rect::ZERO`] when `rects` is empty.
pub fn union_bounds(rects: impl IntoIterator<Item = Rect>) -> Rect {
    let mut it = rects.into_iter();
    let Some(first) = it.next() else {
        return Rect::ZERO;
    };
    it.fold(first, |acc, r| acc.union(r))
}
