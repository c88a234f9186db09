// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// How content that extends past the viewport should be presented.
///
/// Derived from [`crate::ZoomableConfig::clipped`]; hosts map it onto their own
/// clipping mechanism (a clip layer, a CSS `overflow` value, a scissor rect).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Overflow {
    /// Clip content to the viewport rectangle.
    #[default]
    Clip,
    /// Let content paint outside the viewport.
    Visible,
}

impl Overflow {
    /// Maps a `clipped` flag to an overflow mode.
    #[must_use]
    pub const fn from_clipped(clipped: bool) -> Self {
        if clipped { Self::Clip } else { Self::Visible }
    }
}

/// Size of a child along one axis.
///
/// Parsed from `"auto"`, `"scale"` (case-insensitive), or a number.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SizeMode {
    /// Explicit size in content units. Scaled by the zoom and assigned as the
    /// element's box size.
    Fixed(f64),
    /// Use the element's measured size; the element is neither resized nor
    /// visually scaled.
    #[default]
    Auto,
    /// Use the element's measured size and visually scale it by the zoom,
    /// leaving its box size untouched.
    Scale,
}

impl SizeMode {
    /// Resolves the size in content units, falling back to `measured` unless
    /// the mode is [`SizeMode::Fixed`].
    #[must_use]
    pub fn resolve(self, measured: f64) -> f64 {
        match self {
            Self::Fixed(v) => v,
            Self::Auto | Self::Scale => measured,
        }
    }
}

impl From<f64> for SizeMode {
    fn from(value: f64) -> Self {
        Self::Fixed(value)
    }
}
