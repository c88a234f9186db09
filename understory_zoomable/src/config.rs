// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration for [`crate::Zoomable`] and the errors raised while parsing
//! or validating it.

use core::fmt;
use core::str::FromStr;

use understory_gesture::WheelZoom;

use crate::modes::{Overflow, SizeMode};

/// Tunable behavior of a [`crate::Zoomable`].
///
/// ```
/// use understory_zoomable::ZoomableConfig;
///
/// let config = ZoomableConfig::default()
///     .with_padding(24.0)
///     .with_zoom_limits(0.5, 8.0);
/// assert!(config.validate().is_ok());
///
/// let bad = ZoomableConfig::default().with_zoom_limits(4.0, 2.0);
/// assert!(bad.validate().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoomableConfig {
    /// Minimum on-screen margin, in viewport pixels, kept between content and
    /// each viewport edge.
    pub padding: f64,
    /// Whether content is clipped to the viewport. See [`Overflow`].
    pub clipped: bool,
    /// Smallest allowed uniform scale (inclusive).
    pub zoom_min: f64,
    /// Largest allowed uniform scale (inclusive).
    pub zoom_max: f64,
    /// Factor used by [`crate::Zoomable::zoom_in`].
    pub zoom_in_step: f64,
    /// Factor used by [`crate::Zoomable::zoom_out`].
    pub zoom_out_step: f64,
    /// Per-tick wheel zoom factors.
    pub wheel: WheelZoom,
}

impl Default for ZoomableConfig {
    fn default() -> Self {
        Self {
            padding: 10.0,
            clipped: true,
            zoom_min: 0.2,
            zoom_max: 20.0,
            zoom_in_step: 1.2,
            zoom_out_step: 0.8,
            wheel: WheelZoom::default(),
        }
    }
}

impl ZoomableConfig {
    /// Sets [`ZoomableConfig::padding`].
    #[must_use]
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    /// Sets [`ZoomableConfig::clipped`].
    #[must_use]
    pub fn with_clipped(mut self, clipped: bool) -> Self {
        self.clipped = clipped;
        self
    }

    /// Sets both zoom limits.
    #[must_use]
    pub fn with_zoom_limits(mut self, zoom_min: f64, zoom_max: f64) -> Self {
        self.zoom_min = zoom_min;
        self.zoom_max = zoom_max;
        self
    }

    /// Sets the wheel zoom factors.
    #[must_use]
    pub fn with_wheel(mut self, wheel: WheelZoom) -> Self {
        self.wheel = wheel;
        self
    }

    /// Overflow mode implied by [`ZoomableConfig::clipped`].
    #[must_use]
    pub fn overflow(&self) -> Overflow {
        Overflow::from_clipped(self.clipped)
    }

    /// Checks that every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.padding.is_finite() || self.padding < 0.0 {
            return Err(ConfigError::InvalidPadding(self.padding));
        }
        for (name, step) in [
            ("zoom_in_step", self.zoom_in_step),
            ("zoom_out_step", self.zoom_out_step),
            ("wheel.zoom_in", self.wheel.zoom_in),
            ("wheel.zoom_out", self.wheel.zoom_out),
        ] {
            if !step.is_finite() || step <= 0.0 {
                return Err(ConfigError::InvalidStep { name, value: step });
            }
        }
        validate_zoom_limits(self.zoom_min, self.zoom_max)
    }
}

pub(crate) fn validate_zoom_limits(zoom_min: f64, zoom_max: f64) -> Result<(), ConfigError> {
    for limit in [zoom_min, zoom_max] {
        if !limit.is_finite() || limit <= 0.0 {
            return Err(ConfigError::InvalidZoomLimit(limit));
        }
    }
    if zoom_min > zoom_max {
        return Err(ConfigError::InvertedZoomLimits { zoom_min, zoom_max });
    }
    Ok(())
}

/// A configuration value was rejected.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigError {
    /// Padding must be finite and non-negative.
    InvalidPadding(f64),
    /// Zoom limits must be finite and positive.
    InvalidZoomLimit(f64),
    /// `zoom_min` is greater than `zoom_max`.
    InvertedZoomLimits {
        /// Requested minimum.
        zoom_min: f64,
        /// Requested maximum.
        zoom_max: f64,
    },
    /// A zoom step factor must be finite and positive.
    InvalidStep {
        /// Which field was rejected.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPadding(p) => write!(f, "padding must be finite and >= 0, got {p}"),
            Self::InvalidZoomLimit(z) => write!(f, "zoom limit must be finite and > 0, got {z}"),
            Self::InvertedZoomLimits { zoom_min, zoom_max } => {
                write!(f, "zoom_min ({zoom_min}) is greater than zoom_max ({zoom_max})")
            }
            Self::InvalidStep { name, value } => {
                write!(f, "{name} must be finite and > 0, got {value}")
            }
        }
    }
}

impl core::error::Error for ConfigError {}

/// A string could not be parsed as a [`SizeMode`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseSizeModeError;

impl fmt::Display for ParseSizeModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("expected \"auto\", \"scale\", or a number")
    }
}

impl core::error::Error for ParseSizeModeError {}

impl FromStr for SizeMode {
    type Err = ParseSizeModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("auto") {
            Ok(Self::Auto)
        } else if s.eq_ignore_ascii_case("scale") {
            Ok(Self::Scale)
        } else {
            match s.parse::<f64>() {
                Ok(v) if v.is_finite() => Ok(Self::Fixed(v)),
                _ => Err(ParseSizeModeError),
            }
        }
    }
}
