// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Discrete wheel zoom steps.
//!
//! Wheel input bypasses the pointer state machine entirely: each tick is one
//! multiplicative zoom step anchored under the cursor.
//!
//! ```
//! use understory_gesture::WheelZoom;
//!
//! let wheel = WheelZoom::default();
//! assert_eq!(wheel.factor(120.0), 0.9);
//! assert_eq!(wheel.factor(-120.0), 1.1);
//! ```

/// Zoom factors applied per wheel tick.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WheelZoom {
    /// Factor for ticks with a non-positive delta (scrolling up). Greater than `1`.
    pub zoom_in: f64,
    /// Factor for ticks with a positive delta (scrolling down). Less than `1`.
    pub zoom_out: f64,
}

impl Default for WheelZoom {
    fn default() -> Self {
        Self {
            zoom_in: 1.1,
            zoom_out: 0.9,
        }
    }
}

impl WheelZoom {
    /// Returns the zoom factor for a wheel tick with vertical delta `delta_y`.
    ///
    /// Only the sign matters; the magnitude of the delta is ignored.
    #[must_use]
    pub fn factor(&self, delta_y: f64) -> f64 {
        if delta_y > 0.0 {
            self.zoom_out
        } else {
            self.zoom_in
        }
    }
}
