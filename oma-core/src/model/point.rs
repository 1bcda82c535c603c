//! Point (node) definition.

use crate::config::rounding::round_coord;
use serde::{Deserialize, Serialize};

/// A named point of the structural geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Point label (sequential number or the model's point name).
    pub label: String,
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Z coordinate.
    pub z: f64,
}

impl Point {
    /// Create a new point.
    pub fn new(label: impl Into<String>, x: f64, y: f64, z: f64) -> Self {
        Self {
            label: label.into(),
            x,
            y,
            z,
        }
    }

    /// Get the coordinates as an array.
    pub fn coords(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Rounded lookup key for this point's location.
    pub fn key(&self) -> PointKey {
        PointKey::from_coords(self.coords())
    }
}

/// Location key with every coordinate rounded to `COORD_DECIMALS` places.
///
/// Two locations share a key exactly when their rounded coordinates are
/// equal; `-0.0` and `0.0` are the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointKey([u64; 3]);

impl PointKey {
    /// Build a key from raw coordinates.
    pub fn from_coords(coords: [f64; 3]) -> Self {
        Self(coords.map(|c| normalize_zero(round_coord(c)).to_bits()))
    }

    /// Rounded coordinates represented by this key.
    pub fn coords(&self) -> [f64; 3] {
        self.0.map(f64::from_bits)
    }
}

#[inline]
fn normalize_zero(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}
