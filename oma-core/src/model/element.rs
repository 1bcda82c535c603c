//! Line element connecting two points.

use super::Point;
use serde::{Deserialize, Serialize};

/// One end of an element, carrying a copy of the point's coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementEnd {
    /// Referenced point label.
    pub point: String,
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Z coordinate.
    pub z: f64,
}

impl ElementEnd {
    /// Create an end from a label and coordinates.
    pub fn new(point: impl Into<String>, coords: [f64; 3]) -> Self {
        Self {
            point: point.into(),
            x: coords[0],
            y: coords[1],
            z: coords[2],
        }
    }
}

impl From<&Point> for ElementEnd {
    fn from(point: &Point) -> Self {
        Self::new(point.label.clone(), point.coords())
    }
}

/// A line element (frame or drawing line).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Element label.
    pub label: String,
    /// First end.
    pub start: ElementEnd,
    /// Second end.
    pub end: ElementEnd,
}

impl Element {
    /// Create a new element.
    pub fn new(label: impl Into<String>, start: ElementEnd, end: ElementEnd) -> Self {
        Self {
            label: label.into(),
            start,
            end,
        }
    }

    /// Check if both ends reference the same point.
    pub fn is_degenerate(&self) -> bool {
        self.start.point == self.end.point
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_from_points() {
        let a = Point::new("1", 0.0, 0.0, 0.0);
        let b = Point::new("2", 3.0, 4.0, 0.0);
        let element = Element::new("1", (&a).into(), (&b).into());
        assert_eq!(element.start.point, "1");
        assert_eq!(element.end.point, "2");
        assert_eq!((element.end.x, element.end.y), (3.0, 4.0));
        assert!(!element.is_degenerate());
    }

    #[test]
    fn test_degenerate_element() {
        let a = Point::new("7", 1.0, 1.0, 1.0);
        let element = Element::new("1", (&a).into(), (&a).into());
        assert!(element.is_degenerate());
    }
}
