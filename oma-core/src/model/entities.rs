//! Raw entities read from a drawing, before normalization.

use serde::{Deserialize, Serialize};

/// A straight line between two 3D coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Start coordinates.
    pub start: [f64; 3],
    /// End coordinates.
    pub end: [f64; 3],
}

impl Segment {
    /// Create a new segment.
    pub fn new(start: [f64; 3], end: [f64; 3]) -> Self {
        Self { start, end }
    }
}

/// A text entity placed in the drawing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextAnnotation {
    /// Text content as stored in the drawing.
    pub text: String,
    /// Layer the text lives on.
    pub layer: String,
    /// Insertion point.
    pub insert: [f64; 3],
}

impl TextAnnotation {
    /// Create a new annotation.
    pub fn new(text: impl Into<String>, layer: impl Into<String>, insert: [f64; 3]) -> Self {
        Self {
            text: text.into(),
            layer: layer.into(),
            insert,
        }
    }
}

/// Entities read from a drawing's model space.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrawingEntities {
    /// `LINE` entities in file order.
    pub segments: Vec<Segment>,
    /// `TEXT` and `MTEXT` entities in file order.
    pub annotations: Vec<TextAnnotation>,
}
