//! Point deduplication of drawing line segments.

use crate::config::rounding::round_coord;
use crate::model::{Element, ElementEnd, Point, PointKey, Segment};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Order in which segments are visited.
///
/// Point and element labels are assigned in visiting order, so the same
/// drawing visited in another order yields other labels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TraversalOrder {
    /// Segments in the order they were read.
    #[default]
    Discovery,
    /// Segments at the given indices, in that order.
    Custom(Vec<usize>),
}

impl TraversalOrder {
    fn indices(&self, len: usize) -> Vec<usize> {
        match self {
            TraversalOrder::Discovery => (0..len).collect(),
            TraversalOrder::Custom(indices) => indices
                .iter()
                .copied()
                .filter(|&i| {
                    if i >= len {
                        warn!("Segment index {} out of range ({} segments)", i, len);
                        false
                    } else {
                        true
                    }
                })
                .collect(),
        }
    }
}

/// Unique points and the elements connecting them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeduplicatedGeometry {
    /// Points in label order (`"1"`, `"2"`, ...).
    pub points: Vec<Point>,
    /// Elements in label order (`"1"`, `"2"`, ...).
    pub elements: Vec<Element>,
}

/// Merge segment endpoints into labelled points and build the elements.
///
/// Endpoints are compared by their coordinates rounded to `COORD_DECIMALS`
/// places. A location gets the next free label the first time it is seen
/// and keeps it afterwards; points store the rounded coordinates.
pub fn deduplicate_segments(segments: &[Segment], order: &TraversalOrder) -> DeduplicatedGeometry {
    let mut labels: HashMap<PointKey, String> = HashMap::new();
    let mut geometry = DeduplicatedGeometry::default();

    for index in order.indices(segments.len()) {
        let segment = &segments[index];
        let start = segment.start.map(round_coord);
        let end = segment.end.map(round_coord);

        let [first, second] = [start, end].map(|coords| {
            let key = PointKey::from_coords(coords);
            let label = labels.entry(key).or_insert_with(|| {
                let label = (geometry.points.len() + 1).to_string();
                geometry
                    .points
                    .push(Point::new(label.clone(), coords[0], coords[1], coords[2]));
                label
            });
            ElementEnd::new(label.clone(), coords)
        });

        let element_label = (geometry.elements.len() + 1).to_string();
        geometry
            .elements
            .push(Element::new(element_label, first, second));
    }

    debug!(
        "Deduplicated {} segment(s) into {} point(s)",
        geometry.elements.len(),
        geometry.points.len()
    );

    geometry
}
