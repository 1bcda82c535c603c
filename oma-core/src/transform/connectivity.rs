//! Rebuilding of frame elements from per-point connectivity reports.
//!
//! The analysis application only reports, for each point, which frames end
//! there and with which end. The elements are rebuilt by collecting those
//! reports for every frame.

use crate::config::{FRAME_END_FINISH, FRAME_END_START, FRAME_OBJECT_TYPE};
use crate::model::naming::natural_cmp;
use crate::model::{Element, ElementEnd, Point};
use crate::session::PointConnection;
use std::collections::HashMap;
use tracing::{debug, warn};

#[derive(Debug, Default)]
struct FrameEnds<'a> {
    start: Option<&'a Point>,
    end: Option<&'a Point>,
}

impl<'a> FrameEnds<'a> {
    fn assign(&mut self, frame: &str, role: i32, point: &'a Point) {
        let slot = match role {
            FRAME_END_START => &mut self.start,
            FRAME_END_FINISH => &mut self.end,
            other => {
                warn!(
                    "Frame {} reports unknown end {} at point {}",
                    frame, other, point.label
                );
                return;
            }
        };

        match *slot {
            None => *slot = Some(point),
            Some(existing) if existing.label == point.label => {}
            Some(existing) => warn!(
                "Frame {} end {} is reported at point {} and at point {}, keeping {}",
                frame, role, existing.label, point.label, existing.label
            ),
        }
    }
}

/// Build elements from frame names and the connectivity of each point.
///
/// `connectivity` pairs every point with the objects the application
/// reported for it. Only frame objects are considered, and the first
/// assignment of an end wins. Elements are returned in natural name order;
/// frames without both ends are dropped with a warning.
pub fn resolve_frame_connectivity(
    frame_names: &[String],
    connectivity: &[(&Point, Vec<PointConnection>)],
) -> Vec<Element> {
    let mut frames: HashMap<&str, FrameEnds> = frame_names
        .iter()
        .map(|name| (name.as_str(), FrameEnds::default()))
        .collect();

    for (point, connections) in connectivity {
        for connection in connections {
            if connection.object_type != FRAME_OBJECT_TYPE {
                continue;
            }
            match frames.get_mut(connection.object_name.as_str()) {
                Some(ends) => ends.assign(&connection.object_name, connection.point_number, point),
                None => debug!(
                    "Point {} connects to unlisted frame {}",
                    point.label, connection.object_name
                ),
            }
        }
    }

    let mut names: Vec<&String> = frame_names.iter().collect();
    names.sort_by(|a, b| natural_cmp(a, b));
    names.dedup();

    let mut elements = Vec::with_capacity(names.len());
    for name in names {
        match frames.get(name.as_str()) {
            Some(FrameEnds {
                start: Some(start),
                end: Some(end),
            }) => elements.push(Element::new(
                name.clone(),
                ElementEnd::from(*start),
                ElementEnd::from(*end),
            )),
            _ => warn!("Frame {} is missing an end point and is skipped", name),
        }
    }

    elements
}
