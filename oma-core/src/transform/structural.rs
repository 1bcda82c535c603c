//! Reading points and frames from an open structural model.

use super::connectivity::resolve_frame_connectivity;
use crate::config::rounding::round_6_significant;
use crate::config::ExportConfig;
use crate::model::naming::sort_natural;
use crate::model::{Element, Point};
use crate::session::{PointConnection, StructuralModel};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Points and elements read from a structural model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelGeometry {
    /// Points in natural name order.
    pub points: Vec<Point>,
    /// Frame elements in natural name order.
    pub elements: Vec<Element>,
}

/// Read every point and frame of the model.
///
/// The model is unlocked first. Coordinates are read in the present units
/// and rounded to `SIGNIFICANT_DIGITS` significant digits when
/// `config.round_coordinates` is set. Failed queries are logged and treated
/// as empty.
pub fn read_model_geometry<S: StructuralModel + ?Sized>(
    session: &mut S,
    config: &ExportConfig,
) -> ModelGeometry {
    if let Err(failure) = session.unlock() {
        warn!("Model unlock was not properly retrieved ({})", failure);
    }

    let mut names = session.point_names().or_default_warn("Point names");
    sort_natural(&mut names);

    let mut points = Vec::with_capacity(names.len());
    for name in names {
        let what = format!("Coordinates of point {}", name);
        let Some(coords) = session.point_coordinates(&name).warn_on_failure(&what) else {
            continue;
        };
        let [x, y, z] = if config.round_coordinates {
            coords.map(round_6_significant)
        } else {
            coords
        };
        points.push(Point::new(name, x, y, z));
    }

    let frame_names = session.frame_names().or_default_warn("Frame names");
    let connectivity: Vec<(&Point, Vec<PointConnection>)> = points
        .iter()
        .map(|point| {
            let what = format!("Connectivity of point {}", point.label);
            (point, session.point_connectivity(&point.label).or_default_warn(&what))
        })
        .collect();
    let elements = resolve_frame_connectivity(&frame_names, &connectivity);

    info!(
        "Read {} point(s) and {} frame(s) from the model",
        points.len(),
        elements.len()
    );

    ModelGeometry { points, elements }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{ModelSnapshot, SnapshotSession};

    const MODEL: &str = r#"{
        "units": "kN_m_C",
        "locked": true,
        "points": [
            { "name": "10", "x": 0.1234567, "y": 0.0, "z": 0.0 },
            { "name": "2", "x": 1.0, "y": 0.0, "z": 2.5 },
            { "name": "1", "x": 0.0, "y": 0.0, "z": 0.0 }
        ],
        "frames": [
            { "name": "B", "start": "2", "end": "10" },
            { "name": "A", "start": "1", "end": "2" }
        ]
    }"#;

    fn session() -> SnapshotSession {
        SnapshotSession::new(ModelSnapshot::from_json(MODEL).unwrap())
    }

    #[test]
    fn test_points_in_natural_order() {
        let mut model = session();
        let geometry = read_model_geometry(&mut model, &ExportConfig::default());
        let labels: Vec<&str> = geometry.points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["1", "2", "10"]);
        assert!(!model.is_locked());
    }

    #[test]
    fn test_coordinates_rounded_to_significant_digits() {
        let mut model = session();
        let geometry = read_model_geometry(&mut model, &ExportConfig::default());
        assert_eq!(geometry.points[2].x, 0.123457);

        let config = ExportConfig {
            round_coordinates: false,
            ..ExportConfig::default()
        };
        let geometry = read_model_geometry(&mut model, &config);
        assert_eq!(geometry.points[2].x, 0.1234567);
    }

    #[test]
    fn test_frames_resolved() {
        let mut model = session();
        let geometry = read_model_geometry(&mut model, &ExportConfig::default());
        assert_eq!(geometry.elements.len(), 2);
        assert_eq!(geometry.elements[0].label, "A");
        assert_eq!(geometry.elements[0].start.point, "1");
        assert_eq!(geometry.elements[1].start.point, "2");
        assert_eq!(geometry.elements[1].end.point, "10");
        assert_eq!(geometry.elements[1].start.z, 2.5);
    }
}
