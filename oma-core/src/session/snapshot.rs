//! Structural model session backed by a JSON export of the model.

use super::{PointConnection, PointLoad, Retrieval, SessionFailure, StructuralModel};
use crate::config::{UnitSystem, ALL_GROUP, FRAME_END_FINISH, FRAME_END_START, FRAME_OBJECT_TYPE};
use crate::error::{GeometryError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Failure code reported for unknown objects, as the application does.
const RET_FAILED: i32 = 1;

/// A point of the exported model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotPoint {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// A frame of the exported model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotFrame {
    pub name: String,
    pub start: String,
    pub end: String,
}

/// A point load of the exported model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotLoad {
    pub point: String,
    pub load_pattern: String,
    #[serde(default)]
    pub f1: f64,
    #[serde(default)]
    pub f2: f64,
    #[serde(default)]
    pub f3: f64,
    #[serde(default)]
    pub m1: f64,
    #[serde(default)]
    pub m2: f64,
    #[serde(default)]
    pub m3: f64,
}

/// Exported model: geometry, groups and point loads, all expressed in
/// `units`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSnapshot {
    pub units: UnitSystem,
    #[serde(default)]
    pub locked: bool,
    pub points: Vec<SnapshotPoint>,
    #[serde(default)]
    pub frames: Vec<SnapshotFrame>,
    #[serde(default)]
    pub groups: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub point_loads: Vec<SnapshotLoad>,
}

impl ModelSnapshot {
    /// Parse a snapshot from JSON text.
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Read a snapshot file.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(GeometryError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Err(GeometryError::EmptyFile {
                path: path.to_path_buf(),
            });
        }

        Self::from_json(&content)
    }
}

/// Session over a [`ModelSnapshot`].
///
/// Values are stored in the snapshot's units and converted to the present
/// units on every query, like the application does.
#[derive(Debug, Clone)]
pub struct SnapshotSession {
    snapshot: ModelSnapshot,
    present_units: UnitSystem,
    locked: bool,
}

impl SnapshotSession {
    /// Open a session on a snapshot; present units start as the snapshot's.
    pub fn new(snapshot: ModelSnapshot) -> Self {
        Self {
            present_units: snapshot.units,
            locked: snapshot.locked,
            snapshot,
        }
    }

    /// Open a session on a snapshot file.
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self::new(ModelSnapshot::from_file(path)?))
    }

    /// Check if the model is locked.
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    fn length_factor(&self) -> f64 {
        self.snapshot.units.length_to_meter() / self.present_units.length_to_meter()
    }

    fn force_factor(&self) -> f64 {
        self.snapshot.units.force_to_newton() / self.present_units.force_to_newton()
    }

    fn has_point(&self, name: &str) -> bool {
        self.snapshot.points.iter().any(|p| p.name == name)
    }

    fn group_members(&self, group: &str) -> Option<Vec<&str>> {
        if group == ALL_GROUP {
            return Some(self.snapshot.points.iter().map(|p| p.name.as_str()).collect());
        }
        self.snapshot
            .groups
            .get(group)
            .map(|members| members.iter().map(String::as_str).collect())
    }
}

impl StructuralModel for SnapshotSession {
    fn unlock(&mut self) -> std::result::Result<(), SessionFailure> {
        self.locked = false;
        Ok(())
    }

    fn point_names(&self) -> Retrieval<Vec<String>> {
        Retrieval::from_items(self.snapshot.points.iter().map(|p| p.name.clone()).collect())
    }

    fn frame_names(&self) -> Retrieval<Vec<String>> {
        Retrieval::from_items(self.snapshot.frames.iter().map(|f| f.name.clone()).collect())
    }

    fn point_coordinates(&self, point: &str) -> Retrieval<[f64; 3]> {
        let factor = self.length_factor();
        match self.snapshot.points.iter().find(|p| p.name == point) {
            Some(p) => Retrieval::Data([p.x * factor, p.y * factor, p.z * factor]),
            None => Retrieval::Failed(SessionFailure::new(
                format!("GetCoordCartesian({})", point),
                RET_FAILED,
            )),
        }
    }

    fn point_connectivity(&self, point: &str) -> Retrieval<Vec<PointConnection>> {
        if !self.has_point(point) {
            return Retrieval::Failed(SessionFailure::new(
                format!("GetConnectivity({})", point),
                RET_FAILED,
            ));
        }

        let mut connections = Vec::new();
        for frame in &self.snapshot.frames {
            if frame.start == point {
                connections.push(PointConnection {
                    object_type: FRAME_OBJECT_TYPE,
                    object_name: frame.name.clone(),
                    point_number: FRAME_END_START,
                });
            }
            if frame.end == point {
                connections.push(PointConnection {
                    object_type: FRAME_OBJECT_TYPE,
                    object_name: frame.name.clone(),
                    point_number: FRAME_END_FINISH,
                });
            }
        }
        Retrieval::from_items(connections)
    }

    fn point_loads(&self, group: &str) -> Retrieval<Vec<PointLoad>> {
        let Some(members) = self.group_members(group) else {
            return Retrieval::Failed(SessionFailure::new(
                format!("GetLoadForce({})", group),
                RET_FAILED,
            ));
        };

        let force = self.force_factor();
        let moment = force * self.length_factor();

        let loads = self
            .snapshot
            .point_loads
            .iter()
            .filter(|load| members.contains(&load.point.as_str()))
            .map(|load| PointLoad {
                point: load.point.clone(),
                load_pattern: load.load_pattern.clone(),
                f1: load.f1 * force,
                f2: load.f2 * force,
                f3: load.f3 * force,
                m1: load.m1 * moment,
                m2: load.m2 * moment,
                m3: load.m3 * moment,
            })
            .collect();

        Retrieval::from_items(loads)
    }

    fn present_units(&self) -> UnitSystem {
        self.present_units
    }

    fn set_present_units(&mut self, units: UnitSystem) -> std::result::Result<(), SessionFailure> {
        self.present_units = units;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"{
        "units": "N_mm_C",
        "locked": true,
        "points": [
            { "name": "1", "x": 0.0, "y": 0.0, "z": 0.0 },
            { "name": "2", "x": 2500.0, "y": 0.0, "z": 0.0 }
        ],
        "frames": [{ "name": "F1", "start": "1", "end": "2" }],
        "groups": { "TOP": ["2"] },
        "point_loads": [
            { "point": "2", "load_pattern": "References", "f1": 3000.0 },
            { "point": "1", "load_pattern": "Setup_1", "f3": -1000.0, "m1": 5.0 }
        ]
    }"#;

    fn session() -> SnapshotSession {
        SnapshotSession::new(ModelSnapshot::from_json(SNAPSHOT).unwrap())
    }

    #[test]
    fn test_names() {
        let model = session();
        assert_eq!(
            model.point_names(),
            Retrieval::Data(vec!["1".to_string(), "2".to_string()])
        );
        assert_eq!(model.frame_names(), Retrieval::Data(vec!["F1".to_string()]));
    }

    #[test]
    fn test_coordinates_follow_present_units() {
        let mut model = session();
        assert_eq!(
            model.point_coordinates("2"),
            Retrieval::Data([2500.0, 0.0, 0.0])
        );
        model.set_present_units(UnitSystem::KnMC).unwrap();
        assert_eq!(model.point_coordinates("2"), Retrieval::Data([2.5, 0.0, 0.0]));
        assert!(model.point_coordinates("99").is_failed());
    }

    #[test]
    fn test_connectivity() {
        let model = session();
        assert_eq!(
            model.point_connectivity("2"),
            Retrieval::Data(vec![PointConnection {
                object_type: 2,
                object_name: "F1".to_string(),
                point_number: 2,
            }])
        );
        assert!(model.point_connectivity("99").is_failed());
    }

    #[test]
    fn test_loads_converted_to_present_units() {
        let mut model = session();
        model.set_present_units(UnitSystem::KnMC).unwrap();
        let loads = model.point_loads("ALL").data().unwrap();
        assert_eq!(loads.len(), 2);
        assert_eq!(loads[0].forces(), [3.0, 0.0, 0.0]);
        assert_eq!(loads[1].forces(), [0.0, 0.0, -1.0]);
        assert!((loads[1].m1 - 0.000_005).abs() < 1e-15);
    }

    #[test]
    fn test_loads_by_group() {
        let model = session();
        let loads = model.point_loads("TOP").data().unwrap();
        assert_eq!(loads.len(), 1);
        assert_eq!(loads[0].point, "2");
        assert!(model.point_loads("MISSING").is_failed());
    }

    #[test]
    fn test_unlock() {
        let mut model = session();
        assert!(model.is_locked());
        model.unlock().unwrap();
        assert!(!model.is_locked());
    }

    #[test]
    fn test_invalid_snapshot() {
        let result = ModelSnapshot::from_json("{ \"units\": \"furlongs\" }");
        assert!(matches!(result, Err(GeometryError::InvalidSnapshot(_))));
    }
}
