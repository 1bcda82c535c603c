//! Access to an open structural-analysis model.
//!
//! The exporter talks to the analysis application through the
//! [`StructuralModel`] trait, which mirrors the automation calls it needs.
//! Every query reports a [`Retrieval`], so that "no data" and "the call
//! failed" stay distinguishable even though both end up as empty results.

mod snapshot;
mod units;

pub use snapshot::{ModelSnapshot, SnapshotFrame, SnapshotLoad, SnapshotPoint, SnapshotSession};
pub use units::UnitGuard;

use crate::config::UnitSystem;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// A session call that reported a failure code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{operation} returned code {code}")]
pub struct SessionFailure {
    /// Operation that failed.
    pub operation: String,
    /// Return code reported by the application.
    pub code: i32,
}

impl SessionFailure {
    /// Create a new failure record.
    pub fn new(operation: impl Into<String>, code: i32) -> Self {
        Self {
            operation: operation.into(),
            code,
        }
    }
}

/// Outcome of a session query.
#[derive(Debug, Clone, PartialEq)]
pub enum Retrieval<T> {
    /// The query returned data.
    Data(T),
    /// The query succeeded but there was nothing to return.
    Empty,
    /// The query failed.
    Failed(SessionFailure),
}

impl<T> Retrieval<T> {
    /// Check if the query failed.
    pub fn is_failed(&self) -> bool {
        matches!(self, Retrieval::Failed(_))
    }

    /// Returned data, if any.
    pub fn data(self) -> Option<T> {
        match self {
            Retrieval::Data(data) => Some(data),
            Retrieval::Empty | Retrieval::Failed(_) => None,
        }
    }

    /// Log a failure as a retrieval warning and return the data, if any.
    pub fn warn_on_failure(self, what: &str) -> Option<T> {
        if let Retrieval::Failed(failure) = &self {
            warn!("{} was not properly retrieved ({})", what, failure);
        }
        self.data()
    }
}

impl<T: Default> Retrieval<T> {
    /// Like [`Retrieval::warn_on_failure`], falling back to the default value.
    pub fn or_default_warn(self, what: &str) -> T {
        self.warn_on_failure(what).unwrap_or_default()
    }
}

impl<T> Retrieval<Vec<T>> {
    /// `Empty` for an empty list, `Data` otherwise.
    pub fn from_items(items: Vec<T>) -> Self {
        if items.is_empty() {
            Retrieval::Empty
        } else {
            Retrieval::Data(items)
        }
    }
}

/// One object connected to a point, as reported by the application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointConnection {
    /// Object type code (2 = frame).
    pub object_type: i32,
    /// Object name.
    pub object_name: String,
    /// Which end of the object the point is (1 = start, 2 = end).
    pub point_number: i32,
}

/// A nodal load assigned to a point in a load pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointLoad {
    /// Point name.
    pub point: String,
    /// Load pattern name.
    pub load_pattern: String,
    /// Force along local axis 1.
    pub f1: f64,
    /// Force along local axis 2.
    pub f2: f64,
    /// Force along local axis 3.
    pub f3: f64,
    /// Moment about local axis 1.
    pub m1: f64,
    /// Moment about local axis 2.
    pub m2: f64,
    /// Moment about local axis 3.
    pub m3: f64,
}

impl PointLoad {
    /// Create a load with forces only.
    pub fn force(
        point: impl Into<String>,
        load_pattern: impl Into<String>,
        forces: [f64; 3],
    ) -> Self {
        Self {
            point: point.into(),
            load_pattern: load_pattern.into(),
            f1: forces[0],
            f2: forces[1],
            f3: forces[2],
            m1: 0.0,
            m2: 0.0,
            m3: 0.0,
        }
    }

    /// Force components in axis order.
    pub fn forces(&self) -> [f64; 3] {
        [self.f1, self.f2, self.f3]
    }
}

/// Automation interface of an open structural model.
pub trait StructuralModel {
    /// Unlock the model so it can be queried and edited.
    fn unlock(&mut self) -> Result<(), SessionFailure>;

    /// Names of all point objects.
    fn point_names(&self) -> Retrieval<Vec<String>>;

    /// Names of all frame objects.
    fn frame_names(&self) -> Retrieval<Vec<String>>;

    /// Cartesian coordinates of a point, in the present units.
    fn point_coordinates(&self, point: &str) -> Retrieval<[f64; 3]>;

    /// Objects connected to a point.
    fn point_connectivity(&self, point: &str) -> Retrieval<Vec<PointConnection>>;

    /// Point loads of every point in a group, across all load patterns, in
    /// the present units.
    fn point_loads(&self, group: &str) -> Retrieval<Vec<PointLoad>>;

    /// Present unit system.
    fn present_units(&self) -> UnitSystem;

    /// Change the present unit system.
    fn set_present_units(&mut self, units: UnitSystem) -> Result<(), SessionFailure>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retrieval_from_items() {
        assert_eq!(Retrieval::<Vec<i32>>::from_items(vec![]), Retrieval::Empty);
        assert_eq!(Retrieval::from_items(vec![1]), Retrieval::Data(vec![1]));
    }

    #[test]
    fn test_retrieval_data() {
        assert_eq!(Retrieval::Data(3).data(), Some(3));
        assert_eq!(Retrieval::<i32>::Empty.data(), None);
        let failed: Retrieval<i32> = Retrieval::Failed(SessionFailure::new("Get names", 1));
        assert!(failed.is_failed());
        assert_eq!(failed.warn_on_failure("Point names"), None);
    }

    #[test]
    fn test_or_default_warn() {
        let failed: Retrieval<Vec<String>> =
            Retrieval::Failed(SessionFailure::new("Get frame names", 1));
        assert!(failed.or_default_warn("Frame names").is_empty());
        assert_eq!(
            Retrieval::Data(vec!["F1".to_string()]).or_default_warn("Frame names"),
            vec!["F1".to_string()]
        );
    }

    #[test]
    fn test_session_failure_message() {
        let failure = SessionFailure::new("SetPresentUnits", 1);
        assert_eq!(failure.to_string(), "SetPresentUnits returned code 1");
    }
}
