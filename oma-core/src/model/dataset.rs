//! Assembled geometry ready for serialization.

use super::{Channel, Element, Point};
use serde::{Deserialize, Serialize};

/// Points, elements and ordered channels of one geometry file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeometryDataset {
    /// Points in output order.
    pub points: Vec<Point>,
    /// Elements in output order.
    pub elements: Vec<Element>,
    /// Channels in output order.
    pub channels: Vec<Channel>,
}

impl GeometryDataset {
    /// Create a new dataset.
    pub fn new(points: Vec<Point>, elements: Vec<Element>, channels: Vec<Channel>) -> Self {
        Self {
            points,
            elements,
            channels,
        }
    }
}

/// A dataset together with the setup it was assembled for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryFile {
    /// Setup number, `None` when the run produces a single file.
    pub setup: Option<usize>,
    /// File content.
    pub dataset: GeometryDataset,
}

impl GeometryFile {
    /// File name suffix for this file (`""` or `"_setup_<n>"`).
    pub fn suffix(&self) -> String {
        match self.setup {
            Some(n) => format!("_setup_{}", n),
            None => String::new(),
        }
    }
}

/// Channels of one load pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Setup {
    /// Load pattern name.
    pub name: String,
    /// Channels sorted by number.
    pub channels: Vec<Channel>,
}

/// Reference channels plus the setups probed after them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetupPlan {
    /// Channels shared by every setup.
    pub references: Setup,
    /// Setups in order (`Setup_1`, `Setup_2`, ...).
    pub setups: Vec<Setup>,
}

impl SetupPlan {
    /// Number of setups found after the references.
    pub fn n_setups(&self) -> usize {
        self.setups.len()
    }

    /// Total number of channels across references and setups.
    pub fn channel_count(&self) -> usize {
        self.references.channels.len()
            + self.setups.iter().map(|s| s.channels.len()).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Direction;

    #[test]
    fn test_file_suffix() {
        let single = GeometryFile {
            setup: None,
            dataset: GeometryDataset::default(),
        };
        let second = GeometryFile {
            setup: Some(2),
            dataset: GeometryDataset::default(),
        };
        assert_eq!(single.suffix(), "");
        assert_eq!(second.suffix(), "_setup_2");
    }

    #[test]
    fn test_setup_plan_counts() {
        let plan = SetupPlan {
            references: Setup {
                name: "References".to_string(),
                channels: vec![Channel::new(1, "1", Direction::PosX)],
            },
            setups: vec![Setup {
                name: "Setup_1".to_string(),
                channels: vec![
                    Channel::new(2, "2", Direction::PosY),
                    Channel::new(3, "3", Direction::PosZ),
                ],
            }],
        };
        assert_eq!(plan.n_setups(), 1);
        assert_eq!(plan.channel_count(), 3);
    }
}
