//! Composition of points, elements and channels into output datasets.

use crate::model::{Channel, Element, GeometryDataset, GeometryFile, Point, SetupPlan};
use tracing::debug;

/// Build the file of a single-file run.
pub fn assemble_single(
    points: Vec<Point>,
    elements: Vec<Element>,
    channels: Vec<Channel>,
) -> GeometryFile {
    GeometryFile {
        setup: None,
        dataset: GeometryDataset::new(points, elements, channels),
    }
}

/// Build one file per setup of `plan`.
///
/// Without setups a single file holds the reference channels. Otherwise
/// file `n` holds the reference channels followed by those of `Setup_n`.
pub fn assemble_setups(
    points: &[Point],
    elements: &[Element],
    plan: &SetupPlan,
) -> Vec<GeometryFile> {
    if plan.setups.is_empty() {
        return vec![assemble_single(
            points.to_vec(),
            elements.to_vec(),
            plan.references.channels.clone(),
        )];
    }

    plan.setups
        .iter()
        .enumerate()
        .map(|(index, setup)| {
            let channels: Vec<Channel> = plan
                .references
                .channels
                .iter()
                .chain(&setup.channels)
                .cloned()
                .collect();
            debug!("{}: {} channel(s)", setup.name, channels.len());
            GeometryFile {
                setup: Some(index + 1),
                dataset: GeometryDataset::new(points.to_vec(), elements.to_vec(), channels),
            }
        })
        .collect()
}
