//! Matching of channel annotations to drawing points.
//!
//! Channels are drawn as texts holding the channel number, placed on one of
//! six direction layers with the insertion point exactly on a line end.

use crate::error::{GeometryError, Result};
use crate::model::{Channel, Direction, Point, PointKey, TextAnnotation};
use std::collections::BTreeSet;
use tracing::debug;

/// Direction layer of a channel annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationCategory {
    XPos,
    XNeg,
    YPos,
    YNeg,
    ZPos,
    ZNeg,
}

impl AnnotationCategory {
    /// Parse a layer name (case-insensitive).
    pub fn from_layer(layer: &str) -> Option<Self> {
        match layer.trim().to_lowercase().as_str() {
            "x_pos" => Some(AnnotationCategory::XPos),
            "x_neg" => Some(AnnotationCategory::XNeg),
            "y_pos" => Some(AnnotationCategory::YPos),
            "y_neg" => Some(AnnotationCategory::YNeg),
            "z_pos" => Some(AnnotationCategory::ZPos),
            "z_neg" => Some(AnnotationCategory::ZNeg),
            _ => None,
        }
    }

    /// Direction encoded by the layer.
    pub fn direction(&self) -> Direction {
        match self {
            AnnotationCategory::XPos => Direction::PosX,
            AnnotationCategory::XNeg => Direction::NegX,
            AnnotationCategory::YPos => Direction::PosY,
            AnnotationCategory::YNeg => Direction::NegY,
            AnnotationCategory::ZPos => Direction::PosZ,
            AnnotationCategory::ZNeg => Direction::NegZ,
        }
    }
}

/// Classification of a text annotation.
#[derive(Debug, Clone, PartialEq)]
pub enum Classified<'a> {
    /// Text on a direction layer.
    Channel {
        annotation: &'a TextAnnotation,
        category: AnnotationCategory,
    },
    /// Text on any other layer; not a channel.
    Ignored(&'a TextAnnotation),
}

/// Classify an annotation by its layer.
pub fn classify(annotation: &TextAnnotation) -> Classified<'_> {
    match AnnotationCategory::from_layer(&annotation.layer) {
        Some(category) => Classified::Channel {
            annotation,
            category,
        },
        None => Classified::Ignored(annotation),
    }
}

/// A channel annotation with its parsed number.
#[derive(Debug, Clone)]
struct NumberedAnnotation<'a> {
    number: i64,
    category: AnnotationCategory,
    annotation: &'a TextAnnotation,
}

/// Check that declared channel numbers are exactly `1..=expected`.
///
/// Reports every missing and every unexpected number at once.
pub fn check_channels(numbers: &[i64], expected: usize) -> Result<()> {
    let declared: BTreeSet<i64> = numbers.iter().copied().collect();
    let wanted: BTreeSet<i64> = (1..=expected as i64).collect();

    let missing: Vec<i64> = wanted.difference(&declared).copied().collect();
    let extra: Vec<i64> = declared.difference(&wanted).copied().collect();

    if missing.is_empty() && extra.is_empty() {
        Ok(())
    } else {
        Err(GeometryError::ChannelSetMismatch { missing, extra })
    }
}

/// Match channel annotations to points.
///
/// Annotations on layers other than the six direction layers are ignored.
/// The remaining ones must be numbered `1..N`; they are matched in
/// ascending number order to the first point (in `points` order) whose
/// rounded coordinates equal the rounded insertion point.
pub fn match_annotations(annotations: &[TextAnnotation], points: &[Point]) -> Result<Vec<Channel>> {
    let mut numbered = Vec::new();

    for classified in annotations.iter().map(classify) {
        match classified {
            Classified::Channel {
                annotation,
                category,
            } => {
                let text = annotation.text.trim();
                let number = text
                    .parse::<i64>()
                    .map_err(|_| GeometryError::InvalidChannelLabel {
                        text: text.to_string(),
                        layer: annotation.layer.clone(),
                    })?;
                numbered.push(NumberedAnnotation {
                    number,
                    category,
                    annotation,
                });
            }
            Classified::Ignored(annotation) => {
                debug!(
                    "Ignoring text '{}' on layer '{}'",
                    annotation.text.trim(),
                    annotation.layer
                );
            }
        }
    }

    numbered.sort_by_key(|n| n.number);

    let numbers: Vec<i64> = numbered.iter().map(|n| n.number).collect();
    check_channels(&numbers, numbered.len())?;

    let point_keys: Vec<(PointKey, &Point)> = points.iter().map(|p| (p.key(), p)).collect();

    let mut channels = Vec::with_capacity(numbered.len());
    for entry in &numbered {
        let key = PointKey::from_coords(entry.annotation.insert);
        let point = point_keys
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, p)| *p)
            .ok_or_else(|| {
                let [x, y, z] = key.coords();
                GeometryError::UnmatchedAnnotation {
                    label: entry.annotation.text.trim().to_string(),
                    x,
                    y,
                    z,
                }
            })?;

        debug!(
            "Channel {} -> point {} ({:?})",
            entry.number,
            point.label,
            entry.category.direction()
        );

        // check_channels guarantees 1..=N, so the number fits.
        channels.push(Channel::new(
            entry.number as u32,
            point.label.clone(),
            entry.category.direction(),
        ));
    }

    Ok(channels)
}
