//! Data model for sensor geometry.

mod channel;
mod dataset;
mod element;
mod entities;
pub mod naming;
mod point;

pub use channel::{Axis, Channel, Direction, DirectionSymbol};
pub use dataset::{GeometryDataset, GeometryFile, Setup, SetupPlan};
pub use element::{Element, ElementEnd};
pub use entities::{DrawingEntities, Segment, TextAnnotation};
pub use point::{Point, PointKey};
