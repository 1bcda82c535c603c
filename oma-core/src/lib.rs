//! oma-core - Core library for OMA sensor geometry export.
//!
//! This library turns the sensor layout of a structure into the geometry
//! text file read by operational modal analysis tools. Two sources are
//! supported:
//!
//! - a DXF drawing: lines become elements, and channel numbers are texts on
//!   the `x_pos` ... `z_neg` layers placed on line ends;
//! - a structural model session: frames become elements, and channels are
//!   point loads of the `References` and `Setup_<n>` load patterns whose
//!   magnitude is the channel number.
//!
//! # Example
//!
//! ```no_run
//! use oma_core::{extract_dxf_geometry, write_geometry_files};
//! use std::path::Path;
//!
//! let files = extract_dxf_geometry(Path::new("bridge.dxf")).unwrap();
//! write_geometry_files(&files, Path::new("bridge.txt")).unwrap();
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod model;
pub mod parser;
pub mod session;
pub mod transform;
pub mod validation;

// Re-exports for convenience
pub use config::{CollisionPolicy, ExportConfig, ForceUnit, UnitSystem};
pub use error::{ErrorCode, GeometryError, Result};
pub use generator::{generate_geometry_txt, write_geometry_files};
pub use model::{Channel, Direction, DrawingEntities, Element, GeometryDataset, GeometryFile, Point};
pub use parser::parse_dxf_file;
pub use session::{ModelSnapshot, SnapshotSession, StructuralModel};
pub use validation::{quick_validate, validate_files, ValidationResult};

use std::path::{Path, PathBuf};
use tracing::info;

/// Build the geometry of a drawing.
///
/// Segments are deduplicated in drawing order, then the channel annotations
/// are matched to the resulting points. A drawing always gives one file.
pub fn drawing_geometry(entities: &DrawingEntities) -> Result<GeometryFile> {
    let geometry =
        transform::deduplicate_segments(&entities.segments, &transform::TraversalOrder::Discovery);
    let channels = transform::match_annotations(&entities.annotations, &geometry.points)?;

    info!(
        "Drawing: {} point(s), {} line(s), {} channel(s)",
        geometry.points.len(),
        geometry.elements.len(),
        channels.len()
    );

    Ok(transform::assemble_single(
        geometry.points,
        geometry.elements,
        channels,
    ))
}

/// Read a DXF drawing and build its geometry file.
pub fn extract_dxf_geometry(input_path: &Path) -> Result<Vec<GeometryFile>> {
    let entities = parse_dxf_file(input_path)?;
    Ok(vec![drawing_geometry(&entities)?])
}

/// Read the geometry and channel setups of an open structural model.
///
/// Gives one file per setup, or a single file with the reference channels
/// when the model has no setups.
pub fn extract_model_geometry<S: StructuralModel + ?Sized>(
    session: &mut S,
    config: &ExportConfig,
) -> Result<Vec<GeometryFile>> {
    let geometry = transform::read_model_geometry(session, config);
    let plan = transform::probe_setups(session, config)?;
    Ok(transform::assemble_setups(
        &geometry.points,
        &geometry.elements,
        &plan,
    ))
}

/// Convert a DXF drawing to an OMA geometry file.
///
/// This is the main high-level function that performs the full pipeline:
/// 1. Parse the drawing
/// 2. Deduplicate points and match the channels
/// 3. Validate the dataset
/// 4. Write the geometry file
///
/// # Returns
///
/// The paths of the written files.
pub fn convert_dxf_to_geometry(input_path: &Path, output_path: &Path) -> Result<Vec<PathBuf>> {
    let files = extract_dxf_geometry(input_path)?;
    finish(&files, output_path)
}

/// Convert a structural model snapshot to OMA geometry files, one per setup.
pub fn convert_model_to_geometry(
    input_path: &Path,
    output_path: &Path,
    config: &ExportConfig,
) -> Result<Vec<PathBuf>> {
    let mut session = SnapshotSession::open(input_path)?;
    let files = extract_model_geometry(&mut session, config)?;
    finish(&files, output_path)
}

fn finish(files: &[GeometryFile], output_path: &Path) -> Result<Vec<PathBuf>> {
    quick_validate(files)?;
    write_geometry_files(files, output_path)
}
