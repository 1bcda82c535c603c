//! Geometry text file writer.

use super::format::format_coordinate;
use crate::error::Result;
use crate::model::{GeometryDataset, GeometryFile};
use std::fmt::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Render a dataset in the OMA geometry text layout.
pub fn generate_geometry_txt(dataset: &GeometryDataset) -> String {
    let mut output = String::new();

    writeln!(output).unwrap();
    writeln!(output).unwrap();
    writeln!(output, "GEOMETRY DEFINITION").unwrap();
    writeln!(output).unwrap();
    writeln!(output).unwrap();

    generate_nodes_section(&mut output, dataset);
    generate_lines_section(&mut output, dataset);
    generate_sensors_section(&mut output, dataset);

    writeln!(output, "COLOR PLANE").unwrap();
    writeln!(output).unwrap();
    writeln!(output, "0").unwrap();
    writeln!(output).unwrap();

    output
}

fn generate_nodes_section(output: &mut String, dataset: &GeometryDataset) {
    writeln!(output, "NODES ID, X, Y, Z").unwrap();
    writeln!(output).unwrap();
    for point in &dataset.points {
        writeln!(
            output,
            "{} {} {} {}",
            point.label,
            format_coordinate(point.x),
            format_coordinate(point.y),
            format_coordinate(point.z)
        )
        .unwrap();
    }
    writeln!(output).unwrap();
    writeln!(output).unwrap();
    writeln!(output).unwrap();
}

fn generate_lines_section(output: &mut String, dataset: &GeometryDataset) {
    writeln!(output, "LINES NODE 1 - NODE 2").unwrap();
    writeln!(output).unwrap();
    writeln!(output, "{}", dataset.elements.len()).unwrap();
    for element in &dataset.elements {
        writeln!(output, "{} {}", element.start.point, element.end.point).unwrap();
    }
    writeln!(output).unwrap();
    writeln!(output).unwrap();
}

fn generate_sensors_section(output: &mut String, dataset: &GeometryDataset) {
    writeln!(output, "SENSORS [ID, DIR (1-x, 2-y, 3-z)]").unwrap();
    for channel in &dataset.channels {
        let [dx, dy, dz] = channel.direction.components();
        writeln!(output, "{} {} {} {}", channel.point, dx, dy, dz).unwrap();
    }
    writeln!(output).unwrap();
    writeln!(output).unwrap();
    writeln!(output).unwrap();
}

/// Path of one output file: `<stem><suffix>.txt` next to `output_base`.
pub fn output_path(output_base: &Path, file: &GeometryFile) -> PathBuf {
    let stem = output_base
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("geometry");
    output_base.with_file_name(format!("{}{}.txt", stem, file.suffix()))
}

/// Render every file, then write them; returns the written paths.
pub fn write_geometry_files(files: &[GeometryFile], output_base: &Path) -> Result<Vec<PathBuf>> {
    let rendered: Vec<(PathBuf, String)> = files
        .iter()
        .map(|file| (output_path(output_base, file), generate_geometry_txt(&file.dataset)))
        .collect();

    let mut written = Vec::with_capacity(rendered.len());
    for (path, content) in rendered {
        std::fs::write(&path, content)?;
        info!("Wrote {}", path.display());
        written.push(path);
    }

    Ok(written)
}
