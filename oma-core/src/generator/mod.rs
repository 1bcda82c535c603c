//! Geometry text file generator module.

mod format;
mod geometry_txt;

pub use format::format_coordinate;
pub use geometry_txt::{generate_geometry_txt, output_path, write_geometry_files};
