//! Drawing file parsing module.

mod dxf;
mod sections;

pub use dxf::{parse_dxf_file, strip_mtext_formatting, DxfReader};
pub use sections::{read_group_pairs, GroupPair};
