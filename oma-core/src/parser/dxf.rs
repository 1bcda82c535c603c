//! Reader for the model-space entities of an ASCII DXF drawing.
//!
//! Only what the exporter needs is read: `LINE` entities for the geometry and
//! `TEXT`/`MTEXT` entities for channel annotations. Entities in paper space
//! (group 67 = 1) and everything outside the `ENTITIES` section are skipped.

use crate::error::{GeometryError, Result};
use crate::model::{DrawingEntities, Segment, TextAnnotation};
use std::path::Path;
use tracing::debug;

use super::sections::*;

/// DXF entity reader.
pub struct DxfReader {
    /// Group pairs of the whole file.
    pairs: Vec<GroupPair>,
}

impl DxfReader {
    /// Create a new reader from file content.
    pub fn new(content: &str) -> Result<Self> {
        Ok(Self {
            pairs: read_group_pairs(content)?,
        })
    }

    /// Read all lines and texts of the model space.
    pub fn parse(&self) -> Result<DrawingEntities> {
        let mut entities = DrawingEntities::default();

        let Some(section) = find_section(&self.pairs, "ENTITIES") else {
            debug!("No ENTITIES section found");
            return Ok(entities);
        };

        for (marker, groups) in split_entities(section) {
            if in_paper_space(groups) {
                continue;
            }
            match marker.trimmed() {
                "LINE" => {
                    let start = read_point(groups, 10, marker.line)?;
                    let end = read_point(groups, 11, marker.line)?;
                    entities.segments.push(Segment::new(start, end));
                }
                "TEXT" => {
                    let text = group_value(groups, 1)
                        .map(|p| p.value.clone())
                        .unwrap_or_default();
                    entities.annotations.push(TextAnnotation::new(
                        text,
                        layer_of(groups),
                        read_point(groups, 10, marker.line)?,
                    ));
                }
                "MTEXT" => {
                    entities.annotations.push(TextAnnotation::new(
                        mtext_content(groups),
                        layer_of(groups),
                        read_point(groups, 10, marker.line)?,
                    ));
                }
                other => debug!("Skipping {} entity at line {}", other, marker.line),
            }
        }

        debug!(
            "Read {} line(s) and {} text(s)",
            entities.segments.len(),
            entities.annotations.len()
        );

        Ok(entities)
    }
}

/// Layer name of an entity (`0` when absent).
fn layer_of(groups: &[GroupPair]) -> String {
    group_value(groups, 8)
        .map(|p| p.trimmed().to_string())
        .unwrap_or_else(|| "0".to_string())
}

fn in_paper_space(groups: &[GroupPair]) -> bool {
    group_value(groups, 67).is_some_and(|p| p.trimmed() == "1")
}

/// Full MTEXT content: continuation chunks (group 3) followed by group 1,
/// with inline formatting codes removed.
fn mtext_content(groups: &[GroupPair]) -> String {
    let mut raw = String::new();
    for pair in groups.iter().filter(|p| p.code == 3) {
        raw.push_str(&pair.value);
    }
    if let Some(pair) = group_value(groups, 1) {
        raw.push_str(&pair.value);
    }
    strip_mtext_formatting(&raw)
}

/// Remove MTEXT inline formatting (`\A1;`, `\P`, `{`, `}`).
pub fn strip_mtext_formatting(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' | '}' => {}
            '\\' => match chars.next() {
                Some('\\') => out.push('\\'),
                Some('{') => out.push('{'),
                Some('}') => out.push('}'),
                Some('P') | Some('N') => out.push(' '),
                Some('~') => out.push(' '),
                Some('L') | Some('l') | Some('O') | Some('o') | Some('K') | Some('k') => {}
                Some(_) => {
                    // Parameterized code, runs up to ';'.
                    for c in chars.by_ref() {
                        if c == ';' {
                            break;
                        }
                    }
                }
                None => {}
            },
            _ => out.push(c),
        }
    }

    out
}

/// Read the model-space entities of a DXF file.
pub fn parse_dxf_file(path: &Path) -> Result<DrawingEntities> {
    use std::fs;

    if !path.exists() {
        return Err(GeometryError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let bytes = fs::read(path)?;
    // Older drawings are stored in a code page; the entities read here only
    // need ASCII.
    let content = String::from_utf8_lossy(&bytes);

    if content.trim().is_empty() {
        return Err(GeometryError::EmptyFile {
            path: path.to_path_buf(),
        });
    }

    let reader = DxfReader::new(&content)?;
    reader.parse()
}
