//! Group-code level helpers for ASCII DXF content.

use crate::error::{GeometryError, Result};

/// One DXF group: a numeric code followed by its value line.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupPair {
    /// Group code.
    pub code: i32,
    /// Raw value (trailing whitespace removed).
    pub value: String,
    /// 1-based line number of the code line.
    pub line: usize,
}

impl GroupPair {
    /// Value with surrounding whitespace removed.
    pub fn trimmed(&self) -> &str {
        self.value.trim()
    }

    /// Parse the value as a float.
    pub fn float(&self) -> Result<f64> {
        self.trimmed()
            .parse()
            .map_err(|_| GeometryError::InvalidNumber {
                line: self.line + 1,
                value: self.value.clone(),
            })
    }

    /// Check if this pair is the structural marker `0/<name>`.
    pub fn is_marker(&self, name: &str) -> bool {
        self.code == 0 && self.trimmed() == name
    }
}

/// Split DXF content into group pairs.
pub fn read_group_pairs(content: &str) -> Result<Vec<GroupPair>> {
    let lines: Vec<&str> = content.lines().collect();
    let mut pairs = Vec::with_capacity(lines.len() / 2);
    let mut i = 0;

    while i < lines.len() {
        let code_line = lines[i].trim();
        if code_line.is_empty() && i + 1 == lines.len() {
            break;
        }
        let code = code_line.parse().map_err(|_| GeometryError::ParseError {
            line: i + 1,
            message: format!("expected a group code, got '{}'", code_line),
        })?;
        let value = lines.get(i + 1).ok_or_else(|| GeometryError::ParseError {
            line: i + 1,
            message: format!("group code {} has no value", code),
        })?;
        pairs.push(GroupPair {
            code,
            value: value.trim_end_matches('\r').to_string(),
            line: i + 1,
        });
        i += 2;
    }

    Ok(pairs)
}

/// Get the pairs of a named section (between `2/<name>` and `0/ENDSEC`).
pub fn find_section<'a>(pairs: &'a [GroupPair], name: &str) -> Option<&'a [GroupPair]> {
    let mut i = 0;
    while i + 1 < pairs.len() {
        if pairs[i].is_marker("SECTION") && pairs[i + 1].code == 2 {
            let start = i + 2;
            let end = pairs[start..]
                .iter()
                .position(|p| p.is_marker("ENDSEC"))
                .map(|offset| start + offset)
                .unwrap_or(pairs.len());
            if pairs[i + 1].trimmed() == name {
                return Some(&pairs[start..end]);
            }
            i = end;
        } else {
            i += 1;
        }
    }
    None
}

/// Split a section into entities, each starting at a `0/<TYPE>` pair.
///
/// Returns the type marker pair and the entity's remaining groups.
pub fn split_entities(section: &[GroupPair]) -> Vec<(&GroupPair, &[GroupPair])> {
    let starts: Vec<usize> = section
        .iter()
        .enumerate()
        .filter(|(_, p)| p.code == 0)
        .map(|(i, _)| i)
        .collect();

    starts
        .iter()
        .enumerate()
        .map(|(n, &start)| {
            let end = starts.get(n + 1).copied().unwrap_or(section.len());
            (&section[start], &section[start + 1..end])
        })
        .collect()
}

/// Get the first value for a group code within an entity.
pub fn group_value<'a>(entity: &'a [GroupPair], code: i32) -> Option<&'a GroupPair> {
    entity.iter().find(|p| p.code == code)
}

/// Read a coordinate triple from codes `base`, `base + 10`, `base + 20`.
///
/// X and Y are required; a missing Z defaults to 0.
pub fn read_point(entity: &[GroupPair], base: i32, entity_line: usize) -> Result<[f64; 3]> {
    let component = |code: i32| -> Result<Option<f64>> {
        group_value(entity, code).map(GroupPair::float).transpose()
    };

    let missing = |axis: &str| GeometryError::ParseError {
        line: entity_line,
        message: format!("entity is missing {} coordinate (group {})", axis, base),
    };

    let x = component(base)?.ok_or_else(|| missing("X"))?;
    let y = component(base + 10)?.ok_or_else(|| missing("Y"))?;
    let z = component(base + 20)?.unwrap_or(0.0);
    Ok([x, y, z])
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "  0\nSECTION\n  2\nHEADER\n  9\n$ACADVER\n  1\nAC1009\n  0\nENDSEC\n  0\nSECTION\n  2\nENTITIES\n  0\nLINE\n  8\n0\n 10\n1.5\n 20\n2.0\n 11\n3.0\n 21\n4.0\n  0\nENDSEC\n  0\nEOF\n";

    #[test]
    fn test_read_group_pairs() {
        let pairs = read_group_pairs(SAMPLE).unwrap();
        assert_eq!(pairs[0].code, 0);
        assert_eq!(pairs[0].value, "SECTION");
        assert_eq!(pairs[0].line, 1);
        assert_eq!(pairs[2].code, 9);
        assert!(pairs.last().unwrap().is_marker("EOF"));
    }

    #[test]
    fn test_read_group_pairs_rejects_bad_code() {
        let result = read_group_pairs("  0\nSECTION\nabc\nvalue\n");
        assert!(matches!(
            result,
            Err(GeometryError::ParseError { line: 3, .. })
        ));
    }

    #[test]
    fn test_read_group_pairs_rejects_dangling_code() {
        let result = read_group_pairs("  0\nSECTION\n  2\n");
        assert!(matches!(result, Err(GeometryError::ParseError { .. })));
    }

    #[test]
    fn test_find_section() {
        let pairs = read_group_pairs(SAMPLE).unwrap();
        let entities = find_section(&pairs, "ENTITIES").unwrap();
        assert!(entities[0].is_marker("LINE"));
        assert!(find_section(&pairs, "BLOCKS").is_none());
        assert_eq!(find_section(&pairs, "HEADER").unwrap().len(), 2);
    }

    #[test]
    fn test_split_entities_and_read_point() {
        let pairs = read_group_pairs(SAMPLE).unwrap();
        let section = find_section(&pairs, "ENTITIES").unwrap();
        let entities = split_entities(section);
        assert_eq!(entities.len(), 1);
        let (marker, groups) = entities[0];
        assert_eq!(marker.trimmed(), "LINE");
        assert_eq!(read_point(groups, 10, 1).unwrap(), [1.5, 2.0, 0.0]);
        assert_eq!(read_point(groups, 11, 1).unwrap(), [3.0, 4.0, 0.0]);
        assert!(read_point(groups, 12, 1).is_err());
    }

    #[test]
    fn test_invalid_number() {
        let pairs = read_group_pairs(" 10\nnot-a-number\n").unwrap();
        assert!(matches!(
            pairs[0].float(),
            Err(GeometryError::InvalidNumber { line: 2, .. })
        ));
    }
}
