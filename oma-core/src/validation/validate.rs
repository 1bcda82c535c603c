//! Validation of assembled geometry datasets.

use crate::error::{GeometryError, Result};
use crate::model::{GeometryDataset, GeometryFile};
use std::collections::HashSet;
use tracing::{error, warn};

/// Validation result with warnings.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Whether validation passed.
    pub passed: bool,
    /// Warning messages.
    pub warnings: Vec<String>,
    /// Error messages.
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// Create a passing result.
    pub fn ok() -> Self {
        Self {
            passed: true,
            ..Default::default()
        }
    }

    /// Create a failing result with an error.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            passed: false,
            errors: vec![message.into()],
            ..Default::default()
        }
    }

    /// Add a warning.
    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Add an error.
    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
        self.passed = false;
    }

    /// Merge another result into this one.
    pub fn merge(&mut self, other: ValidationResult) {
        self.warnings.extend(other.warnings);
        self.errors.extend(other.errors);
        if !other.passed {
            self.passed = false;
        }
    }
}

/// Validate every output file.
pub fn validate_files(files: &[GeometryFile]) -> ValidationResult {
    if files.is_empty() {
        return ValidationResult::error("No geometry to write");
    }

    let mut result = ValidationResult::ok();
    for file in files {
        let name = match file.setup {
            Some(n) => format!("Setup {}", n),
            None => "Geometry".to_string(),
        };
        result.merge(validate_dataset(&file.dataset, &name));
    }
    result
}

/// Validate a single dataset; messages are prefixed with `name`.
pub fn validate_dataset(dataset: &GeometryDataset, name: &str) -> ValidationResult {
    let mut result = ValidationResult::ok();

    let mut labels = HashSet::new();
    for point in &dataset.points {
        if !labels.insert(point.label.as_str()) {
            result.add_error(format!("{}: Point {} is defined twice", name, point.label));
        }
    }

    for element in &dataset.elements {
        for end in [&element.start, &element.end] {
            if !labels.contains(end.point.as_str()) {
                result.add_error(format!(
                    "{}: Element {} references unknown point {}",
                    name, element.label, end.point
                ));
            }
        }
        if element.is_degenerate() {
            result.add_warning(format!(
                "{}: Element {} starts and ends at point {}",
                name, element.label, element.start.point
            ));
        }
    }

    if dataset.channels.is_empty() {
        result.add_warning(format!("{}: No channels defined", name));
    }

    let mut numbers = HashSet::new();
    for channel in &dataset.channels {
        if !labels.contains(channel.point.as_str()) {
            result.add_error(format!(
                "{}: Channel {} references unknown point {}",
                name, channel.number, channel.point
            ));
        }
        if !numbers.insert(channel.number) {
            result.add_error(format!(
                "{}: Channel {} is defined twice",
                name, channel.number
            ));
        }
    }

    // Force-encoded channel numbers may have gaps.
    let count = dataset.channels.len() as u32;
    if let Some(gap) = (1..=count).find(|n| !numbers.contains(n)) {
        result.add_warning(format!(
            "{}: Channel numbering is not contiguous (channel {} missing)",
            name, gap
        ));
    }

    result
}

/// Validate the files before writing: warnings and errors are logged, and
/// any error fails with `InvalidDataset`.
pub fn quick_validate(files: &[GeometryFile]) -> Result<()> {
    let result = validate_files(files);

    for warning in &result.warnings {
        warn!("{}", warning);
    }
    for message in &result.errors {
        error!("{}", message);
    }

    if !result.passed {
        return Err(GeometryError::InvalidDataset {
            errors: result.errors,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Channel, Direction, Element, ElementEnd, Point};

    fn dataset() -> GeometryDataset {
        let a = Point::new("1", 0.0, 0.0, 0.0);
        let b = Point::new("2", 1.0, 0.0, 0.0);
        let line = Element::new("1", (&a).into(), (&b).into());
        GeometryDataset::new(
            vec![a, b],
            vec![line],
            vec![
                Channel::new(1, "1", Direction::PosX),
                Channel::new(2, "2", Direction::NegZ),
            ],
        )
    }

    #[test]
    fn test_valid_dataset() {
        let result = validate_dataset(&dataset(), "Geometry");
        assert!(result.passed);
        assert!(result.errors.is_empty());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_unknown_element_point() {
        let mut data = dataset();
        data.elements.push(Element::new(
            "2",
            ElementEnd::new("2", [1.0, 0.0, 0.0]),
            ElementEnd::new("9", [2.0, 0.0, 0.0]),
        ));
        let result = validate_dataset(&data, "Geometry");
        assert!(!result.passed);
        assert_eq!(
            result.errors,
            vec!["Geometry: Element 2 references unknown point 9".to_string()]
        );
    }

    #[test]
    fn test_unknown_channel_point() {
        let mut data = dataset();
        data.channels.push(Channel::new(3, "J5", Direction::NegY));
        let result = validate_dataset(&data, "Setup 1");
        assert!(!result.passed);
        assert!(result.errors[0].starts_with("Setup 1: Channel 3"));
    }

    #[test]
    fn test_no_channels_is_a_warning() {
        let mut data = dataset();
        data.channels.clear();
        let result = validate_dataset(&data, "Geometry");
        assert!(result.passed);
        assert_eq!(result.warnings, vec!["Geometry: No channels defined".to_string()]);
    }

    #[test]
    fn test_gap_is_a_warning() {
        let mut data = dataset();
        data.channels[1].number = 5;
        let result = validate_dataset(&data, "Geometry");
        assert!(result.passed);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_quick_validate() {
        let good = GeometryFile {
            setup: None,
            dataset: dataset(),
        };
        assert!(quick_validate(&[good]).is_ok());

        let empty = GeometryFile {
            setup: None,
            dataset: GeometryDataset::default(),
        };
        assert!(quick_validate(&[empty]).is_ok());

        let mut data = dataset();
        data.channels[1].point = "7".to_string();
        let bad = GeometryFile {
            setup: Some(1),
            dataset: data,
        };
        match quick_validate(&[bad]) {
            Err(GeometryError::InvalidDataset { errors }) => {
                assert_eq!(
                    errors,
                    vec!["Setup 1: Channel 2 references unknown point 7".to_string()]
                );
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(quick_validate(&[]).is_err());
    }
}
