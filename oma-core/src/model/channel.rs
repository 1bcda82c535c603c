//! Sensor channel definition.

use serde::{Deserialize, Serialize};

/// Global axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X = 1,
    Y = 2,
    Z = 3,
}

impl Axis {
    /// Axes in processing order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Index of the axis in a coordinate triple.
    pub fn index(&self) -> usize {
        *self as usize - 1
    }
}

/// Axis-aligned measuring direction of a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "x_pos")]
    PosX,
    #[serde(rename = "x_neg")]
    NegX,
    #[serde(rename = "y_pos")]
    PosY,
    #[serde(rename = "y_neg")]
    NegY,
    #[serde(rename = "z_pos")]
    PosZ,
    #[serde(rename = "z_neg")]
    NegZ,
}

impl Direction {
    /// All six directions.
    pub const ALL: [Direction; 6] = [
        Direction::PosX,
        Direction::NegX,
        Direction::PosY,
        Direction::NegY,
        Direction::PosZ,
        Direction::NegZ,
    ];

    /// Direction along `axis`, negative when `negative` is set.
    pub fn along(axis: Axis, negative: bool) -> Self {
        match (axis, negative) {
            (Axis::X, false) => Direction::PosX,
            (Axis::X, true) => Direction::NegX,
            (Axis::Y, false) => Direction::PosY,
            (Axis::Y, true) => Direction::NegY,
            (Axis::Z, false) => Direction::PosZ,
            (Axis::Z, true) => Direction::NegZ,
        }
    }

    /// Unit vector of this direction.
    pub fn vector(&self) -> [f64; 3] {
        match self {
            Direction::PosX => [1.0, 0.0, 0.0],
            Direction::NegX => [-1.0, 0.0, 0.0],
            Direction::PosY => [0.0, 1.0, 0.0],
            Direction::NegY => [0.0, -1.0, 0.0],
            Direction::PosZ => [0.0, 0.0, 1.0],
            Direction::NegZ => [0.0, 0.0, -1.0],
        }
    }

    /// Unit vector components as integers, as written to geometry files.
    pub fn components(&self) -> [i32; 3] {
        self.vector().map(|c| c as i32)
    }

    /// Symbol of this direction.
    pub fn symbol(&self) -> DirectionSymbol {
        match self {
            Direction::PosX => DirectionSymbol::U1,
            Direction::NegX => DirectionSymbol::NegU1,
            Direction::PosY => DirectionSymbol::U2,
            Direction::NegY => DirectionSymbol::NegU2,
            Direction::PosZ => DirectionSymbol::U3,
            Direction::NegZ => DirectionSymbol::NegU3,
        }
    }
}

/// Textual degree-of-freedom symbol (`U1`, `-U2`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DirectionSymbol {
    #[serde(rename = "U1")]
    U1,
    #[serde(rename = "U2")]
    U2,
    #[serde(rename = "U3")]
    U3,
    #[serde(rename = "-U1")]
    NegU1,
    #[serde(rename = "-U2")]
    NegU2,
    #[serde(rename = "-U3")]
    NegU3,
}

impl DirectionSymbol {
    /// Derive the symbol of a direction vector.
    ///
    /// Components are checked in the fixed order +X, +Y, +Z, -X, -Y, -Z and
    /// the first match wins, so a vector with several nonzero components
    /// resolves to the earliest entry of that order. The zero vector has no
    /// symbol.
    pub fn from_vector(vector: [f64; 3]) -> Option<Self> {
        const ORDER: [(usize, f64, DirectionSymbol); 6] = [
            (0, 1.0, DirectionSymbol::U1),
            (1, 1.0, DirectionSymbol::U2),
            (2, 1.0, DirectionSymbol::U3),
            (0, -1.0, DirectionSymbol::NegU1),
            (1, -1.0, DirectionSymbol::NegU2),
            (2, -1.0, DirectionSymbol::NegU3),
        ];

        ORDER
            .iter()
            .find(|(axis, sign, _)| vector[*axis] == *sign)
            .map(|(_, _, symbol)| *symbol)
    }

    /// Symbol text.
    pub fn as_str(&self) -> &'static str {
        match self {
            DirectionSymbol::U1 => "U1",
            DirectionSymbol::U2 => "U2",
            DirectionSymbol::U3 => "U3",
            DirectionSymbol::NegU1 => "-U1",
            DirectionSymbol::NegU2 => "-U2",
            DirectionSymbol::NegU3 => "-U3",
        }
    }
}

impl std::fmt::Display for DirectionSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A sensor channel placed on a point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    /// Channel number.
    pub number: u32,
    /// Label of the point carrying the sensor.
    pub point: String,
    /// Measuring direction.
    pub direction: Direction,
    /// Direction symbol, when the source provides one.
    pub symbol: Option<DirectionSymbol>,
}

impl Channel {
    /// Create a channel without a direction symbol.
    pub fn new(number: u32, point: impl Into<String>, direction: Direction) -> Self {
        Self {
            number,
            point: point.into(),
            direction,
            symbol: None,
        }
    }

    /// Create a channel whose symbol is derived from its direction vector.
    pub fn with_symbol(number: u32, point: impl Into<String>, direction: Direction) -> Self {
        Self {
            symbol: DirectionSymbol::from_vector(direction.vector()),
            ..Self::new(number, point, direction)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_direction_is_a_signed_unit_vector() {
        for direction in Direction::ALL {
            let v = direction.vector();
            let nonzero: Vec<f64> = v.iter().copied().filter(|c| *c != 0.0).collect();
            assert_eq!(nonzero.len(), 1, "{:?}", direction);
            assert_eq!(nonzero[0].abs(), 1.0);
        }
    }

    #[test]
    fn test_symbol_from_vector_matches_direction() {
        for direction in Direction::ALL {
            assert_eq!(
                DirectionSymbol::from_vector(direction.vector()),
                Some(direction.symbol())
            );
        }
    }

    #[test]
    fn test_symbol_priority_for_mixed_vectors() {
        // +Y is checked before -X.
        assert_eq!(
            DirectionSymbol::from_vector([-1.0, 1.0, 0.0]),
            Some(DirectionSymbol::U2)
        );
        // +Z is checked before -Y.
        assert_eq!(
            DirectionSymbol::from_vector([0.0, -1.0, 1.0]),
            Some(DirectionSymbol::U3)
        );
        assert_eq!(
            DirectionSymbol::from_vector([1.0, 1.0, 1.0]),
            Some(DirectionSymbol::U1)
        );
        assert_eq!(
            DirectionSymbol::from_vector([-1.0, -1.0, 0.0]),
            Some(DirectionSymbol::NegU1)
        );
        assert_eq!(DirectionSymbol::from_vector([0.0, 0.0, 0.0]), None);
    }

    #[test]
    fn test_direction_along_axis() {
        assert_eq!(Direction::along(Axis::Y, true), Direction::NegY);
        assert_eq!(Direction::along(Axis::Z, false), Direction::PosZ);
        assert_eq!(Direction::NegY.components(), [0, -1, 0]);
        assert_eq!(Axis::Z.index(), 2);
    }

    #[test]
    fn test_channel_with_symbol() {
        let channel = Channel::with_symbol(3, "J5", Direction::NegY);
        assert_eq!(channel.symbol, Some(DirectionSymbol::NegU2));
        assert_eq!(channel.symbol.unwrap().to_string(), "-U2");
        assert_eq!(Channel::new(1, "1", Direction::PosX).symbol, None);
    }
}
