//! Configuration constants and settings for the exporter.

use serde::{Deserialize, Serialize};

/// Decimal places used when rounding drawing coordinates into point keys.
pub const COORD_DECIMALS: usize = 6;

/// Significant digits kept when rounding model coordinates.
pub const SIGNIFICANT_DIGITS: usize = 6;

/// Load pattern holding the reference channels shared by every setup.
pub const REFERENCES_PATTERN: &str = "References";

/// Prefix of the numbered setup load patterns (`Setup_1`, `Setup_2`, ...).
pub const SETUP_PREFIX: &str = "Setup_";

/// Point group queried for channel-encoding loads.
pub const ALL_GROUP: &str = "ALL";

/// Object type reported by the analysis application for frame elements.
pub const FRAME_OBJECT_TYPE: i32 = 2;

/// Connectivity role of the first end of a frame.
pub const FRAME_END_START: i32 = 1;

/// Connectivity role of the second end of a frame.
pub const FRAME_END_FINISH: i32 = 2;

/// Unit systems understood by the analysis application (its `eUnits` codes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitSystem {
    #[serde(rename = "lb_in_F")]
    LbInF = 1,
    #[serde(rename = "lb_ft_F")]
    LbFtF = 2,
    #[serde(rename = "kip_in_F")]
    KipInF = 3,
    #[serde(rename = "kip_ft_F")]
    KipFtF = 4,
    #[serde(rename = "kN_mm_C")]
    KnMmC = 5,
    #[serde(rename = "kN_m_C")]
    KnMC = 6,
    #[serde(rename = "kgf_mm_C")]
    KgfMmC = 7,
    #[serde(rename = "kgf_m_C")]
    KgfMC = 8,
    #[serde(rename = "N_mm_C")]
    NMmC = 9,
    #[serde(rename = "N_m_C")]
    NMC = 10,
    #[serde(rename = "Ton_mm_C")]
    TonMmC = 11,
    #[serde(rename = "Ton_m_C")]
    TonMC = 12,
    #[serde(rename = "kN_cm_C")]
    KnCmC = 13,
    #[serde(rename = "kgf_cm_C")]
    KgfCmC = 14,
    #[serde(rename = "N_cm_C")]
    NCmC = 15,
    #[serde(rename = "Ton_cm_C")]
    TonCmC = 16,
}

impl UnitSystem {
    const ALL: [UnitSystem; 16] = [
        UnitSystem::LbInF,
        UnitSystem::LbFtF,
        UnitSystem::KipInF,
        UnitSystem::KipFtF,
        UnitSystem::KnMmC,
        UnitSystem::KnMC,
        UnitSystem::KgfMmC,
        UnitSystem::KgfMC,
        UnitSystem::NMmC,
        UnitSystem::NMC,
        UnitSystem::TonMmC,
        UnitSystem::TonMC,
        UnitSystem::KnCmC,
        UnitSystem::KgfCmC,
        UnitSystem::NCmC,
        UnitSystem::TonCmC,
    ];

    /// Look up a unit system by its numeric code.
    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.iter().copied().find(|u| u.code() == code)
    }

    /// Numeric code used by the application.
    pub fn code(&self) -> i32 {
        *self as i32
    }

    /// Name used by the application (e.g. `kN_m_C`).
    pub fn name(&self) -> &'static str {
        match self {
            UnitSystem::LbInF => "lb_in_F",
            UnitSystem::LbFtF => "lb_ft_F",
            UnitSystem::KipInF => "kip_in_F",
            UnitSystem::KipFtF => "kip_ft_F",
            UnitSystem::KnMmC => "kN_mm_C",
            UnitSystem::KnMC => "kN_m_C",
            UnitSystem::KgfMmC => "kgf_mm_C",
            UnitSystem::KgfMC => "kgf_m_C",
            UnitSystem::NMmC => "N_mm_C",
            UnitSystem::NMC => "N_m_C",
            UnitSystem::TonMmC => "Ton_mm_C",
            UnitSystem::TonMC => "Ton_m_C",
            UnitSystem::KnCmC => "kN_cm_C",
            UnitSystem::KgfCmC => "kgf_cm_C",
            UnitSystem::NCmC => "N_cm_C",
            UnitSystem::TonCmC => "Ton_cm_C",
        }
    }

    /// Newtons per force unit.
    pub fn force_to_newton(&self) -> f64 {
        match self {
            UnitSystem::LbInF | UnitSystem::LbFtF => 4.448_221_615_260_5,
            UnitSystem::KipInF | UnitSystem::KipFtF => 4_448.221_615_260_5,
            UnitSystem::KnMmC | UnitSystem::KnMC | UnitSystem::KnCmC => 1_000.0,
            UnitSystem::KgfMmC | UnitSystem::KgfMC | UnitSystem::KgfCmC => 9.806_65,
            UnitSystem::NMmC | UnitSystem::NMC | UnitSystem::NCmC => 1.0,
            UnitSystem::TonMmC | UnitSystem::TonMC | UnitSystem::TonCmC => 9_806.65,
        }
    }

    /// Meters per length unit.
    pub fn length_to_meter(&self) -> f64 {
        match self {
            UnitSystem::LbInF | UnitSystem::KipInF => 0.0254,
            UnitSystem::LbFtF | UnitSystem::KipFtF => 0.3048,
            UnitSystem::KnMmC | UnitSystem::KgfMmC | UnitSystem::NMmC | UnitSystem::TonMmC => {
                0.001
            }
            UnitSystem::KnMC | UnitSystem::KgfMC | UnitSystem::NMC | UnitSystem::TonMC => 1.0,
            UnitSystem::KnCmC | UnitSystem::KgfCmC | UnitSystem::NCmC | UnitSystem::TonCmC => 0.01,
        }
    }
}

impl std::fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Force unit in which channel numbers are encoded as load values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ForceUnit {
    /// Loads are read in kN (model units switched to kN-m-C for the query).
    #[default]
    KiloNewton,
    /// Loads are read in the model's present units, which are expected in N.
    Newton,
}

impl ForceUnit {
    /// Unit system to switch to while reading loads, if any.
    pub fn query_units(&self) -> Option<UnitSystem> {
        match self {
            ForceUnit::KiloNewton => Some(UnitSystem::KnMC),
            ForceUnit::Newton => None,
        }
    }
}

/// What to do when two force components encode the same channel number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CollisionPolicy {
    /// Keep the last component processed and log a warning.
    #[default]
    LastWriteWins,
    /// Abort with a `ChannelCollision` error.
    Reject,
}

/// Export configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Round model coordinates to `SIGNIFICANT_DIGITS` significant digits.
    pub round_coordinates: bool,
    /// Unit of the channel-encoding loads.
    pub force_unit: ForceUnit,
    /// Channel collision handling for force-encoded channels.
    pub collision_policy: CollisionPolicy,
    /// Point group whose loads are queried.
    pub load_group: String,
    /// Name of the reference load pattern.
    pub references_pattern: String,
    /// Prefix of the setup load patterns.
    pub setup_prefix: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            round_coordinates: true,
            force_unit: ForceUnit::default(),
            collision_policy: CollisionPolicy::default(),
            load_group: ALL_GROUP.to_string(),
            references_pattern: REFERENCES_PATTERN.to_string(),
            setup_prefix: SETUP_PREFIX.to_string(),
        }
    }
}

impl ExportConfig {
    /// Name of the `index`-th setup load pattern (1-based).
    pub fn setup_pattern(&self, index: usize) -> String {
        format!("{}{}", self.setup_prefix, index)
    }
}

/// Utility functions for coordinate rounding.
pub mod rounding {
    use super::{COORD_DECIMALS, SIGNIFICANT_DIGITS};

    /// Round to a number of decimal places (ties to even on the exact value).
    #[inline]
    pub fn round_decimals(value: f64, decimals: usize) -> f64 {
        if !value.is_finite() {
            return value;
        }
        format!("{:.*}", decimals, value).parse().unwrap_or(value)
    }

    /// Round to `COORD_DECIMALS` decimal places.
    #[inline]
    pub fn round_coord(value: f64) -> f64 {
        round_decimals(value, COORD_DECIMALS)
    }

    /// Round to a number of significant digits.
    #[inline]
    pub fn round_significant(value: f64, digits: usize) -> f64 {
        if value == 0.0 || !value.is_finite() || digits == 0 {
            return value;
        }
        format!("{:.*e}", digits - 1, value)
            .parse()
            .unwrap_or(value)
    }

    /// Round to `SIGNIFICANT_DIGITS` significant digits.
    #[inline]
    pub fn round_6_significant(value: f64) -> f64 {
        round_significant(value, SIGNIFICANT_DIGITS)
    }
}
