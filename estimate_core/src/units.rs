//! # Unit Types
//!
//! Type-safe wrappers for the metric units used on site estimates. These are
//! plain f64 newtypes so JSON stays clean (just numbers).
//!
//! ## Conventions
//!
//! Calculator forms mix units the way site engineers write them:
//! - Bar diameters, member sections, spacings and brick sizes in millimetres
//! - Member lengths, wall dimensions and excavation sizes in metres
//! - Weights in kilograms, volumes in cubic metres
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::units::{Meters, Millimeters};
//!
//! let side = Millimeters(2500.0);
//! let side_m: Meters = side.into();
//! assert_eq!(side_m.0, 2.5);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// Rebar unit-weight divisor: `d²/162.28` gives kg per metre for a bar of
/// diameter `d` mm (steel at 7850 kg/m³).
pub const REBAR_UNIT_WEIGHT_DIVISOR: f64 = 162.28;

/// Rounded divisor used by the circular column pages.
pub const CIRCULAR_COLUMN_DIVISOR: f64 = 162.0;

/// Millimetres per metre
pub const MM_PER_M: f64 = 1000.0;

/// Cubic millimetres per cubic metre
pub const MM3_PER_M3: f64 = 1.0e9;

// ============================================================================
// Length Units
// ============================================================================

/// Length in millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

/// Length in metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

impl From<Millimeters> for Meters {
    fn from(mm: Millimeters) -> Self {
        Meters(mm.0 / MM_PER_M)
    }
}

impl From<Meters> for Millimeters {
    fn from(m: Meters) -> Self {
        Millimeters(m.0 * MM_PER_M)
    }
}

// ============================================================================
// Area / Volume Units
// ============================================================================

/// Area in square metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SquareMeters(pub f64);

impl SquareMeters {
    /// Area of a rectangle given its sides in metres
    pub fn from_sides(a: Meters, b: Meters) -> Self {
        SquareMeters(a.0 * b.0)
    }
}

/// Volume in cubic metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicMeters(pub f64);

impl CubicMeters {
    /// Volume of a prism given its three edges in millimetres
    pub fn from_mm(a: Millimeters, b: Millimeters, c: Millimeters) -> Self {
        CubicMeters(a.0 * b.0 * c.0 / MM3_PER_M3)
    }

    /// Volume in litres
    pub fn litres(self) -> f64 {
        self.0 * 1000.0
    }
}

// ============================================================================
// Mass Units
// ============================================================================

/// Mass in kilograms
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilograms(pub f64);

// ============================================================================
// Unit System
// ============================================================================

/// Input unit system offered by the roof and tank pages.
///
/// Metric inputs are entered in millimetres and converted to metres; imperial
/// inputs are used as entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    /// Parse the select value used by the forms. Anything other than
    /// "imperial" is metric.
    pub fn from_select(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("imperial") {
            UnitSystem::Imperial
        } else {
            UnitSystem::Metric
        }
    }

    /// Convert an entered length to the working length
    pub fn to_working_length(self, entered: f64) -> f64 {
        match self {
            UnitSystem::Metric => entered / MM_PER_M,
            UnitSystem::Imperial => entered,
        }
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Millimeters);
impl_arithmetic!(Meters);
impl_arithmetic!(SquareMeters);
impl_arithmetic!(CubicMeters);
impl_arithmetic!(Kilograms);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_conversion() {
        let m: Meters = Millimeters(450.0).into();
        assert!((m.0 - 0.45).abs() < 1e-12);

        let mm: Millimeters = Meters(2.0).into();
        assert_eq!(mm.0, 2000.0);
    }

    #[test]
    fn test_prism_volume_from_mm() {
        let v = CubicMeters::from_mm(Millimeters(50.0), Millimeters(10.0), Millimeters(2000.0));
        assert!((v.0 - 0.001).abs() < 1e-15);
        assert!((v.litres() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_arithmetic() {
        let total = Kilograms(7.85) * 10.0;
        assert!((total.value() - 78.5).abs() < 1e-12);
        let sum = Meters(1.5) + Meters(2.5);
        assert_eq!(sum, Meters(4.0));
        let floor = SquareMeters::from_sides(Meters(4.0), Meters(2.5)) - SquareMeters(1.0);
        assert_eq!(floor, SquareMeters(9.0));
    }

    #[test]
    fn test_unit_system_select() {
        assert_eq!(UnitSystem::from_select("imperial"), UnitSystem::Imperial);
        assert_eq!(UnitSystem::from_select("metric"), UnitSystem::Metric);
        assert_eq!(UnitSystem::from_select(""), UnitSystem::Metric);
        assert_eq!(UnitSystem::Metric.to_working_length(1500.0), 1.5);
        assert_eq!(UnitSystem::Imperial.to_working_length(1500.0), 1500.0);
    }

    #[test]
    fn test_serialization_is_transparent() {
        let json = serde_json::to_string(&CubicMeters(0.25)).unwrap();
        assert_eq!(json, "0.25");
        let json = serde_json::to_string(&UnitSystem::Imperial).unwrap();
        assert_eq!(json, "\"imperial\"");
    }
}
