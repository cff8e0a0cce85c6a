//! # Reinforcement Formulas
//!
//! ## Notation
//!
//! - `d` = Bar diameter (mm)
//! - `L` = Bar length (m)
//! - `N` = Number of bars
//! - `S` = Stirrup/ring spacing (mm)
//! - `R` = Ring (stirrup) bar diameter (mm)
//!
//! ## Unit Weight Constant
//!
//! `d²/162.28` is the weight in kg per metre of a round steel bar. It comes
//! from `π/4 · d² · 7850 / 10⁶` with `d` in mm.

use super::guarded_div;
use crate::units::{Kilograms, Meters, Millimeters, REBAR_UNIT_WEIGHT_DIVISOR};

/// Weight per metre of a bar of diameter `d` mm (kg/m)
///
/// ```rust
/// use estimate_core::equations::rebar_unit_weight;
///
/// let w = rebar_unit_weight(12.0);
/// assert!((w - 144.0 / 162.28).abs() < 1e-12);
/// ```
#[inline]
pub fn rebar_unit_weight(d_mm: f64) -> f64 {
    d_mm * d_mm / REBAR_UNIT_WEIGHT_DIVISOR
}

/// Total weight of `count` bars of diameter `d` and length `length`.
///
/// # Formula
/// - W = (d²/162.28) × L × N
pub fn rebar_weight(d: Millimeters, length: Meters, count: f64) -> Kilograms {
    Kilograms(rebar_unit_weight(d.0) * length.0 * count)
}

/// Number of stirrups (or rings) along a span.
///
/// # Formula
/// - n = span/S + 1 for S > 0
/// - n = 0 for S = 0
///
/// The count is intentionally not floored: fractional stirrups carry through
/// to the weight.
///
/// ```rust
/// use estimate_core::equations::stirrup_count;
///
/// assert_eq!(stirrup_count(3000.0, 150.0), 21.0);
/// assert_eq!(stirrup_count(3000.0, 0.0), 0.0);
/// assert_eq!(stirrup_count(1000.0, 300.0), 1000.0 / 300.0 + 1.0);
/// ```
#[inline]
pub fn stirrup_count(span_mm: f64, spacing_mm: f64) -> f64 {
    if spacing_mm > 0.0 {
        guarded_div(span_mm, spacing_mm) + 1.0
    } else {
        0.0
    }
}

/// Weight of a set of rings.
///
/// # Formula
/// - W = cutting length × count × (R²/divisor) × units
///
/// `divisor` is normally [`REBAR_UNIT_WEIGHT_DIVISOR`]; the circular column
/// pages pass the rounded 162.
#[inline]
pub fn ring_weight(cutting_length_m: f64, count: f64, ring_d_mm: f64, units: f64, divisor: f64) -> f64 {
    cutting_length_m * count * guarded_div(ring_d_mm * ring_d_mm, divisor) * units
}
