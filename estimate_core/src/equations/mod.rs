//! # Estimate Equations
//!
//! The closed-form formula families shared by the calculator catalog. Each
//! calculator page hardcodes its own coefficients, but the building blocks
//! (rebar unit weight, stirrup counts, prism volumes, mortar take-off) live
//! here once.
//!
//! ## Modules
//!
//! - [`rebar`] - Reinforcement bar weights, stirrup/ring counts and weights
//! - [`geometry`] - Prism volumes and roof slope lengths
//! - [`masonry`] - Brick counts and cement-sand mortar take-off
//!
//! ## Division Guard
//!
//! Every denominator a user can set to zero goes through [`guarded_div`].
//! A zero spacing or trip volume yields `0`, never `NaN` or `Infinity`.

pub mod geometry;
pub mod masonry;
pub mod rebar;

pub use geometry::{prism_volume_mm, sloped_length};
pub use masonry::{brick_count, mortar_mix, MortarTakeoff};
pub use rebar::{rebar_unit_weight, rebar_weight, ring_weight, stirrup_count};

/// Divide, returning 0 when the denominator is zero or the result is not finite.
///
/// # Example
///
/// ```rust
/// use estimate_core::equations::guarded_div;
///
/// assert_eq!(guarded_div(10.0, 4.0), 2.5);
/// assert_eq!(guarded_div(10.0, 0.0), 0.0);
/// ```
#[inline]
pub fn guarded_div(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        return 0.0;
    }
    let q = numerator / denominator;
    if q.is_finite() {
        q
    } else {
        0.0
    }
}

/// Number of loads needed to haul `volume` in trips of `trip_volume`.
#[inline]
pub fn trips(volume: f64, trip_volume: f64) -> f64 {
    guarded_div(volume, trip_volume)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guarded_div() {
        assert_eq!(guarded_div(1.0, 0.0), 0.0);
        assert_eq!(guarded_div(0.0, 0.0), 0.0);
        assert_eq!(guarded_div(-3.0, 0.0), 0.0);
        assert_eq!(guarded_div(f64::MAX, 1e-300), 0.0);
        assert_eq!(guarded_div(9.0, 3.0), 3.0);
    }

    #[test]
    fn test_trips() {
        assert_eq!(trips(12.0, 4.0), 3.0);
        assert_eq!(trips(12.0, 0.0), 0.0);
    }
}
