//! Prism volumes and roof slope lengths.

use crate::units::{CubicMeters, Meters, Millimeters};

/// Volume (m³) of a bar of section `a × b` mm and length `length` m.
///
/// # Formula
/// - V = a × b × (L × 1000) / 10⁹
///
/// ```rust
/// use estimate_core::equations::prism_volume_mm;
///
/// assert!((prism_volume_mm(50.0, 10.0, 2.0) - 0.001).abs() < 1e-15);
/// ```
#[inline]
pub fn prism_volume_mm(a_mm: f64, b_mm: f64, length_m: f64) -> f64 {
    let length: Millimeters = Meters(length_m).into();
    CubicMeters::from_mm(Millimeters(a_mm), Millimeters(b_mm), length).0
}

/// Length of a sloped roof face with horizontal run `run` and rise `rise`.
#[inline]
pub fn sloped_length(rise: f64, run: f64) -> f64 {
    rise.hypot(run)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_sloped_length() {
        assert_eq!(sloped_length(3.0, 4.0), 5.0);
        assert_eq!(sloped_length(0.0, 0.0), 0.0);
    }

    proptest! {
        #[test]
        fn prop_volume_formula(a in 0.0f64..1000.0, b in 0.0f64..1000.0, l in 0.0f64..100.0) {
            let v = prism_volume_mm(a, b, l);
            let expected = a * b * l * 1000.0 / 1e9;
            prop_assert!(v >= 0.0);
            prop_assert!((v - expected).abs() <= 1e-12 * expected.max(1.0));
        }

        #[test]
        fn prop_volume_monotonic(
            a in 0.0f64..1000.0,
            b in 0.0f64..1000.0,
            l in 0.0f64..100.0,
            da in 0.0f64..100.0,
            db in 0.0f64..100.0,
            dl in 0.0f64..10.0,
        ) {
            let base = prism_volume_mm(a, b, l);
            prop_assert!(prism_volume_mm(a + da, b, l) >= base);
            prop_assert!(prism_volume_mm(a, b + db, l) >= base);
            prop_assert!(prism_volume_mm(a, b, l + dl) >= base);
        }
    }
}
