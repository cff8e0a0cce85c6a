//! # Brickwork Formulas
//!
//! Brick and joint sizes are given in millimetres; wall volumes in m³.
//!
//! - No. of bricks = V / ((L + j) × W × (T + j))
//! - Mortar dry volume = (V − bricks × L × W × T) × 1.42
//! - Cement bags = c × dry / ((c + s) × 0.035)
//! - Sand (m³) = s × dry / (c + s)

use serde::{Deserialize, Serialize};

use super::guarded_div;
use crate::materials::MORTAR;
use crate::units::{Meters, Millimeters};

/// Number of bricks of size `L × W × T` (mm) with joint `j` (mm) in volume `v` (m³).
///
/// Returns 0 when the brick-plus-joint cell has no volume.
pub fn brick_count(volume_m3: f64, l: Millimeters, w: Millimeters, t: Millimeters, joint: Millimeters) -> f64 {
    let (l, w, t, j) = to_m(l, w, t, joint);
    let cell = (l + j) * w * (t + j);
    if cell > 0.0 {
        volume_m3 / cell
    } else {
        0.0
    }
}

/// Volume (m³) of `count` bricks without mortar
pub fn brick_solid_volume(count: f64, l: Millimeters, w: Millimeters, t: Millimeters) -> f64 {
    let (l, w, t, _) = to_m(l, w, t, Millimeters(0.0));
    count * l * w * t
}

fn to_m(l: Millimeters, w: Millimeters, t: Millimeters, j: Millimeters) -> (f64, f64, f64, f64) {
    (
        Meters::from(l).0,
        Meters::from(w).0,
        Meters::from(t).0,
        Meters::from(j).0,
    )
}

/// Result of a cement-sand mortar take-off
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MortarTakeoff {
    /// Dry mortar volume (m³)
    pub dry_volume_m3: f64,
    /// 50 kg cement bags
    pub cement_bags: f64,
    /// Sand volume (m³)
    pub sand_m3: f64,
}

/// Mortar take-off for the joints of a wall.
///
/// `wall_volume` minus `brick_volume` is the wet mortar volume; cement and
/// sand split the dry volume by the `cement : sand` ratio. A `0 : 0` ratio
/// yields no cement and no sand.
pub fn mortar_mix(wall_volume_m3: f64, brick_volume_m3: f64, cement_part: f64, sand_part: f64) -> MortarTakeoff {
    let dry = (wall_volume_m3 - brick_volume_m3) * MORTAR.dry_volume_factor;
    let parts = cement_part + sand_part;
    let (cement_bags, sand_m3) = if parts > 0.0 {
        (
            guarded_div(cement_part * dry, parts * MORTAR.cement_bag_volume_m3),
            guarded_div(sand_part * dry, parts),
        )
    } else {
        (0.0, 0.0)
    };
    MortarTakeoff {
        dry_volume_m3: dry,
        cement_bags,
        sand_m3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mm(v: f64) -> Millimeters {
        Millimeters(v)
    }

    #[test]
    fn test_brick_count_standard_brick() {
        // 190 × 90 × 90 with 10 mm joints: cell = 0.2 × 0.09 × 0.1 = 0.0018 m³
        let n = brick_count(1.0, mm(190.0), mm(90.0), mm(90.0), mm(10.0));
        assert!((n - 1.0 / 0.0018).abs() < 1e-6);
    }

    #[test]
    fn test_brick_count_zero_cell() {
        assert_eq!(brick_count(5.0, mm(0.0), mm(0.0), mm(0.0), mm(0.0)), 0.0);
        assert_eq!(brick_count(5.0, mm(190.0), mm(0.0), mm(90.0), mm(10.0)), 0.0);
    }

    #[test]
    fn test_mortar_mix_one_to_six() {
        let m = mortar_mix(1.0, 0.8, 1.0, 6.0);
        assert!((m.dry_volume_m3 - 0.284).abs() < 1e-12);
        assert!((m.cement_bags - 0.284 / (7.0 * 0.035)).abs() < 1e-12);
        assert!((m.sand_m3 - 6.0 * 0.284 / 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_mortar_mix_zero_ratio() {
        let m = mortar_mix(1.0, 0.8, 0.0, 0.0);
        assert_eq!(m.cement_bags, 0.0);
        assert_eq!(m.sand_m3, 0.0);
    }
}
