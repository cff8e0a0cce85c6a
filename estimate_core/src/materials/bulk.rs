//! Bulk site materials and mortar constants.
//!
//! Values are the site-practice figures the estimate pages use; they are not
//! configurable.

use serde::{Deserialize, Serialize};

/// Loose bulk materials with a fixed site density
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BulkMaterial {
    Cement,
    Sand,
    /// Sand bed under floor tiles
    FlooringSand,
    Aggregate,
    Grout,
    Water,
}

impl BulkMaterial {
    /// Density in kg/m³
    pub const fn density_kg_m3(&self) -> f64 {
        match self {
            BulkMaterial::Cement => 1440.0,
            BulkMaterial::Sand => 1600.0,
            BulkMaterial::FlooringSand => 1550.0,
            BulkMaterial::Aggregate => 1500.0,
            BulkMaterial::Grout => 1600.0,
            BulkMaterial::Water => 1000.0,
        }
    }
}

/// Constants for cement-sand mortar take-offs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MortarConstants {
    /// Wet-to-dry volume factor
    pub dry_volume_factor: f64,
    /// Volume of one 50 kg cement bag (m³)
    pub cement_bag_volume_m3: f64,
    /// Weight of one cement bag (kg)
    pub cement_bag_weight_kg: f64,
}

pub const MORTAR: MortarConstants = MortarConstants {
    dry_volume_factor: 1.42,
    cement_bag_volume_m3: 0.035,
    cement_bag_weight_kg: 50.0,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bulk_densities() {
        assert_eq!(BulkMaterial::Cement.density_kg_m3(), 1440.0);
        assert_eq!(BulkMaterial::Grout.density_kg_m3(), BulkMaterial::Sand.density_kg_m3());
        assert_eq!(BulkMaterial::FlooringSand.density_kg_m3(), 1550.0);
    }

    #[test]
    fn test_one_bag_is_fifty_kilos_of_cement() {
        // 0.035 m³ × 1440 kg/m³ ≈ 50 kg
        let kg = MORTAR.cement_bag_volume_m3 * BulkMaterial::Cement.density_kg_m3();
        assert!((kg - MORTAR.cement_bag_weight_kg).abs() < 0.5);
    }
}
