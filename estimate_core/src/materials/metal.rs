//! Metal density table (kg/m³) for the metal quantity calculators.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::CalcError;

/// Metal types offered by the flat bar and pipe pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetalType {
    #[default]
    Steel,
    Aluminum,
    Copper,
    Brass,
    StainlessSteel,
}

/// Read-only density lookup, built once on first use.
pub static METAL_DENSITIES: Lazy<BTreeMap<MetalType, f64>> = Lazy::new(|| {
    BTreeMap::from([
        (MetalType::Steel, 7850.0),
        (MetalType::Aluminum, 2700.0),
        (MetalType::Copper, 8960.0),
        (MetalType::Brass, 8500.0),
        (MetalType::StainlessSteel, 8000.0),
    ])
});

/// Density of a metal in kg/m³
pub fn density_kg_m3(metal: MetalType) -> f64 {
    METAL_DENSITIES.get(&metal).copied().unwrap_or_default()
}

impl MetalType {
    /// All metal types in the order the select shows them
    pub const ALL: [MetalType; 5] = [
        MetalType::Steel,
        MetalType::Aluminum,
        MetalType::Copper,
        MetalType::Brass,
        MetalType::StainlessSteel,
    ];

    /// Select value (matches the serde representation)
    pub fn value(&self) -> &'static str {
        match self {
            MetalType::Steel => "steel",
            MetalType::Aluminum => "aluminum",
            MetalType::Copper => "copper",
            MetalType::Brass => "brass",
            MetalType::StainlessSteel => "stainless_steel",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            MetalType::Steel => "Steel",
            MetalType::Aluminum => "Aluminum",
            MetalType::Copper => "Copper",
            MetalType::Brass => "Brass",
            MetalType::StainlessSteel => "Stainless Steel",
        }
    }

    /// Density formatted the way the density field shows it ("7850.00")
    pub fn density_field_value(&self) -> String {
        format!("{:.2}", density_kg_m3(*self))
    }
}

impl fmt::Display for MetalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for MetalType {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        MetalType::ALL
            .into_iter()
            .find(|m| m.value() == wanted)
            .ok_or_else(|| CalcError::material_not_found(s))
    }
}
