//! # Calculator Pages
//!
//! Every calculator page is a [`FormulaSpec`] built here. Each submodule
//! owns one family of pages and follows the same pattern:
//!
//! - one pure compute function per page, `fn(&FormInputs) -> Vec<OutputField>`
//! - `specs()` returning the page definitions (input schema + compute fn)
//!
//! Pages never fail: inputs are coerced (invalid reads as 0) and every
//! division by a user-supplied value is guarded.
//!
//! ## Available Families
//!
//! - [`metal`] - Flat bar and pipe metal quantities
//! - [`steel`] - Cutting length and reinforcement weight
//! - [`column`] - Column vertical bars, stirrups and rings
//! - [`beam`] - Beam, slab and footing reinforcement
//! - [`brickwork`] - Bricks, mortar and closers
//! - [`excavation`] - Earthwork volume and truck trips
//! - [`flooring`] - Tiles, pavers and grout
//! - [`roof`] - Roof surface areas
//! - [`water`] - Water tank, swimming pool and water proofing
//! - [`concrete`] - Concrete by volume

pub mod beam;
pub mod brickwork;
pub mod column;
pub mod concrete;
pub mod excavation;
pub mod flooring;
pub mod metal;
pub mod roof;
pub mod steel;
pub mod water;

pub use concrete::concrete_share_label;

use crate::formula::{FormulaSpec, InputField};

/// All page definitions, in declaration order
pub(crate) fn specs() -> Vec<FormulaSpec> {
    let mut specs = Vec::new();
    specs.extend(steel::specs());
    specs.extend(column::specs());
    specs.extend(beam::specs());
    specs.extend(metal::specs());
    specs.extend(brickwork::specs());
    specs.extend(concrete::specs());
    specs.extend(excavation::specs());
    specs.extend(flooring::specs());
    specs.extend(roof::specs());
    specs.extend(water::specs());
    specs
}

// ============================================================================
// Shared field builders
// ============================================================================

/// Millimetre dimension
pub(crate) fn mm(key: &'static str, label: &'static str, symbol: &'static str) -> InputField {
    InputField::number(key, label, symbol, "mm")
}

/// Metre dimension
pub(crate) fn m(key: &'static str, label: &'static str, symbol: &'static str) -> InputField {
    InputField::number(key, label, symbol, "m")
}

/// Count of pieces
pub(crate) fn nos(key: &'static str, label: &'static str, symbol: &'static str) -> InputField {
    InputField::number(key, label, symbol, "Nos")
}

/// Price per kilogram of steel
pub(crate) fn steel_rate(key: &'static str) -> InputField {
    InputField::number(key, "Rate of Steel", "r", "¤/Kg")
}

/// Money amount with a per-unit suffix, e.g. `price("price", "Price per Trip", "P", "¤/trip")`
pub(crate) fn price(key: &'static str, label: &'static str, symbol: &'static str, unit: &'static str) -> InputField {
    InputField::number(key, label, symbol, unit)
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::formula::{FormInputs, OutputField};

    /// Evaluate page `id` over `pairs`
    pub fn run(id: &str, pairs: &[(&str, &str)]) -> Vec<OutputField> {
        let spec = crate::catalog::get(id).unwrap();
        spec.evaluate(&FormInputs::from_pairs(pairs.iter().copied()))
    }

    /// Value of output `key`
    pub fn value(outputs: &[OutputField], key: &str) -> f64 {
        outputs
            .iter()
            .find(|o| o.key == key)
            .unwrap_or_else(|| panic!("no output '{}'", key))
            .value
    }

    pub fn approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= 1e-6 * expected.abs().max(1.0),
            "expected {} got {}",
            expected,
            actual
        );
    }
}
