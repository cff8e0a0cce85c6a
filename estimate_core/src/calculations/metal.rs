//! # Metal Quantity
//!
//! Weight and price of solid flat bars and hollow pipes.
//!
//! The metal select fills the density field with the tabulated density of
//! the chosen metal; the user can still type a different density afterwards.
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::catalog;
//! use estimate_core::formula::FormInputs;
//!
//! let spec = catalog::get("flat-bar-metal").unwrap();
//! let mut inputs = spec.default_inputs();
//! for (k, v) in [("sideA", "50"), ("sideB", "10"), ("lengthL", "2"), ("noOfUnits", "10"), ("rateOfMetal", "60")] {
//!     inputs.set(k, v);
//! }
//! let outputs = spec.evaluate(&inputs);
//! let price = spec.banner_output(&outputs).unwrap().value;
//! assert!((price - 4710.0).abs() < 1e-6);
//! ```

use std::f64::consts::PI;

use super::{m, mm, nos};
use crate::equations::prism_volume_mm;
use crate::formula::{FormInputs, FormulaCategory, FormulaSpec, InputField, OutputField, SelectOption, Unit};
use crate::materials::MetalType;

pub(crate) fn specs() -> Vec<FormulaSpec> {
    vec![
        FormulaSpec::new("flat-bar-metal", "Flat Bar Metal", FormulaCategory::Metal, flat_bar)
            .field(mm("sideA", "Side a", "a"))
            .field(mm("sideB", "Side b", "b"))
            .field(m("lengthL", "Length L", "L"))
            .field(nos("noOfUnits", "No. of Units", "N"))
            .field(rate_of_metal())
            .field(metal_select())
            .field(density_field())
            .banner("totalPrice", 2),
        FormulaSpec::new("pipe-metal", "Pipe Metal", FormulaCategory::Metal, pipe)
            .field(mm("d1", "Outer Diameter D1", "D1"))
            .field(mm("d2", "Inner Diameter D2", "D2"))
            .field(m("height", "Height H", "H"))
            .field(nos("noOfUnits", "No. of Units", "N"))
            .field(rate_of_metal())
            .field(metal_select())
            .field(density_field())
            .banner("totalPrice", 2),
    ]
}

fn rate_of_metal() -> InputField {
    InputField::number("rateOfMetal", "Rate of Metal", "R", "¤/Kg")
}

fn metal_select() -> InputField {
    let options = MetalType::ALL
        .iter()
        .map(|metal| SelectOption::new(metal.value(), metal.display_name()).fills("density", metal.density_field_value()))
        .collect();
    InputField::select("metalType", "Metal", options, MetalType::default().value())
}

fn density_field() -> InputField {
    InputField::number("density", "Density", "ρ", "kg/m³").with_default(MetalType::default().density_field_value())
}

/// Unit weight, total weight and price shared by both pages
fn weight_and_price(volume_per_unit: f64, inputs: &FormInputs) -> [OutputField; 3] {
    let density = inputs.number("density");
    let units = inputs.number("noOfUnits");
    let rate = inputs.number("rateOfMetal");

    let unit_weight = volume_per_unit * density;
    let total_weight = unit_weight * units;
    [
        OutputField::new("unitWeight", "Unit Weight", Unit::Kilogram, "V X ρ", unit_weight),
        OutputField::new("totalWeight", "Total Weight", Unit::Kilogram, "V X ρ X N", total_weight),
        OutputField::new("totalPrice", "Total Price", Unit::Currency, "V X ρ X N X R", total_weight * rate),
    ]
}

fn flat_bar(inputs: &FormInputs) -> Vec<OutputField> {
    let volume = prism_volume_mm(inputs.number("sideA"), inputs.number("sideB"), inputs.number("lengthL"));

    let mut outputs = vec![OutputField::new(
        "volume",
        "Volume per Unit",
        Unit::CubicMeter,
        "V = a X b X (L X 1000) / 10^9",
        volume,
    )];
    outputs.extend(weight_and_price(volume, inputs));
    outputs
}

fn pipe(inputs: &FormInputs) -> Vec<OutputField> {
    let d1 = inputs.number("d1");
    let d2 = inputs.number("d2");
    let height = inputs.number("height");

    // D2 > D1 gives a negative area; it is reported as entered
    let area = PI / 4.0 * (d1 * d1 - d2 * d2);
    let volume = area / 1.0e6 * height;

    let mut outputs = vec![
        OutputField::new("area", "Cross-section Area", Unit::SquareMillimeter, "A = π/4 X (D1² - D2²)", area),
        OutputField::new("volume", "Volume per Unit", Unit::CubicMeter, "V = A / 10^6 X H", volume),
    ];
    outputs.extend(weight_and_price(volume, inputs));
    outputs
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{approx, run, value};

    const FLAT_BAR: [(&str, &str); 6] = [
        ("sideA", "50"),
        ("sideB", "10"),
        ("lengthL", "2"),
        ("noOfUnits", "10"),
        ("rateOfMetal", "60"),
        ("density", "7850"),
    ];

    #[test]
    fn test_flat_bar_steel() {
        let out = run("flat-bar-metal", &FLAT_BAR);
        approx(value(&out, "volume"), 0.001);
        approx(value(&out, "unitWeight"), 7.85);
        approx(value(&out, "totalWeight"), 78.5);
        approx(value(&out, "totalPrice"), 4710.0);
    }

    #[test]
    fn test_flat_bar_zero_units_gives_zero_totals() {
        let mut pairs = FLAT_BAR.to_vec();
        pairs[3] = ("noOfUnits", "");
        let out = run("flat-bar-metal", &pairs);
        approx(value(&out, "unitWeight"), 7.85);
        assert_eq!(value(&out, "totalWeight"), 0.0);
        assert_eq!(value(&out, "totalPrice"), 0.0);
    }

    #[test]
    fn test_pipe_aluminum() {
        let out = run(
            "pipe-metal",
            &[
                ("d1", "100"),
                ("d2", "80"),
                ("height", "3"),
                ("noOfUnits", "2"),
                ("rateOfMetal", "200"),
                ("density", "2700"),
            ],
        );
        let area = std::f64::consts::PI / 4.0 * (100.0 * 100.0 - 80.0 * 80.0);
        approx(value(&out, "area"), area);
        approx(value(&out, "volume"), area / 1.0e6 * 3.0);
        approx(value(&out, "totalWeight"), area / 1.0e6 * 3.0 * 2700.0 * 2.0);
        approx(value(&out, "totalPrice"), area / 1.0e6 * 3.0 * 2700.0 * 2.0 * 200.0);
    }

    #[test]
    fn test_pipe_inner_larger_than_outer_is_negative() {
        let out = run("pipe-metal", &[("d1", "10"), ("d2", "20"), ("height", "1")]);
        assert!(value(&out, "area") < 0.0);
    }
}
