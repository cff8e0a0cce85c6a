//! # Steel Cutting Length and Weight
//!
//! Straight bars, closed stirrups and the reinforcement weight page.
//! Lengths are in metres, bar diameters in millimetres; weights use the
//! `d²/162.28` kg/m unit weight.

use super::{m, mm, nos};
use crate::equations::{rebar_unit_weight, rebar_weight};
use crate::formula::{FormInputs, FormulaCategory, FormulaSpec, InputField, OutputField, Unit};
use crate::units::{Meters, Millimeters};

pub(crate) fn specs() -> Vec<FormulaSpec> {
    vec![
        FormulaSpec::new("straight-bar", "Straight Bar", FormulaCategory::SteelCuttingLength, straight_bar)
            .field(m("barLength", "Length of Bar", "L"))
            .field(mm("diameter", "Diameter of Bar", "d"))
            .field(nos("noOfBars", "No. of Bars", "N"))
            .banner("totalWeight", 3),
        FormulaSpec::new("stirrups", "Stirrups", FormulaCategory::SteelCuttingLength, stirrups)
            .field(m("lengthA", "Length A", "A"))
            .field(m("lengthB", "Length B", "B"))
            .field(mm("diameter", "Diameter of Bar", "d"))
            .field(nos("noOfBars", "No. of Bars", "N"))
            .banner("totalWeight", 3),
        FormulaSpec::new(
            "reinforcement-weight",
            "Reinforcement Weight",
            FormulaCategory::SteelWeight,
            reinforcement_weight,
        )
        .field(InputField::number("wastage", "Wastage", "W", "%"))
        .field(mm("diameter", "Diameter", "d"))
        .field(m("length", "Length", "L"))
        .field(nos("noOfBars", "No. of Bars", "N"))
        .field(InputField::number("price", "Price", "R", "¤/Kg"))
        .banner("totalPrice", 3),
    ]
}

fn straight_bar(inputs: &FormInputs) -> Vec<OutputField> {
    let d = inputs.number("diameter");
    let total_length = inputs.number("barLength") * inputs.number("noOfBars");
    let weight = rebar_weight(Millimeters(d), Meters(total_length), 1.0);

    vec![
        OutputField::new("totalLength", "Total Length of Bar", Unit::Meter, "(L X N)", total_length),
        OutputField::new(
            "totalWeight",
            "Weight of the Bar",
            Unit::Kilogram,
            "(((L X N) X d X d) / 162.28)",
            weight.0,
        ),
    ]
}

fn stirrups(inputs: &FormInputs) -> Vec<OutputField> {
    let a = inputs.number("lengthA");
    let b = inputs.number("lengthB");
    let d = inputs.number("diameter");

    // Hooks add 10d; d is in mm while A and B are in m
    let each = 2.0 * a + 2.0 * b + 10.0 * d / 1000.0;
    let total_length = each * inputs.number("noOfBars");
    let weight = rebar_weight(Millimeters(d), Meters(total_length), 1.0);

    vec![
        OutputField::new(
            "lengthEach",
            "Length of Each Bar",
            Unit::Meter,
            "((2 X A) + (2 X B) + (10 X d / 1000))",
            each,
        ),
        OutputField::new(
            "totalLength",
            "Total Length of Bar",
            Unit::Meter,
            "(((2 X A) + (2 X B) + (10 X d / 1000)) X N)",
            total_length,
        ),
        OutputField::new(
            "totalWeight",
            "Weight of the Bar",
            Unit::Kilogram,
            "((((2 X A) + (2 X B) + (10 X d / 1000)) X N) X d X d) / 162.28",
            weight.0,
        ),
    ]
}

/// Wastage is recorded with the inputs but does not enter the formula.
fn reinforcement_weight(inputs: &FormInputs) -> Vec<OutputField> {
    let d = inputs.number("diameter");
    let length = inputs.number("length");
    let bars = inputs.number("noOfBars");

    let unit_weight = rebar_unit_weight(d);
    let single_rod = unit_weight * length;
    let total_weight = single_rod * bars;

    vec![
        OutputField::new("totalLength", "Total Length", Unit::Meter, "L X N", length * bars),
        OutputField::new("unitWeight", "Unit Weight (per m)", Unit::Kilogram, "d X d / 162.28", unit_weight),
        OutputField::new("singleRodWeight", "Single Rod Weight", Unit::Kilogram, "(d X d / 162.28) X L", single_rod),
        OutputField::new(
            "totalWeight",
            "Total Weight",
            Unit::Kilogram,
            "(d X d / 162.28) X L X N",
            total_weight,
        ),
        OutputField::new(
            "totalPrice",
            "Total Price",
            Unit::Currency,
            "(d X d / 162.28) X L X N X R",
            total_weight * inputs.number("price"),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{approx, run, value};

    #[test]
    fn test_straight_bar() {
        let out = run("straight-bar", &[("barLength", "12"), ("diameter", "12"), ("noOfBars", "5")]);
        assert_eq!(value(&out, "totalLength"), 60.0);
        approx(value(&out, "totalWeight"), 60.0 * 144.0 / 162.28);
        assert!((value(&out, "totalWeight") - 53.241).abs() < 1e-3);
    }

    #[test]
    fn test_stirrups_hook_allowance() {
        let out = run(
            "stirrups",
            &[("lengthA", "0.3"), ("lengthB", "0.45"), ("diameter", "8"), ("noOfBars", "20")],
        );
        let each = 0.6 + 0.9 + 0.08;
        approx(value(&out, "lengthEach"), each);
        approx(value(&out, "totalLength"), each * 20.0);
        approx(value(&out, "totalWeight"), each * 20.0 * 64.0 / 162.28);
    }

    #[test]
    fn test_reinforcement_weight_ignores_wastage() {
        let base = [("diameter", "10"), ("length", "12"), ("noOfBars", "5"), ("price", "70")];
        let without = run("reinforcement-weight", &base);
        let mut with_wastage = base.to_vec();
        with_wastage.push(("wastage", "5"));
        let with = run("reinforcement-weight", &with_wastage);

        assert_eq!(value(&without, "totalWeight"), value(&with, "totalWeight"));
        approx(value(&with, "singleRodWeight"), 100.0 / 162.28 * 12.0);
        approx(value(&with, "totalPrice"), 100.0 / 162.28 * 12.0 * 5.0 * 70.0);
        assert_eq!(value(&with, "totalLength"), 60.0);
    }
}
