//! # Concrete by Volume
//!
//! Material take-off for a nominal M10 mix of `1 : 3.92 : 5.62` plus 0.01
//! parts of admixture (10.55 parts in all).
//!
//! ```text
//! material volume = parts / 10.55 × V × dry factor
//! cement (kg)     = cement volume × 1440
//! water (L)       = cement volume × w/c × 1000
//! ```
//!
//! ## Fallbacks
//!
//! Blank or zero inputs fall back to the worked example: V = 5.097 m³,
//! dry factor 1.55, w/c 0.55 and 1 % admixture.

use crate::formula::{FormInputs, FormulaCategory, FormulaSpec, InputField, OutputField, Unit};
use crate::materials::{BulkMaterial, MORTAR};
use crate::units::CubicMeters;

const CEMENT_PARTS: f64 = 1.0;
const SAND_PARTS: f64 = 3.92;
const AGGREGATE_PARTS: f64 = 5.62;
const ADMIXTURE_PARTS: f64 = 0.01;
const TOTAL_PARTS: f64 = CEMENT_PARTS + SAND_PARTS + AGGREGATE_PARTS + ADMIXTURE_PARTS;

const DEFAULT_VOLUME_M3: f64 = 5.097;
const DEFAULT_DRY_FACTOR: f64 = 1.55;
const DEFAULT_WATER_CEMENT_RATIO: f64 = 0.55;
const DEFAULT_ADMIXTURE_PERCENT: f64 = 1.0;

pub(crate) fn specs() -> Vec<FormulaSpec> {
    vec![FormulaSpec::new("concrete-by-volume", "Concrete by Volume", FormulaCategory::Concrete, by_volume)
        .field(InputField::number("volume", "Volume of Concrete", "V", "m³"))
        .field(InputField::number("dryVolume", "Dry Volume Factor", "Dv", ""))
        .field(InputField::number("waterCementRatio", "Water Cement Ratio", "w/c", ""))
        .field(InputField::number("admixture", "Admixture", "Ad", "%"))
        .banner("cementBags", 3)]
}

/// Format a material's share of the total mix mass for display.
///
/// Below 10 % the share is rounded to one decimal and a trailing ".0" is
/// dropped; from 10 % up it is rounded to a whole number.
///
/// ```rust
/// use estimate_core::calculations::concrete_share_label;
///
/// assert_eq!(concrete_share_label(8.6194), "8.6");
/// assert_eq!(concrete_share_label(4.98), "5");
/// assert_eq!(concrete_share_label(37.54), "38");
/// ```
pub fn concrete_share_label(percent: f64) -> String {
    if percent < 10.0 {
        let rounded = (percent * 10.0).round() / 10.0;
        if rounded.fract() == 0.0 {
            format!("{}", rounded as i64)
        } else {
            format!("{:.1}", rounded)
        }
    } else {
        format!("{}", percent.round() as i64)
    }
}

fn by_volume(inputs: &FormInputs) -> Vec<OutputField> {
    let volume = inputs.number_or("volume", DEFAULT_VOLUME_M3);
    let dry = inputs.number_or("dryVolume", DEFAULT_DRY_FACTOR);
    let wcr = inputs.number_or("waterCementRatio", DEFAULT_WATER_CEMENT_RATIO);
    let admixture_ratio = inputs.number_or("admixture", DEFAULT_ADMIXTURE_PERCENT) / 100.0;

    let dry_volume = |parts: f64| parts / TOTAL_PARTS * volume * dry;
    let cement_m3 = dry_volume(CEMENT_PARTS);
    let sand_m3 = dry_volume(SAND_PARTS);
    let aggregate_m3 = dry_volume(AGGREGATE_PARTS);

    let cement_kg = cement_m3 * BulkMaterial::Cement.density_kg_m3();
    let admixture_kg = cement_kg * admixture_ratio;
    let water_l = CubicMeters(cement_m3 * wcr).litres();
    let sand_kg = sand_m3 * BulkMaterial::Sand.density_kg_m3();
    let aggregate_kg = aggregate_m3 * BulkMaterial::Aggregate.density_kg_m3();

    // One litre of water weighs one kilogram
    let total_kg = cement_kg + sand_kg + aggregate_kg + admixture_kg + water_l;
    let share = |kg: f64| if total_kg > 0.0 { kg / total_kg * 100.0 } else { 0.0 };

    vec![
        OutputField::new("cementVolume", "Cement Volume", Unit::CubicMeter, "(1 / 10.55) X V X Dv", cement_m3),
        OutputField::new("cementWeight", "Cement", Unit::Kilogram, "Cement Volume X 1440", cement_kg),
        OutputField::new(
            "cementBags",
            "Cement Bags",
            Unit::Bags,
            "Cement Weight / 50",
            cement_kg / MORTAR.cement_bag_weight_kg,
        ),
        OutputField::new("sandVolume", "Sand", Unit::CubicMeter, "(3.92 / 10.55) X V X Dv", sand_m3),
        OutputField::new("aggregateVolume", "Aggregate", Unit::CubicMeter, "(5.62 / 10.55) X V X Dv", aggregate_m3),
        OutputField::new("admixtureWeight", "Admixture", Unit::Kilogram, "Cement Weight X Ad / 100", admixture_kg),
        OutputField::new("waterQuantity", "Water", Unit::Litre, "Cement Volume X w/c X 1000", water_l),
        OutputField::new("cementShare", "Cement Share", Unit::Percent, "Cement (kg) / Total (kg) X 100", share(cement_kg)),
        OutputField::new("sandShare", "Sand Share", Unit::Percent, "Sand Volume X 1600 / Total (kg) X 100", share(sand_kg)),
        OutputField::new(
            "aggregateShare",
            "Aggregate Share",
            Unit::Percent,
            "Aggregate Volume X 1500 / Total (kg) X 100",
            share(aggregate_kg),
        ),
        OutputField::new(
            "admixtureShare",
            "Admixture Share",
            Unit::Percent,
            "Admixture (kg) / Total (kg) X 100",
            share(admixture_kg),
        ),
        OutputField::new("waterShare", "Water Share", Unit::Percent, "Water (L) / Total (kg) X 100", share(water_l)),
    ]
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{approx, run, value};
    use super::*;

    #[test]
    fn test_blank_inputs_use_worked_example() {
        let out = run("concrete-by-volume", &[]);
        let cement_m3 = 5.097 * 1.55 / 10.55;
        approx(value(&out, "cementVolume"), cement_m3);
        approx(value(&out, "cementWeight"), cement_m3 * 1440.0);
        approx(value(&out, "cementBags"), cement_m3 * 1440.0 / 50.0);
        approx(value(&out, "admixtureWeight"), cement_m3 * 1440.0 * 0.01);
        approx(value(&out, "waterQuantity"), cement_m3 * 0.55 * 1000.0);
    }

    #[test]
    fn test_share_labels_for_worked_example() {
        let out = run("concrete-by-volume", &[("volume", "0"), ("admixture", "abc")]);
        let labels: Vec<String> = ["cementShare", "sandShare", "aggregateShare", "admixtureShare", "waterShare"]
            .iter()
            .map(|k| concrete_share_label(value(&out, k)))
            .collect();
        assert_eq!(labels, vec!["8.6", "38", "50", "0.1", "3.3"]);
    }

    #[test]
    fn test_shares_sum_to_hundred() {
        let out = run("concrete-by-volume", &[("volume", "2"), ("waterCementRatio", "0.45"), ("admixture", "2")]);
        let total: f64 = ["cementShare", "sandShare", "aggregateShare", "admixtureShare", "waterShare"]
            .iter()
            .map(|k| value(&out, k))
            .sum();
        approx(total, 100.0);
    }

    #[test]
    fn test_share_label_boundaries() {
        assert_eq!(concrete_share_label(9.96), "10");
        assert_eq!(concrete_share_label(10.4), "10");
        assert_eq!(concrete_share_label(0.04), "0");
        assert_eq!(concrete_share_label(5.0), "5");
    }
}
