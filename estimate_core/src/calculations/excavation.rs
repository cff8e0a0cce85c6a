//! # Excavation
//!
//! Earthwork volume, number of truck trips to haul it and the haulage cost.
//! Dimensions are in metres; the trip volume is in m³ and the price is per
//! trip. A blank or zero trip volume gives 0 trips.

use super::{m, price};
use crate::equations::trips;
use crate::formula::{FormInputs, FormulaCategory, FormulaSpec, InputField, OutputField, Unit};

pub(crate) fn specs() -> Vec<FormulaSpec> {
    use FormulaCategory::Excavation;

    vec![
        haulage(
            FormulaSpec::new("vertical-excavation", "Vertical Excavation", Excavation, vertical)
                .field(m("length", "Length L", "L"))
                .field(m("width", "Width W", "W"))
                .field(m("depth", "Depth D", "D")),
        ),
        haulage(
            FormulaSpec::new("slop-excavation", "Slope Excavation", Excavation, slope_excavation)
                .field(m("length", "Length L", "L"))
                .field(m("breadth", "Breadth B", "B"))
                .field(m("depth", "Depth D", "D"))
                .field(m("height", "Height H", "H")),
        ),
        haulage(
            FormulaSpec::new("slop-backfilling", "Slope Backfilling", Excavation, slope_backfilling)
                .field(m("length", "Length L", "L"))
                .field(m("base", "Base B", "B"))
                .field(m("height", "Height H", "H")),
        ),
    ]
}

fn haulage(spec: FormulaSpec) -> FormulaSpec {
    spec.field(InputField::number("tripVolume", "Volume per Trip", "T", "m³"))
        .field(price("price", "Price per Trip", "P", "¤/trip"))
        .banner("totalCost", 3)
}

fn hauled(
    inputs: &FormInputs,
    volume: f64,
    formula_volume: &'static str,
    formula_trips: &'static str,
    formula_cost: &'static str,
) -> Vec<OutputField> {
    let n = trips(volume, inputs.number("tripVolume"));
    vec![
        OutputField::new("volume", "Volume", Unit::CubicMeter, formula_volume, volume),
        OutputField::new("trips", "No. of Trips", Unit::Count, formula_trips, n),
        OutputField::new("totalCost", "Total Cost", Unit::Currency, formula_cost, n * inputs.number("price")),
    ]
}

fn vertical(inputs: &FormInputs) -> Vec<OutputField> {
    let volume = inputs.number("length") * inputs.number("width") * inputs.number("depth");
    hauled(inputs, volume, "L X W X D", "(L X W X D) / T", "((L X W X D) / T) X P")
}

fn slope_excavation(inputs: &FormInputs) -> Vec<OutputField> {
    let volume = 0.5
        * inputs.number("height")
        * (inputs.number("length") + inputs.number("breadth"))
        * inputs.number("depth");
    hauled(
        inputs,
        volume,
        "0.5 X H X (L + B) X D",
        "(0.5 X H X (L + B) X D) / T",
        "((0.5 X H X (L + B) X D) / T) X P",
    )
}

fn slope_backfilling(inputs: &FormInputs) -> Vec<OutputField> {
    let volume = 0.5 * inputs.number("height") * inputs.number("base") * inputs.number("length");
    hauled(inputs, volume, "0.5 X H X B X L", "(0.5 X H X B X L) / T", "((0.5 X H X B X L) / T) X P")
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{approx, run, value};

    #[test]
    fn test_vertical_excavation() {
        let out = run(
            "vertical-excavation",
            &[("length", "10"), ("width", "5"), ("depth", "2"), ("tripVolume", "4"), ("price", "1500")],
        );
        assert_eq!(value(&out, "volume"), 100.0);
        assert_eq!(value(&out, "trips"), 25.0);
        assert_eq!(value(&out, "totalCost"), 37500.0);
    }

    #[test]
    fn test_zero_trip_volume_gives_no_trips() {
        let out = run("slop-excavation", &[("length", "10"), ("breadth", "6"), ("depth", "2"), ("height", "3")]);
        approx(value(&out, "volume"), 48.0);
        assert_eq!(value(&out, "trips"), 0.0);
        assert_eq!(value(&out, "totalCost"), 0.0);
    }

    #[test]
    fn test_slope_backfilling() {
        let out = run(
            "slop-backfilling",
            &[("length", "12"), ("base", "2"), ("height", "1.5"), ("tripVolume", "6"), ("price", "900")],
        );
        approx(value(&out, "volume"), 18.0);
        approx(value(&out, "trips"), 3.0);
        approx(value(&out, "totalCost"), 2700.0);
    }
}
