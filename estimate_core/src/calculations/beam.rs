//! # Beam, Slab and Footing Reinforcement
//!
//! ## Notation
//!
//! - `X`, `Y` = Section or footing sides (mm)
//! - `L` = Beam length (mm); slab spans `L1`, `L2` are in m
//! - `D1`, `D2` = Main bar diameters (mm)
//! - `R` = Stirrup bar diameter (mm), `S` = spacing (mm)
//! - `Ld` = Development length (mm)

use super::{m, mm, nos, steel_rate};
use crate::equations::{rebar_unit_weight, rebar_weight, ring_weight, stirrup_count};
use crate::formula::{FormInputs, FormulaCategory, FormulaSpec, OutputField, Unit};
use crate::units::{Meters, Millimeters, MM3_PER_M3, MM_PER_M, REBAR_UNIT_WEIGHT_DIVISOR};

pub(crate) fn specs() -> Vec<FormulaSpec> {
    vec![
        FormulaSpec::new(
            "beam-horizontal-bar",
            "Beam Horizontal Bar",
            FormulaCategory::SteelBeam,
            beam_horizontal_bar,
        )
        .field(mm("beamSideB1", "Beam Side b1", "b1"))
        .field(mm("beamSideB2", "Beam Side b2", "b2"))
        .field(mm("beamLengthL", "Beam Length L", "L"))
        .field(mm("barDiameterD1", "Bar Diameter D1", "D1"))
        .field(nos("numVerticalBarsN1", "No. of Bars", "n1"))
        .field(nos("numBeamsN2", "No. of Beams", "n2"))
        .field(steel_rate("steelRate"))
        .banner("totalPrice", 2),
        FormulaSpec::new("beam-ring-type-1", "Beam Ring Type 1", FormulaCategory::SteelBeam, beam_ring_type_1)
            .field(mm("ringDiameterR", "Ring Diameter R", "R"))
            .field(mm("columnSizeX", "Beam Size X", "X"))
            .field(m("columnHeightH", "Beam Length H", "H"))
            .field(mm("stirrupSpacingS", "Stirrup Spacing S", "S"))
            .field(nos("noOfColumns", "No. of Beams", "n"))
            .field(steel_rate("steelRate"))
            .banner("totalPrice", 2),
        FormulaSpec::new("beam-type-1", "Beam Type 1", FormulaCategory::SteelBeam, beam_type_1)
            .field(mm("sideX", "Side X", "X"))
            .field(mm("sideY", "Side Y", "Y"))
            .field(mm("lengthL", "Length L", "L"))
            .field(mm("topD1", "Top Bar Diameter D1", "D1"))
            .field(mm("bottomD2", "Bottom Bar Diameter D2", "D2"))
            .field(mm("ringDiameterR", "Ring Diameter R", "R"))
            .field(mm("stirrupSpacingS", "Stirrup Spacing S", "S"))
            .field(nos("noOfColumns", "No. of Beams", "n"))
            .field(steel_rate("steelRate"))
            .banner("totalPrice", 2),
        FormulaSpec::new("slab-type-1", "Slab Type 1", FormulaCategory::SteelSlab, slab_type_1)
            .field(m("lengthL1", "Length L1", "L1"))
            .field(m("lengthL2", "Length L2", "L2"))
            .field(mm("diameterD1", "Bar Diameter D1", "D1"))
            .field(mm("barDiameterD2", "Bar Diameter D2", "D2"))
            .field(mm("s1", "Spacing S1", "S1"))
            .field(mm("s2", "Spacing S2", "S2"))
            .field(mm("depthD", "Slab Depth d", "d"))
            .field(steel_rate("steelRate"))
            .banner("totalPrice", 2),
        FormulaSpec::new("footing-type-1", "Footing Type 1", FormulaCategory::SteelFooting, footing_type_1)
            .field(mm("sideX", "Side X", "X"))
            .field(mm("sideY", "Side Y", "Y"))
            .field(mm("height", "Footing Height H", "H"))
            .field(mm("d1", "Bar Diameter D1", "D1"))
            .field(mm("d2", "Bar Diameter D2", "D2"))
            .field(mm("s1", "Spacing S1", "S1"))
            .field(mm("s2", "Spacing S2", "S2"))
            .field(mm("devLength", "Development Length Ld", "Ld"))
            .field(nos("noOfFooting", "No. of Footings", "n"))
            .field(steel_rate("steelRate"))
            .banner("totalPrice", 2),
    ]
}

fn steel_and_price(total: f64, rate: f64, formula_total: &'static str) -> [OutputField; 2] {
    [
        OutputField::new("totalSteel", "Total Steel", Unit::Kilogram, formula_total, total),
        OutputField::new("totalPrice", "Total Price", Unit::Currency, "Total Steel X r", total * rate),
    ]
}

fn beam_horizontal_bar(inputs: &FormInputs) -> Vec<OutputField> {
    let length = (inputs.number("beamLengthL") + inputs.number("beamSideB1") + inputs.number("beamSideB2")) / MM_PER_M;
    let bars = inputs.number("numVerticalBarsN1") * inputs.number("numBeamsN2");
    let weight = rebar_weight(Millimeters(inputs.number("barDiameterD1")), Meters(length), bars).0;

    vec![
        OutputField::new("barLength", "Bar Length", Unit::Meter, "(L + b1 + b2) / 1000", length),
        OutputField::new(
            "horizontalSteel",
            "Horizontal Steel",
            Unit::Kilogram,
            "n2 X D1 X D1 X ((L + b1 + b2) / 1000) X n1 / 162.28",
            weight,
        ),
        OutputField::new(
            "totalPrice",
            "Total Price",
            Unit::Currency,
            "Horizontal Steel X r",
            weight * inputs.number("steelRate"),
        ),
    ]
}

fn beam_ring_type_1(inputs: &FormInputs) -> Vec<OutputField> {
    let r = inputs.number("ringDiameterR");
    let len = (4.0 * (inputs.number("columnSizeX") - 80.0) + 20.0 * r) / MM_PER_M;
    let rings = stirrup_count(inputs.number("columnHeightH") * MM_PER_M, inputs.number("stirrupSpacingS"));
    let weight = ring_weight(len, rings, r, inputs.number("noOfColumns"), REBAR_UNIT_WEIGHT_DIVISOR);

    vec![
        OutputField::new(
            "stirrups",
            "Stirrups",
            Unit::Kilogram,
            "((4 X (X-80) + 20 X R) / 1000) X ((1000 X H / S) + 1) X (R X R / 162.28) X n",
            weight,
        ),
        OutputField::new(
            "totalPrice",
            "Total Price",
            Unit::Currency,
            "Stirrups X r",
            weight * inputs.number("steelRate"),
        ),
    ]
}

fn beam_type_1(inputs: &FormInputs) -> Vec<OutputField> {
    let x = inputs.number("sideX");
    let y = inputs.number("sideY");
    let l = inputs.number("lengthL");
    let r = inputs.number("ringDiameterR");
    let n = inputs.number("noOfColumns");

    let volume = x * y * l * n / MM3_PER_M3;
    let bar_factor = (l + 540.0) * 0.002;
    let top = bar_factor * n * rebar_unit_weight(inputs.number("topD1"));
    let bottom = bar_factor * n * rebar_unit_weight(inputs.number("bottomD2"));

    let stirrup_len = (2.0 * (x - 60.0) + 2.0 * (y - 60.0) + 20.0 * r) / MM_PER_M;
    let stirrup_nos = stirrup_count(l, inputs.number("stirrupSpacingS"));
    let stirrups = ring_weight(stirrup_len, stirrup_nos, r, n, REBAR_UNIT_WEIGHT_DIVISOR);

    let mut outputs = vec![
        OutputField::new("volume", "Concrete Volume", Unit::CubicMeter, "X X Y X L X n / 10^9", volume),
        OutputField::new("topSteel", "Top Steel", Unit::Kilogram, "((L + 540) X 0.002) X D1 X D1 X n / 162.28", top),
        OutputField::new(
            "bottomSteel",
            "Bottom Steel",
            Unit::Kilogram,
            "((L + 540) X 0.002) X D2 X D2 X n / 162.28",
            bottom,
        ),
        OutputField::new(
            "stirrups",
            "Stirrups",
            Unit::Kilogram,
            "((2 X (X-60) + 2 X (Y-60) + 20 X R) / 1000) X ((L / S) + 1) X (R X R / 162.28) X n",
            stirrups,
        ),
    ];
    outputs.extend(steel_and_price(
        top + bottom + stirrups,
        inputs.number("steelRate"),
        "Top Steel + Bottom Steel + Stirrups",
    ));
    outputs
}

/// Bars laid along one span of a slab: bar length is the other span plus
/// 0.4 m of anchorage.
fn slab_bars(bar_span_m: f64, spread_m: f64, spacing_mm: f64, d: f64) -> f64 {
    if spacing_mm > 0.0 {
        (bar_span_m + 0.4) * (spread_m * MM_PER_M / spacing_mm + 1.0) * rebar_unit_weight(d)
    } else {
        0.0
    }
}

fn slab_type_1(inputs: &FormInputs) -> Vec<OutputField> {
    let l1 = inputs.number("lengthL1");
    let l2 = inputs.number("lengthL2");

    let volume = l1 * l2 * inputs.number("depthD") / MM_PER_M;
    let d1 = slab_bars(l2, l1, inputs.number("s1"), inputs.number("diameterD1"));
    let d2 = slab_bars(l1, l2, inputs.number("s2"), inputs.number("barDiameterD2"));

    let mut outputs = vec![
        OutputField::new("volume", "Concrete Volume", Unit::CubicMeter, "(L1 X L2 X d) / 1000", volume),
        OutputField::new(
            "steelD1",
            "Steel D1",
            Unit::Kilogram,
            "(L2 + 0.4) X ((L1 X 1000 / S1) + 1) X (D1 X D1 / 162.28)",
            d1,
        ),
        OutputField::new(
            "steelD2",
            "Steel D2",
            Unit::Kilogram,
            "(L1 + 0.4) X ((L2 X 1000 / S2) + 1) X (D2 X D2 / 162.28)",
            d2,
        ),
    ];
    outputs.extend(steel_and_price(d1 + d2, inputs.number("steelRate"), "Steel D1 + Steel D2"));
    outputs
}

fn footing_type_1(inputs: &FormInputs) -> Vec<OutputField> {
    let x = inputs.number("sideX");
    let y = inputs.number("sideY");
    let ld = inputs.number("devLength");
    let n = inputs.number("noOfFooting");

    let volume = x * y * inputs.number("height") * n / MM3_PER_M3;

    // Bars along X are spaced across Y and vice versa, with 50 mm cover each side
    let len1 = (x - 100.0 + 2.0 * ld) / MM_PER_M;
    let len2 = (y - 100.0 + 2.0 * ld) / MM_PER_M;
    let nos1 = stirrup_count(y - 100.0, inputs.number("s1"));
    let nos2 = stirrup_count(x - 100.0, inputs.number("s2"));
    let w1 = ring_weight(len1, nos1, inputs.number("d1"), n, REBAR_UNIT_WEIGHT_DIVISOR);
    let w2 = ring_weight(len2, nos2, inputs.number("d2"), n, REBAR_UNIT_WEIGHT_DIVISOR);

    let mut outputs = vec![
        OutputField::new("volume", "Concrete Volume", Unit::CubicMeter, "X X Y X H X n / 10^9", volume),
        OutputField::new(
            "steelD1",
            "Steel D1",
            Unit::Kilogram,
            "((X - 100 + 2 X Ld) / 1000) X (((Y - 100) / S1) + 1) X (D1 X D1 / 162.28) X n",
            w1,
        ),
        OutputField::new(
            "steelD2",
            "Steel D2",
            Unit::Kilogram,
            "((Y - 100 + 2 X Ld) / 1000) X (((X - 100) / S2) + 1) X (D2 X D2 / 162.28) X n",
            w2,
        ),
    ];
    outputs.extend(steel_and_price(w1 + w2, inputs.number("steelRate"), "Steel D1 + Steel D2"));
    outputs
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{approx, run, value};

    #[test]
    fn test_beam_horizontal_bar() {
        let out = run(
            "beam-horizontal-bar",
            &[
                ("beamSideB1", "230"),
                ("beamSideB2", "230"),
                ("beamLengthL", "4000"),
                ("barDiameterD1", "12"),
                ("numVerticalBarsN1", "4"),
                ("numBeamsN2", "3"),
                ("steelRate", "75"),
            ],
        );
        let w = 144.0 / 162.28 * 4.46 * 12.0;
        approx(value(&out, "barLength"), 4.46);
        approx(value(&out, "horizontalSteel"), w);
        approx(value(&out, "totalPrice"), w * 75.0);
    }

    #[test]
    fn test_beam_type_1() {
        let out = run(
            "beam-type-1",
            &[
                ("sideX", "230"),
                ("sideY", "450"),
                ("lengthL", "4000"),
                ("topD1", "12"),
                ("bottomD2", "16"),
                ("ringDiameterR", "8"),
                ("stirrupSpacingS", "200"),
                ("noOfColumns", "1"),
            ],
        );
        let top = 4540.0 * 0.002 * 144.0 / 162.28;
        let bottom = 4540.0 * 0.002 * 256.0 / 162.28;
        let stirrups = (2.0 * 170.0 + 2.0 * 390.0 + 160.0) / 1000.0 * 21.0 * 64.0 / 162.28;
        approx(value(&out, "topSteel"), top);
        approx(value(&out, "bottomSteel"), bottom);
        approx(value(&out, "stirrups"), stirrups);
        approx(value(&out, "totalSteel"), top + bottom + stirrups);
        assert_eq!(value(&out, "totalPrice"), 0.0);
    }

    #[test]
    fn test_slab_zero_spacing_drops_that_direction() {
        let out = run(
            "slab-type-1",
            &[
                ("lengthL1", "4"),
                ("lengthL2", "3"),
                ("diameterD1", "10"),
                ("barDiameterD2", "8"),
                ("s1", "150"),
                ("s2", ""),
                ("depthD", "125"),
                ("steelRate", "60"),
            ],
        );
        let d1 = 3.4 * (4000.0 / 150.0 + 1.0) * 100.0 / 162.28;
        approx(value(&out, "volume"), 1.5);
        approx(value(&out, "steelD1"), d1);
        assert_eq!(value(&out, "steelD2"), 0.0);
        approx(value(&out, "totalPrice"), d1 * 60.0);
    }

    #[test]
    fn test_footing_type_1() {
        let out = run(
            "footing-type-1",
            &[
                ("sideX", "1500"),
                ("sideY", "1200"),
                ("height", "500"),
                ("d1", "12"),
                ("d2", "10"),
                ("s1", "150"),
                ("s2", "200"),
                ("devLength", "300"),
                ("noOfFooting", "2"),
                ("steelRate", "70"),
            ],
        );
        let w1 = (1400.0 + 600.0) / 1000.0 * (1100.0 / 150.0 + 1.0) * 144.0 / 162.28 * 2.0;
        let w2 = (1100.0 + 600.0) / 1000.0 * (1400.0 / 200.0 + 1.0) * 100.0 / 162.28 * 2.0;
        approx(value(&out, "volume"), 1.8);
        approx(value(&out, "steelD1"), w1);
        approx(value(&out, "steelD2"), w2);
        approx(value(&out, "totalPrice"), (w1 + w2) * 70.0);
    }

    #[test]
    fn test_beam_ring_zero_spacing() {
        let out = run(
            "beam-ring-type-1",
            &[("ringDiameterR", "8"), ("columnSizeX", "300"), ("columnHeightH", "3"), ("noOfColumns", "2")],
        );
        assert_eq!(value(&out, "stirrups"), 0.0);
        assert_eq!(value(&out, "totalPrice"), 0.0);
    }
}
