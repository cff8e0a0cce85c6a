//! # Column Reinforcement
//!
//! Rectangular and circular column steel: vertical bars, stirrups (rings)
//! and the concrete volume of the columns.
//!
//! ## Conventions
//!
//! - Column sides and diameters are in mm
//! - Heights are in m, except Column Type 1 which takes mm
//! - Stirrup count over a height is `H/S + 1`, or 0 when `S = 0`
//! - Rectangular stirrups allow 40 mm (Type 1) or 80 mm (others) of cover
//!   per side pair plus `20R` of hooks
//!
//! ## Circular Columns
//!
//! Types 9 and 12 use π ≈ 3.14 and a rounded unit-weight divisor of 162.
//! Both constants are kept as-is so results match the published tables.

use super::{m, mm, nos, steel_rate};
use crate::equations::{rebar_weight, ring_weight, stirrup_count};
use crate::formula::{FormInputs, FormulaCategory, FormulaSpec, OutputField, Unit};
use crate::units::{Meters, Millimeters, CIRCULAR_COLUMN_DIVISOR, MM3_PER_M3, MM_PER_M, REBAR_UNIT_WEIGHT_DIVISOR};

const PI_APPROX: f64 = 3.14;

pub(crate) fn specs() -> Vec<FormulaSpec> {
    use FormulaCategory::SteelColumn;

    vec![
        FormulaSpec::new("column-type-1", "Column Type 1", SteelColumn, column_type_1)
            .field(mm("sideX", "Side X", "X"))
            .field(mm("sideY", "Side Y", "Y"))
            .field(mm("diameterD", "Bar Diameter D", "D"))
            .field(mm("height", "Column Height H", "H"))
            .field(mm("ringDiameter", "Ring Diameter", "rd"))
            .field(mm("spacingS", "Spacing S", "S"))
            .field(nos("noOfColumns", "No. of Columns", "n"))
            .field(nos("noOfColumn", "No. of Column Sets", "m"))
            .field(steel_rate("steelRate"))
            .banner("totalPrice", 3),
        FormulaSpec::new("column-type-2", "Column Type 2", SteelColumn, column_type_2)
            .field(mm("sideX", "Side X", "X"))
            .field(mm("sideY", "Side Y", "Y"))
            .field(m("height", "Column Height H", "H"))
            .field(mm("diameterD1", "Diameter D1", "D1"))
            .field(mm("diameterD2", "Diameter D2", "D2"))
            .field(mm("ringDiameter", "Ring Diameter R", "R"))
            .field(mm("spacingS", "Spacing S", "S"))
            .field(nos("noOfColumns", "No. of Columns", "N"))
            .field(steel_rate("steelRate"))
            .banner("totalPrice", 2),
        FormulaSpec::new("column-type-4", "Column Type 4", SteelColumn, column_type_4)
            .field(mm("sideX", "Side X", "X"))
            .field(mm("sideY", "Side Y", "Y"))
            .field(m("height", "Column Height H", "H"))
            .field(mm("diameterD1", "Diameter D1", "D1"))
            .field(mm("diameterD2", "Diameter D2", "D2"))
            .field(mm("ringDiameterR1", "Ring Diameter R1", "R1"))
            .field(mm("ringDiameterR2", "Ring Diameter R2", "R2"))
            .field(mm("ringDiameterR3", "Ring Diameter R3", "R3"))
            .field(mm("spacingS", "Spacing S", "S"))
            .field(nos("noOfColumns", "No. of Columns", "n"))
            .field(steel_rate("steelRate"))
            .banner("totalPrice", 2),
        FormulaSpec::new("column-type-9", "Column Type 9", SteelColumn, column_type_9)
            .field(mm("diameterD", "Column Diameter D", "D"))
            .field(m("height", "Column Height H", "H"))
            .field(mm("diameterD1", "Bar Diameter D1", "d"))
            .field(mm("ringDiameterR", "Ring Diameter R", "R"))
            .field(mm("spacingS", "Stirrups Spacing S", "S"))
            .field(nos("noOfColumns", "No. of Columns", "n"))
            .field(steel_rate("steelRate"))
            .banner("totalPrice", 2),
        FormulaSpec::new("column-type-12", "Column Type 12", SteelColumn, column_type_12)
            .field(mm("diameterD", "Column Diameter D", "D"))
            .field(m("height", "Column Height H", "H"))
            .field(mm("diameterD1", "Bar Diameter D1", "d"))
            .field(mm("ringDiameterR1", "Ring Diameter R", "R"))
            .field(mm("spacingS", "Stirrups Spacing S", "S"))
            .field(nos("noOfColumns", "No. of Columns", "n"))
            .field(steel_rate("steelRate"))
            .banner("totalPrice", 2),
        FormulaSpec::new("column-ring-type-1", "Column Ring Type 1", SteelColumn, column_ring_type_1)
            .field(mm("columnSizeX", "Column Size X", "X"))
            .field(m("heightH", "Height H", "H"))
            .field(mm("ringDiameterR", "Ring Diameter R", "R"))
            .field(mm("stirrupsSpacingS", "Stirrups Spacing S", "S"))
            .field(nos("noOfColumnsN", "No. of Columns", "n"))
            .field(steel_rate("steelRate"))
            .banner("totalCost", 2),
        FormulaSpec::new("column-ring-type-2", "Column Ring Type 2", SteelColumn, column_ring_type_2)
            .field(mm("columnSizeX", "Column Size X", "X"))
            .field(mm("columnSizeY", "Column Size Y", "Y"))
            .field(m("heightH", "Height H", "H"))
            .field(mm("ringDiameterR", "Ring Diameter R", "R"))
            .field(mm("stirrupsSpacingS", "Stirrups Spacing S", "S"))
            .field(nos("noOfColumnsN", "No. of Columns", "n"))
            .field(steel_rate("steelRate"))
            .banner("totalCost", 2),
        FormulaSpec::new("column-vertical-steel", "Column Vertical Steel", SteelColumn, column_vertical_steel)
            .field(m("heightH", "Height H", "H"))
            .field(mm("diameterD1", "Bar Diameter D1", "D1"))
            .field(nos("numVerticalBarsN1", "No. of Vertical Bars", "n1"))
            .field(nos("noOfColumnsN2", "No. of Columns", "n2"))
            .field(steel_rate("steelRate"))
            .banner("totalPrice", 2),
    ]
}

/// Weight of `bars` vertical bars of diameter `d` over height `h_m` in `columns` columns
fn vertical(d: f64, h_m: f64, bars: f64, columns: f64) -> f64 {
    rebar_weight(Millimeters(d), Meters(h_m), bars * columns).0
}

/// Rectangular ring cutting length (m) with `cover` mm per side
fn rect_ring_length(x: f64, y: f64, cover: f64, ring_d: f64) -> f64 {
    (2.0 * (x - cover) + 2.0 * (y - cover) + 20.0 * ring_d) / MM_PER_M
}

fn totals(steel_parts: &[f64], rate: f64, formula_total: &'static str, formula_price: &'static str) -> [OutputField; 2] {
    let total: f64 = steel_parts.iter().sum();
    [
        OutputField::new("totalSteel", "Total Steel", Unit::Kilogram, formula_total, total),
        OutputField::new("totalPrice", "Total Price", Unit::Currency, formula_price, total * rate),
    ]
}

fn column_type_1(inputs: &FormInputs) -> Vec<OutputField> {
    let x = inputs.number("sideX");
    let y = inputs.number("sideY");
    let h_mm = inputs.number("height");
    let rd = inputs.number("ringDiameter");
    let n = inputs.number("noOfColumns");
    let sets = inputs.number_or("noOfColumn", 1.0);

    let vertical_w = vertical(inputs.number("diameterD"), h_mm / MM_PER_M, 4.0, n * sets);

    let stirrup_len = ((x - 40.0) * 2.0 + (y - 40.0) * 2.0 + 100.0) / MM_PER_M;
    let stirrup_nos = stirrup_count(h_mm, inputs.number("spacingS"));
    let stirrup_w = ring_weight(stirrup_len, stirrup_nos, rd, n * sets, REBAR_UNIT_WEIGHT_DIVISOR);

    let volume = x * y * h_mm * n * sets / MM3_PER_M3;

    let mut outputs = vec![
        OutputField::new("volume", "Concrete Volume", Unit::CubicMeter, "X X Y X H X n X m / 10^9", volume),
        OutputField::new("verticalSteel", "Vertical Steel (D)", Unit::Kilogram, "(H / 1000) X (D X D / 162.28) X 4 X n X m", vertical_w),
        OutputField::new(
            "stirrups",
            "Stirrups",
            Unit::Kilogram,
            "(((X-40) X 2 + (Y-40) X 2 + 100) / 1000) X ((H / S) + 1) X (rd X rd / 162.28) X n X m",
            stirrup_w,
        ),
    ];
    outputs.extend(totals(
        &[vertical_w, stirrup_w],
        inputs.number("steelRate"),
        "Vertical Steel + Stirrups",
        "Total Steel X r",
    ));
    outputs
}

fn column_type_2(inputs: &FormInputs) -> Vec<OutputField> {
    let x = inputs.number("sideX");
    let y = inputs.number("sideY");
    let h = inputs.number("height");
    let h_mm = h * MM_PER_M;
    let rd = inputs.number("ringDiameter");
    let n = inputs.number("noOfColumns");

    let w_d1 = vertical(inputs.number("diameterD1"), h, 4.0, n);
    let w_d2 = vertical(inputs.number("diameterD2"), h, 4.0, n);

    let stirrup_len = ((x - 40.0) * 2.0 + (y - 40.0) * 2.0 + 100.0) / MM_PER_M;
    let stirrup_nos = stirrup_count(h_mm, inputs.number("spacingS"));
    let stirrup_w = ring_weight(stirrup_len, stirrup_nos, rd, n, REBAR_UNIT_WEIGHT_DIVISOR);

    let volume = x * y * h_mm * n / MM3_PER_M3;

    let mut outputs = vec![
        OutputField::new("volume", "Concrete Volume", Unit::CubicMeter, "X X Y X (1000 X H) X N / 10^9", volume),
        OutputField::new("verticalD1", "Vertical Steel (D1)", Unit::Kilogram, "4 X D1 X D1 X H X N / 162.28", w_d1),
        OutputField::new("verticalD2", "Vertical Steel (D2)", Unit::Kilogram, "4 X D2 X D2 X H X N / 162.28", w_d2),
        OutputField::new(
            "stirrups",
            "Stirrups",
            Unit::Kilogram,
            "(((X-40) X 2 + (Y-40) X 2 + 100) / 1000) X ((1000 X H / S) + 1) X (R X R / 162.28) X N",
            stirrup_w,
        ),
    ];
    outputs.extend(totals(
        &[w_d1, w_d2, stirrup_w],
        inputs.number("steelRate"),
        "D1 + D2 + Stirrups",
        "Total Steel X r",
    ));
    outputs
}

fn column_type_4(inputs: &FormInputs) -> Vec<OutputField> {
    let x = inputs.number("sideX");
    let y = inputs.number("sideY");
    let h = inputs.number("height");
    let h_mm = h * MM_PER_M;
    let n = inputs.number("noOfColumns");
    let r1 = inputs.number("ringDiameterR1");
    let r2 = inputs.number("ringDiameterR2");
    let r3 = inputs.number("ringDiameterR3");

    let volume = x * y * h_mm * n / MM3_PER_M3;
    let w_d1 = vertical(inputs.number("diameterD1"), h, 4.0, n);
    let w_d2 = vertical(inputs.number("diameterD2"), h, 6.0, n);

    let rings = stirrup_count(h_mm, inputs.number("spacingS"));
    let len_r1 = rect_ring_length(x, y, 80.0, r1);
    // Only the X legs of the inner ring are divided by 3; kept as published
    let len_r2 = ((2.0 * (x - 80.0)) / 3.0 + 2.0 * (y - 80.0) + 20.0 * r2) / MM_PER_M;
    let len_r3 = ((y - 80.0) + 20.0 * r3) / MM_PER_M;

    let w_r1 = ring_weight(len_r1, rings, r1, n, REBAR_UNIT_WEIGHT_DIVISOR);
    let w_r2 = ring_weight(len_r2, rings, r2, n, REBAR_UNIT_WEIGHT_DIVISOR);
    let w_r3 = ring_weight(len_r3, rings, r3, n, REBAR_UNIT_WEIGHT_DIVISOR);

    let mut outputs = vec![
        OutputField::new("volume", "Concrete Volume", Unit::CubicMeter, "X X Y X (1000 X H) X n / 10^9", volume),
        OutputField::new("verticalD1", "Vertical Steel (D1)", Unit::Kilogram, "4 X D1 X D1 X H X n / 162.28", w_d1),
        OutputField::new("verticalD2", "Vertical Steel (D2)", Unit::Kilogram, "6 X D2 X D2 X H X n / 162.28", w_d2),
        OutputField::new(
            "stirrupsR1",
            "Stirrups (R1)",
            Unit::Kilogram,
            "((2 X (X-80) + 2 X (Y-80) + 20 X R1) / 1000) X ((1000 X H / S) + 1) X (R1 X R1 / 162.28) X n",
            w_r1,
        ),
        OutputField::new(
            "stirrupsR2",
            "Stirrups (R2)",
            Unit::Kilogram,
            "(((2 X (X-80) / 3) + 2 X (Y-80) + 20 X R2) / 1000) X ((1000 X H / S) + 1) X (R2 X R2 / 162.28) X n",
            w_r2,
        ),
        OutputField::new(
            "stirrupsR3",
            "Stirrups (R3)",
            Unit::Kilogram,
            "(((Y-80) + 20 X R3) / 1000) X ((1000 X H / S) + 1) X (R3 X R3 / 162.28) X n",
            w_r3,
        ),
    ];
    outputs.extend(totals(
        &[w_d1, w_d2, w_r1, w_r2, w_r3],
        inputs.number("steelRate"),
        "D1 + D2 + R1 + R2 + R3",
        "Total Steel X r",
    ));
    outputs
}

fn circular_column(inputs: &FormInputs, ring_key: &str) -> Vec<OutputField> {
    let d_col = inputs.number("diameterD");
    let h = inputs.number("height");
    let h_mm = h * MM_PER_M;
    let bar_d = inputs.number("diameterD1");
    let ring_d = inputs.number(ring_key);
    let n = inputs.number("noOfColumns");

    let volume = PI_APPROX * (0.5 * d_col) * (0.5 * d_col) * h_mm * n / MM3_PER_M3;
    let w_d1 = 6.0 * bar_d * bar_d * h * n / CIRCULAR_COLUMN_DIVISOR;

    let ring_len = (PI_APPROX * (d_col - 80.0) + 20.0 * ring_d) / MM_PER_M;
    let rings = stirrup_count(h_mm, inputs.number("spacingS"));
    let w_ring = ring_weight(ring_len, rings, ring_d, n, CIRCULAR_COLUMN_DIVISOR);

    let mut outputs = vec![
        OutputField::new(
            "volume",
            "Concrete Volume",
            Unit::CubicMeter,
            "3.14 X (0.5 X D) X (0.5 X D) X (1000 X H) X n / 10^9",
            volume,
        ),
        OutputField::new("verticalD1", "Vertical Steel (D1)", Unit::Kilogram, "6 X d X d X H X n / 162", w_d1),
        OutputField::new(
            "stirrups",
            "Stirrups (R)",
            Unit::Kilogram,
            "(((3.14 X (D-80)) + 20 X R) / 1000) X ((1000 X H / S) + 1) X (R X R / 162) X n",
            w_ring,
        ),
    ];
    outputs.extend(totals(
        &[w_d1, w_ring],
        inputs.number("steelRate"),
        "Vertical Steel (D1) + Stirrups (R)",
        "Total Steel X r",
    ));
    outputs
}

fn column_type_9(inputs: &FormInputs) -> Vec<OutputField> {
    circular_column(inputs, "ringDiameterR")
}

fn column_type_12(inputs: &FormInputs) -> Vec<OutputField> {
    circular_column(inputs, "ringDiameterR1")
}

fn ring_set(inputs: &FormInputs, cutting_length: f64, formula: &'static str) -> Vec<OutputField> {
    let r = inputs.number("ringDiameterR");
    let rings = stirrup_count(inputs.number("heightH") * MM_PER_M, inputs.number("stirrupsSpacingS"));
    let weight = ring_weight(cutting_length, rings, r, inputs.number("noOfColumnsN"), REBAR_UNIT_WEIGHT_DIVISOR);

    vec![
        OutputField::new("stirrups", "Stirrups", Unit::Kilogram, formula, weight),
        OutputField::new("totalCost", "Total Cost", Unit::Currency, "Stirrups X Rate", weight * inputs.number("steelRate")),
    ]
}

fn column_ring_type_1(inputs: &FormInputs) -> Vec<OutputField> {
    let x = inputs.number("columnSizeX");
    let len = (4.0 * (x - 80.0) + 20.0 * inputs.number("ringDiameterR")) / MM_PER_M;
    ring_set(inputs, len, "((4 X (X-80) + 20 X R) / 1000) X ((1000 X H / S) + 1) X (R X R / 162.28) X n")
}

fn column_ring_type_2(inputs: &FormInputs) -> Vec<OutputField> {
    let len = rect_ring_length(
        inputs.number("columnSizeX"),
        inputs.number("columnSizeY"),
        80.0,
        inputs.number("ringDiameterR"),
    );
    ring_set(
        inputs,
        len,
        "((2 X (X-80) + 2 X (Y-80) + 20 X R) / 1000) X ((1000 X H / S) + 1) X (R X R / 162.28) X n",
    )
}

fn column_vertical_steel(inputs: &FormInputs) -> Vec<OutputField> {
    let weight = vertical(
        inputs.number("diameterD1"),
        inputs.number("heightH"),
        inputs.number("numVerticalBarsN1"),
        inputs.number("noOfColumnsN2"),
    );

    vec![
        OutputField::new("verticalSteel", "Vertical Steel (D)", Unit::Kilogram, "n2 X D1 X D1 X H X n1 / 162.28", weight),
        OutputField::new("totalPrice", "Total Price", Unit::Currency, "Vertical Steel X r", weight * inputs.number("steelRate")),
    ]
}
