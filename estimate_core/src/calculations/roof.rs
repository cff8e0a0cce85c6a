//! # Roof Area
//!
//! Covered surface of common roof shapes and the roofing cost.
//!
//! Each page has a metric/imperial select. Metric lengths are entered in mm
//! and converted to m; imperial lengths are used as entered (ft), so the
//! area comes out in sq.ft.
//!
//! ## Notation
//!
//! - `a`, `b` = Base lengths
//! - `c`, `d` = Eave overhangs
//! - `h` = Rise of the roof
//! - `p` = Price per unit area

use super::price;
use crate::equations::sloped_length;
use crate::formula::{
    FormInputs, FormulaCategory, FormulaSpec, InputField, OutputField, SelectOption, Unit, UNIT_SYSTEM_KEY,
};
use crate::units::UnitSystem;

pub(crate) fn specs() -> Vec<FormulaSpec> {
    use FormulaCategory::Roof;

    vec![
        priced(
            FormulaSpec::new("flat-roof", "Flat Roof", Roof, flat_roof)
                .field(unit_select())
                .field(length("baseLengthA", "Base Length a", "a"))
                .field(length("baseLengthB", "Base Length b", "b"))
                .field(length("eaveLengthC", "Eave Length c", "c")),
        ),
        priced(
            FormulaSpec::new("box-gable-roof", "Box Gable Roof", Roof, box_gable_roof)
                .field(unit_select())
                .field(length("baseLengthA", "Base Length a", "a"))
                .field(length("baseLengthB", "Base Length b", "b"))
                .field(length("eaveLengthC", "Eave Length c", "c"))
                .field(length("eaveLengthD", "Eave Length d", "d"))
                .field(length("riseH", "Rise h", "h")),
        ),
        priced(
            FormulaSpec::new("pyramid-hip-roof", "Pyramid Hip Roof", Roof, pyramid_hip_roof)
                .field(unit_select())
                .field(length("baseLengthA", "Base Length a", "a"))
                .field(length("baseLengthB", "Base Length b", "b"))
                .field(length("riseH", "Rise h", "h")),
        ),
        priced(
            FormulaSpec::new("saltbox-roof", "Saltbox Roof", Roof, saltbox_roof)
                .field(unit_select())
                .field(length("baseLengthA1", "Base Length a1", "a1"))
                .field(length("baseLengthA2", "Base Length a2", "a2"))
                .field(length("baseLengthB", "Base Length b", "b"))
                .field(length("eaveLengthC", "Eave Length c", "c"))
                .field(length("riseH1", "Rise h1", "h1"))
                .field(length("riseH2", "Rise h2", "h2")),
        ),
        priced(
            FormulaSpec::new("shed-roof", "Shed Roof", Roof, shed_roof)
                .field(unit_select())
                .field(length("baseLengthA", "Base Length a", "a"))
                .field(length("baseLengthB", "Base Length b", "b"))
                .field(length("eaveLengthC", "Eave Length c", "c"))
                .field(length("riseH", "Rise h", "h")),
        ),
    ]
}

fn unit_select() -> InputField {
    InputField::select(
        UNIT_SYSTEM_KEY,
        "Unit System",
        vec![SelectOption::new("metric", "Metric"), SelectOption::new("imperial", "Imperial")],
        "metric",
    )
}

fn length(key: &'static str, label: &'static str, symbol: &'static str) -> InputField {
    InputField::number(key, label, symbol, "mm").with_imperial_unit("ft")
}

fn priced(spec: FormulaSpec) -> FormulaSpec {
    spec.field(price("roomPrice", "Price", "p", "¤/sq.m.").with_imperial_unit("¤/sq.ft."))
        .banner("roofCost", 3)
}

/// Entered lengths converted to working units
struct RoofDims<'a> {
    inputs: &'a FormInputs,
    system: UnitSystem,
}

impl<'a> RoofDims<'a> {
    fn new(inputs: &'a FormInputs) -> Self {
        RoofDims {
            inputs,
            system: UnitSystem::from_select(inputs.text(UNIT_SYSTEM_KEY)),
        }
    }

    fn get(&self, key: &str) -> f64 {
        self.system.to_working_length(self.inputs.number(key))
    }
}

fn area_and_cost(inputs: &FormInputs, area: f64, formula_area: &'static str, formula_cost: &'static str) -> Vec<OutputField> {
    let area_unit = match UnitSystem::from_select(inputs.text(UNIT_SYSTEM_KEY)) {
        UnitSystem::Metric => Unit::SquareMeter,
        UnitSystem::Imperial => Unit::SquareFoot,
    };
    vec![
        OutputField::new("roofArea", "Roof Area", area_unit, formula_area, area),
        OutputField::new("roofCost", "Roof Cost", Unit::Currency, formula_cost, area * inputs.number("roomPrice")),
    ]
}

fn flat_roof(inputs: &FormInputs) -> Vec<OutputField> {
    let dims = RoofDims::new(inputs);
    let (a, b, c) = (dims.get("baseLengthA"), dims.get("baseLengthB"), dims.get("eaveLengthC"));
    let area = (a + 2.0 * c) * (b + 2.0 * c);
    area_and_cost(inputs, area, "(a + c + c) X (b + c + c)", "(a + c + c) X (b + c + c) X p")
}

fn box_gable_roof(inputs: &FormInputs) -> Vec<OutputField> {
    let dims = RoofDims::new(inputs);
    let rafter = sloped_length(dims.get("riseH"), 0.5 * dims.get("baseLengthA") + dims.get("eaveLengthC"));
    let area = rafter * (dims.get("baseLengthB") + 2.0 * dims.get("eaveLengthD")) * 2.0;
    area_and_cost(
        inputs,
        area,
        "sqrt((h X h) + ((0.5 X a) + c)²) X (b + (2 X d)) X 2",
        "(sqrt((h X h) + ((0.5 X a) + c)²) X (b + (2 X d)) X 2) X p",
    )
}

fn pyramid_hip_roof(inputs: &FormInputs) -> Vec<OutputField> {
    let dims = RoofDims::new(inputs);
    let (a, b, h) = (dims.get("baseLengthA"), dims.get("baseLengthB"), dims.get("riseH"));
    let area = a * sloped_length(h, b / 2.0) + b * sloped_length(h, a / 2.0);
    area_and_cost(
        inputs,
        area,
        "(a X sqrt((h X h) + (b/2)²)) + (b X sqrt((h X h) + (a/2)²))",
        "((a X sqrt((h X h) + (b/2)²)) + (b X sqrt((h X h) + (a/2)²))) X p",
    )
}

fn saltbox_roof(inputs: &FormInputs) -> Vec<OutputField> {
    let dims = RoofDims::new(inputs);
    let b = dims.get("baseLengthB");
    let long_slope = sloped_length(dims.get("riseH1"), dims.get("baseLengthA1"));
    let short_slope = sloped_length(dims.get("riseH2"), dims.get("baseLengthA2") + dims.get("eaveLengthC"));
    let area = long_slope * b + short_slope * b;
    area_and_cost(
        inputs,
        area,
        "(sqrt((h1 X h1) + (a1 X a1)) X b) + (sqrt((h2 X h2) + (a2 + c)²) X b)",
        "((sqrt((h1 X h1) + (a1 X a1)) X b) + (sqrt((h2 X h2) + (a2 + c)²) X b)) X p",
    )
}

fn shed_roof(inputs: &FormInputs) -> Vec<OutputField> {
    let dims = RoofDims::new(inputs);
    let c = dims.get("eaveLengthC");
    let area = sloped_length(dims.get("riseH"), dims.get("baseLengthA") + 2.0 * c) * (dims.get("baseLengthB") + 2.0 * c);
    area_and_cost(
        inputs,
        area,
        "sqrt((h X h) + (a + (2 X c))²) X (b + (2 X c))",
        "(sqrt((h X h) + (a + (2 X c))²) X (b + (2 X c))) X p",
    )
}
