//! # Brickwork
//!
//! Brick count, cement-sand mortar and cost for a volume of brick masonry.
//!
//! All pages share one take-off: they only differ in how the wall volume
//! `V` is obtained. Brick sizes and joints are entered in mm; wall lengths
//! and heights in m.
//!
//! ```text
//! bricks       = V / ((L + j) × W × (T + j))
//! mortar (dry) = (V − bricks × L × W × T) × 1.42
//! cement bags  = c × dry / ((c + s) × 0.035)
//! sand (m³)    = s × dry / (c + s)
//! ```

use super::{m, mm, price};
use crate::equations::masonry::brick_solid_volume;
use crate::equations::{brick_count, mortar_mix};
use crate::formula::{FormInputs, FormulaCategory, FormulaSpec, InputField, OutputField, Unit};
use crate::units::{Millimeters, MM_PER_M};

pub(crate) fn specs() -> Vec<FormulaSpec> {
    use FormulaCategory::Brickwork;

    vec![
        with_mix_and_prices(
            with_brick(FormulaSpec::new("brick-by-wall", "Bricks by Wall", Brickwork, by_wall))
                .field(m("wallL", "Wall Length l", "l"))
                .field(m("wallH", "Wall Height h", "h"))
                .field(mm("wallT", "Wall Thickness t", "t"))
                .field(mm("joint", "Mortar Joint j", "j")),
        ),
        with_mix_and_prices(
            with_brick(FormulaSpec::new("brick-cavity-wall", "Cavity Wall", Brickwork, cavity_wall))
                .field(m("wallL", "Wall Length l", "l"))
                .field(m("wallW", "Leaf Thickness w", "w"))
                .field(m("wallH", "Wall Height h", "h"))
                .field(mm("joint", "Mortar Joint j", "j").with_default("10"))
                .field(mm("cavityThickness", "Cavity Thickness tc", "tc")),
        )
        .field(price("cavityMaterialPrice", "Cavity Material Price", "C2", "¤/m³")),
        with_mix_and_prices(
            with_brick(FormulaSpec::new("brick-by-volume", "Bricks by Volume", Brickwork, by_volume))
                .field(InputField::number("wallVolume", "Wall Volume V", "V", "m³"))
                .field(mm("joint", "Mortar Joint j", "j")),
        ),
        with_mix_and_prices(
            with_brick(FormulaSpec::new(
                "brick-english-cross-bond",
                "English Cross Bond",
                Brickwork,
                english_cross_bond,
            ))
            .field(m("wallL", "Wall Length l", "l"))
            .field(m("wallH", "Wall Height h", "h"))
            .field(mm("joint", "Mortar Joint j", "j"))
            .field(m("w1", "Opening 1 Width", "W1"))
            .field(m("h1", "Opening 1 Height", "H1"))
            .field(m("w2", "Opening 2 Width", "W2"))
            .field(m("h2", "Opening 2 Height", "H2"))
            .field(m("w3", "Opening 3 Width", "W3"))
            .field(m("h3", "Opening 3 Height", "H3")),
        ),
        with_brick(FormulaSpec::new("brick-king-closer", "King Closer", Brickwork, king_closer))
            .field(m("wallL", "Wall Length l", "l"))
            .field(m("wallH", "Wall Height h", "h"))
            .field(mm("joint", "Mortar Joint j", "j")),
    ]
}

fn with_brick(spec: FormulaSpec) -> FormulaSpec {
    spec.field(mm("brickL", "Brick Length L", "L"))
        .field(mm("brickW", "Brick Width W", "W"))
        .field(mm("brickT", "Brick Thickness T", "T"))
}

fn with_mix_and_prices(spec: FormulaSpec) -> FormulaSpec {
    spec.field(InputField::number("cementRatio", "Cement Ratio", "c", ""))
        .field(InputField::number("sandRatio", "Sand Ratio", "s", ""))
        .field(price("brickPrice", "Brick Price", "B1", "¤/brick"))
        .field(price("cementPrice", "Cement Price", "C1", "¤/bag"))
        .field(price("sandPrice", "Sand Price", "S1", "¤/m³"))
        .banner("totalCost", 2)
}

fn brick(inputs: &FormInputs) -> (Millimeters, Millimeters, Millimeters) {
    (
        Millimeters(inputs.number("brickL")),
        Millimeters(inputs.number("brickW")),
        Millimeters(inputs.number("brickT")),
    )
}

/// Bricks, mortar and costs for a wall of volume `v` (m³), followed by any
/// `extra` cost lines, and the total cost.
fn takeoff(inputs: &FormInputs, v: f64, extra: Vec<OutputField>) -> Vec<OutputField> {
    let (l, w, t) = brick(inputs);
    let bricks = brick_count(v, l, w, t, Millimeters(inputs.number("joint")));
    let mortar = mortar_mix(
        v,
        brick_solid_volume(bricks, l, w, t),
        inputs.number("cementRatio"),
        inputs.number("sandRatio"),
    );

    let brick_cost = bricks * inputs.number("brickPrice");
    let cement_cost = mortar.cement_bags * inputs.number("cementPrice");
    let sand_cost = mortar.sand_m3 * inputs.number("sandPrice");
    let extra_cost: f64 = extra.iter().filter(|o| o.unit.is_currency()).map(|o| o.value).sum();
    let total = brick_cost + cement_cost + sand_cost + extra_cost;

    let mut outputs = vec![
        OutputField::new("bricks", "No. of Bricks", Unit::Count, "V / ((L + j) X W X (T + j))", bricks),
        OutputField::new(
            "mortarDryVolume",
            "Mortar Dry Volume",
            Unit::CubicMeter,
            "(V - Bricks X L X W X T) X 1.42",
            mortar.dry_volume_m3,
        ),
        OutputField::new("cementBags", "Cement", Unit::Bags, "c X Dry Volume / ((c + s) X 0.035)", mortar.cement_bags),
        OutputField::new("sand", "Sand", Unit::CubicMeter, "s X Dry Volume / (c + s)", mortar.sand_m3),
        OutputField::new("brickCost", "Brick Cost", Unit::Currency, "Bricks X B1", brick_cost),
        OutputField::new("cementCost", "Cement Cost", Unit::Currency, "Cement X C1", cement_cost),
        OutputField::new("sandCost", "Sand Cost", Unit::Currency, "Sand X S1", sand_cost),
    ];
    outputs.extend(extra);
    outputs.push(OutputField::new("totalCost", "Total Cost", Unit::Currency, "Sum of all costs", total));
    outputs
}

fn wall_volume(formula: &'static str, v: f64) -> OutputField {
    OutputField::new("wallVolume", "Volume of Wall", Unit::CubicMeter, formula, v)
}

fn by_wall(inputs: &FormInputs) -> Vec<OutputField> {
    let v = inputs.number("wallL") * inputs.number("wallH") * inputs.number("wallT") / MM_PER_M;
    let mut outputs = vec![wall_volume("l X h X (t / 1000)", v)];
    outputs.extend(takeoff(inputs, v, Vec::new()));
    outputs
}

fn cavity_wall(inputs: &FormInputs) -> Vec<OutputField> {
    let l = inputs.number("wallL");
    let h = inputs.number("wallH");
    let v = l * inputs.number("wallW") * h * 2.0;
    let cavity = inputs.number("cavityThickness") / MM_PER_M * l * h;

    let extra = vec![
        OutputField::new("cavityVolume", "Cavity Volume", Unit::CubicMeter, "(tc / 1000) X l X h", cavity),
        OutputField::new(
            "cavityCost",
            "Cavity Material Cost",
            Unit::Currency,
            "Cavity Volume X C2",
            cavity * inputs.number("cavityMaterialPrice"),
        ),
    ];

    let mut outputs = vec![wall_volume("l X w X h X 2", v)];
    outputs.extend(takeoff(inputs, v, extra));
    outputs
}

fn by_volume(inputs: &FormInputs) -> Vec<OutputField> {
    takeoff(inputs, inputs.number("wallVolume"), Vec::new())
}

fn english_cross_bond(inputs: &FormInputs) -> Vec<OutputField> {
    // One-brick wall: thickness is the brick length
    let thickness = inputs.number("brickL") / MM_PER_M;
    let openings: f64 = [("w1", "h1"), ("w2", "h2"), ("w3", "h3")]
        .iter()
        .map(|(w, h)| inputs.number(w) * inputs.number(h) * thickness)
        .sum();
    let v = inputs.number("wallL") * inputs.number("wallH") * thickness - openings;

    let mut outputs = vec![wall_volume("(l X h X L) - (W1 X H1 X L + W2 X H2 X L + W3 X H3 X L)", v)];
    outputs.extend(takeoff(inputs, v, Vec::new()));
    outputs
}

fn king_closer(inputs: &FormInputs) -> Vec<OutputField> {
    let h = inputs.number("wallH");
    let volume = inputs.number("wallL") * h * inputs.number("brickW") / MM_PER_M;
    let course = (inputs.number("brickT") + inputs.number("joint")) / MM_PER_M;
    let closers = if course > 0.0 { 2.0 * h / course } else { 0.0 };

    vec![
        wall_volume("l X h X W", volume),
        OutputField::new("kingClosers", "No. of King Closers", Unit::Count, "2 X (h / (T + j))", closers),
    ]
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{approx, run, value};

    const BRICK: [(&str, &str); 4] = [("brickL", "190"), ("brickW", "90"), ("brickT", "90"), ("joint", "10")];
    const MIX: [(&str, &str); 5] = [
        ("cementRatio", "1"),
        ("sandRatio", "6"),
        ("brickPrice", "8"),
        ("cementPrice", "400"),
        ("sandPrice", "1500"),
    ];

    fn pairs(extra: &[(&'static str, &'static str)]) -> Vec<(&'static str, &'static str)> {
        BRICK.iter().chain(MIX.iter()).chain(extra.iter()).copied().collect()
    }

    #[test]
    fn test_by_wall_takeoff() {
        let out = run("brick-by-wall", &pairs(&[("wallL", "5"), ("wallH", "3"), ("wallT", "230")]));
        let v = 5.0 * 3.0 * 0.23;
        let bricks = v / (0.2 * 0.09 * 0.1);
        let dry = (v - bricks * 0.19 * 0.09 * 0.09) * 1.42;
        let bags = dry / (7.0 * 0.035);
        let sand = 6.0 * dry / 7.0;

        approx(value(&out, "wallVolume"), v);
        approx(value(&out, "bricks"), bricks);
        approx(value(&out, "mortarDryVolume"), dry);
        approx(value(&out, "cementBags"), bags);
        approx(value(&out, "sand"), sand);
        approx(value(&out, "totalCost"), bricks * 8.0 + bags * 400.0 + sand * 1500.0);
    }

    #[test]
    fn test_by_volume_matches_by_wall() {
        let wall = run("brick-by-wall", &pairs(&[("wallL", "5"), ("wallH", "3"), ("wallT", "230")]));
        let volume = run("brick-by-volume", &pairs(&[("wallVolume", "3.45")]));
        approx(value(&volume, "bricks"), value(&wall, "bricks"));
        approx(value(&volume, "totalCost"), value(&wall, "totalCost"));
    }

    #[test]
    fn test_cavity_wall_adds_cavity_cost() {
        let out = run(
            "brick-cavity-wall",
            &pairs(&[
                ("wallL", "4"),
                ("wallW", "0.1"),
                ("wallH", "3"),
                ("cavityThickness", "50"),
                ("cavityMaterialPrice", "1000"),
            ]),
        );
        approx(value(&out, "wallVolume"), 2.4);
        approx(value(&out, "cavityVolume"), 0.6);
        approx(value(&out, "cavityCost"), 600.0);
        let without_cavity =
            value(&out, "brickCost") + value(&out, "cementCost") + value(&out, "sandCost");
        approx(value(&out, "totalCost"), without_cavity + 600.0);
    }

    #[test]
    fn test_english_cross_bond_openings() {
        let out = run(
            "brick-english-cross-bond",
            &pairs(&[("wallL", "5"), ("wallH", "3"), ("w1", "1"), ("h1", "2"), ("w2", "1.2"), ("h2", "1.5")]),
        );
        approx(value(&out, "wallVolume"), 15.0 * 0.19 - (2.0 + 1.8) * 0.19);
    }

    #[test]
    fn test_zero_ratio_and_zero_brick() {
        let out = run("brick-by-volume", &[("wallVolume", "2")]);
        assert_eq!(value(&out, "bricks"), 0.0);
        assert_eq!(value(&out, "cementBags"), 0.0);
        assert_eq!(value(&out, "sand"), 0.0);
        approx(value(&out, "mortarDryVolume"), 2.84);
    }

    #[test]
    fn test_king_closer() {
        let out = run(
            "brick-king-closer",
            &[("brickW", "90"), ("brickT", "90"), ("joint", "10"), ("wallL", "5"), ("wallH", "3")],
        );
        approx(value(&out, "wallVolume"), 5.0 * 3.0 * 0.09);
        approx(value(&out, "kingClosers"), 60.0);

        let empty = run("brick-king-closer", &[("wallH", "3")]);
        assert_eq!(value(&empty, "kingClosers"), 0.0);
    }
}
