//! # Water Tank, Swimming Pool and Water Proofing

use std::f64::consts::PI;

use super::{m, mm};
use crate::equations::guarded_div;
use crate::formula::{FormInputs, FormulaCategory, FormulaSpec, OutputField, Unit};
use crate::units::{CubicMeters, MM_PER_M};

/// US gallons per m³, as used on the pool page
const GALLONS_PER_M3: f64 = 264.0;

pub(crate) fn specs() -> Vec<FormulaSpec> {
    vec![
        FormulaSpec::new(
            "water-tank-partly-filled",
            "Partly Filled Rectangular Water Tank",
            FormulaCategory::WaterTank,
            partly_filled_tank,
        )
        .field(m("length", "Length L", "L"))
        .field(m("width", "Width W", "W"))
        .field(m("height", "Height H", "H"))
        .field(m("waterLevel", "Water Level", "Lw"))
        .banner("waterQuantity", 2),
        FormulaSpec::new(
            "oval-swimming-pool",
            "Oval Swimming Pool",
            FormulaCategory::SwimmingPool,
            oval_pool,
        )
        .field(m("radiusA", "Radius Ra", "Ra"))
        .field(m("radiusB", "Radius Rb", "Rb"))
        .field(m("depth", "Depth d", "d"))
        .banner("volumeLitre", 2),
        FormulaSpec::new(
            "water-proofing",
            "Water Proofing",
            FormulaCategory::WaterProofing,
            water_proofing,
        )
        .field(mm("brickLength", "Brick Length L", "L"))
        .field(mm("brickWidth", "Brick Width W", "W"))
        .field(mm("brickDepth", "Brick Depth D", "D"))
        .field(m("surfaceLength", "Surface Length l", "l"))
        .field(m("surfaceWidth", "Surface Width w", "w"))
        .field(mm("waterProofingDepth", "Water Proofing Depth d", "d"))
        .field(mm("mortarJoint", "Mortar Joint J", "J"))
        .banner("mortarVolume", 3),
    ]
}

fn partly_filled_tank(inputs: &FormInputs) -> Vec<OutputField> {
    let base = inputs.number("length") * inputs.number("width");
    let capacity = CubicMeters(base * inputs.number("height")).litres();
    let water = CubicMeters(base * inputs.number("waterLevel")).litres();

    vec![
        OutputField::new("totalCapacity", "Total Capacity", Unit::Litre, "L X W X H X 1000", capacity),
        OutputField::new("waterQuantity", "Water Quantity", Unit::Litre, "L X W X Lw X 1000", water),
        OutputField::new(
            "filledPercentage",
            "Filled Percentage",
            Unit::Percent,
            "((L X W X Lw X 1000) / (L X W X H X 1000)) X 100",
            guarded_div(water, capacity) * 100.0,
        ),
    ]
}

fn oval_pool(inputs: &FormInputs) -> Vec<OutputField> {
    let volume = PI * inputs.number("radiusA") * inputs.number("radiusB") * inputs.number("depth");

    vec![
        OutputField::new("volume", "Volume", Unit::CubicMeter, "π X Ra X Rb X d", volume),
        OutputField::new("volumeLitre", "Volume in Litres", Unit::Litre, "π X Ra X Rb X d X 1000", CubicMeters(volume).litres()),
        OutputField::new(
            "volumeGallon",
            "Volume in Gallons",
            Unit::Gallon,
            "π X Ra X Rb X d X 264",
            volume * GALLONS_PER_M3,
        ),
    ]
}

/// Brick-on-edge water proofing course.
///
/// The brick count divides the surface area by the *sum* of the brick length
/// and width cells, matching the published worked example.
fn water_proofing(inputs: &FormInputs) -> Vec<OutputField> {
    let to_m = |key: &str| inputs.number(key) / MM_PER_M;
    let (l, w, d, j) = (to_m("brickLength"), to_m("brickWidth"), to_m("brickDepth"), to_m("mortarJoint"));
    let surface = inputs.number("surfaceLength") * inputs.number("surfaceWidth");

    let bricks = guarded_div(surface, (l + j) + (w + j));
    let total = surface * to_m("waterProofingDepth");
    let mortar = total - bricks * l * w * d;

    vec![
        OutputField::new(
            "bricks",
            "No. of Bricks",
            Unit::Count,
            "l X w / ((L/1000 + J/1000) + (W/1000 + J/1000))",
            bricks,
        ),
        OutputField::new("totalVolume", "Total Volume", Unit::CubicMeter, "l X w X d / 1000", total),
        OutputField::new(
            "mortarVolume",
            "Volume of Mortar",
            Unit::CubicMeter,
            "(l X w X d / 1000) - (Bricks X L/1000 X W/1000 X D/1000)",
            mortar,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{approx, run, value};

    #[test]
    fn test_partly_filled_tank() {
        let out = run(
            "water-tank-partly-filled",
            &[("length", "2"), ("width", "1.5"), ("height", "1.2"), ("waterLevel", "0.9")],
        );
        approx(value(&out, "totalCapacity"), 3600.0);
        approx(value(&out, "waterQuantity"), 2700.0);
        approx(value(&out, "filledPercentage"), 75.0);
    }

    #[test]
    fn test_empty_tank_percentage_is_zero() {
        let out = run("water-tank-partly-filled", &[("waterLevel", "1")]);
        assert_eq!(value(&out, "filledPercentage"), 0.0);
    }

    #[test]
    fn test_oval_pool() {
        let out = run("oval-swimming-pool", &[("radiusA", "5"), ("radiusB", "3"), ("depth", "1.5")]);
        let v = std::f64::consts::PI * 22.5;
        approx(value(&out, "volume"), v);
        approx(value(&out, "volumeLitre"), v * 1000.0);
        approx(value(&out, "volumeGallon"), v * 264.0);
    }

    #[test]
    fn test_water_proofing() {
        let out = run(
            "water-proofing",
            &[
                ("brickLength", "190"),
                ("brickWidth", "90"),
                ("brickDepth", "90"),
                ("surfaceLength", "5"),
                ("surfaceWidth", "3"),
                ("waterProofingDepth", "100"),
                ("mortarJoint", "10"),
            ],
        );
        let bricks = 15.0 / (0.2 + 0.1);
        approx(value(&out, "bricks"), bricks);
        approx(value(&out, "totalVolume"), 1.5);
        approx(value(&out, "mortarVolume"), 1.5 - bricks * 0.19 * 0.09 * 0.09);
    }
}
