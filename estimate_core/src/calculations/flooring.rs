//! # Flooring
//!
//! Floor tiles with skirting, paver blocks and tile grout.
//!
//! Room sizes on the flooring page are in metres; every other length on
//! these pages is entered in mm.

use super::{m, mm, price};
use crate::equations::guarded_div;
use crate::formula::{FormInputs, FormulaCategory, FormulaSpec, InputField, OutputField, Unit};
use crate::materials::{BulkMaterial, MORTAR};
use crate::units::MM_PER_M;

/// Bedding mortar thickness under tiles (m)
const BEDDING_THICKNESS_M: f64 = 0.01;

/// Sand parts per cement part in the bedding mortar
const BEDDING_SAND_PARTS: f64 = 6.0;

pub(crate) fn specs() -> Vec<FormulaSpec> {
    use FormulaCategory::Flooring;

    vec![
        FormulaSpec::new("flooring", "Flooring", Flooring, flooring)
            .field(m("roomLengthL", "Room Length L", "L"))
            .field(m("roomWidthW", "Room Width W", "W"))
            .field(mm("doorWidthD", "Door Width d", "d"))
            .field(mm("skirtingHeightH", "Skirting Height H", "H"))
            .field(mm("tileLengthl", "Tile Length l", "l"))
            .field(mm("tileWidthw", "Tile Width w", "w"))
            .field(InputField::number("wastageS", "Wastage S", "S", "%"))
            .banner("tiles", 3),
        FormulaSpec::new("paver", "Paver Calculation", Flooring, paver)
            .field(mm("surfaceLength", "Surface Length", "L"))
            .field(mm("surfaceWidth", "Surface Width", "W"))
            .field(mm("paverLength", "Paver Length", "l"))
            .field(mm("paverWidth", "Paver Width", "w"))
            .field(price("paverPrice", "Paver Price", "R", "¤/unit"))
            .field(price("installationCost", "Installation Cost", "I", "¤/sq.m."))
            .banner("totalExpenses", 2),
        FormulaSpec::new("tile-grout", "Tile Grout Calculation", Flooring, tile_grout)
            .field(mm("roomLength", "Room Length", "L"))
            .field(mm("roomWidth", "Room Width", "W"))
            .field(mm("tileLength", "Tile Length", "l"))
            .field(mm("tileWidth", "Tile Width", "w"))
            .field(mm("gapWidth", "Gap Width", "t"))
            .field(mm("gapDepth", "Gap Depth", "d"))
            .field(InputField::number("weightPerBag", "Weight per Bag", "K", "Kg"))
            .banner("groutBags", 3),
    ]
}

fn flooring(inputs: &FormInputs) -> Vec<OutputField> {
    let l = inputs.number("roomLengthL");
    let w = inputs.number("roomWidthW");
    let door = inputs.number("doorWidthD") / MM_PER_M;
    let skirting_h = inputs.number("skirtingHeightH") / MM_PER_M;
    let tile = inputs.number("tileLengthl") / MM_PER_M * inputs.number("tileWidthw") / MM_PER_M;
    let wastage = inputs.number("wastageS");

    let floor = l * w;
    let skirting = (2.0 * (l + w) - door) * skirting_h;
    let tiles = if tile > 0.0 {
        (floor + skirting) / tile * (1.0 + wastage / 100.0)
    } else {
        0.0
    };

    let bedding = floor * BEDDING_THICKNESS_M;
    let cement_bags = bedding / MORTAR.cement_bag_volume_m3;
    let sand_kg = bedding * BEDDING_SAND_PARTS * BulkMaterial::FlooringSand.density_kg_m3();

    vec![
        OutputField::new("floorArea", "Floor Area", Unit::SquareMeter, "L X W", floor),
        OutputField::new("skirtingArea", "Skirting Area", Unit::SquareMeter, "(2 X (L + W) - d / 1000) X H / 1000", skirting),
        OutputField::new(
            "tiles",
            "No. of Tiles",
            Unit::Count,
            "((L X W + (2 X (L + W) - d / 1000) X H / 1000) / ((l / 1000) X (w / 1000))) X (1 + S / 100)",
            tiles,
        ),
        OutputField::new("cementBags", "Cement", Unit::Bags, "(L X W X 0.01) / 0.035", cement_bags),
        OutputField::new("cementKg", "Cement", Unit::Kilogram, "((L X W X 0.01) / 0.035) X 50", cement_bags * MORTAR.cement_bag_weight_kg),
        OutputField::new("sandKg", "Sand", Unit::Kilogram, "(L X W X 0.01 X 6) X 1550", sand_kg),
    ]
}

fn paver(inputs: &FormInputs) -> Vec<OutputField> {
    let area = inputs.number("surfaceLength") / MM_PER_M * inputs.number("surfaceWidth") / MM_PER_M;
    let paver_area = inputs.number("paverLength") / MM_PER_M * inputs.number("paverWidth") / MM_PER_M;

    let count = guarded_div(area, paver_area);
    let paver_cost = count * inputs.number("paverPrice");
    let install = area * inputs.number("installationCost");

    vec![
        OutputField::new("surfaceArea", "Surface Area", Unit::SquareMeter, "L X W", area),
        OutputField::new("pavers", "Number of Pavers", Unit::Count, "(L X W) / (l X w)", count),
        OutputField::new("paverCost", "Paver Cost", Unit::Currency, "((L X W) / (l X w)) X R", paver_cost),
        OutputField::new("installationCost", "Total Installation Cost", Unit::Currency, "L X W X I", install),
        OutputField::new(
            "totalExpenses",
            "Total Expenses",
            Unit::Currency,
            "((L X W) / (l X w)) X R + L X W X I",
            paver_cost + install,
        ),
    ]
}

fn tile_grout(inputs: &FormInputs) -> Vec<OutputField> {
    let to_m = |key: &str| inputs.number(key) / MM_PER_M;
    let (l, w) = (to_m("tileLength"), to_m("tileWidth"));
    let gap = to_m("gapWidth");

    let area = to_m("roomLength") * to_m("roomWidth");
    let tiles = guarded_div(area, (w + gap) * (l + gap));
    let volume = (area - tiles * l * w) * to_m("gapDepth");
    let weight = volume * BulkMaterial::Grout.density_kg_m3();
    let bags = guarded_div(weight, inputs.number("weightPerBag"));

    vec![
        OutputField::new("roomArea", "Total Room Area", Unit::SquareMeter, "L X W", area),
        OutputField::new("tiles", "No. of Tiles", Unit::Count, "(L X W) / ((w + t) X (l + t))", tiles),
        OutputField::new("groutVolume", "Grout Volume", Unit::CubicMeter, "(L X W - Tiles X l X w) X d", volume),
        OutputField::new("groutWeight", "Grout Weight", Unit::Kilogram, "Grout Volume X 1600", weight),
        OutputField::new("groutBags", "Grout Bags", Unit::Bags, "Grout Weight / K", bags),
    ]
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{approx, run, value};

    #[test]
    fn test_flooring_with_skirting_and_wastage() {
        let out = run(
            "flooring",
            &[
                ("roomLengthL", "4"),
                ("roomWidthW", "3"),
                ("doorWidthD", "900"),
                ("skirtingHeightH", "100"),
                ("tileLengthl", "600"),
                ("tileWidthw", "600"),
                ("wastageS", "5"),
            ],
        );
        let skirting = (14.0 - 0.9) * 0.1;
        approx(value(&out, "floorArea"), 12.0);
        approx(value(&out, "skirtingArea"), skirting);
        approx(value(&out, "tiles"), (12.0 + skirting) / 0.36 * 1.05);
        approx(value(&out, "cementBags"), 0.12 / 0.035);
        approx(value(&out, "cementKg"), 0.12 / 0.035 * 50.0);
        approx(value(&out, "sandKg"), 0.12 * 6.0 * 1550.0);
    }

    #[test]
    fn test_flooring_without_tile_size() {
        let out = run("flooring", &[("roomLengthL", "4"), ("roomWidthW", "3")]);
        assert_eq!(value(&out, "tiles"), 0.0);
    }

    #[test]
    fn test_paver() {
        let out = run(
            "paver",
            &[
                ("surfaceLength", "10000"),
                ("surfaceWidth", "5000"),
                ("paverLength", "200"),
                ("paverWidth", "100"),
                ("paverPrice", "12"),
                ("installationCost", "150"),
            ],
        );
        approx(value(&out, "surfaceArea"), 50.0);
        approx(value(&out, "pavers"), 2500.0);
        approx(value(&out, "paverCost"), 30000.0);
        approx(value(&out, "installationCost"), 7500.0);
        approx(value(&out, "totalExpenses"), 37500.0);
    }

    #[test]
    fn test_tile_grout() {
        let out = run(
            "tile-grout",
            &[
                ("roomLength", "4000"),
                ("roomWidth", "3000"),
                ("tileLength", "300"),
                ("tileWidth", "300"),
                ("gapWidth", "3"),
                ("gapDepth", "10"),
                ("weightPerBag", "5"),
            ],
        );
        let tiles = 12.0 / (0.303 * 0.303);
        let volume = (12.0 - tiles * 0.09) * 0.01;
        approx(value(&out, "tiles"), tiles);
        approx(value(&out, "groutVolume"), volume);
        approx(value(&out, "groutWeight"), volume * 1600.0);
        approx(value(&out, "groutBags"), volume * 1600.0 / 5.0);
    }

    #[test]
    fn test_tile_grout_blank_bag_weight() {
        let out = run("tile-grout", &[("roomLength", "4000"), ("roomWidth", "3000"), ("gapDepth", "10")]);
        assert_eq!(value(&out, "tiles"), 0.0);
        assert_eq!(value(&out, "groutBags"), 0.0);
        approx(value(&out, "groutWeight"), 12.0 * 0.01 * 1600.0);
    }
}
