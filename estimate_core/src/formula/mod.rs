//! # Formula Specifications
//!
//! A [`FormulaSpec`] describes one calculator page: its ordered input schema
//! and a pure compute function from the raw inputs to derived outputs. Every
//! page in the catalog is one `FormulaSpec`; the form, presenter, report and
//! CLI are all generic over it.
//!
//! ## Structure
//!
//! ```text
//! FormulaSpec
//! ├── id / title / category
//! ├── fields: Vec<InputField>      (key, label, symbol, unit, kind, default)
//! ├── compute: fn(&FormInputs) -> Vec<OutputField>
//! └── banner / total_decimals      (which output is the highlighted total)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::catalog;
//! use estimate_core::formula::FormInputs;
//!
//! let spec = catalog::get("straight-bar").unwrap();
//! let inputs = FormInputs::from_pairs([("barLength", "12"), ("diameter", "12"), ("noOfBars", "5")]);
//! let outputs = spec.evaluate(&inputs);
//! assert_eq!(outputs[0].value, 60.0);
//! ```

mod inputs;
mod output;

pub use inputs::{coerce_number, FormInputs};
pub use output::{OutputField, Unit};

pub use crate::equations::guarded_div;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::units::UnitSystem;

/// Key of the metric/imperial select on pages that offer one
pub const UNIT_SYSTEM_KEY: &str = "unitType";

// ============================================================================
// Categories
// ============================================================================

/// Calculator categories, in the order the catalog lists them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormulaCategory {
    SteelCuttingLength,
    SteelWeight,
    SteelColumn,
    SteelBeam,
    SteelSlab,
    SteelFooting,
    Metal,
    Brickwork,
    Concrete,
    Excavation,
    Flooring,
    Roof,
    WaterTank,
    SwimmingPool,
    WaterProofing,
}

impl FormulaCategory {
    /// All categories in sort order
    pub const ALL: [FormulaCategory; 15] = [
        FormulaCategory::SteelCuttingLength,
        FormulaCategory::SteelWeight,
        FormulaCategory::SteelColumn,
        FormulaCategory::SteelBeam,
        FormulaCategory::SteelSlab,
        FormulaCategory::SteelFooting,
        FormulaCategory::Metal,
        FormulaCategory::Brickwork,
        FormulaCategory::Concrete,
        FormulaCategory::Excavation,
        FormulaCategory::Flooring,
        FormulaCategory::Roof,
        FormulaCategory::WaterTank,
        FormulaCategory::SwimmingPool,
        FormulaCategory::WaterProofing,
    ];

    /// Display name for the category
    pub fn display_name(&self) -> &'static str {
        match self {
            FormulaCategory::SteelCuttingLength => "Steel Cutting Length",
            FormulaCategory::SteelWeight => "Reinforcement Weight",
            FormulaCategory::SteelColumn => "Column Steel",
            FormulaCategory::SteelBeam => "Beam Steel",
            FormulaCategory::SteelSlab => "Slab Steel",
            FormulaCategory::SteelFooting => "Footing Steel",
            FormulaCategory::Metal => "Metal Quantity",
            FormulaCategory::Brickwork => "Brickwork",
            FormulaCategory::Concrete => "Concrete",
            FormulaCategory::Excavation => "Excavation",
            FormulaCategory::Flooring => "Flooring",
            FormulaCategory::Roof => "Roof Area",
            FormulaCategory::WaterTank => "Water Tank",
            FormulaCategory::SwimmingPool => "Swimming Pool",
            FormulaCategory::WaterProofing => "Water Proofing",
        }
    }

    /// Sort order for listings
    pub fn sort_order(&self) -> u8 {
        Self::ALL
            .iter()
            .position(|c| c == self)
            .map(|i| i as u8 + 1)
            .unwrap_or(u8::MAX)
    }

    /// Parse a category from its snake_case name or display name
    pub fn parse(value: &str) -> Option<Self> {
        let wanted = value.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        Self::ALL.into_iter().find(|c| {
            c.display_name().to_ascii_lowercase().replace(' ', "_") == wanted
                || serde_json::to_value(c)
                    .ok()
                    .and_then(|v| v.as_str().map(|s| s == wanted))
                    .unwrap_or(false)
        })
    }
}

// ============================================================================
// Input Schema
// ============================================================================

/// One option of a select field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectOption {
    /// Stored value
    pub value: &'static str,
    /// Label shown to the user
    pub label: &'static str,
    /// Values written into other fields when this option is selected
    /// (e.g. a metal type fills the density field)
    pub fills: Vec<(&'static str, String)>,
}

impl SelectOption {
    pub fn new(value: &'static str, label: &'static str) -> Self {
        SelectOption {
            value,
            label,
            fills: Vec::new(),
        }
    }

    /// Also write `value` into field `key` when selected
    pub fn fills(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.fills.push((key, value.into()));
        self
    }
}

/// How an input is entered
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "options", rename_all = "snake_case")]
pub enum FieldKind {
    Number,
    Select(Vec<SelectOption>),
}

/// One input of a calculator form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputField {
    /// Key into [`FormInputs`]
    pub key: &'static str,
    pub label: &'static str,
    /// Symbol used in formula strings and the detailed view (e.g. "L", "d")
    pub symbol: &'static str,
    /// Unit the value is entered in ("mm", "m", "₹/Kg", ...); empty for counts
    pub unit: &'static str,
    pub kind: FieldKind,
    /// Value restored on reset
    pub default: String,
    /// Unit shown instead of `unit` while the page's unit system is imperial
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imperial_unit: Option<&'static str>,
}

impl InputField {
    /// Numeric field with an empty default
    pub fn number(key: &'static str, label: &'static str, symbol: &'static str, unit: &'static str) -> Self {
        InputField {
            key,
            label,
            symbol,
            unit,
            kind: FieldKind::Number,
            default: String::new(),
            imperial_unit: None,
        }
    }

    /// Select field; `default` must be one of the option values
    pub fn select(
        key: &'static str,
        label: &'static str,
        options: Vec<SelectOption>,
        default: &'static str,
    ) -> Self {
        InputField {
            key,
            label,
            symbol: "",
            unit: "",
            kind: FieldKind::Select(options),
            default: default.to_string(),
            imperial_unit: None,
        }
    }

    /// Replace the default value
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = default.into();
        self
    }

    /// Unit to show while the `unitType` select is imperial
    pub fn with_imperial_unit(mut self, unit: &'static str) -> Self {
        self.imperial_unit = Some(unit);
        self
    }

    /// Unit the value is entered in, given the rest of the form
    pub fn unit_for(&self, inputs: &FormInputs) -> &'static str {
        match (self.imperial_unit, UnitSystem::from_select(inputs.text(UNIT_SYSTEM_KEY))) {
            (Some(imperial), UnitSystem::Imperial) => imperial,
            _ => self.unit,
        }
    }

    /// Options of a select field (empty for numeric fields)
    pub fn options(&self) -> &[SelectOption] {
        match &self.kind {
            FieldKind::Select(options) => options,
            FieldKind::Number => &[],
        }
    }

    /// Look up a select option by value
    pub fn option(&self, value: &str) -> Option<&SelectOption> {
        self.options().iter().find(|o| o.value == value)
    }

    /// True for select fields
    pub fn is_select(&self) -> bool {
        matches!(self.kind, FieldKind::Select(_))
    }
}

// ============================================================================
// Formula Spec
// ============================================================================

/// Pure compute function of a calculator
pub type ComputeFn = fn(&FormInputs) -> Vec<OutputField>;

/// One calculator variant: input schema plus pure compute function.
///
/// Specs are built once by the catalog and never mutated.
#[derive(Clone, Serialize)]
pub struct FormulaSpec {
    /// Page id, e.g. "flat-bar-metal"
    pub id: &'static str,
    pub title: &'static str,
    pub category: FormulaCategory,
    /// Ordered input schema
    pub fields: Vec<InputField>,
    #[serde(skip)]
    pub compute: ComputeFn,
    /// Key of the output shown as the highlighted total, if any
    pub banner: Option<&'static str>,
    /// Decimal places of the total banner
    pub total_decimals: usize,
}

impl std::fmt::Debug for FormulaSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormulaSpec")
            .field("id", &self.id)
            .field("category", &self.category)
            .field("fields", &self.fields.len())
            .field("banner", &self.banner)
            .finish()
    }
}

impl FormulaSpec {
    pub fn new(id: &'static str, title: &'static str, category: FormulaCategory, compute: ComputeFn) -> Self {
        FormulaSpec {
            id,
            title,
            category,
            fields: Vec::new(),
            compute,
            banner: None,
            total_decimals: 2,
        }
    }

    /// Append an input field
    pub fn field(mut self, field: InputField) -> Self {
        self.fields.push(field);
        self
    }

    /// Highlight output `key` as the total, shown with `decimals` places
    pub fn banner(mut self, key: &'static str, decimals: usize) -> Self {
        self.banner = Some(key);
        self.total_decimals = decimals;
        self
    }

    /// Evaluate the formula over an input snapshot.
    ///
    /// Infallible and deterministic: the same inputs always give the same
    /// outputs, and every value is finite.
    pub fn evaluate(&self, inputs: &FormInputs) -> Vec<OutputField> {
        let outputs: Vec<OutputField> = (self.compute)(inputs)
            .into_iter()
            .map(|mut o| {
                // -0.0 also becomes 0.0 so blank forms never show "-0.000"
                if !o.value.is_finite() || o.value == 0.0 {
                    o.value = 0.0;
                }
                o
            })
            .collect();
        debug!(formula = self.id, outputs = outputs.len(), "evaluated formula");
        outputs
    }

    /// Output labels, units and formula strings (evaluated over blank inputs)
    pub fn output_schema(&self) -> Vec<OutputField> {
        (self.compute)(&FormInputs::new())
    }

    /// Look up an input field by key
    pub fn input(&self, key: &str) -> Option<&InputField> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// Inputs holding every field's default value
    pub fn default_inputs(&self) -> FormInputs {
        FormInputs::from_pairs(self.fields.iter().map(|f| (f.key, f.default.clone())))
    }

    /// The banner output among `outputs`, if this page has one
    pub fn banner_output<'a>(&self, outputs: &'a [OutputField]) -> Option<&'a OutputField> {
        let key = self.banner?;
        outputs.iter().find(|o| o.key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doubled(inputs: &FormInputs) -> Vec<OutputField> {
        vec![
            OutputField::new("twice", "Twice", Unit::Meter, "2XL", 2.0 * inputs.number("L")),
            OutputField::new("ratio", "Ratio", Unit::Count, "L/0", inputs.number("L") / 0.0),
        ]
    }

    fn spec() -> FormulaSpec {
        FormulaSpec::new("doubled", "Doubled", FormulaCategory::Metal, doubled)
            .field(InputField::number("L", "Length", "L", "m"))
            .field(InputField::number("N", "Count", "N", "").with_default("1"))
            .banner("twice", 3)
    }

    #[test]
    fn test_evaluate_zeroes_non_finite_outputs() {
        let outputs = spec().evaluate(&FormInputs::from_pairs([("L", "4")]));
        assert_eq!(outputs[0].value, 8.0);
        assert_eq!(outputs[1].value, 0.0);
    }

    fn offset_length(inputs: &FormInputs) -> Vec<OutputField> {
        // (X - 40) X N with a blank count is -40 X 0 = -0.0
        let value = (inputs.number("X") - 40.0) * inputs.number("N");
        vec![OutputField::new("len", "Length", Unit::Meter, "(X - 40) X N", value)]
    }

    #[test]
    fn test_evaluate_clears_negative_zero() {
        let spec = FormulaSpec::new("offset", "Offset", FormulaCategory::SteelColumn, offset_length);
        let value = spec.evaluate(&FormInputs::new())[0].value;
        assert_eq!(value, 0.0);
        assert!(value.is_sign_positive());
    }

    #[test]
    fn test_unit_follows_unit_system() {
        let field = InputField::number("a", "Base Length a", "a", "mm").with_imperial_unit("ft");
        assert_eq!(field.unit_for(&FormInputs::new()), "mm");
        assert_eq!(field.unit_for(&FormInputs::from_pairs([(UNIT_SYSTEM_KEY, "metric")])), "mm");
        assert_eq!(field.unit_for(&FormInputs::from_pairs([(UNIT_SYSTEM_KEY, "imperial")])), "ft");

        let plain = InputField::number("N", "Count", "N", "Nos");
        assert_eq!(plain.unit_for(&FormInputs::from_pairs([(UNIT_SYSTEM_KEY, "imperial")])), "Nos");
    }

    #[test]
    fn test_default_inputs_and_banner() {
        let spec = spec();
        let defaults = spec.default_inputs();
        assert_eq!(defaults.raw("N"), Some("1"));
        assert_eq!(defaults.raw("L"), Some(""));

        let outputs = spec.evaluate(&defaults);
        assert_eq!(spec.banner_output(&outputs).map(|o| o.key), Some("twice"));
        assert_eq!(spec.total_decimals, 3);
    }

    #[test]
    fn test_category_order_and_parse() {
        assert_eq!(FormulaCategory::SteelCuttingLength.sort_order(), 1);
        assert!(FormulaCategory::Metal.sort_order() < FormulaCategory::Roof.sort_order());
        assert_eq!(FormulaCategory::parse("roof"), Some(FormulaCategory::Roof));
        assert_eq!(FormulaCategory::parse("Roof Area"), Some(FormulaCategory::Roof));
        assert_eq!(FormulaCategory::parse("steel-column"), Some(FormulaCategory::SteelColumn));
        assert_eq!(FormulaCategory::parse("nothing"), None);
    }

    #[test]
    fn test_select_option_lookup() {
        let field = InputField::select(
            "metalType",
            "Metal",
            vec![SelectOption::new("steel", "Steel").fills("density", "7850.00")],
            "steel",
        );
        assert!(field.is_select());
        assert_eq!(field.option("steel").map(|o| o.fills.len()), Some(1));
        assert!(field.option("gold").is_none());
    }
}
