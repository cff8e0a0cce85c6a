//! # Calculator Catalog
//!
//! Registry of every calculator page. Specs are built once on first access
//! and listed by category, then in declaration order within a category.
//!
//! ## Usage
//!
//! ```rust
//! use estimate_core::catalog;
//! use estimate_core::formula::FormulaCategory;
//!
//! let roofs = catalog::in_category(FormulaCategory::Roof);
//! assert_eq!(roofs[0].id, "flat-roof");
//!
//! assert!(catalog::get("gutter").is_err());
//! ```

use once_cell::sync::Lazy;

use crate::calculations;
use crate::errors::{CalcError, CalcResult};
use crate::formula::{FormInputs, FormulaCategory, FormulaSpec};
use crate::presenter::PresentationConfig;

static CATALOG: Lazy<Vec<FormulaSpec>> = Lazy::new(|| {
    let mut specs = calculations::specs();
    // Stable: declaration order is kept inside a category
    specs.sort_by_key(|s| s.category.sort_order());
    specs
});

/// Every calculator, in catalog order
pub fn all() -> &'static [FormulaSpec] {
    &CATALOG
}

/// Look up a calculator by page id
pub fn get(id: &str) -> CalcResult<&'static FormulaSpec> {
    CATALOG
        .iter()
        .find(|s| s.id == id)
        .ok_or_else(|| CalcError::unknown_calculator(id))
}

/// Calculators of one category, in declaration order
pub fn in_category(category: FormulaCategory) -> Vec<&'static FormulaSpec> {
    CATALOG.iter().filter(|s| s.category == category).collect()
}

/// Categories that have at least one calculator, in sort order
pub fn categories() -> Vec<FormulaCategory> {
    FormulaCategory::ALL
        .into_iter()
        .filter(|c| CATALOG.iter().any(|s| s.category == *c))
        .collect()
}

/// Markdown reference of every calculator: inputs, outputs and formulas.
///
/// Written to `estimate_core/src/catalog/CATALOG.md` by the `gen-catalog`
/// binary.
pub fn generate_catalog_markdown() -> String {
    let config = PresentationConfig::default();
    let mut output = String::with_capacity(48_000);

    output.push_str(
        r#"# Site Estimate Calculator Reference

> **Auto-generated from source code. Do not edit manually.**
>
> Regenerate with: `cargo run --bin gen-catalog`

Every calculator page, its inputs and the formula behind each output.
Blank or invalid inputs read as 0 and any division by a zero input gives 0.
Money amounts are shown with `¤`, replaced by the configured currency symbol.

---

"#,
    );

    for category in categories() {
        output.push_str(&format!("## {}\n\n", category.display_name()));

        for spec in in_category(category) {
            output.push_str(&format!("### {}\n\n", spec.title));
            output.push_str(&format!("Id: `{}`\n\n", spec.id));

            output.push_str("**Inputs:**\n\n");
            output.push_str("| Key | Label | Symbol | Units | Default |\n");
            output.push_str("|-----|-------|--------|-------|---------|\n");
            for field in &spec.fields {
                let default = if field.is_select() {
                    let options: Vec<&str> = field.options().iter().map(|o| o.value).collect();
                    format!("{} (one of {})", field.default, options.join(", "))
                } else {
                    field.default.clone()
                };
                let units = match field.imperial_unit {
                    Some(imperial) => format!("{} ({} imperial)", field.unit, imperial),
                    None => field.unit.to_string(),
                };
                output.push_str(&format!(
                    "| `{}` | {} | {} | {} | {} |\n",
                    field.key, field.label, field.symbol, units, default
                ));
            }
            output.push('\n');

            output.push_str("**Outputs:**\n\n");
            output.push_str("| Key | Quantity | Unit | Formula |\n");
            output.push_str("|-----|----------|------|---------|\n");
            for out in spec.output_schema() {
                let unit = if out.unit.is_currency() {
                    "¤".to_string()
                } else {
                    out.unit.label(&config)
                };
                output.push_str(&format!("| `{}` | {} | {} | `{}` |\n", out.key, out.label, unit, out.formula));
            }
            output.push('\n');

            if let Some(banner) = spec.banner {
                output.push_str(&format!("**Total:** `{}`, {} decimals\n\n", banner, spec.total_decimals));
            }
        }

        output.push_str("---\n\n");
    }

    output
}

/// Evaluate every calculator over inputs built per spec, returning the raw
/// output values keyed by page id
pub fn evaluate_all(inputs_for: impl Fn(&FormulaSpec) -> FormInputs) -> Vec<(&'static str, Vec<f64>)> {
    CATALOG
        .iter()
        .map(|spec| {
            let values = spec.evaluate(&inputs_for(spec)).into_iter().map(|o| o.value).collect();
            (spec.id, values)
        })
        .collect()
}
