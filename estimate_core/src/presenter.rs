//! # Result Presenter
//!
//! Turns evaluated [`OutputField`]s into the two views a calculator page
//! shows: the result table with its highlighted total, and the detailed
//! breakdown of inputs and formula strings.
//!
//! Currency symbol, quantity precision and thousands grouping come from a
//! [`PresentationConfig`] passed in by the caller; nothing here reads global
//! state.
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::catalog;
//! use estimate_core::formula::FormInputs;
//! use estimate_core::presenter::{PresentationConfig, ResultTable};
//!
//! let spec = catalog::get("straight-bar").unwrap();
//! let inputs = FormInputs::from_pairs([("barLength", "12"), ("diameter", "12"), ("noOfBars", "5")]);
//! let table = ResultTable::build(spec, &spec.evaluate(&inputs), &PresentationConfig::default());
//!
//! assert_eq!(table.rows[0].quantity, "60.000");
//! assert_eq!(table.total.unwrap().amount, "53.241 Kg");
//! ```

use serde::{Deserialize, Serialize};

use crate::formula::{FormInputs, FormulaSpec, OutputField};

/// Placeholder for the currency symbol in input unit strings ("¤/Kg")
pub const CURRENCY_PLACEHOLDER: char = '¤';

/// Display settings shared by the table, detail view, CLI and report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresentationConfig {
    /// Symbol prefixed to money amounts
    pub currency_symbol: String,
    /// Decimal places of the quantity column
    pub quantity_decimals: usize,
    /// Group the integer part with commas (1,234.500)
    pub locale_grouping: bool,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        PresentationConfig {
            currency_symbol: "₹".to_string(),
            quantity_decimals: 3,
            locale_grouping: false,
        }
    }
}

impl PresentationConfig {
    /// Format a number with `decimals` places, grouping if enabled
    pub fn number(&self, value: f64, decimals: usize) -> String {
        format_number(value, decimals, self.locale_grouping)
    }

    /// Input unit with the currency placeholder resolved ("¤/Kg" -> "₹/Kg")
    pub fn input_unit(&self, unit: &str) -> String {
        unit.replace(CURRENCY_PLACEHOLDER, &self.currency_symbol)
    }
}

/// Fixed-point formatting with optional comma grouping of the integer part.
///
/// ```rust
/// use estimate_core::presenter::format_number;
///
/// assert_eq!(format_number(1234567.8915, 3, false), "1234567.892");
/// assert_eq!(format_number(1234567.8915, 3, true), "1,234,567.892");
/// assert_eq!(format_number(-4710.0, 2, true), "-4,710.00");
/// ```
pub fn format_number(value: f64, decimals: usize, grouping: bool) -> String {
    let mut fixed = format!("{:.*}", decimals, value);
    // A value that rounds to zero prints without a sign, e.g. -0.0001 -> "0.000"
    if fixed.starts_with('-') && fixed.chars().all(|c| matches!(c, '-' | '0' | '.')) {
        fixed.remove(0);
    }
    if !grouping {
        return fixed;
    }

    let (sign, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

// ============================================================================
// Result Table
// ============================================================================

/// One line of the result table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRow {
    pub material: String,
    pub quantity: String,
    pub unit: String,
}

/// Highlighted total under the table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TotalBanner {
    pub label: String,
    /// Formatted amount, currency-prefixed for money
    pub amount: String,
}

/// Material / Quantity / Unit table plus optional total banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultTable {
    pub title: String,
    pub rows: Vec<ResultRow>,
    pub total: Option<TotalBanner>,
}

impl ResultTable {
    /// Build the table for `spec` from already evaluated outputs
    pub fn build(spec: &FormulaSpec, outputs: &[OutputField], config: &PresentationConfig) -> Self {
        let rows = outputs
            .iter()
            .map(|o| ResultRow {
                material: o.label.to_string(),
                quantity: config.number(o.value, config.quantity_decimals),
                unit: o.unit.label(config),
            })
            .collect();

        let total = spec.banner_output(outputs).map(|o| {
            let amount = config.number(o.value, spec.total_decimals);
            TotalBanner {
                label: o.label.to_string(),
                amount: if o.unit.is_currency() {
                    format!("{}{}", config.currency_symbol, amount)
                } else {
                    format!("{} {}", amount, o.unit.label(config))
                },
            }
        });

        ResultTable {
            title: spec.title.to_string(),
            rows,
            total,
        }
    }
}

// ============================================================================
// Detail View
// ============================================================================

/// One entered value in the detail view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalculationDatum {
    pub label: String,
    pub symbol: String,
    pub value: String,
}

/// One derived value with the formula that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormulaLine {
    pub label: String,
    pub formula: String,
    pub value: String,
}

/// Breakdown handed to the "view detailed" page.
///
/// Serialises as `{ "calculationData": [...], "outputs": [...] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailView {
    pub calculation_data: Vec<CalculationDatum>,
    pub outputs: Vec<FormulaLine>,
}

impl DetailView {
    /// Build the breakdown from the raw inputs and evaluated outputs
    pub fn build(
        spec: &FormulaSpec,
        inputs: &FormInputs,
        outputs: &[OutputField],
        config: &PresentationConfig,
    ) -> Self {
        let calculation_data = spec
            .fields
            .iter()
            .map(|field| {
                let raw = inputs.text(field.key);
                let shown = field
                    .option(raw)
                    .map(|o| o.label.to_string())
                    .unwrap_or_else(|| raw.to_string());
                let unit = config.input_unit(field.unit_for(inputs));
                CalculationDatum {
                    label: field.label.to_string(),
                    symbol: field.symbol.to_string(),
                    value: if unit.is_empty() || shown.is_empty() {
                        shown
                    } else {
                        format!("{} {}", shown, unit)
                    },
                }
            })
            .collect();

        let outputs = outputs
            .iter()
            .map(|o| FormulaLine {
                label: o.label.to_string(),
                formula: o.formula.to_string(),
                value: format!("{} {}", config.number(o.value, 3), o.unit.label(config)),
            })
            .collect();

        DetailView {
            calculation_data,
            outputs,
        }
    }
}

// ============================================================================
// Plain Text
// ============================================================================

/// Boxed plain-text rendering of a result table
pub fn render_text(table: &ResultTable) -> String {
    let headers = ("Material", "Quantity", "Unit");
    let width = |f: fn(&ResultRow) -> &str, header: &str| {
        table
            .rows
            .iter()
            .map(|r| f(r).chars().count())
            .chain(std::iter::once(header.chars().count()))
            .max()
            .unwrap_or(0)
    };
    let w_material = width(|r| &r.material, headers.0);
    let w_quantity = width(|r| &r.quantity, headers.1);
    let w_unit = width(|r| &r.unit, headers.2);

    let inner = (w_material + w_quantity + w_unit + 6)
        .max(table.title.chars().count() + 2)
        .max(39);
    let heavy = "═".repeat(inner);
    let light = "─".repeat(inner);

    let mut out = String::new();
    out.push_str(&heavy);
    out.push('\n');
    out.push_str(&format!("  {}\n", table.title));
    out.push_str(&heavy);
    out.push('\n');
    out.push_str(&format!(
        "  {:<w_material$}  {:>w_quantity$}  {:<w_unit$}\n",
        headers.0, headers.1, headers.2
    ));
    out.push_str(&light);
    out.push('\n');
    for row in &table.rows {
        out.push_str(&format!(
            "  {:<w_material$}  {:>w_quantity$}  {:<w_unit$}\n",
            row.material, row.quantity, row.unit
        ));
    }
    if let Some(total) = &table.total {
        out.push_str(&heavy);
        out.push('\n');
        out.push_str(&format!("  {}: {}\n", total.label, total.amount));
    }
    out.push_str(&heavy);
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn flat_bar_inputs() -> FormInputs {
        let spec = catalog::get("flat-bar-metal").unwrap();
        let mut inputs = spec.default_inputs();
        for (k, v) in [("sideA", "50"), ("sideB", "10"), ("lengthL", "2"), ("noOfUnits", "10"), ("rateOfMetal", "60")] {
            inputs.set(k, v);
        }
        inputs
    }

    #[test]
    fn test_flat_bar_table() {
        let spec = catalog::get("flat-bar-metal").unwrap();
        let outputs = spec.evaluate(&flat_bar_inputs());
        let table = ResultTable::build(spec, &outputs, &PresentationConfig::default());

        let quantities: Vec<&str> = table.rows.iter().map(|r| r.quantity.as_str()).collect();
        assert_eq!(quantities, vec!["0.001", "7.850", "78.500", "4710.000"]);
        assert_eq!(table.rows[3].unit, "₹");
        assert_eq!(
            table.total,
            Some(TotalBanner {
                label: "Total Price".to_string(),
                amount: "₹4710.00".to_string(),
            })
        );
    }

    #[test]
    fn test_grouping_and_custom_currency() {
        let spec = catalog::get("flat-bar-metal").unwrap();
        let outputs = spec.evaluate(&flat_bar_inputs());
        let config = PresentationConfig {
            currency_symbol: "$".to_string(),
            quantity_decimals: 2,
            locale_grouping: true,
        };
        let table = ResultTable::build(spec, &outputs, &config);
        assert_eq!(table.rows[3].quantity, "4,710.00");
        assert_eq!(table.total.map(|t| t.amount), Some("$4,710.00".to_string()));
    }

    #[test]
    fn test_page_without_banner() {
        let spec = catalog::get("brick-king-closer").unwrap();
        let outputs = spec.evaluate(&FormInputs::new());
        let table = ResultTable::build(spec, &outputs, &PresentationConfig::default());
        assert!(table.total.is_none());
        assert!(!render_text(&table).contains(": "));
    }

    #[test]
    fn test_detail_view_json_shape() {
        let spec = catalog::get("flat-bar-metal").unwrap();
        let inputs = flat_bar_inputs();
        let outputs = spec.evaluate(&inputs);
        let view = DetailView::build(spec, &inputs, &outputs, &PresentationConfig::default());

        let json = serde_json::to_value(&view).unwrap();
        let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["calculationData", "outputs"]);

        let side_a = view.calculation_data.iter().find(|d| d.symbol == "a").unwrap();
        assert_eq!(side_a.value, "50 mm");
        let rate = view.calculation_data.iter().find(|d| d.label == "Rate of Metal").unwrap();
        assert_eq!(rate.value, "60 ₹/Kg");
        let metal = view.calculation_data.iter().find(|d| d.label == "Metal").unwrap();
        assert_eq!(metal.value, "Steel");

        assert_eq!(view.outputs[1].value, "7.850 Kg");
        assert_eq!(json["outputs"][0]["formula"], spec.output_schema()[0].formula);
    }

    #[test]
    fn test_render_text_box() {
        let spec = catalog::get("flat-bar-metal").unwrap();
        let outputs = spec.evaluate(&flat_bar_inputs());
        let text = render_text(&ResultTable::build(spec, &outputs, &PresentationConfig::default()));

        assert!(text.starts_with("═══"));
        assert!(text.contains("  Flat Bar Metal"));
        assert!(text.contains("Total Price: ₹4710.00"));
        let widths: Vec<usize> = text.lines().filter(|l| l.starts_with('═')).map(|l| l.chars().count()).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_format_number_drops_sign_of_zero() {
        assert_eq!(format_number(-0.0, 3, false), "0.000");
        assert_eq!(format_number(-0.0001, 3, true), "0.000");
        assert_eq!(format_number(-0.0, 0, false), "0");
        assert_eq!(format_number(-0.001, 3, false), "-0.001");
    }

    #[test]
    fn test_blank_forms_show_unsigned_zero() {
        let config = PresentationConfig::default();
        for spec in catalog::all() {
            let mut form = crate::form::FormState::new(spec);
            form.reset();
            form.calculate();
            let table = form.result(&config).unwrap();

            for row in &table.rows {
                assert!(!row.quantity.starts_with("-0"), "{} {}: {}", spec.id, row.material, row.quantity);
            }
            if let Some(total) = &table.total {
                assert!(!total.amount.contains("-0"), "{} banner: {}", spec.id, total.amount);
            }
        }
    }

    #[test]
    fn test_roof_units_follow_unit_system() {
        let spec = catalog::get("flat-roof").unwrap();
        let config = PresentationConfig::default();
        let pairs = |system: &'static str| {
            FormInputs::from_pairs([("unitType", system), ("baseLengthA", "30"), ("roomPrice", "5")])
        };

        let metric = pairs("metric");
        let view = DetailView::build(spec, &metric, &spec.evaluate(&metric), &config);
        assert_eq!(view.calculation_data[1].value, "30 mm");
        assert_eq!(view.calculation_data[4].value, "5 ₹/sq.m.");
        assert!(view.outputs[0].value.ends_with(" sq.m."));

        let imperial = pairs("imperial");
        let view = DetailView::build(spec, &imperial, &spec.evaluate(&imperial), &config);
        assert_eq!(view.calculation_data[1].value, "30 ft");
        assert_eq!(view.calculation_data[4].value, "5 ₹/sq.ft.");
        assert!(view.outputs[0].value.ends_with(" sq.ft."));
    }

    #[test]
    fn test_input_unit_placeholder() {
        let config = PresentationConfig {
            currency_symbol: "€".to_string(),
            ..PresentationConfig::default()
        };
        assert_eq!(config.input_unit("¤/sq.m."), "€/sq.m.");
        assert_eq!(config.input_unit("mm"), "mm");
    }

    #[test]
    fn test_config_deserialize_fills_missing() {
        let config: PresentationConfig = serde_json::from_str(r#"{"locale_grouping": true}"#).unwrap();
        assert_eq!(config.currency_symbol, "₹");
        assert_eq!(config.quantity_decimals, 3);
        assert!(config.locale_grouping);
    }

    proptest! {
        #[test]
        fn prop_grouping_only_adds_commas(value in -1.0e9f64..1.0e9, decimals in 0usize..4) {
            let plain = format_number(value, decimals, false);
            let grouped = format_number(value, decimals, true);
            prop_assert_eq!(grouped.replace(',', ""), plain);
        }
    }
}
