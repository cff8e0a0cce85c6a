//! # Calculator Form State
//!
//! Local state of one calculator page: the raw value of every input, and
//! whether the result section has been revealed.
//!
//! Outputs are never cached. [`FormState::compute`] evaluates the formula
//! over the current inputs each time it is called, so the table always
//! reflects what is on screen.
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::form::FormState;
//! use estimate_core::presenter::PresentationConfig;
//!
//! let mut form = FormState::for_id("pipe-metal").unwrap();
//! assert_eq!(form.value("density"), "7850.00");
//!
//! form.select("metalType", "aluminum").unwrap();
//! assert_eq!(form.value("density"), "2700.00");
//!
//! form.set("density", "2710").unwrap();
//! assert_eq!(form.value("density"), "2710");
//!
//! assert!(form.result(&PresentationConfig::default()).is_none());
//! form.calculate();
//! assert!(form.result(&PresentationConfig::default()).is_some());
//! ```

use crate::catalog;
use crate::errors::{CalcError, CalcResult};
use crate::formula::{FormInputs, FormulaSpec, OutputField};
use crate::presenter::{DetailView, PresentationConfig, ResultTable};

/// Input values and result visibility of one calculator page.
#[derive(Debug, Clone)]
pub struct FormState {
    spec: &'static FormulaSpec,
    inputs: FormInputs,
    result_visible: bool,
}

impl FormState {
    /// Fresh form with every field at its default
    pub fn new(spec: &'static FormulaSpec) -> Self {
        FormState {
            spec,
            inputs: spec.default_inputs(),
            result_visible: false,
        }
    }

    /// Fresh form for the catalog page `id`
    pub fn for_id(id: &str) -> CalcResult<Self> {
        Ok(Self::new(catalog::get(id)?))
    }

    pub fn spec(&self) -> &'static FormulaSpec {
        self.spec
    }

    /// Current raw value of a field (empty for unknown keys)
    pub fn value(&self, key: &str) -> &str {
        self.inputs.text(key)
    }

    /// Store a raw value as typed. No validation happens here; the formula
    /// coerces it when it reads it.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> CalcResult<()> {
        let value = value.into();
        let field = self
            .spec
            .input(key)
            .ok_or_else(|| CalcError::invalid_input(key, value.as_str(), format!("not a field of {}", self.spec.id)))?;

        if field.is_select() && field.option(&value).is_none() {
            return Err(CalcError::invalid_input(key, value, "not one of the select options"));
        }
        self.inputs.set(key, value);
        Ok(())
    }

    /// Choose a select option and write its fills into the target fields.
    ///
    /// The fills overwrite whatever is in the target (last write wins), so
    /// a density typed by hand survives only until the metal is selected
    /// again.
    pub fn select(&mut self, key: &str, value: &str) -> CalcResult<()> {
        let field = self
            .spec
            .input(key)
            .ok_or_else(|| CalcError::invalid_input(key, value, format!("not a field of {}", self.spec.id)))?;
        let option = field
            .option(value)
            .ok_or_else(|| CalcError::invalid_input(key, value, "not one of the select options"))?;

        self.inputs.set(key, value);
        for (target, filled) in &option.fills {
            self.inputs.set(*target, filled.clone());
        }
        Ok(())
    }

    /// Snapshot of the current inputs
    pub fn inputs(&self) -> FormInputs {
        self.inputs.clone()
    }

    /// Evaluate the formula over the current inputs
    pub fn compute(&self) -> Vec<OutputField> {
        self.spec.evaluate(&self.inputs)
    }

    /// Reveal the result section
    pub fn calculate(&mut self) {
        self.result_visible = true;
    }

    pub fn is_result_visible(&self) -> bool {
        self.result_visible
    }

    /// Restore every default (select fills included) and hide the result
    pub fn reset(&mut self) {
        self.inputs = self.spec.default_inputs();
        self.result_visible = false;
    }

    /// Result table, once the result section is visible
    pub fn result(&self, config: &PresentationConfig) -> Option<ResultTable> {
        self.result_visible
            .then(|| ResultTable::build(self.spec, &self.compute(), config))
    }

    /// Breakdown for the detailed view
    pub fn detail_view(&self, config: &PresentationConfig) -> DetailView {
        DetailView::build(self.spec, &self.inputs, &self.compute(), config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn flat_bar() -> FormState {
        let mut form = FormState::for_id("flat-bar-metal").unwrap();
        for (k, v) in [("sideA", "50"), ("sideB", "10"), ("lengthL", "2"), ("noOfUnits", "10"), ("rateOfMetal", "60")] {
            form.set(k, v).unwrap();
        }
        form
    }

    #[test]
    fn test_compute_tracks_every_edit() {
        let mut form = flat_bar();
        let price = |f: &FormState| f.compute().iter().find(|o| o.key == "totalPrice").map(|o| o.value);
        assert!((price(&form).unwrap() - 4710.0).abs() < 1e-6);

        form.set("noOfUnits", "20").unwrap();
        assert!((price(&form).unwrap() - 9420.0).abs() < 1e-6);

        form.set("noOfUnits", "twenty").unwrap();
        assert_eq!(price(&form), Some(0.0));
    }

    #[test]
    fn test_metal_fill_last_write_wins() {
        let mut form = flat_bar();
        form.select("metalType", "copper").unwrap();
        let copper = form.value("density").to_string();
        assert_ne!(copper, "7850.00");

        form.set("density", "9000").unwrap();
        assert_eq!(form.value("density"), "9000");

        form.select("metalType", "copper").unwrap();
        assert_eq!(form.value("density"), copper);
    }

    #[test]
    fn test_reset_restores_defaults_and_hides_result() {
        let mut form = flat_bar();
        form.select("metalType", "brass").unwrap();
        form.calculate();
        assert!(form.is_result_visible());

        form.reset();
        assert!(!form.is_result_visible());
        assert_eq!(form.value("sideA"), "");
        assert_eq!(form.value("metalType"), "steel");
        assert_eq!(form.value("density"), "7850.00");
        assert!(form.result(&PresentationConfig::default()).is_none());
    }

    #[test]
    fn test_unknown_field_and_option() {
        let mut form = flat_bar();
        let err = form.set("colour", "red").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");

        assert!(form.select("metalType", "unobtainium").is_err());
        assert!(form.set("metalType", "unobtainium").is_err());
        assert_eq!(form.value("metalType"), "steel");
    }

    #[test]
    fn test_result_and_detail_views() {
        let mut form = flat_bar();
        form.calculate();
        let table = form.result(&PresentationConfig::default()).unwrap();
        assert_eq!(table.total.map(|t| t.amount), Some("₹4710.00".to_string()));

        let view = form.detail_view(&PresentationConfig::default());
        assert_eq!(view.outputs.len(), form.compute().len());
        assert_eq!(view.calculation_data.len(), form.spec().fields.len());
    }
}
