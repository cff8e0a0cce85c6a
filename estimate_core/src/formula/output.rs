//! Derived output quantities.

use serde::Serialize;

use crate::presenter::PresentationConfig;

/// Unit attached to an output quantity.
///
/// Currency is resolved against [`PresentationConfig`] at render time rather
/// than hardcoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    CubicMeter,
    SquareMeter,
    SquareFoot,
    SquareMillimeter,
    Meter,
    Kilogram,
    Count,
    Bags,
    Litre,
    Gallon,
    Percent,
    Currency,
}

impl Unit {
    /// Label shown next to a quantity
    pub fn label(&self, config: &PresentationConfig) -> String {
        match self {
            Unit::CubicMeter => "m³".to_string(),
            Unit::SquareMeter => "sq.m.".to_string(),
            Unit::SquareFoot => "sq.ft.".to_string(),
            Unit::SquareMillimeter => "mm²".to_string(),
            Unit::Meter => "m".to_string(),
            Unit::Kilogram => "Kg".to_string(),
            Unit::Count => "Nos".to_string(),
            Unit::Bags => "Bags".to_string(),
            Unit::Litre => "L".to_string(),
            Unit::Gallon => "gal".to_string(),
            Unit::Percent => "%".to_string(),
            Unit::Currency => config.currency_symbol.clone(),
        }
    }

    /// True for money amounts
    pub fn is_currency(&self) -> bool {
        matches!(self, Unit::Currency)
    }
}

/// One derived quantity, recomputed from the inputs on every evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputField {
    /// Stable key (used for the total banner and JSON consumers)
    pub key: &'static str,
    /// Material / quantity label shown in the result table
    pub label: &'static str,
    /// Computed value
    pub value: f64,
    pub unit: Unit,
    /// Human-readable formula shown in the detailed view
    pub formula: &'static str,
}

impl OutputField {
    pub fn new(key: &'static str, label: &'static str, unit: Unit, formula: &'static str, value: f64) -> Self {
        OutputField {
            key,
            label,
            value,
            unit,
            formula,
        }
    }
}
