//! Raw form values and permissive numeric coercion.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Snapshot of raw form values, keyed by field key.
///
/// Values stay strings exactly as typed; they are only interpreted when a
/// formula reads them.
///
/// ## Coercion Policy
///
/// [`FormInputs::number`] never fails. Empty, malformed, missing or
/// non-finite input reads as `0.0`, and a valid numeric prefix is honoured
/// (`"12mm"` reads as `12.0`). Calculators surface no input errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormInputs(BTreeMap<String, String>);

impl FormInputs {
    /// Empty snapshot (every field reads as its blank value)
    pub fn new() -> Self {
        FormInputs(BTreeMap::new())
    }

    /// Build from `(key, value)` pairs
    ///
    /// ```rust
    /// use estimate_core::formula::FormInputs;
    ///
    /// let inputs = FormInputs::from_pairs([("sideA", "50"), ("sideB", "abc")]);
    /// assert_eq!(inputs.number("sideA"), 50.0);
    /// assert_eq!(inputs.number("sideB"), 0.0);
    /// assert_eq!(inputs.number("missing"), 0.0);
    /// ```
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        FormInputs(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    /// Store a raw value
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Raw value, if present
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Raw text value, empty when missing (used for selects)
    pub fn text(&self, key: &str) -> &str {
        self.raw(key).unwrap_or("")
    }

    /// Numeric value with permissive coercion (invalid reads as 0)
    pub fn number(&self, key: &str) -> f64 {
        self.raw(key).map(coerce_number).unwrap_or(0.0)
    }

    /// Numeric value, falling back to `fallback` when it coerces to 0
    pub fn number_or(&self, key: &str, fallback: f64) -> f64 {
        let v = self.number(key);
        if v == 0.0 {
            fallback
        } else {
            v
        }
    }

    /// Iterate over `(key, value)` pairs in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of stored values
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no value is stored
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Owned copy of the underlying map
    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.0.clone()
    }
}

impl From<BTreeMap<String, String>> for FormInputs {
    fn from(map: BTreeMap<String, String>) -> Self {
        FormInputs(map)
    }
}

/// Coerce a raw string to a number.
///
/// Leading whitespace is skipped, then the longest prefix of the form
/// `[+-]digits[.digits][(e|E)[+-]digits]` is parsed. No prefix, or a
/// non-finite result, gives `0.0`.
///
/// ```rust
/// use estimate_core::formula::coerce_number;
///
/// assert_eq!(coerce_number(" 12.5 "), 12.5);
/// assert_eq!(coerce_number("12mm"), 12.0);
/// assert_eq!(coerce_number(".5"), 0.5);
/// assert_eq!(coerce_number("1e3x"), 1000.0);
/// assert_eq!(coerce_number("abc"), 0.0);
/// assert_eq!(coerce_number(""), 0.0);
/// ```
pub fn coerce_number(raw: &str) -> f64 {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return 0.0;
    }

    // Exponent only counts when at least one digit follows it
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    match s[..end].parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_coercion_edge_cases() {
        assert_eq!(coerce_number("-4"), -4.0);
        assert_eq!(coerce_number("+4"), 4.0);
        assert_eq!(coerce_number("5."), 5.0);
        assert_eq!(coerce_number("."), 0.0);
        assert_eq!(coerce_number("-"), 0.0);
        assert_eq!(coerce_number("1e"), 1.0);
        assert_eq!(coerce_number("2E-1"), 0.2);
        assert_eq!(coerce_number("7850.00"), 7850.0);
        assert_eq!(coerce_number("1,000"), 1.0);
        assert_eq!(coerce_number("NaN"), 0.0);
        assert_eq!(coerce_number("Infinity"), 0.0);
        assert_eq!(coerce_number("1e999"), 0.0);
    }

    #[test]
    fn test_number_or_falls_back_on_zero() {
        let inputs = FormInputs::from_pairs([("dryVolume", "0"), ("volume", "2")]);
        assert_eq!(inputs.number_or("dryVolume", 1.55), 1.55);
        assert_eq!(inputs.number_or("volume", 5.097), 2.0);
        assert_eq!(inputs.number_or("missing", 0.55), 0.55);
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let inputs = FormInputs::from_pairs([("L", "12"), ("d", "12")]);
        let json = serde_json::to_string(&inputs).unwrap();
        assert_eq!(json, r#"{"L":"12","d":"12"}"#);
    }

    proptest! {
        #[test]
        fn prop_coercion_never_panics_and_is_finite(s in ".*") {
            prop_assert!(coerce_number(&s).is_finite());
        }

        #[test]
        fn prop_coercion_reads_formatted_numbers(v in -1.0e6f64..1.0e6) {
            let s = format!("{}", v);
            prop_assert_eq!(coerce_number(&s), v);
        }
    }
}
