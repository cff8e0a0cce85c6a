//! # Record Form Validation
//!
//! Required-field checks for the record pages that sit next to the
//! calculators: payment entries, daily progress reports and notes. Unlike
//! calculator inputs, these forms are validated before they are submitted;
//! a failing form yields a field-keyed map of messages.
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::validation::{PaymentEntryForm, Validate};
//!
//! let form = PaymentEntryForm {
//!     paid_date: "2025-03-01".to_string(),
//!     paid_to: "Sharma Traders".to_string(),
//!     category: "material".to_string(),
//!     amount: "₹12,500".to_string(),
//!     mode: "upi".to_string(),
//! };
//! assert!(form.validate().is_ok());
//! assert_eq!(form.amount_value(), Some(12500.0));
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{CalcError, CalcResult};
use crate::formula::FormInputs;

/// Field key -> message for every field that failed validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        FieldErrors(BTreeMap::new())
    }

    /// Record a message for `key`, replacing any earlier one
    pub fn insert(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.0.insert(key.into(), message.into());
    }

    /// Record `message` when `value` is blank
    pub fn require(&mut self, key: &str, value: &str, message: &str) {
        if value.trim().is_empty() {
            self.insert(key, message);
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `Ok(())` when nothing failed, otherwise a Validation error
    pub fn into_result(self) -> CalcResult<()> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(CalcError::Validation { errors: self.0 })
        }
    }
}

/// Check that every `(key, label)` has a non-blank value in `form`.
///
/// Missing keys count as blank. Messages read "<Label> is required".
///
/// ```rust
/// use estimate_core::formula::FormInputs;
/// use estimate_core::validation::require;
///
/// let form = FormInputs::from_pairs([("title", "  "), ("project", "Tower B")]);
/// let errors = require(&form, &[("title", "Title"), ("project", "Project"), ("due", "Due date")]);
/// assert_eq!(errors.get("title"), Some("Title is required"));
/// assert_eq!(errors.get("due"), Some("Due date is required"));
/// assert_eq!(errors.len(), 2);
/// ```
pub fn require(form: &FormInputs, keys: &[(&str, &str)]) -> FieldErrors {
    let mut errors = FieldErrors::new();
    for (key, label) in keys {
        errors.require(key, form.text(key), &format!("{} is required", label));
    }
    errors
}

/// A form that can check itself before submission
pub trait Validate {
    /// Every failing field with its message
    fn field_errors(&self) -> FieldErrors;

    /// `Err(CalcError::Validation)` carrying [`Validate::field_errors`] when
    /// any field fails
    fn validate(&self) -> CalcResult<()> {
        self.field_errors().into_result()
    }
}

// ============================================================================
// Payment Entry
// ============================================================================

/// New or edited payment entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentEntryForm {
    pub paid_date: String,
    pub paid_to: String,
    pub category: String,
    /// Amount as typed; may carry a currency symbol and grouping commas
    pub amount: String,
    pub mode: String,
}

impl PaymentEntryForm {
    /// Amount with everything except digits and '.' stripped, if it parses
    pub fn amount_value(&self) -> Option<f64> {
        let digits: String = self.amount.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect();
        digits.parse::<f64>().ok().filter(|v| v.is_finite())
    }

    /// Payment mode as the API expects it ("Bank Transfer" -> "bank_transfer")
    pub fn mode_value(&self) -> String {
        self.mode.split_whitespace().collect::<Vec<_>>().join("_").to_lowercase()
    }
}

impl Validate for PaymentEntryForm {
    fn field_errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.require("paidDate", &self.paid_date, "Paid date is required");
        errors.require("paidTo", &self.paid_to, "Paid to is required");
        errors.require("category", &self.category, "Category is required");
        if !matches!(self.amount_value(), Some(v) if v > 0.0) {
            errors.insert("amount", "Amount is required");
        }
        errors.require("mode", &self.mode, "Payment mode is required");
        errors
    }
}

// ============================================================================
// Daily Progress Report
// ============================================================================

/// Daily progress report with its photos/videos.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DailyReportForm {
    /// 24h "HH:MM"
    pub start_time: String,
    pub end_time: String,
    pub status: String,
    pub today_summary: String,
    pub planned_work: String,
    pub actual_work: String,
    pub delay_reason: String,
    /// Media already attached to the report (edit mode)
    pub existing_media: Vec<String>,
    /// Newly selected files
    pub new_files: Vec<String>,
}

impl DailyReportForm {
    /// Prefill an edit form from a stored report, accepting the field
    /// spellings the API has used over time
    pub fn from_report(report: &Value) -> Self {
        let text = |keys: &[&str]| {
            keys.iter()
                .filter_map(|k| lookup(report, k))
                .find_map(Value::as_str)
                .unwrap_or("")
                .to_string()
        };

        DailyReportForm {
            start_time: to_time_value(&text(&["startTime", "start_time", "workTime.start"])),
            end_time: to_time_value(&text(&["endTime", "end_time", "workTime.end"])),
            status: normalize_status(&text(&["status"])),
            today_summary: text(&["todaySummary", "today_summary"]),
            planned_work: text(&["plannedWork", "planned_work"]),
            actual_work: text(&["actualWork", "actual_work"]),
            delay_reason: text(&["delayReason", "delay_reason"]),
            existing_media: report.get("media").map(normalize_media_urls).unwrap_or_default(),
            new_files: Vec::new(),
        }
    }
}

impl Validate for DailyReportForm {
    fn field_errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.require("startTime", &self.start_time, "Start time is required");
        errors.require("endTime", &self.end_time, "End time is required");
        errors.require("status", &self.status, "Status is required");
        errors.require("todaySummary", &self.today_summary, "Today's summary is required");
        errors.require("plannedWork", &self.planned_work, "Planned work is required");
        errors.require("actualWork", &self.actual_work, "Actual work is required");
        errors.require("delayReason", &self.delay_reason, "Delay reason is required");
        if self.existing_media.is_empty() && self.new_files.is_empty() {
            errors.insert("files", "Required");
        }
        errors
    }
}

/// Dotted path lookup ("workTime.start")
fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(value, |v, key| v.get(key))
}

/// URLs of a media list whose items are plain strings or objects carrying
/// `url`, `path`, `uri` or `src`
pub fn normalize_media_urls(media: &Value) -> Vec<String> {
    let Some(items) = media.as_array() else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s.clone()),
            Value::Object(_) => ["url", "path", "uri", "src"]
                .iter()
                .find_map(|k| item.get(k).and_then(Value::as_str))
                .map(str::to_string),
            _ => None,
        })
        .filter(|url| !url.is_empty())
        .collect()
}

// ============================================================================
// Note
// ============================================================================

/// What a note carries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteKind {
    #[default]
    Text,
    Voice,
    Both,
}

/// New project note.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NoteForm {
    pub title: String,
    /// Project the note is assigned to
    pub assign_to: String,
    pub kind: NoteKind,
    pub text: String,
    /// Key of the uploaded voice recording
    pub voice_note: Option<String>,
    pub reminder_at: String,
}

impl Validate for NoteForm {
    fn field_errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.require("title", &self.title, "Title is required");
        errors.require("assignTo", &self.assign_to, "Please select a project");
        if matches!(self.kind, NoteKind::Voice | NoteKind::Both) && self.voice_note.as_deref().unwrap_or("").is_empty() {
            errors.insert("voiceNote", "Voice note is required");
        }
        if matches!(self.kind, NoteKind::Text | NoteKind::Both) {
            errors.require("text", &self.text, "Text note is required");
        }
        errors.require("reminderAt", &self.reminder_at, "Reminder date is required");
        errors
    }
}

// ============================================================================
// Field Normalisation
// ============================================================================

/// Normalise a time to 24h "HH:MM".
///
/// Two-digit "HH:MM" passes through as is; "h:mm am/pm" (any case, optional
/// space) is converted. Anything else gives an empty string.
///
/// ```rust
/// use estimate_core::validation::to_time_value;
///
/// assert_eq!(to_time_value("09:30"), "09:30");
/// assert_eq!(to_time_value("12:05 am"), "00:05");
/// assert_eq!(to_time_value("7:45PM"), "19:45");
/// assert_eq!(to_time_value("13:00 pm"), "");
/// ```
pub fn to_time_value(input: &str) -> String {
    let raw = input.trim();

    let two_digits = |s: &str| s.len() == 2 && s.bytes().all(|b| b.is_ascii_digit());
    if let Some((h, m)) = raw.split_once(':') {
        if two_digits(h) && two_digits(m) {
            return raw.to_string();
        }
    }

    let lower = raw.to_ascii_lowercase();
    let (clock, pm) = if let Some(rest) = lower.strip_suffix("pm") {
        (rest.trim_end(), true)
    } else if let Some(rest) = lower.strip_suffix("am") {
        (rest.trim_end(), false)
    } else {
        return String::new();
    };

    let Some((h, m)) = clock.split_once(':') else {
        return String::new();
    };
    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !(digits(h) && h.len() <= 2 && digits(m) && m.len() == 2) {
        return String::new();
    }
    let (Ok(mut hours), Ok(minutes)) = (h.parse::<u32>(), m.parse::<u32>()) else {
        return String::new();
    };
    if minutes > 59 || !(1..=12).contains(&hours) {
        return String::new();
    }

    if pm && hours != 12 {
        hours += 12;
    }
    if !pm && hours == 12 {
        hours = 0;
    }
    format!("{:02}:{:02}", hours, minutes)
}

/// Canonical report status.
///
/// "completed", "upcoming" and the in-progress spellings ("in_progress",
/// "inprogress", "in progress", "in-progress") are normalised, in any case.
/// Anything else is returned unchanged.
pub fn normalize_status(input: &str) -> String {
    match input.trim().to_lowercase().as_str() {
        "" => String::new(),
        "completed" => "completed".to_string(),
        "upcoming" => "upcoming".to_string(),
        "in_progress" | "inprogress" | "in progress" | "in-progress" => "in_progress".to_string(),
        _ => input.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn complete_report() -> DailyReportForm {
        DailyReportForm {
            start_time: "09:00".to_string(),
            end_time: "18:00".to_string(),
            status: "in_progress".to_string(),
            today_summary: "Slab shuttering".to_string(),
            planned_work: "Level 2 slab".to_string(),
            actual_work: "Half of level 2".to_string(),
            delay_reason: "Rain".to_string(),
            existing_media: vec![],
            new_files: vec!["IMG_001.jpg".to_string()],
        }
    }

    #[test]
    fn test_payment_entry_errors() {
        let form = PaymentEntryForm {
            amount: "₹ 0.00".to_string(),
            ..Default::default()
        };
        let errors = form.field_errors();
        assert_eq!(errors.len(), 5);
        assert_eq!(errors.get("amount"), Some("Amount is required"));
        assert_eq!(errors.get("mode"), Some("Payment mode is required"));

        let err = form.validate().unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_FAILED");
        assert_eq!(err.field_errors().map(|e| e.len()), Some(5));
    }

    #[test]
    fn test_payment_amount_parsing() {
        let amount = |s: &str| PaymentEntryForm {
            amount: s.to_string(),
            ..Default::default()
        }
        .amount_value();

        assert_eq!(amount("1,250.50"), Some(1250.5));
        assert_eq!(amount("abc"), None);
        assert_eq!(amount(""), None);
        assert_eq!(amount("1.2.3"), None);
    }

    #[test]
    fn test_payment_mode_value() {
        let form = PaymentEntryForm {
            mode: "Bank  Transfer".to_string(),
            ..Default::default()
        };
        assert_eq!(form.mode_value(), "bank_transfer");
    }

    #[test]
    fn test_daily_report_requires_media() {
        assert!(complete_report().validate().is_ok());

        let mut report = complete_report();
        report.new_files.clear();
        assert_eq!(report.field_errors().get("files"), Some("Required"));

        report.existing_media.push("https://cdn/1.jpg".to_string());
        assert!(report.validate().is_ok());
    }

    #[test]
    fn test_daily_report_from_stored_report() {
        let stored = json!({
            "workTime": { "start": "9:15 am", "end": "6:00 PM" },
            "status": "In Progress",
            "today_summary": "Brickwork",
            "plannedWork": "East wall",
            "media": ["a.jpg", { "url": "b.jpg" }, { "src": "c.mp4" }, 42, { "name": "x" }]
        });
        let form = DailyReportForm::from_report(&stored);
        assert_eq!(form.start_time, "09:15");
        assert_eq!(form.end_time, "18:00");
        assert_eq!(form.status, "in_progress");
        assert_eq!(form.today_summary, "Brickwork");
        assert_eq!(form.existing_media, vec!["a.jpg", "b.jpg", "c.mp4"]);

        let errors = form.field_errors();
        assert_eq!(errors.get("actualWork"), Some("Actual work is required"));
        assert!(errors.get("files").is_none());
    }

    #[test]
    fn test_note_form() {
        let mut note = NoteForm {
            title: "Order cement".to_string(),
            assign_to: "tower-b".to_string(),
            kind: NoteKind::Both,
            text: String::new(),
            voice_note: None,
            reminder_at: "2025-03-02T10:00".to_string(),
        };
        let errors = note.field_errors();
        assert_eq!(errors.get("voiceNote"), Some("Voice note is required"));
        assert_eq!(errors.get("text"), Some("Text note is required"));

        note.kind = NoteKind::Text;
        note.text = "50 bags OPC".to_string();
        assert!(note.validate().is_ok());
    }

    #[test]
    fn test_time_values() {
        assert_eq!(to_time_value(" 18:30 "), "18:30");
        assert_eq!(to_time_value("12:00 PM"), "12:00");
        assert_eq!(to_time_value("10:00am"), "10:00");
        assert_eq!(to_time_value("0:30 am"), "");
        assert_eq!(to_time_value("10:60 am"), "");
        assert_eq!(to_time_value("9.30"), "");
        assert_eq!(to_time_value(""), "");
    }

    #[test]
    fn test_status_values() {
        assert_eq!(normalize_status("Completed"), "completed");
        assert_eq!(normalize_status("in-progress"), "in_progress");
        assert_eq!(normalize_status("INPROGRESS"), "in_progress");
        assert_eq!(normalize_status("On Hold"), "On Hold");
        assert_eq!(normalize_status("  "), "");
    }

    #[test]
    fn test_field_errors_json() {
        let mut errors = FieldErrors::new();
        errors.insert("title", "Title is required");
        assert_eq!(serde_json::to_value(&errors).unwrap(), json!({ "title": "Title is required" }));
    }
}
