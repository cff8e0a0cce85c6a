//! # API Response Shapes
//!
//! The backend has returned lists and error messages under more than one
//! envelope over time. These helpers accept every shape seen so far and
//! fall back instead of failing.
//!
//! ```rust
//! use estimate_core::response::{error_message, unwrap_list};
//! use serde_json::json;
//!
//! let wrapped = json!({ "data": { "notes": [1, 2] } });
//! let bare = json!({ "notes": [3] });
//! assert_eq!(unwrap_list(&wrapped, "notes").len(), 2);
//! assert_eq!(unwrap_list(&bare, "notes").len(), 1);
//!
//! let body = json!({ "response": { "data": { "message": "Project not found" } } });
//! assert_eq!(error_message(&body, "Failed to load"), "Project not found");
//! ```

use serde_json::Value;

/// The list under `key`: `response.data.<key>`, else `response.<key>`,
/// else empty. A non-array value at either place counts as absent.
pub fn unwrap_list(response: &Value, key: &str) -> Vec<Value> {
    response
        .get("data")
        .and_then(|data| data.get(key))
        .and_then(Value::as_array)
        .or_else(|| response.get(key).and_then(Value::as_array))
        .cloned()
        .unwrap_or_default()
}

/// The most specific error message in an error body:
/// `response.data.message`, else `message`, else `fallback`.
///
/// Blank strings count as absent.
pub fn error_message(body: &Value, fallback: &str) -> String {
    let non_blank = |v: Option<&Value>| {
        v.and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    non_blank(body.pointer("/response/data/message"))
        .or_else(|| non_blank(body.get("message")))
        .unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_unwrap_list_prefers_data_envelope() {
        let both = json!({ "data": { "items": ["a"] }, "items": ["b", "c"] });
        assert_eq!(unwrap_list(&both, "items"), vec![json!("a")]);
    }

    #[test]
    fn test_unwrap_list_missing_or_wrong_type() {
        assert!(unwrap_list(&json!({}), "items").is_empty());
        assert!(unwrap_list(&json!(null), "items").is_empty());
        assert_eq!(unwrap_list(&json!({ "data": { "items": "x" }, "items": [1] }), "items"), vec![json!(1)]);
    }

    #[test]
    fn test_error_message_fallbacks() {
        assert_eq!(error_message(&json!({ "message": "Timeout" }), "Failed"), "Timeout");
        assert_eq!(
            error_message(&json!({ "response": { "data": { "message": "  " } }, "message": "Network Error" }), "Failed"),
            "Network Error"
        );
        assert_eq!(error_message(&json!({ "message": "" }), "Failed"), "Failed");
        assert_eq!(error_message(&json!({ "message": 500 }), "Failed"), "Failed");
    }
}
