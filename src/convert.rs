//! Conversion utilities between tool arguments, lookup outcomes, and text.
//!
//! Tool results are carried as a single text block, so every lookup outcome
//! is rendered to a `String` here.

use serde_json::{Map, Value as JsonValue};

use crate::annotation::AnnotationRecord;
use crate::error::{LookupError, McpError, Result};

/// Text returned when a gene has no subcellular location annotation.
pub const NO_LOCATION_TEXT: &str = "No location data found.";

/// Helper to get a required, non-empty string argument from JSON arguments.
pub fn get_string_arg(args: &Map<String, JsonValue>, name: &str) -> Result<String> {
    args.get(name)
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .ok_or_else(|| McpError::MissingArg(name.to_string()))
}

/// Convert a lookup outcome to JSON: the record itself, or `{"error": message}`.
pub fn outcome_to_json(outcome: &std::result::Result<AnnotationRecord, LookupError>) -> JsonValue {
    match outcome {
        Ok(record) => serde_json::to_value(record)
            .unwrap_or_else(|e| serde_json::json!({ "error": e.to_string() })),
        Err(err) => serde_json::json!({ "error": err.to_string() }),
    }
}

/// Pretty-printed JSON text of a lookup outcome.
pub fn outcome_to_text(outcome: &std::result::Result<AnnotationRecord, LookupError>) -> String {
    let json = outcome_to_json(outcome);
    serde_json::to_string_pretty(&json).unwrap_or_else(|_| json.to_string())
}

/// Newline-joined locations, or [`NO_LOCATION_TEXT`] when there are none.
pub fn locations_to_text(locations: &[String]) -> String {
    if locations.is_empty() {
        NO_LOCATION_TEXT.to_string()
    } else {
        locations.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(value: JsonValue) -> Map<String, JsonValue> {
        match value {
            JsonValue::Object(m) => m,
            _ => Map::new(),
        }
    }

    #[test]
    fn test_get_string_arg() {
        assert_eq!(get_string_arg(&args(json!({"gene_symbol": "TP53"})), "gene_symbol").unwrap(), "TP53");

        for bad in [json!({}), json!({"gene_symbol": ""}), json!({"gene_symbol": 53})] {
            let err = get_string_arg(&args(bad), "gene_symbol").unwrap_err();
            assert_eq!(err.to_string(), "gene_symbol is required");
        }
    }

    #[test]
    fn test_error_outcome_to_json() {
        let outcome = Err(LookupError::NoMatch { symbol: "ZZZ".to_string() });
        assert_eq!(
            outcome_to_json(&outcome),
            json!({ "error": "No data found for gene symbol 'ZZZ'" })
        );
    }

    #[test]
    fn test_outcome_text_is_indented_json() {
        let outcome = Err(LookupError::NoMatch { symbol: "ZZZ".to_string() });
        let text = outcome_to_text(&outcome);
        assert!(text.starts_with("{\n  \"error\""));
    }

    #[test]
    fn test_locations_to_text() {
        assert_eq!(locations_to_text(&[]), NO_LOCATION_TEXT);
        assert_eq!(
            locations_to_text(&["Nucleus".to_string(), "Cytoplasm".to_string()]),
            "Nucleus\nCytoplasm"
        );
    }
}
