//! Parse and validate LLM output against a task schema

use crate::error::ExtractorError;
use grantex_domain::Schema;
use serde_json::{Map, Value};

/// Parse an LLM response strictly as one JSON object and validate it
/// against the schema.
///
/// The prompt forbids code fences, but models occasionally wrap the
/// object anyway; a surrounding markdown fence is stripped before
/// parsing. Anything else around the object is a malformed response.
pub fn parse_response(
    response: &str,
    schema: &Schema,
) -> Result<Map<String, Value>, ExtractorError> {
    let json_str = strip_code_fence(response);

    let value: Value = serde_json::from_str(json_str)
        .map_err(|e| ExtractorError::MalformedResponse(format!("JSON parse error: {}", e)))?;

    Ok(schema.validate(&value)?)
}

/// Strip a surrounding markdown code fence, if present
fn strip_code_fence(response: &str) -> &str {
    let trimmed = response.trim();
    if !trimmed.starts_with("```") {
        return trimmed;
    }

    // Drop the opening fence line (``` or ```json)
    let body = match trimmed.find('\n') {
        Some(idx) => &trimmed[idx + 1..],
        None => return trimmed,
    };

    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use grantex_domain::schema_for;

    #[test]
    fn test_parse_valid_general_response() {
        let response = r#"{
            "grant_name": "Ocean Research Initiative",
            "projects": [
                {"name": "Buoy Network", "start_date": "01/01/2024", "end_date": "12/31/2024"}
            ]
        }"#;

        let fields = parse_response(response, schema_for("general")).unwrap();
        assert_eq!(fields["grant_name"], "Ocean Research Initiative");
        assert_eq!(fields["projects"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_parse_response_with_markdown_wrapper() {
        let response = "```json\n{\"grant_name\": \"X\", \"projects\": []}\n```";

        let fields = parse_response(response, schema_for("general")).unwrap();
        assert_eq!(fields["grant_name"], "X");
    }

    #[test]
    fn test_parse_response_with_bare_fence() {
        let response = "```\n{\"grant_name\": \"X\", \"projects\": []}\n```";

        let fields = parse_response(response, schema_for("general")).unwrap();
        assert_eq!(fields["grant_name"], "X");
    }

    #[test]
    fn test_parse_non_json_is_malformed() {
        let result = parse_response("This is not JSON", schema_for("general"));
        assert!(matches!(result, Err(ExtractorError::MalformedResponse(_))));
    }

    #[test]
    fn test_parse_prose_around_json_is_malformed() {
        let response = "Here is the data: {\"grant_name\": \"X\", \"projects\": []}";
        let result = parse_response(response, schema_for("general"));
        assert!(matches!(result, Err(ExtractorError::MalformedResponse(_))));
    }

    #[test]
    fn test_parse_json_array_is_schema_violation() {
        let result = parse_response("[1, 2, 3]", schema_for("general"));
        assert!(matches!(result, Err(ExtractorError::Schema(_))));
    }

    #[test]
    fn test_parse_missing_field_is_schema_violation() {
        let result = parse_response("{\"grant_name\": \"X\"}", schema_for("general"));
        assert!(matches!(result, Err(ExtractorError::Schema(_))));
    }

    #[test]
    fn test_parse_extra_field_is_schema_violation() {
        let response = "{\"grant_name\": \"X\", \"projects\": [], \"notes\": \"hi\"}";
        let result = parse_response(response, schema_for("general"));
        assert!(matches!(result, Err(ExtractorError::Schema(_))));
    }

    #[test]
    fn test_parse_empty_object_against_empty_schema() {
        let fields = parse_response("{}", schema_for("unrecognized")).unwrap();
        assert!(fields.is_empty());
    }

    #[test]
    fn test_strip_code_fence_passthrough() {
        assert_eq!(strip_code_fence("{\"a\": 1}"), "{\"a\": 1}");
        assert_eq!(strip_code_fence("  {\"a\": 1}\n"), "{\"a\": 1}");
    }

    #[test]
    fn test_strip_code_fence_json_language_tag() {
        assert_eq!(strip_code_fence("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
    }
}
