//! Structured-output schemas for the extraction tasks
//!
//! A [`Schema`] is the single source of truth for a task's output shape.
//! It generates both the human-readable format description embedded in
//! the prompt ([`Schema::format_instructions`]) and the validation rules
//! applied to the model's response ([`Schema::validate`]), so the two can
//! never drift apart.

use serde_json::{Map, Value};
use thiserror::Error;

/// Errors produced when a response fails schema validation
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The response was valid JSON but not a JSON object
    #[error("Response is not a JSON object")]
    NotAnObject,

    /// A required field was omitted
    #[error("Missing required field '{field}'")]
    MissingField {
        /// Name of the omitted field
        field: String,
    },

    /// A field was present with the wrong JSON type
    #[error("Field '{field}' has the wrong type (expected {expected})")]
    WrongType {
        /// Name of the mistyped field
        field: String,
        /// Human-readable expected type
        expected: &'static str,
    },

    /// The response contained a field outside the schema
    #[error("Unexpected field '{field}' outside the schema")]
    UnknownField {
        /// Name of the unexpected field
        field: String,
    },
}

/// The JSON type a field must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A JSON string
    Text,
    /// A JSON number
    Number,
    /// A JSON array of objects, each validated against the nested fields
    ObjectList(&'static [FieldSpec]),
}

/// One typed, described field of a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field name as it appears in the JSON output
    pub name: &'static str,

    /// Required JSON type
    pub kind: FieldKind,

    /// Semantic description shown to the model
    pub description: &'static str,
}

/// A named set of typed fields describing one task's output shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    /// Schema name (matches the task key it belongs to)
    pub name: &'static str,

    /// The schema's fields, in output order
    pub fields: &'static [FieldSpec],
}

const PROJECT_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "name",
        kind: FieldKind::Text,
        description: "Name or title of the project or program",
    },
    FieldSpec {
        name: "start_date",
        kind: FieldKind::Text,
        description: "Start date of the project in MM/DD/YYYY or YYYY-MM-DD format",
    },
    FieldSpec {
        name: "end_date",
        kind: FieldKind::Text,
        description: "End date of the project in MM/DD/YYYY or YYYY-MM-DD format",
    },
];

/// Schema for the general grant metadata task
pub const GENERAL_SCHEMA: Schema = Schema {
    name: "general",
    fields: &[
        FieldSpec {
            name: "grant_name",
            kind: FieldKind::Text,
            description: "The official name or title of the grant",
        },
        FieldSpec {
            name: "projects",
            kind: FieldKind::ObjectList(PROJECT_FIELDS),
            description: "List of projects funded by this grant, each with a name, \
                start date, and end date",
        },
    ],
};

const OTHER_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "obj",
        kind: FieldKind::Text,
        description: "A specific object or item receiving funding under 'other' spending",
    },
    FieldSpec {
        name: "cost",
        kind: FieldKind::Number,
        description: "Cost amount allocated to this object in USD",
    },
];

/// Schema for the spending breakdown task
pub const SPENDING_SCHEMA: Schema = Schema {
    name: "spending",
    fields: &[
        FieldSpec {
            name: "total",
            kind: FieldKind::Number,
            description: "Total amount of grant funding in USD",
        },
        FieldSpec {
            name: "fringe",
            kind: FieldKind::Number,
            description: "Amount for fringe benefits such as insurance, retirement, etc.",
        },
        FieldSpec {
            name: "indirect",
            kind: FieldKind::Number,
            description: "Amount for indirect costs like rent, administrative overhead, \
                and utilities",
        },
        FieldSpec {
            name: "travel",
            kind: FieldKind::Number,
            description: "Amount allocated to travel-related expenses",
        },
        FieldSpec {
            name: "equipment",
            kind: FieldKind::Number,
            description: "Amount allocated to equipment purchases",
        },
        FieldSpec {
            name: "other",
            kind: FieldKind::ObjectList(OTHER_FIELDS),
            description: "List of other individual items or objects that received \
                funding, with their respective cost",
        },
    ],
};

/// The zero-field schema returned for unrecognized task keys
pub const EMPTY_SCHEMA: Schema = Schema {
    name: "empty",
    fields: &[],
};

/// Look up the schema for a task key.
///
/// Total over all inputs: the two known keys return their fixed schemas,
/// and any other key returns the empty schema (zero fields). The fallback
/// is an explicit forward-compatibility policy, not an error path.
pub fn schema_for(key: &str) -> &'static Schema {
    match key {
        "general" => &GENERAL_SCHEMA,
        "spending" => &SPENDING_SCHEMA,
        _ => &EMPTY_SCHEMA,
    }
}

impl Schema {
    /// Whether this schema has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Look up a field by name
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Render the expected output shape with per-field descriptions.
    ///
    /// This is the text embedded in the prompt's format section.
    pub fn format_instructions(&self) -> String {
        let mut body = String::new();
        write_fields(&mut body, self.fields, 1);
        format!("{{\n{}}}", body)
    }

    /// Validate a parsed response against this schema.
    ///
    /// The value must be a JSON object carrying exactly the schema's
    /// fields with the right types; object lists are validated
    /// recursively. Returns the validated field map.
    pub fn validate(&self, value: &Value) -> Result<Map<String, Value>, SchemaError> {
        let obj = value.as_object().ok_or(SchemaError::NotAnObject)?;
        validate_fields(self.fields, obj)?;
        Ok(obj.clone())
    }
}

fn write_fields(out: &mut String, fields: &[FieldSpec], depth: usize) {
    let pad = "    ".repeat(depth);
    for spec in fields {
        match spec.kind {
            FieldKind::Text => {
                out.push_str(&format!(
                    "{pad}\"{}\": <string>  // {}\n",
                    spec.name, spec.description
                ));
            }
            FieldKind::Number => {
                out.push_str(&format!(
                    "{pad}\"{}\": <number>  // {}\n",
                    spec.name, spec.description
                ));
            }
            FieldKind::ObjectList(item_fields) => {
                out.push_str(&format!("{pad}\"{}\": [  // {}\n", spec.name, spec.description));
                out.push_str(&format!("{pad}    {{\n"));
                write_fields(out, item_fields, depth + 2);
                out.push_str(&format!("{pad}    }}\n"));
                out.push_str(&format!("{pad}]\n"));
            }
        }
    }
}

fn validate_fields(fields: &[FieldSpec], obj: &Map<String, Value>) -> Result<(), SchemaError> {
    for key in obj.keys() {
        if fields.iter().all(|f| f.name != key) {
            return Err(SchemaError::UnknownField { field: key.clone() });
        }
    }

    for spec in fields {
        let value = obj.get(spec.name).ok_or_else(|| SchemaError::MissingField {
            field: spec.name.to_string(),
        })?;

        match spec.kind {
            FieldKind::Text => {
                if !value.is_string() {
                    return Err(SchemaError::WrongType {
                        field: spec.name.to_string(),
                        expected: "string",
                    });
                }
            }
            FieldKind::Number => {
                if !value.is_number() {
                    return Err(SchemaError::WrongType {
                        field: spec.name.to_string(),
                        expected: "number",
                    });
                }
            }
            FieldKind::ObjectList(item_fields) => {
                let items = value.as_array().ok_or_else(|| SchemaError::WrongType {
                    field: spec.name.to_string(),
                    expected: "list",
                })?;
                for item in items {
                    let entry = item.as_object().ok_or_else(|| SchemaError::WrongType {
                        field: spec.name.to_string(),
                        expected: "list of objects",
                    })?;
                    validate_fields(item_fields, entry)?;
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_schema_lookup_known_keys() {
        let general = schema_for("general");
        let spending = schema_for("spending");

        assert!(!general.is_empty());
        assert!(!spending.is_empty());
        assert_ne!(general, spending);
    }

    #[test]
    fn test_schema_lookup_unknown_key_is_empty() {
        let schema = schema_for("unknown");
        assert!(schema.is_empty());
        assert_eq!(schema_for(""), schema_for("not-a-task"));
    }

    #[test]
    fn test_every_field_has_a_description() {
        fn check(fields: &[FieldSpec]) {
            for spec in fields {
                assert!(!spec.description.is_empty(), "field '{}' undescribed", spec.name);
                if let FieldKind::ObjectList(nested) = spec.kind {
                    check(nested);
                }
            }
        }
        check(GENERAL_SCHEMA.fields);
        check(SPENDING_SCHEMA.fields);
    }

    #[test]
    fn test_format_instructions_cover_all_fields() {
        let rendered = SPENDING_SCHEMA.format_instructions();
        for name in ["total", "fringe", "indirect", "travel", "equipment", "other", "obj", "cost"] {
            assert!(rendered.contains(&format!("\"{}\"", name)), "missing {}", name);
        }
        assert!(rendered.contains("Total amount of grant funding in USD"));
    }

    #[test]
    fn test_format_instructions_nested_shape() {
        let rendered = GENERAL_SCHEMA.format_instructions();
        assert!(rendered.starts_with("{\n"));
        assert!(rendered.ends_with('}'));
        assert!(rendered.contains("\"projects\": ["));
        assert!(rendered.contains("\"start_date\": <string>"));
    }

    #[test]
    fn test_empty_schema_instructions() {
        assert_eq!(EMPTY_SCHEMA.format_instructions(), "{\n}");
    }

    #[test]
    fn test_validate_accepts_well_formed_general() {
        let value = json!({
            "grant_name": "Ocean Research Initiative",
            "projects": [
                {"name": "Buoy Network", "start_date": "2024-01-01", "end_date": "2025-01-01"}
            ]
        });

        let fields = GENERAL_SCHEMA.validate(&value).unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields["grant_name"], "Ocean Research Initiative");
    }

    #[test]
    fn test_validate_accepts_well_formed_spending() {
        let value = json!({
            "total": 100000,
            "fringe": 0,
            "indirect": 12000.5,
            "travel": 0,
            "equipment": 0,
            "other": [{"obj": "Lab supplies", "cost": 400}]
        });

        let fields = SPENDING_SCHEMA.validate(&value).unwrap();
        assert_eq!(fields.len(), 6);
    }

    #[test]
    fn test_validate_rejects_non_object() {
        let result = GENERAL_SCHEMA.validate(&json!([1, 2, 3]));
        assert!(matches!(result, Err(SchemaError::NotAnObject)));
    }

    #[test]
    fn test_validate_rejects_missing_field() {
        let value = json!({"grant_name": "X"});
        let result = GENERAL_SCHEMA.validate(&value);
        assert!(matches!(
            result,
            Err(SchemaError::MissingField { ref field }) if field == "projects"
        ));
    }

    #[test]
    fn test_validate_rejects_wrong_type() {
        let value = json!({"grant_name": 42, "projects": []});
        let result = GENERAL_SCHEMA.validate(&value);
        assert!(matches!(
            result,
            Err(SchemaError::WrongType { ref field, expected: "string" }) if field == "grant_name"
        ));
    }

    #[test]
    fn test_validate_rejects_unknown_field() {
        let value = json!({"grant_name": "X", "projects": [], "extra": true});
        let result = GENERAL_SCHEMA.validate(&value);
        assert!(matches!(
            result,
            Err(SchemaError::UnknownField { ref field }) if field == "extra"
        ));
    }

    #[test]
    fn test_validate_recurses_into_object_lists() {
        let value = json!({
            "grant_name": "X",
            "projects": [{"name": "P", "start_date": "2024-01-01"}]
        });
        let result = GENERAL_SCHEMA.validate(&value);
        assert!(matches!(
            result,
            Err(SchemaError::MissingField { ref field }) if field == "end_date"
        ));

        let value = json!({
            "grant_name": "X",
            "projects": ["not an object"]
        });
        let result = GENERAL_SCHEMA.validate(&value);
        assert!(matches!(result, Err(SchemaError::WrongType { .. })));
    }

    #[test]
    fn test_empty_schema_validates_only_empty_objects() {
        assert!(EMPTY_SCHEMA.validate(&json!({})).unwrap().is_empty());
        assert!(EMPTY_SCHEMA.validate(&json!({"any": 1})).is_err());
    }

    #[test]
    fn test_field_lookup() {
        assert!(SPENDING_SCHEMA.field("total").is_some());
        assert!(SPENDING_SCHEMA.field("salary").is_none());
    }
}
