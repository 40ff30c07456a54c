//! The cumulative grant record

use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Serializer, Value};

/// The cumulative result object for one run.
///
/// Built by shallow-merging each task's validated extraction result in
/// task order; a later task's fields overwrite earlier ones on key
/// collision (none is expected, the task schemas are disjoint).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GrantRecord {
    fields: Map<String, Value>,
}

impl GrantRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Shallow-merge an extraction result into the record.
    ///
    /// Existing keys are overwritten.
    pub fn merge(&mut self, fields: Map<String, Value>) {
        for (key, value) in fields {
            self.fields.insert(key, value);
        }
    }

    /// Look up a field by name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// The record's field map
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Number of fields in the record
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Serialize the record as pretty-printed JSON with 4-space indentation.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut ser = Serializer::with_formatter(&mut buf, formatter);
        self.fields.serialize(&mut ser)?;
        Ok(String::from_utf8(buf).expect("serde_json emits valid UTF-8"))
    }

    /// Parse a record back from its JSON serialization.
    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        let fields: Map<String, Value> = serde_json::from_str(s)?;
        Ok(Self { fields })
    }
}
