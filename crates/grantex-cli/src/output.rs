//! Output writing and status formatting for the CLI.

use crate::error::Result;
use colored::*;
use grantex_domain::GrantRecord;
use std::fs;
use std::path::Path;

/// Write the assembled record to its output file.
///
/// The record is pretty-printed with 4-space indentation and fully
/// overwrites any prior file at the path. Callers invoke this only after
/// every task has succeeded, so a failed run never touches prior output.
pub fn write_record(record: &GrantRecord, path: &Path) -> Result<()> {
    let rendered = record.to_json_pretty()?;
    fs::write(path, rendered)?;
    Ok(())
}

/// Colored status lines for run progress.
pub struct StatusLine {
    color_enabled: bool,
}

impl StatusLine {
    /// Create a new status formatter.
    pub fn new(color_enabled: bool) -> Self {
        Self { color_enabled }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            _ => text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_write_record_four_space_indent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grant.json");

        let mut record = GrantRecord::new();
        let fields = match json!({"grant_name": "X", "projects": []}) {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        };
        record.merge(fields);

        write_record(&record, &path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("\n    \"grant_name\""));

        let parsed = GrantRecord::from_json_str(&written).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn test_write_record_overwrites_prior_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grant.json");
        fs::write(&path, "{\"stale\": true}").unwrap();

        let record = GrantRecord::new();
        write_record(&record, &path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(!written.contains("stale"));
    }

    #[test]
    fn test_status_without_color() {
        let status = StatusLine::new(false);
        assert_eq!(status.success("done"), "✓ done");
        assert_eq!(status.info("step"), "ℹ step");
        assert_eq!(status.error("boom"), "✗ boom");
    }
}
