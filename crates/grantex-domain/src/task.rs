//! The fixed extraction tasks and their static query configuration
//!
//! Each task key pairs a retrieval query (used for similarity search over
//! the page index) with an extraction question (sent to the language
//! model). Both are static configuration data so they can be unit-tested
//! without any network access.

use crate::schema::{schema_for, Schema};

/// The two fixed extraction tasks, processed in declaration order.
///
/// Later tasks merge on top of earlier ones, so the order is part of the
/// contract: general metadata first, then the spending breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKey {
    /// Grant name and funded projects with their dates
    General,
    /// Total amount and the spending breakdown
    Spending,
}

/// A task's fixed pair of query strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuerySpec {
    /// Query text used for similarity search against the page index
    pub retrieval_query: &'static str,

    /// Question sent to the language model together with the retrieved
    /// context
    pub extraction_question: &'static str,
}

const GENERAL_QUERIES: QuerySpec = QuerySpec {
    retrieval_query: "Information about the grant's official name, and the names, \
        start and end dates of any funded projects or programs.",
    extraction_question: "What is the full name of the grant? List all projects or \
        programs stated, including each project's name, start date, and end date.",
};

const SPENDING_QUERIES: QuerySpec = QuerySpec {
    retrieval_query: "Details about total funding, and how the grant money is \
        allocated, including salary, fringe/payroll benefits, indirect costs, \
        travel, equipment, and other types of spending.",
    extraction_question: "What is the total grant amount? Break down the spending \
        into: salary, fringe/payroll benefits, indirect costs, travel, equipment, \
        and other. For \"other\", provide a list of items with their names and cost.",
};

impl TaskKey {
    /// All task keys in processing order
    pub const ALL: [TaskKey; 2] = [TaskKey::General, TaskKey::Spending];

    /// The string key identifying this task
    pub fn key(&self) -> &'static str {
        match self {
            TaskKey::General => "general",
            TaskKey::Spending => "spending",
        }
    }

    /// The static query pair for this task
    pub fn query_spec(&self) -> &'static QuerySpec {
        match self {
            TaskKey::General => &GENERAL_QUERIES,
            TaskKey::Spending => &SPENDING_QUERIES,
        }
    }

    /// The output schema for this task
    pub fn schema(&self) -> &'static Schema {
        schema_for(self.key())
    }
}

impl std::fmt::Display for TaskKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_order_is_general_then_spending() {
        assert_eq!(TaskKey::ALL, [TaskKey::General, TaskKey::Spending]);
    }

    #[test]
    fn test_task_keys() {
        assert_eq!(TaskKey::General.key(), "general");
        assert_eq!(TaskKey::Spending.key(), "spending");
    }

    #[test]
    fn test_query_specs_are_non_empty_and_distinct() {
        for task in TaskKey::ALL {
            let spec = task.query_spec();
            assert!(!spec.retrieval_query.is_empty());
            assert!(!spec.extraction_question.is_empty());
            assert_ne!(spec.retrieval_query, spec.extraction_question);
        }

        assert_ne!(
            TaskKey::General.query_spec(),
            TaskKey::Spending.query_spec()
        );
    }

    #[test]
    fn test_schema_lookup_matches_key() {
        assert_eq!(TaskKey::General.schema().name, "general");
        assert_eq!(TaskKey::Spending.schema().name, "spending");
    }

    #[test]
    fn test_display_matches_key() {
        assert_eq!(TaskKey::General.to_string(), "general");
        assert_eq!(TaskKey::Spending.to_string(), "spending");
    }
}
