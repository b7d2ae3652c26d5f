//! Validation rule and result types.

use serde::Serialize;

use crate::catalog::RowRef;
use crate::types::{CatalogField, RowIndex};

/// Predicate over a single row. Receives the whole row so that cross-field
/// rules can read the columns they depend on.
pub type RowCheck = fn(&RowRef<'_>) -> bool;

/// One entry of the rule registry.
#[derive(Debug, Clone, Copy)]
pub struct RowRule {
    /// Stable rule name, used in reports (e.g. `wellformed_link`).
    pub name: &'static str,
    /// Column the rule is about.
    pub field: CatalogField,
    /// Human-readable statement of the constraint.
    pub description: &'static str,
    pub check: RowCheck,
}

impl RowRule {
    pub fn passes(&self, row: &RowRef<'_>) -> bool {
        (self.check)(row)
    }
}

/// A row that failed a rule, echoed in full for diagnosis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowFailure {
    pub row_index: RowIndex,
    pub line: u64,
    /// `(column, literal text)` pairs in header order.
    pub row: Vec<(String, String)>,
}

/// Result of running one rule over every row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleOutcome {
    pub rule: &'static str,
    pub field: CatalogField,
    pub description: &'static str,
    pub passed: bool,
    pub failures: Vec<RowFailure>,
}

/// Header-level result: the declared column set against the required one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaCheck {
    /// The schema check must pass for the catalog to be accepted.
    pub mandatory: bool,
    pub passed: bool,
    /// Required columns the header lacks, sorted.
    pub missing: Vec<String>,
    /// Header columns outside the required set, sorted.
    pub unexpected: Vec<String>,
    /// Header columns declared more than once, sorted.
    pub duplicated: Vec<String>,
}

impl SchemaCheck {
    /// Every name in the symmetric difference between header and required set.
    pub fn mismatched(&self) -> impl Iterator<Item = &str> {
        self.missing
            .iter()
            .chain(self.unexpected.iter())
            .map(String::as_str)
    }
}

/// Everything a validation run found, schema and rows together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub source: String,
    pub total_rows: usize,
    pub schema: SchemaCheck,
    pub rules: Vec<RuleOutcome>,
}

impl ValidationReport {
    /// The schema check and every rule passed on every row.
    pub fn passed(&self) -> bool {
        self.schema.passed && self.rules.iter().all(|r| r.passed)
    }

    /// Total row failures across all rules.
    pub fn failure_count(&self) -> usize {
        self.rules.iter().map(|r| r.failures.len()).sum()
    }

    pub fn failed_rules(&self) -> impl Iterator<Item = &RuleOutcome> {
        self.rules.iter().filter(|r| !r.passed)
    }

    pub fn outcome(&self, field: CatalogField) -> Option<&RuleOutcome> {
        self.rules.iter().find(|r| r.field == field)
    }
}
