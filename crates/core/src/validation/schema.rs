//! Header check: the declared column set must equal the required one.

use std::collections::BTreeSet;

use crate::catalog::Header;
use crate::types::CatalogField;

use super::rules::SchemaCheck;

/// Compare `header` (as an unordered set) against the 17 required columns.
///
/// Column order is irrelevant. Missing and unexpected names are reported
/// separately; a name declared twice also fails the check.
pub fn check_schema(header: &Header) -> SchemaCheck {
    let required: BTreeSet<&str> = CatalogField::ALL.iter().map(|f| f.as_str()).collect();

    let mut declared = BTreeSet::new();
    let mut duplicated = BTreeSet::new();
    for column in header.columns() {
        if !declared.insert(column.as_str()) {
            duplicated.insert(column.clone());
        }
    }

    let missing: Vec<String> = required
        .difference(&declared)
        .map(|s| s.to_string())
        .collect();
    let unexpected: Vec<String> = declared
        .difference(&required)
        .map(|s| s.to_string())
        .collect();
    let duplicated: Vec<String> = duplicated.into_iter().collect();

    let passed = missing.is_empty() && unexpected.is_empty() && duplicated.is_empty();
    if !passed {
        tracing::warn!(
            missing = ?missing,
            unexpected = ?unexpected,
            duplicated = ?duplicated,
            "Catalog header does not match the required columns",
        );
    }

    SchemaCheck {
        mandatory: true,
        passed,
        missing,
        unexpected,
        duplicated,
    }
}
