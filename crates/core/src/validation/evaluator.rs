//! Rule evaluator: pure logic over an already loaded dataset.

use crate::catalog::CatalogDataset;

use super::registry::catalog_rules;
use super::rules::{RowFailure, RowRule, RuleOutcome, ValidationReport};
use super::schema::check_schema;

/// Run the schema check and every catalog rule over every row.
pub fn validate_catalog(dataset: &CatalogDataset) -> ValidationReport {
    validate_with_rules(dataset, catalog_rules())
}

/// Run the schema check and the given rules over every row.
///
/// Nothing short-circuits: each rule sees each row, so the report lists every
/// defect in one pass. The dataset is only read, so repeated runs over the
/// same dataset produce identical reports.
pub fn validate_with_rules(dataset: &CatalogDataset, rules: &[RowRule]) -> ValidationReport {
    let schema = check_schema(dataset.header());
    let outcomes: Vec<RuleOutcome> = rules
        .iter()
        .map(|rule| evaluate_rule(rule, dataset))
        .collect();

    let report = ValidationReport {
        source: dataset.source().to_string(),
        total_rows: dataset.len(),
        schema,
        rules: outcomes,
    };

    tracing::info!(
        source = %report.source,
        rows = report.total_rows,
        schema_passed = report.schema.passed,
        failed_rules = report.failed_rules().count(),
        row_failures = report.failure_count(),
        "Catalog validation finished",
    );

    report
}

/// Apply one rule to every row in order.
pub fn evaluate_rule(rule: &RowRule, dataset: &CatalogDataset) -> RuleOutcome {
    let mut failures = Vec::new();

    for row in dataset.rows() {
        if rule.passes(&row) {
            continue;
        }
        tracing::warn!(
            rule = rule.name,
            row_index = row.index(),
            line = row.line(),
            "{} failed at row number {}",
            rule.name,
            row.index(),
        );
        failures.push(RowFailure {
            row_index: row.index(),
            line: row.line(),
            row: row.payload(),
        });
    }

    tracing::debug!(rule = rule.name, failures = failures.len(), "Rule evaluated");

    RuleOutcome {
        rule: rule.name,
        field: rule.field,
        description: rule.description,
        passed: failures.is_empty(),
        failures,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Header, RowRef};
    use crate::types::CatalogField;

    fn always_fails(_: &RowRef<'_>) -> bool {
        false
    }

    fn title_present(row: &RowRef<'_>) -> bool {
        row.value(CatalogField::Title).is_some()
    }

    fn dataset(rows: Vec<Vec<&str>>) -> CatalogDataset {
        let header = Header::new(["id", "title"]);
        let rows = rows
            .into_iter()
            .map(|r| r.into_iter().map(String::from).collect())
            .collect();
        CatalogDataset::from_parts("mem", header, rows)
    }

    #[test]
    fn collects_every_failing_row_without_stopping() {
        let ds = dataset(vec![vec!["a", ""], vec!["b", "ok"], vec!["c", ""]]);
        let rule = RowRule {
            name: "title_present",
            field: CatalogField::Title,
            description: "title present",
            check: title_present,
        };
        let outcome = evaluate_rule(&rule, &ds);
        assert!(!outcome.passed);
        let indices: Vec<_> = outcome.failures.iter().map(|f| f.row_index).collect();
        assert_eq!(indices, vec![0, 2]);
        assert_eq!(outcome.failures[1].line, 4);
    }

    #[test]
    fn failure_echoes_full_row() {
        let ds = dataset(vec![vec!["a", "t"]]);
        let rule = RowRule {
            name: "always_fails",
            field: CatalogField::Id,
            description: "never passes",
            check: always_fails,
        };
        let outcome = evaluate_rule(&rule, &ds);
        assert_eq!(
            outcome.failures[0].row,
            vec![
                ("id".to_string(), "a".to_string()),
                ("title".to_string(), "t".to_string()),
            ]
        );
    }

    #[test]
    fn every_rule_runs_even_when_schema_fails() {
        let ds = dataset(vec![vec!["a", "t"]]);
        let report = validate_catalog(&ds);
        assert!(!report.schema.passed);
        assert_eq!(report.rules.len(), CatalogField::ALL.len());
        assert!(!report.passed());
        // Columns absent from the header read as missing, so required ones fail.
        assert!(!report.outcome(CatalogField::Brand).unwrap().passed);
        // Optional ones pass.
        assert!(report.outcome(CatalogField::Rating).unwrap().passed);
    }

    #[test]
    fn empty_dataset_with_good_header_passes() {
        let header = Header::new(CatalogField::ALL.iter().map(|f| f.as_str()));
        let ds = CatalogDataset::from_parts("mem", header, Vec::new());
        let report = validate_catalog(&ds);
        assert!(report.passed());
        assert_eq!(report.failure_count(), 0);
    }

    #[test]
    fn rows_are_not_reordered() {
        let header = Header::new(["id"]);
        let ds = CatalogDataset::from_parts(
            "mem",
            header,
            vec![vec!["x".repeat(60)], vec!["ok".into()], vec!["y".repeat(60)]],
        );
        let report = validate_with_rules(&ds, crate::validation::catalog_rules());
        let id = report.outcome(CatalogField::Id).unwrap();
        let indices: Vec<_> = id.failures.iter().map(|f| f.row_index).collect();
        assert_eq!(indices, vec![0, 2]);
    }
}
