//! Report rendering for stdout.

use std::fmt::{self, Write};

use catalog_check_core::validation::{RuleOutcome, SchemaCheck};
use catalog_check_core::ValidationReport;

use crate::config::ReportFormat;

/// Name under which the header check is listed next to the row rules.
const SCHEMA_RULE_NAME: &str = "column_names";

/// Render `report` in the requested format.
pub fn render(
    report: &ValidationReport,
    format: ReportFormat,
    max_failures: Option<usize>,
) -> Result<String, serde_json::Error> {
    match format {
        ReportFormat::Text => Ok(render_text(report, max_failures)),
        ReportFormat::Json => render_json(report),
    }
}

pub fn render_json(report: &ValidationReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

/// Human-readable report: one PASS/FAIL line per check, then the echoed rows
/// of each failing rule.
pub fn render_text(report: &ValidationReport, max_failures: Option<usize>) -> String {
    TextReport::new(report, max_failures).to_string()
}

/// Text rendering of a [`ValidationReport`], writable to any formatter.
pub struct TextReport<'a> {
    report: &'a ValidationReport,
    max_failures: Option<usize>,
}

impl<'a> TextReport<'a> {
    /// `max_failures` caps the echoed rows per rule; `None` echoes all.
    pub fn new(report: &'a ValidationReport, max_failures: Option<usize>) -> Self {
        Self {
            report,
            max_failures,
        }
    }
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.report;

        writeln!(f, "Catalog: {} ({} rows)", report.source, report.total_rows)?;
        write_schema(f, &report.schema)?;
        for outcome in &report.rules {
            write_rule(f, outcome, self.max_failures)?;
        }

        if report.passed() {
            writeln!(f, "Result: PASSED ({} checks)", report.rules.len() + 1)
        } else {
            writeln!(
                f,
                "Result: FAILED (schema {}, {} row failures across {} rules)",
                if report.schema.passed { "ok" } else { "mismatch" },
                report.failure_count(),
                report.failed_rules().count(),
            )
        }
    }
}

fn write_schema(out: &mut impl Write, schema: &SchemaCheck) -> fmt::Result {
    let tag = if schema.mandatory { " (mandatory)" } else { "" };
    if schema.passed {
        return writeln!(out, "[PASS] {SCHEMA_RULE_NAME}{tag}");
    }

    let mut details = Vec::new();
    if !schema.missing.is_empty() {
        details.push(format!("missing: {}", schema.missing.join(", ")));
    }
    if !schema.unexpected.is_empty() {
        details.push(format!("unexpected: {}", schema.unexpected.join(", ")));
    }
    if !schema.duplicated.is_empty() {
        details.push(format!("duplicated: {}", schema.duplicated.join(", ")));
    }
    writeln!(out, "[FAIL] {SCHEMA_RULE_NAME}{tag}: {}", details.join("; "))
}

fn write_rule(
    out: &mut impl Write,
    outcome: &RuleOutcome,
    max_failures: Option<usize>,
) -> fmt::Result {
    if outcome.passed {
        return writeln!(out, "[PASS] {}", outcome.rule);
    }

    writeln!(
        out,
        "[FAIL] {}: {} ({} failing rows)",
        outcome.rule,
        outcome.description,
        outcome.failures.len(),
    )?;

    let shown = max_failures.unwrap_or(usize::MAX);
    for failure in outcome.failures.iter().take(shown) {
        writeln!(
            out,
            "  {} failed at row number {} (line {})",
            outcome.rule, failure.row_index, failure.line,
        )?;
        for (column, value) in &failure.row {
            writeln!(out, "    {column}: {value}")?;
        }
    }

    let hidden = outcome.failures.len().saturating_sub(shown);
    if hidden > 0 {
        writeln!(out, "  ... {hidden} more failing rows not shown")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_check_core::{validate_catalog, CatalogDataset, CatalogField, Header};

    fn dataset(rows: Vec<Vec<String>>) -> CatalogDataset {
        let header = Header::new(CatalogField::ALL.iter().map(|f| f.as_str()));
        CatalogDataset::from_parts("mem.tsv", header, rows)
    }

    fn row(id: &str) -> Vec<String> {
        [
            id,
            "seller-1",
            "Acme",
            "Trail runner",
            "",
            "",
            "https://shop.example.com/items/1",
            "https://img.example.com/items/1.jpg",
            "Women>Shoes",
            "",
            "",
            "",
            "Acme",
            "Y",
            "2023-06-05 10:00:00.000000",
            "",
            "",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    #[test]
    fn passing_report_lists_every_check() {
        let report = validate_catalog(&dataset(vec![row("a1")]));
        let text = render_text(&report, None);
        assert!(text.contains("[PASS] column_names (mandatory)"));
        assert!(text.contains("[PASS] wellformed_blocked"));
        assert!(text.contains("Result: PASSED (18 checks)"));
    }

    #[test]
    fn failing_rows_are_echoed_and_capped() {
        let long_id = "x".repeat(51);
        let report = validate_catalog(&dataset(vec![row(&long_id), row(&long_id), row("ok")]));
        let text = render_text(&report, Some(1));

        assert!(text.contains("[FAIL] wellformed_id"));
        assert!(text.contains("wellformed_id failed at row number 0 (line 2)"));
        assert!(!text.contains("wellformed_id failed at row number 1"));
        assert!(text.contains("... 1 more failing rows not shown"));
        assert!(text.contains(&format!("    id: {long_id}")));
        assert!(text.contains("Result: FAILED (schema ok, 2 row failures across 1 rules)"));
    }

    #[test]
    fn schema_mismatch_is_described() {
        let header = Header::new(["id", "color"]);
        let ds = CatalogDataset::from_parts("mem.tsv", header, Vec::new());
        let text = render_text(&validate_catalog(&ds), None);
        assert!(text.contains("[FAIL] column_names (mandatory): missing: "));
        assert!(text.contains("unexpected: color"));
    }

    #[test]
    fn json_output_parses() {
        let report = validate_catalog(&dataset(vec![row("a1")]));
        let json = render(&report, ReportFormat::Json, None).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["total_rows"], 1);
        assert_eq!(value["schema"]["passed"], true);
    }

    /// Accepts `budget` bytes, then reports an error on every write.
    struct ShortWriter {
        written: String,
        budget: usize,
    }

    impl Write for ShortWriter {
        fn write_str(&mut self, s: &str) -> fmt::Result {
            if self.written.len() + s.len() > self.budget {
                return Err(fmt::Error);
            }
            self.written.push_str(s);
            Ok(())
        }
    }

    #[test]
    fn write_errors_propagate_and_stop_output() {
        let long_id = "x".repeat(51);
        let report = validate_catalog(&dataset(vec![row(&long_id)]));
        let full = render_text(&report, None);

        let mut out = ShortWriter {
            written: String::new(),
            budget: 40,
        };
        let result = write!(out, "{}", TextReport::new(&report, None));

        assert!(result.is_err());
        assert!(out.written.len() <= 40);
        assert!(full.starts_with(&out.written));
        assert!(!out.written.contains("Result:"));
    }

    #[test]
    fn text_report_display_matches_render_text() {
        let report = validate_catalog(&dataset(vec![row("a1")]));
        let mut out = String::new();
        write!(out, "{}", TextReport::new(&report, Some(2))).unwrap();
        assert_eq!(out, render_text(&report, Some(2)));
    }
}
