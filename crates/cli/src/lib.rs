//! `catalog-check-cli` library crate.
//!
//! Configuration, report rendering and the top-level run step, exposed for
//! integration testing. The binary entrypoint lives in `main.rs`.

pub mod config;
pub mod output;

use catalog_check_core::{validate_catalog, CatalogDataset, LoadError, ValidationReport};

use crate::config::CheckConfig;

/// Every check passed.
pub const EXIT_PASSED: i32 = 0;
/// The catalog loaded but the schema check or a row rule failed.
pub const EXIT_VALIDATION_FAILED: i32 = 1;
/// The catalog could not be loaded, or the configuration is invalid.
pub const EXIT_LOAD_ERROR: i32 = 2;

/// Load the configured catalog and validate it.
pub fn run(config: &CheckConfig) -> Result<ValidationReport, LoadError> {
    let dataset = CatalogDataset::load_tsv(&config.catalog_path)?;
    Ok(validate_catalog(&dataset))
}

/// Process exit code for a finished validation run.
pub fn exit_code(report: &ValidationReport) -> i32 {
    if report.passed() {
        EXIT_PASSED
    } else {
        EXIT_VALIDATION_FAILED
    }
}
