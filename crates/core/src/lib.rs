//! `catalog-check-core` -- item catalog loading and validation.
//!
//! Loads a tab-separated product catalog into memory and checks it against
//! the fixed set of column rules an advertising platform expects. Everything
//! here is synchronous and free of I/O beyond the initial file read.

pub mod catalog;
pub mod error;
pub mod types;
pub mod validation;

pub use catalog::{CatalogDataset, CatalogRow, Header, RowRef};
pub use error::LoadError;
pub use types::CatalogField;
pub use validation::{validate_catalog, ValidationReport};
