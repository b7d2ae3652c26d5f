//! Catalog validation engine.
//!
//! Provides the rule table, the primitive cell checks it is built from, the
//! header schema check, and a pure evaluator producing a
//! [`ValidationReport`].

pub mod checks;
pub mod evaluator;
pub mod registry;
pub mod rules;
pub mod schema;

pub use evaluator::{evaluate_rule, validate_catalog, validate_with_rules};
pub use registry::{catalog_rules, rule_for};
pub use rules::{RowCheck, RowFailure, RowRule, RuleOutcome, SchemaCheck, ValidationReport};
pub use schema::check_schema;
