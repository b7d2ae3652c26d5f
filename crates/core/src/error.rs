use std::path::PathBuf;

/// Fatal failures while reading a catalog file into memory.
///
/// Any of these aborts the run before a single rule is evaluated. Schema
/// mismatches and per-row rule failures are not errors in this sense; they
/// are collected into the [`ValidationReport`](crate::validation::ValidationReport).
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Cannot open catalog {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed reading catalog {source_name}: {source}")]
    Read {
        source_name: String,
        #[source]
        source: csv::Error,
    },

    #[error("Catalog {source_name} is not valid UTF-8 near line {line}")]
    Encoding { source_name: String, line: u64 },

    #[error("Catalog {source_name} line {line} has {found} fields, header declares {expected}")]
    RaggedRow {
        source_name: String,
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("Catalog {source_name} has no header line")]
    EmptyInput { source_name: String },
}

impl LoadError {
    /// Classify a `csv` reader error, pulling UTF-8 decode failures out into
    /// their own variant so the report can name the offending line.
    pub(crate) fn from_csv(source_name: &str, err: csv::Error) -> Self {
        if let csv::ErrorKind::Utf8 { pos, .. } = err.kind() {
            return Self::Encoding {
                source_name: source_name.to_string(),
                line: pos.as_ref().map(|p| p.line()).unwrap_or(0),
            };
        }
        Self::Read {
            source_name: source_name.to_string(),
            source: err,
        }
    }
}
