use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Catalog file checked when neither `CATALOG_PATH` nor a path argument is given.
pub const DEFAULT_CATALOG_PATH: &str = "item_catalog.tsv";

/// How the report is written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
}

impl ReportFormat {
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be one of: text, json (got {value:?})")]
    InvalidFormat { var: &'static str, value: String },

    #[error("{var} must be a non-negative integer (got {value:?})")]
    InvalidNumber { var: &'static str, value: String },
}

/// Command-line arguments. Each one overrides its environment variable.
#[derive(Debug, Parser)]
#[command(
    name = "catalog-check",
    version,
    about = "Validate a tab-separated item catalog against the platform's column rules"
)]
pub struct Cli {
    /// Catalog file to check [env: CATALOG_PATH] [default: item_catalog.tsv]
    pub path: Option<PathBuf>,

    /// Report format [env: CATALOG_REPORT_FORMAT] [default: text]
    #[arg(long, value_enum)]
    pub format: Option<ReportFormat>,

    /// Echo at most this many failing rows per rule [env: CATALOG_MAX_FAILURES]
    #[arg(long)]
    pub max_failures: Option<usize>,
}

/// Validation run configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckConfig {
    pub catalog_path: PathBuf,
    pub format: ReportFormat,
    /// `None` echoes every failing row.
    pub max_failures: Option<usize>,
}

impl CheckConfig {
    /// Load configuration from command-line arguments, falling back to
    /// environment variables and then to defaults.
    ///
    /// | Flag             | Env Var                 | Default            |
    /// |------------------|-------------------------|--------------------|
    /// | `<PATH>`         | `CATALOG_PATH`          | `item_catalog.tsv` |
    /// | `--format`       | `CATALOG_REPORT_FORMAT` | `text`             |
    /// | `--max-failures` | `CATALOG_MAX_FAILURES`  | unlimited          |
    ///
    /// An environment variable is only read, and so only validated, when its
    /// flag is absent.
    pub fn from_env(cli: Cli) -> Result<Self, ConfigError> {
        Self::from_lookup(cli, |var| std::env::var(var).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reading variables through
    /// `lookup`, so callers can supply values without touching the process
    /// environment.
    pub fn from_lookup<F>(cli: Cli, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = |var: &str| lookup(var).filter(|s| !s.is_empty());

        let catalog_path = match cli.path {
            Some(path) => path,
            None => env("CATALOG_PATH")
                .unwrap_or_else(|| DEFAULT_CATALOG_PATH.into())
                .into(),
        };

        let format = match cli.format {
            Some(format) => format,
            None => match env("CATALOG_REPORT_FORMAT") {
                None => ReportFormat::Text,
                Some(value) => ReportFormat::parse(&value).ok_or(ConfigError::InvalidFormat {
                    var: "CATALOG_REPORT_FORMAT",
                    value,
                })?,
            },
        };

        let max_failures = match cli.max_failures {
            Some(limit) => Some(limit),
            None => match env("CATALOG_MAX_FAILURES") {
                None => None,
                Some(value) => Some(value.trim().parse().map_err(|_| {
                    ConfigError::InvalidNumber {
                        var: "CATALOG_MAX_FAILURES",
                        value,
                    }
                })?),
            },
        };

        Ok(Self {
            catalog_path,
            format,
            max_failures,
        })
    }
}
