//! `catalog-check` -- validate an item catalog TSV before upload.
//!
//! Loads the catalog, checks the header against the 17 required columns,
//! applies every column rule to every row, and prints the report to stdout.
//! Logs go to stderr.
//!
//! # Environment variables
//!
//! | Variable                | Required | Default              | Description                  |
//! |-------------------------|----------|----------------------|------------------------------|
//! | `CATALOG_PATH`          | no       | `item_catalog.tsv`   | Catalog file to check        |
//! | `CATALOG_REPORT_FORMAT` | no       | `text`               | `text` or `json`             |
//! | `CATALOG_MAX_FAILURES`  | no       | unlimited            | Failing rows echoed per rule |
//! | `RUST_LOG`              | no       | `catalog_check=info` | Log filter                   |
//!
//! A command-line flag takes precedence over its variable, which is then
//! not read at all.
//!
//! Exit status: `0` when every check passes, `1` when any check fails, `2`
//! when the catalog cannot be loaded or the configuration is invalid.

use std::io::Write;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use catalog_check_cli::config::{CheckConfig, Cli};
use catalog_check_cli::{exit_code, output, run, EXIT_LOAD_ERROR};

fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "catalog_check=info,catalog_check_cli=info,catalog_check_core=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let code = match check(cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = ?e, "Catalog check aborted");
            EXIT_LOAD_ERROR
        }
    };
    std::process::exit(code);
}

fn check(cli: Cli) -> anyhow::Result<i32> {
    let config = CheckConfig::from_env(cli).context("Invalid configuration")?;

    tracing::info!(
        path = %config.catalog_path.display(),
        format = ?config.format,
        "Starting catalog check",
    );

    let report = run(&config)
        .with_context(|| format!("Cannot validate {}", config.catalog_path.display()))?;

    let rendered = output::render(&report, config.format, config.max_failures)
        .context("Failed to render report")?;

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(rendered.as_bytes())
        .and_then(|_| stdout.flush())
        .context("Failed to write report")?;

    Ok(exit_code(&report))
}
