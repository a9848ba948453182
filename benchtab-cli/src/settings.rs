//! Settings Resolution
//!
//! Layers command-line flags over `benchtab.toml` values and validates the
//! result before any criterion file is touched.

use crate::Cli;
use crate::config::BenchtabConfig;
use benchtab_report::{OutputFormat, UnsupportedFormat};
use std::path::PathBuf;
use thiserror::Error;

/// Invalid combination of settings
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Short names were given but do not pair up with the bench names
    #[error(
        "--short-bench-names and --bench-names need to have same length ({short_names} vs {names})"
    )]
    NameCountMismatch {
        /// Number of bench names
        names: usize,
        /// Number of short names
        short_names: usize,
    },

    /// Output format is not implemented
    #[error(transparent)]
    Format(#[from] UnsupportedFormat),
}

/// Where estimate files are read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultSource {
    /// Criterion output folder
    pub folder: PathBuf,
    /// Glob selecting estimate files inside `folder`
    pub glob: String,
}

impl ResultSource {
    /// CLI value if given, else config value
    pub fn resolve(cli: &Cli, config: &BenchtabConfig) -> Self {
        Self {
            folder: cli
                .criterion_target_folder
                .clone()
                .unwrap_or_else(|| PathBuf::from(&config.criterion.target_folder)),
            glob: cli
                .criterion_glob
                .clone()
                .unwrap_or_else(|| config.criterion.glob.clone()),
        }
    }
}

/// Everything needed to produce one table
#[derive(Debug, Clone, PartialEq)]
pub struct TableSettings {
    /// Estimate file location
    pub source: ResultSource,
    /// Benchmarks to tabulate, in column order
    pub bench_names: Vec<String>,
    /// Column labels, same length as `bench_names`
    pub short_bench_names: Vec<String>,
    /// Output format
    pub format: OutputFormat,
}

impl TableSettings {
    /// Resolve and validate table settings (CLI flag > config value > default)
    pub fn resolve(cli: &Cli, config: &BenchtabConfig) -> Result<Self, SettingsError> {
        let bench_names = match &cli.bench_names {
            Some(list) => split_names(list),
            None => config.benches.names.clone(),
        };

        // An explicitly empty --short-bench-names also means "reuse the names"
        let short_bench_names = match &cli.short_bench_names {
            Some(list) if list.is_empty() => Vec::new(),
            Some(list) => split_names(list),
            None => config.benches.short_names.clone(),
        };

        let short_bench_names = if short_bench_names.is_empty() {
            bench_names.clone()
        } else if short_bench_names.len() != bench_names.len() {
            return Err(SettingsError::NameCountMismatch {
                names: bench_names.len(),
                short_names: short_bench_names.len(),
            });
        } else {
            short_bench_names
        };

        let format: OutputFormat = cli
            .format
            .as_deref()
            .unwrap_or(&config.output.format)
            .parse()?;

        Ok(Self {
            source: ResultSource::resolve(cli, config),
            bench_names,
            short_bench_names,
            format,
        })
    }
}

/// Split a comma-separated list, trimming each entry
pub fn split_names(list: &str) -> Vec<String> {
    list.split(',').map(|name| name.trim().to_string()).collect()
}
