#![warn(missing_docs)]
//! # Benchtab
//!
//! Turn criterion benchmark results into comparison tables.
//!
//! Benchtab reads the `estimates.json` files criterion leaves under
//! `target/criterion`, keeps the mean point estimate of a chosen list of
//! benchmarks, and lays them out with one row per benchmark parameter and
//! one column per benchmark:
//!
//! ```text
//! |      | horner  | ecfft   |
//! |------|---------|---------|
//! | 8    | 10.0 ns | 2.13 ms |
//! | 1024 | 1.02 us | 12.3 s  |
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use benchtab::{format_md, parse_benches_results};
//! use std::path::Path;
//!
//! let names = ["poly/horner", "poly/ecfft"];
//! let results = parse_benches_results(
//!     Path::new("target/criterion"),
//!     "**/new/estimates.json",
//!     &names,
//! )?;
//! print!("{}", format_md(&names, &["horner", "ecfft"], &results.table));
//! ```

// Re-export collection types
pub use benchtab_core::{
    BenchResults, DEFAULT_CRITERION_GLOB, DEFAULT_CRITERION_TARGET_FOLDER, ResultsError,
    ResultsTable, RunWindow, STALE_AFTER, find_estimate_files, list_benches,
    parse_benches_results, read_estimate,
};

// Re-export rendering
pub use benchtab_report::{OutputFormat, UnsupportedFormat, format_md, format_ns, render_table};

// Re-export CLI pieces
pub use benchtab_cli::{
    BenchtabConfig, Cli, Commands, RenderedTable, SettingsError, TableSettings,
    format_run_window, render_results,
};

/// Run the Benchtab CLI.
///
/// ```ignore
/// fn main() -> anyhow::Result<()> {
///     benchtab::run()
/// }
/// ```
pub use benchtab_cli::run;
