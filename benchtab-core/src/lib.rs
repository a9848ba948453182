#![warn(missing_docs)]
//! Benchtab Core - Criterion Result Collection
//!
//! This crate turns a criterion output folder into an in-memory table:
//! - `read_estimate` extracts `mean.point_estimate` from one `estimates.json`
//! - `parse_benches_results` walks the folder, selects benchmarks by name and
//!   groups their estimates by parameter
//! - `ResultsTable` / `RunWindow` hold the outcome of one pass

mod collect;
mod error;
mod estimate;
mod table;

pub use collect::{
    BenchResults, bench_name_of, find_estimate_files, list_benches, param_segment, parse_param,
    parse_benches_results,
};
pub use error::ResultsError;
pub use estimate::read_estimate;
pub use table::{ResultsTable, RunWindow, STALE_AFTER};

/// Default criterion output folder, relative to the workspace root
pub const DEFAULT_CRITERION_TARGET_FOLDER: &str = "target/criterion";

/// Default pattern selecting the latest estimates of every benchmark
pub const DEFAULT_CRITERION_GLOB: &str = "**/new/estimates.json";
