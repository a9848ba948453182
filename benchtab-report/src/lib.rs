#![warn(missing_docs)]
//! Benchtab Report - Table Rendering
//!
//! Turns a collected `ResultsTable` into text:
//! - `format_ns`: compact nanosecond durations (`10.5 ns`, `2.13 ms`)
//! - `format_md`: Markdown comparison table (parameters as rows, benchmarks as columns)

mod duration;
mod markdown;

pub use duration::format_ns;
pub use markdown::format_md;

use benchtab_core::ResultsTable;
use thiserror::Error;

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Markdown table (GitHub flavored)
    #[default]
    Markdown,
}

/// Requested output format is not implemented
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported output format '{0}' (supported: md)")]
pub struct UnsupportedFormat(pub String);

impl std::str::FromStr for OutputFormat {
    type Err = UnsupportedFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "md" => Ok(OutputFormat::Markdown),
            _ => Err(UnsupportedFormat(s.to_string())),
        }
    }
}

/// Render `results` in the requested format
pub fn render_table<N, L>(
    format: OutputFormat,
    bench_names: &[N],
    short_bench_names: &[L],
    results: &ResultsTable,
) -> String
where
    N: AsRef<str>,
    L: AsRef<str>,
{
    match format {
        OutputFormat::Markdown => format_md(bench_names, short_bench_names, results),
    }
}
