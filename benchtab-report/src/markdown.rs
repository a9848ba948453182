//! Markdown Table Output
//!
//! One row per benchmark parameter, one column per benchmark:
//!
//! ```text
//! |     | horner  | ecfft   |
//! |-----|---------|---------|
//! | 8   | 10.0 ns | 2.13 ms |
//! | 16  | 20.5 ns |         |
//! ```

use crate::duration::format_ns;
use benchtab_core::ResultsTable;

/// Narrowest column GitHub renders as a table column
const MIN_COLUMN_WIDTH: usize = 3;

/// Render `results` as a Markdown table
///
/// Columns follow the order of `bench_names` and are labeled with the matching
/// entry of `short_bench_names`. Benchmarks missing at a parameter get a blank cell.
pub fn format_md<N, L>(bench_names: &[N], short_bench_names: &[L], results: &ResultsTable) -> String
where
    N: AsRef<str>,
    L: AsRef<str>,
{
    let params: Vec<u64> = results.params().collect();

    // columns[i] = (bench name, label, width)
    let columns: Vec<(&str, &str, usize)> = bench_names
        .iter()
        .zip(short_bench_names)
        .map(|(name, label)| {
            let (name, label) = (name.as_ref(), label.as_ref());
            let widest_value = params
                .iter()
                .filter_map(|&param| results.get(param, name))
                .map(|estimate| format_ns(estimate).chars().count())
                .max()
                .unwrap_or(0);
            let width = widest_value
                .max(label.chars().count())
                .max(MIN_COLUMN_WIDTH);
            (name, label, width)
        })
        .collect();

    let param_width = params
        .iter()
        .map(|param| param.to_string().len())
        .max()
        .unwrap_or(0)
        .max(MIN_COLUMN_WIDTH);

    let mut output = String::new();

    // Header
    let labels: Vec<String> = columns
        .iter()
        .map(|(_, label, width)| format!("{:<width$}", label, width = *width))
        .collect();
    push_row(&mut output, "", param_width, &labels);

    // Separator
    let dashes: Vec<String> = columns.iter().map(|(_, _, width)| "-".repeat(*width)).collect();
    output.push_str(&format!(
        "|-{}-|-{}-|\n",
        "-".repeat(param_width),
        dashes.join("-|-")
    ));

    // Data rows
    for param in params {
        let cells: Vec<String> = columns
            .iter()
            .map(|(name, _, width)| {
                let cell = results.get(param, name).map(format_ns).unwrap_or_default();
                format!("{:<width$}", cell, width = *width)
            })
            .collect();
        push_row(&mut output, &param.to_string(), param_width, &cells);
    }

    output
}

fn push_row(output: &mut String, label: &str, label_width: usize, cells: &[String]) {
    output.push_str(&format!(
        "| {:<width$} | {} |\n",
        label,
        cells.join(" | "),
        width = label_width
    ));
}
