//! Render a comparison table from hand-built results.
//!
//! Run with: `cargo run -p benchtab --example markdown_table`

use benchtab::{ResultsTable, format_md};

fn main() -> Result<(), benchtab::ResultsError> {
    let names = ["poly/horner", "poly/ecfft", "poly/naive"];
    let labels = ["horner", "ecfft", "naive"];

    let mut table = ResultsTable::new();
    for (i, param) in [8u64, 64, 512, 4096].into_iter().enumerate() {
        let n = param as f64;
        table.insert(param, "poly/horner", 12.0 * n)?;
        table.insert(param, "poly/ecfft", 900.0 * n * n.log2())?;
        // The naive variant was only measured on small inputs
        if i < 2 {
            table.insert(param, "poly/naive", 3.5 * n * n)?;
        }
    }

    print!("{}", format_md(&names, &labels, &table));
    Ok(())
}
