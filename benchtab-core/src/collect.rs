//! Result Collection
//!
//! Walks a criterion output folder and aggregates point estimates.
//!
//! Criterion stores one estimate file per benchmark and parameter:
//!
//! ```text
//! <folder>/<bench name...>/<param>/new/estimates.json
//! ```
//!
//! The bench name is everything between `<folder>` and `<param>` (it may
//! contain `/` for grouped benchmarks), the param is the directory two
//! levels above the file.

use crate::error::ResultsError;
use crate::estimate::read_estimate;
use crate::table::{ResultsTable, RunWindow, WindowTracker};
use globset::GlobBuilder;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Path components between the bench name and the estimate file (`<param>/new/estimates.json`)
const COMPONENTS_BELOW_NAME: usize = 3;

/// Outcome of a collection pass
#[derive(Debug, Clone, Default)]
pub struct BenchResults {
    /// Point estimates of the accepted files
    pub table: ResultsTable,
    /// Modification time span of the accepted files (`None` if nothing was accepted)
    pub window: Option<RunWindow>,
}

/// Find every file under `folder` whose folder-relative path matches `glob`
///
/// `*` stays within one path component, `**` spans any number of them.
/// Paths are returned in a deterministic (file-name sorted, depth-first) order.
/// A missing `folder` holds no files.
pub fn find_estimate_files(folder: &Path, glob: &str) -> Result<Vec<PathBuf>, ResultsError> {
    let matcher = GlobBuilder::new(glob)
        .literal_separator(true)
        .build()?
        .compile_matcher();

    if !folder.is_dir() {
        debug!(folder = %folder.display(), "results folder not found");
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in walkdir::WalkDir::new(folder)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(folder) else {
            continue;
        };
        if matcher.is_match(relative) {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

/// Benchmark name of an estimate file: its folder-relative path minus the last three components
///
/// Returns `None` when the path is too shallow to carry a name.
pub fn bench_name_of(folder: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(folder).ok()?;
    let name_path = relative.ancestors().nth(COMPONENTS_BELOW_NAME)?;

    let components: Vec<_> = name_path
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect();
    if components.is_empty() {
        return None;
    }
    Some(components.join("/"))
}

/// Raw parameter segment of an estimate file (the directory two levels above it)
pub fn param_segment(path: &Path) -> Option<&str> {
    path.parent()?.parent()?.file_name()?.to_str()
}

/// Parse the parameter of an estimate file
///
/// The segment must consist of ASCII digits only and fit in a `u64`.
pub fn parse_param(path: &Path) -> Result<u64, ResultsError> {
    param_segment(path)
        .filter(|s| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| ResultsError::NonIntegerParameter {
            path: path.to_path_buf(),
        })
}

/// Collect the point estimates of `bench_names` found under `folder`
///
/// Files belonging to other benchmarks are skipped. Any malformed parameter,
/// unreadable estimate, or duplicate `(param, name)` pair aborts the pass.
#[tracing::instrument(level = "debug", skip_all, fields(folder = %folder.display(), glob = %glob))]
pub fn parse_benches_results<S: AsRef<str>>(
    folder: &Path,
    glob: &str,
    bench_names: &[S],
) -> Result<BenchResults, ResultsError> {
    let mut table = ResultsTable::new();
    let mut tracker = WindowTracker::default();

    let files = find_estimate_files(folder, glob)?;
    let matched = files.len();

    for path in files {
        let Some(name) = bench_name_of(folder, &path) else {
            debug!(path = %path.display(), "skipping file without a bench name");
            continue;
        };
        if !bench_names.iter().any(|n| n.as_ref() == name) {
            debug!(bench = %name, "skipping unselected bench");
            continue;
        }

        let param = parse_param(&path)?;

        let modified = std::fs::metadata(&path)
            .and_then(|m| m.modified())
            .map_err(|e| ResultsError::io(&path, e))?;
        tracker.observe(modified);

        let estimate = read_estimate(&path)?;
        debug!(bench = %name, param, estimate_ns = estimate, "accepted estimate");

        table.insert(param, name, estimate)?;
    }

    info!(
        matched,
        accepted = table.len(),
        "collected criterion estimates"
    );

    Ok(BenchResults {
        table,
        window: tracker.finish(),
    })
}

/// Every bench name under `folder` with its raw parameter segments
///
/// No selection, parameter validation, or estimate reading happens here.
pub fn list_benches(
    folder: &Path,
    glob: &str,
) -> Result<BTreeMap<String, BTreeSet<String>>, ResultsError> {
    let mut benches: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

    for path in find_estimate_files(folder, glob)? {
        let Some(name) = bench_name_of(folder, &path) else {
            continue;
        };
        let params = benches.entry(name).or_default();
        if let Some(param) = param_segment(&path) {
            params.insert(param.to_string());
        }
    }

    Ok(benches)
}
