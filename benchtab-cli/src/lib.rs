#![warn(missing_docs)]
//! Benchtab CLI Library
//!
//! Command-line front end: reads criterion results for a configured list of
//! benchmarks and prints them as a comparison table.
//!
//! # Example
//!
//! ```text
//! $ benchtab --bench-names "poly/horner,poly/ecfft" --short-bench-names "horner,ecfft"
//! earliest bench: 2024-05-01T10:00:00.000000
//! latest bench:   2024-05-01T10:42:13.512000
//!
//! |     | horner  | ecfft   |
//! |-----|---------|---------|
//! | 8   | 10.0 ns | 2.13 ms |
//! ```

mod config;
mod settings;

pub use config::*;
pub use settings::{ResultSource, SettingsError, TableSettings, split_names};

use anyhow::Context;
use benchtab_core::{ResultsError, RunWindow, list_benches, parse_benches_results};
use benchtab_report::render_table;
use chrono::{DateTime, Local};
use clap::{Parser, Subcommand};
use regex::Regex;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Benchtab CLI arguments
#[derive(Parser, Debug)]
#[command(name = "benchtab")]
#[command(
    author,
    version,
    about = "Benchtab - tabulate criterion benchmark estimates"
)]
pub struct Cli {
    /// Optional subcommand (Table, List, Init); defaults to Table
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format: md
    #[arg(long, global = true)]
    pub format: Option<String>,

    /// Criterion output folder [default: target/criterion]
    #[arg(long, global = true)]
    pub criterion_target_folder: Option<PathBuf>,

    /// Glob selecting estimate files inside the criterion folder [default: **/new/estimates.json]
    #[arg(long, global = true)]
    pub criterion_glob: Option<String>,

    /// Comma-separated list of bench names in the order they will appear
    #[arg(long, global = true)]
    pub bench_names: Option<String>,

    /// Comma-separated short names for benches used for columns;
    /// if empty, use same as --bench-names
    #[arg(long, global = true)]
    pub short_bench_names: Option<String>,

    /// Configuration file (discovered from the current directory if not specified)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Write the table to this file instead of stdout
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the comparison table (default)
    Table,
    /// List benchmarks found in the criterion folder
    List {
        /// Only show bench names matching this regex
        #[arg(default_value = ".*")]
        filter: String,
    },
    /// Write a default benchtab.toml in the current directory
    Init,
}

/// Collected results and their rendering
#[derive(Debug, Clone)]
pub struct RenderedTable {
    /// Modification time span of the files behind the table
    pub window: Option<RunWindow>,
    /// Rendered table text
    pub table: String,
}

/// Run the Benchtab CLI with the process arguments.
///
/// # Returns
/// Returns `Ok(())` on success, or an error if something goes wrong.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli)
}

/// Run the Benchtab CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    init_logging(cli.verbose);
    run_in_dir(&cli, &std::env::current_dir()?)
}

/// Dispatch a command as if started from `dir`
pub fn run_in_dir(cli: &Cli, dir: &Path) -> anyhow::Result<()> {
    match cli.command {
        // Runs before any config is read, so a broken one cannot block it
        Some(Commands::Init) => {
            let path = init_config(dir)?;
            println!("Wrote {}", path.display());
            Ok(())
        }
        Some(Commands::List { ref filter }) => {
            let config = load_config(cli, dir)?;
            let source = ResultSource::resolve(cli, &config);
            print!("{}", list_benchmarks(&source, filter)?);
            Ok(())
        }
        Some(Commands::Table) | None => {
            let config = load_config(cli, dir)?;
            print_table(cli, &config)
        }
    }
}

/// Explicit `--config`, else the nearest `benchtab.toml` above `dir`, else defaults
fn load_config(cli: &Cli, dir: &Path) -> anyhow::Result<BenchtabConfig> {
    match &cli.config {
        Some(path) => BenchtabConfig::load(path),
        None => Ok(BenchtabConfig::discover_from(dir)?.unwrap_or_default()),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        "benchtab=debug"
    } else {
        "benchtab=info"
    };
    // stdout carries the table
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}

/// Collect the configured benchmarks and render them
pub fn render_results(settings: &TableSettings) -> Result<RenderedTable, ResultsError> {
    let results = parse_benches_results(
        &settings.source.folder,
        &settings.source.glob,
        &settings.bench_names,
    )?;

    let table = render_table(
        settings.format,
        &settings.bench_names,
        &settings.short_bench_names,
        &results.table,
    );

    Ok(RenderedTable {
        window: results.window,
        table,
    })
}

fn print_table(cli: &Cli, config: &BenchtabConfig) -> anyhow::Result<()> {
    // Validate before reading any result file
    let settings = TableSettings::resolve(cli, config)?;
    let rendered = render_results(&settings)?;

    match &rendered.window {
        Some(window) => print!("{}", format_run_window(window)),
        None => warn!(
            folder = %settings.source.folder.display(),
            glob = %settings.source.glob,
            "no estimates found for the selected benches"
        ),
    }

    match cli.output {
        Some(ref path) => {
            write_table(&rendered.table, path)?;
            println!("Report written to: {}", path.display());
        }
        None => println!("{}", rendered.table),
    }

    Ok(())
}

/// Write a rendered table to `path`, replacing any previous content
pub fn write_table(table: &str, path: &Path) -> anyhow::Result<()> {
    let mut file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    file.write_all(table.as_bytes())
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Format the run window header, with a warning if the runs are far apart
///
/// ```text
/// earliest bench: 2024-05-01T10:00:00.000000
/// latest bench:   2024-05-03T12:30:00.000000
///
/// WARNING: The latest bench was made more than 1 day after the earliest bench
///          Are you sure they have been made with the same software version?
///
/// ```
pub fn format_run_window(window: &RunWindow) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "earliest bench: {}\n",
        format_timestamp(&window.earliest)
    ));
    output.push_str(&format!(
        "latest bench:   {}\n",
        format_timestamp(&window.latest)
    ));
    output.push('\n');

    if window.is_stale() {
        output.push_str(
            "WARNING: The latest bench was made more than 1 day after the earliest bench\n",
        );
        output.push_str(
            "         Are you sure they have been made with the same software version?\n",
        );
        output.push('\n');
    }

    output
}

/// ISO 8601 local time with microseconds, without offset
///
/// The six fraction digits are always printed, `.000000` included.
pub fn format_timestamp(timestamp: &DateTime<Local>) -> String {
    timestamp.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

/// List the benchmarks under `source` whose name matches the `filter` regex
///
/// Numeric params are listed in numeric order, anything else after them.
pub fn list_benchmarks(source: &ResultSource, filter: &str) -> anyhow::Result<String> {
    let filter_re =
        Regex::new(filter).with_context(|| format!("invalid filter pattern '{}'", filter))?;

    let benches = list_benches(&source.folder, &source.glob)?;

    let mut output = format!("Criterion results in {}:\n", source.folder.display());

    let mut total = 0;
    for (name, params) in benches.iter().filter(|(name, _)| filter_re.is_match(name)) {
        let mut params: Vec<&String> = params.iter().collect();
        params.sort_by_key(|p| {
            let numeric = p.parse::<u64>().ok();
            (numeric.is_none(), numeric.unwrap_or(0), p.to_string())
        });
        let params: Vec<&str> = params.into_iter().map(String::as_str).collect();

        output.push_str(&format!("├── {} [{}]\n", name, params.join(", ")));
        total += 1;
    }

    output.push_str(&format!("{} benchmarks found.\n", total));

    Ok(output)
}

/// Write a default `benchtab.toml` into `dir`, refusing to overwrite one
pub fn init_config(dir: &Path) -> anyhow::Result<PathBuf> {
    let path = dir.join(CONFIG_FILE_NAME);
    if path.exists() {
        return Err(anyhow::anyhow!(
            "{} already exists, not overwriting",
            path.display()
        ));
    }

    std::fs::write(&path, BenchtabConfig::default_toml())
        .with_context(|| format!("failed to write {}", path.display()))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone};
    use tempfile::TempDir;

    fn write_estimate(root: &Path, bench: &str, param: &str, estimate: f64) {
        let dir = root.join(bench).join(param).join("new");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("estimates.json"),
            format!(r#"{{"mean": {{"point_estimate": {estimate}}}}}"#),
        )
        .unwrap();
    }

    fn source(folder: &Path) -> ResultSource {
        ResultSource {
            folder: folder.to_path_buf(),
            glob: "**/new/estimates.json".to_string(),
        }
    }

    fn window(span: TimeDelta) -> RunWindow {
        let earliest = Local.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        RunWindow {
            earliest,
            latest: earliest + span,
        }
    }

    #[test]
    fn test_format_timestamp() {
        let ts = Local.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap()
            + TimeDelta::milliseconds(512);
        assert_eq!(format_timestamp(&ts), "2024-05-01T10:00:00.512000");

        let whole = Local.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        assert_eq!(format_timestamp(&whole), "2024-05-01T10:00:00.000000");
    }

    #[test]
    fn test_run_window_without_warning() {
        let out = format_run_window(&window(TimeDelta::hours(3)));
        assert_eq!(
            out,
            "earliest bench: 2024-05-01T10:00:00.000000\n\
             latest bench:   2024-05-01T13:00:00.000000\n\n"
        );
    }

    #[test]
    fn test_run_window_with_warning() {
        let out = format_run_window(&window(TimeDelta::days(2)));
        assert!(out.starts_with("earliest bench: 2024-05-01T10:00:00.000000\n"));
        assert!(out.contains(
            "\nWARNING: The latest bench was made more than 1 day after the earliest bench\n"
        ));
        assert!(out.ends_with("same software version?\n\n"));
    }

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["benchtab", "list", "^poly/", "--verbose"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Some(Commands::List { ref filter }) if filter == "^poly/"));

        let cli = Cli::try_parse_from(["benchtab", "--format", "md"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.format.as_deref(), Some("md"));
    }

    #[test]
    fn test_list_benchmarks_filter_and_param_order() {
        let dir = TempDir::new().unwrap();
        for param in ["1024", "warmup", "8"] {
            write_estimate(dir.path(), "poly/horner", param, 1.0);
        }
        write_estimate(dir.path(), "fib", "3", 1.0);

        let out = list_benchmarks(&source(dir.path()), "^poly/").unwrap();
        assert_eq!(
            out,
            format!(
                "Criterion results in {}:\n├── poly/horner [8, 1024, warmup]\n1 benchmarks found.\n",
                dir.path().display()
            )
        );

        let all = list_benchmarks(&source(dir.path()), ".*").unwrap();
        assert!(all.contains("├── fib [3]\n"));
        assert!(all.ends_with("2 benchmarks found.\n"));
    }

    #[test]
    fn test_list_benchmarks_invalid_filter() {
        let dir = TempDir::new().unwrap();
        let err = list_benchmarks(&source(dir.path()), "(").unwrap_err();
        assert!(err.to_string().contains("invalid filter pattern '('"));
    }

    #[test]
    fn test_list_benchmarks_missing_folder() {
        let dir = TempDir::new().unwrap();
        let out = list_benchmarks(&source(&dir.path().join("absent")), ".*").unwrap();
        assert!(out.ends_with("0 benchmarks found.\n"));
    }

    #[test]
    fn test_init_config_writes_default() {
        let dir = TempDir::new().unwrap();
        let path = init_config(dir.path()).unwrap();
        assert_eq!(path, dir.path().join(CONFIG_FILE_NAME));

        let loaded = BenchtabConfig::load(&path).unwrap();
        assert_eq!(loaded.benches.names, BenchtabConfig::default().benches.names);
    }

    #[test]
    fn test_init_config_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "not = [valid").unwrap();

        let err = init_config(dir.path()).unwrap_err();
        assert!(err.to_string().contains("already exists, not overwriting"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "not = [valid");
    }

    #[test]
    fn test_init_ignores_broken_config() {
        let dir = TempDir::new().unwrap();
        let broken = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&broken, "not = [valid").unwrap();
        let child = dir.path().join("project");
        std::fs::create_dir(&child).unwrap();

        // Discovered from a parent
        let cli = Cli::try_parse_from(["benchtab", "init"]).unwrap();
        run_in_dir(&cli, &child).unwrap();
        assert!(child.join(CONFIG_FILE_NAME).is_file());

        // Given explicitly
        let other = dir.path().join("other");
        std::fs::create_dir(&other).unwrap();
        let cli = Cli::try_parse_from(["benchtab", "init", "--config", broken.to_str().unwrap()])
            .unwrap();
        run_in_dir(&cli, &other).unwrap();
        assert!(other.join(CONFIG_FILE_NAME).is_file());

        // Other commands still read it
        let cli = Cli::try_parse_from(["benchtab", "list"]).unwrap();
        let err = run_in_dir(&cli, dir.path()).unwrap_err();
        assert!(err.to_string().starts_with("invalid "));
    }

    #[test]
    fn test_write_table_replaces_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("table.md");
        std::fs::write(&path, "old content that is longer than the table").unwrap();

        write_table("| x |\n", &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "| x |\n");
    }

    #[test]
    fn test_table_written_to_output_file() {
        let dir = TempDir::new().unwrap();
        let results = dir.path().join("criterion");
        write_estimate(&results, "fib", "3", 5.0);
        let output = dir.path().join("out.md");

        let cli = Cli::try_parse_from([
            "benchtab",
            "--criterion-target-folder",
            results.to_str().unwrap(),
            "--bench-names",
            "fib",
            "-o",
            output.to_str().unwrap(),
        ])
        .unwrap();
        run_in_dir(&cli, dir.path()).unwrap();

        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            "|     | fib     |\n|-----|---------|\n| 3   | 5.00 ns |\n"
        );
    }
}
