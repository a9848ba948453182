//! Configuration loading from benchtab.toml
//!
//! Benchtab configuration can be specified in a `benchtab.toml` file in the project root.
//! The configuration is automatically discovered by walking up from the current directory.
//! Command-line flags override every value.

use anyhow::Context;
use benchtab_core::{DEFAULT_CRITERION_GLOB, DEFAULT_CRITERION_TARGET_FOLDER};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the configuration file looked up by [`BenchtabConfig::discover`]
pub const CONFIG_FILE_NAME: &str = "benchtab.toml";

/// Benchmarks tabulated when neither the command line nor the config names any
pub const DEFAULT_BENCH_NAMES: [&str; 2] = [
    "ed25519-poly/pt-smallDm-hornerSmall",
    "ed25519-poly/pt-ecfftDm-extend",
];

/// Benchtab configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BenchtabConfig {
    /// Where criterion results are read from
    #[serde(default)]
    pub criterion: CriterionConfig,
    /// Which benchmarks become table columns
    #[serde(default)]
    pub benches: BenchesConfig,
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Criterion result location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriterionConfig {
    /// Criterion output folder (e.g., "target/criterion")
    #[serde(default = "default_target_folder")]
    pub target_folder: String,
    /// Glob selecting estimate files, relative to `target_folder`
    #[serde(default = "default_glob")]
    pub glob: String,
}

impl Default for CriterionConfig {
    fn default() -> Self {
        Self {
            target_folder: default_target_folder(),
            glob: default_glob(),
        }
    }
}

fn default_target_folder() -> String {
    DEFAULT_CRITERION_TARGET_FOLDER.to_string()
}
fn default_glob() -> String {
    DEFAULT_CRITERION_GLOB.to_string()
}

/// Benchmark selection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchesConfig {
    /// Benchmark names, in column order
    #[serde(default = "default_bench_names")]
    pub names: Vec<String>,
    /// Column labels, one per name (empty = use the names)
    #[serde(default)]
    pub short_names: Vec<String>,
}

impl Default for BenchesConfig {
    fn default() -> Self {
        Self {
            names: default_bench_names(),
            short_names: Vec::new(),
        }
    }
}

fn default_bench_names() -> Vec<String> {
    DEFAULT_BENCH_NAMES.iter().map(|s| s.to_string()).collect()
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output format: "md"
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

fn default_format() -> String {
    "md".to_string()
}

impl BenchtabConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: Self =
            toml::from_str(&content).with_context(|| format!("invalid {}", path.display()))?;
        Ok(config)
    }

    /// Discover and load configuration by walking up from `start`
    ///
    /// A config file that exists but fails to load is an error, not a miss.
    pub fn discover_from(start: &Path) -> anyhow::Result<Option<Self>> {
        for dir in start.ancestors() {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.is_file() {
                tracing::debug!(path = %config_path.display(), "loading config");
                return Self::load(&config_path).map(Some);
            }
        }
        Ok(None)
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# Benchtab Configuration

[criterion]
# Criterion output folder
target_folder = "target/criterion"
# Estimate files to read, relative to target_folder
glob = "**/new/estimates.json"

[benches]
# Benchmarks to tabulate, in column order
names = [
    "ed25519-poly/pt-smallDm-hornerSmall",
    "ed25519-poly/pt-ecfftDm-extend",
]
# Column labels, one per name (empty = use the names)
short_names = []

[output]
# Output format: md
format = "md"
"#
        .to_string()
    }
}
