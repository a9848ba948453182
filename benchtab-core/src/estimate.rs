//! Criterion Estimate Reader
//!
//! Extracts the mean point estimate from an `estimates.json` file:
//!
//! ```text
//! {"mean": {"point_estimate": 1234.5, "confidence_interval": {...}, ...}, ...}
//! ```

use crate::error::ResultsError;
use serde_json::Value;
use std::path::Path;

/// Read the mean point estimate (in nanoseconds) from a criterion `estimates.json`
///
/// Integer estimates are widened to `f64`. Any other value type at
/// `mean.point_estimate`, or a missing key, is rejected.
pub fn read_estimate(path: &Path) -> Result<f64, ResultsError> {
    let content = std::fs::read_to_string(path).map_err(|e| ResultsError::io(path, e))?;
    let document: Value = serde_json::from_str(&content).map_err(|source| ResultsError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    point_estimate(&document).ok_or_else(|| ResultsError::MissingEstimate {
        path: path.to_path_buf(),
    })
}

fn point_estimate(document: &Value) -> Option<f64> {
    // `as_f64` is `None` for anything that is not a JSON number
    document.get("mean")?.get("point_estimate")?.as_f64()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_estimates(dir: &TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("estimates.json");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_reads_float_estimate() {
        let dir = TempDir::new().unwrap();
        let path = write_estimates(
            &dir,
            r#"{"mean": {"point_estimate": 2126000.5, "standard_error": 12.0},
                "median": {"point_estimate": 2125000.0}}"#,
        );
        assert_eq!(read_estimate(&path).unwrap(), 2126000.5);
    }

    #[test]
    fn test_reads_integer_estimate() {
        let dir = TempDir::new().unwrap();
        let path = write_estimates(&dir, r#"{"mean": {"point_estimate": 42}}"#);
        assert_eq!(read_estimate(&path).unwrap(), 42.0);
    }

    #[test]
    fn test_rejects_missing_key() {
        let dir = TempDir::new().unwrap();
        let path = write_estimates(&dir, r#"{"median": {"point_estimate": 1.0}}"#);
        assert!(matches!(
            read_estimate(&path),
            Err(ResultsError::MissingEstimate { .. })
        ));

        let path = write_estimates(&dir, r#"{"mean": {"standard_error": 1.0}}"#);
        assert!(matches!(
            read_estimate(&path),
            Err(ResultsError::MissingEstimate { .. })
        ));
    }

    #[test]
    fn test_rejects_non_numeric() {
        let dir = TempDir::new().unwrap();
        for value in [r#""12.5""#, "true", "null", "[1.0]"] {
            let path = write_estimates(&dir, &format!(r#"{{"mean": {{"point_estimate": {value}}}}}"#));
            assert!(
                matches!(read_estimate(&path), Err(ResultsError::MissingEstimate { .. })),
                "{value} should be rejected"
            );
        }
    }

    #[test]
    fn test_rejects_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = write_estimates(&dir, "{not json");
        assert!(matches!(read_estimate(&path), Err(ResultsError::Json { .. })));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = read_estimate(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ResultsError::Io { .. }));
    }
}
