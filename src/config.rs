use crate::error::{Result, StarcheckError};
use crate::types::config::AnalysisConfig;
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "starcheck.toml";

/// Loads the analysis configuration.
///
/// An explicit path must exist; otherwise `starcheck.toml` in the current
/// directory is used when present, and the built-in defaults when not.
/// The parsed config is validated before use — an invalid rubric is fatal,
/// a missing file is not.
pub fn load_config(explicit: Option<&Path>) -> Result<AnalysisConfig> {
    let config = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(StarcheckError::ConfigNotFound(path.display().to_string()));
            }
            read_config(path)?
        }
        None => {
            let default = Path::new(DEFAULT_CONFIG_FILE);
            if default.exists() {
                read_config(default)?
            } else {
                AnalysisConfig::default()
            }
        }
    };
    config.validate()?;
    Ok(config)
}

fn read_config(path: &Path) -> Result<AnalysisConfig> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| StarcheckError::ConfigParse(format!("{}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn explicit_missing_path_is_an_error() {
        let err = load_config(Some(Path::new("/nonexistent/starcheck.toml")))
            .expect_err("missing explicit config should fail");
        assert!(matches!(err, StarcheckError::ConfigNotFound(_)));
    }

    #[test]
    fn override_file_is_applied_over_defaults() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join("starcheck.toml");
        fs::write(
            &path,
            r#"
[cluster]
max_clusters = 4

[verdict]
confirmed = 120
high = 80
medium = 40
"#,
        )
        .expect("config should write");

        let config = load_config(Some(&path)).expect("config should load");
        assert_eq!(config.cluster.max_clusters, 4);
        assert_eq!(config.verdict.confirmed, 120);
        // untouched sections keep their defaults
        assert_eq!(config.outliers.z_threshold, 2.0);
    }

    #[test]
    fn invalid_rubric_is_fatal() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join("starcheck.toml");
        fs::write(
            &path,
            r#"
[cluster]
max_clusters = 0
"#,
        )
        .expect("config should write");

        let err = load_config(Some(&path)).expect_err("zero cluster cap must fail");
        assert!(matches!(err, StarcheckError::ConfigInvalid(_)));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join("starcheck.toml");
        fs::write(&path, "cluster = [nonsense").expect("config should write");

        let err = load_config(Some(&path)).expect_err("garbage must fail");
        assert!(matches!(err, StarcheckError::ConfigParse(_)));
    }
}
