use std::path::Path;

use serde::de::DeserializeOwned;

use crate::ConfigError;

/// Load a JSON or YAML input file into `T`.
///
/// Files ending in `.yaml` or `.yml` are parsed as YAML; anything else is
/// parsed as JSON.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read or parsed.
pub fn load_input_file<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::InputFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_input(&content, is_yaml(path))
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}

fn parse_input<T: DeserializeOwned>(content: &str, yaml: bool) -> Result<T, ConfigError> {
    if yaml {
        serde_yaml::from_str(content).map_err(|e| ConfigError::InputFileParse(e.to_string()))
    } else {
        serde_json::from_str(content).map_err(|e| ConfigError::InputFileParse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScoringConfig;

    #[test]
    fn yaml_extension_detected_case_insensitively() {
        assert!(is_yaml(Path::new("run.yaml")));
        assert!(is_yaml(Path::new("run.YML")));
        assert!(!is_yaml(Path::new("run.json")));
        assert!(!is_yaml(Path::new("run")));
    }

    #[test]
    fn parse_json_with_partial_fields_uses_defaults() {
        let cfg: ScoringConfig = parse_input(r#"{"min_ads": 10}"#, false).unwrap();
        assert_eq!(cfg.min_ads, 10);
        assert_eq!(cfg.min_reddit, ScoringConfig::DEFAULT_MIN_REDDIT);
    }

    #[test]
    fn parse_yaml_input() {
        let cfg: ScoringConfig = parse_input("min_reddit: 20\nmax_age_days: 45\n", true).unwrap();
        assert_eq!(cfg.min_reddit, 20);
        assert!((cfg.max_age_days - 45.0).abs() < f64::EPSILON);
    }

    #[test]
    fn parse_malformed_input_is_parse_error() {
        let result: Result<ScoringConfig, _> = parse_input("{not json", false);
        assert!(matches!(result, Err(ConfigError::InputFileParse(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let result: Result<ScoringConfig, _> =
            load_input_file(Path::new("/nonexistent/radar/input.json"));
        assert!(
            matches!(result, Err(ConfigError::InputFileIo { ref path, .. }) if path.contains("input.json")),
            "expected InputFileIo, got: {result:?}"
        );
    }
}
