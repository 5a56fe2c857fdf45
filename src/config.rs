//! Engine tunables, loadable from TOML.
//!
//! Every threshold the engine consults lives here with its documented
//! default, so deployments can tune matching strictness and anomaly
//! sensitivity without rebuilding.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::symbol::DEFAULT_SIMILARITY_THRESHOLD;

/// Result type for config operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Angular-similarity decision threshold for semantic `is_like`.
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f32,
    /// Softmax probability above which a dosha counts as elevated.
    #[serde(default = "default_anomaly_threshold")]
    pub anomaly_threshold: f64,
    /// Maximum number of symptoms shown per collection round.
    #[serde(default = "default_max_symptom_prompts")]
    pub max_symptom_prompts: usize,
}

fn default_similarity_threshold() -> f32 {
    DEFAULT_SIMILARITY_THRESHOLD
}

fn default_anomaly_threshold() -> f64 {
    0.5
}

fn default_max_symptom_prompts() -> usize {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            similarity_threshold: default_similarity_threshold(),
            anomaly_threshold: default_anomaly_threshold(),
            max_symptom_prompts: default_max_symptom_prompts(),
        }
    }
}

impl Config {
    /// Read a config from a TOML file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = Config::default();
        assert_eq!(config.similarity_threshold, 0.9);
        assert_eq!(config.anomaly_threshold, 0.5);
        assert_eq!(config.max_symptom_prompts, 10);
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let config: Config = toml::from_str("anomaly_threshold = 0.7").unwrap();
        assert_eq!(config.anomaly_threshold, 0.7);
        assert_eq!(config.similarity_threshold, 0.9);
        assert_eq!(config.max_symptom_prompts, 10);
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("vaidya.toml");
        std::fs::write(&path, "similarity_threshold = 0.8\nmax_symptom_prompts = 5\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.similarity_threshold, 0.8);
        assert_eq!(config.max_symptom_prompts, 5);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = Config::load(Path::new("/nonexistent/vaidya.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn bad_toml_is_a_parse_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("vaidya.toml");
        std::fs::write(&path, "similarity_threshold = 'high'").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
