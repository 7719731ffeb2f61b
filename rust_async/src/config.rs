//! Service configuration.
//!
//! Loaded from an optional TOML file; every section falls back to defaults.
//!
//! ```toml
//! [server]
//! listen_addr = "0.0.0.0:8080"
//!
//! [estimator]
//! default_iterations = 1000000
//! max_iterations = 100000000
//! workers = 8
//! seed = 42
//! ```

use pi_estimator::{default_workers, Estimator, MAX_ITERATIONS};
use serde::Deserialize;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_ITERATIONS: u64 = 1_000_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub server: ServerConfig,
    pub estimator: EstimatorConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the HTTP API binds to.
    pub listen_addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Samples drawn when a request does not say.
    pub default_iterations: u64,
    /// Largest sample count a request may ask for.
    pub max_iterations: u64,
    /// Parallel worker count. Defaults to available parallelism.
    pub workers: Option<usize>,
    /// Base seed; makes every run reproducible. Entropy-seeded when unset.
    pub seed: Option<u64>,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            default_iterations: DEFAULT_ITERATIONS,
            max_iterations: MAX_ITERATIONS,
            workers: None,
            seed: None,
        }
    }
}

impl ServiceConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: ServiceConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let estimator = &self.estimator;

        if estimator.max_iterations == 0 || estimator.max_iterations > MAX_ITERATIONS {
            return Err(ConfigError::Invalid(format!(
                "max_iterations must be between 1 and {MAX_ITERATIONS}, got {}",
                estimator.max_iterations
            )));
        }
        if estimator.default_iterations == 0
            || estimator.default_iterations > estimator.max_iterations
        {
            return Err(ConfigError::Invalid(format!(
                "default_iterations must be between 1 and {}, got {}",
                estimator.max_iterations, estimator.default_iterations
            )));
        }
        if estimator.workers == Some(0) {
            return Err(ConfigError::Invalid(
                "workers must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    pub fn build_estimator(&self) -> Estimator {
        Estimator::new()
            .with_workers(self.estimator.workers.unwrap_or_else(default_workers))
            .with_seed(self.estimator.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.server.listen_addr.port(), 8080);
        assert_eq!(config.estimator.default_iterations, 1_000_000);
        assert_eq!(config.estimator.max_iterations, 100_000_000);
        assert!(config.validate().is_ok());
        assert_eq!(config.build_estimator().workers(), default_workers());
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = ServiceConfig::from_toml_str("").unwrap();
        assert_eq!(config, ServiceConfig::default());
    }

    #[test]
    fn test_partial_sections() {
        let config = ServiceConfig::from_toml_str(
            r#"
            [estimator]
            workers = 3
            seed = 7
            "#,
        )
        .unwrap();

        assert_eq!(config.estimator.workers, Some(3));
        assert_eq!(config.estimator.default_iterations, DEFAULT_ITERATIONS);

        let estimator = config.build_estimator();
        assert_eq!(estimator.workers(), 3);
        assert_eq!(estimator.seed(), Some(7));
    }

    #[test]
    fn test_rejects_invalid_values() {
        let too_big = format!("[estimator]\nmax_iterations = {}", MAX_ITERATIONS + 1);
        assert!(matches!(
            ServiceConfig::from_toml_str(&too_big),
            Err(ConfigError::Invalid(_))
        ));

        let default_over_max = "[estimator]\nmax_iterations = 10\ndefault_iterations = 11";
        assert!(matches!(
            ServiceConfig::from_toml_str(default_over_max),
            Err(ConfigError::Invalid(_))
        ));

        assert!(matches!(
            ServiceConfig::from_toml_str("[estimator]\nworkers = 0"),
            Err(ConfigError::Invalid(_))
        ));

        assert!(matches!(
            ServiceConfig::from_toml_str("[server]\nlisten_addr = \"nope\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nlisten_addr = \"127.0.0.1:9100\"").unwrap();

        let config = ServiceConfig::load(file.path()).unwrap();
        assert_eq!(config.server.listen_addr, "127.0.0.1:9100".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn test_load_missing_file() {
        let err = ServiceConfig::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
