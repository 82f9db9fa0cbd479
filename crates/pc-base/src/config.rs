//! Console configuration: defaults, then YAML file, then environment, then CLI.
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    CONFIG_FILE, DEFAULT_BASE_URL, DEFAULT_LOG_FILTER, ENV_BASE_URL, ENV_TIMEOUT_SECS, REQUEST_TIMEOUT_SECS, STORE_DIR,
};
use crate::theme::DEFAULT_THEME;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Root URL of the prompt service
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// tracing filter used when RUST_LOG is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    /// Theme ID from the embedded themes table
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    REQUEST_TIMEOUT_SECS
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

fn default_theme() -> String {
    DEFAULT_THEME.to_string()
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            log_filter: default_log_filter(),
            theme: default_theme(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    /// Config file exists but could not be read
    Io { path: PathBuf, message: String },
    /// Config file is not valid YAML for ConsoleConfig
    Parse { path: PathBuf, message: String },
    /// A value from file, env or CLI failed validation
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, message } => write!(f, "Cannot read {}: {}", path.display(), message),
            ConfigError::Parse { path, message } => write!(f, "Invalid config {}: {}", path.display(), message),
            ConfigError::Invalid(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Default config location inside the store directory
pub fn default_config_path() -> PathBuf {
    PathBuf::from(STORE_DIR).join(CONFIG_FILE)
}

impl ConsoleConfig {
    /// Load from a YAML file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io { path: path.to_path_buf(), message: e.to_string() })?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse { path: path.to_path_buf(), message: e.to_string() })
    }

    /// Apply `PCONSOLE_*` overrides. `lookup` is `std::env::var(..).ok()` in the binary.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(url) = lookup(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
            self.base_url = url.trim().to_string();
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            self.timeout_secs = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("{} must be a whole number of seconds, got {:?}", ENV_TIMEOUT_SECS, raw)))?;
        }
        Ok(())
    }

    /// Reject values the client cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!("base_url must start with http:// or https://, got {:?}", self.base_url)));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid("timeout_secs must be greater than 0".to_string()));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = ConsoleConfig::load(&dir.path().join("nope.yaml")).unwrap();
        assert_eq!(cfg, ConsoleConfig::default());
        assert_eq!(cfg.base_url, "http://localhost:8000");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url: https://prompts.internal:9000").unwrap();
        let cfg = ConsoleConfig::load(file.path()).unwrap();
        assert_eq!(cfg.base_url, "https://prompts.internal:9000");
        assert_eq!(cfg.timeout_secs, REQUEST_TIMEOUT_SECS);
    }

    #[test]
    fn empty_file_gives_defaults() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert_eq!(ConsoleConfig::load(file.path()).unwrap(), ConsoleConfig::default());
    }

    #[test]
    fn malformed_yaml_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "timeout_secs: [not, a, number]").unwrap();
        assert!(matches!(ConsoleConfig::load(file.path()), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn env_overrides_file_values() {
        let mut cfg = ConsoleConfig::default();
        cfg.apply_env(env(&[(ENV_BASE_URL, " http://10.0.0.2:8000 "), (ENV_TIMEOUT_SECS, "3")])).unwrap();
        assert_eq!(cfg.base_url, "http://10.0.0.2:8000");
        assert_eq!(cfg.timeout(), Duration::from_secs(3));
    }

    #[test]
    fn bad_env_timeout_is_rejected() {
        let mut cfg = ConsoleConfig::default();
        let err = cfg.apply_env(env(&[(ENV_TIMEOUT_SECS, "soon")])).unwrap_err();
        assert!(err.to_string().contains(ENV_TIMEOUT_SECS));
    }

    #[test]
    fn validate_requires_http_scheme() {
        let cfg = ConsoleConfig { base_url: "localhost:8000".into(), ..ConsoleConfig::default() };
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));
        assert!(ConsoleConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let cfg = ConsoleConfig { timeout_secs: 0, ..ConsoleConfig::default() };
        assert!(cfg.validate().is_err());
    }
}
