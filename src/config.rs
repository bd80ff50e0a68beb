//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub ui: UiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend connection configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_backend_url")]
    pub url: String,

    /// Unset means requests wait forever, like the browser client.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_backend_url() -> String {
    "http://localhost:5000".to_string()
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: default_backend_url(),
            request_timeout_secs: None,
        }
    }
}

impl BackendConfig {
    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

/// Authentication header policy
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfig {
    /// Attach the bearer token to list and create calls as well.
    /// The backend historically only checks it on delete and insight calls.
    #[serde(default)]
    pub bearer_on_all_requests: bool,
}

/// View behaviour knobs
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_details_preview_chars")]
    pub details_preview_chars: usize,

    #[serde(default = "default_register_redirect_ms")]
    pub register_redirect_ms: u64,
}

fn default_details_preview_chars() -> usize {
    400
}

fn default_register_redirect_ms() -> u64 {
    2000 // 2 seconds
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            details_preview_chars: default_details_preview_chars(),
            register_redirect_ms: default_register_redirect_ms(),
        }
    }
}

impl UiConfig {
    pub fn register_redirect_delay(&self) -> Duration {
        Duration::from_millis(self.register_redirect_ms)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment.
    ///
    /// Nothing is logged here since this runs before tracing is set up;
    /// call [`ConfigSource::log`] once it is.
    pub fn load_default() -> (Self, ConfigSource) {
        Self::load_first(&default_config_paths())
    }

    /// First of `paths` that exists and parses, else defaults
    fn load_first(paths: &[PathBuf]) -> (Self, ConfigSource) {
        let mut skipped = Vec::new();
        for path in paths {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        let source = ConfigSource {
                            path: Some(path.clone()),
                            skipped,
                        };
                        return (config, source);
                    }
                    Err(e) => skipped.push(e),
                }
            }
        }

        let source = ConfigSource {
            path: None,
            skipped,
        };
        (Self::from_env(), source)
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("INTERNSIGHT_API_URL") {
            self.backend.url = url;
        }
        if let Ok(flag) = std::env::var("INTERNSIGHT_BEARER_ALL") {
            if let Some(enabled) = parse_flag(&flag) {
                self.auth.bearer_on_all_requests = enabled;
            }
        }
        if let Ok(level) = std::env::var("INTERNSIGHT_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("INTERNSIGHT_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Where the settings came from
#[derive(Debug, Default)]
pub struct ConfigSource {
    /// `None` means built-in defaults with environment overrides
    pub path: Option<PathBuf>,
    /// Files that existed but could not be loaded
    pub skipped: Vec<ConfigError>,
}

impl ConfigSource {
    pub fn file(path: &Path) -> Self {
        Self {
            path: Some(path.to_path_buf()),
            skipped: Vec::new(),
        }
    }

    pub fn log(&self) {
        for e in &self.skipped {
            tracing::warn!("{}", e);
        }
        match &self.path {
            Some(path) => tracing::info!("Loaded config from {:?}", path),
            None => tracing::info!("Using default config with environment overrides"),
        }
    }
}

fn default_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("internsight").join("config.toml"));
    }
    paths.push(PathBuf::from("./internsight.toml"));
    paths
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# InternSight Configuration
#
# Environment variables override these settings:
# - INTERNSIGHT_API_URL
# - INTERNSIGHT_BEARER_ALL
# - INTERNSIGHT_LOG_LEVEL
# - INTERNSIGHT_LOG_FORMAT

[backend]
# InternSight backend base URL
url = "http://localhost:5000"

# Request timeout in seconds (unset: wait indefinitely)
# request_timeout_secs = 30

[auth]
# Send the bearer token on list/create calls too.
# The stock backend only checks it on delete and insight calls.
bearer_on_all_requests = false

[ui]
# Characters of job details shown per application before "..."
details_preview_chars = 400

# Delay before moving to the login view after registering (ms)
register_redirect_ms = 2000

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.backend.url, "http://localhost:5000");
        assert!(config.backend.request_timeout().is_none());
        assert!(!config.auth.bearer_on_all_requests);
        assert_eq!(config.ui.details_preview_chars, 400);
        assert_eq!(config.ui.register_redirect_delay(), Duration::from_secs(2));
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.is_json());
    }

    #[test]
    fn test_generated_config_parses_to_defaults() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.backend.url, "http://localhost:5000");
        assert_eq!(config.ui.details_preview_chars, 400);
        assert_eq!(config.ui.register_redirect_ms, 2000);
        assert!(!config.auth.bearer_on_all_requests);
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[backend]\nurl = \"https://api.example.com/\"\nrequest_timeout_secs = 10\n\n[auth]\nbearer_on_all_requests = true"
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.backend.base_url(), "https://api.example.com");
        assert_eq!(config.backend.request_timeout(), Some(Duration::from_secs(10)));
        assert!(config.auth.bearer_on_all_requests);
        // Untouched sections keep their defaults
        assert_eq!(config.ui.details_preview_chars, 400);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_load_errors() {
        let missing = Config::load(Path::new("/definitely/not/here.toml"));
        assert!(matches!(missing, Err(ConfigError::Io { .. })));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[backend\nurl = ").unwrap();
        let broken = Config::load(file.path());
        assert!(matches!(broken, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_load_first_reports_source() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "[ui\n").unwrap();
        let good = dir.path().join("good.toml");
        std::fs::write(&good, "[ui]\ndetails_preview_chars = 120\n").unwrap();
        let missing = dir.path().join("missing.toml");

        let (config, source) = Config::load_first(&[missing.clone(), broken, good.clone()]);
        assert_eq!(config.ui.details_preview_chars, 120);
        assert_eq!(source.path, Some(good));
        assert_eq!(source.skipped.len(), 1);
        assert!(matches!(source.skipped[0], ConfigError::Parse { .. }));

        let (config, source) = Config::load_first(&[missing]);
        assert_eq!(config.ui.details_preview_chars, 400);
        assert!(source.path.is_none());
        assert!(source.skipped.is_empty());
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" on "), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
