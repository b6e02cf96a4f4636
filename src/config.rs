use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// Settings for fetching pages to import
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ImporterConfig {
    /// Total request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Maximum number of redirects followed before giving up
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Accept header sent with every request
    #[serde(default = "default_accept")]
    pub accept: String,
    /// Run extraction on non-empty error-status bodies instead of failing
    /// with the origin's status
    #[serde(default)]
    pub extract_error_pages: bool,
}

impl Default for ImporterConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            max_redirects: default_max_redirects(),
            user_agent: default_user_agent(),
            accept: default_accept(),
            extract_error_pages: false,
        }
    }
}

impl ImporterConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with CROUTON__ prefix
    /// 2. importer.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: CROUTON__TIMEOUT_SECS
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

// Default value functions
fn default_timeout_secs() -> u64 {
    15
}

fn default_max_redirects() -> usize {
    5
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (compatible; Crouton-Importer/1.0)".to_string()
}

fn default_accept() -> String {
    "text/html,application/xhtml+xml".to_string()
}

/// Load configuration from file and environment variables
///
/// See [`ImporterConfig::load`] for the precedence rules.
pub fn load_config() -> Result<ImporterConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("importer").required(false))
        .add_source(
            Environment::with_prefix("CROUTON")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    #[test]
    fn test_default_values() {
        let config = ImporterConfig::default();
        assert_eq!(config.timeout(), Duration::from_secs(15));
        assert_eq!(config.max_redirects, 5);
        assert!(config.user_agent.contains("Crouton-Importer"));
        assert!(config.accept.starts_with("text/html"));
        assert!(!config.extract_error_pages);
    }

    #[test]
    fn test_empty_source_deserializes_to_defaults() {
        let config: ImporterConfig = Config::builder()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(config, ImporterConfig::default());
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config: ImporterConfig = Config::builder()
            .add_source(File::from_str(
                "timeout_secs = 20\nextract_error_pages = true",
                FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.timeout_secs, 20);
        assert!(config.extract_error_pages);
        assert_eq!(config.max_redirects, 5);
    }

    #[test]
    fn test_load_config_without_file() {
        // Without importer.toml or CROUTON__ variables every field is defaulted
        let result = load_config();
        assert!(result.is_ok());
    }
}
