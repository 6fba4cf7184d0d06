//! YAML configuration for the wikicount pipeline.
//!
//! Groups everything the walk and ranking stages need (fetcher endpoint,
//! concurrency, depth ceiling, default stop-words) in one file that can be
//! loaded at startup.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//! name: "english wikipedia"
//!
//! fetcher:
//!   language: "en"
//!   # api_url: "http://localhost:8081/w/api.php"
//!   user_agent: "wikicount/0.1 (ops@example.org)"
//!   timeout_secs: 30
//!   connect_timeout_secs: 10
//!
//! walker:
//!   max_concurrent_fetches: 8
//!   max_depth_limit: 3
//!
//! ranking:
//!   ignore_words: ["the", "and", "of"]
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use walker::{MediaWikiConfig, WalkConfig};

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level pipeline configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PipelineConfig {
    /// Configuration format version
    pub version: String,

    /// Optional configuration name/description
    #[serde(default)]
    pub name: Option<String>,

    /// Article source
    #[serde(default)]
    pub fetcher: FetcherYamlConfig,

    /// Traversal limits
    #[serde(default)]
    pub walker: WalkerYamlConfig,

    /// Ranking defaults
    #[serde(default)]
    pub ranking: RankingYamlConfig,
}

impl PipelineConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: PipelineConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.fetcher.validate()?;
        self.walker.validate()?;
        Ok(())
    }

    /// Fetcher settings in the form `walker::MediaWikiFetcher` takes.
    pub fn mediawiki_config(&self) -> MediaWikiConfig {
        MediaWikiConfig {
            language: self.fetcher.language.clone(),
            api_url: self.fetcher.api_url.clone(),
            user_agent: self.fetcher.user_agent.clone(),
            timeout: Duration::from_secs(self.fetcher.timeout_secs),
            connect_timeout: Duration::from_secs(self.fetcher.connect_timeout_secs),
        }
    }

    pub fn walk_config(&self) -> WalkConfig {
        WalkConfig::default().with_max_concurrent_fetches(self.walker.max_concurrent_fetches)
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            fetcher: FetcherYamlConfig::default(),
            walker: WalkerYamlConfig::default(),
            ranking: RankingYamlConfig::default(),
        }
    }
}

/// Article source YAML configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetcherYamlConfig {
    #[serde(default = "default_language")]
    pub language: String,

    #[serde(default)]
    pub api_url: Option<String>,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl FetcherYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.user_agent.trim().is_empty() {
            return Err(ConfigLoadError::Validation(
                "fetcher.user_agent must not be empty".to_string(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigLoadError::Validation(
                "fetcher.timeout_secs must be >= 1".to_string(),
            ));
        }
        let probe = MediaWikiConfig {
            language: self.language.clone(),
            api_url: self.api_url.clone(),
            ..MediaWikiConfig::default()
        };
        probe
            .endpoint()
            .map(|_| ())
            .map_err(|e| ConfigLoadError::Validation(format!("fetcher: {e}")))
    }
}

impl Default for FetcherYamlConfig {
    fn default() -> Self {
        let defaults = MediaWikiConfig::default();
        Self {
            language: defaults.language,
            api_url: None,
            user_agent: defaults.user_agent,
            timeout_secs: defaults.timeout.as_secs(),
            connect_timeout_secs: defaults.connect_timeout.as_secs(),
        }
    }
}

/// Traversal YAML configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkerYamlConfig {
    #[serde(default = "default_max_concurrent_fetches")]
    pub max_concurrent_fetches: usize,

    /// Largest `depth` a request may ask for.
    #[serde(default = "default_max_depth_limit")]
    pub max_depth_limit: u32,
}

impl WalkerYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.max_concurrent_fetches == 0 {
            return Err(ConfigLoadError::Validation(
                "walker.max_concurrent_fetches must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for WalkerYamlConfig {
    fn default() -> Self {
        Self {
            max_concurrent_fetches: default_max_concurrent_fetches(),
            max_depth_limit: default_max_depth_limit(),
        }
    }
}

/// Ranking YAML configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingYamlConfig {
    /// Words always excluded, on top of any per-request ignore list.
    #[serde(default)]
    pub ignore_words: Vec<String>,
}

fn default_language() -> String {
    MediaWikiConfig::default().language
}

fn default_user_agent() -> String {
    MediaWikiConfig::default().user_agent
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_max_concurrent_fetches() -> usize {
    WalkConfig::default().max_concurrent_fetches
}

fn default_max_depth_limit() -> u32 {
    3
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_valid_yaml() {
        let yaml = r#"
version: "1.0"
name: "test config"
fetcher:
  language: "de"
walker:
  max_depth_limit: 1
"#;

        let config = PipelineConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.name, Some("test config".to_string()));
        assert_eq!(config.fetcher.language, "de");
        assert_eq!(config.walker.max_depth_limit, 1);
        assert_eq!(config.walker.max_concurrent_fetches, 8);
        assert_eq!(
            config.mediawiki_config().endpoint().unwrap(),
            "https://de.wikipedia.org/w/api.php"
        );
    }

    #[test]
    fn test_load_from_file() {
        let yaml = r#"
version: "1"
ranking:
  ignore_words: ["the", "a"]
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(yaml.as_bytes()).unwrap();

        let config = PipelineConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.ranking.ignore_words, vec!["the", "a"]);
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let result = PipelineConfig::from_file("/definitely/not/here.yaml");
        assert!(matches!(result, Err(ConfigLoadError::FileRead(_))));
    }

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.version, "1.0");
        assert!(config.name.is_none());
        assert!(config.validate().is_ok());
        assert_eq!(config.walk_config(), WalkConfig::default());
        assert_eq!(config.mediawiki_config(), MediaWikiConfig::default());
    }

    #[test]
    fn test_unsupported_version() {
        let result = PipelineConfig::from_yaml("version: \"2.0\"\n");
        assert!(matches!(result, Err(ConfigLoadError::UnsupportedVersion(v)) if v == "2.0"));
    }

    #[test]
    fn test_walker_validation() {
        let yaml = r#"
version: "1.0"
walker:
  max_concurrent_fetches: 0
"#;

        let result = PipelineConfig::from_yaml(yaml);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("max_concurrent_fetches must be >= 1"));
    }

    #[test]
    fn test_fetcher_validation() {
        let yaml = r#"
version: "1.0"
fetcher:
  api_url: "not a url"
"#;

        let result = PipelineConfig::from_yaml(yaml);
        assert!(result.unwrap_err().to_string().contains("fetcher"));
    }

    #[test]
    fn test_full_yaml_roundtrip() {
        let yaml = r#"
version: "1.0"
name: "production"
fetcher:
  language: "en"
  api_url: "http://localhost:8081/w/api.php"
  user_agent: "wikicount-test/1.0"
  timeout_secs: 5
  connect_timeout_secs: 2
walker:
  max_concurrent_fetches: 4
  max_depth_limit: 2
ranking:
  ignore_words: ["the"]
"#;

        let config = PipelineConfig::from_yaml(yaml).unwrap();
        let mw = config.mediawiki_config();
        assert_eq!(mw.endpoint().unwrap(), "http://localhost:8081/w/api.php");
        assert_eq!(mw.user_agent, "wikicount-test/1.0");
        assert_eq!(mw.timeout, Duration::from_secs(5));
        assert_eq!(config.walk_config().max_concurrent_fetches, 4);

        let rendered = serde_yaml::to_string(&config).unwrap();
        let back = PipelineConfig::from_yaml(&rendered).unwrap();
        assert_eq!(back, config);
    }
}
