use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;
use wikicount::PipelineConfig;

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server bind address
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum request body size in MB
    #[serde(default = "default_max_body_size_mb")]
    pub max_body_size_mb: usize,

    /// Enable CORS
    #[serde(default = "default_true")]
    pub enable_cors: bool,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Metrics endpoint enabled
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,

    /// Path to the pipeline YAML (fetcher, walker and ranking settings)
    #[serde(default)]
    pub pipeline_config: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
            timeout_secs: default_timeout_secs(),
            max_body_size_mb: default_max_body_size_mb(),
            enable_cors: default_true(),
            log_level: default_log_level(),
            metrics_enabled: default_true(),
            pipeline_config: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from `.env`, an optional `server.*` file and
    /// `WIKICOUNT_SERVER__*` environment variables, in that order.
    pub fn load() -> anyhow::Result<Self> {
        if let Err(err) = dotenvy::dotenv() {
            if !err.not_found() {
                return Err(err.into());
            }
        }

        let builder = config::Config::builder()
            .add_source(config::File::with_name("server").required(false))
            .add_source(config::Environment::with_prefix("WIKICOUNT_SERVER").separator("__"));

        let config: ServerConfig = builder.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.bind_addr, self.port);
        Ok(addr_str.parse()?)
    }

    /// Get request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get max body size in bytes
    pub fn max_body_size(&self) -> usize {
        self.max_body_size_mb * 1024 * 1024
    }

    /// Pipeline settings from `pipeline_config`, or the built-in defaults.
    pub fn pipeline(&self) -> anyhow::Result<PipelineConfig> {
        match &self.pipeline_config {
            Some(path) => Ok(PipelineConfig::from_file(path)?),
            None => Ok(PipelineConfig::default()),
        }
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_max_body_size_mb() -> usize {
    1
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.timeout(), Duration::from_secs(60));
        assert_eq!(cfg.max_body_size(), 1024 * 1024);
        assert!(cfg.enable_cors);
        assert!(cfg.metrics_enabled);
        assert!(cfg.pipeline_config.is_none());
    }

    #[test]
    fn test_socket_addr() {
        let cfg = ServerConfig::default();
        let addr = cfg.socket_addr().unwrap();
        assert_eq!(addr.port(), 8080);
    }

    #[test]
    fn test_bad_bind_addr() {
        let cfg = ServerConfig {
            bind_addr: "not an address".to_string(),
            ..Default::default()
        };
        assert!(cfg.socket_addr().is_err());
    }

    #[test]
    fn test_pipeline_defaults_without_path() {
        let pipeline = ServerConfig::default().pipeline().unwrap();
        assert_eq!(pipeline, PipelineConfig::default());
    }

    #[test]
    fn test_pipeline_from_yaml_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"version: \"1.0\"\nwalker:\n  max_depth_limit: 1\n")
            .unwrap();

        let cfg = ServerConfig {
            pipeline_config: Some(file.path().display().to_string()),
            ..Default::default()
        };
        assert_eq!(cfg.pipeline().unwrap().walker.max_depth_limit, 1);
    }
}
