use std::path::PathBuf;

use serde::Deserialize;

use crate::infrastructure::snapshot::{JsonFileSnapshot, DEFAULT_SNAPSHOT_FILE};

/// Environment variable prefix for layered configuration
const ENV_PREFIX: &str = "KEYGATE";

/// Bare port variable honoured for compatibility with existing deployments
const PORT_ENV: &str = "PORT";

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Where the key snapshot lives
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageConfig {
    /// Snapshot file; `keys.json` beside the executable when unset
    #[serde(default)]
    pub path: Option<PathBuf>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
        }
    }
}

impl StorageConfig {
    /// Snapshot store for the configured location
    pub fn snapshot(&self) -> JsonFileSnapshot {
        match &self.path {
            Some(path) => JsonFileSnapshot::new(path),
            None => JsonFileSnapshot::beside_executable(DEFAULT_SNAPSHOT_FILE),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut app_config: Self = config.try_deserialize()?;
        app_config.apply_port_override(std::env::var(PORT_ENV).ok().as_deref())?;

        Ok(app_config)
    }

    /// Apply the value of the bare `PORT` variable, if any
    pub fn apply_port_override(&mut self, port: Option<&str>) -> Result<(), config::ConfigError> {
        let Some(port) = port.map(str::trim).filter(|p| !p.is_empty()) else {
            return Ok(());
        };

        self.server.port = port.parse().map_err(|_| {
            config::ConfigError::Message(format!("{} must be a port number, got '{}'", PORT_ENV, port))
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.logging.level, "info");
        assert!(matches!(config.logging.format, LogFormat::Pretty));
        assert!(config.storage.path.is_none());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: AppConfig = config::Config::builder()
            .set_override("server.port", 8081)
            .unwrap()
            .set_override("logging.format", "json")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.server.port, 8081);
        assert_eq!(config.server.host, "0.0.0.0");
        assert!(matches!(config.logging.format, LogFormat::Json));
    }

    #[test]
    fn test_port_override() {
        let mut config = AppConfig::default();

        config.apply_port_override(None).unwrap();
        assert_eq!(config.server.port, 3000);

        config.apply_port_override(Some("")).unwrap();
        assert_eq!(config.server.port, 3000);

        config.apply_port_override(Some("8080")).unwrap();
        assert_eq!(config.server.port, 8080);

        assert!(config.apply_port_override(Some("http")).is_err());
        assert!(config.apply_port_override(Some("70000")).is_err());
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_snapshot_location() {
        let configured = StorageConfig {
            path: Some(PathBuf::from("/var/lib/keygate/keys.json")),
        };
        assert_eq!(
            configured.snapshot().path(),
            std::path::Path::new("/var/lib/keygate/keys.json")
        );

        let default = StorageConfig::default();
        assert!(default.snapshot().path().ends_with(DEFAULT_SNAPSHOT_FILE));
    }
}
