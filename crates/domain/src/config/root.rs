use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use super::forward::ForwardConfig;
use super::logging::LoggingConfig;
use super::plugin::PluginConfig;
use super::server::ServerConfig;

/// Main configuration structure for the a2cname server
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Listener configuration (port, bind address)
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// The rewriter itself
    #[serde(default)]
    pub a2cname: PluginConfig,

    /// Optional fallthrough handler for queries the rewriter does not answer
    #[serde(default)]
    pub forward: Option<ForwardConfig>,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. a2cname.toml in current directory
    /// 3. /etc/a2cname/config.toml
    /// 4. Default configuration
    ///
    /// The result is validated; a configuration without zones is rejected.
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new("a2cname.toml").exists() {
            Self::from_file("a2cname.toml")?
        } else if std::path::Path::new("/etc/a2cname/config.toml").exists() {
            Self::from_file("/etc/a2cname/config.toml")?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides)?;
        config.a2cname = config.a2cname.normalized()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply command-line overrides to configuration
    fn apply_cli_overrides(&mut self, overrides: CliOverrides) -> Result<(), ConfigError> {
        if let Some(directive) = overrides.directive {
            self.a2cname = PluginConfig::from_directive(&directive)?;
        }
        if let Some(port) = overrides.dns_port {
            self.server.dns_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if let Some(upstream) = overrides.upstream {
            self.a2cname.upstream = upstream;
        }
        if let Some(forward) = overrides.forward {
            self.forward = Some(ForwardConfig { upstream: forward });
        }
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.dns_port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }

        self.a2cname.validate()?;

        if let Some(forward) = &self.forward {
            forward.endpoint()?;
        }

        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub dns_port: Option<u16>,
    pub bind_address: Option<String>,
    pub log_level: Option<String>,
    pub upstream: Option<String>,
    pub forward: Option<String>,
    /// Contents of a Corefile-style stanza replacing the `[a2cname]` table
    pub directive: Option<String>,
}
