use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use crate::transform::{AddressTransformer, DEFAULT_TARGET_SUFFIX};
use crate::zone::{normalize_zone, ZoneSet};
use crate::DnsProtocol;

pub const DEFAULT_UPSTREAM: &str = "100.100.100.100:53";

/// Settings for one rewriter instance. Built once at startup and never
/// mutated afterwards.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PluginConfig {
    /// Zone patterns; a leading `*.` restricts the zone to strict subdomains.
    #[serde(default)]
    pub zones: Vec<String>,

    #[serde(default = "default_target_suffix")]
    pub target_suffix: String,

    #[serde(default = "default_upstream")]
    pub upstream: String,
}

impl PluginConfig {
    pub fn new<S: Into<String>>(zones: impl IntoIterator<Item = S>) -> Self {
        Self {
            zones: zones.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_target_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.target_suffix = suffix.into();
        self
    }

    pub fn with_upstream(mut self, upstream: impl Into<String>) -> Self {
        self.upstream = upstream.into();
        self
    }

    /// Checks the configuration and returns it with zones lower-cased and
    /// fully qualified.
    pub fn normalized(mut self) -> Result<Self, ConfigError> {
        if self.zones.is_empty() {
            return Err(ConfigError::NoZones);
        }

        self.zones = self
            .zones
            .iter()
            .map(|zone| normalize_zone(zone))
            .collect::<Result<Vec<_>, _>>()?;

        if self.target_suffix.chars().any(char::is_whitespace) {
            return Err(ConfigError::Validation(format!(
                "target_suffix must not contain whitespace: '{}'",
                self.target_suffix
            )));
        }

        self.upstream_endpoint()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.clone().normalized().map(|_| ())
    }

    pub fn zone_set(&self) -> Result<ZoneSet, ConfigError> {
        if self.zones.is_empty() {
            return Err(ConfigError::NoZones);
        }
        ZoneSet::from_zones(&self.zones)
    }

    pub fn transformer(&self) -> AddressTransformer {
        AddressTransformer::new(self.target_suffix.as_str())
    }

    pub fn upstream_endpoint(&self) -> Result<DnsProtocol, ConfigError> {
        self.upstream
            .parse::<DnsProtocol>()
            .map_err(|e| ConfigError::Validation(format!("upstream: {}", e)))
    }
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            zones: Vec::new(),
            target_suffix: default_target_suffix(),
            upstream: default_upstream(),
        }
    }
}

fn default_target_suffix() -> String {
    DEFAULT_TARGET_SUFFIX.to_string()
}

fn default_upstream() -> String {
    DEFAULT_UPSTREAM.to_string()
}
