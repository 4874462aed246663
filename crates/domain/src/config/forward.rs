use super::errors::ConfigError;
use crate::DnsProtocol;
use serde::{Deserialize, Serialize};

/// Where escalated queries go when the standalone server runs a
/// forwarding handler behind the rewriter.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ForwardConfig {
    pub upstream: String,
}

impl ForwardConfig {
    pub fn endpoint(&self) -> Result<DnsProtocol, ConfigError> {
        self.upstream
            .parse::<DnsProtocol>()
            .map_err(|e| ConfigError::Validation(format!("forward upstream: {}", e)))
    }
}
