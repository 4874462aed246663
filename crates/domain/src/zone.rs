//! Configured zone patterns.
//!
//! A plain zone (`example.com.`) covers its apex and everything below it. A
//! wildcard zone (`*.example.com.`) covers only names strictly below the
//! suffix that follows the marker, so the apex falls through to the next
//! handler. Matching against query names happens on wire names, label by
//! label, in the application layer.

use crate::config::ConfigError;
use std::fmt;
use std::sync::Arc;

pub const WILDCARD_MARKER: &str = "*.";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ZonePattern {
    Exact(Arc<str>),
    Wildcard(Arc<str>),
}

impl ZonePattern {
    /// Parses a configured zone, lower-casing it and making it fully
    /// qualified.
    pub fn parse(pattern: &str) -> Result<Self, ConfigError> {
        let normalized = normalize_zone(pattern)?;

        match normalized.strip_prefix(WILDCARD_MARKER) {
            Some(suffix) => {
                let suffix = if suffix.is_empty() { "." } else { suffix };
                Ok(ZonePattern::Wildcard(Arc::from(suffix)))
            }
            None => Ok(ZonePattern::Exact(Arc::from(normalized.as_str()))),
        }
    }

    /// The zone suffix without the wildcard marker.
    pub fn suffix(&self) -> &str {
        match self {
            ZonePattern::Exact(zone) | ZonePattern::Wildcard(zone) => zone,
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, ZonePattern::Wildcard(_))
    }
}

impl fmt::Display for ZonePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZonePattern::Exact(zone) => write!(f, "{}", zone),
            ZonePattern::Wildcard(zone) if zone.as_ref() == "." => write!(f, "*."),
            ZonePattern::Wildcard(zone) => write!(f, "{}{}", WILDCARD_MARKER, zone),
        }
    }
}

/// The set of zones one plugin instance answers for. Order is irrelevant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoneSet {
    patterns: Vec<ZonePattern>,
}

impl ZoneSet {
    pub fn new(patterns: Vec<ZonePattern>) -> Self {
        Self { patterns }
    }

    pub fn from_zones<S: AsRef<str>>(zones: &[S]) -> Result<Self, ConfigError> {
        let patterns = zones
            .iter()
            .map(|zone| ZonePattern::parse(zone.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { patterns })
    }

    pub fn patterns(&self) -> &[ZonePattern] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Lower-cases a zone and appends the root label if missing.
pub fn normalize_zone(zone: &str) -> Result<String, ConfigError> {
    let trimmed = zone.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Validation("empty zone name".to_string()));
    }

    let body = trimmed.strip_prefix(WILDCARD_MARKER).unwrap_or(trimmed);
    if body.contains('*') && trimmed != "*" {
        return Err(ConfigError::Validation(format!(
            "wildcard marker is only allowed as the leading label: '{}'",
            zone
        )));
    }
    if body.contains("..") || body.chars().any(char::is_whitespace) {
        return Err(ConfigError::Validation(format!(
            "invalid zone name: '{}'",
            zone
        )));
    }

    let mut normalized = trimmed.to_ascii_lowercase();
    if !normalized.ends_with('.') {
        normalized.push('.');
    }
    Ok(normalized)
}
