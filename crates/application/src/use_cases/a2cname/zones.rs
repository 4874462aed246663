use a2cname_domain::{ConfigError, ZonePattern, ZoneSet};
use hickory_proto::rr::Name;

#[derive(Debug, Clone)]
struct ZoneEntry {
    zone: Name,
    labels: usize,
    wildcard: bool,
}

/// Label-aware view of the configured zones, matched against wire names.
///
/// Comparison walks labels from the root, so an escaped dot inside a label
/// never counts as a boundary. Case is ignored.
#[derive(Debug, Clone)]
pub struct ZoneMatcher {
    entries: Vec<ZoneEntry>,
}

impl ZoneMatcher {
    pub fn new(zones: &ZoneSet) -> Result<Self, ConfigError> {
        let entries = zones
            .patterns()
            .iter()
            .map(ZoneEntry::parse)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { entries })
    }

    /// A plain zone covers its apex and everything below it; a wildcard zone
    /// covers only names with more labels than its suffix.
    pub fn matches(&self, name: &Name) -> bool {
        self.entries.iter().any(|entry| entry.matches(name))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ZoneEntry {
    fn parse(pattern: &ZonePattern) -> Result<Self, ConfigError> {
        let zone = Name::from_ascii(pattern.suffix()).map_err(|e| {
            ConfigError::Validation(format!("invalid zone '{}': {}", pattern, e))
        })?;

        Ok(Self {
            labels: zone.iter().count(),
            zone,
            wildcard: pattern.is_wildcard(),
        })
    }

    fn matches(&self, name: &Name) -> bool {
        if !self.zone.zone_of(name) {
            return false;
        }
        !self.wildcard || name.iter().count() > self.labels
    }
}
