use std::net::Ipv4Addr;
use std::sync::Arc;

pub const DEFAULT_TARGET_SUFFIX: &str = "-via-9.shark-perch.ts.net";

/// Maps a resolved IPv4 address onto a synthetic hostname:
/// `10.0.123.45` + `-via-9.shark-perch.ts.net` → `10-0-123-45-via-9.shark-perch.ts.net.`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressTransformer {
    suffix: Arc<str>,
}

impl AddressTransformer {
    pub fn new(suffix: impl Into<Arc<str>>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn transform(&self, address: &str) -> String {
        transform(address, &self.suffix)
    }

    pub fn transform_ipv4(&self, address: Ipv4Addr) -> String {
        self.transform(&address.to_string())
    }
}

impl Default for AddressTransformer {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET_SUFFIX)
    }
}

/// Input is not validated; it is expected to come from a decoded A record.
pub fn transform(address: &str, suffix: &str) -> String {
    let mut hostname = address.replace('.', "-");
    hostname.push_str(suffix);
    ensure_fqdn(hostname)
}

pub fn ensure_fqdn(mut name: String) -> String {
    if !name.ends_with('.') {
        name.push('.');
    }
    name
}
