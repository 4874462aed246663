use std::sync::Arc;

pub const CNAME_TTL: u32 = 60;

/// The CNAME written back in place of the upstream A record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedAnswer {
    pub owner: Arc<str>,
    pub target: String,
    pub ttl: u32,
}

impl SynthesizedAnswer {
    pub fn new(owner: impl Into<Arc<str>>, target: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            target: target.into(),
            ttl: CNAME_TTL,
        }
    }
}
