//! a2cname domain layer
pub mod config;
pub mod dns_protocol;
pub mod dns_query;
pub mod errors;
pub mod record_type;
pub mod synthesized_answer;
pub mod transform;
pub mod zone;

pub use config::{
    CliOverrides, Config, ConfigError, ForwardConfig, LogFormat, LoggingConfig, PluginConfig,
    ServerConfig,
};
pub use dns_protocol::{DnsProtocol, UpstreamAddr};
pub use dns_query::DnsQuery;
pub use errors::DomainError;
pub use record_type::RecordType;
pub use synthesized_answer::{SynthesizedAnswer, CNAME_TTL};
pub use transform::{AddressTransformer, DEFAULT_TARGET_SUFFIX};
pub use zone::{ZonePattern, ZoneSet};
