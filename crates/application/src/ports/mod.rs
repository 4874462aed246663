mod query_handler;
mod upstream_resolver;

pub use query_handler::{next_or_failure, QueryHandler, ResponseWriter};
pub use upstream_resolver::UpstreamResolver;

// Re-export for convenience
pub use a2cname_domain::DnsQuery;
