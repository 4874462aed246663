use async_trait::async_trait;
use a2cname_domain::DomainError;
use std::net::Ipv4Addr;

#[async_trait]
pub trait UpstreamResolver: Send + Sync {
    /// Sends one A query for `domain` and returns the first address in the
    /// answer section. Implementations must bound the exchange with a timeout
    /// and must not retry.
    async fn resolve_a(&self, domain: &str) -> Result<Ipv4Addr, DomainError>;

    /// Human-readable upstream identity, used in logs.
    fn server(&self) -> String;
}
