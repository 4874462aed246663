use a2cname_domain::{DomainError, UpstreamAddr};
use std::net::SocketAddr;

/// Turns an upstream address into a socket address, looking the hostname up
/// through the system resolver when needed. The first address returned wins.
pub async fn resolve_upstream(addr: &UpstreamAddr) -> Result<SocketAddr, DomainError> {
    match addr {
        UpstreamAddr::Resolved(socket_addr) => Ok(*socket_addr),
        UpstreamAddr::Unresolved { hostname, port } => {
            let target = format!("{}:{}", hostname, port);

            let mut addrs = tokio::net::lookup_host(&target)
                .await
                .map_err(|e| super::unreachable(&target, format!("lookup failed: {}", e)))?;

            addrs
                .next()
                .ok_or_else(|| super::unreachable(&target, "no addresses found"))
        }
    }
}
