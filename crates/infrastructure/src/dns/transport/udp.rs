//! UDP transport for upstream queries (RFC 1035 §4.2.1).
//!
//! Messages are sent as-is, without framing. Truncated responses are returned
//! to the caller unchanged; there is no TCP fallback.

use super::resolver::resolve_upstream;
use super::{unreachable, validate_response_id, DnsTransport, TransportResponse};
use a2cname_domain::{DomainError, UpstreamAddr};
use async_trait::async_trait;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::debug;

/// Maximum UDP DNS response size with EDNS(0)
const MAX_UDP_RESPONSE_SIZE: usize = 4096;

pub struct UdpTransport {
    upstream_addr: UpstreamAddr,
}

impl UdpTransport {
    pub fn new(upstream_addr: UpstreamAddr) -> Self {
        Self { upstream_addr }
    }

    async fn exchange(&self, message_bytes: &[u8]) -> Result<Vec<u8>, DomainError> {
        let server_addr = resolve_upstream(&self.upstream_addr).await?;
        let server = server_addr.to_string();

        let bind_addr = if server_addr.is_ipv4() {
            SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0))
        } else {
            SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0))
        };

        let socket = UdpSocket::bind(bind_addr)
            .await
            .map_err(|e| unreachable(&server, format!("failed to bind UDP socket: {}", e)))?;

        // Connected sockets drop datagrams from any other source.
        socket
            .connect(server_addr)
            .await
            .map_err(|e| unreachable(&server, e))?;

        let bytes_sent = socket
            .send(message_bytes)
            .await
            .map_err(|e| unreachable(&server, e))?;

        debug!(server = %server, bytes_sent, "UDP query sent");

        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];
        let bytes_received = socket
            .recv(&mut recv_buf)
            .await
            .map_err(|e| unreachable(&server, e))?;
        recv_buf.truncate(bytes_received);

        debug!(server = %server, bytes_received, "UDP response received");

        validate_response_id(message_bytes, &recv_buf, &server)?;
        Ok(recv_buf)
    }
}

#[async_trait]
impl DnsTransport for UdpTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let bytes = tokio::time::timeout(timeout, self.exchange(message_bytes))
            .await
            .map_err(|_| DomainError::UpstreamTimeout {
                server: self.upstream_addr.to_string(),
            })??;

        Ok(TransportResponse { bytes })
    }

    fn protocol_name(&self) -> &'static str {
        "UDP"
    }
}
