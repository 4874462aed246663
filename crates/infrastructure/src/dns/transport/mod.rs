pub mod resolver;
pub mod tcp;
pub mod udp;

use a2cname_domain::{DnsProtocol, DomainError};
use async_trait::async_trait;
use std::time::Duration;

/// Size of the fixed DNS message header.
pub const DNS_HEADER_LEN: usize = 12;

#[derive(Debug)]
pub struct TransportResponse {
    pub bytes: Vec<u8>,
}

/// One request/response exchange with an upstream server. The whole exchange,
/// including hostname resolution and connection setup, is bounded by `timeout`.
#[async_trait]
pub trait DnsTransport: Send + Sync {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError>;

    fn protocol_name(&self) -> &'static str;
}

pub enum Transport {
    Udp(udp::UdpTransport),
    Tcp(tcp::TcpTransport),
}

impl Transport {
    pub async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        match self {
            Self::Udp(t) => DnsTransport::send(t, message_bytes, timeout).await,
            Self::Tcp(t) => DnsTransport::send(t, message_bytes, timeout).await,
        }
    }

    pub fn protocol_name(&self) -> &'static str {
        match self {
            Self::Udp(_) => "UDP",
            Self::Tcp(_) => "TCP",
        }
    }
}

pub fn create_transport(protocol: &DnsProtocol) -> Transport {
    match protocol {
        DnsProtocol::Udp { addr } => Transport::Udp(udp::UdpTransport::new(addr.clone())),
        DnsProtocol::Tcp { addr } => Transport::Tcp(tcp::TcpTransport::new(addr.clone())),
    }
}

/// Rejects a response whose ID differs from the query it answers.
pub fn validate_response_id(query: &[u8], response: &[u8], server: &str) -> Result<(), DomainError> {
    if query.len() < 2 || response.len() < 2 {
        return Err(DomainError::InvalidDnsResponse(format!(
            "message from {} too short to carry an ID",
            server
        )));
    }

    let query_id = u16::from_be_bytes([query[0], query[1]]);
    let response_id = u16::from_be_bytes([response[0], response[1]]);
    if query_id != response_id {
        return Err(DomainError::InvalidDnsResponse(format!(
            "ID mismatch from {}: sent {:#06x}, received {:#06x}",
            server, query_id, response_id
        )));
    }

    Ok(())
}

pub(crate) fn unreachable(server: &str, reason: impl std::fmt::Display) -> DomainError {
    DomainError::UpstreamUnreachable {
        server: server.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SERVER: &str = "100.100.100.100:53";

    #[test]
    fn test_validate_response_id_matching_ids_ok() {
        let query = [0xAB, 0xCD, 0x01, 0x00];
        let response = [0xAB, 0xCD, 0x81, 0x80];
        assert!(validate_response_id(&query, &response, SERVER).is_ok());
    }

    #[test]
    fn test_validate_response_id_mismatch_returns_error() {
        let query = [0xAB, 0xCD, 0x01, 0x00];
        let response = [0x12, 0x34, 0x81, 0x80];
        let result = validate_response_id(&query, &response, SERVER);
        let err = result.unwrap_err();
        assert!(matches!(err, DomainError::InvalidDnsResponse(_)));
        assert!(err.to_string().contains("mismatch"), "{}", err);
    }

    #[test]
    fn test_validate_response_id_short_messages_return_error() {
        assert!(validate_response_id(&[0xAB], &[0xAB, 0xCD], SERVER).is_err());
        assert!(validate_response_id(&[0xAB, 0xCD], &[0xAB], SERVER).is_err());
    }

    #[test]
    fn test_create_transport_follows_scheme() {
        let udp = create_transport(&"1.1.1.1:53".parse().unwrap());
        assert_eq!(udp.protocol_name(), "UDP");

        let tcp = create_transport(&"tcp://1.1.1.1:53".parse().unwrap());
        assert_eq!(tcp.protocol_name(), "TCP");
    }
}
