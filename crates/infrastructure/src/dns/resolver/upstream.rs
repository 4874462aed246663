use crate::dns::forwarding::{MessageBuilder, ResponseParser};
use crate::dns::transport::{create_transport, Transport};
use a2cname_application::ports::UpstreamResolver;
use a2cname_domain::{DnsProtocol, DomainError, RecordType};
use async_trait::async_trait;
use std::net::Ipv4Addr;
use std::time::Duration;
use tracing::{debug, instrument};

/// Bound on one upstream exchange, from sending the query to decoding the reply.
pub const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(5);

/// Issues a single A query per call to one upstream server. No retries, no
/// caching.
pub struct UpstreamAResolver {
    endpoint: DnsProtocol,
    transport: Transport,
    timeout: Duration,
}

impl UpstreamAResolver {
    pub fn new(endpoint: DnsProtocol) -> Self {
        let transport = create_transport(&endpoint);
        Self {
            endpoint,
            transport,
            timeout: UPSTREAM_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn endpoint(&self) -> &DnsProtocol {
        &self.endpoint
    }
}

#[async_trait]
impl UpstreamResolver for UpstreamAResolver {
    #[instrument(skip(self), fields(upstream = %self.endpoint), level = "debug")]
    async fn resolve_a(&self, domain: &str) -> Result<Ipv4Addr, DomainError> {
        let (id, query) = MessageBuilder::build_query_with_id(domain, &RecordType::A)?;
        debug!(id, protocol = self.transport.protocol_name(), "Sending upstream query");

        let response = self.transport.send(&query, self.timeout).await?;
        let parsed = ResponseParser::parse(&response.bytes)?;

        if !parsed.is_success() {
            return Err(DomainError::UpstreamRcode {
                server: self.server(),
                rcode: u16::from(parsed.rcode),
            });
        }

        parsed
            .first_address()
            .ok_or_else(|| DomainError::NoAddressFound(domain.to_string()))
    }

    fn server(&self) -> String {
        self.endpoint.addr().to_string()
    }
}
