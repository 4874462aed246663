use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("Upstream {server} unreachable: {reason}")]
    UpstreamUnreachable { server: String, reason: String },

    #[error("Query timeout waiting for {server}")]
    UpstreamTimeout { server: String },

    #[error("DNS query failed with rcode: {rcode}")]
    UpstreamRcode { server: String, rcode: u16 },

    #[error("No A record found for {0}")]
    NoAddressFound(String),

    #[error("plugin/{0}: no next plugin found")]
    NoNextHandler(String),

    #[error("Failed to write response: {0}")]
    ResponseWrite(String),
}

impl DomainError {
    /// Errors raised while talking to an upstream server.
    pub fn is_upstream_error(&self) -> bool {
        matches!(
            self,
            DomainError::UpstreamUnreachable { .. }
                | DomainError::UpstreamTimeout { .. }
                | DomainError::UpstreamRcode { .. }
                | DomainError::NoAddressFound(_)
                | DomainError::InvalidDnsResponse(_)
        )
    }
}
