use a2cname_domain::DomainError;
use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::RData;
use std::net::Ipv4Addr;
use tracing::debug;

/// The parts of an upstream answer the A resolver cares about.
#[derive(Debug, Clone)]
pub struct DnsResponse {
    /// A record addresses in answer-section order.
    pub addresses: Vec<Ipv4Addr>,

    pub rcode: ResponseCode,
}

impl DnsResponse {
    pub fn first_address(&self) -> Option<Ipv4Addr> {
        self.addresses.first().copied()
    }

    pub fn is_success(&self) -> bool {
        self.rcode == ResponseCode::NoError
    }
}

pub struct ResponseParser;

impl ResponseParser {
    pub fn decode(response_bytes: &[u8]) -> Result<Message, DomainError> {
        Message::from_vec(response_bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to parse DNS response: {}", e))
        })
    }

    pub fn parse(response_bytes: &[u8]) -> Result<DnsResponse, DomainError> {
        let message = Self::decode(response_bytes)?;

        let rcode = message.response_code();

        let addresses: Vec<Ipv4Addr> = message
            .answers()
            .iter()
            .filter_map(|record| match record.data() {
                RData::A(a) => Some(a.0),
                _ => None,
            })
            .collect();

        debug!(
            rcode = Self::rcode_to_status(rcode),
            addresses = addresses.len(),
            truncated = message.truncated(),
            "DNS response parsed"
        );

        Ok(DnsResponse { addresses, rcode })
    }

    pub fn rcode_to_status(rcode: ResponseCode) -> &'static str {
        match rcode {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::NXDomain => "NXDOMAIN",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::NotImp => "NOTIMP",
            ResponseCode::FormErr => "FORMERR",
            _ => "UNKNOWN",
        }
    }
}
