use super::message_builder::MessageBuilder;
use super::response_parser::ResponseParser;
use crate::dns::resolver::UPSTREAM_TIMEOUT;
use crate::dns::transport::{create_transport, Transport};
use a2cname_application::ports::{QueryHandler, ResponseWriter};
use a2cname_domain::{DnsProtocol, DomainError};
use async_trait::async_trait;
use hickory_proto::op::{Message, ResponseCode};
use std::time::Duration;
use tracing::{debug, warn};

pub const FORWARD_HANDLER_NAME: &str = "forward";

/// Terminal handler that relays the request unchanged to a fixed upstream
/// and writes back whatever it answers.
pub struct ForwardHandler {
    endpoint: DnsProtocol,
    transport: Transport,
    timeout: Duration,
}

impl ForwardHandler {
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

    async fn forward(&self, request: &Message) -> Result<Message, DomainError> {
        let request_bytes = MessageBuilder::serialize_message(request)?;
        let response = self.transport.send(&request_bytes, self.timeout).await?;
        ResponseParser::decode(&response.bytes)
    }
}

#[async_trait]
impl QueryHandler for ForwardHandler {
    async fn serve_dns(
        &self,
        request: &Message,
        writer: &mut dyn ResponseWriter,
    ) -> Result<ResponseCode, DomainError> {
        let reply = match self.forward(request).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(upstream = %self.endpoint, error = %e, "Forwarding failed");
                return Err(e);
            }
        };

        let rcode = reply.response_code();
        debug!(
            upstream = %self.endpoint,
            rcode = ResponseParser::rcode_to_status(rcode),
            answers = reply.answers().len(),
            "Forwarded"
        );

        writer.write_message(reply)?;
        Ok(rcode)
    }

    fn name(&self) -> &'static str {
        FORWARD_HANDLER_NAME
    }
}
