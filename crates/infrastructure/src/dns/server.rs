use crate::dns::forwarding::{MessageBuilder, RecordTypeMapper, ResponseParser};
use crate::dns::transport::DNS_HEADER_LEN;
use a2cname_application::ports::{QueryHandler, ResponseWriter};
use a2cname_application::use_cases::CnameResponseBuilder;
use a2cname_domain::DomainError;
use hickory_proto::op::{Message, MessageType, OpCode, ResponseCode};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Holds the single reply a handler chain produces for one request.
#[derive(Debug, Default)]
pub struct BufferedResponseWriter {
    message: Option<Message>,
}

impl BufferedResponseWriter {
    pub fn take(&mut self) -> Option<Message> {
        self.message.take()
    }

    pub fn is_written(&self) -> bool {
        self.message.is_some()
    }
}

impl ResponseWriter for BufferedResponseWriter {
    fn write_message(&mut self, message: Message) -> Result<(), DomainError> {
        if self.message.is_some() {
            return Err(DomainError::ResponseWrite(
                "a response was already written for this request".to_string(),
            ));
        }
        self.message = Some(message);
        Ok(())
    }
}

/// Bridges raw DNS packets to a handler chain.
#[derive(Clone)]
pub struct DnsServerHandler {
    chain: Arc<dyn QueryHandler>,
}

impl DnsServerHandler {
    pub fn new(chain: Arc<dyn QueryHandler>) -> Self {
        Self { chain }
    }

    /// Decodes one request, runs the chain and encodes the reply. Returns
    /// `None` when nothing should be sent back.
    pub async fn handle_raw(&self, bytes: &[u8]) -> Option<Vec<u8>> {
        let request = match Message::from_vec(bytes) {
            Ok(message) => message,
            Err(e) => {
                debug!(error = %e, len = bytes.len(), "Failed to decode request");
                return format_error_reply(bytes);
            }
        };

        if request.message_type() != MessageType::Query {
            debug!(id = request.id(), "Ignoring message that is not a query");
            return None;
        }

        let reply = self.handle_message(&request).await?;
        match MessageBuilder::serialize_message(&reply) {
            Ok(encoded) => Some(encoded),
            Err(e) => {
                error!(error = %e, id = request.id(), "Failed to encode reply");
                let fallback =
                    CnameResponseBuilder::error_reply(&request, ResponseCode::ServFail);
                MessageBuilder::serialize_message(&fallback).ok()
            }
        }
    }

    /// Runs the chain for a decoded request and returns the message to send.
    pub async fn handle_message(&self, request: &Message) -> Option<Message> {
        if let Some(query) = request.queries().first() {
            debug!(
                domain = %query.name(),
                record_type = %RecordTypeMapper::from_hickory(query.query_type()),
                id = request.id(),
                "DNS query received"
            );
        }

        let mut writer = BufferedResponseWriter::default();
        let result = self.chain.serve_dns(request, &mut writer).await;

        if let Some(reply) = writer.take() {
            if let Err(e) = &result {
                warn!(error = %e, "Handler failed after writing a reply");
            }
            return Some(reply);
        }

        match result {
            Ok(ResponseCode::NoError) => {
                warn!(
                    handler = self.chain.name(),
                    id = request.id(),
                    "Handler returned NOERROR without writing a reply"
                );
                None
            }
            Ok(code) => {
                debug!(rcode = ResponseParser::rcode_to_status(code), "Sending empty reply");
                Some(CnameResponseBuilder::error_reply(request, code))
            }
            Err(e) => {
                error!(error = %e, handler = self.chain.name(), "Query handling failed");
                Some(CnameResponseBuilder::error_reply(request, ResponseCode::ServFail))
            }
        }
    }
}

/// FORMERR for a packet that carries a DNS header but does not decode.
/// Anything shorter is dropped.
fn format_error_reply(bytes: &[u8]) -> Option<Vec<u8>> {
    if bytes.len() < DNS_HEADER_LEN {
        return None;
    }
    // Never answer something that already claims to be a response.
    if bytes[2] & 0x80 != 0 {
        return None;
    }

    let id = u16::from_be_bytes([bytes[0], bytes[1]]);
    let mut reply = Message::new(id, MessageType::Response, OpCode::Query);
    reply.set_response_code(ResponseCode::FormErr);
    MessageBuilder::serialize_message(&reply).ok()
}
