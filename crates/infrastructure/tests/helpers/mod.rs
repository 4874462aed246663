#![allow(dead_code)]

pub mod dns_server_mock;

pub use dns_server_mock::{encode, MockDnsServer, MockReply};

use a2cname_application::ports::{QueryHandler, ResponseWriter};
use a2cname_domain::DomainError;
use async_trait::async_trait;
use hickory_proto::op::{Message, MessageType, OpCode, Query, ResponseCode};
use hickory_proto::rr::{Name, RecordType};

pub fn query_message(id: u16, name: &str, record_type: RecordType) -> Message {
    let mut message = Message::new(id, MessageType::Query, OpCode::Query);
    message.set_recursion_desired(true);
    message.add_query(Query::query(Name::from_ascii(name).unwrap(), record_type));
    message
}

#[derive(Default)]
pub struct RecordingWriter {
    pub written: Vec<Message>,
}

impl ResponseWriter for RecordingWriter {
    fn write_message(&mut self, message: Message) -> Result<(), DomainError> {
        self.written.push(message);
        Ok(())
    }
}

/// Chain stand-in with a fixed outcome.
pub enum StaticHandler {
    /// Returns the code without writing.
    Code(ResponseCode),
    /// Writes an empty reply with the code, then returns it.
    Writes(ResponseCode),
    Fails(DomainError),
}

#[async_trait]
impl QueryHandler for StaticHandler {
    async fn serve_dns(
        &self,
        request: &Message,
        writer: &mut dyn ResponseWriter,
    ) -> Result<ResponseCode, DomainError> {
        match self {
            StaticHandler::Code(code) => Ok(*code),
            StaticHandler::Writes(code) => {
                let mut reply = Message::new(request.id(), MessageType::Response, OpCode::Query);
                reply.set_response_code(*code);
                reply.set_authoritative(true);
                writer.write_message(reply)?;
                Ok(*code)
            }
            StaticHandler::Fails(error) => Err(error.clone()),
        }
    }

    fn name(&self) -> &'static str {
        "static"
    }
}
