#![allow(dead_code)]

use a2cname_application::ports::{QueryHandler, ResponseWriter, UpstreamResolver};
use a2cname_domain::DomainError;
use async_trait::async_trait;
use hickory_proto::op::{Message, MessageType, OpCode, Query, ResponseCode};
use hickory_proto::rr::{Name, RecordType};
use std::io;
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub fn query_message(name: &str, record_type: RecordType) -> Message {
    let mut message = Message::new(0xBEEF, MessageType::Query, OpCode::Query);
    message.set_recursion_desired(true);
    message.add_query(Query::query(Name::from_ascii(name).unwrap(), record_type));
    message
}

pub fn empty_message() -> Message {
    Message::new(0xBEEF, MessageType::Query, OpCode::Query)
}

pub struct MockUpstreamResolver {
    result: Result<Ipv4Addr, DomainError>,
    calls: AtomicUsize,
    queried: Mutex<Vec<String>>,
}

impl MockUpstreamResolver {
    pub fn returning(address: &str) -> Self {
        Self::with_result(Ok(address.parse().unwrap()))
    }

    pub fn failing(error: DomainError) -> Self {
        Self::with_result(Err(error))
    }

    fn with_result(result: Result<Ipv4Addr, DomainError>) -> Self {
        Self {
            result,
            calls: AtomicUsize::new(0),
            queried: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn queried(&self) -> Vec<String> {
        self.queried.lock().unwrap().clone()
    }
}

#[async_trait]
impl UpstreamResolver for MockUpstreamResolver {
    async fn resolve_a(&self, domain: &str) -> Result<Ipv4Addr, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queried.lock().unwrap().push(domain.to_string());
        self.result.clone()
    }

    fn server(&self) -> String {
        "mock://upstream".to_string()
    }
}

/// Next handler that records what reached it and answers with a fixed code
/// without writing anything.
pub struct RecordingHandler {
    code: ResponseCode,
    seen: Mutex<Vec<Message>>,
}

impl RecordingHandler {
    pub fn new() -> Self {
        Self::answering(ResponseCode::NoError)
    }

    pub fn answering(code: ResponseCode) -> Self {
        Self {
            code,
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }

    pub fn seen(&self) -> Vec<Message> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl QueryHandler for RecordingHandler {
    async fn serve_dns(
        &self,
        request: &Message,
        _writer: &mut dyn ResponseWriter,
    ) -> Result<ResponseCode, DomainError> {
        self.seen.lock().unwrap().push(request.clone());
        Ok(self.code)
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

#[derive(Default)]
pub struct MockResponseWriter {
    pub written: Vec<Message>,
}

impl ResponseWriter for MockResponseWriter {
    fn write_message(&mut self, message: Message) -> Result<(), DomainError> {
        self.written.push(message);
        Ok(())
    }
}

/// Collects formatted log output so tests can assert on it.
#[derive(Clone, Default)]
pub struct LogCapture {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock().unwrap()).into_owned()
    }

    pub fn subscriber(&self) -> impl tracing::Subscriber + Send + Sync {
        tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for LogCapture {
    type Writer = LogCapture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
