use async_trait::async_trait;
use a2cname_domain::DomainError;
use hickory_proto::op::{Message, ResponseCode};
use std::sync::Arc;

/// Sink for the reply to a single request.
pub trait ResponseWriter: Send {
    fn write_message(&mut self, message: Message) -> Result<(), DomainError>;
}

/// One link in a handler chain. A handler either writes a reply and returns
/// its response code, or hands the request to the next handler.
#[async_trait]
pub trait QueryHandler: Send + Sync {
    async fn serve_dns(
        &self,
        request: &Message,
        writer: &mut dyn ResponseWriter,
    ) -> Result<ResponseCode, DomainError>;

    fn name(&self) -> &'static str;
}

/// Delegates to `next`, or fails with [`DomainError::NoNextHandler`] when the
/// chain ends here.
pub async fn next_or_failure(
    name: &str,
    next: Option<&Arc<dyn QueryHandler>>,
    request: &Message,
    writer: &mut dyn ResponseWriter,
) -> Result<ResponseCode, DomainError> {
    match next {
        Some(handler) => handler.serve_dns(request, writer).await,
        None => Err(DomainError::NoNextHandler(name.to_string())),
    }
}
