pub mod forwarding;
pub mod resolver;
pub mod server;
pub mod transport;

pub use forwarding::{ForwardHandler, MessageBuilder, ResponseParser};
pub use resolver::{UpstreamAResolver, UPSTREAM_TIMEOUT};
pub use server::{BufferedResponseWriter, DnsServerHandler};
