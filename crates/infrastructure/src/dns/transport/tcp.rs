//! TCP transport for upstream queries (RFC 1035 §4.2.2). Every message is
//! preceded by its length as a 2-byte big-endian integer. One connection per
//! query, closed afterwards.

use super::resolver::resolve_upstream;
use super::{unreachable, validate_response_id, DnsTransport, TransportResponse};
use a2cname_domain::{DomainError, UpstreamAddr};
use async_trait::async_trait;
use std::io;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::debug;

pub struct TcpTransport {
    upstream_addr: UpstreamAddr,
}

impl TcpTransport {
    pub fn new(upstream_addr: UpstreamAddr) -> Self {
        Self { upstream_addr }
    }

    async fn exchange(&self, message_bytes: &[u8]) -> Result<Vec<u8>, DomainError> {
        let server_addr = resolve_upstream(&self.upstream_addr).await?;
        let server = server_addr.to_string();

        let mut stream = TcpStream::connect(server_addr)
            .await
            .map_err(|e| unreachable(&server, e))?;
        stream
            .set_nodelay(true)
            .map_err(|e| unreachable(&server, e))?;

        write_with_length_prefix(&mut stream, message_bytes)
            .await
            .map_err(|e| unreachable(&server, e))?;

        debug!(server = %server, message_len = message_bytes.len(), "TCP query sent");

        let response = read_with_length_prefix(&mut stream)
            .await
            .map_err(|e| unreachable(&server, e))?;

        debug!(server = %server, response_len = response.len(), "TCP response received");

        validate_response_id(message_bytes, &response, &server)?;
        Ok(response)
    }
}

#[async_trait]
impl DnsTransport for TcpTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let bytes = tokio::time::timeout(timeout, self.exchange(message_bytes))
            .await
            .map_err(|_| DomainError::UpstreamTimeout {
                server: self.upstream_addr.to_string(),
            })??;

        Ok(TransportResponse { bytes })
    }

    fn protocol_name(&self) -> &'static str {
        "TCP"
    }
}

pub async fn write_with_length_prefix<S>(stream: &mut S, message_bytes: &[u8]) -> io::Result<()>
where
    S: AsyncWrite + Unpin,
{
    let length = u16::try_from(message_bytes.len()).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("message too large: {} bytes", message_bytes.len()),
        )
    })?;

    stream.write_all(&length.to_be_bytes()).await?;
    stream.write_all(message_bytes).await?;
    stream.flush().await
}

pub async fn read_with_length_prefix<S>(stream: &mut S) -> io::Result<Vec<u8>>
where
    S: AsyncRead + Unpin,
{
    let mut len_buf = [0u8; 2];
    stream.read_exact(&mut len_buf).await?;

    let message_len = u16::from_be_bytes(len_buf) as usize;
    let mut message = vec![0u8; message_len];
    stream.read_exact(&mut message).await?;

    Ok(message)
}
