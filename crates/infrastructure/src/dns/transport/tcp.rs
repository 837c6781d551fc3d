use super::{io_error, timeout_error, DnsTransport, TransportResponse};
use async_trait::async_trait;
use gtld_census_domain::DomainError;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::debug;

/// DNS over TCP (RFC 1035 §4.2.2): every message carries a two-byte
/// big-endian length prefix. Used when a UDP answer comes back truncated.
pub struct TcpTransport {
    server_addr: SocketAddr,
}

impl TcpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }

    pub fn server_addr(&self) -> SocketAddr {
        self.server_addr
    }

    async fn exchange(&self, message_bytes: &[u8]) -> Result<Vec<u8>, DomainError> {
        let length = u16::try_from(message_bytes.len()).map_err(|_| DomainError::Transport {
            server: self.server_addr.to_string(),
            reason: format!("query of {} bytes is too large for TCP", message_bytes.len()),
        })?;

        let mut stream = TcpStream::connect(self.server_addr)
            .await
            .map_err(|e| io_error(self.server_addr, "connect", e))?;

        let mut framed = Vec::with_capacity(message_bytes.len() + 2);
        framed.extend_from_slice(&length.to_be_bytes());
        framed.extend_from_slice(message_bytes);

        stream
            .write_all(&framed)
            .await
            .map_err(|e| io_error(self.server_addr, "send TCP query", e))?;

        let mut len_buf = [0u8; 2];
        stream
            .read_exact(&mut len_buf)
            .await
            .map_err(|e| io_error(self.server_addr, "read TCP length prefix", e))?;

        let mut response = vec![0u8; u16::from_be_bytes(len_buf) as usize];
        stream
            .read_exact(&mut response)
            .await
            .map_err(|e| io_error(self.server_addr, "read TCP response", e))?;

        debug!(
            server = %self.server_addr,
            bytes_received = response.len(),
            "TCP response received"
        );

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
            .map_err(|_| timeout_error(self.server_addr))??;

        Ok(TransportResponse {
            bytes,
            protocol_used: "TCP",
        })
    }
}
