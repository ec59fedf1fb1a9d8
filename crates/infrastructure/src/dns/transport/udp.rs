//! UDP Transport for iterative queries (RFC 1035 §4.2.1)
//!
//! One datagram out, one datagram in, no retries. Replies are read into a
//! 512-byte buffer since no EDNS(0) is advertised. Without a configured
//! timeout a silent server blocks the calling task until the OS gives up.

use crate::dns::wire::{MessageBuilder, MAX_UDP_MESSAGE_SIZE};
use async_trait::async_trait;
use hickory_proto::op::Query;
use iterdns_application::ports::{QueryTransport, UpstreamResponse};
use iterdns_domain::{DomainError, ServerSet};
use std::future::Future;
use std::io;
use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::{debug, warn};

pub const DNS_PORT: u16 = 53;

/// DNS over UDP transport to the first reachable server of a set
pub struct UdpQueryTransport {
    port: u16,
    timeout: Option<Duration>,
}

impl UdpQueryTransport {
    pub fn new() -> Self {
        Self {
            port: DNS_PORT,
            timeout: None,
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Connect to the servers in order and keep the first socket that
    /// connects.
    async fn connect(&self, servers: &ServerSet) -> Result<(UdpSocket, SocketAddr), DomainError> {
        for server in servers.iter() {
            let server_addr = SocketAddr::from((server, self.port));

            match Self::connect_one(server_addr).await {
                Ok(socket) => return Ok((socket, server_addr)),
                Err(e) => {
                    debug!(server = %server_addr, error = %e, "UDP connect failed");
                }
            }
        }

        Err(DomainError::TransportAllServersUnreachable)
    }

    async fn connect_one(server_addr: SocketAddr) -> io::Result<UdpSocket> {
        // Bind to ephemeral port (0 = OS assigns)
        let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0)).await?;
        socket.connect(server_addr).await?;
        Ok(socket)
    }

    async fn io_with_deadline<T, F>(&self, server_addr: SocketAddr, op: F) -> Result<T, DomainError>
    where
        F: Future<Output = io::Result<T>>,
    {
        let result = match self.timeout {
            Some(timeout) => tokio::time::timeout(timeout, op).await.map_err(|_| {
                DomainError::TransportTimeout {
                    server: server_addr.to_string(),
                }
            })?,
            None => op.await,
        };

        result.map_err(|e| DomainError::TransportIo {
            server: server_addr.to_string(),
            reason: e.to_string(),
        })
    }
}

impl Default for UdpQueryTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QueryTransport for UdpQueryTransport {
    async fn send(
        &self,
        servers: &ServerSet,
        question: &Query,
    ) -> Result<UpstreamResponse, DomainError> {
        let (id, query_bytes) = MessageBuilder::build_query(question)?;
        let (socket, server_addr) = self.connect(servers).await?;

        let bytes_sent = self
            .io_with_deadline(server_addr, socket.send(&query_bytes))
            .await?;

        debug!(
            server = %server_addr,
            domain = %question.name(),
            record_type = %question.query_type(),
            bytes_sent,
            "UDP query sent"
        );

        let mut recv_buf = [0u8; MAX_UDP_MESSAGE_SIZE];
        let bytes_received = self
            .io_with_deadline(server_addr, socket.recv(&mut recv_buf))
            .await?;

        let message = MessageBuilder::parse(&recv_buf[..bytes_received])?;

        let received = message.queries().len();
        if received != 1 {
            return Err(DomainError::QuestionCountMismatch { sent: 1, received });
        }

        if message.id() != id {
            warn!(
                server = %server_addr,
                expected = id,
                received = message.id(),
                "UDP response with unexpected transaction ID"
            );
        }

        debug!(
            server = %server_addr,
            bytes_received,
            authoritative = message.authoritative(),
            answers = message.answers().len(),
            "UDP response received"
        );

        Ok(UpstreamResponse::from_message(&message))
    }
}
