use crate::dns::wire::{MessageBuilder, MAX_UDP_MESSAGE_SIZE};
use iterdns_application::use_cases::IterativeResolver;
use iterdns_domain::DomainError;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::sync::Semaphore;
use tracing::{debug, error, info};

/// Turns one client datagram into one reply datagram.
pub struct DnsServerHandler {
    resolver: Arc<IterativeResolver>,
}

impl DnsServerHandler {
    pub fn new(resolver: Arc<IterativeResolver>) -> Self {
        Self { resolver }
    }

    /// Decode the first question, resolve it from the root hints and encode
    /// the result under the client's transaction ID.
    pub async fn handle_datagram(&self, datagram: &[u8]) -> Result<Vec<u8>, DomainError> {
        let request = MessageBuilder::parse(datagram)?;
        let question = request.queries().first().cloned().ok_or_else(|| {
            DomainError::MalformedMessage("request carries no question".to_string())
        })?;

        info!(
            domain = %question.name(),
            record_type = %question.query_type(),
            id = request.id(),
            "DNS query received"
        );

        let root_hints = self.resolver.root_hints().clone();
        let mut response = self.resolver.resolve(root_hints, &question).await?;

        let mut header = *response.header();
        header.set_id(request.id());
        response.set_header(header);
        response.add_query(question);

        debug!(
            id = response.id(),
            rcode = ?response.response_code(),
            answers = response.answers().len(),
            "Sending response"
        );

        MessageBuilder::serialize_message(&response)
    }
}

/// Receive client datagrams on `socket` forever, resolving each one on its
/// own task.
///
/// With `max_in_flight` set, reading pauses while that many requests are
/// being resolved. Failed requests get no reply.
pub async fn serve_udp(
    socket: Arc<UdpSocket>,
    handler: Arc<DnsServerHandler>,
    max_in_flight: Option<usize>,
) {
    let limiter = max_in_flight.map(|permits| Arc::new(Semaphore::new(permits)));
    let mut recv_buf = [0u8; MAX_UDP_MESSAGE_SIZE];

    loop {
        let (bytes_received, from) = match socket.recv_from(&mut recv_buf).await {
            Ok(received) => received,
            Err(e) => {
                error!(error = %e, "UDP recv error");
                continue;
            }
        };

        let permit = match &limiter {
            Some(limiter) => match Arc::clone(limiter).acquire_owned().await {
                Ok(permit) => Some(permit),
                Err(_) => break,
            },
            None => None,
        };

        let owned_buf: Arc<[u8]> = Arc::from(&recv_buf[..bytes_received]);
        let handler = Arc::clone(&handler);
        let socket = Arc::clone(&socket);

        tokio::spawn(async move {
            let _permit = permit;

            match handler.handle_datagram(&owned_buf).await {
                Ok(response) => {
                    if let Err(e) = socket.send_to(&response, from).await {
                        error!(client = %from, error = %e, "Failed to send response");
                    }
                }
                Err(e) => {
                    error!(client = %from, error = %e, "Dropping request");
                }
            }
        });
    }
}
