use async_trait::async_trait;
use hickory_proto::op::{Message, Query, ResponseCode};
use hickory_proto::rr::Record;
use iterdns_domain::{DomainError, ServerSet};

/// Header fields and record sections of one upstream reply.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub id: u16,
    pub authoritative: bool,
    pub response_code: ResponseCode,
    pub answers: Vec<Record>,
    /// Records from the AUTHORITY section (NS delegations, SOA).
    pub authorities: Vec<Record>,
    /// Records from the ADDITIONAL section (glue).
    pub additionals: Vec<Record>,
}

impl UpstreamResponse {
    pub fn from_message(message: &Message) -> Self {
        Self {
            id: message.id(),
            authoritative: message.authoritative(),
            response_code: message.response_code(),
            answers: message.answers().to_vec(),
            authorities: message.name_servers().to_vec(),
            additionals: message.additionals().to_vec(),
        }
    }
}

/// Sends a single question to the first reachable server of a set.
#[async_trait]
pub trait QueryTransport: Send + Sync {
    async fn send(
        &self,
        servers: &ServerSet,
        question: &Query,
    ) -> Result<UpstreamResponse, DomainError>;
}
