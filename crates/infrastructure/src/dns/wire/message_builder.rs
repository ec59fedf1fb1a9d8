//! DNS Message Builder
//!
//! Encodes outgoing iterative queries and decodes datagrams using
//! `hickory-proto` as the wire codec.

use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use iterdns_domain::DomainError;

use super::MAX_UDP_MESSAGE_SIZE;

/// Builds and parses DNS messages in wire format
pub struct MessageBuilder;

impl MessageBuilder {
    /// Build an iterative query for `question` under a fresh random ID.
    ///
    /// The ID is drawn from the full 16-bit range on every call. Recursion
    /// Desired stays unset since the resolver walks the delegations itself.
    ///
    /// # Returns
    /// The transaction ID and the serialized message
    pub fn build_query(question: &Query) -> Result<(u16, Vec<u8>), DomainError> {
        let id = fastrand::u16(..);
        let bytes = Self::build_query_with_id(id, question)?;
        Ok((id, bytes))
    }

    pub fn build_query_with_id(id: u16, question: &Query) -> Result<Vec<u8>, DomainError> {
        let mut message = Message::new(id, MessageType::Query, OpCode::Query);
        message.add_query(question.clone());

        Self::serialize_message(&message)
    }

    /// Serialize a Message to wire format bytes
    pub fn serialize_message(message: &Message) -> Result<Vec<u8>, DomainError> {
        let mut buf = Vec::with_capacity(MAX_UDP_MESSAGE_SIZE);
        let mut encoder = BinEncoder::new(&mut buf);

        message.emit(&mut encoder).map_err(|e| {
            DomainError::MalformedMessage(format!("Failed to serialize DNS message: {}", e))
        })?;

        Ok(buf)
    }

    pub fn parse(bytes: &[u8]) -> Result<Message, DomainError> {
        Message::from_vec(bytes).map_err(|e| {
            DomainError::MalformedMessage(format!("Failed to parse DNS message: {}", e))
        })
    }
}
