pub mod message_builder;

pub use message_builder::MessageBuilder;

/// Largest datagram read or accepted, with no EDNS(0) negotiation.
pub const MAX_UDP_MESSAGE_SIZE: usize = 512;
