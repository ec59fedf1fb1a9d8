use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Malformed DNS message: {0}")]
    MalformedMessage(String),

    #[error("Response carries {received} question(s), query carried {sent}")]
    QuestionCountMismatch { sent: usize, received: usize },

    #[error("All upstream servers are unreachable")]
    TransportAllServersUnreachable,

    #[error("Transport I/O failure with {server}: {reason}")]
    TransportIo { server: String, reason: String },

    #[error("Transport timeout waiting for {server}")]
    TransportTimeout { server: String },
}

impl DomainError {
    /// True for failures of the datagram exchange itself, as opposed to
    /// failures to make sense of what came back.
    pub fn is_transport_error(&self) -> bool {
        matches!(
            self,
            Self::TransportAllServersUnreachable
                | Self::TransportIo { .. }
                | Self::TransportTimeout { .. }
        )
    }
}
