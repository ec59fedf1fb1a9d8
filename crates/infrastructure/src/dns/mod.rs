pub mod server;
pub mod transport;
pub mod wire;

pub use server::{serve_udp, DnsServerHandler};
pub use transport::UdpQueryTransport;
pub use wire::MessageBuilder;
