mod query_transport;

pub use query_transport::{QueryTransport, UpstreamResponse};
