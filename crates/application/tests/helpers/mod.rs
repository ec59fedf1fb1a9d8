#![allow(dead_code)]

mod builders;
mod mock_transport;

pub use builders::*;
pub use mock_transport::MockQueryTransport;
