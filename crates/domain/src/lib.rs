//! iterdns Domain Layer
pub mod config;
pub mod errors;
pub mod root_hints;
pub mod server_set;

pub use config::{CliOverrides, Config};
pub use errors::DomainError;
pub use root_hints::ROOT_SERVERS;
pub use server_set::ServerSet;
