//! iterdns Infrastructure Layer
//!
//! Wire encoding on top of hickory-proto, the UDP query transport and the
//! request dispatcher that answers client datagrams.
pub mod dns;
