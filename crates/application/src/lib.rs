//! iterdns Application Layer
//!
//! The iterative resolution engine and the port it drives upstream
//! queries through.
pub mod ports;
pub mod use_cases;
