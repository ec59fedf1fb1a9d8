pub mod dns;

pub use dns::{IterativeResolver, MAX_ROUNDS};
