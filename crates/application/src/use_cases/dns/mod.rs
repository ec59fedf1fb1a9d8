mod iterative_resolver;

pub use iterative_resolver::{IterativeResolver, MAX_ROUNDS};
