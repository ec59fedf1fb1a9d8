use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    /// Port the upstream authorities are queried on.
    #[serde(default = "default_upstream_port")]
    pub upstream_port: u16,

    /// Deadline for a single upstream reply, in milliseconds.
    /// Unset means a silent upstream blocks the request indefinitely.
    #[serde(default)]
    pub query_timeout_ms: Option<u64>,
}

impl ResolverConfig {
    pub fn query_timeout(&self) -> Option<Duration> {
        self.query_timeout_ms.map(Duration::from_millis)
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            upstream_port: default_upstream_port(),
            query_timeout_ms: None,
        }
    }
}

fn default_upstream_port() -> u16 {
    53
}
