use iterdns_application::use_cases::IterativeResolver;
use iterdns_domain::{Config, ServerSet};
use iterdns_infrastructure::dns::{DnsServerHandler, UdpQueryTransport};
use std::sync::Arc;
use tracing::{info, warn};

pub struct DnsServices {
    pub handler: Arc<DnsServerHandler>,
}

impl DnsServices {
    pub fn new(config: &Config) -> Self {
        let root_hints = ServerSet::root_hints();
        info!(
            root_servers = root_hints.len(),
            upstream_port = config.resolver.upstream_port,
            "Initializing iterative resolver"
        );

        let timeout = config.resolver.query_timeout();
        match timeout {
            Some(timeout) => info!(
                timeout_ms = timeout.as_millis() as u64,
                "Upstream query deadline enabled"
            ),
            None => warn!(
                "No upstream query deadline configured; a silent server stalls its request"
            ),
        }

        let transport = UdpQueryTransport::new()
            .with_port(config.resolver.upstream_port)
            .with_timeout(timeout);

        let resolver = Arc::new(IterativeResolver::new(Arc::new(transport), root_hints));
        let handler = Arc::new(DnsServerHandler::new(resolver));

        Self { handler }
    }
}
