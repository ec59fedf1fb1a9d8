use async_trait::async_trait;
use hickory_proto::op::Query;
use hickory_proto::rr::Name;
use iterdns_application::ports::{QueryTransport, UpstreamResponse};
use iterdns_domain::{DomainError, ServerSet};
use std::net::Ipv4Addr;
use std::str::FromStr;
use std::sync::Mutex;

struct Rule {
    qname: Name,
    server: Option<Ipv4Addr>,
    reply: Result<UpstreamResponse, DomainError>,
}

/// Scripted transport. The first rule whose question name matches and whose
/// server (if any) is part of the queried set provides the reply.
pub struct MockQueryTransport {
    rules: Mutex<Vec<Rule>>,
    calls: Mutex<Vec<(ServerSet, Query)>>,
}

impl MockQueryTransport {
    pub fn new() -> Self {
        Self {
            rules: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn push(
        &self,
        qname: &str,
        server: Option<Ipv4Addr>,
        reply: Result<UpstreamResponse, DomainError>,
    ) {
        self.rules.lock().unwrap().push(Rule {
            qname: Name::from_str(qname).unwrap(),
            server,
            reply,
        });
    }

    pub fn respond(&self, qname: &str, server: Ipv4Addr, reply: UpstreamResponse) {
        self.push(qname, Some(server), Ok(reply));
    }

    /// Reply regardless of the server set, even an empty one.
    pub fn respond_anywhere(&self, qname: &str, reply: UpstreamResponse) {
        self.push(qname, None, Ok(reply));
    }

    pub fn fail(&self, qname: &str, server: Ipv4Addr, error: DomainError) {
        self.push(qname, Some(server), Err(error));
    }

    pub fn calls(&self) -> Vec<(ServerSet, Query)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_for(&self, qname: &str) -> usize {
        let qname = Name::from_str(qname).unwrap();
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, q)| *q.name() == qname)
            .count()
    }
}

impl Default for MockQueryTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QueryTransport for MockQueryTransport {
    async fn send(
        &self,
        servers: &ServerSet,
        question: &Query,
    ) -> Result<UpstreamResponse, DomainError> {
        self.calls
            .lock()
            .unwrap()
            .push((servers.clone(), question.clone()));

        let rules = self.rules.lock().unwrap();
        let rule = rules.iter().find(|rule| {
            rule.qname == *question.name()
                && rule.server.map_or(true, |server| servers.contains(server))
        });

        match (rule, servers.first()) {
            (Some(rule), _) => rule.reply.clone(),
            (None, None) => Err(DomainError::TransportAllServersUnreachable),
            (None, Some(server)) => Err(DomainError::TransportIo {
                server: format!("{}:53", server),
                reason: "no scripted reply".to_string(),
            }),
        }
    }
}
