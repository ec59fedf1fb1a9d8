//! Iterative resolution from the root down.
//!
//! Each round sends the question to the current server set and reads the
//! reply:
//!
//! - authoritative reply: done, the answer section is returned
//! - no NS in the authority section: NXDOMAIN
//! - NS with matching A glue in the additional section: the glue addresses
//!   become the next server set
//! - NS without glue: the nameserver hostnames are resolved one by one from
//!   the root hints until one yields an address
//!
//! After `MAX_ROUNDS` rounds without a terminal outcome the result is
//! SERVFAIL. Transport failures in the main chain abort the resolution;
//! failures while resolving a glueless nameserver only skip that nameserver.
//!
//! Glue sub-resolutions recurse into `resolve` with a fresh round budget.
//! There is no cycle detection: two zones whose nameservers live in each
//! other's glueless delegations recurse until the round budgets run out.

use crate::ports::QueryTransport;
use futures::future::{BoxFuture, FutureExt};
use hickory_proto::op::{Message, MessageType, OpCode, Query, ResponseCode};
use hickory_proto::rr::{Name, RData, Record, RecordType};
use iterdns_domain::{DomainError, ServerSet};
use std::net::Ipv4Addr;
use std::sync::Arc;
use tracing::{debug, warn};

/// Upstream query rounds per resolution.
pub const MAX_ROUNDS: usize = 3;

pub struct IterativeResolver {
    transport: Arc<dyn QueryTransport>,
    root_hints: ServerSet,
}

impl IterativeResolver {
    pub fn new(transport: Arc<dyn QueryTransport>, root_hints: ServerSet) -> Self {
        Self {
            transport,
            root_hints,
        }
    }

    pub fn root_hints(&self) -> &ServerSet {
        &self.root_hints
    }

    /// Resolve `question` starting at `servers`.
    ///
    /// The returned message has a placeholder ID of 0; callers answering a
    /// client must rewrite it.
    pub fn resolve<'a>(
        &'a self,
        servers: ServerSet,
        question: &'a Query,
    ) -> BoxFuture<'a, Result<Message, DomainError>> {
        async move {
            let mut servers = servers;

            for round in 1..=MAX_ROUNDS {
                debug!(
                    domain = %question.name(),
                    record_type = %question.query_type(),
                    round,
                    servers = %servers,
                    "Outgoing query"
                );

                let response = self.transport.send(&servers, question).await?;

                if response.authoritative {
                    debug!(
                        domain = %question.name(),
                        answers = response.answers.len(),
                        upstream_rcode = ?response.response_code,
                        round,
                        "Authoritative answer"
                    );
                    return Ok(resolved_message(response.answers));
                }

                let nameservers = delegated_nameservers(&response.authorities);
                if nameservers.is_empty() {
                    debug!(domain = %question.name(), round, "No delegation (NXDOMAIN)");
                    return Ok(terminal_message(ResponseCode::NXDomain));
                }

                let glue = glue_addresses(&nameservers, &response.additionals);
                servers = if glue.is_empty() {
                    debug!(
                        domain = %question.name(),
                        nameservers = nameservers.len(),
                        "Delegation without glue"
                    );
                    self.resolve_missing_glue(&nameservers).await
                } else {
                    glue
                };
            }

            debug!(
                domain = %question.name(),
                rounds = MAX_ROUNDS,
                "Round budget exhausted (SERVFAIL)"
            );
            Ok(terminal_message(ResponseCode::ServFail))
        }
        .boxed()
    }

    /// Resolve glueless nameservers in order, stopping at the first one that
    /// yields an A record. Returns an empty set when none does.
    async fn resolve_missing_glue(&self, nameservers: &[Name]) -> ServerSet {
        for nameserver in nameservers {
            let question = Query::query(nameserver.clone(), RecordType::A);

            match self.resolve(self.root_hints.clone(), &question).await {
                Ok(message) => {
                    let addrs = a_addresses(message.answers());
                    if !addrs.is_empty() {
                        return ServerSet::new(addrs);
                    }
                    debug!(nameserver = %nameserver, "Nameserver lookup returned no address");
                }
                Err(e) => {
                    warn!(nameserver = %nameserver, error = %e, "Nameserver lookup failed");
                }
            }
        }

        ServerSet::empty()
    }
}

fn delegated_nameservers(authorities: &[Record]) -> Vec<Name> {
    authorities
        .iter()
        .filter_map(|record| match record.data() {
            RData::NS(ns) => Some(ns.0.clone()),
            _ => None,
        })
        .collect()
}

/// Glue lookup is an exact, case-sensitive comparison of presentation names.
fn glue_addresses(nameservers: &[Name], additionals: &[Record]) -> ServerSet {
    nameservers
        .iter()
        .flat_map(|nameserver| {
            let host = nameserver.to_ascii();
            additionals
                .iter()
                .filter_map(move |record| match record.data() {
                    RData::A(a) if record.name().to_ascii() == host => Some(a.0),
                    _ => None,
                })
        })
        .collect()
}

fn a_addresses(answers: &[Record]) -> Vec<Ipv4Addr> {
    answers
        .iter()
        .filter_map(|record| match record.data() {
            RData::A(a) => Some(a.0),
            _ => None,
        })
        .collect()
}

/// Any authoritative reply resolves with RCODE NOERROR. An upstream
/// authoritative NXDOMAIN therefore reaches the client as an empty NOERROR.
fn resolved_message(answers: Vec<Record>) -> Message {
    let mut message = Message::new(0, MessageType::Response, OpCode::Query);
    message.set_authoritative(true);
    message.add_answers(answers);
    message
}

fn terminal_message(code: ResponseCode) -> Message {
    let mut message = Message::new(0, MessageType::Response, OpCode::Query);
    message.set_response_code(code);
    message
}
