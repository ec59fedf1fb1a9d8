use hickory_proto::op::{Query, ResponseCode};
use hickory_proto::rr::rdata::{A, NS};
use hickory_proto::rr::{Name, RData, Record, RecordType};
use iterdns_application::ports::UpstreamResponse;
use std::net::Ipv4Addr;

pub const ROOT_A: Ipv4Addr = Ipv4Addr::new(198, 41, 0, 4);

pub fn name(s: &str) -> Name {
    Name::from_ascii(s).unwrap()
}

pub fn question(s: &str) -> Query {
    Query::query(name(s), RecordType::A)
}

pub fn a_record(owner: &str, ip: Ipv4Addr) -> Record {
    Record::from_rdata(name(owner), 300, RData::A(A(ip)))
}

pub fn ns_record(zone: &str, host: &str) -> Record {
    Record::from_rdata(name(zone), 172_800, RData::NS(NS(name(host))))
}

fn empty_response() -> UpstreamResponse {
    UpstreamResponse {
        id: 0,
        authoritative: false,
        response_code: ResponseCode::NoError,
        answers: vec![],
        authorities: vec![],
        additionals: vec![],
    }
}

/// Authoritative reply carrying the given A answers.
pub fn authoritative(owner: &str, ips: &[Ipv4Addr]) -> UpstreamResponse {
    UpstreamResponse {
        authoritative: true,
        answers: ips.iter().map(|ip| a_record(owner, *ip)).collect(),
        ..empty_response()
    }
}

/// Non-authoritative reply with nothing in the authority section.
pub fn no_delegation() -> UpstreamResponse {
    empty_response()
}

/// Referral to `zone`. Each nameserver gets an A glue record when an
/// address is supplied.
pub fn referral(zone: &str, nameservers: &[(&str, Option<Ipv4Addr>)]) -> UpstreamResponse {
    UpstreamResponse {
        authorities: nameservers
            .iter()
            .map(|(host, _)| ns_record(zone, host))
            .collect(),
        additionals: nameservers
            .iter()
            .filter_map(|(host, glue)| glue.map(|ip| a_record(host, ip)))
            .collect(),
        ..empty_response()
    }
}
