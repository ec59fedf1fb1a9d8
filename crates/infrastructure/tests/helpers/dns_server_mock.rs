#![allow(dead_code)]
use hickory_proto::op::{Message, MessageType, OpCode, ResponseCode};
use hickory_proto::rr::rdata::A;
use hickory_proto::rr::{RData, Record};
use iterdns_infrastructure::dns::MessageBuilder;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::{Arc, Mutex};
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

/// What the mock authority sends back for every query it receives.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Authoritative answer with one A record per address
    Authoritative(Vec<Ipv4Addr>),
    /// Non-authoritative, empty authority section
    NoDelegation,
    /// Well-formed reply with an empty question section
    NoQuestion,
    /// Bytes that do not decode as a DNS message
    Garbage,
    /// Never answers
    Silent,
}

/// Loopback upstream authority.
pub struct MockDnsServer {
    addr: SocketAddr,
    seen_ids: Arc<Mutex<Vec<u16>>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start(reply: MockReply) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let local_addr = socket.local_addr()?;
        let seen_ids = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&seen_ids);

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            if len >= 2 {
                                seen.lock().unwrap().push(u16::from_be_bytes([buf[0], buf[1]]));
                            }
                            if let Some(response) = Self::build_mock_response(&buf[..len], &reply) {
                                let _ = socket.send_to(&response, peer).await;
                            }
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr: local_addr,
            seen_ids,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    pub fn seen_ids(&self) -> Vec<u16> {
        self.seen_ids.lock().unwrap().clone()
    }

    fn build_mock_response(query: &[u8], reply: &MockReply) -> Option<Vec<u8>> {
        let request = MessageBuilder::parse(query).ok()?;
        let mut response = Message::new(request.id(), MessageType::Response, OpCode::Query);

        match reply {
            MockReply::Silent => return None,
            MockReply::Garbage => return Some(vec![0xff, 0x00, 0x13]),
            MockReply::NoQuestion => {}
            MockReply::NoDelegation => {
                response.add_queries(request.queries().to_vec());
                response.set_response_code(ResponseCode::NoError);
            }
            MockReply::Authoritative(addrs) => {
                response.add_queries(request.queries().to_vec());
                response.set_authoritative(true);
                let owner = request.queries().first()?.name().clone();
                for addr in addrs {
                    response.add_answer(Record::from_rdata(owner.clone(), 60, RData::A(A(*addr))));
                }
            }
        }

        MessageBuilder::serialize_message(&response).ok()
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
