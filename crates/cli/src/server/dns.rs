use iterdns_infrastructure::dns::server::{serve_udp, DnsServerHandler};
use socket2::{Domain, Protocol, Socket, Type};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tracing::info;

pub async fn start_dns_server(
    bind_addr: String,
    handler: Arc<DnsServerHandler>,
    max_concurrent_requests: Option<usize>,
) -> anyhow::Result<()> {
    let socket_addr: SocketAddr = bind_addr.parse()?;
    let socket = Arc::new(create_udp_socket(socket_addr)?);

    match max_concurrent_requests {
        Some(limit) => info!(bind_address = %socket_addr, limit, "DNS server ready"),
        None => info!(bind_address = %socket_addr, "DNS server ready (no concurrency limit)"),
    }

    serve_udp(socket, handler, max_concurrent_requests).await;
    Ok(())
}

fn create_udp_socket(socket_addr: SocketAddr) -> anyhow::Result<UdpSocket> {
    let domain = if socket_addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.bind(&socket_addr.into())?;
    socket.set_nonblocking(true)?;
    let std_socket: std::net::UdpSocket = socket.into();
    Ok(UdpSocket::from_std(std_socket)?)
}
