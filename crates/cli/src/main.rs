use clap::Parser;
use iterdns_domain::CliOverrides;
use tracing::info;

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "iterdns")]
#[command(version)]
#[command(about = "iterdns - iterative DNS resolver walking down from the root servers")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// DNS server port
    #[arg(short = 'd', long)]
    dns_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        dns_port: cli.dns_port,
        bind_address: cli.bind.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting iterdns v{}", env!("CARGO_PKG_VERSION"));

    let dns_services = di::DnsServices::new(&config);

    server::start_dns_server(
        config.server.listen_address(),
        dns_services.handler,
        config.server.max_concurrent_requests,
    )
    .await?;

    info!("Server shutdown complete");
    Ok(())
}
