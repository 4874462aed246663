use clap::Parser;
use a2cname_domain::CliOverrides;
use a2cname_infrastructure::dns::DnsServerHandler;
use tracing::info;

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "a2cname")]
#[command(version)]
#[command(about = "DNS server that answers A queries in selected zones with a CNAME derived from the upstream address")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Corefile-style `a2cname { ... }` stanza replacing the [a2cname] table
    #[arg(long, value_name = "FILE")]
    directive: Option<String>,

    /// DNS server port
    #[arg(short = 'd', long)]
    dns_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Upstream used to resolve A records (host:port, udp://, tcp://)
    #[arg(short = 'u', long)]
    upstream: Option<String>,

    /// Upstream that receives every query the rewriter does not answer
    #[arg(short = 'f', long)]
    forward: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let directive = cli
        .directive
        .as_deref()
        .map(bootstrap::read_directive)
        .transpose()?;

    let cli_overrides = CliOverrides {
        dns_port: cli.dns_port,
        bind_address: cli.bind.clone(),
        log_level: cli.log_level.clone(),
        upstream: cli.upstream.clone(),
        forward: cli.forward.clone(),
        directive,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting a2cname v{}", env!("CARGO_PKG_VERSION"));

    let chain = di::build_handler_chain(&config)?;
    let handler = DnsServerHandler::new(chain);

    let num_workers = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);

    tokio::select! {
        result = server::start_dns_server(config.server.listen_address(), handler, num_workers) => result?,
        _ = tokio::signal::ctrl_c() => info!("Shutdown signal received"),
    }

    info!("Server shutdown complete");
    Ok(())
}
