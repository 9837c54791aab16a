use clap::Parser;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use netpath::{Network, RestApi};

/// Host/link network store with shortest-path queries
#[derive(Parser, Debug)]
#[command(name = "netpath")]
#[command(about = "Answer fewest-hop path queries over a network of hosts", long_about = None)]
struct Args {
    /// HTTP API port
    #[arg(long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// Address the HTTP API binds to
    #[arg(long, env = "NETPATH_BIND", default_value = "0.0.0.0")]
    bind: String,

    /// Log level
    #[arg(long, env = "NETPATH_LOG", default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // try_init also forwards actix's `log` records (access log) into tracing
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install log subscriber: {}", e))?;

    info!("Starting netpath v{}", env!("CARGO_PKG_VERSION"));
    info!("HTTP API port: {}", args.port);

    let network = Arc::new(RwLock::new(Network::new()));

    let bind = args.bind.clone();
    let port = args.port;
    let http_handle = std::thread::spawn(move || {
        let sys = actix_web::rt::System::new();
        sys.block_on(async {
            if let Err(e) = RestApi::start(network, &bind, port).await {
                tracing::error!("HTTP server error: {}", e);
            }
        })
    });

    info!("HTTP API: http://{}:{}/", args.bind, args.port);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        _ = tokio::task::spawn_blocking(move || {
            http_handle.join().ok();
        }) => {
            info!("HTTP server stopped");
        }
    }

    info!("Shutting down...");
    Ok(())
}
