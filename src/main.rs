use clap::Parser;

use passforge::api;
use passforge::core::config::ServerConfig;

/// Command line options. The same settings come from the environment (or
/// `.env`); flags win when both are present.
#[derive(Debug, Parser)]
#[command(name = "passforge", about = "Password generation & strength analysis API")]
struct Args {
    /// Address to bind the HTTP server to
    #[arg(long)]
    bind: Option<String>,

    /// HTTP server port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let args = Args::parse();

    let mut config = ServerConfig::load();
    if let Some(bind) = args.bind {
        config.bind_address = bind;
    }
    if let Some(port) = args.port {
        config.port = port;
    }

    log::info!("🔒 Starting {} v{}", passforge::SERVICE_NAME, passforge::VERSION);

    api::start_server(config).await
}
