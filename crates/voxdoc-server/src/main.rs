use clap::Parser;

use voxdoc_core::config::Config;
use voxdoc_server::AppState;

#[derive(Parser)]
#[command(
    name = "voxdoc",
    about = "HTTP relay: audio upload -> Groq transcription -> doctor response",
    version
)]
struct Cli {
    /// Port to listen on (default: PORT env var, then 5000)
    #[arg(short, long)]
    port: Option<u16>,

    /// Bind address
    #[arg(long)]
    bind: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();

    let mut config = Config::from_env();
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(bind) = cli.bind {
        config.server.bind = bind;
    }

    let bind = config.server.bind.clone();
    let port = config.server.port;

    // Fails here when no API key is configured.
    let state = AppState::from_config(config)?;

    voxdoc_server::start_server(state, &bind, port).await
}
