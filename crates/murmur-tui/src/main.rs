//! Murmur TUI entry point.

use clap::Parser;
use murmur_tui::Runtime;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Murmur terminal chat client
#[derive(Parser, Debug)]
#[command(name = "murmur-tui")]
#[command(about = "Terminal client for the murmur chat server")]
#[command(version)]
struct Args {
    /// Base URL of the chat server
    #[arg(short, long, default_value = "http://127.0.0.1:8888")]
    server: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    // Log to stderr so output does not fight the alternate screen.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let runtime = Runtime::new(&args.server)?;
    Ok(runtime.run().await?)
}
