//! Beatsmith REST API server
//!
//! HTTP API for music and sound effect generation using the ElevenLabs
//! API.

use anyhow::Result;
use beatsmith_common::{Config, tracing::init_tracing};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "beatsmith-api")]
#[command(about = "REST API for ElevenLabs music and sound effect generation")]
struct Args {
    /// Port to listen on (default: 8080, or from PORT env var)
    #[arg(long, env = "PORT", default_value = "8080")]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();
    let config = Config::from_env()?;

    tracing::info!(port = args.port, "beatsmith-api server starting");

    beatsmith_api::serve(config, args.port).await?;

    Ok(())
}
