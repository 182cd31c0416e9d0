//! Beatsmith MCP Server
//!
//! MCP server for music and sound effect generation using the ElevenLabs
//! API.

use anyhow::Result;
use beatsmith_common::{Config, Transport, TransportArgs, serve_stdio, tracing::init_tracing};
use beatsmith_mcp::BeatsmithServer;
use beatsmith_mcp::http;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "beatsmith-mcp")]
#[command(about = "MCP server for ElevenLabs music and sound effect generation")]
struct Args {
    #[command(flatten)]
    transport: TransportArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();
    let config = Config::from_env()?;
    let transport = args.transport.into_transport();

    tracing::info!(%transport, "beatsmith-mcp server starting");

    match transport {
        Transport::Stdio => {
            serve_stdio(BeatsmithServer::new(config)).await?;
        }
        Transport::Http { port } => {
            http::serve(config, port, "http").await?;
        }
        Transport::Sse { port } => {
            http::serve(config, port, "sse").await?;
        }
    }

    Ok(())
}
