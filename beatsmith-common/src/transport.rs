//! MCP transport configuration.
//!
//! The MCP façade serves over three transport modes:
//!
//! - **Stdio**: default, for local subprocess clients
//! - **Http**: one-shot JSON-RPC over `POST /mcp`
//! - **Sse**: the same HTTP server, reached through its `GET /sse`
//!   event-stream endpoint
//!
//! Http and Sse share one axum server; the distinction only affects how the
//! mode is reported.

use clap::Args;
use std::fmt;

/// Transport mode for MCP server communication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transport {
    /// Standard input/output transport (default).
    #[default]
    Stdio,
    /// HTTP transport with JSON-RPC and event-stream endpoints.
    Http {
        /// Port to listen on
        port: u16,
    },
    /// Alias for the HTTP transport, advertised as SSE.
    Sse {
        /// Port to listen on
        port: u16,
    },
}

impl Transport {
    /// Get the port if this is a network transport.
    pub fn port(&self) -> Option<u16> {
        match self {
            Transport::Stdio => None,
            Transport::Http { port } | Transport::Sse { port } => Some(*port),
        }
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transport::Stdio => write!(f, "stdio"),
            Transport::Http { port } => write!(f, "http (port {})", port),
            Transport::Sse { port } => write!(f, "sse (port {})", port),
        }
    }
}

/// Command-line arguments for transport configuration.
///
/// Use with `clap::Parser` via `#[command(flatten)]`.
#[derive(Args, Debug, Clone)]
pub struct TransportArgs {
    /// Transport mode: stdio, http, or sse
    #[arg(long, default_value = "stdio", value_parser = parse_transport_mode)]
    pub transport: TransportMode,

    /// Port for HTTP/SSE transport (default: 8080, or from PORT env var)
    #[arg(long, env = "PORT", default_value = "8080")]
    pub port: u16,
}

/// Transport mode parsed from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransportMode {
    #[default]
    Stdio,
    Http,
    Sse,
}

fn parse_transport_mode(s: &str) -> Result<TransportMode, String> {
    match s.to_lowercase().as_str() {
        "stdio" => Ok(TransportMode::Stdio),
        "http" => Ok(TransportMode::Http),
        "sse" => Ok(TransportMode::Sse),
        _ => Err(format!(
            "Invalid transport mode '{}'. Valid options: stdio, http, sse",
            s
        )),
    }
}

impl TransportArgs {
    /// Convert command-line arguments into a Transport configuration.
    pub fn into_transport(self) -> Transport {
        match self.transport {
            TransportMode::Stdio => Transport::Stdio,
            TransportMode::Http => Transport::Http { port: self.port },
            TransportMode::Sse => Transport::Sse { port: self.port },
        }
    }
}

impl Default for TransportArgs {
    fn default() -> Self {
        Self {
            transport: TransportMode::Stdio,
            port: 8080,
        }
    }
}
