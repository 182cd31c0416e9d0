//! Server runtime utilities: stdio MCP serving and graceful shutdown.

use rmcp::{ServerHandler, ServiceExt};
use thiserror::Error;
use tokio::sync::oneshot;

/// Errors that can occur when running a server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Failed to bind to the specified port
    #[error("Failed to bind to port {port}: {message}")]
    BindFailed { port: u16, message: String },

    /// Transport error during communication
    #[error("Transport error: {0}")]
    Transport(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Run an MCP handler over stdio until the peer disconnects or a shutdown
/// signal arrives.
pub async fn serve_stdio<H>(handler: H) -> Result<(), ServerError>
where
    H: ServerHandler + Send + Sync + 'static,
{
    use rmcp::transport::io::stdio;

    let service = handler
        .serve(stdio())
        .await
        .map_err(|e| ServerError::Transport(e.to_string()))?;

    tokio::select! {
        result = service.waiting() => {
            result.map_err(|e| ServerError::Transport(e.to_string()))?;
            Ok(())
        }
        _ = wait_for_shutdown_signal() => {
            tracing::info!("Received shutdown signal, stopping server");
            Ok(())
        }
    }
}

/// Wait for a shutdown signal (SIGTERM or SIGINT).
pub async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut sigterm =
            signal(SignalKind::terminate()).expect("Failed to register SIGTERM handler");
        let mut sigint =
            signal(SignalKind::interrupt()).expect("Failed to register SIGINT handler");

        tokio::select! {
            _ = sigterm.recv() => {
                tracing::info!("Received SIGTERM");
            }
            _ = sigint.recv() => {
                tracing::info!("Received SIGINT");
            }
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to register Ctrl+C handler");
        tracing::info!("Received Ctrl+C");
    }
}

/// Convenience function to set up graceful shutdown handling.
///
/// Returns a sender that can trigger shutdown programmatically, and a
/// receiver to await alongside the server task.
pub fn shutdown_channel() -> (oneshot::Sender<()>, oneshot::Receiver<()>) {
    oneshot::channel()
}
