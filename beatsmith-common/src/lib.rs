//! Beatsmith Common Library
//!
//! Shared configuration, error handling, tracing, the ElevenLabs generation
//! client, response formatting, and the static example catalog consumed by
//! both the REST and MCP façades.

pub mod catalog;
pub mod config;
pub mod elevenlabs;
pub mod error;
pub mod formatter;
pub mod server;
pub mod tracing;
pub mod transport;


pub use config::Config;
pub use elevenlabs::{
    ApiKey, AudioResult, ConnectionStatus, ElevenLabsClient, GenerationResult, ModelsResult,
    MusicRequest, SoundEffectRequest, StyleHints,
};
pub use error::{ConfigError, Error, Result};
pub use server::{ServerError, serve_stdio, shutdown_channel, wait_for_shutdown_signal};
pub use transport::{Transport, TransportArgs, TransportMode};
