//! Beatsmith MCP Server
//!
//! MCP server exposing ElevenLabs music and sound effect generation as
//! tools, over stdio or HTTP/SSE.

pub mod http;
pub mod rpc;
pub mod server;
pub mod tools;

pub use server::BeatsmithServer;
