//! Beatsmith REST API
//!
//! REST façade over the ElevenLabs generation client: music, sound
//! effects, connection testing, model listing, and the static example
//! catalog.

pub mod requests;
pub mod routes;

pub use routes::{AppState, router, serve};
