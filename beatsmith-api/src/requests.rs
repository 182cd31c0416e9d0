//! REST request bodies and their validation.
//!
//! Bounds mirror what the service accepts: prompts are length-limited,
//! durations and prompt influence are range-checked, and every endpoint
//! that reaches upstream requires the caller's ElevenLabs API key.

use serde::Deserialize;

/// Maximum prompt length for music generation.
pub const MUSIC_PROMPT_MAX: usize = 1000;
/// Maximum prompt length for sound effect generation.
pub const SOUND_PROMPT_MAX: usize = 500;
/// Accepted music duration range in seconds.
pub const MUSIC_DURATION_RANGE: std::ops::RangeInclusive<u32> = 1..=30;
/// Accepted sound effect duration range in seconds.
pub const SOUND_DURATION_RANGE: std::ops::RangeInclusive<u32> = 1..=15;

/// Body of `POST /generate-music`.
#[derive(Debug, Deserialize)]
pub struct MusicGenerationRequest {
    /// Text prompt describing the music to generate
    pub prompt: String,
    /// Duration in seconds (1-30)
    #[serde(default)]
    pub duration_seconds: Option<u32>,
    /// How closely to follow the prompt (0.0-1.0)
    #[serde(default)]
    pub prompt_influence: Option<f32>,
    /// Enable composition mode for structured music
    #[serde(default)]
    pub composition_mode: Option<bool>,
    /// Music genre (pop, rock, jazz, ...)
    #[serde(default)]
    pub genre: Option<String>,
    /// Music mood (happy, sad, energetic, calm, ...)
    #[serde(default)]
    pub mood: Option<String>,
    /// Tempo (slow, medium, fast, upbeat)
    #[serde(default)]
    pub tempo: Option<String>,
    /// Specific instruments to include
    #[serde(default)]
    pub instruments: Option<Vec<String>>,
    /// The caller's ElevenLabs API key
    pub elevenlabs_api_key: String,
}

impl MusicGenerationRequest {
    /// Validate field bounds, collecting every violation.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        validate_prompt(&self.prompt, MUSIC_PROMPT_MAX, &mut errors);
        if let Some(duration) = self.duration_seconds {
            if !MUSIC_DURATION_RANGE.contains(&duration) {
                errors.push("duration_seconds must be between 1 and 30".to_string());
            }
        }
        if let Some(influence) = self.prompt_influence {
            if !(0.0..=1.0).contains(&influence) {
                errors.push("prompt_influence must be between 0.0 and 1.0".to_string());
            }
        }
        errors
    }
}

/// Body of `POST /generate-sound`.
#[derive(Debug, Deserialize)]
pub struct SoundEffectRequest {
    /// Text prompt describing the sound effect
    pub prompt: String,
    /// Duration in seconds (1-15)
    #[serde(default)]
    pub duration_seconds: Option<u32>,
    /// The caller's ElevenLabs API key
    pub elevenlabs_api_key: String,
}

impl SoundEffectRequest {
    /// Validate field bounds, collecting every violation.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        validate_prompt(&self.prompt, SOUND_PROMPT_MAX, &mut errors);
        if let Some(duration) = self.duration_seconds {
            if !SOUND_DURATION_RANGE.contains(&duration) {
                errors.push("duration_seconds must be between 1 and 15".to_string());
            }
        }
        errors
    }
}

/// Body of the endpoints that only need the caller's credential.
#[derive(Debug, Deserialize)]
pub struct ApiKeyRequest {
    /// The caller's ElevenLabs API key
    pub elevenlabs_api_key: String,
}

fn validate_prompt(prompt: &str, max: usize, errors: &mut Vec<String>) {
    if prompt.trim().is_empty() {
        errors.push("prompt cannot be empty".to_string());
    } else if prompt.chars().count() > max {
        errors.push(format!("prompt cannot exceed {max} characters"));
    }
}
