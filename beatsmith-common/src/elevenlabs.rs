//! ElevenLabs generation client.
//!
//! One operation per upstream capability: music generation, sound-effect
//! generation, connection test, and model listing. Each operation performs a
//! single outbound HTTP call with a per-request timeout and converts every
//! upstream or transport fault into a failure-flagged result. Nothing past
//! this boundary ever sees a raw `reqwest` error.

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use chrono::Local;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::error::Error;

/// Header carrying the caller's credential upstream.
pub const API_KEY_HEADER: &str = "xi-api-key";

/// MIME type of all generated audio.
pub const AUDIO_MIME_TYPE: &str = "audio/mpeg";

/// Upstream floor for music duration in seconds.
pub const MUSIC_MIN_DURATION: u32 = 10;

/// Timeout for generation calls.
const GENERATION_TIMEOUT: Duration = Duration::from_secs(60);

/// Timeout for metadata calls (models listing, connection test).
const METADATA_TIMEOUT: Duration = Duration::from_secs(10);

/// Caller-supplied ElevenLabs API key.
///
/// Never stored beyond the request that carries it; only forwarded in the
/// `xi-api-key` header.
#[derive(Clone)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a caller-supplied key, rejecting empty or whitespace-only input.
    ///
    /// # Errors
    /// Returns `Error::Credential` if the key is empty.
    pub fn new(key: impl Into<String>) -> Result<Self, Error> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(Error::credential(
                "ElevenLabs API key is required. Please provide it in the request.",
            ));
        }
        Ok(Self(key))
    }

    /// The raw key for the upstream auth header.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Optional style hints for composition mode.
#[derive(Debug, Clone, Default)]
pub struct StyleHints {
    /// Music genre (pop, rock, jazz, ...)
    pub genre: Option<String>,
    /// Music mood (happy, sad, energetic, calm, ...)
    pub mood: Option<String>,
    /// Tempo (slow, medium, fast, upbeat)
    pub tempo: Option<String>,
    /// Specific instruments to include
    pub instruments: Option<Vec<String>>,
}

impl StyleHints {
    /// Build the upstream style block, keeping only non-empty hints.
    /// Returns `None` when every hint is absent.
    fn to_settings(&self) -> Option<StyleSettings<'_>> {
        let settings = StyleSettings {
            genre: self.genre.as_deref().filter(|s| !s.is_empty()),
            mood: self.mood.as_deref().filter(|s| !s.is_empty()),
            tempo: self.tempo.as_deref().filter(|s| !s.is_empty()),
            instruments: self.instruments.as_deref().filter(|v| !v.is_empty()),
        };
        if settings.genre.is_none()
            && settings.mood.is_none()
            && settings.tempo.is_none()
            && settings.instruments.is_none()
        {
            None
        } else {
            Some(settings)
        }
    }
}

/// Music generation request.
#[derive(Debug, Clone)]
pub struct MusicRequest {
    /// Text prompt describing the music to generate
    pub prompt: String,
    /// Requested duration in seconds; clamped to the upstream floor and the
    /// configured ceiling before the call
    pub duration_seconds: u32,
    /// Prompt influence (0.0-1.0). Accepted and validated at the façades but
    /// not part of the upstream request body.
    pub prompt_influence: f32,
    /// Enable composition mode for structured music
    pub composition_mode: bool,
    /// Style hints, only attached in composition mode
    pub style: StyleHints,
}

/// Sound effect generation request.
#[derive(Debug, Clone)]
pub struct SoundEffectRequest {
    /// Text prompt describing the sound effect
    pub prompt: String,
    /// Duration in seconds
    pub duration_seconds: u32,
}

/// Result of a generation call. Exactly one variant is populated: either an
/// audio payload or an error message, never both.
#[derive(Debug, Clone)]
pub enum GenerationResult {
    /// Generated audio with its metadata
    Audio(AudioResult),
    /// Upstream or transport failure, as a message
    Failure(String),
}

impl GenerationResult {
    /// Whether the call produced audio.
    pub fn is_success(&self) -> bool {
        matches!(self, GenerationResult::Audio(_))
    }
}

/// Generated audio payload.
#[derive(Debug, Clone, Serialize)]
pub struct AudioResult {
    /// Generated filename, derived from timestamp and a short random id
    pub filename: String,
    /// Base64-encoded audio bytes
    pub audio_base64: String,
    /// Decoded byte length
    pub file_size: usize,
    /// Effective duration in seconds (after clamping)
    pub duration_seconds: u32,
    /// Echo of the caller's prompt
    pub prompt: String,
    /// Always `audio/mpeg`
    pub mime_type: String,
    /// Lyrics extracted from the composition plan (music only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lyrics: Option<String>,
    /// Upstream composition plan, passed through untouched (music only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub composition_plan: Option<Value>,
    /// Upstream song metadata, passed through untouched (music only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub song_metadata: Option<Value>,
}

/// Outcome of the connection test.
#[derive(Debug, Clone, Serialize)]
pub struct ConnectionStatus {
    /// True iff the models endpoint answered HTTP 200
    pub success: bool,
    /// Human-readable status message
    pub message: String,
}

/// Result of the models listing.
#[derive(Debug, Clone)]
pub enum ModelsResult {
    /// Normalized model list
    Models(Vec<Value>),
    /// Upstream or transport failure
    Failure(String),
}

/// Client for the ElevenLabs API, created per call with the caller's key.
pub struct ElevenLabsClient {
    http: reqwest::Client,
    base_url: String,
    api_key: ApiKey,
    max_duration: u32,
}

impl ElevenLabsClient {
    /// Create a client with a fresh connection pool.
    pub fn new(config: &Config, api_key: ApiKey) -> Self {
        Self::with_http(reqwest::Client::new(), config, api_key)
    }

    /// Create a client reusing an existing `reqwest::Client` (the façades
    /// share one pool across requests; cloning it is cheap).
    pub fn with_http(http: reqwest::Client, config: &Config, api_key: ApiKey) -> Self {
        Self {
            http,
            base_url: config.elevenlabs_base_url.clone(),
            api_key,
            max_duration: config.max_duration,
        }
    }

    /// Generate music from a text prompt.
    ///
    /// Issues one POST against the detailed music endpoint. A 200 body is
    /// first interpreted as the structured JSON envelope (audio + lyrics +
    /// metadata); when that parse fails the whole body is treated as a raw
    /// audio file. The upstream contract is genuinely ambiguous here, so the
    /// fallback is explicit rather than resolved one way.
    #[instrument(level = "info", name = "generate_music", skip(self, request))]
    pub async fn generate_music(&self, request: MusicRequest) -> GenerationResult {
        let duration = clamp_music_duration(request.duration_seconds, self.max_duration);
        let endpoint = format!("{}/v1/music/detailed", self.base_url);

        let body = MusicGenerationBody {
            prompt: &request.prompt,
            music_length_ms: u64::from(duration) * 1000,
            composition_mode: request.composition_mode.then_some(true),
            style_settings: if request.composition_mode {
                request.style.to_settings()
            } else {
                None
            },
        };

        info!(prompt = %request.prompt, duration, "Generating music");

        let response = match self
            .http
            .post(&endpoint)
            .header(API_KEY_HEADER, self.api_key.as_str())
            .json(&body)
            .timeout(GENERATION_TIMEOUT)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Music generation request failed");
                return GenerationResult::Failure(e.to_string());
            }
        };

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return GenerationResult::Failure(upstream_error(
                "Music generation failed",
                status.as_u16(),
                &body,
            ));
        }

        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => return GenerationResult::Failure(e.to_string()),
        };

        let (audio_base64, file_size, lyrics, composition_plan, song_metadata) =
            match serde_json::from_slice::<DetailedMusicResponse>(&bytes) {
                Ok(parsed) => {
                    // Structured envelope: a string audio field is already
                    // base64 and passes through unchanged.
                    let audio_base64 = match parsed.audio {
                        Some(Value::String(s)) => s,
                        _ => String::new(),
                    };
                    let file_size = BASE64
                        .decode(audio_base64.as_bytes())
                        .map(|decoded| decoded.len())
                        .unwrap_or(0);
                    let plan = parsed.composition_plan.unwrap_or_else(empty_object);
                    let lyrics = extract_lyrics(&plan);
                    let metadata = parsed.song_metadata.unwrap_or_else(empty_object);
                    debug!(lyrics_len = lyrics.len(), "Music generated with JSON response");
                    (audio_base64, file_size, lyrics, plan, metadata)
                }
                Err(_) => {
                    debug!("Detailed endpoint returned binary, treating as audio file");
                    (
                        BASE64.encode(&bytes),
                        bytes.len(),
                        String::new(),
                        empty_object(),
                        empty_object(),
                    )
                }
            };

        let filename = generated_filename("music");
        info!(%filename, file_size, has_lyrics = !lyrics.is_empty(), "Music generated");

        GenerationResult::Audio(AudioResult {
            filename,
            audio_base64,
            file_size,
            duration_seconds: duration,
            prompt: request.prompt,
            mime_type: AUDIO_MIME_TYPE.to_string(),
            lyrics: Some(lyrics),
            composition_plan: Some(composition_plan),
            song_metadata: Some(song_metadata),
        })
    }

    /// Generate a sound effect from a text prompt. The entire 200 body is
    /// the raw audio file.
    #[instrument(level = "info", name = "generate_sound_effect", skip(self, request))]
    pub async fn generate_sound_effect(&self, request: SoundEffectRequest) -> GenerationResult {
        let endpoint = format!("{}/v1/sound-generation", self.base_url);

        let body = SoundGenerationBody {
            text: &request.prompt,
            duration_seconds: request.duration_seconds,
        };

        info!(prompt = %request.prompt, duration = request.duration_seconds, "Generating sound effect");

        let response = match self
            .http
            .post(&endpoint)
            .header(API_KEY_HEADER, self.api_key.as_str())
            .json(&body)
            .timeout(GENERATION_TIMEOUT)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Sound generation request failed");
                return GenerationResult::Failure(e.to_string());
            }
        };

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return GenerationResult::Failure(upstream_error(
                "Sound generation failed",
                status.as_u16(),
                &body,
            ));
        }

        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => return GenerationResult::Failure(e.to_string()),
        };

        let filename = generated_filename("sound");
        info!(%filename, file_size = bytes.len(), "Sound effect generated");

        GenerationResult::Audio(AudioResult {
            filename,
            audio_base64: BASE64.encode(&bytes),
            file_size: bytes.len(),
            duration_seconds: request.duration_seconds,
            prompt: request.prompt,
            mime_type: AUDIO_MIME_TYPE.to_string(),
            lyrics: None,
            composition_plan: None,
            song_metadata: None,
        })
    }

    /// Test the upstream connection. Success is solely HTTP 200 from the
    /// models endpoint; the body is ignored.
    #[instrument(level = "debug", name = "test_connection", skip(self))]
    pub async fn test_connection(&self) -> ConnectionStatus {
        let endpoint = format!("{}/v1/models", self.base_url);

        match self
            .http
            .get(&endpoint)
            .header(API_KEY_HEADER, self.api_key.as_str())
            .timeout(METADATA_TIMEOUT)
            .send()
            .await
        {
            Ok(response) if response.status() == StatusCode::OK => ConnectionStatus {
                success: true,
                message: "Connection successful".to_string(),
            },
            Ok(response) => ConnectionStatus {
                success: false,
                message: format!("API test failed: {}", response.status().as_u16()),
            },
            Err(e) => {
                warn!(error = %e, "Connection test failed");
                ConnectionStatus {
                    success: false,
                    message: format!("Connection error: {e}"),
                }
            }
        }
    }

    /// List available models. The upstream body may be a raw list or an
    /// object with a `models` key; both normalize to a list.
    #[instrument(level = "debug", name = "get_available_models", skip(self))]
    pub async fn get_available_models(&self) -> ModelsResult {
        let endpoint = format!("{}/v1/models", self.base_url);

        let response = match self
            .http
            .get(&endpoint)
            .header(API_KEY_HEADER, self.api_key.as_str())
            .timeout(METADATA_TIMEOUT)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Models request failed");
                return ModelsResult::Failure(e.to_string());
            }
        };

        let status = response.status();
        if status != StatusCode::OK {
            return ModelsResult::Failure(format!("HTTP {}", status.as_u16()));
        }

        match response.json::<ModelsBody>().await {
            Ok(body) => {
                let models = body.into_list();
                debug!(count = models.len(), "Retrieved models");
                ModelsResult::Models(models)
            }
            Err(e) => ModelsResult::Failure(e.to_string()),
        }
    }
}

/// Clamp a requested music duration to the upstream floor and the configured
/// ceiling.
pub fn clamp_music_duration(requested: u32, max_duration: u32) -> u32 {
    let ceiling = max_duration.max(MUSIC_MIN_DURATION);
    requested.clamp(MUSIC_MIN_DURATION, ceiling)
}

/// Extract lyrics from a composition plan.
///
/// Per section with non-empty lines: an optional bracketed section-name
/// header, the lines joined by newlines, then a blank separator line.
pub fn extract_lyrics(composition_plan: &Value) -> String {
    let mut lyrics = String::new();

    let Some(sections) = composition_plan.get("sections").and_then(Value::as_array) else {
        return lyrics;
    };

    for section in sections {
        let lines: Vec<&str> = section
            .get("lines")
            .and_then(Value::as_array)
            .map(|lines| lines.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();

        if lines.is_empty() {
            continue;
        }

        if let Some(name) = section
            .get("section_name")
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
        {
            lyrics.push('[');
            lyrics.push_str(name);
            lyrics.push_str("]\n");
        }

        lyrics.push_str(&lines.join("\n"));
        lyrics.push_str("\n\n");
    }

    lyrics
}

fn generated_filename(kind: &str) -> String {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let id = Uuid::new_v4().to_string();
    format!("{kind}_{timestamp}_{}.mp3", &id[..8])
}

fn upstream_error(operation: &str, status: u16, body: &str) -> String {
    // Prefer the structured upstream detail when the body parses as JSON.
    match serde_json::from_str::<Value>(body) {
        Ok(detail) => format!("{operation}: HTTP {status} - {detail}"),
        Err(_) => format!("{operation}: HTTP {status} - {body}"),
    }
}

fn empty_object() -> Value {
    Value::Object(serde_json::Map::new())
}

// =============================================================================
// Upstream request/response bodies
// =============================================================================

#[derive(Debug, Serialize)]
struct MusicGenerationBody<'a> {
    prompt: &'a str,
    music_length_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    composition_mode: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    style_settings: Option<StyleSettings<'a>>,
}

#[derive(Debug, Serialize)]
struct StyleSettings<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    genre: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mood: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tempo: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    instruments: Option<&'a [String]>,
}

#[derive(Debug, Serialize)]
struct SoundGenerationBody<'a> {
    text: &'a str,
    duration_seconds: u32,
}

#[derive(Debug, Deserialize)]
struct DetailedMusicResponse {
    #[serde(default)]
    audio: Option<Value>,
    #[serde(default)]
    composition_plan: Option<Value>,
    #[serde(default)]
    song_metadata: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ModelsBody {
    List(Vec<Value>),
    Object {
        #[serde(default)]
        models: Vec<Value>,
    },
}

impl ModelsBody {
    fn into_list(self) -> Vec<Value> {
        match self {
            ModelsBody::List(models) => models,
            ModelsBody::Object { models } => models,
        }
    }
}
