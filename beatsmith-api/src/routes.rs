//! REST routes.
//!
//! Seven endpoints over one shared state: discovery and health probes,
//! the four generation/metadata operations, and the static example
//! catalog. Validation and credential failures answer 400; upstream
//! failures come back as 200 with `success: false`, since the request
//! itself was well-formed.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use beatsmith_common::{
    ApiKey, Config, ElevenLabsClient, MusicRequest, ServerError, SoundEffectRequest as SoundRequest,
    StyleHints, formatter, wait_for_shutdown_signal,
};
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::requests::{ApiKeyRequest, MusicGenerationRequest, SoundEffectRequest};

/// Shared state for the REST façade.
pub struct AppState {
    config: Config,
    /// Shared connection pool; cloned per request
    http: reqwest::Client,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }
}

/// Build the REST router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/generate-music", post(generate_music_handler))
        .route("/generate-sound", post(generate_sound_handler))
        .route("/test-connection", post(test_connection_handler))
        .route("/models", post(models_handler))
        .route("/examples", get(examples_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Run the REST façade until a shutdown signal arrives.
pub async fn serve(config: Config, port: u16) -> Result<(), ServerError> {
    let state = Arc::new(AppState::new(config));
    let app = router(state);

    let addr = format!("0.0.0.0:{port}");
    let listener =
        tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| ServerError::BindFailed {
                port,
                message: e.to_string(),
            })?;

    info!(%addr, "REST API server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await
        .map_err(ServerError::Io)
}

fn bad_request(detail: impl Into<String>) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "detail": detail.into() }))).into_response()
}

/// Resolve the caller's key, or answer 400.
fn api_key(raw: &str) -> Result<ApiKey, Response> {
    ApiKey::new(raw).map_err(|e| bad_request(e.to_string()))
}

async fn root_handler(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "message": "Beatsmith Music Generation API",
        "version": state.config.server_version,
        "description": "Generate music with lyrics and sound effects using your ElevenLabs API key",
        "endpoints": {
            "generate_music": "POST /generate-music",
            "generate_sound": "POST /generate-sound",
            "test_connection": "POST /test-connection",
            "models": "POST /models",
            "examples": "GET /examples",
        },
        "note": "All endpoints require your own ElevenLabs API key",
    }))
}

async fn health_handler(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": format!("{}-api", state.config.server_name),
        "version": state.config.server_version,
    }))
}

async fn generate_music_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<MusicGenerationRequest>,
) -> Response {
    let errors = request.validate();
    if !errors.is_empty() {
        return bad_request(errors.join("; "));
    }
    let key = match api_key(&request.elevenlabs_api_key) {
        Ok(key) => key,
        Err(response) => return response,
    };

    let client = ElevenLabsClient::with_http(state.http.clone(), &state.config, key);
    let result = client
        .generate_music(MusicRequest {
            prompt: request.prompt,
            duration_seconds: request
                .duration_seconds
                .unwrap_or(state.config.default_duration),
            prompt_influence: request
                .prompt_influence
                .unwrap_or(state.config.default_prompt_influence),
            composition_mode: request.composition_mode.unwrap_or(false),
            style: StyleHints {
                genre: request.genre,
                mood: request.mood,
                tempo: request.tempo,
                instruments: request.instruments,
            },
        })
        .await;

    Json(formatter::audio_json(&result)).into_response()
}

async fn generate_sound_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SoundEffectRequest>,
) -> Response {
    let errors = request.validate();
    if !errors.is_empty() {
        return bad_request(errors.join("; "));
    }
    let key = match api_key(&request.elevenlabs_api_key) {
        Ok(key) => key,
        Err(response) => return response,
    };

    let client = ElevenLabsClient::with_http(state.http.clone(), &state.config, key);
    let result = client
        .generate_sound_effect(SoundRequest {
            prompt: request.prompt,
            duration_seconds: request
                .duration_seconds
                .unwrap_or(state.config.default_sound_duration),
        })
        .await;

    Json(formatter::audio_json(&result)).into_response()
}

async fn test_connection_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ApiKeyRequest>,
) -> Response {
    let key = match api_key(&request.elevenlabs_api_key) {
        Ok(key) => key,
        Err(response) => return response,
    };

    let client = ElevenLabsClient::with_http(state.http.clone(), &state.config, key);
    let status = client.test_connection().await;
    Json(formatter::connection_json(&status)).into_response()
}

async fn models_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ApiKeyRequest>,
) -> Response {
    let key = match api_key(&request.elevenlabs_api_key) {
        Ok(key) => key,
        Err(response) => return response,
    };

    let client = ElevenLabsClient::with_http(state.http.clone(), &state.config, key);
    let result = client.get_available_models().await;
    Json(formatter::models_json(&result)).into_response()
}

async fn examples_handler() -> Json<Value> {
    Json(formatter::examples_json())
}
