//! Tool catalog and dispatch.
//!
//! The five tools exposed over MCP, as a closed enum. Both transports
//! (the rmcp stdio handler and the hand-rolled HTTP/SSE endpoints) go
//! through [`dispatch`], so tool behavior cannot differ between them.

use beatsmith_common::error::Error;
use beatsmith_common::{ApiKey, Config, ElevenLabsClient, MusicRequest, SoundEffectRequest, StyleHints, formatter};
use rmcp::model::Tool;
use schemars::{JsonSchema, schema_for};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::borrow::Cow;
use std::sync::Arc;
use tracing::info;

/// Tool parameters for generate_music.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct GenerateMusicParams {
    /// Text prompt describing the music to generate
    pub prompt: String,
    /// Duration in seconds (10-30, default 10)
    #[serde(default)]
    pub duration_seconds: Option<u32>,
    /// How closely to follow the prompt (0.0-1.0, default 0.3)
    #[serde(default)]
    pub prompt_influence: Option<f32>,
    /// Enable composition mode for structured, professional music
    #[serde(default)]
    pub composition_mode: Option<bool>,
    /// Music genre (pop, rock, jazz, electronic, classical, ...)
    #[serde(default)]
    pub genre: Option<String>,
    /// Music mood (happy, sad, energetic, calm, romantic, ...)
    #[serde(default)]
    pub mood: Option<String>,
    /// Tempo (slow, medium, fast, upbeat)
    #[serde(default)]
    pub tempo: Option<String>,
    /// Specific instruments to include
    #[serde(default)]
    pub instruments: Option<Vec<String>>,
    /// Your ElevenLabs API key
    #[serde(default)]
    pub elevenlabs_api_key: Option<String>,
}

impl GenerateMusicParams {
    fn into_request(self, config: &Config) -> MusicRequest {
        MusicRequest {
            prompt: self.prompt,
            duration_seconds: self.duration_seconds.unwrap_or(config.default_duration),
            prompt_influence: self
                .prompt_influence
                .unwrap_or(config.default_prompt_influence),
            composition_mode: self.composition_mode.unwrap_or(false),
            style: StyleHints {
                genre: self.genre,
                mood: self.mood,
                tempo: self.tempo,
                instruments: self.instruments,
            },
        }
    }
}

/// Tool parameters for generate_sound_effect.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct GenerateSoundEffectParams {
    /// Text prompt describing the sound effect
    pub prompt: String,
    /// Duration in seconds (1-15, default 5)
    #[serde(default)]
    pub duration_seconds: Option<u32>,
    /// Your ElevenLabs API key
    #[serde(default)]
    pub elevenlabs_api_key: Option<String>,
}

/// Tool parameters for tools that only need the caller's credential.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ApiKeyParams {
    /// Your ElevenLabs API key
    #[serde(default)]
    pub elevenlabs_api_key: Option<String>,
}

/// The closed set of tools this server exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    GenerateMusic,
    GenerateSoundEffect,
    TestConnection,
    GetModels,
    GetExamples,
}

impl ToolKind {
    /// Every tool, in the order the catalog lists them.
    pub const ALL: [ToolKind; 5] = [
        ToolKind::GenerateMusic,
        ToolKind::GenerateSoundEffect,
        ToolKind::TestConnection,
        ToolKind::GetModels,
        ToolKind::GetExamples,
    ];

    /// Look up a tool by its wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "generate_music" => Some(ToolKind::GenerateMusic),
            "generate_sound_effect" => Some(ToolKind::GenerateSoundEffect),
            "test_elevenlabs_connection" => Some(ToolKind::TestConnection),
            "get_available_models" => Some(ToolKind::GetModels),
            "get_music_examples" => Some(ToolKind::GetExamples),
            _ => None,
        }
    }

    /// The tool's wire name.
    pub fn name(&self) -> &'static str {
        match self {
            ToolKind::GenerateMusic => "generate_music",
            ToolKind::GenerateSoundEffect => "generate_sound_effect",
            ToolKind::TestConnection => "test_elevenlabs_connection",
            ToolKind::GetModels => "get_available_models",
            ToolKind::GetExamples => "get_music_examples",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            ToolKind::GenerateMusic => {
                "Generate music from a text prompt using the ElevenLabs API. \
                 Supports composition mode with genre, mood, tempo, and \
                 instrument hints. Returns base64-encoded MP3 data with \
                 lyrics and song metadata when available."
            }
            ToolKind::GenerateSoundEffect => {
                "Generate a sound effect from a text prompt using the \
                 ElevenLabs API. Returns base64-encoded MP3 data."
            }
            ToolKind::TestConnection => {
                "Test connectivity to the ElevenLabs API with your API key."
            }
            ToolKind::GetModels => "List the models available from the ElevenLabs API.",
            ToolKind::GetExamples => {
                "Get example prompts and usage tips for music and sound \
                 effect generation. Requires no API key."
            }
        }
    }

    fn input_schema(&self) -> Arc<serde_json::Map<String, Value>> {
        let schema = match self {
            ToolKind::GenerateMusic => schema_for!(GenerateMusicParams),
            ToolKind::GenerateSoundEffect => schema_for!(GenerateSoundEffectParams),
            ToolKind::TestConnection | ToolKind::GetModels => schema_for!(ApiKeyParams),
            ToolKind::GetExamples => {
                return Arc::new(empty_object_schema());
            }
        };
        let schema_value = serde_json::to_value(&schema).unwrap_or_default();
        match schema_value {
            Value::Object(map) => Arc::new(map),
            _ => Arc::new(serde_json::Map::new()),
        }
    }

    /// Whether calls to this tool must carry an ElevenLabs API key.
    pub fn requires_credential(&self) -> bool {
        !matches!(self, ToolKind::GetExamples)
    }
}

fn empty_object_schema() -> serde_json::Map<String, Value> {
    let mut map = serde_json::Map::new();
    map.insert("type".to_string(), Value::String("object".to_string()));
    map.insert("properties".to_string(), Value::Object(serde_json::Map::new()));
    map
}

/// The full tool catalog, as advertised by `tools/list`.
pub fn catalog() -> Vec<Tool> {
    ToolKind::ALL
        .iter()
        .map(|kind| Tool {
            name: Cow::Borrowed(kind.name()),
            description: Some(Cow::Borrowed(kind.description())),
            input_schema: kind.input_schema(),
            annotations: None,
            icons: None,
            meta: None,
            output_schema: None,
            title: None,
        })
        .collect()
}

/// Dispatch one tool call and render its text result.
///
/// Checks happen in a fixed order: unknown tool, then credential, then
/// parameter shape. Upstream and transport faults never surface as errors
/// here; they come back as formatted failure text.
///
/// # Errors
/// `Error::UnknownTool` for names outside the catalog, `Error::Credential`
/// when a tool requiring a key gets none, `Error::Validation` for
/// malformed or out-of-range parameters.
pub async fn dispatch(
    config: &Config,
    http: reqwest::Client,
    name: &str,
    arguments: Value,
) -> Result<String, Error> {
    let Some(kind) = ToolKind::from_name(name) else {
        return Err(Error::unknown_tool(name));
    };

    info!(tool = name, "Dispatching tool call");

    if kind == ToolKind::GetExamples {
        return Ok(formatter::examples_text());
    }

    let api_key = extract_api_key(&arguments)?;
    let client = ElevenLabsClient::with_http(http, config, api_key);

    match kind {
        ToolKind::GenerateMusic => {
            let params: GenerateMusicParams = parse_params(arguments)?;
            validate_prompt(&params.prompt)?;
            if let Some(influence) = params.prompt_influence {
                if !(0.0..=1.0).contains(&influence) {
                    return Err(Error::validation(
                        "prompt_influence must be between 0.0 and 1.0",
                    ));
                }
            }
            let result = client.generate_music(params.into_request(config)).await;
            Ok(formatter::audio_text(&result))
        }
        ToolKind::GenerateSoundEffect => {
            let params: GenerateSoundEffectParams = parse_params(arguments)?;
            validate_prompt(&params.prompt)?;
            let request = SoundEffectRequest {
                prompt: params.prompt,
                duration_seconds: params
                    .duration_seconds
                    .unwrap_or(config.default_sound_duration),
            };
            let result = client.generate_sound_effect(request).await;
            Ok(formatter::audio_text(&result))
        }
        ToolKind::TestConnection => {
            let status = client.test_connection().await;
            Ok(formatter::connection_text(&status))
        }
        ToolKind::GetModels => {
            let result = client.get_available_models().await;
            Ok(formatter::models_text(&result))
        }
        ToolKind::GetExamples => unreachable!("handled above"),
    }
}

fn extract_api_key(arguments: &Value) -> Result<ApiKey, Error> {
    let raw = arguments
        .get("elevenlabs_api_key")
        .and_then(Value::as_str)
        .unwrap_or_default();
    ApiKey::new(raw)
}

fn parse_params<T: DeserializeOwned>(arguments: Value) -> Result<T, Error> {
    serde_json::from_value(arguments)
        .map_err(|e| Error::validation(format!("Invalid parameters: {e}")))
}

fn validate_prompt(prompt: &str) -> Result<(), Error> {
    if prompt.trim().is_empty() {
        return Err(Error::validation("prompt cannot be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_config() -> Config {
        Config::default()
    }

    async fn dispatch_test(name: &str, arguments: Value) -> Result<String, Error> {
        dispatch(&test_config(), reqwest::Client::new(), name, arguments).await
    }

    #[test]
    fn test_catalog_lists_all_five_tools() {
        let tools = catalog();
        let names: Vec<&str> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert_eq!(
            names,
            vec![
                "generate_music",
                "generate_sound_effect",
                "test_elevenlabs_connection",
                "get_available_models",
                "get_music_examples",
            ]
        );
    }

    #[test]
    fn test_catalog_entries_have_descriptions_and_schemas() {
        for tool in catalog() {
            assert!(tool.description.is_some(), "{} lacks description", tool.name);
            assert_eq!(
                tool.input_schema.get("type").and_then(Value::as_str),
                Some("object"),
                "{} schema is not an object",
                tool.name
            );
        }
    }

    #[test]
    fn test_music_schema_requires_prompt() {
        let tools = catalog();
        let music = tools.iter().find(|t| t.name == "generate_music").unwrap();
        let required = music
            .input_schema
            .get("required")
            .and_then(Value::as_array)
            .unwrap();
        assert!(required.iter().any(|v| v == "prompt"));
        // Only the prompt is required; everything else has defaults
        assert_eq!(required.len(), 1);
    }

    #[test]
    fn test_from_name_round_trips() {
        for kind in ToolKind::ALL {
            assert_eq!(ToolKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(ToolKind::from_name("generate_vibes"), None);
    }

    #[test]
    fn test_only_examples_skips_credential() {
        for kind in ToolKind::ALL {
            assert_eq!(kind.requires_credential(), kind != ToolKind::GetExamples);
        }
    }

    #[tokio::test]
    async fn test_dispatch_unknown_tool() {
        let result = dispatch_test("generate_vibes", json!({})).await;
        assert!(matches!(result, Err(Error::UnknownTool(name)) if name == "generate_vibes"));
    }

    #[tokio::test]
    async fn test_dispatch_missing_key_is_credential_error() {
        let result = dispatch_test("generate_music", json!({"prompt": "jazz"})).await;
        assert!(matches!(result, Err(Error::Credential(_))));
    }

    #[tokio::test]
    async fn test_dispatch_missing_key_makes_no_upstream_request() {
        use wiremock::matchers::method;
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let config = Config {
            elevenlabs_base_url: server.uri(),
            ..Config::default()
        };
        let result = dispatch(
            &config,
            reqwest::Client::new(),
            "generate_music",
            json!({"prompt": "jazz"}),
        )
        .await;
        assert!(matches!(result, Err(Error::Credential(_))));
        // MockServer verifies the zero-call expectation on drop
    }

    #[tokio::test]
    async fn test_dispatch_credential_checked_before_params() {
        // Broken parameters, but no key either: the credential error wins
        let result = dispatch_test("generate_music", json!({"duration_seconds": "ten"})).await;
        assert!(matches!(result, Err(Error::Credential(_))));
    }

    #[tokio::test]
    async fn test_dispatch_malformed_params_is_validation_error() {
        let result = dispatch_test(
            "generate_music",
            json!({"elevenlabs_api_key": "sk-test", "duration_seconds": "ten"}),
        )
        .await;
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn test_dispatch_empty_prompt_is_validation_error() {
        let result = dispatch_test(
            "generate_sound_effect",
            json!({"elevenlabs_api_key": "sk-test", "prompt": "   "}),
        )
        .await;
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn test_dispatch_out_of_range_influence_rejected() {
        let result = dispatch_test(
            "generate_music",
            json!({"elevenlabs_api_key": "sk-test", "prompt": "jazz", "prompt_influence": 1.5}),
        )
        .await;
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn test_dispatch_examples_needs_no_key() {
        let text = dispatch_test("get_music_examples", json!({})).await.unwrap();
        assert!(text.contains("Music prompts:"));
        assert!(text.contains("Sound effect prompts:"));
    }

    #[test]
    fn test_music_params_defaults_from_config() {
        let config = test_config();
        let params: GenerateMusicParams =
            serde_json::from_value(json!({"prompt": "jazz"})).unwrap();
        let request = params.into_request(&config);
        assert_eq!(request.duration_seconds, config.default_duration);
        assert_eq!(request.prompt_influence, config.default_prompt_influence);
        assert!(!request.composition_mode);
    }
}
