//! Configuration module for loading environment variables and settings.

use crate::error::ConfigError;

/// Application configuration loaded once at startup and passed into each
/// component constructor. There is no ambient global configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// ElevenLabs API base URL
    pub elevenlabs_base_url: String,
    /// HTTP server port
    pub port: u16,
    /// Default music duration in seconds
    pub default_duration: u32,
    /// Maximum music duration in seconds
    pub max_duration: u32,
    /// Default prompt influence (0.0-1.0)
    pub default_prompt_influence: f32,
    /// Default sound effect duration in seconds
    pub default_sound_duration: u32,
    /// Server name advertised during MCP initialization
    pub server_name: String,
    /// Server version advertised during MCP initialization
    pub server_version: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            elevenlabs_base_url: "https://api.elevenlabs.io".to_string(),
            port: 8080,
            default_duration: 10,
            max_duration: 30,
            default_prompt_influence: 0.3,
            default_sound_duration: 5,
            server_name: "beatsmith".to_string(),
            server_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables and .env file.
    ///
    /// No variable is required; every field falls back to its default.
    /// A variable that is set but unparseable is an error rather than a
    /// silent fallback.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidValue` if a numeric variable is set
    /// to something that does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let defaults = Self::default();

        let elevenlabs_base_url = std::env::var("ELEVENLABS_BASE_URL")
            .unwrap_or(defaults.elevenlabs_base_url);

        let port = parse_env("PORT", defaults.port)?;
        let default_duration = parse_env("DEFAULT_DURATION", defaults.default_duration)?;
        let max_duration = parse_env("MAX_DURATION", defaults.max_duration)?;
        let default_prompt_influence =
            parse_env("DEFAULT_PROMPT_INFLUENCE", defaults.default_prompt_influence)?;

        let server_name =
            std::env::var("SERVER_NAME").unwrap_or(defaults.server_name);

        Ok(Self {
            elevenlabs_base_url,
            port,
            default_duration,
            max_duration,
            default_prompt_influence,
            default_sound_duration: defaults.default_sound_duration,
            server_name,
            server_version: defaults.server_version,
        })
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| ConfigError::invalid_value(name, format!("cannot parse '{raw}'"))),
        Err(_) => Ok(default),
    }
}
