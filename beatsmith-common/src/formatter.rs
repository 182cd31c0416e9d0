//! Response formatting.
//!
//! Pure functions mapping generation results to caller-facing
//! representations: structured JSON for the REST façade, human-readable
//! text blocks for the tool façade. Both façades consume this module, so
//! the two renderings cannot drift apart.

use serde_json::{Value, json};

use crate::catalog;
use crate::elevenlabs::{ConnectionStatus, GenerationResult, ModelsResult};

/// JSON view of a generation result: the audio payload with `success: true`,
/// or `{success: false, error}`.
pub fn audio_json(result: &GenerationResult) -> Value {
    match result {
        GenerationResult::Audio(audio) => {
            let mut value = serde_json::to_value(audio).unwrap_or_else(|_| json!({}));
            if let Some(object) = value.as_object_mut() {
                object.insert("success".to_string(), Value::Bool(true));
            }
            value
        }
        GenerationResult::Failure(error) => json!({
            "success": false,
            "error": error,
        }),
    }
}

/// Text view of a generation result: a multi-line block with the file
/// metadata, the fenced base64 payload, and usage instructions.
pub fn audio_text(result: &GenerationResult) -> String {
    match result {
        GenerationResult::Audio(audio) => {
            let mut text = String::from("Audio generated successfully!\n\n");
            text.push_str(&format!("File: {}\n", audio.filename));
            text.push_str(&format!("Duration: {} seconds\n", audio.duration_seconds));
            text.push_str(&format!("Prompt: {}\n", audio.prompt));
            text.push_str(&format!("Size: {} bytes\n", audio.file_size));
            text.push_str(&format!("Type: {}\n", audio.mime_type));

            if let Some(lyrics) = audio.lyrics.as_deref().filter(|l| !l.is_empty()) {
                text.push_str(&format!("\nLyrics:\n{lyrics}"));
            }

            text.push_str("\nAudio data (base64):\n");
            text.push_str(&format!("```\n{}\n```\n\n", audio.audio_base64));
            text.push_str("Usage:\n");
            text.push_str("1. Copy the base64 data above\n");
            text.push_str("2. Decode it to get the MP3 file\n");
            text.push_str(&format!("3. Save as `{}`", audio.filename));
            text
        }
        GenerationResult::Failure(error) => format!("Audio generation failed: {error}"),
    }
}

/// JSON view of a connection test.
pub fn connection_json(status: &ConnectionStatus) -> Value {
    json!({
        "success": status.success,
        "message": status.message,
    })
}

/// Text view of a connection test.
pub fn connection_text(status: &ConnectionStatus) -> String {
    if status.success {
        "ElevenLabs API connection successful. The service is available and ready to generate audio."
            .to_string()
    } else {
        format!("ElevenLabs API connection failed: {}", status.message)
    }
}

/// JSON view of a models listing.
pub fn models_json(result: &ModelsResult) -> Value {
    match result {
        ModelsResult::Models(models) => json!({
            "success": true,
            "models": models,
        }),
        ModelsResult::Failure(error) => json!({
            "success": false,
            "error": error,
        }),
    }
}

/// Text view of a models listing: a numbered name/id/description listing.
pub fn models_text(result: &ModelsResult) -> String {
    match result {
        ModelsResult::Models(models) if models.is_empty() => "No models found.".to_string(),
        ModelsResult::Models(models) => {
            let mut text = String::from("Available ElevenLabs models:\n\n");
            for (i, model) in models.iter().enumerate() {
                let name = model
                    .get("name")
                    .and_then(Value::as_str)
                    .unwrap_or("Unknown");
                let model_id = model.get("model_id").and_then(Value::as_str).unwrap_or("");
                let description = model
                    .get("description")
                    .and_then(Value::as_str)
                    .unwrap_or("No description available");
                text.push_str(&format!("{}. {name} ({model_id})\n   {description}\n\n", i + 1));
            }
            text
        }
        ModelsResult::Failure(error) => format!("Failed to get models: {error}"),
    }
}

/// Text view of the static example catalog.
pub fn examples_text() -> String {
    let mut text = String::from("Music generation examples:\n\nMusic prompts:\n");
    for (i, example) in catalog::MUSIC_EXAMPLES.iter().enumerate() {
        text.push_str(&format!("{}. {example}\n", i + 1));
    }

    text.push_str("\nSound effect prompts:\n");
    for (i, example) in catalog::SOUND_EFFECT_EXAMPLES.iter().enumerate() {
        text.push_str(&format!("{}. {example}\n", i + 1));
    }

    text.push_str("\nUsage tips:\n");
    for tip in catalog::USAGE_TIPS {
        text.push_str(&format!("- {tip}\n"));
    }

    text
}

/// JSON view of the static example catalog.
pub fn examples_json() -> Value {
    json!({
        "success": true,
        "examples": catalog::rest_examples(),
    })
}
