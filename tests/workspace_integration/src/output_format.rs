//! Output format consistency tests.
//!
//! Both façades render the same `GenerationResult` through the shared
//! formatter, so the JSON and text views must always agree on the
//! payload and on success or failure.

#[cfg(test)]
mod tests {
    use beatsmith_common::elevenlabs::{AudioResult, GenerationResult, SoundEffectRequest};
    use beatsmith_common::{ApiKey, Config, ElevenLabsClient, formatter};
    use beatsmith_mcp::tools::dispatch;
    use proptest::prelude::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn audio_result(base64: String, prompt: String, size: usize) -> GenerationResult {
        GenerationResult::Audio(AudioResult {
            filename: "music_20250101_120000_abcd1234.mp3".to_string(),
            audio_base64: base64,
            file_size: size,
            duration_seconds: 10,
            prompt,
            mime_type: "audio/mpeg".to_string(),
            lyrics: None,
            composition_plan: None,
            song_metadata: None,
        })
    }

    /// Both façades see the identical payload for the same upstream
    /// response: the REST JSON's base64 field appears verbatim in the
    /// MCP text rendering.
    #[tokio::test]
    async fn test_facades_agree_on_generated_audio() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/sound-generation"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"\x00\x01\x02".as_slice()))
            .mount(&server)
            .await;

        let config = Config {
            elevenlabs_base_url: server.uri(),
            ..Config::default()
        };

        // The REST façade path: client call plus JSON rendering
        let client = ElevenLabsClient::new(&config, ApiKey::new("sk-test").unwrap());
        let result = client
            .generate_sound_effect(SoundEffectRequest {
                prompt: "Thunder and lightning storm".to_string(),
                duration_seconds: 5,
            })
            .await;
        let rest_view = formatter::audio_json(&result);
        assert_eq!(rest_view["success"], true);
        assert_eq!(rest_view["audio_base64"], "AAEC");

        // The MCP façade path: tool dispatch producing text
        let mcp_view = dispatch(
            &config,
            reqwest::Client::new(),
            "generate_sound_effect",
            json!({
                "prompt": "Thunder and lightning storm",
                "duration_seconds": 5,
                "elevenlabs_api_key": "sk-test",
            }),
        )
        .await
        .unwrap();
        assert!(mcp_view.contains("Audio generated successfully!"));
        assert!(mcp_view.contains("```\nAAEC\n```"));
        assert!(mcp_view.contains("Size: 3 bytes"));
    }

    /// Upstream failures render as data in both views, never as audio.
    #[tokio::test]
    async fn test_facades_agree_on_upstream_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/sound-generation"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let config = Config {
            elevenlabs_base_url: server.uri(),
            ..Config::default()
        };

        let client = ElevenLabsClient::new(&config, ApiKey::new("sk-test").unwrap());
        let result = client
            .generate_sound_effect(SoundEffectRequest {
                prompt: "rain".to_string(),
                duration_seconds: 5,
            })
            .await;

        let rest_view = formatter::audio_json(&result);
        assert_eq!(rest_view["success"], false);
        assert!(rest_view.get("audio_base64").is_none());

        let text_view = formatter::audio_text(&result);
        assert!(text_view.starts_with("Audio generation failed:"));
        assert!(text_view.contains("HTTP 500"));
    }

    proptest! {
        /// The JSON and text views always carry the same base64 payload
        /// and the same prompt, for any audio result.
        #[test]
        fn json_and_text_views_agree(
            payload in proptest::collection::vec(any::<u8>(), 1..64),
            prompt in "[a-zA-Z][a-zA-Z ]{0,30}",
        ) {
            use base64::Engine as _;
            let encoded = base64::engine::general_purpose::STANDARD.encode(&payload);
            let result = audio_result(encoded.clone(), prompt.clone(), payload.len());

            let json_view = formatter::audio_json(&result);
            prop_assert_eq!(json_view["success"].as_bool(), Some(true));
            prop_assert_eq!(json_view["audio_base64"].as_str(), Some(encoded.as_str()));
            prop_assert_eq!(json_view["prompt"].as_str(), Some(prompt.as_str()));

            let text_view = formatter::audio_text(&result);
            let fenced = format!("```\n{encoded}\n```");
            prop_assert!(text_view.contains(&fenced));
            prop_assert!(text_view.contains(&prompt));
        }

        /// Failure messages pass through both views unaltered.
        #[test]
        fn failure_message_passes_through(message in "[a-zA-Z0-9 :._-]{1,60}") {
            let result = GenerationResult::Failure(message.clone());

            let json_view = formatter::audio_json(&result);
            prop_assert_eq!(json_view["success"].as_bool(), Some(false));
            prop_assert_eq!(json_view["error"].as_str(), Some(message.as_str()));

            let text_view = formatter::audio_text(&result);
            prop_assert_eq!(text_view, format!("Audio generation failed: {message}"));
        }
    }
}
