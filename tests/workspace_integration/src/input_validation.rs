//! Input validation tests across both façades.
//!
//! The REST façade range-checks request bodies before any upstream call;
//! the MCP façade checks the credential before parameter shape. These
//! tests pin both orderings and verify the shared duration clamp.

#[cfg(test)]
mod tests {
    use beatsmith_api::requests::{MusicGenerationRequest, SoundEffectRequest};
    use beatsmith_common::Config;
    use beatsmith_common::elevenlabs::{MUSIC_MIN_DURATION, clamp_music_duration};
    use beatsmith_common::error::Error;
    use beatsmith_mcp::tools::dispatch;
    use proptest::prelude::*;
    use serde_json::json;

    fn music_body(duration: u32, influence: f32) -> MusicGenerationRequest {
        serde_json::from_value(json!({
            "prompt": "upbeat jazz",
            "duration_seconds": duration,
            "prompt_influence": influence,
            "elevenlabs_api_key": "sk-test",
        }))
        .unwrap()
    }

    async fn call(name: &str, args: serde_json::Value) -> Result<String, Error> {
        dispatch(&Config::default(), reqwest::Client::new(), name, args).await
    }

    #[tokio::test]
    async fn test_mcp_checks_tool_name_before_credential() {
        // Neither a valid name nor a key: the unknown name wins
        let result = call("generate_vibes", json!({})).await;
        assert!(matches!(result, Err(Error::UnknownTool(_))));
    }

    #[tokio::test]
    async fn test_mcp_checks_credential_before_parameters() {
        // Malformed parameters and no key: the credential error wins
        let result = call("generate_music", json!({"duration_seconds": []})).await;
        assert!(matches!(result, Err(Error::Credential(_))));
    }

    #[tokio::test]
    async fn test_mcp_rejects_malformed_parameters_with_key() {
        let result = call(
            "generate_music",
            json!({"elevenlabs_api_key": "sk-test", "duration_seconds": []}),
        )
        .await;
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    proptest! {
        /// Every in-range music body passes REST validation.
        #[test]
        fn rest_accepts_all_in_range_music(duration in 1u32..=30, influence in 0.0f32..=1.0) {
            prop_assert!(music_body(duration, influence).validate().is_empty());
        }

        /// Every out-of-range duration fails REST validation.
        #[test]
        fn rest_rejects_out_of_range_duration(duration in 31u32..10_000) {
            prop_assert!(!music_body(duration, 0.5).validate().is_empty());
        }

        /// Every out-of-range sound duration fails REST validation.
        #[test]
        fn rest_rejects_out_of_range_sound_duration(duration in 16u32..10_000) {
            let request: SoundEffectRequest = serde_json::from_value(serde_json::json!({
                "prompt": "rain",
                "duration_seconds": duration,
                "elevenlabs_api_key": "sk-test",
            })).unwrap();
            prop_assert!(!request.validate().is_empty());
        }

        /// Whatever duration gets past a façade, the client clamp keeps
        /// the upstream call inside its supported window.
        #[test]
        fn clamp_covers_any_facade_input(duration in 0u32..100_000) {
            let clamped = clamp_music_duration(duration, Config::default().max_duration);
            prop_assert!(clamped >= MUSIC_MIN_DURATION);
            prop_assert!(clamped <= Config::default().max_duration);
        }
    }
}
