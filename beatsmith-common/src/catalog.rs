//! Static example catalog.
//!
//! Fixed prompt examples and usage tips, defined once and never mutated.
//! The catalog has no dependency on the generation client and is served
//! even without a valid credential.

use serde_json::{Value, json};

/// Example prompts for music generation.
pub const MUSIC_EXAMPLES: [&str; 10] = [
    "A cheerful upbeat electronic dance music track with synthesizers",
    "Relaxing ambient music with soft piano and nature sounds",
    "Energetic rock guitar riff with drums",
    "Classical orchestral piece with strings and woodwinds",
    "Jazz saxophone melody with walking bass line",
    "Lo-fi hip hop beat with vinyl crackle",
    "Cinematic epic orchestral music with brass and timpani",
    "Acoustic folk guitar with harmonica",
    "Synthwave retro 80s electronic music",
    "Peaceful meditation music with Tibetan bowls",
];

/// Example prompts for sound effect generation.
pub const SOUND_EFFECT_EXAMPLES: [&str; 10] = [
    "Gentle rain falling on leaves",
    "Ocean waves crashing on the shore",
    "Birds chirping in a forest",
    "Crackling campfire",
    "Thunder and lightning storm",
    "City traffic and car horns",
    "Footsteps on gravel",
    "Wind blowing through trees",
    "Coffee shop ambient noise",
    "Mechanical keyboard typing sounds",
];

/// Usage tips for the text rendering.
pub const USAGE_TIPS: [&str; 6] = [
    "Be descriptive about the style, instruments, and mood",
    "Specify tempo (slow, medium, fast, upbeat, etc.)",
    "Mention specific instruments or sounds you want",
    "Include emotional descriptors (happy, sad, energetic, calm)",
    "For sound effects, be specific about the environment and action",
    "You need your own ElevenLabs API key to use this service",
];

/// The full catalog served by the REST `/examples` endpoint: basic prompts,
/// composition-mode example requests, and structured usage tips.
pub fn rest_examples() -> Value {
    json!({
        "basic_music_examples": &MUSIC_EXAMPLES[..5],
        "composition_mode_examples": [
            {
                "prompt": "A romantic love song with heartfelt lyrics",
                "composition_mode": true,
                "genre": "pop",
                "mood": "romantic",
                "tempo": "slow",
                "instruments": ["piano", "strings", "soft_drums"]
            },
            {
                "prompt": "An energetic workout anthem with motivational vibes",
                "composition_mode": true,
                "genre": "electronic",
                "mood": "energetic",
                "tempo": "fast",
                "instruments": ["synthesizer", "bass", "drums"]
            },
            {
                "prompt": "A melancholic indie song about lost memories",
                "composition_mode": true,
                "genre": "indie",
                "mood": "melancholic",
                "tempo": "medium",
                "instruments": ["acoustic_guitar", "violin", "soft_vocals"]
            }
        ],
        "sound_effect_examples": &SOUND_EFFECT_EXAMPLES[..5],
        "usage_tips": {
            "basic_mode": "Simple text prompts work great for quick music generation",
            "composition_mode": "Enable for more structured, professional-quality music with specific genre, mood, and instrument control",
            "prompt_influence": "Higher values (0.7-1.0) follow your prompt more closely, lower values (0.1-0.3) allow more creative freedom",
            "duration": "Longer durations (20-30s) work better with composition mode for complete musical phrases",
            "lyrics": "The response includes lyrics when applicable - check the 'lyrics' field in the result",
            "metadata": "Full composition plan and song metadata are included in the response for detailed analysis"
        }
    })
}
