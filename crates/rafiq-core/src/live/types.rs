//! Wire messages for the bidirectional live session.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// First message on the socket: declares the model, audio response modality,
/// and requested voice.
#[derive(Debug, Serialize)]
pub struct SetupMessage {
    pub setup: Setup,
}

#[derive(Debug, Serialize)]
pub struct Setup {
    pub model: String,
    #[serde(rename = "generationConfig")]
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
pub struct GenerationConfig {
    #[serde(rename = "responseModalities")]
    pub response_modalities: Vec<String>,
    #[serde(rename = "speechConfig")]
    pub speech_config: SpeechConfig,
}

#[derive(Debug, Serialize)]
pub struct SpeechConfig {
    #[serde(rename = "voiceConfig")]
    pub voice_config: VoiceConfig,
}

#[derive(Debug, Serialize)]
pub struct VoiceConfig {
    #[serde(rename = "prebuiltVoiceConfig")]
    pub prebuilt_voice_config: PrebuiltVoiceConfig,
}

#[derive(Debug, Serialize)]
pub struct PrebuiltVoiceConfig {
    #[serde(rename = "voiceName")]
    pub voice_name: String,
}

impl SetupMessage {
    pub fn new(model: &str, voice: &str) -> Self {
        Self {
            setup: Setup {
                model: format!("models/{model}"),
                generation_config: GenerationConfig {
                    response_modalities: vec!["AUDIO".to_string()],
                    speech_config: SpeechConfig {
                        voice_config: VoiceConfig {
                            prebuilt_voice_config: PrebuiltVoiceConfig {
                                voice_name: voice.to_string(),
                            },
                        },
                    },
                },
            },
        }
    }
}

/// A captured audio frame, sent fire-and-forget.
#[derive(Debug, Serialize)]
pub struct RealtimeInput {
    #[serde(rename = "realtimeInput")]
    pub realtime_input: MediaChunks,
}

#[derive(Debug, Serialize)]
pub struct MediaChunks {
    #[serde(rename = "mediaChunks")]
    pub media_chunks: Vec<MediaChunk>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MediaChunk {
    /// Base64 PCM payload.
    pub data: String,
    #[serde(rename = "mimeType")]
    pub mime_type: String,
}

impl RealtimeInput {
    pub fn single(data: String, mime_type: String) -> Self {
        Self {
            realtime_input: MediaChunks {
                media_chunks: vec![MediaChunk { data, mime_type }],
            },
        }
    }
}

/// Inbound server message. Parsed loosely; anything unrecognized is ignored.
#[derive(Debug, Deserialize)]
pub struct ServerMessage {
    #[serde(rename = "setupComplete")]
    pub setup_complete: Option<Value>,
    #[serde(rename = "serverContent")]
    pub server_content: Option<Value>,
}

impl ServerMessage {
    pub fn is_setup_complete(&self) -> bool {
        self.setup_complete.is_some()
    }

    /// Extract the base64 audio payload from a model turn, if present.
    pub fn audio_payload(&self) -> Option<&str> {
        self.server_content
            .as_ref()?
            .pointer("/modelTurn/parts/0/inlineData/data")?
            .as_str()
    }

    /// The remote side signals end of its turn.
    pub fn is_turn_complete(&self) -> bool {
        self.server_content
            .as_ref()
            .and_then(|c| c.get("turnComplete"))
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn setup_message_declares_audio_and_voice() {
        let msg = SetupMessage::new("live-audio-model", "Zephyr");
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["setup"]["model"], "models/live-audio-model");
        assert_eq!(
            value["setup"]["generationConfig"]["responseModalities"][0],
            "AUDIO"
        );
        assert_eq!(
            value["setup"]["generationConfig"]["speechConfig"]["voiceConfig"]
                ["prebuiltVoiceConfig"]["voiceName"],
            "Zephyr"
        );
    }

    #[test]
    fn realtime_input_wraps_one_chunk() {
        let msg = RealtimeInput::single("QUJD".into(), "audio/pcm;rate=16000".into());
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["realtimeInput"]["mediaChunks"][0]["data"], "QUJD");
        assert_eq!(
            value["realtimeInput"]["mediaChunks"][0]["mimeType"],
            "audio/pcm;rate=16000"
        );
    }

    #[test]
    fn audio_payload_extraction() {
        let raw = json!({
            "serverContent": {
                "modelTurn": { "parts": [ { "inlineData": {
                    "mimeType": "audio/pcm;rate=24000",
                    "data": "AAECAw==",
                } } ] },
            },
        });
        let msg: ServerMessage = serde_json::from_value(raw).unwrap();
        assert_eq!(msg.audio_payload(), Some("AAECAw=="));
        assert!(!msg.is_setup_complete());
    }

    #[test]
    fn non_audio_messages_yield_nothing() {
        let msg: ServerMessage =
            serde_json::from_value(json!({ "serverContent": { "turnComplete": true } })).unwrap();
        assert_eq!(msg.audio_payload(), None);
        assert!(msg.is_turn_complete());
    }

    #[test]
    fn setup_complete_detection() {
        let msg: ServerMessage =
            serde_json::from_value(json!({ "setupComplete": {} })).unwrap();
        assert!(msg.is_setup_complete());
    }
}
