//! Low-level client for the generative endpoint.
//!
//! One method per endpoint shape; the typed prompt wrappers live in
//! `wrappers.rs`. Every call checks the connectivity flag first and returns
//! `AiError::Offline` without touching the network when it is off.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::error::AiError;
use crate::models::{AspectRatio, ImageSize, MediaArtifact};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Fast default model for templated requests.
pub const MODEL_FLASH: &str = "gemini-3-flash-preview";
/// Smart model for open-ended chat and media understanding.
pub const MODEL_PRO: &str = "gemini-3-pro-preview";
/// Maps grounding is only supported on this tier.
pub const MODEL_MAPS: &str = "gemini-2.5-flash";
pub const MODEL_IMAGE: &str = "gemini-3-pro-image-preview";
pub const MODEL_IMAGE_EDIT: &str = "gemini-2.5-flash-image";
pub const MODEL_VIDEO: &str = "veo-3.1-fast-generate-preview";
pub const MODEL_TTS: &str = "gemini-2.5-flash-preview-tts";

/// Interval between polls of a long-running video operation.
const VIDEO_POLL_INTERVAL: Duration = Duration::from_secs(5);

pub struct AssistantClient {
    api_key: String,
    client: reqwest::Client,
    offline: AtomicBool,
}

impl AssistantClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            client: reqwest::Client::new(),
            offline: AtomicBool::new(false),
        }
    }

    /// Flip the connectivity flag. While offline every call short-circuits
    /// with `AiError::Offline` before any request is built.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::Relaxed);
    }

    pub fn is_offline(&self) -> bool {
        self.offline.load(Ordering::Relaxed)
    }

    fn check_online(&self) -> Result<(), AiError> {
        if self.is_offline() {
            Err(AiError::Offline)
        } else {
            Ok(())
        }
    }

    async fn post_generate(&self, model: &str, body: Value) -> Result<Value, AiError> {
        self.check_online()?;
        let url = format!(
            "{API_BASE}/models/{model}:generateContent?key={}",
            self.api_key
        );

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(AiError::http)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(AiError::Api { status, message });
        }

        response.json().await.map_err(AiError::http)
    }

    /// Plain text generation.
    pub async fn generate_text(&self, model: &str, prompt: &str) -> Result<String, AiError> {
        let body = json!({ "contents": [{ "parts": [{ "text": prompt }] }] });
        let value = self.post_generate(model, body).await?;
        extract_text(&value)
    }

    /// Schema-constrained JSON generation. Returns the decoded value; the
    /// caller deserializes it into its model type.
    pub async fn generate_json(
        &self,
        model: &str,
        prompt: &str,
        schema: Value,
    ) -> Result<Value, AiError> {
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": schema,
            },
        });
        let value = self.post_generate(model, body).await?;
        let text = extract_text(&value)?;
        serde_json::from_str(text.trim()).map_err(|e| AiError::Decode(e.to_string()))
    }

    /// Text generation with grounding tools attached.
    pub async fn generate_with_tools(
        &self,
        model: &str,
        prompt: &str,
        tools: Vec<Value>,
    ) -> Result<String, AiError> {
        let mut body = json!({ "contents": [{ "parts": [{ "text": prompt }] }] });
        if !tools.is_empty() {
            body["tools"] = Value::Array(tools);
        }
        let value = self.post_generate(model, body).await?;
        extract_text(&value)
    }

    /// Generate an image from a prompt.
    pub async fn generate_image(
        &self,
        prompt: &str,
        size: ImageSize,
        ratio: AspectRatio,
    ) -> Result<MediaArtifact, AiError> {
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "imageConfig": {
                    "aspectRatio": ratio.as_str(),
                    "imageSize": size.as_str(),
                },
            },
        });
        let value = self.post_generate(MODEL_IMAGE, body).await?;
        extract_image(&value)
    }

    /// Edit an existing image with an instruction.
    pub async fn edit_image(
        &self,
        image: &[u8],
        mime: &str,
        prompt: &str,
    ) -> Result<MediaArtifact, AiError> {
        let body = json!({
            "contents": [{ "parts": [
                { "inlineData": { "mimeType": mime, "data": BASE64.encode(image) } },
                { "text": prompt },
            ] }],
        });
        let value = self.post_generate(MODEL_IMAGE_EDIT, body).await?;
        extract_image(&value)
    }

    /// Start a video generation operation and poll until it finishes.
    ///
    /// There is no attempt cap, matching the endpoint's open-ended
    /// completion times, but the token cancels the wait at any point.
    pub async fn generate_video(
        &self,
        prompt: &str,
        ratio: AspectRatio,
        reference: Option<(&[u8], &str)>,
        cancel: &CancellationToken,
    ) -> Result<MediaArtifact, AiError> {
        self.check_online()?;

        let mut instance = json!({ "prompt": prompt });
        if let Some((bytes, mime)) = reference {
            instance["image"] = json!({
                "bytesBase64Encoded": BASE64.encode(bytes),
                "mimeType": mime,
            });
        }
        let body = json!({
            "instances": [instance],
            "parameters": {
                "sampleCount": 1,
                "resolution": "720p",
                "aspectRatio": ratio.for_video(),
            },
        });

        let url = format!(
            "{API_BASE}/models/{MODEL_VIDEO}:predictLongRunning?key={}",
            self.api_key
        );
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(AiError::http)?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(AiError::Api { status, message });
        }
        let started: Value = response.json().await.map_err(AiError::http)?;
        let op_name = started
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| AiError::Decode("operation has no name".into()))?
            .to_string();
        debug!("video operation started: {op_name}");

        loop {
            tokio::select! {
                _ = cancel.cancelled() => return Err(AiError::Cancelled),
                _ = tokio::time::sleep(VIDEO_POLL_INTERVAL) => {}
            }

            let poll_url = format!("{API_BASE}/{op_name}?key={}", self.api_key);
            let value: Value = self
                .client
                .get(&poll_url)
                .send()
                .await
                .map_err(AiError::http)?
                .json()
                .await
                .map_err(AiError::http)?;

            if value.get("done").and_then(Value::as_bool).unwrap_or(false) {
                let uri = value
                    .pointer("/response/generateVideoResponse/generatedSamples/0/video/uri")
                    .or_else(|| value.pointer("/response/generatedVideos/0/video/uri"))
                    .and_then(Value::as_str)
                    .ok_or_else(|| AiError::Decode("finished operation has no video uri".into()))?;
                // The download link needs the key appended to be fetchable.
                return Ok(MediaArtifact::VideoUrl(format!("{uri}&key={}", self.api_key)));
            }
        }
    }

    /// Describe an uploaded image or video.
    pub async fn analyze_media(
        &self,
        media: &[u8],
        mime: &str,
        prompt: &str,
    ) -> Result<String, AiError> {
        let body = json!({
            "contents": [{ "parts": [
                { "inlineData": { "mimeType": mime, "data": BASE64.encode(media) } },
                { "text": prompt },
            ] }],
        });
        let value = self.post_generate(MODEL_PRO, body).await?;
        extract_text(&value)
    }

    /// Transcribe an audio clip verbatim.
    pub async fn transcribe_audio(&self, audio: &[u8], mime: &str) -> Result<String, AiError> {
        let mime = if mime.is_empty() { "audio/wav" } else { mime };
        let body = json!({
            "contents": [{ "parts": [
                { "inlineData": { "mimeType": mime, "data": BASE64.encode(audio) } },
                { "text": "Transcribe this audio exactly." },
            ] }],
        });
        let value = self.post_generate(MODEL_FLASH, body).await?;
        extract_text(&value)
    }

    /// Synthesize speech for the given text. Returns raw audio bytes.
    pub async fn synthesize_speech(&self, text: &str, voice: &str) -> Result<Vec<u8>, AiError> {
        let body = json!({
            "contents": [{ "parts": [{ "text": text }] }],
            "generationConfig": {
                "responseModalities": ["AUDIO"],
                "speechConfig": {
                    "voiceConfig": { "prebuiltVoiceConfig": { "voiceName": voice } },
                },
            },
        });
        let value = self.post_generate(MODEL_TTS, body).await?;
        let data = value
            .pointer("/candidates/0/content/parts/0/inlineData/data")
            .and_then(Value::as_str)
            .ok_or_else(|| AiError::Decode("no audio in response".into()))?;
        BASE64
            .decode(data)
            .map_err(|e| AiError::Decode(format!("audio payload not base64: {e}")))
    }
}

/// Pull the first text part out of a generate response.
fn extract_text(value: &Value) -> Result<String, AiError> {
    let parts = value
        .pointer("/candidates/0/content/parts")
        .and_then(Value::as_array)
        .ok_or_else(|| AiError::Decode("response has no content parts".into()))?;
    for part in parts {
        if let Some(text) = part.get("text").and_then(Value::as_str) {
            return Ok(text.to_string());
        }
    }
    Err(AiError::Decode("response has no text part".into()))
}

/// Pull the first inline image out of a generate response.
fn extract_image(value: &Value) -> Result<MediaArtifact, AiError> {
    let parts = value
        .pointer("/candidates/0/content/parts")
        .and_then(Value::as_array)
        .ok_or_else(|| AiError::Decode("response has no content parts".into()))?;
    for part in parts {
        if let Some(inline) = part.get("inlineData") {
            let mime = inline
                .get("mimeType")
                .and_then(Value::as_str)
                .unwrap_or("image/png")
                .to_string();
            let data = inline
                .get("data")
                .and_then(Value::as_str)
                .ok_or_else(|| AiError::Decode("inline data without payload".into()))?;
            let bytes = BASE64
                .decode(data)
                .map_err(|e| AiError::Decode(format!("image payload not base64: {e}")))?;
            return Ok(MediaArtifact::Image { bytes, mime });
        }
    }
    warn!("generation response contained no image part");
    Err(AiError::Decode("response has no image part".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_text_reads_first_text_part() {
        let value = json!({
            "candidates": [{ "content": { "parts": [
                { "inlineData": { "mimeType": "image/png", "data": "aGk=" } },
                { "text": "as-salamu alaykum" },
            ] } }],
        });
        assert_eq!(extract_text(&value).unwrap(), "as-salamu alaykum");
    }

    #[test]
    fn extract_text_rejects_empty_candidates() {
        let value = json!({ "candidates": [] });
        assert!(matches!(extract_text(&value), Err(AiError::Decode(_))));
    }

    #[test]
    fn extract_image_decodes_inline_payload() {
        let value = json!({
            "candidates": [{ "content": { "parts": [
                { "inlineData": { "mimeType": "image/png", "data": BASE64.encode([1u8, 2, 3]) } },
            ] } }],
        });
        match extract_image(&value).unwrap() {
            MediaArtifact::Image { bytes, mime } => {
                assert_eq!(bytes, vec![1, 2, 3]);
                assert_eq!(mime, "image/png");
            }
            other => panic!("unexpected artifact: {other:?}"),
        }
    }

    #[tokio::test]
    async fn offline_flag_short_circuits_before_any_request() {
        let client = AssistantClient::new("unused-key".into());
        client.set_offline(true);
        let result = client.generate_text(MODEL_FLASH, "anything").await;
        assert!(matches!(result, Err(AiError::Offline)));
    }

    #[tokio::test]
    #[ignore] // Requires actual API key
    async fn live_text_generation() {
        let api_key = std::env::var("GEMINI_API_KEY").expect("GEMINI_API_KEY not set");
        let client = AssistantClient::new(api_key);
        let text = client
            .generate_text(MODEL_FLASH, "Say 'ok' and nothing else.")
            .await
            .unwrap();
        assert!(!text.is_empty());
    }
}
