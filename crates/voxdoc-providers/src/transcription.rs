//! Speech-to-text via Groq's Whisper transcription endpoint.

use std::path::Path;

use async_trait::async_trait;
use tracing::debug;

use voxdoc_core::{Result, VoxdocError};

use crate::{SpeechTranscriber, GROQ_BASE_URL};

/// Adapter for `POST /openai/v1/audio/transcriptions`.
pub struct GroqTranscriber {
    base_url: String,
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl GroqTranscriber {
    pub fn new(api_key: String, model: String, base_url: Option<&str>) -> Self {
        Self {
            base_url: base_url
                .unwrap_or(GROQ_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            api_key,
            model,
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl SpeechTranscriber for GroqTranscriber {
    async fn transcribe(&self, audio_path: &Path) -> Result<String> {
        let audio_bytes = tokio::fs::read(audio_path).await?;
        let file_name = audio_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "audio.wav".into());

        debug!(
            model = %self.model,
            file = %file_name,
            bytes = audio_bytes.len(),
            "Sending audio for transcription"
        );

        let file_part = reqwest::multipart::Part::bytes(audio_bytes)
            .file_name(file_name)
            .mime_str("application/octet-stream")?;

        let form = reqwest::multipart::Form::new()
            .part("file", file_part)
            .text("model", self.model.clone())
            .text("response_format", "text");

        let resp = self
            .client
            .post(format!("{}/openai/v1/audio/transcriptions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .multipart(form)
            .send()
            .await
            .map_err(|e| VoxdocError::upstream("groq-stt", None, e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(VoxdocError::upstream(
                "groq-stt",
                Some(status.as_u16()),
                body,
            ));
        }

        let text = resp
            .text()
            .await
            .map_err(|e| VoxdocError::upstream("groq-stt", None, e.to_string()))?;
        Ok(text.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_url() {
        let transcriber =
            GroqTranscriber::new("key".into(), "whisper-large-v3".into(), None);
        assert_eq!(transcriber.base_url(), "https://api.groq.com");
    }

    #[test]
    fn test_custom_base_url_trims_trailing_slash() {
        let transcriber = GroqTranscriber::new(
            "key".into(),
            "whisper-large-v3".into(),
            Some("http://127.0.0.1:9999/"),
        );
        assert_eq!(transcriber.base_url(), "http://127.0.0.1:9999");
    }

    #[tokio::test]
    async fn test_missing_audio_file_is_io_error() {
        let transcriber =
            GroqTranscriber::new("key".into(), "whisper-large-v3".into(), None);
        let err = transcriber
            .transcribe(Path::new("/nonexistent/audio.wav"))
            .await
            .unwrap_err();
        assert!(matches!(err, VoxdocError::Io(_)));
    }
}
