//! Shared server state.

use std::sync::Arc;

use voxdoc_core::config::Config;
use voxdoc_core::Result;
use voxdoc_providers::{GroqResponder, GroqTranscriber, MultimodalResponder, SpeechTranscriber};

/// State shared across request handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub transcriber: Arc<dyn SpeechTranscriber>,
    pub responder: Arc<dyn MultimodalResponder>,
}

impl AppState {
    pub fn new(
        config: Arc<Config>,
        transcriber: Arc<dyn SpeechTranscriber>,
        responder: Arc<dyn MultimodalResponder>,
    ) -> Self {
        Self {
            config,
            transcriber,
            responder,
        }
    }

    /// Build the Groq-backed state, resolving credentials up front.
    ///
    /// Fails when no API key is configured; adapters never read the
    /// environment themselves.
    pub fn from_config(config: Config) -> Result<Self> {
        let transcriber = GroqTranscriber::new(
            config.require_transcription_key()?,
            config.transcription.model.clone(),
            config.transcription.base_url.as_deref(),
        );
        let responder = GroqResponder::new(
            config.require_completion_key()?,
            config.completion.model.clone(),
            config.completion.base_url.as_deref(),
        )
        .with_sampling(config.completion.max_tokens, config.completion.temperature);

        Ok(Self {
            config: Arc::new(config),
            transcriber: Arc::new(transcriber),
            responder: Arc::new(responder),
        })
    }
}
