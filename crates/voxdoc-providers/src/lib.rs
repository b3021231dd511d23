//! Upstream provider adapters.
//!
//! The speech transcriber and multimodal responder are trait seams so the
//! request pipeline can be exercised against fakes; the Groq implementations
//! talk to its OpenAI-compatible API via reqwest.

use std::path::Path;

use async_trait::async_trait;

use voxdoc_core::Result;

pub mod chat;
pub mod image;
pub mod transcription;

pub use chat::GroqResponder;
pub use image::{encode_image, EncodedImage};
pub use transcription::GroqTranscriber;

pub const GROQ_BASE_URL: &str = "https://api.groq.com";

/// Converts an audio file into a plain-text transcript.
#[async_trait]
pub trait SpeechTranscriber: Send + Sync {
    async fn transcribe(&self, audio_path: &Path) -> Result<String>;
}

/// Produces a single text completion from a query and an optional image.
#[async_trait]
pub trait MultimodalResponder: Send + Sync {
    async fn respond(&self, query: &str, image: Option<&EncodedImage>) -> Result<String>;
}
