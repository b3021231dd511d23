//! The request pipeline: transcribe, build the query, get the doctor response.

use std::path::Path;

use tracing::info;

use voxdoc_core::prompt;
use voxdoc_core::Result;
use voxdoc_providers::encode_image;

use crate::state::AppState;

/// Run the full pipeline over saved upload paths.
///
/// Exactly two upstream calls: one transcription, one chat completion. The
/// image, when present, is base64-inlined into the completion request.
pub async fn run(
    state: &AppState,
    audio_path: &Path,
    image_path: Option<&Path>,
) -> Result<(String, String)> {
    let transcript = state.transcriber.transcribe(audio_path).await?;
    info!(chars = transcript.len(), "Audio transcribed");

    let query = prompt::build_query(&transcript);

    let doctor_response = match image_path {
        Some(path) => {
            let image = encode_image(path).await?;
            state.responder.respond(&query, Some(&image)).await?
        }
        None => state.responder.respond(&query, None).await?,
    };

    Ok((transcript, doctor_response))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use voxdoc_core::config::Config;
    use voxdoc_core::VoxdocError;
    use voxdoc_providers::{EncodedImage, MultimodalResponder, SpeechTranscriber};

    struct FakeTranscriber {
        transcript: &'static str,
    }

    #[async_trait]
    impl SpeechTranscriber for FakeTranscriber {
        async fn transcribe(&self, _audio_path: &Path) -> voxdoc_core::Result<String> {
            Ok(self.transcript.to_string())
        }
    }

    #[derive(Default)]
    struct RecordingResponder {
        saw_image: AtomicBool,
        last_query: Mutex<String>,
    }

    #[async_trait]
    impl MultimodalResponder for RecordingResponder {
        async fn respond(
            &self,
            query: &str,
            image: Option<&EncodedImage>,
        ) -> voxdoc_core::Result<String> {
            self.saw_image.store(image.is_some(), Ordering::SeqCst);
            *self.last_query.lock().unwrap() = query.to_string();
            Ok("Take rest and fluids. dermatologist".to_string())
        }
    }

    struct FailingTranscriber;

    #[async_trait]
    impl SpeechTranscriber for FailingTranscriber {
        async fn transcribe(&self, _audio_path: &Path) -> voxdoc_core::Result<String> {
            Err(VoxdocError::upstream("groq-stt", Some(500), "boom"))
        }
    }

    fn state_with(
        transcriber: Arc<dyn SpeechTranscriber>,
        responder: Arc<dyn MultimodalResponder>,
    ) -> AppState {
        AppState::new(Arc::new(Config::default()), transcriber, responder)
    }

    #[tokio::test]
    async fn test_audio_only_responds_without_image() {
        let responder = Arc::new(RecordingResponder::default());
        let state = state_with(
            Arc::new(FakeTranscriber {
                transcript: "i have a rash",
            }),
            responder.clone(),
        );

        let dir = tempfile::tempdir().unwrap();
        let audio = dir.path().join("audio.wav");
        std::fs::write(&audio, b"fake wav").unwrap();

        let (transcript, doctor_response) = run(&state, &audio, None).await.unwrap();

        assert_eq!(transcript, "i have a rash");
        // The responder's text comes back unmodified.
        assert_eq!(doctor_response, "Take rest and fluids. dermatologist");
        assert!(!responder.saw_image.load(Ordering::SeqCst));

        // The query is the fixed prompt plus the transcript.
        let query = responder.last_query.lock().unwrap().clone();
        assert!(query.starts_with("\nYou are a professional doctor."));
        assert!(query.ends_with("i have a rash"));
    }

    #[tokio::test]
    async fn test_audio_and_image_responds_with_image() {
        let responder = Arc::new(RecordingResponder::default());
        let state = state_with(
            Arc::new(FakeTranscriber {
                transcript: "what is this spot",
            }),
            responder.clone(),
        );

        let dir = tempfile::tempdir().unwrap();
        let audio = dir.path().join("audio.wav");
        let image = dir.path().join("image.jpg");
        std::fs::write(&audio, b"fake wav").unwrap();
        std::fs::write(&image, b"\xff\xd8\xff").unwrap();

        let (_, _) = run(&state, &audio, Some(&image)).await.unwrap();
        assert!(responder.saw_image.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_transcription_failure_propagates() {
        let state = state_with(
            Arc::new(FailingTranscriber),
            Arc::new(RecordingResponder::default()),
        );

        let dir = tempfile::tempdir().unwrap();
        let audio = dir.path().join("audio.wav");
        std::fs::write(&audio, b"fake wav").unwrap();

        let err = run(&state, &audio, None).await.unwrap_err();
        assert!(matches!(err, VoxdocError::Upstream { .. }));
    }
}
