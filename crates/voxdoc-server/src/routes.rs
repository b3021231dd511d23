//! HTTP routes.

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::error::ApiError;
use crate::pipeline;
use crate::scratch::Scratch;
use crate::state::AppState;

/// Build the application router: liveness at `/`, the pipeline at `/process`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/process", post(process))
        // Groq caps audio uploads at 25 MB; axum's 2 MB default is too small.
        .layer(DefaultBodyLimit::max(25 * 1024 * 1024))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// Literal body kept for byte-exact compatibility with existing clients,
// typo included.
async fn index() -> &'static str {
    "Server runnig"
}

#[derive(Debug, Serialize)]
pub struct ProcessResponse {
    pub speech_to_text: String,
    pub doctor_response: String,
}

/// `POST /process`: multipart form with a required `audio` file and an
/// optional `image` file.
async fn process(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ProcessResponse>, ApiError> {
    let mut audio = None;
    let mut image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(e.to_string()))?
    {
        let name = field.name().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(e.to_string()))?;

        match name.as_deref() {
            Some("audio") => audio = Some(bytes),
            Some("image") => image = Some(bytes),
            _ => {}
        }
    }

    // Validated before anything is written or sent upstream.
    let Some(audio) = audio else {
        return Err(ApiError::bad_request("Audio file is required!"));
    };

    let scratch = Scratch::new();
    let result = save_and_run(&state, &scratch, &audio, image.as_deref()).await;

    // Cleanup runs whether the pipeline succeeded or not.
    scratch.cleanup().await;

    let (speech_to_text, doctor_response) = result?;
    info!(
        transcript_chars = speech_to_text.len(),
        response_chars = doctor_response.len(),
        "Request processed"
    );

    Ok(Json(ProcessResponse {
        speech_to_text,
        doctor_response,
    }))
}

async fn save_and_run(
    state: &AppState,
    scratch: &Scratch,
    audio: &[u8],
    image: Option<&[u8]>,
) -> Result<(String, String), ApiError> {
    let audio_path = scratch.save_audio(audio).await?;
    let image_path = match image {
        Some(bytes) => Some(scratch.save_image(bytes).await?),
        None => None,
    };

    Ok(pipeline::run(state, &audio_path, image_path.as_deref()).await?)
}
