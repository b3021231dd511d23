//! Single-turn multimodal chat completions via Groq's OpenAI-compatible API.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use voxdoc_core::{Result, VoxdocError};

use crate::image::EncodedImage;
use crate::{MultimodalResponder, GROQ_BASE_URL};

/// Adapter for `POST /openai/v1/chat/completions`.
pub struct GroqResponder {
    base_url: String,
    api_key: String,
    model: String,
    max_tokens: Option<u32>,
    temperature: Option<f64>,
    client: reqwest::Client,
}

impl GroqResponder {
    pub fn new(api_key: String, model: String, base_url: Option<&str>) -> Self {
        Self {
            base_url: base_url
                .unwrap_or(GROQ_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            api_key,
            model,
            max_tokens: None,
            temperature: None,
            client: reqwest::Client::new(),
        }
    }

    /// Set the generation parameters sent with every completion request.
    pub fn with_sampling(mut self, max_tokens: Option<u32>, temperature: Option<f64>) -> Self {
        self.max_tokens = max_tokens;
        self.temperature = temperature;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[serde(default)]
    message: ChoiceMessage,
}

#[derive(Debug, Default, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Build the single user message as an array of content parts: a text part,
/// plus an inlined `image_url` part when an image is supplied.
fn build_messages(query: &str, image: Option<&EncodedImage>) -> Vec<serde_json::Value> {
    let mut parts = vec![json!({ "type": "text", "text": query })];
    if let Some(image) = image {
        parts.push(json!({
            "type": "image_url",
            "image_url": { "url": image.as_data_uri() },
        }));
    }
    vec![json!({ "role": "user", "content": parts })]
}

#[async_trait]
impl MultimodalResponder for GroqResponder {
    async fn respond(&self, query: &str, image: Option<&EncodedImage>) -> Result<String> {
        let body = ChatRequest {
            model: self.model.clone(),
            messages: build_messages(query, image),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        debug!(
            model = %body.model,
            with_image = image.is_some(),
            "Requesting chat completion"
        );

        let resp = self
            .client
            .post(format!("{}/openai/v1/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| VoxdocError::upstream("groq-chat", None, e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(VoxdocError::upstream(
                "groq-chat",
                Some(status.as_u16()),
                body,
            ));
        }

        let completion: ChatCompletionResponse = resp
            .json()
            .await
            .map_err(|e| VoxdocError::upstream("groq-chat", None, e.to_string()))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| {
                VoxdocError::upstream("groq-chat", None, "completion contained no choices")
            })
    }
}
