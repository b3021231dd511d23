//! Typed configuration with environment-variable secret resolution.

use serde::{Deserialize, Serialize};

use crate::error::{Result, VoxdocError};

/// Top-level voxdoc configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub transcription: TranscriptionConfig,

    #[serde(default)]
    pub completion: CompletionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            bind: default_bind(),
        }
    }
}

fn default_port() -> u16 {
    5000
}

fn default_bind() -> String {
    "0.0.0.0".into()
}

/// Speech-to-text configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptionConfig {
    /// Model name sent to the transcription endpoint.
    #[serde(default = "default_stt_model")]
    pub model: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            model: default_stt_model(),
            api_key: None,
            api_key_env: Some(default_api_key_env()),
            base_url: None,
        }
    }
}

fn default_stt_model() -> String {
    "whisper-large-v3".into()
}

impl TranscriptionConfig {
    pub fn resolve_api_key(&self) -> Option<String> {
        resolve_secret_field(&self.api_key, &self.api_key_env)
    }
}

/// Chat-completion configuration for the doctor response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    /// Model name sent to the chat-completions endpoint.
    #[serde(default = "default_chat_model")]
    pub model: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Completion token cap; omitted from the request when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            model: default_chat_model(),
            api_key: None,
            api_key_env: Some(default_api_key_env()),
            base_url: None,
            max_tokens: None,
            temperature: None,
        }
    }
}

impl CompletionConfig {
    pub fn resolve_api_key(&self) -> Option<String> {
        resolve_secret_field(&self.api_key, &self.api_key_env)
    }
}

fn default_chat_model() -> String {
    "meta-llama/llama-4-scout-17b-16e-instruct".into()
}

fn default_api_key_env() -> String {
    "GROQ_API_KEY".into()
}

/// Resolve a secret: literal field first, then the named environment variable.
pub fn resolve_secret_field(direct: &Option<String>, env_var: &Option<String>) -> Option<String> {
    if let Some(val) = direct {
        if !val.is_empty() {
            return Some(val.clone());
        }
    }
    if let Some(env) = env_var {
        if let Ok(val) = std::env::var(env) {
            if !val.is_empty() {
                return Some(val);
            }
        }
    }
    None
}

impl Config {
    /// Build a config from defaults plus environment overrides (`PORT`).
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(port) = std::env::var("PORT") {
            if let Ok(port) = port.parse() {
                config.server.port = port;
            }
        }
        config
    }

    /// Resolve the transcription API key, failing loudly when absent.
    ///
    /// The process must not start without upstream credentials.
    pub fn require_transcription_key(&self) -> Result<String> {
        self.transcription.resolve_api_key().ok_or_else(|| {
            VoxdocError::Config(
                "GROQ_API_KEY is not set! Add it to .env or environment variables.".into(),
            )
        })
    }

    /// Resolve the completion API key, failing loudly when absent.
    pub fn require_completion_key(&self) -> Result<String> {
        self.completion.resolve_api_key().ok_or_else(|| {
            VoxdocError::Config(
                "GROQ_API_KEY is not set! Add it to .env or environment variables.".into(),
            )
        })
    }
}
