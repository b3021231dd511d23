use thiserror::Error;

#[derive(Debug, Error)]
pub enum VoxdocError {
    #[error("Config error: {0}")]
    Config(String),

    /// An upstream provider call failed (transport, auth, or a non-2xx body).
    #[error("Upstream {provider} error{}: {message}", fmt_status(.status))]
    Upstream {
        provider: &'static str,
        status: Option<u16>,
        message: String,
    },

    #[error("Failed to read image {path}: {source}")]
    ImageRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

fn fmt_status(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!(" ({code})"),
        None => String::new(),
    }
}

impl VoxdocError {
    pub fn upstream(provider: &'static str, status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Upstream {
            provider,
            status,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, VoxdocError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_display_includes_status() {
        let err = VoxdocError::upstream("groq-stt", Some(401), "invalid api key");
        let msg = err.to_string();
        assert!(msg.contains("groq-stt"));
        assert!(msg.contains("401"));
        assert!(msg.contains("invalid api key"));
    }

    #[test]
    fn test_upstream_display_without_status() {
        let err = VoxdocError::upstream("groq-chat", None, "connection refused");
        assert_eq!(
            err.to_string(),
            "Upstream groq-chat error: connection refused"
        );
    }
}
