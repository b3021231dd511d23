//! Base64 image encoding for inline multimodal payloads.

use std::path::Path;

use base64::Engine;

use voxdoc_core::{Result, VoxdocError};

/// A base64-encoded image payload.
///
/// Uploads are saved as JPEG, so the data URI assumes `image/jpeg`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage(String);

impl EncodedImage {
    pub fn from_base64(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Inline data URI form for an `image_url` message part.
    pub fn as_data_uri(&self) -> String {
        format!("data:image/jpeg;base64,{}", self.0)
    }
}

/// Read an image file and base64-encode its contents.
///
/// No size limit is enforced here; callers reject oversized uploads.
pub async fn encode_image(path: &Path) -> Result<EncodedImage> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| VoxdocError::ImageRead {
            path: path.display().to_string(),
            source,
        })?;
    Ok(EncodedImage(
        base64::engine::general_purpose::STANDARD.encode(&bytes),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_encode_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.jpg");
        let original: Vec<u8> = (0u8..=255).collect();
        std::fs::write(&path, &original).unwrap();

        let encoded = encode_image(&path).await.unwrap();
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(encoded.as_str())
            .unwrap();
        assert_eq!(decoded, original);
    }

    #[tokio::test]
    async fn test_encode_missing_file_is_read_error() {
        let err = encode_image(Path::new("/nonexistent/image.jpg"))
            .await
            .unwrap_err();
        assert!(matches!(err, VoxdocError::ImageRead { .. }));
        assert!(err.to_string().contains("/nonexistent/image.jpg"));
    }

    #[test]
    fn test_data_uri_shape() {
        let image = EncodedImage::from_base64("aWtlcG5n");
        assert_eq!(image.as_data_uri(), "data:image/jpeg;base64,aWtlcG5n");
    }
}
