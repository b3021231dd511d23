//! Per-request transient file storage.
//!
//! Each request gets its own uuid-named directory under the OS temp dir, so
//! concurrent requests never collide on upload paths. Cleanup is best-effort:
//! a failed removal is logged and never replaces the primary response.

use std::path::{Path, PathBuf};

use tracing::warn;
use uuid::Uuid;

use voxdoc_core::Result;

/// A request-scoped scratch directory holding uploaded payloads.
pub struct Scratch {
    dir: PathBuf,
}

impl Scratch {
    pub fn new() -> Self {
        Self {
            dir: std::env::temp_dir().join(format!("voxdoc-{}", Uuid::new_v4())),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub async fn save_audio(&self, bytes: &[u8]) -> Result<PathBuf> {
        self.save("audio.wav", bytes).await
    }

    pub async fn save_image(&self, bytes: &[u8]) -> Result<PathBuf> {
        self.save("image.jpg", bytes).await
    }

    async fn save(&self, name: &str, bytes: &[u8]) -> Result<PathBuf> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.dir.join(name);
        tokio::fs::write(&path, bytes).await?;
        Ok(path)
    }

    /// Remove the scratch directory and everything in it.
    ///
    /// Never fails: a removal error must not mask the pipeline's outcome.
    pub async fn cleanup(&self) {
        match tokio::fs::remove_dir_all(&self.dir).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(dir = %self.dir.display(), error = %e, "Failed to remove scratch dir"),
        }
    }
}

impl Default for Scratch {
    fn default() -> Self {
        Self::new()
    }
}
