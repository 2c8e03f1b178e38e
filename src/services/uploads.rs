use rand::Rng;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

use crate::config::UploadConfig;

const ALLOWED_MIME_TYPES: [&str; 4] = ["image/png", "image/jpg", "image/jpeg", "application/pdf"];

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Only PNG, JPG, JPEG, and PDF files are allowed")]
    DisallowedType(String),

    #[error("File size exceeds limit of {limit} bytes")]
    TooLarge { limit: usize },

    #[error("Failed to store uploaded file: {0}")]
    Io(#[from] std::io::Error),
}

/// Result of a best-effort file removal. The caller decides how to log it;
/// no variant is ever fatal to the surrounding operation.
#[derive(Debug)]
pub enum CleanupOutcome {
    Removed,
    Missing,
    Failed(std::io::Error),
}

/// Writes multipart uploads into the configured directory under
/// collision-resistant names and removes files that listings no longer
/// reference.
#[derive(Clone)]
pub struct UploadService {
    config: UploadConfig,
}

impl UploadService {
    #[must_use]
    pub const fn new(config: UploadConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn max_file_size(&self) -> usize {
        self.config.max_file_size
    }

    #[must_use]
    pub fn directory(&self) -> &str {
        &self.config.directory
    }

    pub async fn ensure_directory(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.config.directory).await
    }

    /// Validate and persist one uploaded file, returning its storage path.
    pub async fn store(
        &self,
        original_name: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<String, UploadError> {
        if !Self::is_allowed_type(content_type) {
            return Err(UploadError::DisallowedType(content_type.to_string()));
        }

        if bytes.len() > self.config.max_file_size {
            return Err(UploadError::TooLarge {
                limit: self.config.max_file_size,
            });
        }

        self.ensure_directory().await?;

        let filename = unique_filename(original_name);
        let path = Path::new(&self.config.directory).join(&filename);
        fs::write(&path, bytes).await?;

        Ok(path.to_string_lossy().into_owned())
    }

    /// Remove a stored file, reporting (never raising) the outcome.
    pub async fn remove_file(&self, path: &str) -> CleanupOutcome {
        let path = PathBuf::from(path);
        if !path.exists() {
            return CleanupOutcome::Missing;
        }

        match fs::remove_file(&path).await {
            Ok(()) => CleanupOutcome::Removed,
            Err(e) => CleanupOutcome::Failed(e),
        }
    }

    #[must_use]
    pub fn is_allowed_type(content_type: &str) -> bool {
        ALLOWED_MIME_TYPES.contains(&content_type)
    }
}

/// `{random prefix}-{unix millis}-{original name}`, keeping the original
/// name visible while avoiding collisions.
fn unique_filename(original_name: &str) -> String {
    let timestamp = chrono::Utc::now().timestamp_millis();
    format!("{}-{}-{}", random_string(10), timestamp, original_name)
}

fn random_string(length: usize) -> String {
    const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allowed_types() {
        assert!(UploadService::is_allowed_type("image/png"));
        assert!(UploadService::is_allowed_type("image/jpeg"));
        assert!(UploadService::is_allowed_type("image/jpg"));
        assert!(UploadService::is_allowed_type("application/pdf"));
        assert!(!UploadService::is_allowed_type("text/plain"));
        assert!(!UploadService::is_allowed_type("image/gif"));
    }

    #[test]
    fn unique_names_keep_original_and_differ() {
        let a = unique_filename("house.png");
        let b = unique_filename("house.png");
        assert!(a.ends_with("-house.png"));
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn store_rejects_disallowed_and_oversized() {
        let dir = tempfile::tempdir().unwrap();
        let service = UploadService::new(UploadConfig {
            directory: dir.path().to_string_lossy().into_owned(),
            max_file_size: 8,
        });

        let err = service.store("a.txt", "text/plain", b"hi").await.unwrap_err();
        assert!(matches!(err, UploadError::DisallowedType(_)));

        let err = service
            .store("a.png", "image/png", b"123456789")
            .await
            .unwrap_err();
        assert!(matches!(err, UploadError::TooLarge { .. }));
    }

    #[tokio::test]
    async fn store_then_remove_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let service = UploadService::new(UploadConfig {
            directory: dir.path().to_string_lossy().into_owned(),
            max_file_size: 1024,
        });

        let path = service.store("a.png", "image/png", b"png").await.unwrap();
        assert!(std::path::Path::new(&path).exists());

        assert!(matches!(service.remove_file(&path).await, CleanupOutcome::Removed));
        assert!(matches!(service.remove_file(&path).await, CleanupOutcome::Missing));
    }
}
