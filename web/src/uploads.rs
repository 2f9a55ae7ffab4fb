//! Image uploads: naming, allowlists, size caps, disk layout.
//!
//! Files land under `{root}/{profiles|photo-edit-requests}` and are
//! served back at `/uploads/...`. Stored paths use the public form so
//! clients can use them directly.

use crate::error::AppError;
use chrono::Utc;
use lumen_core::model::PhotoMeta;
use rand::Rng;
use std::path::{Path, PathBuf};

/// 5 MB cap for profile images.
pub const PROFILE_MAX_BYTES: usize = 5 * 1024 * 1024;

/// 10 MB cap per photo on edit requests.
pub const EDIT_PHOTO_MAX_BYTES: usize = 10 * 1024 * 1024;

/// Extensions accepted for profile images.
pub const PROFILE_EXTENSIONS: &[&str] = &["jpeg", "jpg", "png", "gif", "webp"];

/// Extensions accepted for edit request photos.
pub const EDIT_PHOTO_EXTENSIONS: &[&str] = &["jpeg", "jpg", "png", "gif", "webp", "bmp", "tiff"];

/// Where uploads live on disk.
#[derive(Debug, Clone)]
pub struct UploadConfig {
    root: PathBuf,
}

impl UploadConfig {
    /// Root directory served at `/uploads`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory served at `/uploads`.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Persist an uploaded image under `subdir` with a generated name.
    ///
    /// The original filename's extension and the declared content type
    /// must both pass the allowlist, and the payload must fit the cap.
    ///
    /// # Errors
    ///
    /// Returns a 400-level [`AppError`] for disallowed types or
    /// oversized payloads, a 500-level one when the write fails.
    pub async fn save_image(
        &self,
        subdir: &str,
        prefix: &str,
        original_name: &str,
        content_type: Option<&str>,
        data: &[u8],
        max_bytes: usize,
        allowed: &[&str],
    ) -> Result<PhotoMeta, AppError> {
        let ext = Path::new(original_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let mime_ok = content_type
            .is_some_and(|ct| allowed.iter().any(|a| ct.to_ascii_lowercase().contains(a)));
        if !allowed.contains(&ext.as_str()) || !mime_ok {
            return Err(AppError::bad_request("Only image files are allowed"));
        }
        if data.len() > max_bytes {
            return Err(AppError::bad_request(format!(
                "File too large. Maximum size is {} MB",
                max_bytes / (1024 * 1024)
            )));
        }

        let filename = format!(
            "{prefix}-{}-{}.{ext}",
            Utc::now().timestamp_millis(),
            rand::thread_rng().gen_range(0..1_000_000_000u64)
        );
        let dir = self.root.join(subdir);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| AppError::internal(format!("Failed to prepare upload dir: {e}")))?;
        tokio::fs::write(dir.join(&filename), data)
            .await
            .map_err(|e| AppError::internal(format!("Failed to store upload: {e}")))?;

        #[allow(clippy::cast_possible_wrap)]
        let size = data.len() as i64;
        Ok(PhotoMeta {
            filename: filename.clone(),
            original_name: original_name.to_string(),
            path: format!("/uploads/{subdir}/{filename}"),
            size,
            uploaded_at: Utc::now(),
        })
    }

    /// Best-effort removal of a stored file by its public path.
    /// Failures are logged, never propagated.
    pub async fn delete_by_public_path(&self, public_path: &str) {
        let Some(relative) = public_path.strip_prefix("/uploads/") else {
            return;
        };
        let on_disk = self.root.join(relative);
        if let Err(e) = tokio::fs::remove_file(&on_disk).await {
            tracing::warn!(path = %on_disk.display(), error = %e, "failed to remove upload");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;

    fn temp_config() -> UploadConfig {
        let dir = std::env::temp_dir().join(format!("lumen-uploads-{}", uuid::Uuid::new_v4()));
        UploadConfig::new(dir)
    }

    #[tokio::test]
    async fn test_save_and_delete_round_trip() {
        let config = temp_config();
        let meta = config
            .save_image(
                "profiles",
                "profile",
                "me.png",
                Some("image/png"),
                b"not really a png",
                PROFILE_MAX_BYTES,
                PROFILE_EXTENSIONS,
            )
            .await
            .unwrap();
        assert!(meta.path.starts_with("/uploads/profiles/profile-"));
        assert_eq!(meta.original_name, "me.png");

        let on_disk = config.root().join(meta.path.trim_start_matches("/uploads/"));
        assert!(on_disk.exists());
        config.delete_by_public_path(&meta.path).await;
        assert!(!on_disk.exists());
    }

    #[tokio::test]
    async fn test_rejects_disallowed_extension_and_mime() {
        let config = temp_config();
        let err = config
            .save_image(
                "profiles",
                "profile",
                "malware.exe",
                Some("application/octet-stream"),
                b"nope",
                PROFILE_MAX_BYTES,
                PROFILE_EXTENSIONS,
            )
            .await;
        assert!(err.is_err());

        // Right extension but wrong declared type still fails.
        let err = config
            .save_image(
                "profiles",
                "profile",
                "photo.png",
                Some("application/octet-stream"),
                b"nope",
                PROFILE_MAX_BYTES,
                PROFILE_EXTENSIONS,
            )
            .await;
        assert!(err.is_err());
    }

    #[tokio::test]
    async fn test_rejects_oversized_payload() {
        let config = temp_config();
        let big = vec![0u8; 16];
        let err = config
            .save_image(
                "profiles",
                "profile",
                "photo.jpg",
                Some("image/jpeg"),
                &big,
                8,
                PROFILE_EXTENSIONS,
            )
            .await;
        assert!(err.is_err());
    }
}
