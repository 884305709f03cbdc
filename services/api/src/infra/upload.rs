use std::path::PathBuf;

use anyhow::Context as _;
use uuid::Uuid;

use crate::domain::repository::UploadStore;
use crate::error::ApiServiceError;

/// Filesystem-backed photo storage. Files land under the configured upload
/// directory as `<uuid>-<sanitized original name>` and are served back via
/// the static `/uploads` route.
#[derive(Clone)]
pub struct FsUploadStore {
    root: PathBuf,
}

impl FsUploadStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

/// Keep only characters that are safe in a path segment.
fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}

impl UploadStore for FsUploadStore {
    async fn store(
        &self,
        original_name: &str,
        bytes: Vec<u8>,
    ) -> Result<String, ApiServiceError> {
        let file_name = format!("{}-{}", Uuid::new_v4(), sanitize_file_name(original_name));
        tokio::fs::create_dir_all(&self.root)
            .await
            .context("create upload dir")?;
        let path = self.root.join(&file_name);
        tokio::fs::write(&path, bytes)
            .await
            .with_context(|| format!("write upload {}", path.display()))?;
        Ok(format!("/uploads/{file_name}"))
    }
}
