use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::capture::CaptureError;
use crate::forms::upload::{FilePolicy, PHOTO_POLICY, mime_for_path};
use crate::http::FilePart;

const SOURCE: &str = "Camera";

/// Image taken as attendance proof.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedPhoto {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl CapturedPhoto {
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn into_part(self, field: &str) -> FilePart {
        FilePart {
            field: field.to_string(),
            file_name: self.file_name,
            mime: self.mime,
            bytes: self.bytes,
        }
    }
}

/// Single snapshot capture. The device handle is acquired and released
/// inside the call.
#[async_trait]
pub trait CameraCapture: Send + Sync {
    async fn capture(&self) -> Result<CapturedPhoto, CaptureError>;
}

/// Uses an image file picked by the user instead of a live camera.
#[derive(Debug, Clone)]
pub struct FilePhotoCapture {
    path: PathBuf,
    policy: FilePolicy,
}

impl FilePhotoCapture {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            policy: PHOTO_POLICY,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CameraCapture for FilePhotoCapture {
    async fn capture(&self) -> Result<CapturedPhoto, CaptureError> {
        let mime = mime_for_path(&self.path).ok_or_else(|| {
            CaptureError::Invalid(format!("Unsupported file type: {}", self.path.display()))
        })?;

        // size is checked from metadata so oversized files are never read
        let meta = tokio::fs::metadata(&self.path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => CaptureError::Unavailable(SOURCE),
            std::io::ErrorKind::PermissionDenied => CaptureError::PermissionDenied(SOURCE),
            _ => CaptureError::Invalid(e.to_string()),
        })?;
        self.policy
            .check(mime, meta.len())
            .map_err(|e| CaptureError::Invalid(e.message))?;

        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| CaptureError::Invalid(e.to_string()))?;
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "photo".to_string());

        debug!(file = %file_name, bytes = bytes.len(), "Photo captured from file");
        Ok(CapturedPhoto {
            file_name,
            mime: mime.to_string(),
            bytes,
        })
    }
}
