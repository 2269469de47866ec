//! Client-side file checks run before any upload is attempted.

use std::collections::HashMap;
use std::path::Path;

use once_cell::sync::Lazy;

use crate::error::ValidationError;
use crate::http::FilePart;

const MB: u64 = 1024 * 1024;

/// Size cap and MIME allow-list for one kind of upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilePolicy {
    pub field: &'static str,
    pub max_bytes: u64,
    pub allowed_mime: &'static [&'static str],
}

pub const PHOTO_POLICY: FilePolicy = FilePolicy {
    field: "photo",
    max_bytes: 5 * MB,
    allowed_mime: &["image/jpeg", "image/png", "image/webp"],
};

pub const ATTACHMENT_POLICY: FilePolicy = FilePolicy {
    field: "attachment",
    max_bytes: 10 * MB,
    allowed_mime: &["image/jpeg", "image/png", "image/webp", "application/pdf"],
};

pub const LOGO_POLICY: FilePolicy = FilePolicy {
    field: "logo",
    max_bytes: 2 * MB,
    allowed_mime: &["image/jpeg", "image/png", "image/svg+xml"],
};

static MIME_BY_EXTENSION: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("jpg", "image/jpeg"),
        ("jpeg", "image/jpeg"),
        ("png", "image/png"),
        ("webp", "image/webp"),
        ("svg", "image/svg+xml"),
        ("pdf", "application/pdf"),
    ])
});

/// MIME type guessed from the file extension, if it is one we upload.
pub fn mime_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    MIME_BY_EXTENSION.get(ext.as_str()).copied()
}

impl FilePolicy {
    pub fn check(&self, mime: &str, size: u64) -> Result<(), ValidationError> {
        if !self.allowed_mime.iter().any(|allowed| *allowed == mime) {
            return Err(ValidationError::new(
                self.field,
                format!("File type {mime} is not allowed"),
            ));
        }
        if size == 0 {
            return Err(ValidationError::new(self.field, "File is empty"));
        }
        if size > self.max_bytes {
            return Err(ValidationError::new(
                self.field,
                format!("File must be at most {} MB", self.max_bytes / MB),
            ));
        }
        Ok(())
    }

    pub fn check_part(&self, part: &FilePart) -> Result<(), ValidationError> {
        self.check(&part.mime, part.bytes.len() as u64)
    }

    /// Read a picked file and turn it into an upload part, refusing it
    /// before reading when the type or size is wrong.
    pub fn load(&self, path: &Path) -> Result<FilePart, ValidationError> {
        let mime = mime_for_path(path).ok_or_else(|| {
            ValidationError::new(self.field, format!("Unsupported file: {}", path.display()))
        })?;
        let size = std::fs::metadata(path)
            .map_err(|e| ValidationError::new(self.field, e.to_string()))?
            .len();
        self.check(mime, size)?;

        let bytes =
            std::fs::read(path).map_err(|e| ValidationError::new(self.field, e.to_string()))?;
        Ok(FilePart {
            field: self.field.to_string(),
            file_name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| self.field.to_string()),
            mime: mime.to_string(),
            bytes,
        })
    }
}
