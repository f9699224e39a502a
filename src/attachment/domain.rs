//! Local files, uploaded attachment descriptors and their classification.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// File extensions rendered as inline image previews.
pub const IMAGE_EXTENSIONS: [&str; 7] = ["jpg", "jpeg", "png", "gif", "webp", "bmp", "svg"];

/// How an uploaded attachment is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttachmentKind {
    /// Previewable image.
    Image,
    /// Downloadable link.
    File,
}

/// Classifies an attachment by its filename extension, case-insensitively.
///
/// # Examples
///
/// ```
/// use taskboard::attachment::{AttachmentKind, classify};
///
/// assert_eq!(classify("Screenshot.PNG"), AttachmentKind::Image);
/// assert_eq!(classify("invoice.pdf"), AttachmentKind::File);
/// assert_eq!(classify("README"), AttachmentKind::File);
/// ```
#[must_use]
pub fn classify(filename: &str) -> AttachmentKind {
    let is_image = Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        });
    if is_image {
        AttachmentKind::Image
    } else {
        AttachmentKind::File
    }
}

/// File selected or pasted on the client, not yet uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFile {
    name: String,
    mime: String,
    bytes: Arc<[u8]>,
}

impl LocalFile {
    /// Creates a local file handle.
    #[must_use]
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            bytes: bytes.into(),
        }
    }

    /// Returns the filename.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the MIME type.
    #[must_use]
    pub fn mime(&self) -> &str {
        &self.mime
    }

    /// Returns the file contents.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the size in bytes.
    #[must_use]
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` for `image/*` MIME types.
    #[must_use]
    pub fn is_image(&self) -> bool {
        self.mime
            .split_once('/')
            .is_some_and(|(kind, _)| kind.eq_ignore_ascii_case("image"))
    }
}

/// Attachment stored by the backend alongside a comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentDescriptor {
    /// Stored filename.
    pub filename: String,
    /// Storage path relative to the storage base URL.
    pub path: String,
    /// Filename as uploaded.
    pub original_name: String,
    /// Size in bytes.
    pub size: u64,
    /// Upload timestamp.
    pub uploaded_at: DateTime<Utc>,
}

impl AttachmentDescriptor {
    /// Returns how the attachment is presented.
    #[must_use]
    pub fn kind(&self) -> AttachmentKind {
        classify(&self.filename)
    }

    /// Returns the name shown to users.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.original_name.trim().is_empty() {
            &self.filename
        } else {
            &self.original_name
        }
    }

    /// Resolves the download URL under `storage_base`.
    #[must_use]
    pub fn url(&self, storage_base: &str) -> String {
        format!(
            "{}/{}",
            storage_base.trim_end_matches('/'),
            self.path.trim_start_matches('/')
        )
    }
}
