//! Compose-time staging area for comment attachments.

use super::{LocalFile, PreviewHandle, PreviewStore};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// A staged file and the preview allocated for it, if it is an image.
#[derive(Debug)]
pub struct StagedFile {
    file: LocalFile,
    preview: Option<PreviewHandle>,
}

impl StagedFile {
    /// Returns the staged file.
    #[must_use]
    pub const fn file(&self) -> &LocalFile {
        &self.file
    }

    /// Returns the preview handle, if one was allocated.
    #[must_use]
    pub const fn preview(&self) -> Option<&PreviewHandle> {
        self.preview.as_ref()
    }
}

/// Ordered list of files staged for the next comment submission.
///
/// Every image gets a preview from the [`PreviewStore`] when staged; the
/// preview is released exactly once, when the file is unstaged, the area is
/// cleared or the area is dropped.
pub struct AttachmentStaging<P>
where
    P: PreviewStore,
{
    previews: Arc<P>,
    staged: Vec<StagedFile>,
}

impl<P> AttachmentStaging<P>
where
    P: PreviewStore,
{
    /// Creates an empty staging area.
    #[must_use]
    pub const fn new(previews: Arc<P>) -> Self {
        Self {
            previews,
            staged: Vec::new(),
        }
    }

    /// Appends `files`, allocating previews for images.
    pub fn stage(&mut self, files: impl IntoIterator<Item = LocalFile>) {
        for file in files {
            let preview = file.is_image().then(|| self.previews.create(&file));
            tracing::debug!(name = file.name(), size = file.size(), "file staged");
            self.staged.push(StagedFile { file, preview });
        }
    }

    /// Stages pasted clipboard image data under a synthesized filename.
    pub fn stage_pasted(&mut self, bytes: impl Into<Arc<[u8]>>, mime: &str, now: DateTime<Utc>) {
        let name = pasted_file_name(mime, now);
        self.stage([LocalFile::new(name, mime, bytes)]);
    }

    /// Removes the file at `index`, releasing its preview.
    ///
    /// Returns `None` when `index` is out of range.
    pub fn unstage(&mut self, index: usize) -> Option<LocalFile> {
        if index >= self.staged.len() {
            return None;
        }
        let StagedFile { file, preview } = self.staged.remove(index);
        if let Some(handle) = preview {
            self.previews.revoke(handle);
        }
        Some(file)
    }

    /// Removes every staged file, releasing all previews.
    pub fn clear(&mut self) {
        for StagedFile { preview, .. } in self.staged.drain(..) {
            if let Some(handle) = preview {
                self.previews.revoke(handle);
            }
        }
    }

    /// Returns the staged entries in staging order.
    #[must_use]
    pub fn staged(&self) -> &[StagedFile] {
        &self.staged
    }

    /// Iterates over the staged files in staging order.
    pub fn files(&self) -> impl Iterator<Item = &LocalFile> {
        self.staged.iter().map(StagedFile::file)
    }

    /// Returns copies of the staged files for upload.
    #[must_use]
    pub fn to_upload(&self) -> Vec<LocalFile> {
        self.files().cloned().collect()
    }

    /// Returns the number of staged files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.staged.len()
    }

    /// Returns `true` when nothing is staged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.staged.is_empty()
    }

    /// Returns the combined size of the staged files.
    #[must_use]
    pub fn total_bytes(&self) -> usize {
        self.files().map(LocalFile::size).sum()
    }
}

impl<P> Drop for AttachmentStaging<P>
where
    P: PreviewStore,
{
    fn drop(&mut self) {
        self.clear();
    }
}

/// Synthesizes the filename of pasted image data.
///
/// The extension comes from the MIME subtype; `svg+xml` maps to `svg` and
/// anything unrecognised falls back to `png`.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use taskboard::attachment::pasted_file_name;
///
/// let now = Utc.timestamp_millis_opt(1_760_000_000_123).unwrap();
/// assert_eq!(pasted_file_name("image/jpeg", now), "pasted-image-1760000000123.jpeg");
/// assert_eq!(pasted_file_name("image/svg+xml", now), "pasted-image-1760000000123.svg");
/// ```
#[must_use]
pub fn pasted_file_name(mime: &str, now: DateTime<Utc>) -> String {
    let subtype = mime
        .split_once('/')
        .map(|(_, subtype)| subtype.trim().to_ascii_lowercase())
        .unwrap_or_default();
    let extension = match subtype.as_str() {
        "svg+xml" => "svg",
        "jpeg" | "jpg" | "png" | "gif" | "webp" | "bmp" => subtype.as_str(),
        _ => "png",
    };
    format!("pasted-image-{}.{extension}", now.timestamp_millis())
}
