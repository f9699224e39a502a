//! Attachment staging for comment composition.
//!
//! Files are staged locally before a comment is submitted. Staged images
//! hold a preview resource from a [`PreviewStore`] until they are unstaged,
//! cleared or uploaded. Attachments returned by the backend are classified
//! as images or downloadable files by filename alone.

pub mod adapters;
mod domain;
mod ports;
mod staging;

pub use domain::{AttachmentDescriptor, AttachmentKind, IMAGE_EXTENSIONS, LocalFile, classify};
#[cfg(test)]
pub use ports::MockPreviewStore;
pub use ports::{PreviewHandle, PreviewStore};
pub use staging::{AttachmentStaging, StagedFile, pasted_file_name};
