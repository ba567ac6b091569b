//! File attachments and the per-slot file cache.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::error::{PortalError, Result};

/// A named, typed, sized file held by reference inside a record section.
///
/// Only metadata and the on-disk location are kept; the bytes are read when a
/// multipart body is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileAttachment {
    /// File name sent to the server
    pub file_name: String,

    /// Declared MIME type
    pub content_type: String,

    /// Size in bytes
    pub size: u64,

    /// Location of the file on disk
    pub path: PathBuf,
}

impl FileAttachment {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        size: u64,
        path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            size,
            path: path.into(),
        }
    }

    /// Build an attachment from a file on disk, taking the MIME type from
    /// the file extension.
    ///
    /// # Errors
    ///
    /// Returns `PortalError::FileSystem` if the file cannot be inspected and
    /// `PortalError::InvalidInput` if the path is not a regular file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path).map_err(|e| PortalError::FileSystem {
            path: path.to_path_buf(),
            source: e,
        })?;
        if !metadata.is_file() {
            return Err(PortalError::invalid_input("file")
                .with_reason(format!("'{}' is not a regular file", path.display())));
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let content_type = mime_for_extension(
            path.extension()
                .map(|e| e.to_string_lossy().to_lowercase())
                .as_deref(),
        );

        Ok(Self::new(file_name, content_type, metadata.len(), path))
    }

    /// Lowercased extension of the file name, if any.
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.file_name)
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
    }
}

fn mime_for_extension(ext: Option<&str>) -> &'static str {
    match ext {
        Some("pdf") => "application/pdf",
        Some("doc") => "application/msword",
        Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        Some("xls") => "application/vnd.ms-excel",
        Some("xlsx") => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}

/// Remembers the last attachment per upload slot.
///
/// Slots are named `section.field` (e.g. `grant.budget`). The cache lets the
/// wizard put an upload back when the section owning it was cleared while
/// the user navigated between steps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileCache(BTreeMap<String, FileAttachment>);

impl FileCache {
    /// Remember `file` as the latest upload for `slot`.
    pub fn remember(&mut self, slot: impl Into<String>, file: FileAttachment) {
        self.0.insert(slot.into(), file);
    }

    /// Forget the upload for `slot`.
    pub fn forget(&mut self, slot: &str) -> Option<FileAttachment> {
        self.0.remove(slot)
    }

    pub fn get(&self, slot: &str) -> Option<&FileAttachment> {
        self.0.get(slot)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}
