use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::categorizer::{DocumentType, RequirementCheck};
use crate::error::ConvertError;
use crate::sanitize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    Pending,
    Processing,
    Completed,
    Error,
}

/// Where a record's payload comes from. Reading never consumes it.
#[derive(Debug, Clone)]
pub enum FileSource {
    Memory(Arc<[u8]>),
    Path(PathBuf),
}

impl FileSource {
    pub async fn read(&self, name: &str) -> Result<Vec<u8>, ConvertError> {
        match self {
            Self::Memory(bytes) => Ok(bytes.to_vec()),
            Self::Path(path) => {
                tracing::debug!(path = %sanitize::redact_path(path), "Reading source file");
                tokio::fs::read(path)
                    .await
                    .map_err(|e| ConvertError::ReadSource {
                        name: name.to_string(),
                        source: e,
                    })
            }
        }
    }
}

/// Output of a successful formatting stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedOutput {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

/// One submitted document tracked through classification and formatting.
///
/// A clone is a separate record with its own id, so a clone and its source
/// can share a batch.
#[derive(Debug)]
pub struct FileRecord {
    id: String,
    original_name: String,
    source: FileSource,
    /// Mime type guessed from the original name.
    pub source_mime: Option<String>,
    pub detected_type: Option<DocumentType>,
    pub new_name: Option<String>,
    pub requirement: Option<RequirementCheck>,
    pub status: FileStatus,
    pub progress: u8,
    pub error: Option<String>,
    pub formatted: Option<FormattedOutput>,
}

impl Clone for FileRecord {
    fn clone(&self) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            original_name: self.original_name.clone(),
            source: self.source.clone(),
            source_mime: self.source_mime.clone(),
            detected_type: self.detected_type,
            new_name: self.new_name.clone(),
            requirement: self.requirement.clone(),
            status: self.status,
            progress: self.progress,
            error: self.error.clone(),
            formatted: self.formatted.clone(),
        }
    }
}

impl FileRecord {
    fn new_internal(original_name: String, source: FileSource) -> Self {
        let source_mime = mime_guess::from_path(&original_name)
            .first()
            .map(|m| m.to_string());
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            original_name,
            source,
            source_mime,
            detected_type: None,
            new_name: None,
            requirement: None,
            status: FileStatus::Pending,
            progress: 0,
            error: None,
            formatted: None,
        }
    }

    /// Creates a record for an in-memory upload.
    pub fn from_bytes(original_name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self::new_internal(original_name.into(), FileSource::Memory(bytes.into()))
    }

    /// Creates a record backed by a file on disk. The file is read lazily.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Self::new_internal(name, FileSource::Path(path.to_path_buf()))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn original_name(&self) -> &str {
        &self.original_name
    }

    pub fn source(&self) -> &FileSource {
        &self.source
    }

    /// Final extension of the original name, without the dot.
    pub fn extension(&self) -> Option<&str> {
        Path::new(&self.original_name)
            .extension()
            .and_then(|e| e.to_str())
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.status, FileStatus::Completed | FileStatus::Error)
    }

    pub(crate) fn begin(&mut self) {
        self.status = FileStatus::Processing;
        self.progress = 0;
        self.error = None;
    }

    pub(crate) fn complete(&mut self) {
        self.status = FileStatus::Completed;
        self.progress = 100;
        self.error = None;
    }

    pub(crate) fn fail(&mut self, message: impl Into<String>) {
        self.status = FileStatus::Error;
        self.error = Some(message.into());
    }
}
