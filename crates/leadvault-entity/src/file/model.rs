//! File entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use leadvault_core::types::{FileId, FolderId};

/// A file attached to a record's document hierarchy.
///
/// Only metadata lives here; content is reachable through `source_url`
/// and never flows through this core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct File {
    /// Unique file identifier.
    pub id: FileId,
    /// The folder containing this file.
    pub folder_id: FolderId,
    /// The file name (including extension).
    pub name: String,
    /// MIME type of the file.
    pub mime_type: Option<String>,
    /// File size in bytes.
    pub size_bytes: u64,
    /// When the file was last modified.
    pub last_modified: DateTime<Utc>,
    /// Opaque reference to the stored content (`None` until the server
    /// assigns one).
    pub source_url: Option<String>,
}

impl File {
    /// Synthesize a file entity from raw upload input.
    pub fn from_upload(id: FileId, folder_id: FolderId, upload: &UploadFile) -> Self {
        Self {
            id,
            folder_id,
            name: upload.name.clone(),
            mime_type: upload.mime_type.clone(),
            size_bytes: upload.size_bytes,
            last_modified: upload.last_modified,
            source_url: None,
        }
    }

    /// Get the file extension (lowercase), if any.
    pub fn extension(&self) -> Option<String> {
        self.name
            .rsplit('.')
            .next()
            .filter(|ext| *ext != self.name)
            .map(|ext| ext.to_lowercase())
    }
}

/// Raw input for a file upload: metadata only, no content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadFile {
    /// The file name.
    pub name: String,
    /// MIME type, if known.
    pub mime_type: Option<String>,
    /// File size in bytes.
    pub size_bytes: u64,
    /// When the file was last modified.
    pub last_modified: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> File {
        File {
            id: FileId::new(),
            folder_id: FolderId::new(),
            name: "Quote.PDF".to_string(),
            mime_type: None,
            size_bytes: 10,
            last_modified: Utc::now(),
            source_url: None,
        }
    }

    #[test]
    fn test_extension_lowercased() {
        assert_eq!(sample().extension(), Some("pdf".to_string()));
    }

    #[test]
    fn test_extension_absent() {
        let mut file = sample();
        file.name = "README".to_string();
        assert_eq!(file.extension(), None);
    }
}
