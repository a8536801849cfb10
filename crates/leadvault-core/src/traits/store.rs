//! Document-persistence boundary trait and its wire DTOs.
//!
//! The remote CRM API speaks camelCase JSON with flat folder lists; the
//! nested in-memory tree is built from these DTOs by the sync adapter. A
//! `null` folder reference on the wire means "attached to the record
//! root"; internally every file and folder carries a concrete parent id.
//!
//! All sizes are transmitted in bytes. Human-readable size strings are a
//! presentation-layer derivation, not part of the stored model.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::result::AppResult;
use crate::types::{FileId, FolderId, RecordId};

/// A folder as transmitted by the document-persistence API.
///
/// Folders arrive as a flat list linked by `parent_id`; `None` marks a
/// top-level folder on the record. Each folder carries its own files.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderDto {
    /// Unique folder identifier.
    pub id: FolderId,
    /// Containing folder, `None` for a top-level folder.
    pub parent_id: Option<FolderId>,
    /// Folder name.
    pub name: String,
    /// Files directly contained in this folder.
    #[serde(default)]
    pub files: Vec<FileDto>,
}

/// A file as transmitted by the document-persistence API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDto {
    /// Unique file identifier.
    pub id: FileId,
    /// Containing folder, `None` when attached directly to the record root.
    pub folder_id: Option<FolderId>,
    /// File name (including extension).
    pub name: String,
    /// MIME type of the file.
    pub mime_type: Option<String>,
    /// File size in bytes.
    pub size_bytes: u64,
    /// When the file was last modified.
    pub last_modified: DateTime<Utc>,
    /// Opaque reference to the stored content.
    pub source_url: Option<String>,
}

/// The full document snapshot for one business record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSnapshot {
    /// Every folder on the record, flat.
    pub folders: Vec<FolderDto>,
    /// Files attached directly to the record root.
    pub root_files: Vec<FileDto>,
    /// Total number of files on the record.
    pub total_files: u64,
    /// Total number of folders on the record.
    pub total_folders: u64,
    /// Total size in bytes of every file on the record.
    pub total_size_bytes: u64,
}

/// Request body for creating a folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFolderRequest {
    /// Folder name.
    pub name: String,
    /// Parent folder, `None` for top level.
    pub parent_id: Option<FolderId>,
}

/// Metadata for one file in an upload request.
///
/// No content travels through this core; the collaborator transfers bytes
/// out of band against the returned `source_url`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadFileDto {
    /// File name.
    pub name: String,
    /// MIME type, if known.
    pub mime_type: Option<String>,
    /// File size in bytes.
    pub size_bytes: u64,
    /// When the file was last modified.
    pub last_modified: DateTime<Utc>,
}

/// Request body for uploading files to a folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    /// Destination folder, `None` for the record root.
    pub folder_id: Option<FolderId>,
    /// Files to upload.
    pub files: Vec<UploadFileDto>,
}

/// Request body for moving a file between folders.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveFileRequest {
    /// The file to move.
    pub file_id: FileId,
    /// Destination folder, `None` for the record root.
    pub destination_folder_id: Option<FolderId>,
}

/// Trait for the remote document-persistence collaborator.
///
/// Implementations exist for the CRM HTTP API and for an in-process
/// memory store used in tests. The [`DocumentStore`] trait is defined
/// here in `leadvault-core` and implemented in `leadvault-client`.
///
/// Implementations do not retry, queue, or reorder calls; that policy
/// belongs to the collaborator issuing them.
#[async_trait]
pub trait DocumentStore: Send + Sync + std::fmt::Debug + 'static {
    /// Fetch the full document snapshot for a record.
    async fn fetch_documents(&self, record_id: RecordId) -> AppResult<DocumentSnapshot>;

    /// Create a folder on a record.
    async fn create_folder(
        &self,
        record_id: RecordId,
        req: &CreateFolderRequest,
    ) -> AppResult<FolderDto>;

    /// Rename a folder.
    async fn rename_folder(&self, folder_id: FolderId, name: &str) -> AppResult<FolderDto>;

    /// Move a folder under a new parent (`None` for top level).
    async fn move_folder(
        &self,
        folder_id: FolderId,
        new_parent_id: Option<FolderId>,
    ) -> AppResult<FolderDto>;

    /// Delete a folder and everything beneath it.
    async fn delete_folder(&self, folder_id: FolderId) -> AppResult<()>;

    /// Register uploaded files on a record.
    async fn upload_files(
        &self,
        record_id: RecordId,
        req: &UploadRequest,
    ) -> AppResult<Vec<FileDto>>;

    /// Delete a file.
    async fn delete_file(&self, file_id: FileId) -> AppResult<()>;

    /// Move a file between folders.
    async fn move_file(&self, req: &MoveFileRequest) -> AppResult<FileDto>;
}
