//! Structural-change intents mirrored to the persistence collaborator.

use serde::{Deserialize, Serialize};

use leadvault_core::types::{FileId, FolderId};

use crate::file::UploadFile;

/// One structural change to a document tree, as issued by the UI.
///
/// Intents carry the locally allocated ids of the optimistic mutation;
/// the server may assign different ids, and the two views converge again
/// at the next full snapshot load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DocumentIntent {
    /// Create a folder under `parent_id`.
    CreateFolder {
        /// Target parent folder.
        parent_id: FolderId,
        /// Name for the new folder.
        name: String,
    },
    /// Rename a folder.
    RenameFolder {
        /// The folder to rename.
        folder_id: FolderId,
        /// The new name.
        name: String,
    },
    /// Move a folder under a new parent.
    MoveFolder {
        /// The folder to move.
        folder_id: FolderId,
        /// The new parent folder.
        new_parent_id: FolderId,
    },
    /// Delete a folder and its entire subtree.
    DeleteFolder {
        /// The folder to delete.
        folder_id: FolderId,
    },
    /// Upload files into a folder.
    UploadFiles {
        /// Destination folder.
        folder_id: FolderId,
        /// Raw upload inputs.
        files: Vec<UploadFile>,
    },
    /// Delete a file.
    DeleteFile {
        /// The file to delete.
        file_id: FileId,
    },
    /// Move a file to another folder.
    MoveFile {
        /// The file to move.
        file_id: FileId,
        /// Destination folder.
        destination_id: FolderId,
    },
}
