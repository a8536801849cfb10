//! Folder entity model.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use leadvault_core::types::FolderId;

use crate::file::File;

/// A folder in a record's document hierarchy.
///
/// Folders form a tree. `subfolders` holds `Arc` handles so that a
/// mutation can rebuild the path from the root to the touched folder
/// while every unchanged subtree is carried over by reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Folder {
    /// Unique folder identifier.
    pub id: FolderId,
    /// Folder name.
    pub name: String,
    /// Parent folder ID (`None` only for the root).
    pub parent_id: Option<FolderId>,
    /// Files directly contained in this folder, in display order.
    pub files: Vec<File>,
    /// Child folders, in display order.
    pub subfolders: Vec<Arc<Folder>>,
    /// Cached count of directly contained files.
    pub file_count: u64,
    /// Cached count of direct child folders.
    pub subfolder_count: u64,
    /// Cached total size in bytes of every file in this subtree.
    pub total_size_bytes: u64,
}

impl Folder {
    /// Create an empty folder.
    pub fn new(id: FolderId, name: impl Into<String>, parent_id: Option<FolderId>) -> Self {
        Self {
            id,
            name: name.into(),
            parent_id,
            files: Vec::new(),
            subfolders: Vec::new(),
            file_count: 0,
            subfolder_count: 0,
            total_size_bytes: 0,
        }
    }

    /// Check if this is the root folder (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Look up a direct child folder by id.
    pub fn child(&self, id: FolderId) -> Option<&Arc<Folder>> {
        self.subfolders.iter().find(|f| f.id == id)
    }

    /// Recompute the cached aggregates from the live contents.
    ///
    /// Child subtree totals are trusted, so a caller rebuilding a path
    /// must recompute bottom-up.
    pub fn recompute_aggregates(&mut self) {
        self.file_count = self.files.len() as u64;
        self.subfolder_count = self.subfolders.len() as u64;
        self.total_size_bytes = self.files.iter().map(|f| f.size_bytes).sum::<u64>()
            + self
                .subfolders
                .iter()
                .map(|f| f.total_size_bytes)
                .sum::<u64>();
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use leadvault_core::types::FileId;

    use super::*;

    fn file(folder_id: FolderId, size_bytes: u64) -> File {
        File {
            id: FileId::new(),
            folder_id,
            name: "report.pdf".to_string(),
            mime_type: Some("application/pdf".to_string()),
            size_bytes,
            last_modified: Utc::now(),
            source_url: None,
        }
    }

    #[test]
    fn test_is_root() {
        let root = Folder::new(FolderId::new(), "Documents", None);
        assert!(root.is_root());

        let child = Folder::new(FolderId::new(), "Contracts", Some(root.id));
        assert!(!child.is_root());
    }

    #[test]
    fn test_recompute_aggregates() {
        let mut child = Folder::new(FolderId::new(), "Contracts", None);
        child.files.push(file(child.id, 500));
        child.recompute_aggregates();

        let mut parent = Folder::new(FolderId::new(), "Documents", None);
        parent.files.push(file(parent.id, 1_000));
        parent.files.push(file(parent.id, 2_000));
        parent.subfolders.push(Arc::new(child));
        parent.recompute_aggregates();

        assert_eq!(parent.file_count, 2);
        assert_eq!(parent.subfolder_count, 1);
        assert_eq!(parent.total_size_bytes, 3_500);
    }
}
