//! Document tree model and read-only queries.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use leadvault_core::error::AppError;
use leadvault_core::result::AppResult;
use leadvault_core::types::{FileId, FolderId, RecordId};
use leadvault_entity::file::File;
use leadvault_entity::folder::Folder;

/// The in-memory document hierarchy for one business record.
///
/// Cloning is cheap: the root is an [`Arc`], and mutations (see
/// [`crate::mutation`]) produce new trees that share every untouched
/// folder with their predecessor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentTree {
    /// The business record this hierarchy belongs to.
    record_id: RecordId,
    /// The single root folder.
    root: Arc<Folder>,
}

impl DocumentTree {
    /// Create a tree around an existing root folder.
    pub fn new(record_id: RecordId, root: Folder) -> Self {
        Self {
            record_id,
            root: Arc::new(root),
        }
    }

    /// Create a tree with an empty root folder.
    pub fn empty(record_id: RecordId) -> Self {
        Self::new(record_id, Folder::new(FolderId::new(), "Documents", None))
    }

    pub(crate) fn with_root(record_id: RecordId, root: Arc<Folder>) -> Self {
        Self { record_id, root }
    }

    /// The owning business record.
    pub fn record_id(&self) -> RecordId {
        self.record_id
    }

    /// The root folder.
    pub fn root(&self) -> &Folder {
        &self.root
    }

    pub(crate) fn root_arc(&self) -> &Arc<Folder> {
        &self.root
    }

    /// The root folder's id.
    pub fn root_id(&self) -> FolderId {
        self.root.id
    }

    /// Look up a folder anywhere in the tree.
    ///
    /// Depth-first from the root; O(size) worst case.
    pub fn resolve(&self, folder_id: FolderId) -> AppResult<&Folder> {
        find_folder(&self.root, folder_id)
            .ok_or_else(|| AppError::not_found(format!("Folder {folder_id} not found")))
    }

    /// Check whether a folder id exists anywhere in the tree.
    pub fn contains_folder(&self, folder_id: FolderId) -> bool {
        find_folder(&self.root, folder_id).is_some()
    }

    /// The folder whose `subfolders` contains `child_id`, or `None` when
    /// `child_id` is the root or absent.
    pub fn find_parent(&self, child_id: FolderId) -> Option<&Folder> {
        find_parent_of(&self.root, child_id)
    }

    /// Every ancestor of a folder, root first and inclusive of the
    /// target. Empty when the id is absent.
    pub fn ancestors_of(&self, folder_id: FolderId) -> Vec<&Folder> {
        let mut chain = Vec::new();
        if !path_to(&self.root, folder_id, &mut chain) {
            chain.clear();
        }
        chain
    }

    /// Locate a file and its containing folder.
    pub fn resolve_file(&self, file_id: FileId) -> Option<(&Folder, &File)> {
        find_file(&self.root, file_id)
    }

    /// The id chain from the root to a folder, inclusive.
    pub(crate) fn folder_path(&self, folder_id: FolderId) -> Option<Vec<FolderId>> {
        let chain = self.ancestors_of(folder_id);
        if chain.is_empty() {
            None
        } else {
            Some(chain.into_iter().map(|f| f.id).collect())
        }
    }

    /// Verify every tree invariant: a single root, global id uniqueness,
    /// parent/child containment consistency, and cached aggregates that
    /// match a recomputation.
    pub fn validate(&self) -> AppResult<()> {
        if self.root.parent_id.is_some() {
            return Err(AppError::invalid_operation("Root folder has a parent"));
        }
        let mut folder_ids = HashSet::new();
        let mut file_ids = HashSet::new();
        validate_node(&self.root, &mut folder_ids, &mut file_ids)?;
        Ok(())
    }
}

fn find_folder<'a>(node: &'a Folder, id: FolderId) -> Option<&'a Folder> {
    if node.id == id {
        return Some(node);
    }
    node.subfolders
        .iter()
        .find_map(|child| find_folder(child, id))
}

fn find_parent_of<'a>(node: &'a Folder, child_id: FolderId) -> Option<&'a Folder> {
    if node.subfolders.iter().any(|c| c.id == child_id) {
        return Some(node);
    }
    node.subfolders
        .iter()
        .find_map(|c| find_parent_of(c, child_id))
}

fn path_to<'a>(node: &'a Folder, target: FolderId, out: &mut Vec<&'a Folder>) -> bool {
    out.push(node);
    if node.id == target {
        return true;
    }
    for child in &node.subfolders {
        if path_to(child, target, out) {
            return true;
        }
    }
    out.pop();
    false
}

fn find_file<'a>(node: &'a Folder, id: FileId) -> Option<(&'a Folder, &'a File)> {
    if let Some(file) = node.files.iter().find(|f| f.id == id) {
        return Some((node, file));
    }
    node.subfolders.iter().find_map(|c| find_file(c, id))
}

/// Walks a subtree, checking ids and containment, and returns the actual
/// recomputed subtree size in bytes.
fn validate_node(
    folder: &Folder,
    folder_ids: &mut HashSet<FolderId>,
    file_ids: &mut HashSet<FileId>,
) -> AppResult<u64> {
    if !folder_ids.insert(folder.id) {
        return Err(AppError::invalid_operation(format!(
            "Duplicate folder id {}",
            folder.id
        )));
    }

    let mut subtree_size = 0u64;
    for file in &folder.files {
        if !file_ids.insert(file.id) {
            return Err(AppError::invalid_operation(format!(
                "Duplicate file id {}",
                file.id
            )));
        }
        if file.folder_id != folder.id {
            return Err(AppError::invalid_operation(format!(
                "File {} claims folder {} but lives in {}",
                file.id, file.folder_id, folder.id
            )));
        }
        subtree_size += file.size_bytes;
    }

    for child in &folder.subfolders {
        if child.parent_id != Some(folder.id) {
            return Err(AppError::invalid_operation(format!(
                "Folder {} claims parent {:?} but lives under {}",
                child.id, child.parent_id, folder.id
            )));
        }
        subtree_size += validate_node(child, folder_ids, file_ids)?;
    }

    if folder.file_count != folder.files.len() as u64
        || folder.subfolder_count != folder.subfolders.len() as u64
        || folder.total_size_bytes != subtree_size
    {
        return Err(AppError::invalid_operation(format!(
            "Cached aggregates on folder {} diverge from contents",
            folder.id
        )));
    }

    Ok(subtree_size)
}
