//! Pure structural mutations over [`DocumentTree`].
//!
//! Every operation rebuilds exactly the folders on the path from the
//! root to the touched folder, recomputing cached aggregates on each
//! rebuilt node; every folder off that path is carried into the new tree
//! by `Arc` handle. A failed operation returns an error and the input
//! tree is never modified.

use std::sync::Arc;

use tracing::debug;

use leadvault_core::error::AppError;
use leadvault_core::result::AppResult;
use leadvault_core::types::{FileId, FolderId};
use leadvault_entity::file::{File, UploadFile};
use leadvault_entity::folder::Folder;

use crate::model::DocumentTree;

impl DocumentTree {
    /// Create a new empty folder under `parent_id`.
    ///
    /// The name is trimmed; a blank name is rejected. Sibling folders may
    /// share a name: no uniqueness-by-name constraint exists anywhere in
    /// the tree.
    pub fn create_folder(&self, parent_id: FolderId, name: &str) -> AppResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::invalid_name("Folder name cannot be empty"));
        }
        let child = Folder::new(FolderId::new(), name, Some(parent_id));
        debug!(%parent_id, child_id = %child.id, "create folder");
        self.rebuild_at(parent_id, move |parent| {
            parent.subfolders.push(Arc::new(child));
        })
    }

    /// Append synthesized files to `target`.
    ///
    /// Each upload input becomes a [`File`] with a fresh id; names are
    /// not deduplicated, so two files with identical names may coexist.
    pub fn upload_files(&self, target: FolderId, uploads: &[UploadFile]) -> AppResult<Self> {
        let files: Vec<File> = uploads
            .iter()
            .map(|u| File::from_upload(FileId::new(), target, u))
            .collect();
        debug!(%target, count = files.len(), "upload files");
        self.rebuild_at(target, move |folder| {
            folder.files.extend(files);
        })
    }

    /// Remove a file from its containing folder.
    ///
    /// Idempotent: an absent id returns a tree deeply equal to the input.
    pub fn delete_file(&self, file_id: FileId) -> Self {
        let Some((folder, _)) = self.resolve_file(file_id) else {
            return self.clone();
        };
        let folder_id = folder.id;
        debug!(%file_id, %folder_id, "delete file");
        self.rebuild_at(folder_id, move |f| {
            f.files.retain(|x| x.id != file_id);
        })
        .unwrap_or_else(|_| self.clone())
    }

    /// Remove a folder and its entire subtree.
    ///
    /// The root cannot be deleted. Callers holding a navigation path must
    /// re-run [`crate::NavigationState::reconcile`] afterwards so a path
    /// through the deleted folder truncates to the nearest survivor.
    pub fn delete_folder(&self, folder_id: FolderId) -> AppResult<Self> {
        if folder_id == self.root_id() {
            return Err(AppError::invalid_operation("Cannot delete the root folder"));
        }
        let parent_id = self
            .find_parent(folder_id)
            .ok_or_else(|| AppError::not_found(format!("Folder {folder_id} not found")))?
            .id;
        debug!(%folder_id, %parent_id, "delete folder");
        self.rebuild_at(parent_id, move |parent| {
            parent.subfolders.retain(|c| c.id != folder_id);
        })
    }

    /// Move a file into another folder, appending it to the destination's
    /// files and updating its `folder_id`.
    pub fn move_file(&self, file_id: FileId, destination_id: FolderId) -> AppResult<Self> {
        let (source, file) = self
            .resolve_file(file_id)
            .ok_or_else(|| AppError::not_found(format!("File {file_id} not found")))?;
        if !self.contains_folder(destination_id) {
            return Err(AppError::not_found(format!(
                "Destination folder {destination_id} not found"
            )));
        }
        let source_id = source.id;
        let mut moved = file.clone();
        moved.folder_id = destination_id;
        debug!(%file_id, %source_id, %destination_id, "move file");
        let detached = self.rebuild_at(source_id, move |f| {
            f.files.retain(|x| x.id != file_id);
        })?;
        detached.rebuild_at(destination_id, move |f| {
            f.files.push(moved);
        })
    }

    /// Rename a folder. The root cannot be renamed.
    pub fn rename_folder(&self, folder_id: FolderId, name: &str) -> AppResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::invalid_name("Folder name cannot be empty"));
        }
        if folder_id == self.root_id() {
            return Err(AppError::invalid_operation("Cannot rename the root folder"));
        }
        let name = name.to_string();
        debug!(%folder_id, new_name = %name, "rename folder");
        self.rebuild_at(folder_id, move |f| {
            f.name = name;
        })
    }

    /// Re-parent a folder under `new_parent_id`, carrying its whole
    /// subtree along.
    ///
    /// Moving the root, moving a folder into itself, or moving it into
    /// one of its own descendants is rejected.
    pub fn move_folder(&self, folder_id: FolderId, new_parent_id: FolderId) -> AppResult<Self> {
        if folder_id == self.root_id() {
            return Err(AppError::invalid_operation("Cannot move the root folder"));
        }
        if folder_id == new_parent_id {
            return Err(AppError::invalid_operation(
                "Cannot move a folder into itself",
            ));
        }
        let parent = self
            .find_parent(folder_id)
            .ok_or_else(|| AppError::not_found(format!("Folder {folder_id} not found")))?;
        if !self.contains_folder(new_parent_id) {
            return Err(AppError::not_found(format!(
                "Destination folder {new_parent_id} not found"
            )));
        }
        if self
            .ancestors_of(new_parent_id)
            .iter()
            .any(|a| a.id == folder_id)
        {
            return Err(AppError::invalid_operation(
                "Cannot move a folder into one of its descendants",
            ));
        }
        let parent_id = parent.id;
        if parent_id == new_parent_id {
            return Ok(self.clone());
        }
        let subtree = parent
            .child(folder_id)
            .cloned()
            .ok_or_else(|| AppError::internal("Parent lost its child during move"))?;
        let mut moved = (*subtree).clone();
        moved.parent_id = Some(new_parent_id);
        debug!(%folder_id, %parent_id, %new_parent_id, "move folder");
        let detached = self.rebuild_at(parent_id, move |p| {
            p.subfolders.retain(|c| c.id != folder_id);
        })?;
        detached.rebuild_at(new_parent_id, move |p| {
            p.subfolders.push(Arc::new(moved));
        })
    }

    /// Rebuild the path from the root to `target`, apply `edit` to the
    /// target folder, and recompute aggregates bottom-up along the path.
    fn rebuild_at<F>(&self, target: FolderId, edit: F) -> AppResult<Self>
    where
        F: FnOnce(&mut Folder),
    {
        let path = self
            .folder_path(target)
            .ok_or_else(|| AppError::not_found(format!("Folder {target} not found")))?;
        let new_root = rebuild_along(self.root_arc(), &path[1..], edit)?;
        Ok(Self::with_root(self.record_id(), new_root))
    }
}

fn rebuild_along<F>(node: &Arc<Folder>, rest: &[FolderId], edit: F) -> AppResult<Arc<Folder>>
where
    F: FnOnce(&mut Folder),
{
    let mut rebuilt = (**node).clone();
    match rest.split_first() {
        Some((next, remaining)) => {
            let pos = rebuilt
                .subfolders
                .iter()
                .position(|c| c.id == *next)
                .ok_or_else(|| AppError::internal("Rebuild path diverged from the tree"))?;
            rebuilt.subfolders[pos] = rebuild_along(&node.subfolders[pos], remaining, edit)?;
        }
        None => edit(&mut rebuilt),
    }
    rebuilt.recompute_aggregates();
    Ok(Arc::new(rebuilt))
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use leadvault_core::error::ErrorKind;
    use leadvault_core::types::RecordId;

    use super::*;

    fn upload(name: &str, size_bytes: u64) -> UploadFile {
        UploadFile {
            name: name.to_string(),
            mime_type: Some("application/pdf".to_string()),
            size_bytes,
            last_modified: Utc::now(),
        }
    }

    #[test]
    fn test_create_folder_rejects_blank_name() {
        let tree = DocumentTree::empty(RecordId::new());
        for name in ["", "   ", "\t\n"] {
            let err = tree.create_folder(tree.root_id(), name).expect_err("blank");
            assert_eq!(err.kind, ErrorKind::InvalidName);
        }
    }

    #[test]
    fn test_create_folder_trims_name() {
        let tree = DocumentTree::empty(RecordId::new());
        let tree = tree
            .create_folder(tree.root_id(), "  Contracts  ")
            .expect("create");
        assert_eq!(tree.root().subfolders[0].name, "Contracts");
    }

    #[test]
    fn test_create_folder_missing_parent() {
        let tree = DocumentTree::empty(RecordId::new());
        let err = tree
            .create_folder(FolderId::new(), "Contracts")
            .expect_err("missing parent");
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[test]
    fn test_sibling_folders_may_share_a_name() {
        let tree = DocumentTree::empty(RecordId::new());
        let tree = tree.create_folder(tree.root_id(), "Q1").expect("first");
        let tree = tree.create_folder(tree.root_id(), "Q1").expect("second");
        assert_eq!(tree.root().subfolder_count, 2);
        tree.validate().expect("duplicate names are legal");
    }

    #[test]
    fn test_sibling_files_may_share_a_name() {
        let tree = DocumentTree::empty(RecordId::new());
        let tree = tree
            .upload_files(
                tree.root_id(),
                &[upload("quote.pdf", 10), upload("quote.pdf", 20)],
            )
            .expect("upload");
        assert_eq!(tree.root().file_count, 2);
        tree.validate().expect("duplicate names are legal");
    }

    #[test]
    fn test_delete_file_is_idempotent() {
        let tree = DocumentTree::empty(RecordId::new());
        let tree = tree
            .upload_files(tree.root_id(), &[upload("quote.pdf", 10)])
            .expect("upload");
        let unchanged = tree.delete_file(FileId::new());
        assert_eq!(tree.root(), unchanged.root());
    }

    #[test]
    fn test_delete_root_is_rejected() {
        let tree = DocumentTree::empty(RecordId::new());
        let err = tree.delete_folder(tree.root_id()).expect_err("root");
        assert_eq!(err.kind, ErrorKind::InvalidOperation);
    }

    #[test]
    fn test_rename_folder() {
        let tree = DocumentTree::empty(RecordId::new());
        let tree = tree.create_folder(tree.root_id(), "Drafts").expect("create");
        let drafts = tree.root().subfolders[0].id;

        let renamed = tree.rename_folder(drafts, "Proposals").expect("rename");
        assert_eq!(renamed.resolve(drafts).expect("resolve").name, "Proposals");

        let err = tree.rename_folder(tree.root_id(), "X").expect_err("root");
        assert_eq!(err.kind, ErrorKind::InvalidOperation);
    }

    #[test]
    fn test_move_folder_rejects_cycles() {
        let tree = DocumentTree::empty(RecordId::new());
        let tree = tree.create_folder(tree.root_id(), "A").expect("a");
        let a = tree.root().subfolders[0].id;
        let tree = tree.create_folder(a, "B").expect("b");
        let b = tree.resolve(a).expect("a").subfolders[0].id;

        let err = tree.move_folder(a, a).expect_err("into itself");
        assert_eq!(err.kind, ErrorKind::InvalidOperation);

        let err = tree.move_folder(a, b).expect_err("into descendant");
        assert_eq!(err.kind, ErrorKind::InvalidOperation);
    }

    #[test]
    fn test_move_folder_reparents_subtree() {
        let tree = DocumentTree::empty(RecordId::new());
        let tree = tree.create_folder(tree.root_id(), "A").expect("a");
        let tree = tree.create_folder(tree.root_id(), "B").expect("b");
        let a = tree.root().subfolders[0].id;
        let b = tree.root().subfolders[1].id;
        let tree = tree.upload_files(a, &[upload("quote.pdf", 64)]).expect("up");

        let tree = tree.move_folder(a, b).expect("move");
        assert_eq!(tree.root().subfolder_count, 1);
        let b_folder = tree.resolve(b).expect("b");
        assert_eq!(b_folder.subfolders[0].id, a);
        assert_eq!(b_folder.total_size_bytes, 64);
        assert_eq!(tree.resolve(a).expect("a").parent_id, Some(b));
        tree.validate().expect("invariants hold");
    }

    #[test]
    fn test_failed_mutation_leaves_tree_untouched() {
        let tree = DocumentTree::empty(RecordId::new());
        let tree = tree.create_folder(tree.root_id(), "A").expect("a");
        let before = tree.clone();

        tree.create_folder(FolderId::new(), "X").expect_err("parent");
        tree.move_file(FileId::new(), tree.root_id())
            .expect_err("file");

        assert_eq!(before.root(), tree.root());
    }
}
