//! Snapshot and intent translation between the tree model and the
//! document-persistence collaborator.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info, warn};

use leadvault_core::result::AppResult;
use leadvault_core::traits::store::{
    CreateFolderRequest, DocumentSnapshot, DocumentStore, FileDto, FolderDto, MoveFileRequest,
    UploadFileDto, UploadRequest,
};
use leadvault_core::types::{FolderId, RecordId};
use leadvault_entity::file::{File, UploadFile};
use leadvault_entity::folder::Folder;
use leadvault_entity::intent::DocumentIntent;
use leadvault_tree::DocumentTree;

/// Boundary adapter for one record's documents.
///
/// `load` turns the flat wire snapshot into a nested tree; `commit`
/// turns one mutation intent into exactly one API call. Nothing is
/// retried or queued, and returned server entities are discarded: the
/// optimistic tree keeps its locally allocated ids until the next load.
#[derive(Debug)]
pub struct DocumentSync<S> {
    /// The persistence collaborator.
    store: S,
    /// The business record whose documents this adapter manages.
    record_id: RecordId,
}

impl<S: DocumentStore> DocumentSync<S> {
    /// Create an adapter for one record.
    pub fn new(store: S, record_id: RecordId) -> Self {
        Self { store, record_id }
    }

    /// The owning business record.
    pub fn record_id(&self) -> RecordId {
        self.record_id
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Fetch the record's snapshot and build a document tree from it.
    pub async fn load(&self) -> AppResult<DocumentTree> {
        let snapshot = self.store.fetch_documents(self.record_id).await?;
        debug!(
            record_id = %self.record_id,
            folders = snapshot.total_folders,
            files = snapshot.total_files,
            "loaded document snapshot"
        );
        tree_from_snapshot(self.record_id, &snapshot)
    }

    /// Mirror one structural change to the persistence API.
    ///
    /// The tree's synthetic root id becomes `null` on the wire.
    pub async fn commit(&self, tree: &DocumentTree, intent: &DocumentIntent) -> AppResult<()> {
        let root_id = tree.root_id();
        match intent {
            DocumentIntent::CreateFolder { parent_id, name } => {
                let req = CreateFolderRequest {
                    name: name.clone(),
                    parent_id: wire_folder(root_id, *parent_id),
                };
                self.store.create_folder(self.record_id, &req).await?;
            }
            DocumentIntent::RenameFolder { folder_id, name } => {
                self.store.rename_folder(*folder_id, name).await?;
            }
            DocumentIntent::MoveFolder {
                folder_id,
                new_parent_id,
            } => {
                self.store
                    .move_folder(*folder_id, wire_folder(root_id, *new_parent_id))
                    .await?;
            }
            DocumentIntent::DeleteFolder { folder_id } => {
                self.store.delete_folder(*folder_id).await?;
            }
            DocumentIntent::UploadFiles { folder_id, files } => {
                let req = UploadRequest {
                    folder_id: wire_folder(root_id, *folder_id),
                    files: files.iter().map(upload_dto).collect(),
                };
                self.store.upload_files(self.record_id, &req).await?;
            }
            DocumentIntent::DeleteFile { file_id } => {
                self.store.delete_file(*file_id).await?;
            }
            DocumentIntent::MoveFile {
                file_id,
                destination_id,
            } => {
                let req = MoveFileRequest {
                    file_id: *file_id,
                    destination_folder_id: wire_folder(root_id, *destination_id),
                };
                self.store.move_file(&req).await?;
            }
        }
        info!(
            record_id = %self.record_id,
            intent = intent_label(intent),
            "committed document intent"
        );
        Ok(())
    }
}

/// Build a nested document tree from a flat wire snapshot.
///
/// The record root does not exist on the wire; a synthetic root folder
/// is allocated, top-level folders are re-parented under it, and
/// `folderId: null` files attach to it. Folders whose parent id is
/// unknown are dropped with a warning.
pub fn tree_from_snapshot(
    record_id: RecordId,
    snapshot: &DocumentSnapshot,
) -> AppResult<DocumentTree> {
    let root_id = FolderId::new();
    let mut children: HashMap<Option<FolderId>, Vec<&FolderDto>> = HashMap::new();
    for dto in &snapshot.folders {
        children.entry(dto.parent_id).or_default().push(dto);
    }

    let mut root = Folder::new(root_id, "Documents", None);
    root.files = snapshot
        .root_files
        .iter()
        .map(|f| file_from_dto(f, root_id))
        .collect();
    for dto in children.remove(&None).unwrap_or_default() {
        let subtree = build_folder(dto, root_id, &mut children);
        root.subfolders.push(Arc::new(subtree));
    }
    root.recompute_aggregates();

    for orphans in children.values() {
        for dto in orphans {
            warn!(folder_id = %dto.id, parent_id = ?dto.parent_id, "dropping orphan folder from snapshot");
        }
    }

    let tree = DocumentTree::new(record_id, root);
    tree.validate()?;
    Ok(tree)
}

fn build_folder(
    dto: &FolderDto,
    parent_id: FolderId,
    children: &mut HashMap<Option<FolderId>, Vec<&FolderDto>>,
) -> Folder {
    let mut folder = Folder::new(dto.id, dto.name.clone(), Some(parent_id));
    folder.files = dto.files.iter().map(|f| file_from_dto(f, dto.id)).collect();
    if let Some(kids) = children.remove(&Some(dto.id)) {
        for kid in kids {
            folder.subfolders.push(Arc::new(build_folder(kid, dto.id, children)));
        }
    }
    folder.recompute_aggregates();
    folder
}

fn file_from_dto(dto: &FileDto, folder_id: FolderId) -> File {
    File {
        id: dto.id,
        folder_id,
        name: dto.name.clone(),
        mime_type: dto.mime_type.clone(),
        size_bytes: dto.size_bytes,
        last_modified: dto.last_modified,
        source_url: dto.source_url.clone(),
    }
}

fn upload_dto(upload: &UploadFile) -> UploadFileDto {
    UploadFileDto {
        name: upload.name.clone(),
        mime_type: upload.mime_type.clone(),
        size_bytes: upload.size_bytes,
        last_modified: upload.last_modified,
    }
}

/// Translate an internal folder reference to the wire, where the record
/// root is `null`.
fn wire_folder(root_id: FolderId, folder_id: FolderId) -> Option<FolderId> {
    (folder_id != root_id).then_some(folder_id)
}

fn intent_label(intent: &DocumentIntent) -> &'static str {
    match intent {
        DocumentIntent::CreateFolder { .. } => "create_folder",
        DocumentIntent::RenameFolder { .. } => "rename_folder",
        DocumentIntent::MoveFolder { .. } => "move_folder",
        DocumentIntent::DeleteFolder { .. } => "delete_folder",
        DocumentIntent::UploadFiles { .. } => "upload_files",
        DocumentIntent::DeleteFile { .. } => "delete_file",
        DocumentIntent::MoveFile { .. } => "move_file",
    }
}
