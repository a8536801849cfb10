//! In-process document store used by tests and offline demos.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use leadvault_core::error::AppError;
use leadvault_core::result::AppResult;
use leadvault_core::traits::store::{
    CreateFolderRequest, DocumentSnapshot, DocumentStore, FileDto, FolderDto, MoveFileRequest,
    UploadRequest,
};
use leadvault_core::types::{FileId, FolderId, RecordId};

/// Document store holding the documents of a single record in memory.
///
/// Mirrors the flat wire shape of the real API: folders are a flat list
/// linked by `parent_id`, each carrying its own files, with root files
/// kept separately.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    state: Mutex<State>,
}

#[derive(Debug, Default)]
struct State {
    folders: Vec<FolderDto>,
    root_files: Vec<FileDto>,
}

impl MemoryDocumentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded from an existing snapshot.
    pub fn from_snapshot(snapshot: DocumentSnapshot) -> Self {
        Self {
            state: Mutex::new(State {
                folders: snapshot.folders,
                root_files: snapshot.root_files,
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, State> {
        // A poisoned lock only means a test panicked mid-call; the flat
        // state is still usable.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl State {
    fn folder(&self, folder_id: FolderId) -> Option<&FolderDto> {
        self.folders.iter().find(|f| f.id == folder_id)
    }

    fn folder_mut(&mut self, folder_id: FolderId) -> Option<&mut FolderDto> {
        self.folders.iter_mut().find(|f| f.id == folder_id)
    }

    fn require_folder(&self, folder_id: FolderId) -> AppResult<&FolderDto> {
        self.folder(folder_id)
            .ok_or_else(|| AppError::not_found(format!("Folder {folder_id} not found")))
    }

    /// Ids of a folder and every folder beneath it.
    fn descendant_ids(&self, folder_id: FolderId) -> Vec<FolderId> {
        let mut ids = vec![folder_id];
        let mut cursor = 0;
        while cursor < ids.len() {
            let current = ids[cursor];
            cursor += 1;
            for folder in &self.folders {
                if folder.parent_id == Some(current) && !ids.contains(&folder.id) {
                    ids.push(folder.id);
                }
            }
        }
        ids
    }

    fn take_file(&mut self, file_id: FileId) -> Option<FileDto> {
        if let Some(pos) = self.root_files.iter().position(|f| f.id == file_id) {
            return Some(self.root_files.remove(pos));
        }
        for folder in &mut self.folders {
            if let Some(pos) = folder.files.iter().position(|f| f.id == file_id) {
                return Some(folder.files.remove(pos));
            }
        }
        None
    }

    fn snapshot(&self) -> DocumentSnapshot {
        let total_files = self.root_files.len() as u64
            + self.folders.iter().map(|f| f.files.len() as u64).sum::<u64>();
        let total_size_bytes = self
            .root_files
            .iter()
            .map(|f| f.size_bytes)
            .chain(
                self.folders
                    .iter()
                    .flat_map(|f| f.files.iter().map(|file| file.size_bytes)),
            )
            .sum();
        DocumentSnapshot {
            folders: self.folders.clone(),
            root_files: self.root_files.clone(),
            total_files,
            total_folders: self.folders.len() as u64,
            total_size_bytes,
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn fetch_documents(&self, _record_id: RecordId) -> AppResult<DocumentSnapshot> {
        Ok(self.state().snapshot())
    }

    async fn create_folder(
        &self,
        _record_id: RecordId,
        req: &CreateFolderRequest,
    ) -> AppResult<FolderDto> {
        let mut state = self.state();
        if let Some(parent_id) = req.parent_id {
            state.require_folder(parent_id)?;
        }
        let folder = FolderDto {
            id: FolderId::new(),
            parent_id: req.parent_id,
            name: req.name.clone(),
            files: Vec::new(),
        };
        state.folders.push(folder.clone());
        Ok(folder)
    }

    async fn rename_folder(&self, folder_id: FolderId, name: &str) -> AppResult<FolderDto> {
        let mut state = self.state();
        let folder = state
            .folder_mut(folder_id)
            .ok_or_else(|| AppError::not_found(format!("Folder {folder_id} not found")))?;
        folder.name = name.to_string();
        Ok(folder.clone())
    }

    async fn move_folder(
        &self,
        folder_id: FolderId,
        new_parent_id: Option<FolderId>,
    ) -> AppResult<FolderDto> {
        let mut state = self.state();
        state.require_folder(folder_id)?;
        if let Some(parent_id) = new_parent_id {
            state.require_folder(parent_id)?;
            if state.descendant_ids(folder_id).contains(&parent_id) {
                return Err(AppError::invalid_operation(
                    "Cannot move a folder into one of its descendants",
                ));
            }
        }
        let folder = state
            .folder_mut(folder_id)
            .ok_or_else(|| AppError::not_found(format!("Folder {folder_id} not found")))?;
        folder.parent_id = new_parent_id;
        Ok(folder.clone())
    }

    async fn delete_folder(&self, folder_id: FolderId) -> AppResult<()> {
        let mut state = self.state();
        state.require_folder(folder_id)?;
        let doomed = state.descendant_ids(folder_id);
        state.folders.retain(|f| !doomed.contains(&f.id));
        Ok(())
    }

    async fn upload_files(
        &self,
        _record_id: RecordId,
        req: &UploadRequest,
    ) -> AppResult<Vec<FileDto>> {
        let mut state = self.state();
        if let Some(folder_id) = req.folder_id {
            state.require_folder(folder_id)?;
        }
        let created: Vec<FileDto> = req
            .files
            .iter()
            .map(|upload| {
                let id = FileId::new();
                FileDto {
                    id,
                    folder_id: req.folder_id,
                    name: upload.name.clone(),
                    mime_type: upload.mime_type.clone(),
                    size_bytes: upload.size_bytes,
                    last_modified: upload.last_modified,
                    source_url: Some(format!("memory://files/{id}")),
                }
            })
            .collect();
        match req.folder_id {
            Some(folder_id) => {
                let folder = state
                    .folder_mut(folder_id)
                    .ok_or_else(|| AppError::not_found(format!("Folder {folder_id} not found")))?;
                folder.files.extend(created.clone());
            }
            None => state.root_files.extend(created.clone()),
        }
        Ok(created)
    }

    async fn delete_file(&self, file_id: FileId) -> AppResult<()> {
        self.state().take_file(file_id);
        Ok(())
    }

    async fn move_file(&self, req: &MoveFileRequest) -> AppResult<FileDto> {
        let mut state = self.state();
        if let Some(destination) = req.destination_folder_id {
            state.require_folder(destination)?;
        }
        let mut file = state
            .take_file(req.file_id)
            .ok_or_else(|| AppError::not_found(format!("File {} not found", req.file_id)))?;
        file.folder_id = req.destination_folder_id;
        match req.destination_folder_id {
            Some(destination) => {
                let folder = state.folder_mut(destination).ok_or_else(|| {
                    AppError::not_found(format!("Folder {destination} not found"))
                })?;
                folder.files.push(file.clone());
            }
            None => state.root_files.push(file.clone()),
        }
        Ok(file)
    }
}
