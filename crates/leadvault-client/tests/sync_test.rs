//! Round-trip tests for the sync adapter: snapshot conversion and intent
//! commits against the in-process store.

use chrono::Utc;

use leadvault_client::{DocumentSync, MemoryDocumentStore};
use leadvault_client::sync::tree_from_snapshot;
use leadvault_core::error::ErrorKind;
use leadvault_core::traits::store::{DocumentSnapshot, FileDto, FolderDto};
use leadvault_core::types::{FileId, FolderId, RecordId};
use leadvault_entity::file::UploadFile;
use leadvault_entity::intent::DocumentIntent;

fn file_dto(name: &str, folder_id: Option<FolderId>, size_bytes: u64) -> FileDto {
    FileDto {
        id: FileId::new(),
        folder_id,
        name: name.to_string(),
        mime_type: Some("application/pdf".to_string()),
        size_bytes,
        last_modified: Utc::now(),
        source_url: Some("https://crm.example.com/blob/1".to_string()),
    }
}

/// Contracts (with msa.pdf and nested 2026 holding sow.pdf), Drafts, and
/// one root-level file.
fn sample_snapshot() -> (DocumentSnapshot, FolderId, FolderId, FolderId) {
    let contracts_id = FolderId::new();
    let year_id = FolderId::new();
    let drafts_id = FolderId::new();
    let snapshot = DocumentSnapshot {
        folders: vec![
            FolderDto {
                id: contracts_id,
                parent_id: None,
                name: "Contracts".to_string(),
                files: vec![file_dto("msa.pdf", Some(contracts_id), 1_024)],
            },
            FolderDto {
                id: year_id,
                parent_id: Some(contracts_id),
                name: "2026".to_string(),
                files: vec![file_dto("sow.pdf", Some(year_id), 2_048)],
            },
            FolderDto {
                id: drafts_id,
                parent_id: None,
                name: "Drafts".to_string(),
                files: Vec::new(),
            },
        ],
        root_files: vec![file_dto("intro.pdf", None, 512)],
        total_files: 3,
        total_folders: 3,
        total_size_bytes: 3_584,
    };
    (snapshot, contracts_id, year_id, drafts_id)
}

#[test]
fn snapshot_becomes_a_nested_tree() {
    let (snapshot, contracts_id, year_id, _) = sample_snapshot();
    let tree = tree_from_snapshot(RecordId::new(), &snapshot).expect("build");

    let root = tree.root();
    assert_eq!(root.subfolder_count, 2);
    assert_eq!(root.file_count, 1);
    assert_eq!(root.total_size_bytes, 3_584);

    // Top-level folders are re-parented under the synthetic root, and
    // root files attach to it with a concrete folder id.
    let contracts = tree.resolve(contracts_id).expect("contracts");
    assert_eq!(contracts.parent_id, Some(tree.root_id()));
    assert_eq!(root.files[0].folder_id, tree.root_id());

    let year = tree.resolve(year_id).expect("year");
    assert_eq!(year.parent_id, Some(contracts_id));
    assert_eq!(year.files[0].name, "sow.pdf");
    assert_eq!(contracts.total_size_bytes, 3_072);

    tree.validate().expect("invariants hold");
}

#[test]
fn orphan_folders_are_dropped() {
    let (mut snapshot, _, _, _) = sample_snapshot();
    let orphan_id = FolderId::new();
    snapshot.folders.push(FolderDto {
        id: orphan_id,
        parent_id: Some(FolderId::new()),
        name: "Lost".to_string(),
        files: Vec::new(),
    });

    let tree = tree_from_snapshot(RecordId::new(), &snapshot).expect("build");
    assert!(!tree.contains_folder(orphan_id));
    tree.validate().expect("invariants hold");
}

#[test]
fn duplicate_ids_in_a_snapshot_are_rejected() {
    let (mut snapshot, contracts_id, _, _) = sample_snapshot();
    snapshot.folders.push(FolderDto {
        id: contracts_id,
        parent_id: None,
        name: "Contracts again".to_string(),
        files: Vec::new(),
    });

    let err = tree_from_snapshot(RecordId::new(), &snapshot).expect_err("must fail");
    assert_eq!(err.kind, ErrorKind::InvalidOperation);
}

#[tokio::test]
async fn committed_folder_deletion_cascades_in_the_store() {
    let (snapshot, contracts_id, year_id, drafts_id) = sample_snapshot();
    let sync = DocumentSync::new(
        MemoryDocumentStore::from_snapshot(snapshot),
        RecordId::new(),
    );

    let tree = sync.load().await.expect("load");
    sync.commit(
        &tree,
        &DocumentIntent::DeleteFolder {
            folder_id: contracts_id,
        },
    )
    .await
    .expect("commit");

    let tree = sync.load().await.expect("reload");
    assert!(!tree.contains_folder(contracts_id));
    assert!(!tree.contains_folder(year_id));
    assert!(tree.contains_folder(drafts_id));
    assert_eq!(tree.root().total_size_bytes, 512);
}

#[tokio::test]
async fn committed_uploads_and_moves_round_trip() {
    let (snapshot, contracts_id, _, _) = sample_snapshot();
    let sync = DocumentSync::new(
        MemoryDocumentStore::from_snapshot(snapshot),
        RecordId::new(),
    );
    let tree = sync.load().await.expect("load");

    // Upload into a folder the server already knows.
    sync.commit(
        &tree,
        &DocumentIntent::UploadFiles {
            folder_id: contracts_id,
            files: vec![UploadFile {
                name: "renewal.pdf".to_string(),
                mime_type: Some("application/pdf".to_string()),
                size_bytes: 4_096,
                last_modified: Utc::now(),
            }],
        },
    )
    .await
    .expect("upload");

    let tree = sync.load().await.expect("reload");
    let contracts = tree.resolve(contracts_id).expect("contracts");
    assert!(contracts.files.iter().any(|f| f.name == "renewal.pdf"));

    // Move the record-level file into Contracts; the wire id is the real
    // folder id, not the synthetic root.
    let intro = tree
        .root()
        .files
        .iter()
        .find(|f| f.name == "intro.pdf")
        .expect("intro")
        .id;
    sync.commit(
        &tree,
        &DocumentIntent::MoveFile {
            file_id: intro,
            destination_id: contracts_id,
        },
    )
    .await
    .expect("move");

    let tree = sync.load().await.expect("reload");
    assert!(tree.root().files.is_empty());
    let contracts = tree.resolve(contracts_id).expect("contracts");
    assert!(contracts.files.iter().any(|f| f.id == intro));

    // And back out to the root: the destination becomes null on the wire.
    sync.commit(
        &tree,
        &DocumentIntent::MoveFile {
            file_id: intro,
            destination_id: tree.root_id(),
        },
    )
    .await
    .expect("move to root");

    let tree = sync.load().await.expect("reload");
    assert!(tree.root().files.iter().any(|f| f.id == intro));
}

#[tokio::test]
async fn committed_create_and_rename_round_trip() {
    let sync = DocumentSync::new(MemoryDocumentStore::new(), RecordId::new());
    let tree = sync.load().await.expect("load");
    assert_eq!(tree.root().subfolder_count, 0);

    sync.commit(
        &tree,
        &DocumentIntent::CreateFolder {
            parent_id: tree.root_id(),
            name: "Proposals".to_string(),
        },
    )
    .await
    .expect("create");

    let tree = sync.load().await.expect("reload");
    assert_eq!(tree.root().subfolder_count, 1);
    let proposals = &tree.root().subfolders[0];
    assert_eq!(proposals.name, "Proposals");

    sync.commit(
        &tree,
        &DocumentIntent::RenameFolder {
            folder_id: proposals.id,
            name: "Closed deals".to_string(),
        },
    )
    .await
    .expect("rename");

    let tree = sync.load().await.expect("reload");
    assert_eq!(tree.root().subfolders[0].name, "Closed deals");
}
